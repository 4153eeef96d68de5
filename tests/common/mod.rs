#![allow(dead_code)]

use async_trait::async_trait;
use krakenx::core::errors::ExchangeError;
use krakenx::core::kernel::RestClient;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request seen by [`MockRest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory transport answering each endpoint with a canned body
#[derive(Clone, Default)]
pub struct MockRest {
    routes: Arc<HashMap<String, Vec<u8>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockRest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(mut self, endpoint: &str, body: &str) -> Self {
        Arc::make_mut(&mut self.routes).insert(endpoint.to_string(), body.as_bytes().to_vec());
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was made")
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            endpoint: endpoint.to_string(),
            query: query_params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        });

        self.routes
            .get(endpoint)
            .cloned()
            .ok_or_else(|| ExchangeError::NetworkError(format!("connection refused: {}", endpoint)))
    }
}
