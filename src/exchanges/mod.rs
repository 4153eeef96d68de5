pub mod kraken_futures;
pub mod kraken_spot;
