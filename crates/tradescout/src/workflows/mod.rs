pub mod analysis;
pub mod documents;
pub mod ingest;
pub mod matching;
pub mod store;
