// Pipeline processing: parsing, reconciliation, and aggregation

pub mod aggregate;
pub mod parser;
pub mod reconcile;
