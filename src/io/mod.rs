//! Input helpers.
//!
//! - offline CSV price / macro sources (`ingest`)

pub mod ingest;

pub use ingest::*;
