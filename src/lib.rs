//! `liquidity-report` library crate.
//!
//! The binary (`lqr`) is a thin wrapper around this library so that:
//!
//! - the alignment pipeline is testable without network access or processes
//! - collaborators (CoinGecko, FRED, CSV) can be swapped behind two traits

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod series;
