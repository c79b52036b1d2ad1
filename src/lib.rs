//! SAT: Sourcing Analytics Toolkit
//!
//! Fuses procurement history, inspection results, RFQ pricing, and a
//! geometric-similarity graph of parts into per-part risk, pricing, and
//! consolidation signals.

pub mod analytics;
pub mod cli;
pub mod core;
pub mod tables;
