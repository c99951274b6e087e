//! Data model for contracts and probes.
//!
//! A [`Contract`] is the in-memory form of an OpenAPI-style document: an
//! ordered map from path to the HTTP methods declared on it, each with the
//! response codes the contract promises. Probes and their outcomes are the
//! per-endpoint records produced by an audit pass.

mod contract;
mod method;
mod probe;

pub use contract::*;
pub use method::*;
pub use probe::*;
