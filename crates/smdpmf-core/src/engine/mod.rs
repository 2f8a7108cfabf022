//! # Engine Module
//!
//! Turns validated configuration into analysed ensembles.
//!
//! - **Configuration** ([`config`]) - pipeline and SAPT settings with builders
//! - **Error Handling** ([`error`]) - `EngineError`, aggregating the errors of every layer
//! - **Progress Monitoring** ([`progress`]) - events emitted while workflows run
//!
//! Loading a condition and the analysis stages applied to it (force, work and free
//! energy) are internal; they are driven by [`crate::workflows`].

pub mod config;
pub mod error;
pub(crate) mod loader;
pub mod progress;
pub(crate) mod tasks;
