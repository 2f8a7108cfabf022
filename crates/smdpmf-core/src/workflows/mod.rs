//! # Workflows Module
//!
//! Top-level entry points of the library.
//!
//! - **Pulling Workflow** ([`pulling`]) - force, work and Jarzynski free-energy profiles
//!   for every configured condition, analysed in parallel.
//! - **SAPT Workflow** ([`sapt`]) - per-ion SAPT component tables with conformation
//!   labels, averages and the shared plotting range.
//!
//! Both report progress through a [`crate::engine::progress::ProgressReporter`] and
//! return plain result structs; writing figures is left to the caller.

pub mod pulling;
pub mod sapt;
