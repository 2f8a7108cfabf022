//! # Core Module
//!
//! Building blocks shared by every analysis in the crate.
//!
//! - **Data Models** ([`models`]) - trajectories, conditions, derived curves and SAPT terms
//! - **Numerics** ([`numerics`]) - pure kernels operating on sampled series
//! - **File I/O** ([`io`]) - series readers, file discovery, CSV and LaTeX writers
//!
//! Nothing here holds state between calls; orchestration lives in [`crate::engine`].

pub mod io;
pub mod models;
pub mod numerics;
