//! # smdpmf Core Library
//!
//! Free-energy profiles from steered molecular-dynamics pulling runs via the Jarzynski
//! equality, plus a tabulation of SAPT energy decompositions for ion–peptide contacts.
//!
//! ## Architecture
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Trajectory`, `EnsembleProfile`,
//!   `SaptComponents`), the numerical kernels of the pipeline (ordering, smoothing,
//!   trapezoidal work, exponential averaging) and file I/O.
//!
//! - **[`engine`]: The Logic Core.** Validated configuration, per-condition loading and
//!   the analysis stages that turn a set of trajectories into force, work and
//!   free-energy ensembles. Errors from every layer are aggregated into `EngineError`.
//!
//! - **[`workflows`]: The Public API.** Complete procedures (`pulling`, `sapt`) that
//!   run the stages for every configured condition or ion and report progress.

pub mod core;
pub mod engine;
pub mod workflows;
