//! Data models of the analysis.
//!
//! - [`trajectory`] - one pulling run as paired distance/force samples
//! - [`condition`] - an experimental condition and where its files live
//! - [`profile`] - curves derived from trajectories (smoothed series, work, free energy)
//! - [`sapt`] - SAPT energy components per conformation and per ion
//! - [`color`] - display colours for conditions

pub mod color;
pub mod condition;
pub mod profile;
pub mod sapt;
pub mod trajectory;
