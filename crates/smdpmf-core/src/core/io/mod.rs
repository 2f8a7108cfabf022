//! Reading simulation output and writing analysis tables.
//!
//! Input files are whitespace-delimited series written by the MD engine
//! ([`xvg`]), discovered and paired per condition directory ([`discovery`]),
//! and CSV summaries of SAPT calculations ([`sapt_csv`]). Results leave the
//! library as CSV tables ([`export`]) and a typeset LaTeX table ([`latex`]).

pub mod discovery;
pub mod export;
pub mod latex;
pub mod sapt_csv;
pub mod xvg;
