pub mod pull;
pub mod sapt;
