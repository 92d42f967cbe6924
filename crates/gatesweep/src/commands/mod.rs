pub mod cleanup;
pub mod resolve;
