pub mod analyze;
pub mod export;
pub mod factors;
pub mod upload;
