mod error;
pub mod pages;
pub mod rpc;

pub use error::ApiError;
