pub mod catalog;
pub mod errors;
pub mod galleries;
pub mod products;

pub use errors::{ServiceError, ServiceResult};
