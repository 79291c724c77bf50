//! Domain entities, value objects and pure calculators.
//!
//! Nothing in this module touches storage or transport.

pub mod catalog;
pub mod clock;
pub mod gallery;
pub mod product;
pub mod scoring;
pub mod types;
pub mod variation;
