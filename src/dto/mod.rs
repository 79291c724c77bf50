//! Response shapes returned by the service layer.

pub mod catalog;
pub mod galleries;
pub mod products;
