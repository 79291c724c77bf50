//! Request payloads accepted by the JSON API.
//!
//! Each form checks its shape with `validator` and converts into the typed
//! domain payload consumed by the service layer.

pub mod catalog;
pub mod galleries;
pub mod products;
