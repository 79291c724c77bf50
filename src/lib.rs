//! Core library exports for the catalog service.
//!
//! The `data` feature exposes the domain model, the in-memory repository and
//! the service layer (catalog listing, products, galleries). The `server`
//! feature adds the JSON forms, routes and configuration used by the
//! Actix-web binary.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod services;

#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
