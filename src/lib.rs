// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Expose the service modules to the binaries and the test suite

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
