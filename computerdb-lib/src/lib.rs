//! Computer Database client library
//!
//! An async client for the Computer Database REST API and the validation
//! rules of its computer create/edit form.

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod validation;

mod client;

pub use client::*;
