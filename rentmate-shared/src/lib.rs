#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Shared models and the interest-tag prompt coordinator used by the Rentmate
//! web frontend.

/// Prompt timing configuration.
pub mod config;
/// Wire models shared with the marketplace API.
pub mod models;
/// The interest-tag prompt coordinator.
pub mod prompt;
/// Collaborator traits and their errors.
pub mod services;
