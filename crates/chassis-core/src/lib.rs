//! Chassis Records Core
//!
//! Layered architecture:
//! - domain: records, filters, legacy path handling, form validation
//! - repository: REST API client and session storage
//! - controller: listing and detail state shared by every screen

pub mod config;
pub mod controller;
pub mod domain;
pub mod repository;

pub use config::ClientConfig;
pub use domain::{ClientError, ClientResult, Record};
