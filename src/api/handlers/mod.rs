//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod customers;
pub mod games;
pub mod health;
pub mod rentals;
