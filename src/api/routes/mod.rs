//! API Routes
//!
//! Route handlers organized by functionality.

pub mod dashboard;
pub mod employees;
pub mod export;
pub mod health;
