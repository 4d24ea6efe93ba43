//! # Database Module
//!
//! - `models`: row types
//! - `users`: queries against the `users` table

pub mod models;
pub mod users;
