//! Persistence layer for normalized intake records.
//!
//! One pre-existing `users` table, parameterized queries only, no DDL.

pub mod models;
pub mod pool;
pub mod queries;
