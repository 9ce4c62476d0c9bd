//! Bearer-token authentication and role authorization for an axum API.
//!
//! Requests pass through `protect` (reject on any failure), `optional` (never reject) or
//! `protect` + `authorize` (role allow-set). All three share one pipeline:
//! extract bearer → verify HS256 token → resolve user → check eligibility.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
