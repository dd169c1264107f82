//! # Taskbook API Server Library
//!
//! HTTP surface of Taskbook: account registration and login, a bearer-token
//! auth gate, profile updates and per-user task CRUD.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors with uniform rejections
//! - `middleware`: Auth gate and security headers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
