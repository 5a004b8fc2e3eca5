//! The `todo-api` library crate.
//!
//! A minimal todo-list backend: JWT-based authentication (HS512) and CRUD on
//! todo items over a Postgres store. The binary (`main.rs`) wires the pieces
//! together; everything else lives here so integration tests can build the
//! same app.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
