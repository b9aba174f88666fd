//! Galeri CRM API Library
//!
//! Customer-relationship-management backend for a car dealership: customer
//! records in Postgres, an HTTP/JSON API over them, login with salted-hash
//! verification, and the typed view-state model used by the staff client.
//!
//! # Modules
//!
//! - `auth`: Login verification and access-token issuance.
//! - `config`: Configuration management.
//! - `db`: Database connection, pool, and schema.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Data models and wire types.
//! - `sms`: Notification gateway boundary and its simulator.
//! - `store`: Customer CRUD and statistics over the store.
//! - `view`: Client view-state machine.

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod sms;
pub mod store;
pub mod view;
