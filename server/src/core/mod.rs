//! Core module - configuration, state and server lifecycle
//!
//! # Structure
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared handler/task state
//! - [`Server`] - HTTP server
//! - [`tasks`] - background task registration and shutdown

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
