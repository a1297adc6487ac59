//! # Medrec Architecture
//!
//! Medrec is a record-keeping library for a small clinic with a console
//! client on top. The library owns all the behavior; the binary only parses
//! arguments, runs the menu loop, and formats output.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Interactive numbered menu, prompting, table rendering    │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - ClinicApi facade, owns the store and the ID allocators   │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, pure business logic            │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract RecordStore trait                               │
//! │  - FileStore and DbStore (production), InMemoryStore (test) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types (`Result<CmdResult>`), never writes to stdout/stderr, and
//! never assumes a terminal. The same core could serve a TUI or a web
//! frontend unchanged.
//!
//! ## Storage Backends
//!
//! The backend is a deployment-time choice, wired by dependency injection
//! at startup: either fixed-slot binary files ([`store::fs::FileStore`]) or
//! a SQLite database ([`store::db::DbStore`]). Both expose identical
//! observable behavior through [`api::ClinicApi`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade — entry point for all operations
//! - [`commands`]: Business logic for each menu operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Patient`, `Appointment`)
//! - [`alloc`]: Sequential identifier allocation
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod alloc;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
