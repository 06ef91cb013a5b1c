//! # pkeep Architecture
//!
//! pkeep is a small personal record keeper: notes, tasks and contacts, each kept
//! in its own JSON file, with CSV export and import. The binary is one client of
//! the library; the library never touches the terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Subcommands and the interactive menu                     │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns one store per record kind, opened lazily            │
//! │  - Hands out per-kind `Collection` handles                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, generic over the record kind   │
//! │  - Returns `CmdResult<R>`                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, interchange.rs, fsio.rs)            │
//! │  - RecordStore<R, B>: collection + ids + persistence        │
//! │  - StorageBackend: FsBackend (JSON file), MemBackend (tests)│
//! │  - CSV export/import                                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One store, three schemas
//!
//! There is a single store implementation. What differs between notes, tasks
//! and contacts (fields, validation, CSV columns, searchable text) is described
//! by the [`model::Record`] trait and implemented once per kind in `model/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Record store and storage backends
//! - [`interchange`]: CSV export and import
//! - [`model`]: Record kinds and the `Record` trait
//! - [`config`]: Data directory and file names
//! - [`fsio`]: Scoped file access shared by storage and CSV
//! - [`logging`]: `flexi_logger` bootstrap for the binary
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fsio;
pub mod interchange;
pub mod logging;
pub mod model;
pub mod store;
