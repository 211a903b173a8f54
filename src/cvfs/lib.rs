//! # CVFS Architecture
//!
//! CVFS is a **UI-agnostic virtual file system library**: an in-memory tree of
//! directories and documents bounded by a fixed capacity, a small predicate
//! language for searching it, and full undo/redo over every mutation. The
//! interactive shell in `main.rs` is just one client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Tokenizes input lines, dispatches, prints results        │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session (current disk + snapshot store)         │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, records history on success    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core: tree.rs, criterion.rs, registry.rs, history.rs       │
//! │  Storage: snapshot.rs (codec) + store/ (where bytes live)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! After every completed operation:
//! - node names match `^[A-Za-z0-9]{1,10}$`, criterion names `^[A-Za-z]{2}$`
//! - siblings have distinct names
//! - the root's recursive size never exceeds the disk capacity
//! - committing a new command empties the redo stack
//!
//! A failed operation changes nothing: growth is checked before the tree is
//! touched, and a failed undo/redo puts its command back where it came from.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: business logic for each operation
//! - [`disk`]: the session value (tree, cursor, criteria, history)
//! - [`tree`], [`model`]: the node arena and node types
//! - [`criterion`], [`registry`]: search predicates and their names
//! - [`history`]: the undo/redo command log
//! - [`snapshot`], [`store`]: persistence
//! - [`config`]: configuration
//! - [`tokenize`]: input line splitting for shell-like clients
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod criterion;
pub mod disk;
pub mod error;
pub mod history;
pub mod model;
pub mod registry;
pub mod snapshot;
pub mod store;
pub mod tokenize;
pub mod tree;
