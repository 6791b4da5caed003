//! # Core Application Logic
//!
//! This module contains the console's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • SnapshotStore        │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │  Headless  │
//!          │  Adapter   │                │    CLI     │
//!          │ (ratatui)  │                │  (main.rs) │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`conversation`]: Chat session, send/merge/reset/restore
//! - [`timeline`]: Read-only projections over trace events
//! - [`calendar`]: Interview list, filtering, time formatting
//! - [`store`]: The single snapshot slot on disk
//! - [`config`]: Layered configuration

pub mod action;
pub mod calendar;
pub mod config;
pub mod conversation;
pub mod state;
pub mod store;
pub mod timeline;
