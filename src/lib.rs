//! Library crate for rbac-dashboard.
//!
//! This crate exposes the building blocks of the TUI:
//! - Dashboard state, operations and key handling (`app`)
//! - Error and result types (`error`)
//! - Search filtering over users and roles (`search`)
//! - In-memory user and role records (`store`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `rbac-dashboard` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod error;
pub mod search;
pub mod store;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result, SetupError};
