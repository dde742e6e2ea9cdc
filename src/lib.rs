//! Library crate for user-board.
//!
//! This crate exposes the building blocks of the TUI:
//! - REST client and record types (`api`)
//! - Application state, reducers and event loop (`app`)
//! - Command-line configuration (`config`)
//! - UI rendering (`ui`)
//!
//! It is used by the `user-board` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod ui;
