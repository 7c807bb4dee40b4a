//! # Ring Tactics
//!
//! A two-player abstract strategy game on a square grid: place rings, grow
//! a connected cluster, and combine collinear runs into towers and lasers
//! whose area effects destroy enemy pieces and deny them ground. A color
//! with no legal placement left loses; two blocked colors draw.
//!
//! The crate couples a pure, synchronous board rule engine with a terminal
//! UI for hotseat play and an in-memory room store for turn exchange
//! between two remote participants.
//!
//! ## Modules
//!
//! - [`game`] — Core rule engine: positions, cells, board, game session
//! - [`store`] — Room table: opaque room codes, join order, turn-gated writes
//! - [`ui`] — Terminal UI: hotseat game view
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod store;
pub mod ui;
