// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          format / clear-error / options / push-worker
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             workflow    coordinator  pr
//!         inspect/classify  push w/   HTTP
//!         snapshot/branch   retries   find-or-create
//!         rollback/lock        |
//!                 |            |
//!           +-----+------+-----+
//!           v            v
//!          git        formatter
//!        gix/CLI     black (PATH)
//!
//!   +-----------------------------------------+
//!   |  sentinel   fail-closed error record    |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod formatter;
pub mod git;
pub mod logging;
pub mod pr;
pub mod sentinel;
pub mod workflow;
