// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        Public API
//!     query.rs   cmd.rs
//!         \        /
//!          v      v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitMutation
//!   (gix, read)  (CLI, write)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .is_repo    .checkout/.merge
//!    .branch     .stash push/pop
//!    .root       .commit/.push
//!    .uncommit   .branch -D
//! ```
//!
//! **`GixBackend`** — pure Rust, no subprocess, read-only.
//! **`ShellBackend`** — git CLI for everything that writes, plus the history
//! queries gix does not cover cheaply (merge-base, cat-file at a commit).

pub mod backend;
pub mod cmd;
pub mod query;
