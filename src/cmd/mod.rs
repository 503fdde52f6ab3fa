// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command handlers.
//!
//! ```text
//! cli::Command --> cmd::...
//!   Format     --> format::run_format_command
//!   ClearError --> sentinel::run_clear_error_command
//!   Options    --> config::run_options_command
//! ```

pub mod config;
pub mod format;
pub mod sentinel;
