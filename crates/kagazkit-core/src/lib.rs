// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// KagazKit — Core types, error definitions, and configuration shared across
// all crates.

pub mod config;
pub mod error;
pub mod file_list;
pub mod human_errors;
pub mod types;

pub use config::AppConfig;
pub use error::{DocumentError, OperationError, ValidationError};
pub use file_list::FileList;
pub use types::*;
