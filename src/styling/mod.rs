//! Consolidated styling module for terminal output.
//!
//! This module uses the anstyle ecosystem:
//! - anstream for auto-detecting color support
//! - anstyle for composable styling
//! - color-print for message markup
//!
//! ## stdout vs stderr principle
//!
//! - **stdout**: Primary data output (commit tables, `switch --preview` commands)
//! - **stderr**: Status messages (progress, success, errors, hints, warnings)
//!
//! This separation allows piping (`gitaddons who | grep fix`) without status
//! messages interfering. Use `println!` for primary output, `eprintln!` for
//! status messages.

mod constants;
mod format;
mod table;

// Re-exports from anstream (auto-detecting output)
pub use anstream::{eprintln, println};

// Re-export our public types
pub use constants::*;
pub use format::format_with_gutter;
pub use table::Table;
