//! Interactive helpers layered on top of git.
//!
//! `gitaddons switch` picks a branch, creates a tracking branch for
//! remote-only picks, and rebases onto the remote default branch.
//! `gitaddons who` shows an author's recent commits.
//!
//! The library API is not stable; it exists so the binary and its tests share
//! one implementation.

pub mod config;
pub mod git;
pub mod shell_exec;
pub mod styling;
