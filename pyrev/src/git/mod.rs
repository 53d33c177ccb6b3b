//! Git integration for pyrev.
//!
//! The binary plays the host-framework role: it computes the diff with git2
//! and converts it into the owned patch records the review pipeline consumes.
//! Everything here is synchronous; the diff is extracted once per run and the
//! `git2::Diff` never escapes this module.
pub mod patches;
pub mod types;
