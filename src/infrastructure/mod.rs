//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves the per-user locations the client reads its configuration from
//! and writes trace files to, following the XDG base directory conventions.

pub mod paths;

pub use paths::{config_dir, data_dir, default_config_file, expand_tilde, resolve_data_path};
