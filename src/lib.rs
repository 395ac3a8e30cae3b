//! Archive navigation model.
//!
//! Opens zip, tar (plain, gzip, bzip2, xz) and 7z archives, flattens their
//! directory tree into per-directory listings and exposes the current
//! directory as an ordered row set. New archives are built from a staging
//! directory.

pub mod app;
pub mod config;
pub mod models;
pub mod system;
pub mod utils;

pub use app::ArchiveManager;
pub use config::ModelConfig;
pub use models::{Entry, ErrorKind, ModelEvent, ModelObserver, ModelState};
pub use utils::error::{ArchiveNavError, Result};
