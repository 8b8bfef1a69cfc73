//! Configuration management for debug operators.
//!
//! # Data Flow
//! ```text
//! settings file (TOML) + STREAM_DEBUG_* environment
//!     → loader.rs (parse, validate, env overrides)
//!     → schema.rs (DebugSettings → GlobalDebugConfigUpdate)
//!     → global.rs (merge into the DebugContext store, atomic swap)
//!     → read by every operator at construction time
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new settings
//!     → receiver applies them to the store
//! ```
//!
//! # Design Decisions
//! - The store is replaced as a whole; readers never see a partial merge
//! - Operators snapshot the store once, when they are built
//! - Merging never fails; only file loading has an error type

pub mod global;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use global::{
    create_default_global_debug_config, global_debug_config, reset_global_debug_config,
    set_global_debug_config, DebugContext, GlobalDebugConfig, GlobalDebugConfigUpdate,
};
pub use loader::{apply_settings, load_settings, SettingsError};
pub use schema::{DebugSettings, SinkKind};
pub use watcher::{apply_updates, SettingsWatcher};
