//! Settings groups on top of a hierarchical parameter store.
//!
//! This crate provides:
//! - [`path`] — canonical, validated parameter paths
//! - [`paginate`] — sequential continuation-token pagination as a stream
//! - [`ParameterStore`] — the store seam, with [`MemoryStore`] for tests
//! - [`SettingsClient`] — read, write, remove, and optionally read settings

pub mod memory;
pub mod paginate;
pub mod path;
pub mod settings;
pub mod store;

pub use memory::MemoryStore;
pub use paginate::{collect_all, paginate};
pub use path::{PathSegments, build_path, is_valid_segment};
pub use settings::{
    SettingName, SettingsClient, SettingsReader, SettingsRemover, SettingsTarget, SettingsWriter,
};
pub use store::ParameterStore;
