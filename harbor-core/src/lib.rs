//! Harbor core library — domain types, settings persistence, errors.
//!
//! Public API surface:
//! - [`types`] — repository/service domain structs
//! - [`error`] — [`SettingsError`]
//! - [`settings`] — the [`SettingsStore`] capability and its JSON-file implementation
//! - [`paths`] — well-known file locations

pub mod error;
pub mod paths;
pub mod settings;
pub mod types;

pub use error::SettingsError;
pub use settings::{JsonSettings, SettingsStore};
pub use types::{RelocationRequest, RepositoryConfig, ServiceState};
