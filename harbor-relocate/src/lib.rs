//! Repository relocation workflow for the Harbor control surface.
//!
//! Public API surface:
//! - [`mover`] — durable directory move
//! - [`launcher`] — launcher script patcher
//! - [`service`] / [`dialogs`] — contracts for the external collaborators
//! - [`status`] — last-value-wins channels feeding the menu UI
//! - [`workflow`] — the [`Relocation`] orchestrator

pub mod dialogs;
mod error;
pub mod launcher;
pub mod mover;
pub mod service;
pub mod status;
pub mod workflow;

pub use error::{MoveError, PatchError, RelocateError, ServiceError};
pub use launcher::Platform;
pub use service::ServiceController;
pub use status::{StatusChannel, StatusChannels};
pub use workflow::{verify_repository, Relocation, RelocationOutcome, RepositoryCheck};
