//! Relocation orchestrator.
//!
//! A linear state machine with early-exit branches:
//!
//! ```text
//! Idle → Confirming → SelectingTarget → Validating → Stopping → Moving
//!      → Persisting → Patching → Starting → Done
//! ```
//!
//! `Cancelled` is reachable from `Confirming` and `SelectingTarget`; a fatal
//! failure is reachable from `Stopping`, `Moving`, and `Persisting`. A patch
//! failure is non-fatal and the daemon is restarted regardless. A failure
//! policy asymmetry is deliberate: a failed move leaves the daemon stopped
//! so the user is not misled into retrying immediately, while persist and
//! patch failures still attempt a restart.
//!
//! Every error is caught here; `run` never panics the host application.

use std::fs;
use std::path::{Path, PathBuf};

use harbor_core::{
    RelocationRequest, RepositoryConfig, ServiceState, SettingsStore,
};

use crate::dialogs::{Dialog, Dialogs};
use crate::error::{PatchError, RelocateError, ServiceError};
use crate::launcher::{self, Platform};
use crate::mover;
use crate::service::ServiceController;
use crate::status::StatusChannels;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Terminal state of one relocation attempt.
#[derive(Debug)]
pub enum RelocationOutcome {
    /// User backed out at the warning dialog or the directory prompt. No
    /// durable state changed; re-running is always safe.
    Cancelled,

    /// The chosen parent derives to the repository's current location.
    /// Informational, explicitly not an error.
    AlreadyAtTarget { path: PathBuf },

    /// A fatal phase failed; see [`RelocateError`] for what the filesystem
    /// and configuration look like afterwards.
    Failed(RelocateError),

    /// The repository now lives at `new_path` and the configuration names
    /// it. Warnings carry the non-fatal failures that were surfaced along
    /// the way.
    Relocated {
        new_path: PathBuf,
        patch_warning: Option<PatchError>,
        start_warning: Option<ServiceError>,
    },
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Sequences one relocation attempt over the injected collaborators.
pub struct Relocation<'a, S> {
    store: &'a dyn SettingsStore,
    dialogs: &'a dyn Dialogs,
    service: &'a S,
    status: &'a StatusChannels,
    app_root: &'a Path,
    platform: Platform,
}

impl<'a, S: ServiceController> Relocation<'a, S> {
    pub fn new(
        store: &'a dyn SettingsStore,
        dialogs: &'a dyn Dialogs,
        service: &'a S,
        status: &'a StatusChannels,
        app_root: &'a Path,
        platform: Platform,
    ) -> Self {
        Self {
            store,
            dialogs,
            service,
            status,
            app_root,
            platform,
        }
    }

    /// Run the whole workflow to one of its terminal states.
    ///
    /// Takes `&mut self` so a second relocation cannot start while one is
    /// in flight; callers additionally disable the triggering menu action
    /// for the duration.
    pub async fn run(&mut self) -> RelocationOutcome {
        // Confirming
        tracing::info!("user prompted about effects of moving the repository");
        let confirm = Dialog::warning(
            "Move repository",
            "The daemon will be stopped while its repository is moved to a \
             new location. This can take a while for large repositories.",
            vec!["Move".to_string(), "Cancel".to_string()],
        );
        if self.dialogs.show(&confirm) != Some(0) {
            tracing::info!("user canceled");
            return RelocationOutcome::Cancelled;
        }

        // SelectingTarget
        tracing::info!("user will pick a destination directory");
        let Some(parent) = self.dialogs.select_directory() else {
            tracing::info!("user canceled");
            return RelocationOutcome::Cancelled;
        };

        // Validating
        let config = match self.store.repository() {
            Ok(config) => config,
            Err(err) => {
                let err = RelocateError::Config(err);
                self.dialogs.report_error(&err.to_string());
                return RelocationOutcome::Failed(err);
            }
        };
        let Some(request) = RelocationRequest::derive(&config.path, &parent) else {
            let err = RelocateError::InvalidRepositoryPath {
                path: config.path.clone(),
            };
            self.dialogs.report_error(&err.to_string());
            return RelocationOutcome::Failed(err);
        };
        if request.is_noop() {
            tracing::info!(
                path = %request.target.display(),
                "new location is the same as the old one",
            );
            self.dialogs.show(&Dialog::info(
                "Repository not moved",
                format!(
                    "The repository already lives at {}.",
                    request.target.display()
                ),
            ));
            return RelocationOutcome::AlreadyAtTarget {
                path: request.target,
            };
        }

        // Stopping
        self.status.service.publish(ServiceState::Stopping);
        if let Err(err) = self.service.stop().await {
            // The controller left the daemon in an unknown state; report
            // that honestly and touch nothing on disk.
            tracing::error!(error = %err, "daemon stop failed before move");
            self.dialogs
                .report_error(&format!("Could not stop the daemon: {err}"));
            return RelocationOutcome::Failed(RelocateError::ServiceStop(err));
        }

        // Moving. On failure the daemon stays stopped: restarting here would
        // suggest the relocation is safe to retry immediately.
        if let Err(err) = mover::move_dir(&request.current, &request.target) {
            tracing::error!(error = %err, "repository move failed");
            self.dialogs.report_error(&err.to_string());
            return RelocationOutcome::Failed(RelocateError::Move(err));
        }
        tracing::info!(
            from = %request.current.display(),
            to = %request.target.display(),
            "repository moved",
        );

        // Persisting
        let new_config = RepositoryConfig::new(request.target.clone());
        if let Err(err) = self.store.set_repository(&new_config) {
            // Known gap: the data now sits at the new path while the
            // settings still name the old one. The launcher scripts stay
            // untouched so they never disagree with the settings, and the
            // daemon is still restarted for the user.
            tracing::error!(error = %err, "failed to persist new repository path");
            self.dialogs.report_error(&err.to_string());
            self.restart_after_failure().await;
            return RelocationOutcome::Failed(RelocateError::Config(err));
        }
        tracing::info!("configuration updated");
        self.status.repository.publish(request.target.clone());

        // Patching — best effort; the settings record is the primary launch
        // mechanism, the scripts are a convenience for manual starts.
        let patch_warning =
            match launcher::patch_launcher_script(self.app_root, self.platform, &request.target) {
                Ok(()) => None,
                Err(err) => {
                    tracing::warn!(error = %err, "launcher script patch failed");
                    self.dialogs.report_error(&err.to_string());
                    Some(err)
                }
            };

        // Starting
        self.status.service.publish(ServiceState::Starting);
        let start_warning = match self.service.start().await {
            Ok(()) => {
                self.status.service.publish(ServiceState::Running);
                self.dialogs.show(&Dialog::info(
                    "Repository moved",
                    format!("The repository now lives at {}.", request.target.display()),
                ));
                None
            }
            Err(err) => {
                self.status.service.publish(ServiceState::Uninitialized);
                tracing::error!(error = %err, "daemon start failed after move");
                self.dialogs.report_error(&format!(
                    "The repository was moved to {} but the daemon failed to start: {err}",
                    request.target.display()
                ));
                Some(err)
            }
        };

        RelocationOutcome::Relocated {
            new_path: request.target,
            patch_warning,
            start_warning,
        }
    }

    /// Restart attempted after a persist failure; its own failure is only
    /// surfaced, never escalated over the original error.
    async fn restart_after_failure(&self) {
        self.status.service.publish(ServiceState::Starting);
        match self.service.start().await {
            Ok(()) => self.status.service.publish(ServiceState::Running),
            Err(err) => {
                self.status.service.publish(ServiceState::Uninitialized);
                tracing::error!(error = %err, "daemon restart failed");
                self.dialogs
                    .report_error(&format!("Could not restart the daemon: {err}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Startup reconciliation probe
// ---------------------------------------------------------------------------

/// What a startup probe of the configured repository path found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryCheck {
    /// The configured path exists and holds data.
    Consistent,
    /// The configured path does not exist — typically the aftermath of a
    /// relocation whose settings write failed.
    Missing,
    /// The configured path exists but is empty (first run).
    Uninitialized,
}

/// Read-only probe to detect a mismatch between the configured path and the
/// directory on disk. Goes beyond the observed source behavior: it only
/// reports, it never rewrites configuration.
pub fn verify_repository(config: &RepositoryConfig) -> RepositoryCheck {
    if !config.path.is_dir() {
        return RepositoryCheck::Missing;
    }
    match fs::read_dir(&config.path) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                RepositoryCheck::Consistent
            } else {
                RepositoryCheck::Uninitialized
            }
        }
        Err(_) => RepositoryCheck::Missing,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
