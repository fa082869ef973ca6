//! Install, uninstall and status orchestration.
//!
//! [`Installer`] ties a resolved [`InstallLayout`] to the ordered plan from
//! [`build_plan`], enforces the privilege policy before anything is written,
//! and keeps the install receipt current.

use super::env_path::{PathStore, RegistryPathStore};
use super::layout::InstallLayout;
use super::plan::build_plan;
use super::privilege::{PrivilegePolicy, PrivilegeProbe, SystemPrivilege};
use super::receipt::{Artifact, InstallReceipt, Removal};
use super::shortcut::{PowerShellShortcuts, ShortcutWriter};
use super::step::{Step, StepContext, StepOutcome, StepState};
use crate::error::{InstallerError, Result};
use crate::settings::Settings;
use crate::utils::fs;
use chrono::Utc;

/// OS integrations the installer talks to.
///
/// Tests swap these for in-memory fakes.
pub struct Integrations {
    /// Privilege detection
    pub privilege: Box<dyn PrivilegeProbe>,
    /// Machine PATH storage
    pub machine_path: Box<dyn PathStore>,
    /// Shortcut creation
    pub shortcuts: Box<dyn ShortcutWriter>,
}

impl Integrations {
    /// Integrations backed by the running system.
    pub fn system() -> Self {
        Self {
            privilege: Box::new(SystemPrivilege),
            machine_path: Box::new(RegistryPathStore),
            shortcuts: Box::new(PowerShellShortcuts),
        }
    }
}

impl std::fmt::Debug for Integrations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integrations").finish_non_exhaustive()
    }
}

/// Switches for install and uninstall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Overwrite a newer installed version
    pub force: bool,
    /// Report what would happen without touching the system
    pub dry_run: bool,
}

/// One line of an install report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// What the step does
    pub description: String,
    /// What happened (or would happen, for a dry run)
    pub outcome: StepOutcome,
}

/// Result of [`Installer::install`].
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    /// Per-step results in plan order
    pub steps: Vec<StepReport>,
    /// Non-fatal problems
    pub warnings: Vec<String>,
    /// Receipt written, if any
    pub receipt: Option<InstallReceipt>,
}

/// Result of [`Installer::uninstall`].
#[derive(Debug, Clone, Default)]
pub struct UninstallReport {
    /// Per-artifact results in removal order
    pub removals: Vec<(String, Removal)>,
    /// Non-fatal problems
    pub warnings: Vec<String>,
    /// Nothing from a previous install was found
    pub not_installed: bool,
}

/// Result of [`Installer::status`].
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    /// Receipt of the current install, if any
    pub receipt: Option<InstallReceipt>,
    /// Per-step state in plan order
    pub steps: Vec<(String, StepState)>,
}

impl StatusReport {
    /// True when every step is in its installed state.
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|(_, state)| *state == StepState::Present)
    }
}

/// Installs and removes the application for one platform layout.
#[derive(Debug)]
pub struct Installer {
    settings: Settings,
    layout: InstallLayout,
    integrations: Integrations,
    options: InstallOptions,
}

impl Installer {
    /// Create an installer.
    pub fn new(
        settings: Settings,
        layout: InstallLayout,
        integrations: Integrations,
        options: InstallOptions,
    ) -> Self {
        Self {
            settings,
            layout,
            integrations,
            options,
        }
    }

    /// Resolved target paths.
    pub fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    /// Ordered install steps.
    pub fn plan(&self) -> Vec<Step> {
        build_plan(&self.settings, &self.layout)
    }

    fn step_context(&self) -> StepContext<'_> {
        StepContext {
            machine_path: self.integrations.machine_path.as_ref(),
            shortcuts: self.integrations.shortcuts.as_ref(),
        }
    }

    fn enforce_privilege(&self, operation: &str, warnings: &mut Vec<String>) -> Result<()> {
        if self.options.dry_run {
            return Ok(());
        }
        let policy = PrivilegePolicy::for_target(self.layout.platform, self.layout.is_staged());
        if let Some(warning) = policy.enforce(self.integrations.privilege.as_ref(), operation)? {
            log::warn!("{warning}");
            warnings.push(warning);
        }
        Ok(())
    }

    /// Read the receipt; an unreadable one is reported and ignored.
    async fn existing_receipt(&self, warnings: &mut Vec<String>) -> Option<InstallReceipt> {
        match InstallReceipt::read(&self.layout.receipt).await {
            Ok(receipt) => receipt,
            Err(e) => {
                let warning = format!("ignoring unreadable install receipt: {e}");
                log::warn!("{warning}");
                warnings.push(warning);
                None
            }
        }
    }

    /// Refuse to replace a newer install unless forced.
    fn check_version(&self, previous: Option<&InstallReceipt>) -> Result<()> {
        let Some(previous) = previous else {
            return Ok(());
        };
        let incoming = self.settings.version()?;
        match semver::Version::parse(&previous.version) {
            Ok(installed) if installed > incoming && !self.options.force => {
                Err(InstallerError::Downgrade {
                    installed: installed.to_string(),
                    incoming: incoming.to_string(),
                })
            }
            Ok(installed) if installed > incoming => {
                log::warn!("replacing newer version {installed} with {incoming} (--force)");
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(e) => {
                log::warn!(
                    "installed version {:?} is not valid semver ({e}); overwriting",
                    previous.version
                );
                Ok(())
            }
        }
    }

    /// Install the application.
    ///
    /// Every step is idempotent, so installing twice leaves the same tree.
    pub async fn install(&self) -> Result<InstallReport> {
        let mut report = InstallReport::default();
        self.enforce_privilege("install", &mut report.warnings)?;

        let previous = self.existing_receipt(&mut report.warnings).await;
        self.check_version(previous.as_ref())?;

        let ctx = self.step_context();
        let plan = self.plan();
        let mut artifacts = Vec::with_capacity(plan.len());

        for step in &plan {
            let description = step.describe();
            let outcome = if self.options.dry_run {
                match step.check(&ctx).await? {
                    StepState::Present => StepOutcome::Unchanged,
                    StepState::SourceMissing => StepOutcome::Skipped("source missing".to_string()),
                    StepState::Missing | StepState::Drifted => StepOutcome::Applied,
                }
            } else {
                let outcome = step.apply(&ctx).await?;
                match outcome {
                    StepOutcome::Applied => log::info!("{description}"),
                    StepOutcome::Unchanged => log::debug!("{description}: already done"),
                    StepOutcome::Skipped(_) => {}
                }
                outcome
            };

            if let StepOutcome::Skipped(reason) = &outcome {
                log::warn!("skipped: {description}: {reason}");
                report.warnings.push(reason.clone());
            }
            if owns_artifact(step, &outcome, previous.as_ref()) {
                artifacts.push(step.artifact());
            }
            report.steps.push(StepReport {
                description,
                outcome,
            });
        }

        if self.options.dry_run {
            return Ok(report);
        }

        let version = self.settings.version_string().to_string();
        let installed_at = previous
            .filter(|p| p.version == version)
            .map(|p| p.installed_at)
            .unwrap_or_else(Utc::now);
        let receipt = InstallReceipt {
            product: self.settings.product_name().to_string(),
            version,
            platform: self.layout.platform,
            installed_at,
            artifacts,
        };
        receipt.write(&self.layout.receipt).await?;
        log::info!(
            "installed {} {} to {}",
            receipt.product,
            receipt.version,
            self.layout.install_dir.display()
        );
        report.receipt = Some(receipt);
        Ok(report)
    }

    /// Remove everything an install created.
    ///
    /// Artifacts come from the receipt, or from the plan when there is none,
    /// and are removed in reverse creation order. The install directory is
    /// removed recursively only when the receipt says install created it;
    /// otherwise it is removed once it is empty. With `purge` the per-user
    /// data directory goes too.
    pub async fn uninstall(&self, purge: bool) -> Result<UninstallReport> {
        let mut report = UninstallReport::default();
        self.enforce_privilege("uninstall", &mut report.warnings)?;

        let receipt = self.existing_receipt(&mut report.warnings).await;
        let install_dir = Artifact::Directory {
            path: self.layout.install_dir.clone(),
        };
        let mut artifacts: Vec<Artifact> = match receipt {
            Some(receipt) => receipt.artifacts,
            None => self
                .plan()
                .iter()
                .map(Step::artifact)
                .filter(|artifact| *artifact != install_dir)
                .collect(),
        };
        let owns_install_dir = artifacts.contains(&install_dir);
        if purge {
            if let Some(dir) = &self.layout.user_data_dir {
                artifacts.insert(0, Artifact::Directory { path: dir.clone() });
            }
        }

        let machine_path = self.integrations.machine_path.as_ref();
        for artifact in artifacts.iter().rev() {
            let description = artifact.describe();
            let result = if self.options.dry_run {
                artifact.is_present(machine_path).await.map(|present| {
                    if present {
                        Removal::Removed
                    } else {
                        Removal::Absent
                    }
                })
            } else {
                artifact.remove(machine_path).await
            };

            let removal = match (result, artifact) {
                (Ok(removal), _) => removal,
                (Err(e), Artifact::PathEntry { .. } | Artifact::Shortcut { .. }) => {
                    let warning = format!("could not remove {description}: {e}");
                    log::warn!("{warning}");
                    report.warnings.push(warning);
                    Removal::Kept(e.to_string())
                }
                (Err(e), _) => return Err(e),
            };
            if let Removal::Kept(reason) = &removal {
                log::warn!("kept {description}: {reason}");
            }
            report.removals.push((description, removal));
        }

        report.not_installed = report
            .removals
            .iter()
            .all(|(_, removal)| *removal == Removal::Absent);
        if report.not_installed {
            log::info!("{} is not installed", self.settings.product_name());
        } else if !self.options.dry_run {
            fs::remove_file(&self.layout.receipt).await?;
            let dir = &self.layout.install_dir;
            if !owns_install_dir && dir.is_dir() && !fs::remove_dir_if_empty(dir).await? {
                log::info!(
                    "kept {}: it holds files install did not create",
                    dir.display()
                );
            }
            log::info!("uninstalled {}", self.settings.product_name());
        }
        Ok(report)
    }

    /// Inspect the current install without changing anything.
    pub async fn status(&self) -> Result<StatusReport> {
        let ctx = self.step_context();
        let mut steps = Vec::new();
        for step in self.plan() {
            let state = step.check(&ctx).await?;
            steps.push((step.describe(), state));
        }
        Ok(StatusReport {
            receipt: InstallReceipt::read(&self.layout.receipt).await?,
            steps,
        })
    }
}

/// Whether the receipt should claim the artifact of `step`.
///
/// A directory that already existed on the first install belongs to someone
/// else; later installs keep whatever the previous receipt claimed.
fn owns_artifact(step: &Step, outcome: &StepOutcome, previous: Option<&InstallReceipt>) -> bool {
    match (step, outcome) {
        (_, StepOutcome::Skipped(_)) => false,
        (Step::CreateDir { .. }, StepOutcome::Unchanged) => {
            previous.is_some_and(|p| p.artifacts.contains(&step.artifact()))
        }
        _ => true,
    }
}
