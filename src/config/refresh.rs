use std::time::SystemTime;

use crate::{
    catalog::manager::GameManager,
    config::deployment::{Deployment, DeploymentPaths, DocumentKind, read_verified},
    foundation::error::{HudError, HudResult},
};

/// What a [`ConfigRefresher::refresh`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Documents verified; the catalog file is unchanged since the last reload.
    Unchanged,
    /// A new catalog was published.
    Reloaded,
}

/// Re-reads the active deployment's documents and republishes the catalog when it changed.
#[derive(Clone, Debug)]
pub struct ConfigRefresher {
    paths: DeploymentPaths,
    regions_modified: Option<SystemTime>,
}

impl ConfigRefresher {
    /// Refresher over `paths`; the first refresh always reloads.
    pub fn new(paths: DeploymentPaths) -> Self {
        Self {
            paths,
            regions_modified: None,
        }
    }

    /// Document locations in use.
    pub fn paths(&self) -> &DeploymentPaths {
        &self.paths
    }

    /// Switch deployment; the next refresh reloads unconditionally.
    pub fn set_deployment(&mut self, deployment: Deployment) {
        if deployment != self.paths.deployment() {
            tracing::info!(from = %self.paths.deployment(), to = %deployment, "deployment changed");
            self.paths.set_deployment(deployment);
            self.regions_modified = None;
        }
    }

    /// Verify both documents, then reload the catalog if `regions.json` changed.
    ///
    /// Any verification or parse failure leaves the installed catalog untouched.
    #[tracing::instrument(skip(self, games), fields(deployment = %self.paths.deployment()))]
    pub fn refresh(&mut self, games: &GameManager) -> HudResult<RefreshOutcome> {
        let services_path = self.paths.document(DocumentKind::Services);
        read_verified(DocumentKind::Services, &services_path).inspect_err(|e| {
            tracing::error!(error = %e, "services document rejected");
        })?;

        let regions_path = self.paths.document(DocumentKind::Regions);
        let modified = std::fs::metadata(&regions_path)
            .and_then(|m| m.modified())
            .map_err(|e| {
                HudError::io(format!("stat '{}': {e}", regions_path.display()))
            })?;
        if self.regions_modified == Some(modified) {
            return Ok(RefreshOutcome::Unchanged);
        }

        let bytes = read_verified(DocumentKind::Regions, &regions_path).inspect_err(|e| {
            tracing::error!(error = %e, "regions document rejected");
        })?;
        let suffix = self.paths.deployment().name_suffix();
        games.refresh_from_reader(bytes.as_slice(), suffix.as_deref())?;
        self.regions_modified = Some(modified);
        Ok(RefreshOutcome::Reloaded)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/refresh.rs"]
mod tests;
