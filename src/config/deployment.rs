use std::path::{Path, PathBuf};

use crate::foundation::error::{HudError, HudResult};

/// Backend environment the companion documents come from.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    /// Production.
    #[default]
    Prd,
    /// Staging.
    Stg,
    /// Development.
    Dev,
}

impl Deployment {
    /// Every deployment.
    pub const ALL: [Deployment; 3] = [Deployment::Dev, Deployment::Stg, Deployment::Prd];

    /// Short name used in paths and display suffixes.
    pub fn as_str(self) -> &'static str {
        match self {
            Deployment::Prd => "prd",
            Deployment::Stg => "stg",
            Deployment::Dev => "dev",
        }
    }

    /// Parse a short name.
    pub fn from_name(name: &str) -> HudResult<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == name)
            .ok_or_else(|| HudError::validation(format!("unknown deployment '{name}'")))
    }

    /// Return `true` for production.
    pub fn is_production(self) -> bool {
        self == Deployment::Prd
    }

    /// Suffix appended to verbose game names, `None` in production.
    pub fn name_suffix(self) -> Option<String> {
        (!self.is_production()).then(|| format!(" ({})", self.as_str()))
    }

    /// Derive the deployment from a streaming server URL.
    pub fn from_url(url: &str) -> Self {
        if url.contains(".dev.") {
            Deployment::Dev
        } else if url.contains(".stg.") {
            Deployment::Stg
        } else {
            Deployment::Prd
        }
    }
}

impl std::fmt::Display for Deployment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Deployment {
    type Err = HudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// How the streaming service in use is recognised as ours.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ServiceMatch {
    /// Server URLs containing this are ours.
    pub host_suffix: String,
    /// Service names starting with this are ours.
    pub name_prefix: String,
}

impl Default for ServiceMatch {
    fn default() -> Self {
        Self {
            host_suffix: ".hudguard.net".to_string(),
            name_prefix: "HudGuard".to_string(),
        }
    }
}

/// Result of inspecting the active streaming service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceProbe {
    /// The service is ours.
    pub selected: bool,
    /// Deployment derived from the URL; `None` when the service is not ours.
    pub deployment: Option<Deployment>,
}

impl ServiceMatch {
    /// Inspect the active service's display name and server URL.
    pub fn probe(&self, service_name: &str, url: &str) -> ServiceProbe {
        let selected =
            url.contains(&self.host_suffix) || service_name.starts_with(&self.name_prefix);
        ServiceProbe {
            selected,
            deployment: selected.then(|| Deployment::from_url(url)),
        }
    }
}

/// Companion document kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `services.json`: streaming service definitions.
    Services,
    /// `regions.json`: the game catalog.
    Regions,
}

impl DocumentKind {
    /// File name inside a deployment directory.
    pub fn file_name(self) -> &'static str {
        match self {
            DocumentKind::Services => "services.json",
            DocumentKind::Regions => "regions.json",
        }
    }

    /// Top-level array a valid document must carry.
    pub fn required_array(self) -> &'static str {
        match self {
            DocumentKind::Services => "services",
            DocumentKind::Regions => "games",
        }
    }

    /// Parse `services` / `regions`.
    pub fn from_name(name: &str) -> HudResult<Self> {
        match name {
            "services" => Ok(DocumentKind::Services),
            "regions" => Ok(DocumentKind::Regions),
            other => Err(HudError::validation(format!(
                "unknown document kind '{other}' (expected services or regions)"
            ))),
        }
    }
}

/// Basic structural check of a downloaded document.
pub fn verify_document(kind: DocumentKind, bytes: &[u8]) -> HudResult<()> {
    let doc: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| HudError::serde(format!("parse {}: {e}", kind.file_name())))?;
    let key = kind.required_array();
    if doc.get(key).is_some_and(serde_json::Value::is_array) {
        Ok(())
    } else {
        Err(HudError::catalog(format!(
            "{} has no '{key}' array",
            kind.file_name()
        )))
    }
}

/// Read and verify a document on disk, returning its bytes.
pub fn read_verified(kind: DocumentKind, path: &Path) -> HudResult<Vec<u8>> {
    let bytes = std::fs::read(path)
        .map_err(|e| HudError::io(format!("read '{}': {e}", path.display())))?;
    verify_document(kind, &bytes)?;
    Ok(bytes)
}

/// Where each deployment keeps its documents.
///
/// Production documents live directly under the root; other deployments get a subdirectory named
/// after them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentPaths {
    root: PathBuf,
    deployment: Deployment,
}

impl DeploymentPaths {
    /// Paths for `deployment` under `root`.
    pub fn new(root: impl Into<PathBuf>, deployment: Deployment) -> Self {
        Self {
            root: root.into(),
            deployment,
        }
    }

    /// Active deployment.
    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// Switch deployment, keeping the root.
    pub fn set_deployment(&mut self, deployment: Deployment) {
        self.deployment = deployment;
    }

    /// Directory of the active deployment.
    pub fn dir(&self) -> PathBuf {
        Self::dir_for(&self.root, self.deployment)
    }

    /// Directory of `deployment` under `root`.
    pub fn dir_for(root: &Path, deployment: Deployment) -> PathBuf {
        if deployment.is_production() {
            root.to_path_buf()
        } else {
            root.join(deployment.as_str())
        }
    }

    /// Path of `kind` for the active deployment.
    pub fn document(&self, kind: DocumentKind) -> PathBuf {
        self.dir().join(kind.file_name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/deployment.rs"]
mod tests;
