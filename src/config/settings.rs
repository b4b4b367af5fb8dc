use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{
    config::deployment::{Deployment, DeploymentPaths, ServiceMatch},
    diagnostics::mailbox::SEND_DIAGNOSTICS_INTERVAL,
    foundation::error::{HudError, HudResult},
    overlay::validator::{DEFAULT_COVERAGE_THRESHOLD_PCT, ValidatorOpts},
};

/// Runtime settings, loaded from JSON. Every field is optional.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Deployment used until a streaming service says otherwise.
    pub deployment: Deployment,
    /// Root directory of the companion documents.
    pub config_root: PathBuf,
    /// Items covering at least this share of the canvas are not tested.
    pub coverage_threshold_pct: f64,
    /// Seconds between diagnostics windows.
    pub diagnostics_interval_secs: u64,
    /// Source types exempt from testing in addition to the built-in capture types.
    pub extra_main_video_sources: Vec<String>,
    /// Outline every region.
    pub draw_all_regions: bool,
    /// Outline every tested item.
    pub debug_sources: bool,
    /// Recognition of our streaming service.
    pub service: ServiceMatch,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            deployment: Deployment::default(),
            config_root: PathBuf::from("."),
            coverage_threshold_pct: DEFAULT_COVERAGE_THRESHOLD_PCT,
            diagnostics_interval_secs: SEND_DIAGNOSTICS_INTERVAL.as_secs(),
            extra_main_video_sources: Vec::new(),
            draw_all_regions: false,
            debug_sources: false,
            service: ServiceMatch::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HudResult<Self> {
        let s: Self = serde_json::from_reader(r)
            .map_err(|e| HudError::serde(format!("parse settings JSON: {e}")))?;
        s.validate()?;
        Ok(s)
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HudResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| HudError::io(format!("open settings JSON '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values the rest of the crate cannot work with.
    pub fn validate(&self) -> HudResult<()> {
        if !(0.0..=100.0).contains(&self.coverage_threshold_pct) {
            return Err(HudError::validation(format!(
                "coverage_threshold_pct must be within 0..=100, got {}",
                self.coverage_threshold_pct
            )));
        }
        if self.diagnostics_interval_secs == 0 {
            return Err(HudError::validation("diagnostics_interval_secs must be > 0"));
        }
        Ok(())
    }

    /// Diagnostics window length.
    pub fn diagnostics_interval(&self) -> Duration {
        Duration::from_secs(self.diagnostics_interval_secs)
    }

    /// Document locations for the configured deployment.
    pub fn paths(&self) -> DeploymentPaths {
        DeploymentPaths::new(self.config_root.clone(), self.deployment)
    }

    /// Overlay options derived from these settings.
    pub fn validator_opts(&self) -> ValidatorOpts {
        let mut opts = ValidatorOpts {
            coverage_threshold_pct: self.coverage_threshold_pct,
            draw_all_regions: self.draw_all_regions,
            debug_sources: self.debug_sources,
            ..ValidatorOpts::default()
        };
        opts.main_video_sources.extend(self.extra_main_video_sources.iter().cloned());
        opts
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
