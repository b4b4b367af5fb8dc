use serde::{Deserialize, Serialize};

use crate::foundation::error::{HudError, HudResult};

/// Periodic occlusion diagnostics event.
///
/// Serializes to
/// `{"event":{"pluginInfo":{"pluginVersion":..},"validator":{"missingValidator":..,"occludingSourceNames":[..]}}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// Event body.
    pub event: DiagnosticsEvent,
}

/// Body of a [`DiagnosticsReport`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsEvent {
    /// Reporter identification.
    pub plugin_info: PluginInfo,
    /// Occlusion findings.
    pub validator: ValidatorDiagnostics,
}

/// Reporter identification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    /// Crate version of the reporter.
    pub plugin_version: String,
}

/// Occlusion findings of one collection window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorDiagnostics {
    /// The live scene contains no overlay instance.
    pub missing_validator: bool,
    /// Names of sources that overlapped at least one region.
    pub occluding_source_names: Vec<String>,
}

impl DiagnosticsReport {
    /// Build a report stamped with this crate's version.
    pub fn new(missing_validator: bool, occluding_source_names: Vec<String>) -> Self {
        Self {
            event: DiagnosticsEvent {
                plugin_info: PluginInfo {
                    plugin_version: env!("CARGO_PKG_VERSION").to_string(),
                },
                validator: ValidatorDiagnostics {
                    missing_validator,
                    occluding_source_names,
                },
            },
        }
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> HudResult<String> {
        serde_json::to_string(self)
            .map_err(|e| HudError::serde(format!("serialize diagnostics report: {e}")))
    }
}
