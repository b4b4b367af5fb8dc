use std::collections::BTreeMap;

use crate::region::model::{Region, VideoResolution};

/// Name of the always-present "no game selected" entry.
pub const PLACEHOLDER_GAME_NAME: &str = "no_game_selected";

/// In-game HUD scale range and the current user value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HudScale {
    /// Smallest selectable value.
    pub min: f64,
    /// Largest selectable value.
    pub max: f64,
    /// Slider step.
    pub step: f64,
    /// Current value.
    pub value: f64,
}

impl Default for HudScale {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 1.0,
            step: 0.25,
            value: 1.0,
        }
    }
}

impl HudScale {
    /// Clamp [`HudScale::value`] into `[min, max]` and snap it to the nearest `step` multiple.
    pub fn clamp_value(&self) -> f64 {
        let v = self.value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return v;
        }
        let rem = v % self.step;
        if rem >= self.step / 2.0 {
            v + (self.step - rem)
        } else {
            v - rem
        }
    }

    /// Games without an adjustable HUD report `min == max`.
    pub fn is_adjustable(&self) -> bool {
        self.min != self.max
    }
}

/// One game's region catalog and per-use state.
///
/// Catalog snapshots hold pristine copies behind `Arc`; an overlay instance works on its own clone,
/// so `reset_regions`, [`HudScale::value`] and the region boxes are only ever mutated by that
/// instance on its render thread.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Game {
    /// Catalog key.
    pub name: String,
    /// Display name.
    pub name_verbose: String,
    /// Reference resolutions in catalog order.
    pub resolutions: Vec<VideoResolution>,
    /// Regions per reference resolution.
    pub regions_by_resolution: BTreeMap<VideoResolution, Vec<Region>>,
    /// HUD scale range and value.
    pub hud_scale: HudScale,
    /// Resolution whose regions are active (first catalog resolution).
    pub current_resolution: VideoResolution,
    /// Region boxes must be recomputed before the next occlusion pass.
    pub reset_regions: bool,
    /// Set only for the placeholder entry.
    pub disabled: bool,
}

impl Game {
    /// Create an enabled game with no resolutions yet.
    pub fn new(name: impl Into<String>, name_verbose: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_verbose: name_verbose.into(),
            resolutions: Vec::new(),
            regions_by_resolution: BTreeMap::new(),
            hud_scale: HudScale::default(),
            current_resolution: VideoResolution::default(),
            reset_regions: true,
            disabled: false,
        }
    }

    /// The disabled "no game selected" entry with a single empty region list.
    pub fn placeholder() -> Self {
        let mut g = Self::new(PLACEHOLDER_GAME_NAME, "No game selected");
        g.disabled = true;
        g.push_resolution(VideoResolution::default(), Vec::new());
        g
    }

    /// Append a reference resolution and its regions.
    ///
    /// The first resolution pushed becomes [`Game::current_resolution`].
    pub fn push_resolution(&mut self, res: VideoResolution, regions: Vec<Region>) {
        if self.resolutions.is_empty() {
            self.current_resolution = res;
        }
        if !self.resolutions.contains(&res) {
            self.resolutions.push(res);
        }
        self.regions_by_resolution.insert(res, regions);
    }

    /// Regions of the current resolution.
    pub fn regions(&self) -> &[Region] {
        self.regions_by_resolution
            .get(&self.current_resolution)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable regions of the current resolution.
    pub fn regions_mut(&mut self) -> &mut [Region] {
        self.regions_by_resolution
            .get_mut(&self.current_resolution)
            .map(Vec::as_mut_slice)
            .unwrap_or(&mut [])
    }

    /// Return `true` when this game can be acquired by an overlay instance.
    pub fn is_acquirable(&self) -> bool {
        !self.disabled && !self.name.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/game.rs"]
mod tests;
