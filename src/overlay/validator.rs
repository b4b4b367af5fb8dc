use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::{
    catalog::game::{Game, PLACEHOLDER_GAME_NAME},
    catalog::manager::GameManager,
    diagnostics::mailbox::{Diagnostics, DiagnosticsKind, OVERLAY_SOURCE_TYPE},
    foundation::core::VideoInfo,
    foundation::error::HudResult,
    geometry::coverage::covers_canvas,
    geometry::occlusion::item_intersects_box,
    overlay::scheduler::{Recompute, RecomputeScheduler},
    overlay::sink::{DrawSink, Highlight},
    region::model::RegionRect,
    scene::flatten::flatten_scene,
    scene::item::{ItemId, SceneItem},
};

/// Source types of the user's primary capture; never treated as occluders.
pub const DEFAULT_MAIN_VIDEO_SOURCES: [&str; 8] = [
    "monitor_capture",
    "game_capture",
    "display_capture",
    "window_capture",
    "pipewire-desktop-capture-source",
    "pipewire-window-capture-source",
    "xcomposite_input",
    "xshm_input",
];

/// Default share of the canvas above which an item counts as a background capture.
pub const DEFAULT_COVERAGE_THRESHOLD_PCT: f64 = 98.0;

/// Options for a [`Validator`].
#[derive(Clone, Debug)]
pub struct ValidatorOpts {
    /// Items covering at least this percentage of the canvas are not tested.
    pub coverage_threshold_pct: f64,
    /// Outline every region, not only the ones with hits.
    pub draw_all_regions: bool,
    /// Outline every tested item, not only the ones with hits.
    pub debug_sources: bool,
    /// Source types exempt from testing.
    pub main_video_sources: BTreeSet<String>,
}

impl Default for ValidatorOpts {
    fn default() -> Self {
        let mut main_video_sources = DEFAULT_MAIN_VIDEO_SOURCES
            .iter()
            .map(|s| s.to_string())
            .collect::<BTreeSet<_>>();
        main_video_sources.insert(OVERLAY_SOURCE_TYPE.to_string());
        Self {
            coverage_threshold_pct: DEFAULT_COVERAGE_THRESHOLD_PCT,
            draw_all_regions: false,
            debug_sources: false,
            main_video_sources,
        }
    }
}

/// Game and effective HUD scale after [`Validator::select_game`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Selection {
    /// Name of the game now in use.
    pub game: String,
    /// HUD scale now in use.
    pub hud_scale: f64,
}

/// Per-region outcome of one pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RegionReport {
    /// Game state label.
    pub game_state: String,
    /// Region label.
    pub region: String,
    /// Canvas-space box tested this pass.
    #[serde(rename = "box")]
    pub canvas_box: RegionRect,
    /// Items that overlapped the box.
    pub hits: u32,
}

/// Outcome of one render pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Canvas the pass ran against.
    pub video_info: VideoInfo,
    /// Region boxes were realigned this pass.
    pub recomputed: bool,
    /// Regions of the active game in catalog order.
    pub regions: Vec<RegionReport>,
    /// Items that overlapped at least one region, in scene order.
    pub hit_items: Vec<ItemId>,
    /// Names handed to diagnostics, when a window requested them.
    pub collected_names: Option<Vec<String>>,
}

impl FrameReport {
    /// Sum of hits over all regions.
    pub fn total_hits(&self) -> u32 {
        self.regions.iter().map(|r| r.hits).sum()
    }
}

/// One overlay instance: owns a working copy of its game and runs the per-frame pass.
///
/// Instances share the [`GameManager`] and [`Diagnostics`]; the acquisition held by an instance is
/// released when it is dropped.
#[derive(Debug)]
pub struct Validator {
    id: String,
    games: Arc<GameManager>,
    diagnostics: Arc<Diagnostics>,
    opts: ValidatorOpts,
    game: Game,
    remembered_hud: HashMap<String, f64>,
    scheduler: RecomputeScheduler,
}

impl Validator {
    /// Create an instance identified by `id`, starting on the placeholder game.
    pub fn new(
        id: impl Into<String>,
        games: Arc<GameManager>,
        diagnostics: Arc<Diagnostics>,
        opts: ValidatorOpts,
    ) -> Self {
        Self {
            id: id.into(),
            games,
            diagnostics,
            opts,
            game: Game::placeholder(),
            remembered_hud: HashMap::new(),
            scheduler: RecomputeScheduler::new(),
        }
    }

    /// Instance identifier used for acquisition.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Working copy of the game in use.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Current options.
    pub fn opts(&self) -> &ValidatorOpts {
        &self.opts
    }

    /// Replace the options.
    pub fn set_opts(&mut self, opts: ValidatorOpts) {
        self.opts = opts;
    }

    /// `(name, verbose name)` of every game not held by another instance, in catalog order.
    pub fn available_games(&self) -> Vec<(String, String)> {
        let catalog = self.games.snapshot();
        catalog
            .names()
            .iter()
            .filter_map(|name| catalog.get(name))
            .filter(|g| !self.games.is_game_acquired(g, &self.id))
            .map(|g| (g.name.clone(), g.name_verbose.clone()))
            .collect()
    }

    /// Switch to `requested` (or keep it) and apply `hud_scale`.
    ///
    /// A game held by another instance is not taken over: the instance keeps its previous game,
    /// or falls back to the placeholder when that one is held elsewhere too.
    #[tracing::instrument(skip(self), fields(instance = %self.id))]
    pub fn select_game(&mut self, requested: &str, hud_scale: f64) -> Selection {
        let mut target = requested;
        if self.games.is_name_acquired(requested, &self.id) {
            let previous = self.game.name.as_str();
            target = if previous != PLACEHOLDER_GAME_NAME
                && !self.games.is_name_acquired(previous, &self.id)
            {
                previous
            } else {
                PLACEHOLDER_GAME_NAME
            };
            tracing::info!(requested, fallback = target, "game is in use by another instance");
        }

        if target != self.game.name {
            let target = target.to_string();
            self.switch_to(&target, hud_scale);
        } else {
            self.set_hud_scale(hud_scale);
        }

        Selection {
            game: self.game.name.clone(),
            hud_scale: self.game.hud_scale.value,
        }
    }

    fn switch_to(&mut self, name: &str, hud_scale: f64) {
        tracing::info!(from = %self.game.name, to = name, "switching game");
        self.remembered_hud
            .insert(self.game.name.clone(), self.game.hud_scale.value);
        self.games.release_game(&self.game, &self.id);

        let mut next = match self.games.get_game(name) {
            Some(g) => Game::clone(&g),
            None => {
                tracing::warn!(game = name, "unknown game, using placeholder");
                Game::placeholder()
            }
        };
        if next.is_acquirable() && !self.games.acquire_game(&next, &self.id) {
            tracing::info!(game = name, "lost acquisition race, using placeholder");
            next = Game::placeholder();
        }

        next.hud_scale.value = self
            .remembered_hud
            .get(&next.name)
            .copied()
            .unwrap_or(hud_scale);
        next.hud_scale.value = next.hud_scale.clamp_value();
        next.reset_regions = true;
        self.game = next;
    }

    /// Apply a HUD scale to the game in use; a change marks its boxes dirty.
    pub fn set_hud_scale(&mut self, hud_scale: f64) -> f64 {
        if self.game.hud_scale.value != hud_scale {
            self.game.hud_scale.value = hud_scale;
            self.game.reset_regions = true;
        }
        self.game.hud_scale.value
    }

    /// Re-read the game in use from the latest catalog snapshot, keeping the HUD scale.
    ///
    /// Falls back to the placeholder when the game left the catalog.
    pub fn reload_game(&mut self) {
        let hud_scale = self.game.hud_scale.value;
        match self.games.get_game(&self.game.name) {
            Some(g) if !self.game.disabled => {
                let mut next = Game::clone(&g);
                next.hud_scale.value = hud_scale;
                next.hud_scale.value = next.hud_scale.clamp_value();
                next.reset_regions = true;
                self.game = next;
            }
            Some(_) => {}
            None => {
                tracing::warn!(game = %self.game.name, "game left the catalog, using placeholder");
                self.games.release_game(&self.game, &self.id);
                self.game = Game::placeholder();
            }
        }
    }

    /// Run one pass: realign if dirty, test every eligible item against every region, draw.
    ///
    /// Returns `Ok(None)` without drawing when `info` is unavailable or no game is active.
    pub fn render(
        &mut self,
        info: Option<VideoInfo>,
        items: &[SceneItem],
        sink: &mut dyn DrawSink,
    ) -> HudResult<Option<FrameReport>> {
        let collect = self.diagnostics.needs(DiagnosticsKind::HitSourceNames);

        let recompute = self.scheduler.observe(info, &mut self.game);
        let Some(info) = info else {
            return Ok(None);
        };
        if recompute == Recompute::Skipped {
            return Ok(None);
        }

        let pass = self.run_pass(info, recompute, collect, items, sink);
        // Hits only live for one traversal, drawn or not.
        for region in self.game.regions_mut() {
            region.hits = 0;
        }
        pass.map(Some)
    }

    fn run_pass(
        &mut self,
        info: VideoInfo,
        recompute: Recompute,
        collect: bool,
        items: &[SceneItem],
        sink: &mut dyn DrawSink,
    ) -> HudResult<FrameReport> {
        let canvas = info.base_rect();
        let mut hit_items = Vec::new();
        let mut names = Vec::new();

        sink.begin(info)?;

        for flat in flatten_scene(items) {
            let item = flat.item;
            if !item.has_video
                || self.opts.main_video_sources.contains(&item.source_type)
                || covers_canvas(flat.bounds, canvas, self.opts.coverage_threshold_pct)
            {
                continue;
            }

            let mut hits = 0u32;
            for region in self.game.regions_mut() {
                if item_intersects_box(flat.transform, region.canvas_box) {
                    hits += 1;
                    region.hits += 1;
                }
            }

            if hits > 0 {
                hit_items.push(item.id);
                if collect {
                    names.push(item.name.clone());
                }
            } else if !self.opts.debug_sources {
                continue;
            }

            let highlight = if hits > 0 {
                Highlight::SourceCollides
            } else {
                Highlight::Source
            };
            sink.draw_item(item.id, flat.transform, highlight)?;
        }

        let collected_names = collect.then(|| {
            self.diagnostics.push_hit_source_names(names.clone());
            names
        });

        let mut regions = Vec::with_capacity(self.game.regions().len());
        for region in self.game.regions_mut() {
            regions.push(RegionReport {
                game_state: region.game_state.clone(),
                region: region.region_name.clone(),
                canvas_box: region.canvas_box,
                hits: region.hits,
            });
            if self.opts.draw_all_regions || region.hits > 0 {
                sink.draw_region(region)?;
            }
        }

        sink.end()?;

        Ok(FrameReport {
            video_info: info,
            recomputed: recompute == Recompute::Recomputed,
            regions,
            hit_items,
            collected_names,
        })
    }
}

impl Drop for Validator {
    fn drop(&mut self) {
        self.games.release_game(&self.game, &self.id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/validator.rs"]
mod tests;
