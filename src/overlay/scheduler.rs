use crate::{catalog::game::Game, foundation::core::VideoInfo};

/// Outcome of [`RecomputeScheduler::observe`] for one render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recompute {
    /// No canvas info, or no active game: nothing to test this pass.
    Skipped,
    /// Boxes from an earlier pass are still valid.
    Reused,
    /// Every region box was realigned this pass.
    Recomputed,
}

/// Tracks canvas dimensions across passes and realigns region boxes only when needed.
///
/// A game is dirty after a canvas change (any of the four [`VideoInfo`] dimensions), a HUD-scale
/// change or a switch to it; the first pass that sees it dirty realigns every region and clears
/// [`Game::reset_regions`].
#[derive(Clone, Debug, Default)]
pub struct RecomputeScheduler {
    last: Option<VideoInfo>,
}

impl RecomputeScheduler {
    /// Scheduler that has not observed any canvas yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas info from the most recent pass that had one.
    pub fn last_video_info(&self) -> Option<VideoInfo> {
        self.last
    }

    /// Sample the canvas for this pass and realign `game` if it is dirty.
    pub fn observe(&mut self, info: Option<VideoInfo>, game: &mut Game) -> Recompute {
        let Some(info) = info else {
            return Recompute::Skipped;
        };

        if game.disabled {
            self.last = Some(info);
            return Recompute::Skipped;
        }

        if self.last.is_none_or(|last| last.differs(info)) {
            game.reset_regions = true;
        }
        self.last = Some(info);

        if !game.reset_regions {
            return Recompute::Reused;
        }
        game.reset_regions = false;

        let hud_scale = game.hud_scale.value;
        tracing::debug!(
            game = %game.name,
            base_width = info.base_width,
            base_height = info.base_height,
            output_width = info.output_width,
            output_height = info.output_height,
            hud_scale,
            "realigning region boxes"
        );
        for region in game.regions_mut() {
            region.align_box(info, hud_scale);
        }
        Recompute::Recomputed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/scheduler.rs"]
mod tests;
