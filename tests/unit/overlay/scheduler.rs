use super::*;
use crate::catalog::game::HudScale;
use crate::region::anchor::Anchor;
use crate::region::model::{Region, RegionRect, VideoResolution};

fn game() -> Game {
    let base = VideoResolution::new(1920, 1080);
    let mut g = Game::new("racer", "Racer");
    g.hud_scale = HudScale {
        min: 0.5,
        max: 2.0,
        step: 0.5,
        value: 1.0,
    };
    g.push_resolution(
        base,
        vec![Region::new(
            base,
            "race",
            "minimap",
            Anchor::TopLeft,
            false,
            RegionRect::new(0.0, 0.0, 100.0, 100.0),
        )],
    );
    g
}

#[test]
fn first_pass_recomputes_then_reuses() {
    let mut s = RecomputeScheduler::new();
    let mut g = game();
    let info = Some(VideoInfo::new(3840, 2160));

    assert_eq!(s.observe(info, &mut g), Recompute::Recomputed);
    assert!(!g.reset_regions);
    assert_eq!(g.regions()[0].canvas_box, RegionRect::new(0.0, 0.0, 200.0, 200.0));

    assert_eq!(s.observe(info, &mut g), Recompute::Reused);
    assert_eq!(s.last_video_info(), info);
}

#[test]
fn any_dimension_change_marks_dirty() {
    let mut s = RecomputeScheduler::new();
    let mut g = game();
    let base = VideoInfo::new(1920, 1080);
    s.observe(Some(base), &mut g);

    let rescaled_output = VideoInfo {
        output_width: 1280,
        output_height: 720,
        ..base
    };
    assert_eq!(s.observe(Some(rescaled_output), &mut g), Recompute::Recomputed);
    assert_eq!(s.observe(Some(rescaled_output), &mut g), Recompute::Reused);
}

#[test]
fn hud_change_is_picked_up_through_reset_flag() {
    let mut s = RecomputeScheduler::new();
    let mut g = game();
    let info = Some(VideoInfo::new(1920, 1080));
    s.observe(info, &mut g);

    g.hud_scale.value = 2.0;
    g.reset_regions = true;
    assert_eq!(s.observe(info, &mut g), Recompute::Recomputed);
    assert_eq!(g.regions()[0].canvas_box.w, 200.0);
}

#[test]
fn missing_video_info_leaves_state_untouched() {
    let mut s = RecomputeScheduler::new();
    let mut g = game();
    assert_eq!(s.observe(None, &mut g), Recompute::Skipped);
    assert!(g.reset_regions);
    assert_eq!(s.last_video_info(), None);
    assert_eq!(g.regions()[0].canvas_box, RegionRect::default());
}

#[test]
fn disabled_game_is_skipped_but_canvas_tracked() {
    let mut s = RecomputeScheduler::new();
    let mut g = Game::placeholder();
    let info = Some(VideoInfo::new(1280, 720));
    assert_eq!(s.observe(info, &mut g), Recompute::Skipped);
    assert_eq!(s.last_video_info(), info);
}
