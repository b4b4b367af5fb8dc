use super::*;
use proptest::prelude::*;

const REF: VideoResolution = VideoResolution {
    width: 1920,
    height: 1080,
};

fn region(anchor: Anchor, rect: RegionRect) -> Region {
    Region::new(REF, "playing", "minimap", anchor, false, rect)
}

#[test]
fn parse_resolution_keys() {
    assert_eq!(
        VideoResolution::parse("1920x1080").unwrap(),
        VideoResolution::new(1920, 1080)
    );
    assert_eq!(VideoResolution::new(2560, 1440).to_string(), "2560x1440");
    assert!(VideoResolution::parse("1920").is_err());
    assert!(VideoResolution::parse("0x1080").is_err());
    assert!(VideoResolution::parse("wide x tall").is_err());
}

#[test]
fn resolution_ordering_is_width_then_height() {
    let mut v = vec![
        VideoResolution::new(2560, 1080),
        VideoResolution::new(1920, 1200),
        VideoResolution::new(1920, 1080),
    ];
    v.sort();
    assert_eq!(
        v,
        vec![
            VideoResolution::new(1920, 1080),
            VideoResolution::new(1920, 1200),
            VideoResolution::new(2560, 1080),
        ]
    );
}

#[test]
fn top_left_doubles_on_4k() {
    let mut r = region(Anchor::TopLeft, RegionRect::new(0.0, 0.0, 100.0, 100.0));
    r.align_box(VideoInfo::new(3840, 2160), 1.0);
    assert_eq!(r.canvas_box, RegionRect::new(0.0, 0.0, 200.0, 200.0));
}

#[test]
fn bottom_right_stays_flush_on_4k() {
    let mut r = region(
        Anchor::BottomRight,
        RegionRect::new(1820.0, 980.0, 100.0, 100.0),
    );
    r.align_box(VideoInfo::new(3840, 2160), 1.0);
    assert_eq!(r.canvas_box, RegionRect::new(3640.0, 1960.0, 200.0, 200.0));
}

#[test]
fn integer_scale_is_exact_for_start_anchor() {
    let rect = RegionRect::new(37.0, 412.0, 250.0, 90.0);
    for k in 1..=4u32 {
        let mut r = region(Anchor::TopLeft, rect);
        r.align_box(VideoInfo::new(1920 * k, 1080 * k), 1.0);
        let k = f64::from(k);
        assert_eq!(
            r.canvas_box,
            RegionRect::new(rect.x * k, rect.y * k, rect.w * k, rect.h * k)
        );
    }
}

#[test]
fn left_and_right_anchors_mirror_across_midline() {
    let canvas = VideoInfo::new(2560, 1080);
    let mut left = region(Anchor::TopLeft, RegionRect::new(100.0, 40.0, 50.0, 30.0));
    let mut right = region(
        Anchor::TopRight,
        RegionRect::new(1920.0 - 100.0 - 50.0, 40.0, 50.0, 30.0),
    );
    left.align_box(canvas, 1.0);
    right.align_box(canvas, 1.0);

    let w = f64::from(canvas.base_width);
    assert_eq!(right.canvas_box.x, w - (left.canvas_box.x + left.canvas_box.w));
    assert_eq!(right.canvas_box.y, left.canvas_box.y);
    assert_eq!(right.canvas_box.w, left.canvas_box.w);
    assert_eq!(right.canvas_box.h, left.canvas_box.h);
}

#[test]
fn hud_scale_lock_ignores_user_scale() {
    let rect = RegionRect::new(0.0, 0.0, 100.0, 100.0);
    let mut locked = Region::new(REF, "s", "chrome", Anchor::TopLeft, true, rect);
    let mut unlocked = Region::new(REF, "s", "hud", Anchor::TopLeft, false, rect);
    locked.align_box(VideoInfo::new(1920, 1080), 1.5);
    unlocked.align_box(VideoInfo::new(1920, 1080), 1.5);
    assert_eq!(locked.canvas_box.w, 100.0);
    assert_eq!(unlocked.canvas_box.w, 150.0);
}

#[test]
fn centered_region_stays_centered_on_ultrawide() {
    let mut r = region(Anchor::Center, RegionRect::new(910.0, 490.0, 100.0, 100.0));
    r.align_box(VideoInfo::new(3440, 1440), 1.0);
    let scale = 1440.0 / 1080.0;
    let cx = r.canvas_box.x + r.canvas_box.w * 0.5;
    let cy = r.canvas_box.y + r.canvas_box.h * 0.5;
    assert!((cx - 1720.0).abs() < 1e-9);
    assert!((cy - 720.0).abs() < 1e-9);
    assert!((r.canvas_box.w - 100.0 * scale).abs() < 1e-9);
}

#[test]
fn degenerate_reference_leaves_box_untouched() {
    let mut r = Region::new(
        VideoResolution::default(),
        "s",
        "r",
        Anchor::TopLeft,
        false,
        RegionRect::new(1.0, 1.0, 1.0, 1.0),
    );
    r.align_box(VideoInfo::new(1920, 1080), 1.0);
    assert_eq!(r.canvas_box, RegionRect::default());
}

proptest! {
    #[test]
    fn align_box_is_idempotent(
        anchor_idx in 0usize..15,
        x in 0.0f64..1900.0,
        y in 0.0f64..1060.0,
        w in 1.0f64..400.0,
        h in 1.0f64..400.0,
        cw in 320u32..7680,
        ch in 240u32..4320,
        hud in 0.5f64..2.0,
    ) {
        let mut r = region(Anchor::ALL[anchor_idx], RegionRect::new(x, y, w, h));
        let info = VideoInfo::new(cw, ch);
        r.align_box(info, hud);
        let first = r.canvas_box;
        r.align_box(info, hud);
        prop_assert_eq!(first, r.canvas_box);
    }
}
