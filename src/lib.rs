//! HudGuard keeps streamed overlays off a game's HUD.
//!
//! A catalog lists, per game and reference resolution, the screen regions where the game draws its
//! HUD. Each overlay instance selects a game, aligns those regions onto the live canvas and, every
//! frame, tests the visible scene items against them:
//!
//! - Load a [`Catalog`] and share it through a [`GameManager`]
//! - Create a [`Validator`] per overlay instance and [`Validator::select_game`]
//! - Call [`Validator::render`] with the current [`VideoInfo`] and scene, drawing into a
//!   [`DrawSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod diagnostics;
pub(crate) mod geometry;
pub(crate) mod overlay;
pub(crate) mod region;
pub(crate) mod scene;

pub use crate::foundation::core::{Affine, GEOM_EPSILON, Point, Rect, Vec2, VideoInfo, close_f64};
pub use crate::foundation::error::{HudError, HudResult};

pub use crate::catalog::document::Catalog;
pub use crate::catalog::game::{Game, HudScale, PLACEHOLDER_GAME_NAME};
pub use crate::catalog::manager::GameManager;
pub use crate::config::deployment::{
    Deployment, DeploymentPaths, DocumentKind, ServiceMatch, ServiceProbe, read_verified,
    verify_document,
};
pub use crate::config::refresh::{ConfigRefresher, RefreshOutcome};
pub use crate::config::settings::Settings;
pub use crate::diagnostics::mailbox::{
    Diagnostics, DiagnosticsKind, OVERLAY_SOURCE_TYPE, SEND_DIAGNOSTICS_INTERVAL,
};
pub use crate::diagnostics::report::{
    DiagnosticsEvent, DiagnosticsReport, PluginInfo, ValidatorDiagnostics,
};
pub use crate::geometry::coverage::{canvas_coverage_pct, covers_canvas, rotated_bounds};
pub use crate::geometry::occlusion::{
    ItemQuad, counter_clockwise, item_intersects_box, segments_cross,
};
pub use crate::overlay::scheduler::{Recompute, RecomputeScheduler};
pub use crate::overlay::sink::{DrawCall, DrawSink, Highlight, RecordingSink};
pub use crate::overlay::validator::{
    DEFAULT_COVERAGE_THRESHOLD_PCT, DEFAULT_MAIN_VIDEO_SOURCES, FrameReport, RegionReport,
    Selection, Validator, ValidatorOpts,
};
pub use crate::region::anchor::{AlignAxis, Anchor, Pin, align_1d};
pub use crate::region::box_format::{BoxFormat, BoxTuple, convert_box};
pub use crate::region::model::{Region, RegionRect, VideoResolution};
pub use crate::scene::flatten::{FlatItem, flatten_scene};
pub use crate::scene::item::{Crop, ItemId, ItemPlacement, ItemTransform, Scene, SceneItem};
