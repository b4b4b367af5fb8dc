use crate::{
    foundation::core::{Affine, VideoInfo},
    foundation::error::HudResult,
    region::model::{Region, RegionRect},
    scene::item::{ItemId, ItemTransform},
};

/// Outline style requested from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    /// A region box.
    Region,
    /// A tested item that hit nothing (only drawn when debugging sources).
    Source,
    /// An item overlapping at least one region.
    SourceCollides,
}

/// Draw contract for one render pass.
///
/// Ordering contract: `begin`, then every item outline in scene order, then region outlines, then
/// `end`. Nothing is drawn for a skipped pass.
pub trait DrawSink {
    /// Called once before any outline of the pass.
    fn begin(&mut self, info: VideoInfo) -> HudResult<()>;
    /// Outline a scene item's quad.
    fn draw_item(&mut self, item: ItemId, transform: Affine, highlight: Highlight) -> HudResult<()>;
    /// Outline a region's canvas box.
    fn draw_region(&mut self, region: &Region) -> HudResult<()>;
    /// Called once after the last outline.
    fn end(&mut self) -> HudResult<()>;
}

/// One recorded outline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCall {
    /// Scene item outline.
    Item {
        /// Host handle.
        id: ItemId,
        /// Unit square to canvas space.
        transform: ItemTransform,
        /// Outline style.
        highlight: Highlight,
    },
    /// Region outline.
    Region {
        /// Region label.
        region: String,
        /// Canvas-space box.
        #[serde(rename = "box")]
        canvas_box: RegionRect,
        /// Hits at draw time.
        hits: u32,
    },
}

/// Sink that records outlines, for tests and the CLI.
#[derive(Debug, Default)]
pub struct RecordingSink {
    info: Option<VideoInfo>,
    calls: Vec<DrawCall>,
    ended: bool,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas info passed to the last `begin`.
    pub fn video_info(&self) -> Option<VideoInfo> {
        self.info
    }

    /// Outlines of the last pass.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Whether the last pass reached `end`.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl DrawSink for RecordingSink {
    fn begin(&mut self, info: VideoInfo) -> HudResult<()> {
        self.info = Some(info);
        self.calls.clear();
        self.ended = false;
        Ok(())
    }

    fn draw_item(
        &mut self,
        item: ItemId,
        transform: Affine,
        highlight: Highlight,
    ) -> HudResult<()> {
        self.calls.push(DrawCall::Item {
            id: item,
            transform: ItemTransform::from_affine(transform),
            highlight,
        });
        Ok(())
    }

    fn draw_region(&mut self, region: &Region) -> HudResult<()> {
        self.calls.push(DrawCall::Region {
            region: region.region_name.clone(),
            canvas_box: region.canvas_box,
            hits: region.hits,
        });
        Ok(())
    }

    fn end(&mut self) -> HudResult<()> {
        self.ended = true;
        Ok(())
    }
}
