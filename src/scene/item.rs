use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Affine, Point, Rect, Vec2},
    foundation::error::{HudError, HudResult},
    geometry::coverage::rotated_bounds,
};

/// Non-owning handle to a host scene item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Affine map from the unit square `[0,1]²` onto an item's on-canvas quad.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemTransform {
    /// Image of `(0, 0)`.
    pub origin: Point,
    /// Image of the unit x vector.
    pub x_axis: Vec2,
    /// Image of the unit y vector.
    pub y_axis: Vec2,
}

impl ItemTransform {
    /// Build from the `kurbo` coefficient layout.
    pub fn from_affine(a: Affine) -> Self {
        let [xx, xy, yx, yy, tx, ty] = a.as_coeffs();
        Self {
            origin: Point::new(tx, ty),
            x_axis: Vec2::new(xx, xy),
            y_axis: Vec2::new(yx, yy),
        }
    }

    /// Convert into a `kurbo` affine.
    pub fn to_affine(self) -> Affine {
        Affine::new([
            self.x_axis.x,
            self.x_axis.y,
            self.y_axis.x,
            self.y_axis.y,
            self.origin.x,
            self.origin.y,
        ])
    }
}

/// Pixels cut from each edge of the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    /// Left edge.
    #[serde(default)]
    pub left: u32,
    /// Top edge.
    #[serde(default)]
    pub top: u32,
    /// Right edge.
    #[serde(default)]
    pub right: u32,
    /// Bottom edge.
    #[serde(default)]
    pub bottom: u32,
}

/// Position, rotation and sizing of an item inside its parent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemPlacement {
    /// Position of the item's origin in parent space.
    #[serde(default)]
    pub pos: Point,
    /// Clockwise rotation in degrees (y axis points down).
    #[serde(default)]
    pub rotation_deg: f64,
    /// Per-axis scale; negative values flip.
    #[serde(default = "default_scale")]
    pub scale: Vec2,
    /// Explicit bounding-box size; overrides source size and scale.
    #[serde(default)]
    pub bounds: Option<Vec2>,
    /// Source cropping.
    #[serde(default)]
    pub crop: Crop,
    /// Source width in pixels.
    #[serde(default)]
    pub source_width: u32,
    /// Source height in pixels.
    #[serde(default)]
    pub source_height: u32,
}

fn default_scale() -> Vec2 {
    Vec2::new(1.0, 1.0)
}

impl Default for ItemPlacement {
    fn default() -> Self {
        Self {
            pos: Point::ORIGIN,
            rotation_deg: 0.0,
            scale: default_scale(),
            bounds: None,
            crop: Crop::default(),
            source_width: 0,
            source_height: 0,
        }
    }
}

impl ItemPlacement {
    /// Rendered size before rotation. Negative components mean the item is flipped.
    pub fn visual_size(&self) -> Vec2 {
        if let Some(b) = self.bounds {
            return b;
        }
        let w = self
            .source_width
            .saturating_sub(self.crop.left)
            .saturating_sub(self.crop.right);
        let h = self
            .source_height
            .saturating_sub(self.crop.top)
            .saturating_sub(self.crop.bottom);
        Vec2::new(f64::from(w) * self.scale.x, f64::from(h) * self.scale.y)
    }

    /// Unit square to parent space: translate, rotate, then stretch to
    /// [`ItemPlacement::visual_size`].
    pub fn box_affine(&self) -> Affine {
        let size = self.visual_size();
        Affine::translate(self.pos.to_vec2())
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale_non_uniform(size.x, size.y)
    }

    /// Child space to parent space, used when this placement belongs to a group.
    pub fn draw_affine(&self) -> Affine {
        Affine::translate(self.pos.to_vec2())
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Axis-aligned bounds of the rotated item in parent space, flips normalized.
    pub fn rotated_bounds(&self) -> Rect {
        rotated_bounds(self.pos, self.visual_size(), self.rotation_deg)
    }
}

/// One entry of a host scene, as handed to the render pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    /// Host handle.
    pub id: ItemId,
    /// Source display name.
    pub name: String,
    /// Unversioned source type identifier (e.g. `game_capture`).
    pub source_type: String,
    /// Hidden items and their children are ignored.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Whether the source produces video output.
    #[serde(default = "default_true")]
    pub has_video: bool,
    /// Placement inside the parent (scene or group).
    #[serde(default)]
    pub placement: ItemPlacement,
    /// Host-provided box transform; derived from [`SceneItem::placement`] when absent.
    #[serde(default)]
    pub box_transform: Option<ItemTransform>,
    /// Present for groups.
    #[serde(default)]
    pub children: Option<Vec<SceneItem>>,
}

fn default_true() -> bool {
    true
}

impl SceneItem {
    /// Plain visible video item with default placement.
    pub fn new(id: u64, name: impl Into<String>, source_type: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            source_type: source_type.into(),
            visible: true,
            has_video: true,
            placement: ItemPlacement::default(),
            box_transform: None,
            children: None,
        }
    }

    /// Turn this item into a group holding `children`.
    pub fn with_children(mut self, children: Vec<SceneItem>) -> Self {
        self.children = Some(children);
        self
    }

    /// Return `true` for group items.
    pub fn is_group(&self) -> bool {
        self.children.is_some()
    }

    /// Unit square to parent space.
    pub fn box_affine(&self) -> Affine {
        match self.box_transform {
            Some(t) => t.to_affine(),
            None => self.placement.box_affine(),
        }
    }
}

/// A host scene snapshot loaded from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Top-level items in draw order.
    pub items: Vec<SceneItem>,
}

impl Scene {
    /// Parse a scene snapshot from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HudResult<Self> {
        serde_json::from_reader(r).map_err(|e| HudError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene snapshot from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HudResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| HudError::io(format!("open scene JSON '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/item.rs"]
mod tests;
