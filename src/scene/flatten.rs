use crate::{
    foundation::core::{Affine, Rect},
    scene::item::SceneItem,
};

/// A leaf scene item with its transforms resolved to canvas space.
#[derive(Clone, Copy, Debug)]
pub struct FlatItem<'a> {
    /// The host item.
    pub item: &'a SceneItem,
    /// Unit square to canvas space (box transform composed with every enclosing group).
    pub transform: Affine,
    /// Canvas-space bounds of the rotated item, flips normalized.
    pub bounds: Rect,
}

/// Flatten a scene into its visible leaf items in draw order.
///
/// Groups are never returned themselves; their draw transforms are accumulated into every
/// descendant. Hidden items (and everything below a hidden group) are skipped.
pub fn flatten_scene(items: &[SceneItem]) -> Vec<FlatItem<'_>> {
    let mut out = Vec::with_capacity(items.len());
    flatten_into(items, Affine::IDENTITY, &mut out);
    out
}

fn flatten_into<'a>(items: &'a [SceneItem], parent: Affine, out: &mut Vec<FlatItem<'a>>) {
    for item in items {
        if !item.visible {
            continue;
        }
        if let Some(children) = &item.children {
            flatten_into(children, parent * item.placement.draw_affine(), out);
            continue;
        }
        let transform = parent * item.box_affine();
        let bounds = if item.box_transform.is_some() {
            transform.transform_rect_bbox(Rect::new(0.0, 0.0, 1.0, 1.0))
        } else if parent == Affine::IDENTITY {
            item.placement.rotated_bounds()
        } else {
            parent.transform_rect_bbox(item.placement.rotated_bounds())
        };
        out.push(FlatItem {
            item,
            transform,
            bounds,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/flatten.rs"]
mod tests;
