use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize as _;
use serde_json::Value;

use crate::{
    catalog::game::{Game, HudScale, PLACEHOLDER_GAME_NAME},
    foundation::error::{HudError, HudResult},
    region::anchor::Anchor,
    region::model::{Region, RegionRect, VideoResolution},
};

/// One region entry as it appears in the catalog document.
#[derive(Debug, Clone, serde::Deserialize)]
struct RegionEntry {
    game_state: String,
    region: String,
    alignment: String,
    #[serde(default)]
    hud_scale_locked: bool,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Immutable, fully-built game catalog.
///
/// Always contains the placeholder game as its first entry.
#[derive(Clone, Debug)]
pub struct Catalog {
    names: Vec<String>,
    games: HashMap<String, Arc<Game>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::placeholder_only()
    }
}

impl Catalog {
    /// A catalog containing only the placeholder game.
    pub fn placeholder_only() -> Self {
        let placeholder = Game::placeholder();
        let mut games = HashMap::new();
        games.insert(placeholder.name.clone(), Arc::new(placeholder));
        Self {
            names: vec![PLACEHOLDER_GAME_NAME.to_string()],
            games,
        }
    }

    /// Parse a catalog document from a JSON reader.
    ///
    /// `name_suffix` is appended to every verbose game name (used for non-production deployments).
    pub fn from_reader<R: std::io::Read>(r: R, name_suffix: Option<&str>) -> HudResult<Self> {
        let doc: Value = serde_json::from_reader(r)
            .map_err(|e| HudError::serde(format!("parse catalog JSON: {e}")))?;
        Self::from_value(&doc, name_suffix)
    }

    /// Parse a catalog document from a JSON string.
    pub fn from_json_str(s: &str, name_suffix: Option<&str>) -> HudResult<Self> {
        let doc: Value = serde_json::from_str(s)
            .map_err(|e| HudError::serde(format!("parse catalog JSON: {e}")))?;
        Self::from_value(&doc, name_suffix)
    }

    /// Build a catalog from an already parsed document.
    ///
    /// Any malformed game, resolution or region aborts the whole build.
    pub fn from_value(doc: &Value, name_suffix: Option<&str>) -> HudResult<Self> {
        let names = doc
            .get("games")
            .and_then(Value::as_array)
            .ok_or_else(|| HudError::catalog("document is malformed, no games listed"))?;

        let mut out = Self::placeholder_only();

        for name in names {
            let name = name
                .as_str()
                .ok_or_else(|| HudError::catalog("game names must be strings"))?;
            if out.games.contains_key(name) {
                return Err(HudError::catalog(format!("game '{name}' listed twice")));
            }
            let game = parse_game(doc, name, name_suffix)?;
            out.names.push(name.to_string());
            out.games.insert(name.to_string(), Arc::new(game));
        }

        Ok(out)
    }

    /// Game names in display order (placeholder first).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Look up a game by name.
    pub fn get(&self, name: &str) -> Option<Arc<Game>> {
        self.games.get(name).cloned()
    }

    /// Number of games including the placeholder.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Return `true` when the catalog lists no games, not even the placeholder.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn parse_game(doc: &Value, name: &str, name_suffix: Option<&str>) -> HudResult<Game> {
    let obj = doc
        .get(name)
        .filter(|v| v.is_object())
        .ok_or_else(|| HudError::catalog(format!("no game object for '{name}'")))?;

    let resolutions = obj
        .get("resolutions")
        .and_then(Value::as_array)
        .ok_or_else(|| HudError::catalog(format!("no resolution array for '{name}'")))?;
    if resolutions.is_empty() {
        return Err(HudError::catalog(format!("'{name}' lists no resolutions")));
    }

    let mut name_verbose = obj
        .get("name_verbose")
        .and_then(Value::as_str)
        .ok_or_else(|| HudError::catalog(format!("no name_verbose for '{name}'")))?
        .to_string();
    if let Some(suffix) = name_suffix {
        name_verbose.push_str(suffix);
    }

    let mut game = Game::new(name, name_verbose);
    game.hud_scale = parse_hud_scale(obj.get("hud_scale"), name)?;

    for res in resolutions {
        let key = res.as_str().ok_or_else(|| {
            HudError::catalog(format!("resolution keys of '{name}' must be strings"))
        })?;
        let base = VideoResolution::parse(key)?;

        let entries = obj
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| HudError::catalog(format!("no regions array for '{name}' {key}")))?;

        let mut regions = Vec::with_capacity(entries.len());
        for entry in entries {
            regions.push(parse_region(entry, base, name, key)?);
        }
        game.push_resolution(base, regions);
    }

    Ok(game)
}

fn parse_hud_scale(v: Option<&Value>, name: &str) -> HudResult<HudScale> {
    let range = v
        .and_then(Value::as_array)
        .ok_or_else(|| HudError::catalog(format!("no hud_scale range for '{name}'")))?;
    let nums = range.iter().map(Value::as_f64).collect::<Option<Vec<_>>>();
    match nums.as_deref() {
        Some(&[min, max, step]) if min <= max && step > 0.0 => Ok(HudScale {
            min,
            max,
            step,
            ..HudScale::default()
        }),
        _ => Err(HudError::catalog(format!(
            "hud_scale of '{name}' must be [min, max, step] with min <= max and step > 0"
        ))),
    }
}

fn parse_region(entry: &Value, base: VideoResolution, name: &str, key: &str) -> HudResult<Region> {
    let e = RegionEntry::deserialize(entry)
        .map_err(|err| HudError::catalog(format!("region of '{name}' {key}: {err}")))?;
    let alignment = Anchor::from_name(&e.alignment)?;
    Ok(Region::new(
        base,
        e.game_state,
        e.region,
        alignment,
        e.hud_scale_locked,
        RegionRect::new(e.x, e.y, e.w, e.h),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/document.rs"]
mod tests;
