use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::{
    catalog::document::Catalog,
    catalog::game::Game,
    foundation::error::{HudError, HudResult},
};

/// Registry of games plus the per-instance acquisition table.
///
/// The catalog is an immutable [`Catalog`] snapshot replaced wholesale on refresh; readers clone
/// the `Arc` and never observe a partially built catalog. Acquisitions churn far more often than
/// the catalog, so they sit behind their own lock.
#[derive(Debug)]
pub struct GameManager {
    catalog: RwLock<Arc<Catalog>>,
    acquired: Mutex<HashMap<String, String>>,
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameManager {
    /// Create a manager whose catalog holds only the placeholder game.
    pub fn new() -> Self {
        Self::with_catalog(Catalog::placeholder_only())
    }

    /// Create a manager around an already built catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(Arc::new(catalog)),
            acquired: Mutex::new(HashMap::new()),
        }
    }

    /// Current catalog snapshot.
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Game names in display order (placeholder first).
    pub fn get_games(&self) -> Vec<String> {
        self.snapshot().names().to_vec()
    }

    /// Look up a game in the current snapshot.
    pub fn get_game(&self, name: &str) -> Option<Arc<Game>> {
        self.snapshot().get(name)
    }

    /// Atomically replace the catalog.
    pub fn publish(&self, catalog: Catalog) {
        let count = catalog.len();
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
        tracing::info!(games = count, "published game catalog");
    }

    /// Parse a catalog document and publish it.
    ///
    /// On failure the previous catalog stays installed and the error is returned.
    #[tracing::instrument(skip(self, r))]
    pub fn refresh_from_reader<R: std::io::Read>(
        &self,
        r: R,
        name_suffix: Option<&str>,
    ) -> HudResult<()> {
        match Catalog::from_reader(r, name_suffix) {
            Ok(catalog) => {
                self.publish(catalog);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "catalog refresh failed, keeping previous catalog");
                Err(e)
            }
        }
    }

    /// Parse a catalog document string and publish it.
    pub fn refresh_from_str(&self, s: &str, name_suffix: Option<&str>) -> HudResult<()> {
        self.refresh_from_reader(s.as_bytes(), name_suffix)
    }

    /// Parse a catalog document file and publish it.
    pub fn refresh_from_path(
        &self,
        path: impl AsRef<Path>,
        name_suffix: Option<&str>,
    ) -> HudResult<()> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            let err = HudError::io(format!("open catalog '{}': {e}", path.display()));
            tracing::error!(error = %err, "catalog refresh failed, keeping previous catalog");
            err
        })?;
        self.refresh_from_reader(std::io::BufReader::new(f), name_suffix)
    }

    /// Return `true` when `game` is held by an instance other than `instance`.
    ///
    /// Disabled or unnamed games are never considered acquired.
    pub fn is_game_acquired(&self, game: &Game, instance: &str) -> bool {
        if !game.is_acquirable() {
            return false;
        }
        self.is_name_held_elsewhere(&game.name, instance)
    }

    /// Name-based variant of [`GameManager::is_game_acquired`].
    pub fn is_name_acquired(&self, name: &str, instance: &str) -> bool {
        match self.get_game(name) {
            Some(game) => self.is_game_acquired(&game, instance),
            None => false,
        }
    }

    /// Claim `game` for `instance`.
    ///
    /// Returns `true` when `instance` holds the game afterwards. Acquiring a game already held by
    /// the same instance is a no-op; a game held elsewhere is never taken over.
    pub fn acquire_game(&self, game: &Game, instance: &str) -> bool {
        if !game.is_acquirable() {
            return false;
        }
        let mut acquired = self.acquired.lock().unwrap_or_else(PoisonError::into_inner);
        let holder = acquired
            .entry(game.name.clone())
            .or_insert_with(|| instance.to_string());
        holder == instance
    }

    /// Drop `instance`'s claim on `game`, if it holds one.
    pub fn release_game(&self, game: &Game, instance: &str) {
        if !game.is_acquirable() {
            return;
        }
        let mut acquired = self.acquired.lock().unwrap_or_else(PoisonError::into_inner);
        if acquired.get(&game.name).is_some_and(|h| h == instance) {
            acquired.remove(&game.name);
        }
    }

    /// Instance currently holding `name`, if any.
    pub fn holder(&self, name: &str) -> Option<String> {
        self.acquired
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn is_name_held_elsewhere(&self, name: &str, instance: &str) -> bool {
        let acquired = self.acquired.lock().unwrap_or_else(PoisonError::into_inner);
        match acquired.get(name) {
            Some(holder) => instance.is_empty() || holder != instance,
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/manager.rs"]
mod tests;
