use std::collections::HashMap;

pub type MovieId = u32;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Adding a title that is already registered is a contract violation;
    /// callers resolve the existing id first.
    #[error("Movie already registered: {0}")]
    DuplicateTitle(String),
}

/// Registry of the movies currently playing somewhere, keyed both ways.
///
/// The two maps are only ever updated together, so title→id and id→title
/// stay consistent. `list_titles` returns insertion order, stable across
/// removals of other titles.
///
/// Not internally locked: the directory serializes all access to it.
#[derive(Debug, Default)]
pub struct MovieCatalog {
    title_to_id: HashMap<String, MovieId>,
    id_to_title: HashMap<MovieId, String>,
    titles: Vec<String>,
}

impl MovieCatalog {
    pub fn new() -> MovieCatalog {
        MovieCatalog::default()
    }

    /// Register a new title under the smallest id not currently in use.
    /// Ids are reused after removal.
    pub fn add_movie(&mut self, title: &str) -> Result<MovieId, CatalogError> {
        if self.title_to_id.contains_key(title) {
            return Err(CatalogError::DuplicateTitle(title.to_string()));
        }
        let id = self.free_id();
        self.title_to_id.insert(title.to_string(), id);
        self.id_to_title.insert(id, title.to_string());
        self.titles.push(title.to_string());
        Ok(id)
    }

    /// No-op when the title is not registered.
    pub fn remove_movie(&mut self, title: &str) {
        if let Some(id) = self.title_to_id.remove(title) {
            self.id_to_title.remove(&id);
            self.titles.retain(|t| t != title);
        }
    }

    pub fn id_for_title(&self, title: &str) -> Option<MovieId> {
        self.title_to_id.get(title).copied()
    }

    pub fn title_for_id(&self, id: MovieId) -> Option<&str> {
        self.id_to_title.get(&id).map(String::as_str)
    }

    /// Snapshot of all registered titles in insertion order.
    pub fn list_titles(&self) -> Vec<String> {
        self.titles.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    // Linear scan from zero. Catalogs are small; this is a known scaling
    // limit, not an oversight.
    fn free_id(&self) -> MovieId {
        let mut id = 0;
        while self.id_to_title.contains_key(&id) {
            id += 1;
        }
        id
    }
}
