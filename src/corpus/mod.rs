//! Read-only access to the recipe collection.
//!
//! The search engine only ever sees recipes through [`RecipeCorpus`], which
//! offers a full scan and a title-ordered, cursor-bounded scan. Ranking lives
//! elsewhere.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCorpus;
pub use sqlite::SqliteCorpus;

use crate::db::ingredients::parse_ingredient_set;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::future::Future;

/// A recipe as the search engine sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecipe {
    pub key: String,
    pub title: String,
    pub thumb: Option<String>,
    pub times: Option<String>,
    pub difficulty: Option<String>,
    /// Raw ingredient field; `None` means the recipe cannot be scored
    pub ingredient: Option<String>,
    /// Normalized ingredient tokens
    pub ingredients: BTreeSet<String>,
}

impl CorpusRecipe {
    /// Build a recipe whose token set is derived from the raw field
    pub fn new(key: impl Into<String>, title: impl Into<String>, ingredient: Option<&str>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            thumb: None,
            times: None,
            difficulty: None,
            ingredient: ingredient.map(str::to_string),
            ingredients: ingredient.map(parse_ingredient_set).unwrap_or_default(),
        }
    }
}

/// Sort key for ordered scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderKey {
    #[default]
    Title,
}

/// Position after the last item of a previously returned page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    title: String,
    key: String,
}

impl Cursor {
    pub fn after(recipe: &CorpusRecipe) -> Self {
        Self {
            title: recipe.title.clone(),
            key: recipe.key.clone(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether `recipe` sorts strictly after this cursor under `(title, key)`
    pub fn precedes(&self, recipe: &CorpusRecipe) -> bool {
        (recipe.title.as_str(), recipe.key.as_str()) > (self.title.as_str(), self.key.as_str())
    }
}

/// Read-only recipe store consumed by the search engine.
///
/// Failures must surface as [`crate::Error::StorageUnavailable`], never as an
/// empty result.
pub trait RecipeCorpus: Send + Sync {
    /// Every recipe, ordered by `(title, key)`
    fn scan_all(&self) -> impl Future<Output = Result<Vec<CorpusRecipe>>> + Send;

    /// Up to `limit` recipes ordered by `order`, strictly after `after`
    fn scan_ordered_page(
        &self,
        order: OrderKey,
        after: Option<&Cursor>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CorpusRecipe>>> + Send;
}
