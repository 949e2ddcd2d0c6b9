use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub key: String,
    pub title: String,
    pub thumb: Option<String>,
    pub times: Option<String>,
    pub difficulty: Option<String>,
    /// Free-text, comma separated ingredient list as authored
    pub ingredient: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    pub key: String,
    pub title: String,
    pub thumb: Option<String>,
    pub times: Option<String>,
    pub difficulty: Option<String>,
    pub ingredient: Option<String>,
}

impl NewRecipe {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            thumb: None,
            times: None,
            difficulty: None,
            ingredient: None,
        }
    }

    pub fn with_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredient = Some(ingredient.into());
        self
    }

    pub fn with_details(
        mut self,
        thumb: impl Into<String>,
        times: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        self.thumb = Some(thumb.into());
        self.times = Some(times.into());
        self.difficulty = Some(difficulty.into());
        self
    }
}
