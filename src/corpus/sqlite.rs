use crate::corpus::{CorpusRecipe, Cursor, OrderKey, RecipeCorpus};
use crate::db::{self, ingredients, models::Recipe, DbPool};
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Recipe corpus backed by the shared SQLite pool
#[derive(Clone)]
pub struct SqliteCorpus {
    pool: DbPool,
}

impl SqliteCorpus {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn into_corpus_recipe(recipe: Recipe, tokens: &mut HashMap<i64, BTreeSet<String>>) -> CorpusRecipe {
    // Rows written before tokens were stored fall back to parsing the raw field
    let ingredients = match tokens.remove(&recipe.id) {
        Some(set) => set,
        None => recipe
            .ingredient
            .as_deref()
            .map(ingredients::parse_ingredient_set)
            .unwrap_or_default(),
    };

    CorpusRecipe {
        key: recipe.key,
        title: recipe.title,
        thumb: recipe.thumb,
        times: recipe.times,
        difficulty: recipe.difficulty,
        ingredient: recipe.ingredient,
        ingredients,
    }
}

impl RecipeCorpus for SqliteCorpus {
    async fn scan_all(&self) -> Result<Vec<CorpusRecipe>> {
        let recipes = db::recipes::list_all_recipes(&self.pool)
            .await
            .map_err(Error::storage)?;
        let mut tokens = ingredients::get_all_recipe_ingredients(&self.pool)
            .await
            .map_err(Error::storage)?;

        debug!("Scanned {} recipes", recipes.len());

        Ok(recipes
            .into_iter()
            .map(|r| into_corpus_recipe(r, &mut tokens))
            .collect())
    }

    async fn scan_ordered_page(
        &self,
        order: OrderKey,
        after: Option<&Cursor>,
        limit: usize,
    ) -> Result<Vec<CorpusRecipe>> {
        let OrderKey::Title = order;
        let limit = i64::try_from(limit)
            .map_err(|_| Error::Validation(format!("Page size {limit} is too large")))?;

        let recipes = db::recipes::list_recipes_after(
            &self.pool,
            after.map(|c| (c.title(), c.key())),
            limit,
        )
        .await
        .map_err(Error::storage)?;

        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
        let mut tokens = ingredients::get_ingredients_for_recipes(&self.pool, &ids)
            .await
            .map_err(Error::storage)?;

        Ok(recipes
            .into_iter()
            .map(|r| into_corpus_recipe(r, &mut tokens))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::NewRecipe;
    use crate::db::{init_pool, recipes, run_migrations};

    async fn seeded_corpus() -> SqliteCorpus {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        for (key, title, ingredient) in [
            ("k3", "Rendang", Some("beef, coconut milk")),
            ("k1", "Bakwan", Some("cabbage, carrot, flour")),
            ("k2", "Es Teh", None),
        ] {
            let mut recipe = NewRecipe::new(key, title);
            recipe.ingredient = ingredient.map(str::to_string);
            recipes::create_recipe(&pool, &recipe).await.unwrap();
        }

        SqliteCorpus::new(pool)
    }

    #[tokio::test]
    async fn test_scan_all_is_title_ordered() {
        let corpus = seeded_corpus().await;
        let all = corpus.scan_all().await.unwrap();

        let titles: Vec<_> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Bakwan", "Es Teh", "Rendang"]);
        assert!(all[0].ingredients.contains("carrot"));
        assert!(all[1].ingredient.is_none());
        assert!(all[2].ingredients.contains("coconut milk"));
    }

    #[tokio::test]
    async fn test_scan_ordered_page_walks_with_cursor() {
        let corpus = seeded_corpus().await;

        let page1 = corpus.scan_ordered_page(OrderKey::Title, None, 2).await.unwrap();
        assert_eq!(page1.len(), 2);

        let cursor = Cursor::after(page1.last().unwrap());
        let page2 = corpus
            .scan_ordered_page(OrderKey::Title, Some(&cursor), 2)
            .await
            .unwrap();
        assert_eq!(page2.len(), 1);
        assert_eq!(page2[0].title, "Rendang");
        assert!(page2[0].ingredients.contains("beef"));

        let cursor = Cursor::after(&page2[0]);
        let page3 = corpus
            .scan_ordered_page(OrderKey::Title, Some(&cursor), 2)
            .await
            .unwrap();
        assert!(page3.is_empty());
    }

    #[tokio::test]
    async fn test_closed_pool_is_storage_unavailable() {
        let corpus = seeded_corpus().await;
        corpus.pool().close().await;

        let result = corpus.scan_all().await;
        assert!(matches!(result, Err(Error::StorageUnavailable(_))));
    }
}
