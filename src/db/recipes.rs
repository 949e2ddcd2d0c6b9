use crate::db::{ingredients, models::*, DbPool};
use crate::error::Result;
use chrono::Utc;

/// Create a new recipe and store its normalized ingredient tokens.
///
/// The row and its tokens are written in one transaction.
pub async fn create_recipe(pool: &DbPool, new_recipe: &NewRecipe) -> Result<Recipe> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        INSERT INTO recipes (key, title, thumb, times, difficulty, ingredient, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&new_recipe.key)
    .bind(&new_recipe.title)
    .bind(&new_recipe.thumb)
    .bind(&new_recipe.times)
    .bind(&new_recipe.difficulty)
    .bind(&new_recipe.ingredient)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(field) = &recipe.ingredient {
        let tokens = ingredients::parse_ingredient_set(field);
        ingredients::set_recipe_ingredients(&mut tx, recipe.id, &tokens).await?;
    }

    tx.commit().await?;
    Ok(recipe)
}

/// List every recipe ordered by title
pub async fn list_all_recipes(pool: &DbPool) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes ORDER BY title, key")
        .fetch_all(pool)
        .await?;

    Ok(recipes)
}

/// List up to `limit` recipes ordered by title, strictly after `(title, key)`
pub async fn list_recipes_after(
    pool: &DbPool,
    after: Option<(&str, &str)>,
    limit: i64,
) -> Result<Vec<Recipe>> {
    let recipes = match after {
        Some((title, key)) => {
            sqlx::query_as::<_, Recipe>(
                r#"
                SELECT * FROM recipes
                WHERE title > ? OR (title = ? AND key > ?)
                ORDER BY title, key
                LIMIT ?
                "#,
            )
            .bind(title)
            .bind(title)
            .bind(key)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Recipe>("SELECT * FROM recipes ORDER BY title, key LIMIT ?")
                .bind(limit)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(recipes)
}

/// Count all recipes
pub async fn count_all_recipes(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}
