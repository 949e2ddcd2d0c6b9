use crate::db::DbPool;
use crate::error::Result;
use sqlx::SqliteConnection;
use std::collections::{BTreeSet, HashMap};

/// Normalize ingredient name (lowercase, trim)
pub fn normalize_ingredient(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Lower-case words of a phrase with surrounding punctuation stripped
pub fn ingredient_words(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Canonical form of an ingredient phrase: its words joined by single spaces
pub fn normalize_phrase(phrase: &str) -> String {
    ingredient_words(phrase).join(" ")
}

/// Split a free-text ingredient field into its normalized token set.
///
/// Every contiguous run of words inside a comma separated segment is kept,
/// so "2 sdm Kecap Manis." yields `kecap`, `manis`, `kecap manis`,
/// `sdm kecap manis` and so on. A token therefore matches whole words only:
/// "egg" never matches "eggplant".
pub fn parse_ingredient_set(field: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();

    for segment in field.split(',') {
        let words = ingredient_words(segment);
        for start in 0..words.len() {
            for end in start + 1..=words.len() {
                tokens.insert(words[start..end].join(" "));
            }
        }
    }

    tokens
}

/// Set recipe ingredient tokens (replaces existing tokens).
///
/// Runs on the caller's connection so it can share the transaction that
/// wrote the recipe row.
pub async fn set_recipe_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    tokens: &BTreeSet<String>,
) -> Result<()> {
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    for token in tokens {
        sqlx::query("INSERT OR IGNORE INTO recipe_ingredients (recipe_id, name) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(token)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Get ingredient tokens for a batch of recipes
pub async fn get_ingredients_for_recipes(
    pool: &DbPool,
    recipe_ids: &[i64],
) -> Result<HashMap<i64, BTreeSet<String>>> {
    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = recipe_ids
        .iter()
        .enumerate()
        .map(|(i, _)| format!("?{}", i + 1))
        .collect::<Vec<_>>()
        .join(",");

    let query_str = format!(
        "SELECT recipe_id, name FROM recipe_ingredients WHERE recipe_id IN ({placeholders})"
    );

    let mut query = sqlx::query_as::<_, (i64, String)>(&query_str);
    for id in recipe_ids {
        query = query.bind(id);
    }

    Ok(group_by_recipe(query.fetch_all(pool).await?))
}

/// Get ingredient tokens for every recipe in the corpus
pub async fn get_all_recipe_ingredients(pool: &DbPool) -> Result<HashMap<i64, BTreeSet<String>>> {
    let rows: Vec<(i64, String)> =
        sqlx::query_as("SELECT recipe_id, name FROM recipe_ingredients")
            .fetch_all(pool)
            .await?;

    Ok(group_by_recipe(rows))
}

fn group_by_recipe(rows: Vec<(i64, String)>) -> HashMap<i64, BTreeSet<String>> {
    let mut map: HashMap<i64, BTreeSet<String>> = HashMap::new();
    for (recipe_id, name) in rows {
        map.entry(recipe_id).or_default().insert(name);
    }
    map
}

/// Count distinct ingredient tokens
pub async fn count_ingredients(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT name) FROM recipe_ingredients")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}
