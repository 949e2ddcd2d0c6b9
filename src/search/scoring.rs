use crate::corpus::CorpusRecipe;
use crate::db::ingredients::normalize_phrase;
use crate::error::Error;
use crate::search::IngredientQuery;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a query token is compared against a recipe's ingredients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Token must equal a whole word or a run of consecutive words of one
    /// ingredient phrase, ignoring punctuation
    #[default]
    Token,
    /// Token may occur anywhere in the raw ingredient text ("egg" matches "eggplant")
    Substring,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Token => f.write_str("token"),
            MatchMode::Substring => f.write_str("substring"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token" => Ok(MatchMode::Token),
            "substring" => Ok(MatchMode::Substring),
            other => Err(Error::Config(format!("Unknown match mode: {other}"))),
        }
    }
}

/// Number of query tokens found in the recipe, or `None` when the recipe has
/// no ingredient field and cannot be scored.
pub fn score(recipe: &CorpusRecipe, query: &IngredientQuery, mode: MatchMode) -> Option<usize> {
    let field = recipe.ingredient.as_deref()?;

    let count = match mode {
        MatchMode::Token => query
            .tokens()
            .iter()
            .filter(|t| recipe.ingredients.contains(&normalize_phrase(t)))
            .count(),
        MatchMode::Substring => {
            let haystack = field.to_lowercase();
            query
                .tokens()
                .iter()
                .filter(|t| haystack.contains(t.as_str()))
                .count()
        }
    };

    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(s: &str) -> IngredientQuery {
        IngredientQuery::parse(s).unwrap()
    }

    #[test]
    fn test_token_score_counts_each_token_once() {
        let recipe = CorpusRecipe::new("1", "Omelette", Some("Egg, milk, egg white"));
        assert_eq!(score(&recipe, &query("egg,milk"), MatchMode::Token), Some(2));
        assert_eq!(score(&recipe, &query("egg"), MatchMode::Token), Some(1));
        assert_eq!(score(&recipe, &query("beef"), MatchMode::Token), Some(0));
    }

    #[test]
    fn test_token_mode_rejects_partial_words() {
        let recipe = CorpusRecipe::new("1", "Balado Terong", Some("eggplant, chili"));
        assert_eq!(score(&recipe, &query("egg"), MatchMode::Token), Some(0));
        assert_eq!(score(&recipe, &query("egg"), MatchMode::Substring), Some(1));
    }

    #[test]
    fn test_token_mode_ignores_punctuation() {
        let recipe = CorpusRecipe::new(
            "1",
            "Nasi Goreng",
            Some("2 butir telur, 1 sdt garam., 2 sdm kecap manis (optional)"),
        );
        assert_eq!(score(&recipe, &query("garam"), MatchMode::Token), Some(1));
        assert_eq!(score(&recipe, &query("optional"), MatchMode::Token), Some(1));
        assert_eq!(score(&recipe, &query("garam, telur"), MatchMode::Token), Some(2));
    }

    #[test]
    fn test_token_mode_matches_word_runs() {
        let recipe = CorpusRecipe::new("1", "Ayam Kecap", Some("ayam, 2 sdm kecap manis"));
        assert_eq!(score(&recipe, &query("kecap manis"), MatchMode::Token), Some(1));
        assert_eq!(score(&recipe, &query("Kecap  Manis."), MatchMode::Token), Some(1));
        // Words must be adjacent and in order
        assert_eq!(score(&recipe, &query("manis kecap"), MatchMode::Token), Some(0));
        assert_eq!(score(&recipe, &query("ayam kecap"), MatchMode::Token), Some(0));
    }

    #[test]
    fn test_substring_mode_is_case_insensitive() {
        let recipe = CorpusRecipe::new("1", "Pancake", Some("FLOUR, Milk"));
        assert_eq!(
            score(&recipe, &query("flour, milk, sugar"), MatchMode::Substring),
            Some(2)
        );
    }

    #[test]
    fn test_missing_field_is_unscored() {
        let recipe = CorpusRecipe::new("1", "Air Putih", None);
        assert_eq!(score(&recipe, &query("water"), MatchMode::Token), None);
        assert_eq!(score(&recipe, &query("water"), MatchMode::Substring), None);
    }

    #[test]
    fn test_match_mode_from_str() {
        assert_eq!("Token".parse::<MatchMode>().unwrap(), MatchMode::Token);
        assert_eq!("substring".parse::<MatchMode>().unwrap(), MatchMode::Substring);
        assert!("fuzzy".parse::<MatchMode>().is_err());
    }
}
