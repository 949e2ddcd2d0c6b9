//! Ingredient match search: normalize the query, score every candidate by
//! the number of requested ingredients it contains, drop zero scores, sort
//! stably by score and return one page.

pub mod engine;
pub mod query;
pub mod scoring;

pub use engine::{PagedResult, RecipeMatch, SearchEngine, SearchOptions};
pub use query::{IngredientQuery, PageDefaults, SearchRequest};
pub use scoring::MatchMode;

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a page of ranked results is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStrategy {
    /// Walk title-ordered pages with a cursor, then rank only the target page.
    /// Ranking is local to that page.
    CursorWalk,
    /// Rank the whole corpus, then slice out the target page
    GlobalRank,
}

impl fmt::Display for PaginationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationStrategy::CursorWalk => f.write_str("cursor_walk"),
            PaginationStrategy::GlobalRank => f.write_str("global_rank"),
        }
    }
}

impl FromStr for PaginationStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cursor_walk" | "cursor" => Ok(PaginationStrategy::CursorWalk),
            "global_rank" | "global" => Ok(PaginationStrategy::GlobalRank),
            other => Err(Error::Config(format!("Unknown pagination strategy: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "cursor_walk".parse::<PaginationStrategy>().unwrap(),
            PaginationStrategy::CursorWalk
        );
        assert_eq!(
            " Global ".parse::<PaginationStrategy>().unwrap(),
            PaginationStrategy::GlobalRank
        );
        assert!("random".parse::<PaginationStrategy>().is_err());
        assert_eq!(PaginationStrategy::GlobalRank.to_string(), "global_rank");
    }
}
