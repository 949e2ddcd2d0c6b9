use crate::db::ingredients::normalize_ingredient;
use crate::error::{Error, Result};
use crate::search::PaginationStrategy;

/// A parsed ingredient query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientQuery {
    raw: String,
    tokens: Vec<String>,
}

impl IngredientQuery {
    /// Split a comma separated list into lower-cased, trimmed tokens.
    ///
    /// Empty segments are dropped and repeated tokens are kept once, in order
    /// of first appearance. A query with no tokens left is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut tokens: Vec<String> = Vec::new();
        for token in raw.split(',').map(normalize_ingredient) {
            if !token.is_empty() && !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        if tokens.is_empty() {
            return Err(Error::InvalidQuery(
                "At least one ingredient is required".to_string(),
            ));
        }

        Ok(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Limits applied when building a request from loose parameters
#[derive(Debug, Clone, Copy)]
pub struct PageDefaults {
    pub page_size: usize,
    pub max_limit: usize,
    pub max_pages: usize,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: IngredientQuery,
    pub page: usize,
    pub limit: usize,
    pub strategy: PaginationStrategy,
}

/// Parse a positive integer, treating anything else as absent
fn positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .and_then(|v| usize::try_from(v).ok())
}

impl SearchRequest {
    /// Build a request from raw query-string values.
    ///
    /// Missing or non-positive `page` becomes 1; missing or non-positive
    /// `limit` becomes the default page size. `limit` is capped at
    /// `max_limit`; a page beyond `max_pages` is rejected.
    pub fn from_params(
        query_text: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
        strategy: PaginationStrategy,
        defaults: PageDefaults,
    ) -> Result<Self> {
        let query_text = query_text
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| Error::InvalidQuery("Ingredient query is required".to_string()))?;
        let query = IngredientQuery::parse(query_text)?;

        let page = positive(page).unwrap_or(1);
        if page > defaults.max_pages {
            return Err(Error::Validation(format!(
                "Page {page} exceeds the maximum of {}",
                defaults.max_pages
            )));
        }

        let limit = positive(limit)
            .unwrap_or(defaults.page_size)
            .min(defaults.max_limit);

        Ok(Self {
            query,
            page,
            limit,
            strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: PageDefaults = PageDefaults {
        page_size: 20,
        max_limit: 100,
        max_pages: 50,
    };

    #[test]
    fn test_tokens_normalized() {
        let a = IngredientQuery::parse("Egg, Milk").unwrap();
        let b = IngredientQuery::parse("egg,milk").unwrap();
        let c = IngredientQuery::parse(" EGG , MILK ").unwrap();

        assert_eq!(a.tokens(), &["egg".to_string(), "milk".to_string()]);
        assert_eq!(a.tokens(), b.tokens());
        assert_eq!(b.tokens(), c.tokens());
        assert_eq!(c.raw(), " EGG , MILK ");
    }

    #[test]
    fn test_duplicates_and_empty_segments_dropped() {
        let q = IngredientQuery::parse("egg,, Egg ,rice,").unwrap();
        assert_eq!(q.tokens(), &["egg".to_string(), "rice".to_string()]);
    }

    #[test]
    fn test_empty_query_rejected() {
        assert!(matches!(
            IngredientQuery::parse(" , ,"),
            Err(Error::InvalidQuery(_))
        ));

        let missing = SearchRequest::from_params(
            None,
            None,
            None,
            PaginationStrategy::GlobalRank,
            DEFAULTS,
        );
        assert!(matches!(missing, Err(Error::InvalidQuery(_))));

        let blank = SearchRequest::from_params(
            Some("   "),
            None,
            None,
            PaginationStrategy::GlobalRank,
            DEFAULTS,
        );
        assert!(matches!(blank, Err(Error::InvalidQuery(_))));
    }

    #[test]
    fn test_page_and_limit_defaults() {
        let req = SearchRequest::from_params(
            Some("egg"),
            Some("abc"),
            Some("-5"),
            PaginationStrategy::CursorWalk,
            DEFAULTS,
        )
        .unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 20);

        let req = SearchRequest::from_params(
            Some("egg"),
            Some("0"),
            None,
            PaginationStrategy::CursorWalk,
            DEFAULTS,
        )
        .unwrap();
        assert_eq!(req.page, 1);

        let req = SearchRequest::from_params(
            Some("egg"),
            Some(" 3 "),
            Some("500"),
            PaginationStrategy::CursorWalk,
            DEFAULTS,
        )
        .unwrap();
        assert_eq!(req.page, 3);
        assert_eq!(req.limit, 100);
    }

    #[test]
    fn test_page_beyond_max_rejected() {
        let req = SearchRequest::from_params(
            Some("egg"),
            Some("51"),
            None,
            PaginationStrategy::CursorWalk,
            DEFAULTS,
        );
        assert!(matches!(req, Err(Error::Validation(_))));
    }
}
