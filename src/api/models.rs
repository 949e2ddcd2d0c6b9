use serde::{Deserialize, Serialize};

use crate::search::{PagedResult, PaginationStrategy, RecipeMatch};

/// `GET /search` query parameters.
///
/// Kept as raw strings so malformed numbers fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Comma separated ingredient list
    pub s: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// `GET /search/{page}` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientParams {
    pub ingredients: Option<String>,
}

/// Response envelope shared by every search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<RecipeMatch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl SearchEnvelope {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: Some(message.into()),
            recipes: None,
            pagination: None,
        }
    }
}

impl From<PagedResult> for SearchEnvelope {
    fn from(result: PagedResult) -> Self {
        let message = if result.recipes.is_empty() {
            "No recipes on this page"
        } else {
            "success"
        };

        Self {
            error: false,
            message: Some(message.to_string()),
            pagination: Some(Pagination {
                page: result.page,
                limit: result.limit,
                total: result.total,
                total_pages: result.total_pages,
                strategy: result.strategy,
            }),
            recipes: Some(result.recipes),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    pub strategy: PaginationStrategy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: String,
}
