use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    corpus::SqliteCorpus,
    db,
    search::{PageDefaults, PaginationStrategy, SearchEngine, SearchRequest},
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub engine: Arc<SearchEngine<SqliteCorpus>>,
    pub settings: crate::config::Settings,
}

impl AppState {
    /// Build state around one shared pool handle
    pub fn new(pool: sqlx::SqlitePool, settings: crate::config::Settings) -> Self {
        let options = crate::search::SearchOptions {
            match_mode: settings.search.match_mode,
            empty_as_not_found: settings.search.empty_as_not_found,
        };
        let engine = SearchEngine::new(SqliteCorpus::new(pool.clone()), options);

        Self {
            pool,
            engine: Arc::new(engine),
            settings,
        }
    }

    fn page_defaults(&self, page_size: usize) -> PageDefaults {
        PageDefaults {
            page_size,
            max_limit: self.settings.pagination.api_max_limit,
            max_pages: self.settings.pagination.max_pages,
        }
    }
}

/// GET /search?s=&page=&limit= - Search recipes by ingredients
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchEnvelope>> {
    debug!("Search request: {:?}", params);

    let request = SearchRequest::from_params(
        params.s.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
        state.settings.search.default_strategy,
        state.page_defaults(state.settings.pagination.default_page_size),
    )?;

    let result = state.engine.search(&request).await?;

    Ok(Json(result.into()))
}

/// GET /search/:page?ingredients= - Globally ranked search with a fixed page size
pub async fn search_recipes_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Query(params): Query<IngredientParams>,
) -> Result<Json<SearchEnvelope>> {
    debug!("Paged search request: page={} {:?}", page, params);

    let fixed_page_size = state.settings.pagination.fixed_page_size;
    let request = SearchRequest::from_params(
        params.ingredients.as_deref(),
        Some(page.as_str()),
        None,
        PaginationStrategy::GlobalRank,
        state.page_defaults(fixed_page_size),
    )?;

    let result = state.engine.search(&request).await?;

    Ok(Json(result.into()))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let db_healthy = db::ping(&state.pool).await;

    Ok(Json(ReadinessResponse {
        ready: db_healthy,
        database: if db_healthy { "ok" } else { "error" }.to_string(),
    }))
}
