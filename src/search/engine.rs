use crate::corpus::{CorpusRecipe, Cursor, OrderKey, RecipeCorpus};
use crate::error::{Error, Result};
use crate::search::scoring::{self, MatchMode};
use crate::search::{IngredientQuery, PaginationStrategy, SearchRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub match_mode: MatchMode,
    /// Report zero matches as [`Error::NoMatch`] instead of an empty page
    pub empty_as_not_found: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Token,
            empty_as_not_found: true,
        }
    }
}

/// A recipe together with its match count for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeMatch {
    pub key: String,
    pub title: String,
    pub thumb: Option<String>,
    pub times: Option<String>,
    pub difficulty: Option<String>,
    pub matches: usize,
}

impl RecipeMatch {
    fn from_recipe(recipe: CorpusRecipe, matches: usize) -> Self {
        Self {
            key: recipe.key,
            title: recipe.title,
            thumb: recipe.thumb,
            times: recipe.times,
            difficulty: recipe.difficulty,
            matches,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult {
    pub recipes: Vec<RecipeMatch>,
    pub page: usize,
    pub limit: usize,
    /// Matched candidates the ranking saw (the whole corpus for
    /// `GlobalRank`, only the walked page for `CursorWalk`)
    pub total: usize,
    /// Only known when the whole corpus was ranked
    pub total_pages: Option<usize>,
    pub strategy: PaginationStrategy,
}

/// Stateless match, rank and paginate pipeline over a recipe corpus
pub struct SearchEngine<C> {
    corpus: C,
    options: SearchOptions,
}

impl<C: RecipeCorpus> SearchEngine<C> {
    pub fn new(corpus: C, options: SearchOptions) -> Self {
        Self { corpus, options }
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    /// Run one search request
    pub async fn search(&self, request: &SearchRequest) -> Result<PagedResult> {
        debug!(
            "Search {:?} page={} limit={} strategy={}",
            request.query.tokens(),
            request.page,
            request.limit,
            request.strategy
        );

        let result = match request.strategy {
            PaginationStrategy::CursorWalk => self.search_cursor_walk(request).await?,
            PaginationStrategy::GlobalRank => self.search_global_rank(request).await?,
        };

        if result.total == 0 && self.options.empty_as_not_found {
            return Err(Error::NoMatch("Recipe not found".to_string()));
        }

        Ok(result)
    }

    /// Materialize the target page of title-ordered recipes, then rank it
    async fn search_cursor_walk(&self, request: &SearchRequest) -> Result<PagedResult> {
        let (page, limit) = (request.page.max(1), request.limit.max(1));
        let mut cursor: Option<Cursor> = None;
        let mut batch = Vec::new();

        // Each call depends on the cursor of the previous one
        for step in 1..=page {
            batch = self
                .corpus
                .scan_ordered_page(OrderKey::Title, cursor.as_ref(), limit)
                .await?;

            match batch.last() {
                Some(last) => cursor = Some(Cursor::after(last)),
                None => {
                    debug!("Corpus exhausted at page {} of {}", step, page);
                    break;
                }
            }
        }

        let ranked = self.rank(batch, &request.query);
        let total = ranked.len();

        Ok(PagedResult {
            recipes: ranked,
            page,
            limit,
            total,
            total_pages: None,
            strategy: PaginationStrategy::CursorWalk,
        })
    }

    /// Rank the whole corpus, then slice out the requested page
    async fn search_global_rank(&self, request: &SearchRequest) -> Result<PagedResult> {
        let (page, limit) = (request.page.max(1), request.limit.max(1));
        let candidates = self.corpus.scan_all().await?;
        let ranked = self.rank(candidates, &request.query);
        let total = ranked.len();

        let offset = (page - 1).saturating_mul(limit);
        let recipes: Vec<RecipeMatch> = ranked.into_iter().skip(offset).take(limit).collect();

        Ok(PagedResult {
            recipes,
            page,
            limit,
            total,
            total_pages: Some(total.div_ceil(limit)),
            strategy: PaginationStrategy::GlobalRank,
        })
    }

    /// Score, drop zero scores and sort by match count, keeping scan order
    /// for ties
    pub fn rank(&self, candidates: Vec<CorpusRecipe>, query: &IngredientQuery) -> Vec<RecipeMatch> {
        let mut scored: Vec<RecipeMatch> = candidates
            .into_iter()
            .filter_map(|recipe| {
                match scoring::score(&recipe, query, self.options.match_mode) {
                    Some(0) => None,
                    Some(matches) => Some(RecipeMatch::from_recipe(recipe, matches)),
                    None => {
                        warn!("Skipping recipe {} without ingredient field", recipe.key);
                        None
                    }
                }
            })
            .collect();

        // Vec::sort_by is stable
        scored.sort_by(|a, b| b.matches.cmp(&a.matches));
        scored
    }
}
