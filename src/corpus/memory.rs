use crate::corpus::{CorpusRecipe, Cursor, OrderKey, RecipeCorpus};
use crate::error::Result;

/// In-process corpus, kept sorted by `(title, key)`
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    recipes: Vec<CorpusRecipe>,
}

impl MemoryCorpus {
    pub fn new(recipes: impl IntoIterator<Item = CorpusRecipe>) -> Self {
        let mut recipes: Vec<_> = recipes.into_iter().collect();
        recipes.sort_by(|a, b| (&a.title, &a.key).cmp(&(&b.title, &b.key)));
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeCorpus for MemoryCorpus {
    async fn scan_all(&self) -> Result<Vec<CorpusRecipe>> {
        Ok(self.recipes.clone())
    }

    async fn scan_ordered_page(
        &self,
        order: OrderKey,
        after: Option<&Cursor>,
        limit: usize,
    ) -> Result<Vec<CorpusRecipe>> {
        let OrderKey::Title = order;

        let start = match after {
            Some(cursor) => self.recipes.partition_point(|r| !cursor.precedes(r)),
            None => 0,
        };

        Ok(self.recipes[start..].iter().take(limit).cloned().collect())
    }
}
