//! In-memory [`RecordStore`] for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use petskub_atoms::articles::{ArticleKey, KnowledgeArticle};
use petskub_atoms::pets::Pet;
use petskub_atoms::reports::Report;

use crate::error::StoreError;
use crate::supabase::RecordStore;

#[derive(Default)]
pub struct MemoryStore {
    articles: Vec<(KnowledgeArticle, bool)>,
    pets: Vec<Pet>,
    reports: Vec<Report>,
    failing: bool,
    article_lookups: Mutex<Vec<(ArticleKey, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_article(mut self, article: KnowledgeArticle, published: bool) -> Self {
        self.articles.push((article, published));
        self
    }

    pub fn with_pet(mut self, pet: Pet) -> Self {
        self.pets.push(pet);
        self
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.reports.push(report);
        self
    }

    /// Every call answers with an upstream 503.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Article lookups made so far, in order.
    pub fn article_lookups(&self) -> Vec<(ArticleKey, String)> {
        self.article_lookups
            .lock()
            .map(|lookups| lookups.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_article(
        &self,
        key: ArticleKey,
        value: &str,
    ) -> Result<Option<KnowledgeArticle>, StoreError> {
        if let Ok(mut lookups) = self.article_lookups.lock() {
            lookups.push((key, value.to_string()));
        }
        self.check()?;

        Ok(self
            .articles
            .iter()
            .filter(|(_, published)| *published)
            .map(|(article, _)| article)
            .find(|article| match key {
                ArticleKey::Id => article.id == value,
                ArticleKey::Slug => article.slug.as_deref() == Some(value),
            })
            .cloned())
    }

    async fn find_pet(&self, id: &str) -> Result<Option<Pet>, StoreError> {
        self.check()?;
        Ok(self.pets.iter().find(|pet| pet.id == id).cloned())
    }

    async fn list_reports(&self, limit: usize) -> Result<Vec<Report>, StoreError> {
        self.check()?;
        let mut reports = self.reports.clone();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports.truncate(limit);
        Ok(reports)
    }
}
