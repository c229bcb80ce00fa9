use async_trait::async_trait;
use petskub_atoms::articles::{ArticleKey, KnowledgeArticle, ARTICLE_COLUMNS};
use petskub_atoms::pets::{Pet, PET_COLUMNS};
use petskub_atoms::reports::Report;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ConfigError, StoreError};

const CLIENT_INFO: &str = "petskub-share-lambda";

const ARTICLES_TABLE: &str = "knowledge_articles";
const PETS_TABLE: &str = "cats";
const REPORTS_TABLE: &str = "reports";

/// Read access to the hosted database, limited to what the handlers serve.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Published article whose `key` column equals `value`.
    async fn find_article(
        &self,
        key: ArticleKey,
        value: &str,
    ) -> Result<Option<KnowledgeArticle>, StoreError>;

    async fn find_pet(&self, id: &str) -> Result<Option<Pet>, StoreError>;

    /// Most recent reports first.
    async fn list_reports(&self, limit: usize) -> Result<Vec<Report>, StoreError>;
}

/// PostgREST select parameters.
#[derive(Debug, Default)]
pub struct Select<'a> {
    columns: &'a str,
    filters: Vec<(&'a str, String)>,
    order: Option<&'a str>,
    limit: Option<usize>,
}

impl<'a> Select<'a> {
    pub fn new(columns: &'a str) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    pub fn eq(mut self, column: &'a str, value: impl std::fmt::Display) -> Self {
        self.filters.push((column, format!("eq.{value}")));
        self
    }

    pub fn order(mut self, order: &'a str) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn params(&self) -> Vec<(&str, String)> {
        let mut params = vec![("select", self.columns.to_string())];
        params.extend(self.filters.iter().map(|(column, value)| (*column, value.clone())));
        if let Some(order) = self.order {
            params.push(("order", order.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

pub struct SupabaseClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let parsed = Url::parse(base_url).map_err(|_| ConfigError::Invalid {
            name: "SUPABASE_URL",
            value: base_url.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: "SUPABASE_URL",
                value: base_url.to_string(),
            }
            .into());
        }

        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Select<'_>,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .http
            .get(format!("{}/rest/v1/{}", self.base_url, table))
            .query(&query.params())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .header("X-Client-Info", CLIENT_INFO)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("❌ {} query failed with {}", table, status);
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RecordStore for SupabaseClient {
    async fn find_article(
        &self,
        key: ArticleKey,
        value: &str,
    ) -> Result<Option<KnowledgeArticle>, StoreError> {
        let query = Select::new(ARTICLE_COLUMNS)
            .eq(key.column(), value)
            .eq("published", true)
            .limit(1);
        let rows: Vec<KnowledgeArticle> = self.select(ARTICLES_TABLE, &query).await?;
        Ok(rows.into_iter().next())
    }

    async fn find_pet(&self, id: &str) -> Result<Option<Pet>, StoreError> {
        let query = Select::new(PET_COLUMNS).eq("id", id).limit(1);
        let rows: Vec<Pet> = self.select(PETS_TABLE, &query).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_reports(&self, limit: usize) -> Result<Vec<Report>, StoreError> {
        let query = Select::new("*").order("created_at.desc").limit(limit);
        self.select(REPORTS_TABLE, &query).await
    }
}
