use lambda_http::{http::StatusCode, Body, Error, Response};
use petskub_atoms::articles::{
    is_uuid, lead_paragraph, lookup_order, parse_article_content, ArticleKey, ContentBlock,
    KnowledgeArticle,
};
use serde::Serialize;

use crate::error::StoreError;
use crate::responses;
use crate::supabase::RecordStore;

/// Published article by id or slug. A shared link may carry either, so the
/// likely column is tried first and the other one on a miss. The id column
/// only holds UUIDs, so it is skipped for anything else.
pub async fn get_published_article<S: RecordStore + ?Sized>(
    store: &S,
    identifier: &str,
) -> Result<Option<KnowledgeArticle>, StoreError> {
    let mut failure = None;

    for key in lookup_order(identifier) {
        if key == ArticleKey::Id && !is_uuid(identifier) {
            continue;
        }
        match store.find_article(key, identifier).await {
            Ok(Some(article)) => return Ok(Some(article)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Article lookup by {} failed: {}", key.column(), e);
                failure = Some(e);
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleContent {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub category: Option<String>,
    pub blocks: Vec<ContentBlock>,
    pub lead_paragraph: Option<String>,
}

impl ArticleContent {
    pub fn from_article(article: KnowledgeArticle) -> Self {
        let blocks = parse_article_content(article.content.as_deref().unwrap_or_default());
        let lead = lead_paragraph(&blocks).map(|(_, text)| text.to_string());
        Self {
            id: article.id,
            slug: article.slug,
            title: article.title,
            category: article.category,
            blocks,
            lead_paragraph: lead,
        }
    }
}

/// GET /articles/{slug_or_id}/content
pub async fn handle_article_content<S: RecordStore + ?Sized>(
    store: &S,
    identifier: &str,
) -> Result<Response<Body>, Error> {
    match get_published_article(store, identifier).await {
        Ok(Some(article)) => {
            tracing::info!("📖 Serving article {}", article.id);
            responses::json(StatusCode::OK, &ArticleContent::from_article(article))
        }
        Ok(None) => responses::json_error(StatusCode::NOT_FOUND, "Article not found"),
        Err(e) => {
            tracing::error!("Failed to load article {}: {}", identifier, e);
            responses::json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load article")
        }
    }
}
