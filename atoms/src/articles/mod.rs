// Re-export model types, the body parser and service functions
pub mod content;
pub mod model;
pub mod service;

pub use content::{lead_paragraph, parse_article_content, parse_inline, ContentBlock, InlineSpan};
pub use model::{ArticlePayload, ArticleSubmission, KnowledgeArticle, ARTICLE_COLUMNS};
pub use service::*;
