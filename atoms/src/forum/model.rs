use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CreateForumPostPayload {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}
