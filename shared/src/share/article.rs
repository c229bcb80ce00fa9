use lambda_http::{Body, Error, Response};
use petskub_atoms::articles::KnowledgeArticle;
use petskub_atoms::markup::encode_uri_component;
use petskub_atoms::media::pick_image;

use super::html::{render_share_page, SharePage, ARTICLE_THEME};
use crate::articles::get_published_article;
use crate::responses;
use crate::supabase::RecordStore;

const DEFAULT_TITLE: &str = "Petskub - บทความ";
const DEFAULT_DESCRIPTION: &str =
    "สำรวจบทความแมวจากชุมชน Petskub ช่วยกันดูแลน้องแมวให้มีชีวิตที่ดีขึ้น";
const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1543852786-1cf6624b9987?auto=format&fit=crop&w=1200&q=80";

fn filled(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Preview content for an article link. `article` is `None` when nothing
/// published matched, in which case generic copy is used.
pub fn article_page(article: Option<&KnowledgeArticle>, identifier: &str, site_url: &str) -> SharePage {
    let slug = article
        .and_then(|a| filled(a.slug.as_deref()))
        .unwrap_or(identifier);
    let url = format!("{}/knowledge/{}", site_url, encode_uri_component(slug));

    let title = article
        .and_then(|a| {
            filled(a.og_title.as_deref())
                .or(filled(a.meta_title.as_deref()))
                .or(filled(Some(a.title.as_str())))
        })
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let description = article
        .and_then(|a| filled(a.og_description.as_deref()).or(filled(a.meta_description.as_deref())))
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();

    let image = article
        .and_then(|a| pick_image(a.og_image.as_ref()).or(pick_image(a.image_url.as_ref())))
        .unwrap_or(DEFAULT_IMAGE)
        .to_string();

    let image_alt = article
        .and_then(|a| filled(a.image_alt.as_deref()).or(filled(Some(a.title.as_str()))))
        .map(str::to_string)
        .unwrap_or_else(|| title.clone());

    SharePage {
        title,
        description,
        image,
        image_alt,
        url,
    }
}

/// GET /share/article/{id} and /api/article-share?id=
pub async fn handle_article_share<S: RecordStore + ?Sized>(
    store: &S,
    identifier: Option<&str>,
    site_url: &str,
) -> Result<Response<Body>, Error> {
    let Some(identifier) = identifier.map(str::trim).filter(|id| !id.is_empty()) else {
        return responses::bad_request("Missing article id");
    };

    let article = match get_published_article(store, identifier).await {
        Ok(article) => article,
        Err(e) => {
            tracing::error!("article-share: lookup failed for {}: {}", identifier, e);
            None
        }
    };
    if article.is_none() {
        tracing::warn!("article-share: no published article for {}, using fallback", identifier);
    }

    let page = article_page(article.as_ref(), identifier, site_url);
    responses::html(render_share_page(&page, &ARTICLE_THEME))
}
