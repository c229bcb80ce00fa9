use std::sync::LazyLock;

use regex::Regex;

use super::model::{ArticlePayload, ArticleSubmission};
use crate::validation::{
    check_bounds, check_optional_bounds, is_http_url, Bounds, ValidationErrors,
};

/// Column an article can be looked up by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleKey {
    Id,
    Slug,
}

impl ArticleKey {
    pub fn column(&self) -> &'static str {
        match self {
            ArticleKey::Id => "id",
            ArticleKey::Slug => "slug",
        }
    }

    pub fn other(&self) -> ArticleKey {
        match self {
            ArticleKey::Id => ArticleKey::Slug,
            ArticleKey::Slug => ArticleKey::Id,
        }
    }
}

pub fn is_uuid(value: &str) -> bool {
    value.len() == 36 && uuid::Uuid::try_parse(value).is_ok()
}

/// Shared links carry either the row id or the slug. Try the likely column
/// first, then the other one.
pub fn lookup_order(identifier: &str) -> [ArticleKey; 2] {
    let primary = if is_uuid(identifier) {
        ArticleKey::Id
    } else {
        ArticleKey::Slug
    };
    [primary, primary.other()]
}

static SLUG_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("Invalid slug filter pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace pattern"));
static DASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("Invalid dash pattern"));
static SLUG_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9-]+$").expect("Invalid slug shape pattern"));

/// Suggested URL slug for a title. Non-latin titles produce an empty slug
/// and the editor types one by hand.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let cleaned = SLUG_DISALLOWED.replace_all(&lowered, "");
    let dashed = WHITESPACE_RUN.replace_all(cleaned.trim(), "-");
    let collapsed = DASH_RUN.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

const TITLE: Bounds = Bounds {
    min: 10,
    max: 60,
    too_short: "หัวข้อควรมีอย่างน้อย 10 ตัวอักษร",
    too_long: "หัวข้อไม่ควรเกิน 60 ตัวอักษรเพื่อ SEO",
};
const META_TITLE: Bounds = Bounds {
    min: 10,
    max: 60,
    too_short: "Meta Title ควรมีอย่างน้อย 10 ตัวอักษร",
    too_long: "Meta Title ไม่ควรเกิน 60 ตัวอักษร",
};
const META_DESCRIPTION: Bounds = Bounds {
    min: 50,
    max: 160,
    too_short: "Meta Description ควรมีอย่างน้อย 50 ตัวอักษร",
    too_long: "Meta Description ไม่ควรเกิน 160 ตัวอักษร",
};
const SLUG: Bounds = Bounds {
    min: 5,
    max: 80,
    too_short: "URL ควรมีอย่างน้อย 5 ตัวอักษร",
    too_long: "URL ไม่ควรเกิน 80 ตัวอักษร",
};
const CONTENT: Bounds = Bounds {
    min: 100,
    max: 10_000,
    too_short: "เนื้อหาควรมีอย่างน้อย 100 ตัวอักษร",
    too_long: "เนื้อหาไม่ควรเกิน 10,000 ตัวอักษร",
};
const IMAGE_ALT: Bounds = Bounds {
    min: 10,
    max: 125,
    too_short: "Alt text ควรมีอย่างน้อย 10 ตัวอักษร",
    too_long: "Alt text ไม่ควรเกิน 125 ตัวอักษร",
};
const OG_TITLE: Bounds = Bounds {
    min: 0,
    max: 60,
    too_short: "",
    too_long: "OG Title ไม่ควรเกิน 60 ตัวอักษร",
};
const OG_DESCRIPTION: Bounds = Bounds {
    min: 0,
    max: 160,
    too_short: "",
    too_long: "OG Description ไม่ควรเกิน 160 ตัวอักษร",
};

fn check_optional_url(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        if !is_http_url(value) {
            errors.push(field, "กรุณาใส่ URL รูปภาพที่ถูกต้อง");
        }
    }
}

/// Check the article editor form. On success the slug is returned in its
/// stored (lowercase) form.
pub fn validate_article(payload: &ArticlePayload) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_bounds(&mut errors, "title", payload.title.trim(), &TITLE);
    check_optional_bounds(&mut errors, "meta_title", payload.meta_title.as_deref(), &META_TITLE);
    check_optional_bounds(
        &mut errors,
        "meta_description",
        payload.meta_description.as_deref(),
        &META_DESCRIPTION,
    );

    let slug = payload.slug.trim();
    let slug_errors = errors.errors.len();
    check_bounds(&mut errors, "slug", slug, &SLUG);
    if errors.errors.len() == slug_errors && !SLUG_SHAPE.is_match(slug) {
        errors.push("slug", "ใช้เฉพาะตัวอักษร a-z ตัวเลข และขีดกลาง (-)");
    }

    check_bounds(&mut errors, "content", payload.content.trim(), &CONTENT);
    if payload.category.is_empty() {
        errors.push("category", "กรุณาเลือกหมวดหมู่");
    }
    check_optional_url(&mut errors, "image_url", payload.image_url.as_deref());
    check_optional_bounds(&mut errors, "image_alt", payload.image_alt.as_deref(), &IMAGE_ALT);
    check_optional_bounds(&mut errors, "og_title", payload.og_title.as_deref(), &OG_TITLE);
    check_optional_bounds(
        &mut errors,
        "og_description",
        payload.og_description.as_deref(),
        &OG_DESCRIPTION,
    );
    check_optional_url(&mut errors, "og_image", payload.og_image.as_deref());

    errors.into_result()?;
    Ok(slug.to_lowercase())
}

/// Split the editor's comma-separated keyword field into trimmed, non-empty
/// keywords.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

fn filled(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate the editor form and shape the columns to store.
pub fn prepare_article(payload: &ArticlePayload) -> Result<ArticleSubmission, ValidationErrors> {
    let slug = validate_article(payload)?;
    let keywords = payload.keywords.as_deref().map(parse_keywords);

    Ok(ArticleSubmission {
        title: payload.title.trim().to_string(),
        meta_title: filled(payload.meta_title.as_deref()),
        meta_description: filled(payload.meta_description.as_deref()),
        keywords: keywords.filter(|k| !k.is_empty()),
        slug,
        content: payload.content.clone(),
        category: payload.category.clone(),
        image_url: filled(payload.image_url.as_deref()),
        image_alt: filled(payload.image_alt.as_deref()),
        og_title: filled(payload.og_title.as_deref()),
        og_description: filled(payload.og_description.as_deref()),
        og_image: filled(payload.og_image.as_deref()),
    })
}
