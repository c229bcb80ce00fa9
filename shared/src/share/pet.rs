use lambda_http::{Body, Error, Response};
use petskub_atoms::markup::encode_uri_component;
use petskub_atoms::media::pick_image;
use petskub_atoms::pets::Pet;

use super::html::{render_share_page, SharePage, PET_THEME};
use crate::responses;
use crate::supabase::RecordStore;

const NOT_FOUND_TITLE: &str = "Petskub - โปรไฟล์สัตว์รอบ้าน";
const NOT_FOUND_DESCRIPTION: &str = "ช่วยแชร์ให้น้อง ๆ จาก Petskub ได้พบครอบครัวใหม่ที่อบอุ่น";
const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1518791841217-8f162f1e1131?auto=format&fit=crop&w=1200&q=80";

const STORAGE_PREFIX: &str = "storage/v1/object/public";
const SUMMARY_MAX: usize = 180;
const SUMMARY_CUT: usize = 177;

/// Collapse whitespace and cap the story for a preview card.
pub fn summarize(story: Option<&str>) -> String {
    let normalized = story
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if normalized.chars().count() <= SUMMARY_MAX {
        return normalized;
    }
    let cut: String = normalized.chars().take(SUMMARY_CUT).collect();
    format!("{cut}...")
}

/// Pet photos are stored as full URLs, site paths, or object paths inside
/// Supabase public storage. Crawlers need an absolute URL.
pub fn ensure_absolute_url(value: Option<&str>, site_url: &str, supabase_url: &str) -> String {
    let Some(trimmed) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return DEFAULT_IMAGE.to_string();
    };

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return trimmed.to_string();
    }
    if trimmed.starts_with("//") {
        return format!("https:{trimmed}");
    }
    if trimmed.starts_with('/') {
        return format!("{site_url}{trimmed}");
    }

    let storage = supabase_url.trim_end_matches('/');
    if storage.is_empty() {
        return format!("{site_url}/{trimmed}");
    }
    if trimmed.starts_with(STORAGE_PREFIX) {
        format!("{storage}/{trimmed}")
    } else {
        format!("{storage}/{STORAGE_PREFIX}/{trimmed}")
    }
}

fn description(pet: &Pet) -> String {
    let story = summarize(pet.story.as_deref());
    if !story.is_empty() {
        return story;
    }

    let mut facts = vec![format!("สถานะ: {}", pet.status_label())];
    if let Some(age) = pet.age() {
        facts.push(format!("อายุ: {age}"));
    }
    if let Some(area) = pet.area() {
        facts.push(format!("พื้นที่: {area}"));
    }
    if let Some(health) = pet.health_status() {
        facts.push(format!("สุขภาพ: {health}"));
    }
    facts.join(" • ")
}

/// Preview content for a pet profile link.
pub fn pet_page(pet: Option<&Pet>, identifier: &str, site_url: &str, supabase_url: &str) -> SharePage {
    let Some(pet) = pet else {
        return SharePage {
            title: NOT_FOUND_TITLE.to_string(),
            description: NOT_FOUND_DESCRIPTION.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            image_alt: NOT_FOUND_TITLE.to_string(),
            url: format!("{}/adopt?pet={}", site_url, encode_uri_component(identifier)),
        };
    };

    let name = pet.display_name();
    SharePage {
        title: format!("ช่วยให้น้อง{name}ได้บ้าน | Petskub"),
        description: description(pet),
        image: ensure_absolute_url(pick_image(pet.image_url.as_ref()), site_url, supabase_url),
        image_alt: format!("โปรไฟล์ของน้อง{name}"),
        url: format!("{}/adopt?pet={}", site_url, encode_uri_component(&pet.id)),
    }
}

/// GET /share/pet/{id} and /api/pet-share?id=
pub async fn handle_pet_share<S: RecordStore + ?Sized>(
    store: &S,
    identifier: Option<&str>,
    site_url: &str,
    supabase_url: &str,
) -> Result<Response<Body>, Error> {
    let Some(identifier) = identifier.map(str::trim).filter(|id| !id.is_empty()) else {
        return responses::bad_request("Missing pet id");
    };

    let pet = match store.find_pet(identifier).await {
        Ok(pet) => pet,
        Err(e) => {
            tracing::error!("pet-share: lookup failed for {}: {}", identifier, e);
            None
        }
    };
    if pet.is_none() {
        tracing::warn!("pet-share: no pet {}, using fallback", identifier);
    }

    let page = pet_page(pet.as_ref(), identifier, site_url, supabase_url);
    responses::html(render_share_page(&page, &PET_THEME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use lambda_http::http::StatusCode;
    use petskub_atoms::media::ImageSource;

    const SITE: &str = "https://petskub.app";
    const SUPABASE: &str = "https://abc.supabase.co";

    fn pet() -> Pet {
        Pet {
            id: "cat-42".into(),
            name: Some("ส้มจี๊ด".into()),
            age: Some("2 ปี".into()),
            province: Some("เชียงใหม่".into()),
            district: Some("เมือง".into()),
            health_status: Some("ทำหมันแล้ว".into()),
            image_url: Some(ImageSource::Many(vec!["pets/cat-42.jpg".into()])),
            ..Default::default()
        }
    }

    #[test]
    fn summarize_collapses_and_truncates() {
        assert_eq!(summarize(None), "");
        assert_eq!(summarize(Some("  น้อง\n\nขี้อ้อน   มาก ")), "น้อง ขี้อ้อน มาก");

        let exact = "ก".repeat(180);
        assert_eq!(summarize(Some(&exact)), exact);

        let long = "ก".repeat(181);
        let summary = summarize(Some(&long));
        assert_eq!(summary.chars().count(), 180);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn absolute_url_rules() {
        let abs = |v| ensure_absolute_url(Some(v), SITE, SUPABASE);
        assert_eq!(abs("HTTPS://cdn.example/x.jpg"), "HTTPS://cdn.example/x.jpg");
        assert_eq!(abs("//cdn.example/x.jpg"), "https://cdn.example/x.jpg");
        assert_eq!(abs("/images/x.jpg"), "https://petskub.app/images/x.jpg");
        assert_eq!(
            abs("pets/x.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/pets/x.jpg"
        );
        assert_eq!(
            abs("storage/v1/object/public/pets/x.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/pets/x.jpg"
        );
        assert_eq!(ensure_absolute_url(Some("pets/x.jpg"), SITE, ""), "https://petskub.app/pets/x.jpg");
        assert_eq!(ensure_absolute_url(None, SITE, SUPABASE), DEFAULT_IMAGE);
    }

    #[test]
    fn found_pet_page() {
        let p = pet();
        let page = pet_page(Some(&p), "cat-42", SITE, SUPABASE);
        assert_eq!(page.title, "ช่วยให้น้องส้มจี๊ดได้บ้าน | Petskub");
        assert_eq!(page.image_alt, "โปรไฟล์ของน้องส้มจี๊ด");
        assert_eq!(page.url, "https://petskub.app/adopt?pet=cat-42");
        assert_eq!(
            page.image,
            "https://abc.supabase.co/storage/v1/object/public/pets/cat-42.jpg"
        );
        assert_eq!(
            page.description,
            "สถานะ: กำลังหาบ้าน • อายุ: 2 ปี • พื้นที่: เชียงใหม่ · เมือง • สุขภาพ: ทำหมันแล้ว"
        );
    }

    #[test]
    fn story_beats_fact_line() {
        let mut p = pet();
        p.story = Some("เจอข้างถนน   ตอนฝนตก".into());
        p.is_adopted = Some(true);
        assert_eq!(pet_page(Some(&p), "cat-42", SITE, SUPABASE).description, "เจอข้างถนน ตอนฝนตก");

        p.story = None;
        p.age = None;
        p.province = None;
        p.district = None;
        p.health_status = None;
        assert_eq!(
            pet_page(Some(&p), "cat-42", SITE, SUPABASE).description,
            "สถานะ: ได้รับการรับเลี้ยงแล้ว"
        );
    }

    #[test]
    fn unknown_pet_gets_generic_copy() {
        let page = pet_page(None, "ghost id", SITE, SUPABASE);
        assert_eq!(page.title, NOT_FOUND_TITLE);
        assert_eq!(page.description, NOT_FOUND_DESCRIPTION);
        assert_eq!(page.image, DEFAULT_IMAGE);
        assert_eq!(page.url, "https://petskub.app/adopt?pet=ghost%20id");
    }

    #[tokio::test]
    async fn handler_renders_and_rejects() {
        let store = MemoryStore::new().with_pet(pet());

        let resp = handle_pet_share(&store, Some("cat-42"), SITE, SUPABASE).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let Body::Text(html) = resp.body() else {
            panic!("expected text body");
        };
        assert!(html.contains("ช่วยให้น้องส้มจี๊ดได้บ้าน | Petskub"));
        assert!(html.contains("background: #fff5ec;"));

        let resp = handle_pet_share(&store, None, SITE, SUPABASE).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_errors_render_fallback() {
        let store = MemoryStore::new().failing();
        let resp = handle_pet_share(&store, Some("cat-42"), SITE, SUPABASE).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let Body::Text(html) = resp.body() else {
            panic!("expected text body");
        };
        assert!(html.contains(NOT_FOUND_TITLE));
    }
}
