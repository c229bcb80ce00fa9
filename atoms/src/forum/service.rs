use super::model::CreateForumPostPayload;
use crate::validation::{check_bounds, is_http_url, Bounds, ValidationErrors};

pub const MAX_POST_IMAGES: usize = 4;

const TITLE: Bounds = Bounds {
    min: 5,
    max: 200,
    too_short: "หัวข้อต้องมีอย่างน้อย 5 ตัวอักษร",
    too_long: "หัวข้อต้องไม่เกิน 200 ตัวอักษร",
};

const CONTENT: Bounds = Bounds {
    min: 10,
    max: 5000,
    too_short: "เนื้อหาต้องมีอย่างน้อย 10 ตัวอักษร",
    too_long: "เนื้อหาต้องไม่เกิน 5000 ตัวอักษร",
};

pub fn validate_post(payload: &CreateForumPostPayload) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_bounds(&mut errors, "title", &payload.title, &TITLE);
    check_bounds(&mut errors, "content", &payload.content, &CONTENT);
    if payload.category.is_empty() {
        errors.push("category", "กรุณาเลือกหมวดหมู่");
    }

    if payload.image_urls.len() > MAX_POST_IMAGES {
        errors.push("image_urls", "อัพโหลดรูปได้สูงสุด 4 รูป");
    } else if payload.image_urls.iter().any(|url| !is_http_url(url)) {
        errors.push("image_urls", "URL รูปภาพไม่ถูกต้อง");
    }

    errors.into_result()
}
