use super::model::{CreateReportPayload, ReportStatus, ReportSubmission};
use crate::validation::{check_bounds, char_len, Bounds, ValidationErrors};

const DISTRICT: Bounds = Bounds {
    min: 1,
    max: 100,
    too_short: "กรุณากรอกเขต/อำเภอ",
    too_long: "เขต/อำเภอต้องไม่เกิน 100 ตัวอักษร",
};

const LOCATION: Bounds = Bounds {
    min: 1,
    max: 200,
    too_short: "กรุณากรอกสถานที่",
    too_long: "สถานที่ต้องไม่เกิน 200 ตัวอักษร",
};

const DESCRIPTION_MAX: usize = 1000;

/// Check a report form; every failing field is returned.
pub fn validate_report(payload: &CreateReportPayload) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if payload.province.is_empty() {
        errors.push("province", "กรุณาเลือกจังหวัด");
    }
    check_bounds(&mut errors, "district", payload.district.trim(), &DISTRICT);
    check_bounds(&mut errors, "location", payload.location.trim(), &LOCATION);

    if let Some(description) = &payload.description {
        if char_len(description) > DESCRIPTION_MAX {
            errors.push("description", "รายละเอียดต้องไม่เกิน 1000 ตัวอักษร");
        }
    }

    match (payload.latitude, payload.longitude) {
        (None, None) => {}
        (Some(lat), Some(lng)) => {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                errors.push("latitude", "พิกัดละติจูดไม่ถูกต้อง");
            }
            if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
                errors.push("longitude", "พิกัดลองจิจูดไม่ถูกต้อง");
            }
        }
        _ => errors.push("coordinates", "กรุณาระบุพิกัดให้ครบทั้งละติจูดและลองจิจูด"),
    }

    errors.into_result()
}

/// Structured answers are stored as a tag line in front of the free text.
pub fn compose_description(payload: &CreateReportPayload) -> String {
    let mut tags = Vec::new();
    if let Some(species) = payload.species {
        tags.push(format!("ชนิด: {}", species.label()));
    }
    if let Some(condition) = payload.condition {
        tags.push(format!("สภาพ: {}", condition.label()));
    }
    if let Some(collar) = payload.collar {
        tags.push(format!("ปลอกคอ: {}", collar.label()));
    }

    let mut description = if tags.is_empty() {
        String::new()
    } else {
        format!("{}\n\n", tags.join(" | "))
    };
    description.push_str(payload.description.as_deref().unwrap_or(""));
    description
}

/// Validate a report form and shape the row the database accepts.
/// New reports always start as a single pending sighting.
pub fn prepare_report(
    payload: &CreateReportPayload,
    user_id: &str,
) -> Result<ReportSubmission, ValidationErrors> {
    validate_report(payload)?;

    let photo_urls: Vec<String> = payload
        .photo_urls
        .iter()
        .filter(|url| !url.trim().is_empty())
        .cloned()
        .collect();

    Ok(ReportSubmission {
        province: payload.province.clone(),
        district: payload.district.trim().to_string(),
        location: payload.location.trim().to_string(),
        description: compose_description(payload),
        latitude: payload.latitude,
        longitude: payload.longitude,
        cat_count: 1,
        status: ReportStatus::Pending,
        user_id: user_id.to_string(),
        photo_urls: (!photo_urls.is_empty()).then_some(photo_urls),
    })
}
