//! Turning a Nominatim reverse-geocode reply into the report form's
//! province, district and location fields.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// The 77 provinces, Bangkok first, then in Thai alphabetical order.
pub const THAI_PROVINCES: &[&str] = &[
    "กรุงเทพมหานคร",
    "กระบี่",
    "กาญจนบุรี",
    "กาฬสินธุ์",
    "กำแพงเพชร",
    "ขอนแก่น",
    "จันทบุรี",
    "ฉะเชิงเทรา",
    "ชลบุรี",
    "ชัยนาท",
    "ชัยภูมิ",
    "ชุมพร",
    "เชียงราย",
    "เชียงใหม่",
    "ตรัง",
    "ตราด",
    "ตาก",
    "นครนายก",
    "นครปฐม",
    "นครพนม",
    "นครราชสีมา",
    "นครศรีธรรมราช",
    "นครสวรรค์",
    "นนทบุรี",
    "นราธิวาส",
    "น่าน",
    "บึงกาฬ",
    "บุรีรัมย์",
    "ปทุมธานี",
    "ประจวบคีรีขันธ์",
    "ปราจีนบุรี",
    "ปัตตานี",
    "พระนครศรีอยุธยา",
    "พะเยา",
    "พังงา",
    "พัทลุง",
    "พิจิตร",
    "พิษณุโลก",
    "เพชรบุรี",
    "เพชรบูรณ์",
    "แพร่",
    "ภูเก็ต",
    "มหาสารคาม",
    "มุกดาหาร",
    "แม่ฮ่องสอน",
    "ยโสธร",
    "ยะลา",
    "ร้อยเอ็ด",
    "ระนอง",
    "ระยอง",
    "ราชบุรี",
    "ลพบุรี",
    "ลำปาง",
    "ลำพูน",
    "เลย",
    "ศรีสะเกษ",
    "สกลนคร",
    "สงขลา",
    "สตูล",
    "สมุทรปราการ",
    "สมุทรสงคราม",
    "สมุทรสาคร",
    "สระแก้ว",
    "สระบุรี",
    "สิงห์บุรี",
    "สุโขทัย",
    "สุพรรณบุรี",
    "สุราษฎร์ธานี",
    "สุรินทร์",
    "หนองคาย",
    "หนองบัวลำภู",
    "อ่างทอง",
    "อำนาจเจริญ",
    "อุดรธานี",
    "อุตรดิตถ์",
    "อุทัยธานี",
    "อุบลราชธานี",
];

static LEADING_POSTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9]{5}\s*[-,]?\s*").expect("valid regex"));
static POSTCODE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(รหัสไปรษณีย์|zipcode)\s*").expect("valid regex"));
static TRAILING_COUNTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),?\s*(ประเทศไทย|thailand)\s*$").expect("valid regex"));
static COUNTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(ประเทศไทย|thailand)$").expect("valid regex"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static HOUSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,4}/").expect("valid regex"));
static STREET_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,5}\s").expect("valid regex"));
static DISTRICT_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(เขต|อำเภอ|แขวง|ตำบล|อ\.|ต\.)").expect("valid regex"));
static LABELLED_DISTRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[0-9]{5}\s*,?\s*)?(เขต|อำเภอ|แขวง|ตำบล|อ\.|ต\.)\s*([^,]+)").expect("valid regex")
});

const MAX_FALLBACK_CHARS: usize = 40;

fn is_country(value: &str) -> bool {
    COUNTRY.is_match(value)
}

fn is_province(value: &str) -> bool {
    THAI_PROVINCES.contains(&value)
}

fn mentions_province(value: &str) -> bool {
    THAI_PROVINCES.iter().any(|province| value.contains(province))
}

/// Strip postcode noise and a trailing country from a district candidate.
/// Purely numeric or single-character leftovers are rejected.
pub fn clean_district(value: &str) -> Option<String> {
    let value = LEADING_POSTCODE.replace(value.trim(), "");
    let value = POSTCODE_LABEL.replace(&value, "");
    let value = TRAILING_COUNTRY.replace(value.trim(), "");
    let value = value.trim();

    if value.chars().count() <= 1 || DIGITS.is_match(value) {
        return None;
    }
    Some(value.to_string())
}

/// Best district guess from the comma-separated parts of a display name.
pub fn district_from_parts(parts: &[&str]) -> Option<String> {
    let labelled = parts
        .iter()
        .find(|part| DISTRICT_KEYWORD.is_match(part))
        .and_then(|part| clean_district(part))
        .filter(|cleaned| !is_country(cleaned));
    if labelled.is_some() {
        return labelled;
    }

    // Addresses run small to large, so the part before the province is
    // usually the district.
    if let Some(index) = parts.iter().position(|part| mentions_province(part)) {
        if index > 0 {
            if let Some(cleaned) = clean_district(parts[index - 1]).filter(|c| !is_province(c)) {
                return Some(cleaned);
            }
        }
    }

    let fallback = parts.iter().map(|part| part.trim()).find(|part| {
        !part.is_empty()
            && !DIGITS.is_match(part)
            && !HOUSE_NUMBER.is_match(part)
            && !STREET_NUMBER.is_match(part)
            && !is_country(part)
            && !mentions_province(part)
            && part.chars().count() <= MAX_FALLBACK_CHARS
    });
    if let Some(cleaned) = fallback.and_then(clean_district) {
        return Some(cleaned);
    }

    parts
        .iter()
        .filter_map(|part| clean_district(part))
        .find(|cleaned| !is_country(cleaned) && !is_province(cleaned))
}

/// The `address` object of a Nominatim reply. Only the fields used here.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NominatimAddress {
    pub district: Option<String>,
    pub county: Option<String>,
    pub city_district: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub suburb: Option<String>,
    pub hamlet: Option<String>,
    pub municipality: Option<String>,
    pub state_district: Option<String>,
    pub state: Option<String>,
}

impl NominatimAddress {
    /// First non-blank field, from most to least specific.
    fn district(&self) -> Option<&str> {
        [
            &self.district,
            &self.county,
            &self.city_district,
            &self.city,
            &self.town,
            &self.village,
            &self.suburb,
            &self.hamlet,
            &self.municipality,
            &self.state_district,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .find(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ReverseGeocode {
    pub display_name: Option<String>,
    pub address: NominatimAddress,
}

/// Form fields filled in from a reverse-geocode reply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeocodedPlace {
    pub province: Option<String>,
    pub district: Option<String>,
    pub location: String,
}

fn district_from_display_name(display_name: &str) -> Option<String> {
    if let Some(caps) = LABELLED_DISTRICT.captures(display_name) {
        let candidate = format!("{} {}", &caps[1], caps[2].trim());
        return clean_district(&candidate);
    }
    let parts: Vec<&str> = display_name
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    district_from_parts(&parts)
}

fn province_from_display_name(display_name: &str) -> Option<String> {
    THAI_PROVINCES
        .iter()
        .find(|province| display_name.split(',').any(|part| part.contains(*province)))
        .map(|province| province.to_string())
}

/// Province comes from `address.state`. District comes from the address
/// fields, and from the display name only when none of them is set. The
/// location is the display name, or the coordinates when there is none.
pub fn resolve_place(reply: &ReverseGeocode, lat: f64, lng: f64) -> GeocodedPlace {
    let display_name = reply
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let mut province = reply
        .address
        .state
        .as_deref()
        .map(str::trim)
        .filter(|state| !state.is_empty())
        .map(str::to_string);
    let mut district = reply.address.district().map(|d| d.trim().to_string());

    if let Some(name) = display_name.filter(|_| district.is_none()) {
        district = district_from_display_name(name);
        if province.is_none() && !LABELLED_DISTRICT.is_match(name) {
            province = province_from_display_name(name);
        }
    }

    GeocodedPlace {
        province,
        district,
        location: display_name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{lat:.5}, {lng:.5}")),
    }
}
