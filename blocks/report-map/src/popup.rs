use petskub_atoms::markup::{encode_uri_component, escape_html};
use petskub_atoms::reports::Report;

const UNKNOWN_LOCATION: &str = "ไม่ระบุสถานที่";
const UNKNOWN_PROVINCE: &str = "ไม่ระบุจังหวัด";
const UNKNOWN_DISTRICT: &str = "ไม่ระบุอำเภอ";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Link that opens the report in Google Maps. Exact coordinates win; a text
/// search on the place names is the fallback when only a location was typed.
pub fn google_maps_url(report: &Report) -> Option<String> {
    if let Some((lat, lng)) = report.coordinates() {
        return Some(format!("https://www.google.com/maps?q={lat},{lng}"));
    }

    let location = non_blank(report.location.as_deref())?;
    let query = [
        Some(location),
        non_blank(report.district.as_deref()),
        non_blank(report.province.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ");

    Some(format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        encode_uri_component(&query)
    ))
}

/// Popup body shown for a plotted report.
pub fn popup_html(report: &Report) -> String {
    let location = non_blank(report.location.as_deref()).unwrap_or(UNKNOWN_LOCATION);
    let province = non_blank(report.province.as_deref()).unwrap_or(UNKNOWN_PROVINCE);
    let district = non_blank(report.district.as_deref()).unwrap_or(UNKNOWN_DISTRICT);

    let mut html = String::from("<div class=\"report-popup\">");
    html.push_str(&format!("<strong>{}</strong>", escape_html(location)));
    html.push_str(&format!(
        "<div>{} · {}</div>",
        escape_html(province),
        escape_html(district)
    ));
    html.push_str(&format!(
        "<div class=\"report-status\">{}</div>",
        escape_html(report.status.label())
    ));
    if let Some((lat, lng)) = report.coordinates() {
        html.push_str(&format!("<div>lat {lat:.3}, lng {lng:.3}</div>"));
    }
    if let Some(href) = google_maps_url(report) {
        html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">เปิด Google Maps</a>",
            escape_html(&href)
        ));
    }
    html.push_str("</div>");
    html
}
