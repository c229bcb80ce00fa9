use petskub_atoms::reports::{Report, ReportStatus};
use serde::Serialize;

use crate::popup::popup_html;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Bangkok, used when nothing can be plotted.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 13.7563,
    lng: 100.5018,
};

const CLOSE_ZOOM: u8 = 14;
const WIDE_ZOOM: u8 = 11;
const CLOSE_ZOOM_MAX_POINTS: usize = 5;

/// One marker to put on the map.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub popup_html: String,
}

impl MarkerSpec {
    pub fn from_report(report: &Report) -> Option<Self> {
        let (lat, lng) = report.coordinates()?;
        Some(Self {
            id: report.id.clone(),
            lat,
            lng,
            popup_html: popup_html(report),
        })
    }
}

/// Which reports the map shows. The default shows everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub query: Option<String>,
}

impl ReportFilter {
    /// Status must match exactly; the query is a case-insensitive substring
    /// of "location district province".
    pub fn matches(&self, report: &Report) -> bool {
        if self.status.is_some_and(|status| status != report.status) {
            return false;
        }

        let needle = match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };
        let haystack = format!(
            "{} {} {}",
            report.location.as_deref().unwrap_or(""),
            report.district.as_deref().unwrap_or(""),
            report.province.as_deref().unwrap_or("")
        )
        .to_lowercase();
        haystack.contains(&needle)
    }
}

/// Report counts per status, over every fetched report.
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl StatusSummary {
    pub fn of(reports: &[Report]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.status {
                ReportStatus::Pending => summary.pending += 1,
                ReportStatus::InProgress => summary.in_progress += 1,
                ReportStatus::Resolved => summary.resolved += 1,
                ReportStatus::Unknown => {}
            }
        }
        summary
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapOverview {
    pub center: LatLng,
    pub zoom: u8,
    pub summary: StatusSummary,
    pub markers: Vec<MarkerSpec>,
}

/// Markers for every geotagged report passing `filter`, in input order, and
/// the initial view. The summary ignores the filter.
pub fn build_overview(
    reports: &[Report],
    filter: &ReportFilter,
    limit: Option<usize>,
) -> MapOverview {
    let markers: Vec<MarkerSpec> = reports
        .iter()
        .filter(|report| filter.matches(report))
        .filter_map(MarkerSpec::from_report)
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    let center = markers
        .first()
        .map(|m| LatLng {
            lat: m.lat,
            lng: m.lng,
        })
        .unwrap_or(DEFAULT_CENTER);
    let zoom = if markers.len() > CLOSE_ZOOM_MAX_POINTS {
        WIDE_ZOOM
    } else {
        CLOSE_ZOOM
    };

    MapOverview {
        center,
        zoom,
        summary: StatusSummary::of(reports),
        markers,
    }
}
