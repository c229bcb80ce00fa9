use lambda_http::{http::StatusCode, Body, Error, Response};
use petskub_atoms::reports::ReportStatus;
use report_map_block::{build_overview, ReportFilter};

use crate::responses;
use crate::supabase::RecordStore;

/// Upper bound on rows pulled for the map; ungeotagged rows are dropped
/// afterwards, so `limit` is applied to plotted markers rather than here.
const MAX_REPORTS: usize = 500;

/// Query parameters of `GET /reports/map`, as received.
#[derive(Debug, Clone, Default)]
pub struct MapParams {
    pub limit: Option<usize>,
    pub status: Option<String>,
    pub q: Option<String>,
}

impl MapParams {
    /// `None` when `status` is not a known value. Empty and `all` mean any.
    fn filter(&self) -> Option<ReportFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(value) => Some(ReportStatus::parse(value)?),
        };
        Some(ReportFilter {
            status,
            query: self.q.clone(),
        })
    }
}

/// GET /reports/map?limit=N&status=S&q=TEXT
pub async fn handle_report_map<S: RecordStore + ?Sized>(
    store: &S,
    params: &MapParams,
) -> Result<Response<Body>, Error> {
    let Some(filter) = params.filter() else {
        tracing::warn!("Rejected report status filter {:?}", params.status);
        return responses::json_error(StatusCode::BAD_REQUEST, "Invalid status");
    };

    let reports = match store.list_reports(MAX_REPORTS).await {
        Ok(reports) => reports,
        Err(e) => {
            tracing::error!("Failed to list reports: {}", e);
            return responses::json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load reports");
        }
    };

    let overview = build_overview(&reports, &filter, params.limit);
    tracing::info!(
        "🗺️ Plotted {} of {} reports",
        overview.markers.len(),
        reports.len()
    );
    responses::json(StatusCode::OK, &overview)
}
