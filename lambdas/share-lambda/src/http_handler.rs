use std::sync::Arc;

use lambda_http::http::header::{HeaderValue, VARY};
use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use percent_encoding::percent_decode_str;
use petskub_shared::share::{handle_article_share, handle_pet_share, resolve_site_url};
use petskub_shared::{articles, reports, responses, AppState, RecordStore};

fn with_cors_headers(mut resp: Response<Body>, allowed_origin: &str) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_str(allowed_origin).unwrap_or_else(|_| HeaderValue::from_static("*")),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers.append(VARY, HeaderValue::from_static("Origin"));

    resp
}

fn finalize_response(
    resp: Result<Response<Body>, Error>,
    allowed_origin: &str,
) -> Result<Response<Body>, Error> {
    resp.map(|r| with_cors_headers(r, allowed_origin))
}

fn decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Query parameter from the API Gateway event, or from the raw URI when the
/// request did not come through a gateway.
fn query_param(event: &Request, name: &str) -> Option<String> {
    if let Some(value) = event
        .query_string_parameters_ref()
        .and_then(|params| params.first(name))
    {
        return Some(value.to_string());
    }

    event.uri().query()?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (decode(key) == name).then(|| decode(&value.replace('+', " ")))
    })
}

enum Route {
    ArticleShare(Option<String>),
    PetShare(Option<String>),
    ArticleContent(String),
    ReportMap,
}

fn route(parts: &[&str], query_id: Option<String>) -> Option<Route> {
    let path_id = |rest: &[&str]| (!rest.is_empty()).then(|| decode(&rest.join("/")));

    match parts {
        ["share", "article", rest @ ..] => Some(Route::ArticleShare(query_id.or_else(|| path_id(rest)))),
        ["api", "article-share"] => Some(Route::ArticleShare(query_id)),
        ["share", "pet", rest @ ..] => Some(Route::PetShare(query_id.or_else(|| path_id(rest)))),
        ["api", "pet-share"] => Some(Route::PetShare(query_id)),
        ["articles", identifier, "content"] => Some(Route::ArticleContent(decode(identifier))),
        ["reports", "map"] => Some(Route::ReportMap),
        _ => None,
    }
}

/// Main Lambda handler - share previews and the public read endpoints
pub(crate) async fn function_handler<S: RecordStore>(
    event: Request,
    state: Arc<AppState<S>>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let allowed_origin = state.config.cors_origin.as_str();
    tracing::info!("🚀 Share Lambda invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if *method == Method::OPTIONS {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp, allowed_origin));
    }

    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let Some(route) = route(&parts, query_param(&event, "id")) else {
        tracing::warn!("No route for {} {}", method, path);
        return finalize_response(not_found(), allowed_origin);
    };

    if *method != Method::GET {
        return finalize_response(
            responses::json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            allowed_origin,
        );
    }

    let store = &state.store;
    let resp = match route {
        Route::ArticleShare(id) => {
            let site_url = resolve_site_url(state.config.site_url.as_deref(), event.headers());
            handle_article_share(store, id.as_deref(), &site_url).await
        }
        Route::PetShare(id) => {
            let site_url = resolve_site_url(state.config.site_url.as_deref(), event.headers());
            handle_pet_share(store, id.as_deref(), &site_url, &state.config.supabase_url).await
        }
        Route::ArticleContent(identifier) => {
            articles::handle_article_content(store, &identifier).await
        }
        Route::ReportMap => {
            let params = reports::MapParams {
                limit: query_param(&event, "limit").and_then(|v| v.trim().parse::<usize>().ok()),
                status: query_param(&event, "status"),
                q: query_param(&event, "q"),
            };
            reports::handle_report_map(store, &params).await
        }
    };

    finalize_response(resp, allowed_origin)
}

fn not_found() -> Result<Response<Body>, Error> {
    responses::json_error(StatusCode::NOT_FOUND, "Not found")
}
