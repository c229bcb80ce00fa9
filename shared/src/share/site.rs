use lambda_http::http::HeaderMap;

pub const FALLBACK_SITE: &str = "https://baanpets.netlify.app";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Public origin of the web app, without a trailing slash. Configuration
/// wins, then the forwarded host of this request.
pub fn resolve_site_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    let site = match configured.map(str::trim).filter(|s| !s.is_empty()) {
        Some(site) if site.starts_with("http") => site.to_string(),
        Some(site) => format!("https://{site}"),
        None => match header(headers, "x-forwarded-host").or_else(|| header(headers, "host")) {
            Some(host) => {
                let proto = header(headers, "x-forwarded-proto").unwrap_or("https");
                format!("{proto}://{host}")
            }
            None => FALLBACK_SITE.to_string(),
        },
    };
    site.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn configured_site_gets_scheme_and_loses_slash() {
        let h = headers(&[("host", "ignored.example")]);
        assert_eq!(resolve_site_url(Some("petskub.app/"), &h), "https://petskub.app");
        assert_eq!(
            resolve_site_url(Some("http://localhost:3000"), &h),
            "http://localhost:3000"
        );
    }

    #[test]
    fn forwarded_headers_when_unconfigured() {
        let h = headers(&[
            ("x-forwarded-host", "share.petskub.app"),
            ("x-forwarded-proto", "http"),
            ("host", "lambda.internal"),
        ]);
        assert_eq!(resolve_site_url(None, &h), "http://share.petskub.app");

        let h = headers(&[("host", "petskub.app")]);
        assert_eq!(resolve_site_url(Some("  "), &h), "https://petskub.app");
    }

    #[test]
    fn fallback_site_without_any_host() {
        assert_eq!(resolve_site_url(None, &HeaderMap::new()), FALLBACK_SITE);
    }
}
