use petskub_atoms::markup::escape_html;

/// What a link preview shows, before escaping.
#[derive(Debug, Clone, PartialEq)]
pub struct SharePage {
    pub title: String,
    pub description: String,
    pub image: String,
    pub image_alt: String,
    /// Canonical page the visitor is sent on to.
    pub url: String,
}

pub struct Theme {
    pub background: &'static str,
    pub text: &'static str,
    pub link: &'static str,
    pub redirect_note: &'static str,
}

pub const ARTICLE_THEME: Theme = Theme {
    background: "#f7f5ff",
    text: "#2d2a44",
    link: "#6c5ce7",
    redirect_note: "กำลังพาคุณไปยังบทความ...",
};

pub const PET_THEME: Theme = Theme {
    background: "#fff5ec",
    text: "#2b1f18",
    link: "#f97316",
    redirect_note: "กำลังพาไปยังโปรไฟล์สัตว์เลี้ยง...",
};

const MANUAL_LINK: &str = "คลิกที่นี่หากไม่ได้ถูกนำทางอัตโนมัติ";

/// Full HTML document: preview meta tags for crawlers, then an immediate
/// redirect for people.
pub fn render_share_page(page: &SharePage, theme: &Theme) -> String {
    let title = escape_html(&page.title);
    let description = escape_html(&page.description);
    let image = escape_html(&page.image);
    let image_alt = escape_html(&page.image_alt);
    let url = escape_html(&page.url);

    format!(
        r#"<!DOCTYPE html>
<html lang="th">
  <head>
    <meta charset="utf-8" />
    <title>{title}</title>
    <link rel="canonical" href="{url}" />
    <meta name="description" content="{description}" />

    <meta property="og:type" content="article" />
    <meta property="og:title" content="{title}" />
    <meta property="og:description" content="{description}" />
    <meta property="og:image" content="{image}" />
    <meta property="og:image:alt" content="{image_alt}" />
    <meta property="og:url" content="{url}" />

    <meta name="twitter:card" content="summary_large_image" />
    <meta name="twitter:title" content="{title}" />
    <meta name="twitter:description" content="{description}" />
    <meta name="twitter:image" content="{image}" />

    <meta http-equiv="refresh" content="0; url={url}" />
    <script>window.location.replace("{url}");</script>
    <style>
      body {{
        font-family: 'Prompt', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
        background: {background};
        color: {text};
        display: flex;
        align-items: center;
        justify-content: center;
        min-height: 100vh;
        margin: 0;
        padding: 24px;
        text-align: center;
      }}
      a {{
        color: {link};
      }}
    </style>
  </head>
  <body>
    <div>
      <h1>{title}</h1>
      <p>{note}</p>
      <p><a href="{url}">{manual}</a></p>
    </div>
  </body>
</html>"#,
        background = theme.background,
        text = theme.text,
        link = theme.link,
        note = theme.redirect_note,
        manual = MANUAL_LINK,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> SharePage {
        SharePage {
            title: "ดูแลแมว <ฉบับย่อ>".into(),
            description: "\"quoted\" & more".into(),
            image: "https://cdn.petskub.app/a.jpg?w=1&h=2".into(),
            image_alt: "แมว".into(),
            url: "https://petskub.app/knowledge/cat-care".into(),
        }
    }

    #[test]
    fn carries_preview_tags_and_redirect() {
        let html = render_share_page(&page(), &ARTICLE_THEME);
        assert!(html.contains(r#"<meta property="og:url" content="https://petskub.app/knowledge/cat-care" />"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image" />"#));
        assert!(html.contains(r#"content="0; url=https://petskub.app/knowledge/cat-care""#));
        assert!(html.contains(r#"window.location.replace("https://petskub.app/knowledge/cat-care")"#));
        assert!(html.contains("background: #f7f5ff;"));
        assert!(html.contains("กำลังพาคุณไปยังบทความ..."));
    }

    #[test]
    fn escapes_every_value() {
        let html = render_share_page(&page(), &PET_THEME);
        assert!(html.contains("<title>ดูแลแมว &lt;ฉบับย่อ&gt;</title>"));
        assert!(html.contains("&quot;quoted&quot; &amp; more"));
        assert!(html.contains("a.jpg?w=1&amp;h=2"));
        assert!(!html.contains("<ฉบับย่อ>"));
        assert!(html.contains("color: #f97316;"));
    }
}
