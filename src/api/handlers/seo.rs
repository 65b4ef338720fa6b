use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;

/// Public pages of the site, in sitemap order.
pub const PUBLIC_PAGES: &[(&str, &str, &str)] = &[
    ("/", "weekly", "1.0"),
    ("/services", "monthly", "0.8"),
    ("/announcements", "weekly", "0.9"),
    ("/gallery", "weekly", "0.7"),
    ("/watch-services", "weekly", "0.8"),
];

pub async fn robots_txt(State(state): State<AppState>) -> Response {
    let body = generate_robots_txt(state.settings.server.base_url());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    ).into_response()
}

pub async fn sitemap_xml(State(state): State<AppState>) -> Response {
    let body = generate_sitemap(state.settings.server.base_url());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        body,
    ).into_response()
}

pub fn generate_robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /admin\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
        base_url
    )
}

pub fn generate_sitemap(base_url: &str) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#);

    for (path, changefreq, priority) in PUBLIC_PAGES {
        xml.push_str("    <url>\n");
        xml.push_str(&format!("        <loc>{}{}</loc>\n", base_url, path));
        xml.push_str(&format!("        <changefreq>{}</changefreq>\n", changefreq));
        xml.push_str(&format!("        <priority>{}</priority>\n", priority));
        xml.push_str("    </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
