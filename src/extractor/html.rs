use scraper::{Html, Selector};
use url::Url;

use crate::models::PageMetadata;

// ── Extraction ─────────────────────────────────────────────────────────────

/// Parse `html` and collect its metadata. Relative icon and image links are
/// resolved against `base_url`.
pub fn extract_metadata(html: &str, base_url: &Url) -> PageMetadata {
    let document = Html::parse_document(html);

    let title = get_meta_property(&document, "og:title")
        .or_else(|| get_meta_any(&document, "twitter:title"))
        .or_else(|| get_title_tag(&document));

    let description = get_meta_property(&document, "og:description")
        .or_else(|| get_meta_name(&document, "description"))
        .or_else(|| get_meta_any(&document, "twitter:description"));

    let language = get_html_lang(&document)
        .or_else(|| get_meta_http_equiv(&document, "content-language"))
        .or_else(|| get_meta_property(&document, "og:locale"));

    let keywords = get_meta_name(&document, "keywords").and_then(|raw| split_keywords(&raw));

    let icon = get_link_href(&document, r#"link[rel~="icon"]"#)
        .or_else(|| get_link_href(&document, r#"link[rel~="apple-touch-icon"]"#))
        .and_then(|href| resolve(base_url, &href))
        .or_else(|| default_favicon(base_url));

    let image = get_meta_property(&document, "og:image")
        .or_else(|| get_meta_property(&document, "og:image:url"))
        .or_else(|| get_meta_any(&document, "twitter:image"))
        .or_else(|| get_meta_any(&document, "twitter:image:src"))
        .or_else(|| get_link_href(&document, r#"link[rel="image_src"]"#))
        .and_then(|src| resolve(base_url, &src));

    PageMetadata {
        title,
        language,
        keywords,
        description,
        icon,
        image,
    }
}

fn non_empty(s: &str) -> Option<String> {
    Some(s.trim().to_string()).filter(|s| !s.is_empty())
}

fn first_attr(doc: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    doc.select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .find_map(non_empty)
}

fn get_meta_property(doc: &Html, property: &str) -> Option<String> {
    first_attr(doc, &format!(r#"meta[property="{property}"]"#), "content")
}

fn get_meta_name(doc: &Html, name: &str) -> Option<String> {
    first_attr(doc, &format!(r#"meta[name="{name}" i]"#), "content")
}

/// Twitter cards show up under both `name=` and `property=` in the wild.
fn get_meta_any(doc: &Html, key: &str) -> Option<String> {
    get_meta_name(doc, key).or_else(|| get_meta_property(doc, key))
}

fn get_meta_http_equiv(doc: &Html, equiv: &str) -> Option<String> {
    first_attr(doc, &format!(r#"meta[http-equiv="{equiv}" i]"#), "content")
}

fn get_html_lang(doc: &Html) -> Option<String> {
    first_attr(doc, "html[lang]", "lang")
}

fn get_link_href(doc: &Html, selector: &str) -> Option<String> {
    first_attr(doc, selector, "href")
}

fn get_title_tag(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    doc.select(&selector)
        .next()
        .and_then(|el| non_empty(&el.text().collect::<String>()))
}

fn split_keywords(raw: &str) -> Option<Vec<String>> {
    let keywords: Vec<String> = raw.split(',').filter_map(non_empty).collect();
    Some(keywords).filter(|k| !k.is_empty())
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(String::from)
}

fn default_favicon(base: &Url) -> Option<String> {
    match base.scheme() {
        "http" | "https" => resolve(base, "/favicon.ico"),
        _ => None,
    }
}

// ── Unit tests ─────────────────────────────────────────────────────────────
