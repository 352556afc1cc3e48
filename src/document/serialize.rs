//! Encoding a [`Sitemap`] back into a `<urlset>` document.

use quick_xml::se::Serializer;
use serde::Serialize;

use super::error::ParseError;
use super::model::{Sitemap, UrlEntry};

/// Namespace of the sitemaps.org 0.9 protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Serialize)]
#[serde(rename = "urlset")]
struct UrlsetDocument<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "url")]
    urls: &'a [UrlEntry],
}

/// Serializes a sitemap as a `<urlset>` document with an XML declaration.
///
/// Absent optional fields are omitted; entries keep their order.
///
/// # Errors
///
/// Returns [`ParseError::Serialize`] if the serializer rejects the input.
pub fn to_urlset_xml(sitemap: &Sitemap) -> Result<String, ParseError> {
    let document = UrlsetDocument {
        xmlns: SITEMAP_NAMESPACE,
        urls: &sitemap.urls,
    };

    let mut body = String::new();
    let mut serializer = Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document
        .serialize(serializer)
        .map_err(|error| ParseError::serialize(error.to_string()))?;

    Ok(format!("{XML_DECLARATION}\n{body}\n"))
}
