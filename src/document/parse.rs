//! Root classification and decoding of sitemap XML.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::error::{DocumentKind, ParseError};
use super::model::{Sitemap, SitemapIndex};

/// A classified sitemap document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// `<urlset>` root.
    Urlset(Sitemap),
    /// `<sitemapindex>` root.
    Index(SitemapIndex),
}

impl Document {
    /// Which shape this document has.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Urlset(_) => DocumentKind::Urlset,
            Self::Index(_) => DocumentKind::SitemapIndex,
        }
    }
}

/// Parses bytes as a `<urlset>` document.
///
/// # Errors
///
/// - [`ParseError::EmptyDocument`] when `bytes` is empty
/// - [`ParseError::UnexpectedRoot`] when the root is not `<urlset>` or the XML is malformed
pub fn parse_sitemap(bytes: &[u8]) -> Result<Sitemap, ParseError> {
    parse_expected(bytes, DocumentKind::Urlset)
}

/// Parses bytes as a `<sitemapindex>` document.
///
/// # Errors
///
/// - [`ParseError::EmptyDocument`] when `bytes` is empty
/// - [`ParseError::UnexpectedRoot`] when the root is not `<sitemapindex>` or the XML is malformed
pub fn parse_sitemap_index(bytes: &[u8]) -> Result<SitemapIndex, ParseError> {
    parse_expected(bytes, DocumentKind::SitemapIndex)
}

/// Classifies bytes by root element and decodes the matching shape.
///
/// Empty or element-less input fails with an `EOF` reason; any root other
/// than `<urlset>` or `<sitemapindex>` is a parse failure.
///
/// # Errors
///
/// Returns [`ParseError::UnexpectedRoot`] for anything that is not one of the
/// two recognized documents.
#[instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn parse_document(bytes: &[u8]) -> Result<Document, ParseError> {
    let root = root_element(bytes)?;
    debug!(root = %root, "classified document root");

    if root == DocumentKind::Urlset.root_element() {
        decode(bytes).map(Document::Urlset)
    } else if root == DocumentKind::SitemapIndex.root_element() {
        decode(bytes).map(Document::Index)
    } else {
        Err(ParseError::unexpected_root(format!(
            "unexpected root element <{root}>"
        )))
    }
}

fn parse_expected<T: DeserializeOwned>(bytes: &[u8], kind: DocumentKind) -> Result<T, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::empty(kind));
    }

    let root = root_element(bytes)?;
    if root != kind.root_element() {
        return Err(ParseError::unexpected_root(format!(
            "expected element <{}> but have <{root}>",
            kind.root_element()
        )));
    }

    decode(bytes)
}

/// Returns the local name of the first element, skipping the declaration,
/// comments, doctype and whitespace.
fn root_element(bytes: &[u8]) -> Result<String, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element) | Event::Empty(element)) => {
                return Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => return Err(ParseError::unexpected_root("EOF")),
            Err(error) => return Err(ParseError::unexpected_root(error.to_string())),
            Ok(_) => {}
        }
        buf.clear();
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ParseError> {
    let text =
        std::str::from_utf8(bytes).map_err(|error| ParseError::unexpected_root(error.to_string()))?;
    let text = text.trim_start_matches('\u{feff}');

    quick_xml::de::from_str(text).map_err(|error| ParseError::unexpected_root(error.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2024-01-01</lastmod>
    <changefreq>daily</changefreq>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://example.com/about</loc>
  </url>
</urlset>"#;

    const INDEX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap>
    <loc>https://example.com/sitemap1.xml</loc>
    <lastmod>2024-01-01T00:00:00+00:00</lastmod>
  </sitemap>
  <sitemap>
    <loc>https://example.com/sitemap2.xml</loc>
  </sitemap>
</sitemapindex>"#;

    #[test]
    fn test_parse_sitemap_decodes_all_fields() {
        let sitemap = parse_sitemap(URLSET.as_bytes()).unwrap();
        assert_eq!(sitemap.len(), 2);

        let first = &sitemap.urls[0];
        assert_eq!(first.loc, "https://example.com/");
        assert_eq!(first.lastmod.as_deref(), Some("2024-01-01"));
        assert_eq!(first.changefreq.as_deref(), Some("daily"));
        assert_eq!(first.priority.as_deref(), Some("1.0"));

        let second = &sitemap.urls[1];
        assert_eq!(second.loc, "https://example.com/about");
        assert_eq!(second.lastmod, None);
    }

    #[test]
    fn test_parse_sitemap_fixture_has_thirteen_urls() {
        let sitemap = parse_sitemap(include_bytes!("../../tests/fixtures/sitemap.xml")).unwrap();
        assert_eq!(sitemap.len(), 13);
    }

    #[test]
    fn test_parse_sitemap_empty_input() {
        let err = parse_sitemap(&[]).unwrap_err();
        assert_eq!(err.to_string(), "sitemap.xml is empty.");
    }

    #[test]
    fn test_parse_sitemap_index_empty_input() {
        let err = parse_sitemap_index(&[]).unwrap_err();
        assert_eq!(err.to_string(), "sitemapindex.xml is empty.");
    }

    #[test]
    fn test_parse_sitemap_index_decodes_entries() {
        let index = parse_sitemap_index(INDEX.as_bytes()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.sitemaps[0].loc, "https://example.com/sitemap1.xml");
        assert_eq!(
            index.sitemaps[0].lastmod.as_deref(),
            Some("2024-01-01T00:00:00+00:00")
        );
        assert_eq!(index.sitemaps[1].lastmod, None);
    }

    #[test]
    fn test_parse_sitemap_skips_extension_elements_between_urls() {
        let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:x="urn:x">
  <url><loc>https://a.example.com/</loc></url>
  <x:meta>m</x:meta>
  <url><loc>https://b.example.com/</loc></url>
</urlset>"#;
        let Document::Urlset(sitemap) = parse_document(xml).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(
            sitemap.locations().collect::<Vec<_>>(),
            ["https://a.example.com/", "https://b.example.com/"]
        );
    }

    #[test]
    fn test_parse_sitemap_index_skips_extension_elements_between_entries() {
        let xml = br#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:x="urn:x">
  <sitemap><loc>https://example.com/1.xml</loc></sitemap>
  <x:note>generated</x:note>
  <sitemap><loc>https://example.com/2.xml</loc></sitemap>
</sitemapindex>"#;
        let index = parse_sitemap_index(xml).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.sitemaps[1].loc, "https://example.com/2.xml");
    }

    #[test]
    fn test_parse_sitemap_rejects_index_root() {
        let err = parse_sitemap(INDEX.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { .. }));
        assert!(err.to_string().contains("<sitemapindex>"), "got: {err}");
    }

    #[test]
    fn test_parse_sitemap_index_rejects_urlset_root() {
        let err = parse_sitemap_index(URLSET.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { .. }));
    }

    #[test]
    fn test_parse_document_classifies_urlset() {
        let document = parse_document(URLSET.as_bytes()).unwrap();
        assert_eq!(document.kind(), DocumentKind::Urlset);
    }

    #[test]
    fn test_parse_document_classifies_index() {
        match parse_document(INDEX.as_bytes()).unwrap() {
            Document::Index(index) => assert_eq!(index.len(), 2),
            Document::Urlset(_) => panic!("expected sitemap index"),
        }
    }

    #[test]
    fn test_parse_document_empty_input_reports_eof() {
        let err = parse_document(&[]).unwrap_err();
        assert_eq!(err.to_string(), "URL is not a sitemap or sitemapindex.: EOF");
    }

    #[test]
    fn test_parse_document_whitespace_only_reports_eof() {
        let err = parse_document(b"  \n\t ").unwrap_err();
        assert_eq!(err.to_string(), "URL is not a sitemap or sitemapindex.: EOF");
    }

    #[test]
    fn test_parse_document_rejects_unknown_root() {
        let err = parse_document(b"<html><body>not a sitemap</body></html>").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { .. }));
        assert!(err.to_string().contains("<html>"), "got: {err}");
    }

    #[test]
    fn test_parse_document_ignores_namespace_prefix() {
        let xml = br#"<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9"></sm:urlset>"#;
        let document = parse_document(xml).unwrap();
        assert_eq!(document.kind(), DocumentKind::Urlset);
    }

    #[test]
    fn test_parse_document_truncated_xml_fails() {
        let xml = b"<urlset><url><loc>https://example.com/</loc>";
        assert!(matches!(
            parse_document(xml),
            Err(ParseError::UnexpectedRoot { .. })
        ));
    }

    #[test]
    fn test_parse_document_missing_loc_fails() {
        let xml = b"<urlset><url><lastmod>2024-01-01</lastmod></url></urlset>";
        assert!(matches!(
            parse_document(xml),
            Err(ParseError::UnexpectedRoot { .. })
        ));
    }

    #[test]
    fn test_parse_sitemap_ignores_extension_elements() {
        let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
  <url>
    <loc>https://example.com/gallery</loc>
    <image:image><image:loc>https://example.com/a.png</image:loc></image:image>
  </url>
</urlset>"#;
        let sitemap = parse_sitemap(xml).unwrap();
        assert_eq!(sitemap.len(), 1);
        assert_eq!(sitemap.urls[0].loc, "https://example.com/gallery");
    }

    #[test]
    fn test_parse_sitemap_empty_urlset_has_no_entries() {
        let sitemap = parse_sitemap(b"<urlset/>").unwrap();
        assert!(sitemap.is_empty());
    }
}
