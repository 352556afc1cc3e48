//! Sitemap document model, classification and (de)serialization.
//!
//! Two root shapes are recognized:
//! - `<urlset>` - a flat list of `<url>` records, decoded into [`Sitemap`]
//! - `<sitemapindex>` - a list of `<sitemap>` references, decoded into [`SitemapIndex`]
//!
//! # Example
//!
//! ```
//! use sitemapper_core::document::{Document, parse_document};
//!
//! let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url><loc>https://example.com/</loc></url>
//! </urlset>"#;
//!
//! match parse_document(xml).unwrap() {
//!     Document::Urlset(sitemap) => assert_eq!(sitemap.len(), 1),
//!     Document::Index(_) => unreachable!(),
//! }
//! ```

mod error;
mod model;
mod parse;
mod serialize;

pub use error::{DocumentKind, ParseError};
pub use model::{ChangeFrequency, Sitemap, SitemapIndex, SitemapIndexEntry, UrlEntry};
pub use parse::{Document, parse_document, parse_sitemap, parse_sitemap_index};
pub use serialize::{SITEMAP_NAMESPACE, to_urlset_xml};
