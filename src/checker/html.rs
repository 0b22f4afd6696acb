// src/checker/html.rs
// =============================================================================
// This module extracts every resource reference from an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// A "resource" is anything a page points at that can break:
// - <a href>                 links to other pages
// - <img src>                images
// - <link href>              stylesheets, plus icons, preloads, feeds, ...
// - <script src>             scripts
//
// Relative references are resolved against the page's own URL (not the seed),
// so "../img/logo.png" on /blog/post/ lands on /blog/img/logo.png.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use url::Url;

// Every element we care about, in one selector so results come back in
// document order
const RESOURCE_SELECTOR: &str = "a[href], img[src], link[href], script[src]";

// Which HTML element a resource was referenced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Anchor,
    Image,
    Stylesheet,
    Script,
    /// Any other <link>: icons, preloads, alternates, manifests
    OtherLink,
}

impl ElementKind {
    // Anchors are the only elements that lead to more pages
    pub fn is_navigable(self) -> bool {
        matches!(self, ElementKind::Anchor)
    }
}

// A URL found while parsing a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredResource {
    /// Absolute, normalized URL (fragment removed)
    pub url: Url,
    /// The page the reference was found on
    pub source_page: String,
    /// Anchor text or image alt text
    pub link_text: Option<String>,
    pub element: ElementKind,
}

impl DiscoveredResource {
    // Only http(s) resources are ever sent over the network. mailto:, tel:
    // and friends are kept as references but always count as healthy.
    pub fn is_network(&self) -> bool {
        is_network_url(&self.url)
    }
}

pub fn is_network_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

// Drops the fragment so "/about#team" and "/about" are the same resource
pub fn normalize_url(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

// Extracts up to `limit` resources from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL of the page (for resolving relative links)
//   limit: the per-page cap; anything past it is ignored
//
// Returns: resources in document order. Duplicates within the page are kept;
// deduplication across the whole site happens in the crawler.
pub fn extract_resources(html: &str, page_url: &Url, limit: usize) -> Vec<DiscoveredResource> {
    let document = Html::parse_document(html);

    // The selector is a constant, so parsing can only fail on a typo here
    let selector = Selector::parse(RESOURCE_SELECTOR).expect("resource selector is valid CSS");

    document
        .select(&selector)
        .filter_map(|element| to_resource(element, page_url))
        .take(limit)
        .collect()
}

fn to_resource(element: ElementRef<'_>, page_url: &Url) -> Option<DiscoveredResource> {
    let (kind, attr) = match element.value().name() {
        "a" => (ElementKind::Anchor, "href"),
        "img" => (ElementKind::Image, "src"),
        "link" if is_stylesheet(element) => (ElementKind::Stylesheet, "href"),
        "link" => (ElementKind::OtherLink, "href"),
        "script" => (ElementKind::Script, "src"),
        _ => return None,
    };

    let reference = element.value().attr(attr)?;
    let url = resolve_reference(page_url, reference)?;

    let link_text = match kind {
        ElementKind::Anchor => collapse_whitespace(&element.text().collect::<String>()),
        ElementKind::Image => element.value().attr("alt").and_then(collapse_whitespace),
        ElementKind::Stylesheet | ElementKind::Script | ElementKind::OtherLink => None,
    };

    Some(DiscoveredResource {
        url,
        source_page: page_url.to_string(),
        link_text,
        element: kind,
    })
}

// rel is a space-separated, case-insensitive token list
fn is_stylesheet(element: ElementRef<'_>) -> bool {
    element
        .value()
        .attr("rel")
        .map(|rel| rel.split_whitespace().any(|token| token.eq_ignore_ascii_case("stylesheet")))
        .unwrap_or(false)
}

// Resolves a possibly-relative reference to an absolute, normalized URL
//
// Returns None for references that don't point at a resource at all:
// empty values, in-page anchors ("#section"), javascript: and data: URIs,
// and anything the url crate can't make sense of.
fn resolve_reference(page_url: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();

    if reference.is_empty() || reference.starts_with('#') {
        return None;
    }

    // join() handles both relative and absolute references
    let url = page_url.join(reference).ok()?;

    match url.scheme() {
        "javascript" | "data" | "about" | "blob" => None,
        _ => Some(normalize_url(url)),
    }
}

fn collapse_whitespace(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
