//! List and search responses
//!
//! List endpoints return a JSON array in the body and pagination metadata
//! in the headers: `X-Total-Count` and an RFC 5988 `Link` header such as
//!
//! ```text
//! </api/reviews?page=1&size=20>; rel="next",</api/reviews?page=4&size=20>; rel="last"
//! ```

use larder_core::{SyncError, SyncResult};
use reqwest::header::{HeaderMap, LINK};

/// Header carrying the total number of items across all pages
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

// ============================================================================
// ResponseWrapper
// ============================================================================

/// A page of entities plus the response metadata it came with
#[derive(Debug, Clone)]
pub struct ResponseWrapper<E> {
    pub items: Vec<E>,
    pub headers: HeaderMap,
    pub status: u16,
}

impl<E> ResponseWrapper<E> {
    /// Wrap items with headers and status
    pub fn new(items: Vec<E>, headers: HeaderMap, status: u16) -> Self {
        Self {
            items,
            headers,
            status,
        }
    }

    /// A 200 response with no headers
    pub fn ok(items: Vec<E>) -> Self {
        Self::new(items, HeaderMap::new(), 200)
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Value of `X-Total-Count`, when present and numeric
    pub fn total_count(&self) -> Option<u64> {
        self.headers
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    /// Parsed `Link` header; empty when the header is absent
    pub fn links(&self) -> SyncResult<PageLinks> {
        match self.headers.get(LINK) {
            Some(value) => {
                let value = value
                    .to_str()
                    .map_err(|_| SyncError::Parse("Link header is not valid text".to_string()))?;
                parse_link_header(value)
            }
            None => Ok(PageLinks::default()),
        }
    }

    /// Take the items
    pub fn into_items(self) -> Vec<E> {
        self.items
    }
}

// ============================================================================
// Pagination Links
// ============================================================================

/// Page numbers named by a `Link` header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub first: Option<u32>,
    pub prev: Option<u32>,
    pub next: Option<u32>,
    pub last: Option<u32>,
}

impl PageLinks {
    /// Look a relation up by name
    pub fn get(&self, rel: &str) -> Option<u32> {
        match rel {
            "first" => self.first,
            "prev" => self.prev,
            "next" => self.next,
            "last" => self.last,
            _ => None,
        }
    }

    /// Check if there is a page after the current one
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Parse an RFC 5988 `Link` header into page numbers
///
/// Each comma-separated section must be `<url>; rel="name"`. The page
/// number is read from the `page` query parameter of the URL. Relations
/// other than first/prev/next/last are ignored.
pub fn parse_link_header(header: &str) -> SyncResult<PageLinks> {
    if header.trim().is_empty() {
        return Err(SyncError::Parse("Link header must not be empty".to_string()));
    }

    let mut links = PageLinks::default();
    for section in header.split(',') {
        let mut parts = section.split(';');
        let (Some(url_part), Some(rel_part), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(SyncError::Parse(format!(
                "Link section could not be split on ';': {}",
                section.trim()
            )));
        };

        let url = url_part
            .trim()
            .strip_prefix('<')
            .and_then(|u| u.strip_suffix('>'))
            .ok_or_else(|| SyncError::Parse(format!("malformed link target: {}", url_part.trim())))?;

        let rel = rel_part
            .trim()
            .strip_prefix("rel=")
            .map(|r| r.trim_matches('"'))
            .ok_or_else(|| SyncError::Parse(format!("malformed link relation: {}", rel_part.trim())))?;

        let page = page_param(url)?;
        match rel {
            "first" => links.first = Some(page),
            "prev" => links.prev = Some(page),
            "next" => links.next = Some(page),
            "last" => links.last = Some(page),
            _ => {}
        }
    }
    Ok(links)
}

fn page_param(url: &str) -> SyncResult<u32> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .ok_or_else(|| SyncError::Parse(format!("link has no page parameter: {}", url)))
}

// ============================================================================
// Tests
// ============================================================================
