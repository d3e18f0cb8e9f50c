//! Cursor-based pagination for SORACOM list responses.
//!
//! Listing endpoints paginate with opaque, server-minted cursors carried in
//! an IANA-style `Link` response header:
//!
//! ```text
//! Link: <https://host/path?last_evaluated_key=XYZ>; rel="prev",
//!       <https://host/path?last_evaluated_key=ABC>; rel="next"
//! ```
//!
//! The `last_evaluated_key` query parameter inside each URL is the cursor;
//! feeding the `next` cursor into the next request's filter resumes the
//! listing where the previous page left off.

use reqwest::header::HeaderMap;
use url::Url;

/// Opaque cursors extracted from a listing response's `Link` header.
///
/// Both cursors are `None` when the response carried no `Link` header,
/// meaning either fewer results than one page or pagination not requested —
/// never an error. Cursors are single-use per semantic query: reusing a
/// `next` cursor against a different filter is undefined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationKeys {
    /// Cursor for the previous page, if the server advertised one.
    pub previous: Option<String>,
    /// Cursor for the next page, if the server advertised one.
    pub next: Option<String>,
}

impl PaginationKeys {
    /// Whether the server advertised a next page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Extract cursors from response headers.
    ///
    /// A `Link` header with a non-UTF-8 value is treated as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(Self::from_link_header)
            .unwrap_or_default()
    }

    /// Parse a `Link` header value into a cursor pair.
    ///
    /// Entries are split on `,`, then on `;` into a `<url>` part and a
    /// `rel` part. The cursor is the `last_evaluated_key` query parameter
    /// of the URL; `rel=prev` and `rel=next` select which slot it fills,
    /// any other relation is ignored. Malformed entries are skipped
    /// silently: partial pagination info beats total failure.
    pub fn from_link_header(value: &str) -> Self {
        let mut keys = Self::default();
        if value.is_empty() {
            return keys;
        }

        for entry in value.split(',') {
            let mut parts = entry.splitn(2, ';');
            let (Some(url_part), Some(rel_part)) = (parts.next(), parts.next()) else {
                continue;
            };

            let url_part = url_part.trim().trim_start_matches('<').trim_end_matches('>');
            let Ok(url) = Url::parse(url_part) else {
                continue;
            };
            let Some(cursor) = url
                .query_pairs()
                .find(|(name, _)| name == "last_evaluated_key")
                .map(|(_, value)| value.into_owned())
            else {
                continue;
            };

            let rel = rel_part
                .splitn(2, '=')
                .nth(1)
                .map(|s| s.trim().trim_matches('"'));
            match rel {
                Some("prev") => keys.previous = Some(cursor),
                Some("next") => keys.next = Some(cursor),
                _ => {}
            }
        }

        keys
    }
}

/// One page of results from a listing operation.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The records on this page.
    pub items: Vec<T>,
    /// Cursors for the surrounding pages.
    pub pagination: PaginationKeys,
}

impl<T> Page<T> {
    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The cursor to resume from, if the server advertised a next page.
    pub fn next_key(&self) -> Option<&str> {
        self.pagination.next.as_deref()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_header_means_no_pagination() {
        let keys = PaginationKeys::from_link_header("");
        assert_eq!(keys, PaginationKeys::default());
        assert!(!keys.has_next());
    }

    #[test]
    fn absent_header_means_no_pagination() {
        let keys = PaginationKeys::from_headers(&HeaderMap::new());
        assert_eq!(keys.previous, None);
        assert_eq!(keys.next, None);
    }

    #[test]
    fn parses_prev_and_next_entries() {
        let header = "<https://host/path?last_evaluated_key=ABC>; rel=\"next\", \
                      <https://host/path?last_evaluated_key=XYZ>; rel=\"prev\"";
        let keys = PaginationKeys::from_link_header(header);
        assert_eq!(keys.next.as_deref(), Some("ABC"));
        assert_eq!(keys.previous.as_deref(), Some("XYZ"));
    }

    #[test]
    fn unquoted_rel_values_are_accepted() {
        let header = "<https://host/v1/subscribers?last_evaluated_key=K1>; rel=next";
        let keys = PaginationKeys::from_link_header(header);
        assert_eq!(keys.next.as_deref(), Some("K1"));
    }

    #[test]
    fn next_only_leaves_previous_absent() {
        let header = "<https://host/v1/subscribers?limit=3&last_evaluated_key=ABC>; rel=\"next\"";
        let keys = PaginationKeys::from_link_header(header);
        assert_eq!(keys.previous, None);
        assert_eq!(keys.next.as_deref(), Some("ABC"));
    }

    #[test]
    fn malformed_entry_is_skipped_not_fatal() {
        let header = "<::not a url::>; rel=\"prev\", \
                      <https://host/path?last_evaluated_key=ABC>; rel=\"next\"";
        let keys = PaginationKeys::from_link_header(header);
        assert_eq!(keys.previous, None);
        assert_eq!(keys.next.as_deref(), Some("ABC"));
    }

    #[test]
    fn entry_without_cursor_param_is_skipped() {
        let header = "<https://host/path?limit=10>; rel=\"next\"";
        let keys = PaginationKeys::from_link_header(header);
        assert_eq!(keys.next, None);
    }

    #[test]
    fn unknown_relations_are_ignored() {
        let header = "<https://host/path?last_evaluated_key=ABC>; rel=\"first\"";
        let keys = PaginationKeys::from_link_header(header);
        assert_eq!(keys, PaginationKeys::default());
    }

    #[test]
    fn entry_without_rel_part_is_skipped() {
        let keys =
            PaginationKeys::from_link_header("<https://host/path?last_evaluated_key=ABC>");
        assert_eq!(keys, PaginationKeys::default());
    }

    #[test]
    fn percent_encoded_cursor_is_decoded() {
        let header = "<https://host/path?last_evaluated_key=a%2Fb>; rel=\"next\"";
        let keys = PaginationKeys::from_link_header(header);
        assert_eq!(keys.next.as_deref(), Some("a/b"));
    }

    #[test]
    fn page_iteration_helpers() {
        let page = Page {
            items: vec![1, 2, 3],
            pagination: PaginationKeys {
                previous: None,
                next: Some("ABC".to_string()),
            },
        };
        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
        assert_eq!(page.next_key(), Some("ABC"));
        assert_eq!(page.iter().sum::<i32>(), 6);
        assert_eq!((&page).into_iter().count(), 3);
        assert_eq!(page.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
