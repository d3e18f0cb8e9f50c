//! Filter types and canonical query-string encoding for list operations.

/// Comparison semantics applied by the server when filtering by tag value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagValueMatchMode {
    /// No value matching: list all items regardless of tag values.
    #[default]
    Unspecified,
    /// Exact match on the tag value.
    Exact,
    /// Prefix match on the tag value.
    Prefix,
}

impl TagValueMatchMode {
    /// The query-string literal for this mode; empty for `Unspecified`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Exact => "exact",
            Self::Prefix => "prefix",
        }
    }

    /// Parse a mode literal; anything unrecognized maps to `Unspecified`.
    pub fn parse(s: &str) -> Self {
        match s {
            "exact" => Self::Exact,
            "prefix" => Self::Prefix,
            _ => Self::Unspecified,
        }
    }
}

/// Caller-supplied predicates controlling which records a listing returns.
///
/// All fields are optional; omitted fields are entirely absent from the
/// encoded query string so the server never sees spurious parameters.
/// The `last_evaluated_key` cursor is server-minted and opaque; reusing a
/// cursor against a different filter is undefined.
///
/// # Example
///
/// ```
/// use soracom::{ListFilter, TagValueMatchMode};
///
/// let filter = ListFilter::default()
///     .tag("env", "production", TagValueMatchMode::Exact)
///     .status_filter("active|inactive")
///     .limit(100);
/// assert_eq!(
///     filter.encode(),
///     "tag_name=env&tag_value=production&tag_value_match_mode=exact\
///      &status_filter=active|inactive&limit=100",
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Tag name to filter on.
    pub tag_name: String,
    /// Tag value to filter on; meaningless without `tag_name`.
    pub tag_value: String,
    /// How `tag_value` is compared; meaningless without a tag value.
    pub tag_value_match_mode: TagValueMatchMode,
    /// `|`-delimited disjunction of status literals, e.g. `"active|inactive"`.
    /// Passed through unescaped; the server parses the disjunction.
    pub status_filter: String,
    /// Speed-class filter, e.g. `"s1.standard"`.
    pub type_filter: String,
    /// Page size; 0 means server default.
    pub limit: u32,
    /// Opaque pagination cursor from a previous response.
    pub last_evaluated_key: String,
}

impl ListFilter {
    /// Filter by a tag name/value pair with the given match mode.
    #[must_use]
    pub fn tag(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        mode: TagValueMatchMode,
    ) -> Self {
        self.tag_name = name.into();
        self.tag_value = value.into();
        self.tag_value_match_mode = mode;
        self
    }

    /// Filter by status disjunction, e.g. `"active|inactive"`.
    #[must_use]
    pub fn status_filter(mut self, statuses: impl Into<String>) -> Self {
        self.status_filter = statuses.into();
        self
    }

    /// Filter by speed class.
    #[must_use]
    pub fn type_filter(mut self, type_filter: impl Into<String>) -> Self {
        self.type_filter = type_filter.into();
        self
    }

    /// Cap the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Resume listing after the given cursor.
    #[must_use]
    pub fn last_evaluated_key(mut self, key: impl Into<String>) -> Self {
        self.last_evaluated_key = key.into();
        self
    }

    /// Encode as `key=value` pairs joined by `&`, without a leading `?`.
    ///
    /// Fields are emitted in a fixed order (tag name, tag value, match mode,
    /// status, type, limit, cursor); empty and zero fields are omitted
    /// entirely. Free-form values (tag name, tag value, cursor) are
    /// percent-encoded; `status_filter` and `type_filter` hold constrained
    /// literals and pass through raw so the `|` disjunction reaches the
    /// server intact.
    pub fn encode(&self) -> String {
        let mut pairs: Vec<String> = Vec::with_capacity(7);
        if !self.tag_name.is_empty() {
            pairs.push(format!("tag_name={}", urlencoding::encode(&self.tag_name)));
        }
        if !self.tag_value.is_empty() {
            pairs.push(format!("tag_value={}", urlencoding::encode(&self.tag_value)));
        }
        if self.tag_value_match_mode != TagValueMatchMode::Unspecified {
            pairs.push(format!(
                "tag_value_match_mode={}",
                self.tag_value_match_mode.as_str()
            ));
        }
        if !self.status_filter.is_empty() {
            pairs.push(format!("status_filter={}", self.status_filter));
        }
        if !self.type_filter.is_empty() {
            pairs.push(format!("type_filter={}", self.type_filter));
        }
        if self.limit != 0 {
            pairs.push(format!("limit={}", self.limit));
        }
        if !self.last_evaluated_key.is_empty() {
            pairs.push(format!(
                "last_evaluated_key={}",
                urlencoding::encode(&self.last_evaluated_key)
            ));
        }
        pairs.join("&")
    }
}
