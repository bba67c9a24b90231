//! Query string and path construction.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Display;

/// An ordered list of query parameters. Keys may repeat
/// (`propertyKeys=a&propertyKeys=b`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Display) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn opt(&mut self, key: &'static str, value: Option<impl Display>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    pub fn datetime(&mut self, key: &'static str, value: &DateTime<Utc>) -> &mut Self {
        self.push(key, format_datetime(value))
    }

    pub fn datetime_opt(&mut self, key: &'static str, value: Option<&DateTime<Utc>>) -> &mut Self {
        if let Some(v) = value {
            self.datetime(key, v);
        }
        self
    }

    pub fn all<V: Display>(&mut self, key: &'static str, values: &[V]) -> &mut Self {
        for v in values {
            self.push(key, v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encode into `k=v&k=v` form (no leading `?`).
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Format a timestamp the way the API expects in query strings and paths.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Join path segments, percent-encoding each one. Action suffixes such as
/// `/$get` are appended by the caller since `$` would be escaped here.
pub fn path(segments: &[&str]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&urlencoding::encode(segment));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_encode_escapes_values() {
        let mut q = Query::new();
        q.push("filter", "displayName eq 'A&B'").opt("limit", Some(5)).opt("start", None::<u32>);
        assert_eq!(q.encode(), "filter=displayName%20eq%20%27A%26B%27&limit=5");
    }

    #[test]
    fn test_datetime_format() {
        let dt = Utc.with_ymd_and_hms(2019, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(format_datetime(&dt), "2019-03-01T12:30:00Z");
        let mut q = Query::new();
        q.datetime("asAt", &dt);
        assert_eq!(q.encode(), "asAt=2019-03-01T12%3A30%3A00Z");
    }

    #[test]
    fn test_path_encodes_segments() {
        assert_eq!(
            path(&["api", "instruments", "Figi", "BBG 000/1"]),
            "/api/instruments/Figi/BBG%20000%2F1"
        );
    }

    #[test]
    fn test_empty_query() {
        assert!(Query::new().is_empty());
        assert_eq!(Query::new().encode(), "");
    }
}
