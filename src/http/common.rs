use std::fmt::Display;

use crate::error::Error;

#[derive(Debug, Clone, Default)]
pub struct RequestHeader {
    pub method: String,
    pub uri: String,
    pub version: String,
    pub fields: HeaderFields,
}

impl RequestHeader {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        super::parse::parse_request_header(data)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseHeader {
    pub version: String,
    pub status_code: u16,
    pub reason_phrase: String,
    pub fields: HeaderFields,
}

impl ResponseHeader {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        super::parse::parse_response_header(data)
    }

    pub fn is_informational(&self) -> bool {
        (100..200).contains(&self.status_code)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Status code and reason phrase, e.g. `HTTP 404 Not Found`.
    pub fn status_line(&self) -> String {
        if self.reason_phrase.is_empty() {
            format!("HTTP {}", self.status_code)
        } else {
            format!("HTTP {} {}", self.status_code, self.reason_phrase)
        }
    }
}

/// Ordered header fields with case-insensitive name lookup.
#[derive(Debug, Clone, Default)]
pub struct HeaderFields {
    inner: Vec<(FieldName, String)>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (FieldName, String)> {
        self.inner.iter()
    }

    pub fn get<K: Into<FieldName>>(&self, key: K) -> Option<&str> {
        let key = key.into();
        self.inner
            .iter()
            .find_map(|(k, v)| if k == &key { Some(v.as_str()) } else { None })
    }

    pub fn append<K: Into<FieldName>, V: Into<String>>(&mut self, key: K, value: V) {
        self.inner.push((key.into(), value.into()));
    }
}

impl<'a> IntoIterator for &'a HeaderFields {
    type Item = &'a (FieldName, String);
    type IntoIter = std::slice::Iter<'a, (FieldName, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[derive(Debug, Clone)]
pub struct FieldName {
    inner: String,
    normalized: String,
}

impl FieldName {
    pub fn new<T: Into<String>>(name: T) -> Self {
        let inner = name.into();
        let normalized = inner.to_ascii_lowercase();

        Self { inner, normalized }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&FieldName> for FieldName {
    fn from(value: &FieldName) -> Self {
        value.to_owned()
    }
}

impl PartialEq for FieldName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for FieldName {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields() {
        let mut fields = HeaderFields::new();
        assert!(fields.is_empty());

        fields.append("User-Agent", "a");
        fields.append("Accept", "application/json");

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("ACCEPT"), Some("application/json"));

        assert_eq!(fields.get("User-Agent"), Some("a"));
        assert_eq!(fields.iter().next().map(|(k, _)| k.as_str()), Some("User-Agent"));
        assert_eq!(fields.get("Cookie"), None);
    }

    #[test]
    fn test_status_line() {
        let mut header = ResponseHeader::new();
        header.status_code = 404;
        header.reason_phrase = "Not Found".to_string();

        assert_eq!(header.status_line(), "HTTP 404 Not Found");
        assert!(!header.is_success());

        header.status_code = 204;
        header.reason_phrase.clear();

        assert_eq!(header.status_line(), "HTTP 204");
        assert!(header.is_success());
        assert!(!header.is_informational());
    }
}
