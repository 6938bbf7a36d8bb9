//! Parsed table rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One parsed row of a table.
///
/// Without a header the row is an ordered field sequence; with a header in
/// effect it is a mapping from column name to field value. The reader hands
/// each record to the caller and retains no reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    /// Ordered field sequence (no header in effect).
    Fields(Vec<String>),
    /// Column-name keyed mapping (header in effect). Duplicate column
    /// names collapse to a single entry holding the rightmost value.
    Named(BTreeMap<String, String>),
}

impl Record {
    /// Number of fields in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Fields(fields) => fields.len(),
            Self::Named(map) => map.len(),
        }
    }

    /// True if the record holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The ordered field sequence, if this record has no header.
    #[must_use]
    pub fn fields(&self) -> Option<&[String]> {
        match self {
            Self::Fields(fields) => Some(fields),
            Self::Named(_) => None,
        }
    }

    /// Look up a field value by column name, if a header is in effect.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            Self::Fields(_) => None,
            Self::Named(map) => map.get(name).map(String::as_str),
        }
    }

    /// The name-keyed mapping, if a header is in effect.
    #[must_use]
    pub fn named(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Fields(_) => None,
            Self::Named(map) => Some(map),
        }
    }

    /// Field values in a stable order: positional for `Fields`, sorted by
    /// column name for `Named`.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Fields(fields) => fields.iter().map(String::as_str).collect(),
            Self::Named(map) => map.values().map(String::as_str).collect(),
        }
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Self::Fields(fields)
    }
}

impl From<BTreeMap<String, String>> for Record {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::Named(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(pairs: &[(&str, &str)]) -> Record {
        Record::Named(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_fields_accessors() {
        let record = Record::Fields(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(record.len(), 2);
        assert!(!record.is_empty());
        assert_eq!(record.fields(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(record.get("a"), None);
        assert_eq!(record.named(), None);
    }

    #[test]
    fn test_named_accessors() {
        let record = named(&[("name", "x"), ("mood", "y")]);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("name"), Some("x"));
        assert_eq!(record.get("mood"), Some("y"));
        assert_eq!(record.get("missing"), None);
        assert_eq!(record.fields(), None);
    }

    #[test]
    fn test_json_shapes() {
        let record = Record::Fields(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"["a","b"]"#
        );

        let record = named(&[("k", "v")]);
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"k":"v"}"#);
    }
}
