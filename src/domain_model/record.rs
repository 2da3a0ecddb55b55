use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend record identifier. The API hands these out either as JSON
/// numbers or as strings, so both are accepted and kept as text.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Ids go into URL paths verbatim, so only numeric, uuid and slug
    /// shaped values are accepted.
    pub fn is_path_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_owned())
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => RecordId(n.to_string()),
            Raw::Text(s) => RecordId(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[42, "9f1c"]"#).unwrap();
        assert_eq!(ids, vec![RecordId::from(42), RecordId::from("9f1c")]);
    }

    #[test]
    fn path_safety() {
        assert!(RecordId::from(7).is_path_safe());
        assert!(RecordId::from("3f2b9c1e-7a4d-4e2b-9d61-0c5a8e7f1b22").is_path_safe());
        for bad in ["", "..", "7/", "../administrators/3/delete", "7?x=1", "7#top", "7 8", "%2e%2e"] {
            assert!(!RecordId::from(bad).is_path_safe(), "{bad}");
        }
    }
}
