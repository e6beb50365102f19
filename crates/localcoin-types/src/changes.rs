//! Transaction effect records.
//!
//! One [`ObjectChange`] corresponds to one entry of the `objectChanges`
//! array reported by `sui_getTransactionBlock`. Order within a transaction
//! carries no meaning; discovery must not depend on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of state change a transaction produced for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Mutated,
    Deleted,
    Wrapped,
    Transferred,
    Published,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Created => "created",
            ChangeKind::Mutated => "mutated",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Wrapped => "wrapped",
            ChangeKind::Transferred => "transferred",
            ChangeKind::Published => "published",
        };
        f.write_str(s)
    }
}

/// A single reported state change of a transaction.
///
/// `object_type` and `object_id` are present for object-level changes;
/// `package_id` is present for `published` records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
}

impl ObjectChange {
    /// Shorthand for a `created` record, mostly useful in tests.
    pub fn created(object_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Created,
            object_type: Some(object_type.into()),
            object_id: Some(object_id.into()),
            package_id: None,
        }
    }

    /// Shorthand for a `published` record.
    pub fn published(package_id: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Published,
            object_type: None,
            object_id: None,
            package_id: Some(package_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_created_record() {
        let json = r#"{
            "type": "created",
            "sender": "0xe65f",
            "owner": { "AddressOwner": "0xe65f" },
            "objectType": "0x2::package::UpgradeCap",
            "objectId": "0x1234",
            "version": "5",
            "digest": "9V3x"
        }"#;
        let change: ObjectChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.kind, ChangeKind::Created);
        assert_eq!(change.object_type.as_deref(), Some("0x2::package::UpgradeCap"));
        assert_eq!(change.object_id.as_deref(), Some("0x1234"));
        assert_eq!(change.package_id, None);
    }

    #[test]
    fn test_parse_published_record() {
        let json = r#"{"type": "published", "packageId": "0xdead", "modules": ["local_coin"]}"#;
        let change: ObjectChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.kind, ChangeKind::Published);
        assert_eq!(change.package_id.as_deref(), Some("0xdead"));
    }
}
