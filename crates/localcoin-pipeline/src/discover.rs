//! Object discovery: extracting one created object id from a
//! transaction's unordered change records.
//!
//! Matching is exact string equality between the expected
//! [`TypeSignature`] and the reported object type. Zero matches almost
//! always means the expected signature embeds a stale package id, so the
//! error carries every observed `(kind, type)` pair for diagnosis.

use std::fmt;

use localcoin_types::{ChangeKind, ObjectChange, TypeSignature};
use tracing::warn;

/// Discovery failure.
#[derive(Debug)]
pub enum DiscoveryError {
    /// No created record carried the expected type.
    NotFound {
        expected: String,
        observed: Vec<(ChangeKind, String)>,
    },

    /// No `published` record in a publish transaction's changes.
    NoPublishedPackage,
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NotFound { expected, observed } => {
                writeln!(f, "no created object of type {}", expected)?;
                writeln!(f, "observed changes:")?;
                for (kind, type_sig) in observed {
                    writeln!(f, "  {} {}", kind, type_sig)?;
                }
                write!(f, "(a stale PACKAGE_ID in the config store is the usual cause)")
            }
            DiscoveryError::NoPublishedPackage => {
                write!(f, "transaction produced no published package record")
            }
        }
    }
}

impl std::error::Error for DiscoveryError {}

fn observed_pairs(changes: &[ObjectChange]) -> Vec<(ChangeKind, String)> {
    changes
        .iter()
        .map(|c| {
            let type_sig = c
                .object_type
                .clone()
                .or_else(|| c.package_id.clone())
                .unwrap_or_default();
            (c.kind, type_sig)
        })
        .collect()
}

/// Find the id of the created object with the expected type.
///
/// If more than one created record matches, the first in input order wins,
/// deterministically, and the ambiguity is logged. One transaction of the
/// LocalCoin package never legitimately creates two objects of the same
/// discovered type, so an ambiguous match points at the caller's
/// signature being too loose.
pub fn find_created(
    changes: &[ObjectChange],
    expected: &TypeSignature,
) -> Result<String, DiscoveryError> {
    let mut matches = changes.iter().filter(|c| {
        c.kind == ChangeKind::Created
            && c.object_type.as_deref().is_some_and(|t| expected.matches(t))
            && c.object_id.is_some()
    });

    let Some(first) = matches.next() else {
        return Err(DiscoveryError::NotFound {
            expected: expected.to_string(),
            observed: observed_pairs(changes),
        });
    };

    let extra = matches.count();
    if extra > 0 {
        warn!(
            expected = %expected,
            ignored = extra,
            "multiple created objects share the expected type; taking the first in record order"
        );
    }

    Ok(first.object_id.clone().unwrap_or_default())
}

/// Find the package id of a publish transaction, exactly as reported.
///
/// No normalization here: the id must render identically to the package
/// component of the `objectType` strings in the same change set, which is
/// what the follow-up created-object discovery matches against.
pub fn find_published(changes: &[ObjectChange]) -> Result<String, DiscoveryError> {
    changes
        .iter()
        .find(|c| c.kind == ChangeKind::Published)
        .and_then(|c| c.package_id.clone())
        .ok_or(DiscoveryError::NoPublishedPackage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_sig() -> TypeSignature {
        TypeSignature::new("pkg", "token", "Token")
            .with_type_param(TypeSignature::new("pkg", "x", "X"))
    }

    fn sample_changes() -> Vec<ObjectChange> {
        vec![
            ObjectChange::created("pkg::token::Token<pkg::x::X>", "0xAA"),
            ObjectChange {
                kind: ChangeKind::Mutated,
                object_type: Some("pkg::policy::Policy".to_string()),
                object_id: Some("0xBB".to_string()),
                package_id: None,
            },
        ]
    }

    #[test]
    fn test_single_match() {
        let id = find_created(&sample_changes(), &token_sig()).unwrap();
        assert_eq!(id, "0xAA");
    }

    #[test]
    fn test_zero_matches_reports_observed() {
        let expected = TypeSignature::new("0xstale", "token", "Token");
        let err = find_created(&sample_changes(), &expected).unwrap_err();
        let DiscoveryError::NotFound { observed, .. } = &err else {
            panic!("expected NotFound");
        };
        assert_eq!(observed.len(), 2);
        assert_eq!(observed[0], (ChangeKind::Created, "pkg::token::Token<pkg::x::X>".to_string()));
        // Diagnosis needs the full observed set in the message.
        assert!(err.to_string().contains("pkg::policy::Policy"));
    }

    #[test]
    fn test_mutated_record_of_expected_type_does_not_match() {
        let expected = TypeSignature::new("pkg", "policy", "Policy");
        assert!(find_created(&sample_changes(), &expected).is_err());
    }

    #[test]
    fn test_two_matches_take_first_deterministically() {
        let mut changes = sample_changes();
        changes.push(ObjectChange::created("pkg::token::Token<pkg::x::X>", "0xCC"));

        for _ in 0..3 {
            assert_eq!(find_created(&changes, &token_sig()).unwrap(), "0xAA");
        }
    }

    #[test]
    fn test_find_published_reports_verbatim() {
        let changes = vec![
            ObjectChange::created("0x2::package::UpgradeCap", "0x1"),
            ObjectChange::published("0x000ab3"),
        ];
        assert_eq!(find_published(&changes).unwrap(), "0x000ab3");

        let err = find_published(&sample_changes()).unwrap_err();
        assert!(matches!(err, DiscoveryError::NoPublishedPackage));
    }
}
