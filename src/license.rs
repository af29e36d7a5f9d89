//! License identifier resolution.
//!
//! Raw license strings from the catalog are matched against the SPDX
//! license list and reduced to a canonical identifier. Anything that is
//! not a single atomic identifier (including AND/OR/WITH expressions)
//! fails the lookup and is left for the caller to downgrade.

use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// The license classification concluded for a catalog entity.
///
/// Kept as a tagged union internally; the `NONE`/`NOASSERTION` literals
/// only appear at the tag-value encoding boundary, so a raw license
/// string that happens to spell a sentinel can never be conflated with
/// the sentinel itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConcludedLicense {
    /// Confirmed absence: the package carries no license information.
    None,
    /// No determination was made or possible.
    NoAssertion,
    /// A canonical SPDX license identifier.
    License(String),
}

impl ConcludedLicense {
    /// The literal the tag-value encoding requires for this classification.
    pub fn as_tag_value(&self) -> &str {
        match self {
            ConcludedLicense::None => "NONE",
            ConcludedLicense::NoAssertion => "NOASSERTION",
            ConcludedLicense::License(id) => id,
        }
    }
}

#[derive(Error, Debug)]
#[error("unrecognized license: {0:?}")]
pub struct UnknownLicense(pub String);

/// Lookup capability mapping a raw license string to a canonical
/// SPDX identifier.
pub trait LicenseLookup {
    fn lookup(&self, raw: &str) -> Result<String, UnknownLicense>;
}

/// Lookup backed by the bundled SPDX license list.
///
/// Matching is case-insensitive on the identifier and ignores
/// surrounding whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpdxLicenseList;

fn index() -> &'static HashMap<String, &'static str> {
    static INDEX: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
    INDEX.get_or_init(|| {
        include_str!("../data/license-ids.txt")
            .lines()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| (id.to_lowercase(), id))
            .collect()
    })
}

impl LicenseLookup for SpdxLicenseList {
    fn lookup(&self, raw: &str) -> Result<String, UnknownLicense> {
        let key = raw.trim().to_lowercase();
        index()
            .get(&key)
            .map(|id| (*id).to_string())
            .ok_or_else(|| UnknownLicense(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact() {
        assert_eq!(SpdxLicenseList.lookup("MIT").unwrap(), "MIT");
        assert_eq!(SpdxLicenseList.lookup("Apache-2.0").unwrap(), "Apache-2.0");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(SpdxLicenseList.lookup("mit").unwrap(), "MIT");
        assert_eq!(SpdxLicenseList.lookup("  gpl-2.0-ONLY ").unwrap(), "GPL-2.0-only");
    }

    #[test]
    fn test_lookup_rejects_unknown() {
        assert!(SpdxLicenseList.lookup("totally-bogus-license").is_err());
        assert!(SpdxLicenseList.lookup("").is_err());
    }

    #[test]
    fn test_lookup_rejects_expressions() {
        // Single atomic identifiers only; expressions are not resolved.
        assert!(SpdxLicenseList.lookup("MIT OR Apache-2.0").is_err());
        assert!(SpdxLicenseList.lookup("GPL-2.0-only WITH Classpath-exception-2.0").is_err());
    }

    #[test]
    fn test_sentinel_literals_are_not_identifiers() {
        assert!(SpdxLicenseList.lookup("NONE").is_err());
        assert!(SpdxLicenseList.lookup("NOASSERTION").is_err());
    }

    #[test]
    fn test_tag_value_rendering() {
        assert_eq!(ConcludedLicense::None.as_tag_value(), "NONE");
        assert_eq!(ConcludedLicense::NoAssertion.as_tag_value(), "NOASSERTION");
        assert_eq!(
            ConcludedLicense::License("MIT".to_string()).as_tag_value(),
            "MIT"
        );
        // A real identifier spelling a sentinel stays distinguishable
        // until rendering.
        assert_ne!(
            ConcludedLicense::License("NONE".to_string()),
            ConcludedLicense::None
        );
    }
}
