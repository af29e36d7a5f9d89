//! Output data model: the SPDX 2.2 document.
//!
//! One document is built fresh per presentation run and discarded after
//! encoding. Element maps are ordered so that repeated runs over the
//! same catalog serialize identically (modulo the creation timestamp).

use crate::license::ConcludedLicense;
use std::collections::BTreeMap;

/// 2.1: SPDX Version (mandatory, one)
pub const SPDX_VERSION: &str = "SPDX-2.2";

/// 2.2: Data License (mandatory, one)
pub const DATA_LICENSE: &str = "CC0-1.0";

/// The sentinel for mandatory fields where no determination was made.
pub const NO_ASSERTION: &str = "NOASSERTION";

/// An SPDX element identifier, stored without the `SPDXRef-` prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    /// The root identifier of the document itself.
    pub fn document() -> Self {
        ElementId("DOCUMENT".to_string())
    }

    /// Synthesize a package identifier from its type and name.
    ///
    /// Known weakness carried over from upstream: two packages sharing
    /// type and name collide. Tolerated, not silently repaired.
    pub fn for_package(pkg_type: &str, name: &str) -> Self {
        ElementId(format!("Package-{}-{}", pkg_type, name))
    }

    /// Use a file path directly as an identifier.
    ///
    /// Assumes the path is a legal identifier token in the tag-value
    /// encoding; two packages owning the same path produce colliding
    /// identifiers.
    pub fn for_file(path: &str) -> Self {
        ElementId(path.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Document Creation Information (section 2 of the SPDX 2.2 spec).
#[derive(Debug, Clone)]
pub struct CreationInfo {
    pub spdx_version: String,
    pub data_license: String,
    pub spdx_identifier: ElementId,
    pub document_name: String,
    pub document_namespace: String,
    /// 2.8: Creators (mandatory, one or many). Always one organization
    /// and one tool here.
    pub creator_organizations: Vec<String>,
    pub creator_tools: Vec<String>,
    /// 2.9: Created, RFC3339 formatted.
    pub created: String,
}

/// The file set of a package.
///
/// A package whose metadata exposes no file ownership was never
/// analyzed, and the variant split makes it impossible for such a
/// package to carry file records.
#[derive(Debug, Clone)]
pub enum PackageFiles {
    NotAnalyzed,
    Analyzed(BTreeMap<ElementId, FileRecord>),
}

impl PackageFiles {
    /// 3.8: the FilesAnalyzed flag.
    pub fn analyzed(&self) -> bool {
        matches!(self, PackageFiles::Analyzed(_))
    }

    /// The file records, empty when not analyzed.
    pub fn records(&self) -> impl Iterator<Item = (&ElementId, &FileRecord)> {
        match self {
            PackageFiles::NotAnalyzed => None,
            PackageFiles::Analyzed(files) => Some(files.iter()),
        }
        .into_iter()
        .flatten()
    }
}

/// Package Information (section 3 of the SPDX 2.2 spec).
///
/// Verification code and checksums are intentionally absent: only
/// tool-computed integrity hashes belong there, and none are computed.
/// Optional descriptive fields (supplier, originator, home page,
/// summary, external references, ...) are asserted empty rather than
/// guessed, and therefore have no representation here.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    /// 3.1: Package Name (mandatory, one)
    pub name: String,
    /// 3.2: Package SPDX Identifier (mandatory, one)
    pub spdx_identifier: ElementId,
    /// 3.3: Package Version (optional, one)
    pub version: String,
    /// 3.7: Package Download Location (mandatory, one)
    pub download_location: String,
    /// 3.13: Concluded License (mandatory, one)
    pub license_concluded: ConcludedLicense,
    /// 3.15: Declared License (mandatory, one)
    pub license_declared: ConcludedLicense,
    /// 3.17: Copyright Text (mandatory, one)
    pub copyright_text: String,
    /// 3.8 plus the nested File Information blocks.
    pub files: PackageFiles,
}

/// File Information (section 4 of the SPDX 2.2 spec).
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// 4.1: File Name (mandatory, one)
    pub name: String,
    /// 4.2: File SPDX Identifier (mandatory, one)
    pub spdx_identifier: ElementId,
    /// 4.5: Concluded License (mandatory, one)
    pub license_concluded: ConcludedLicense,
    /// 4.6: License Information in File (mandatory, one or many)
    pub license_info_in_file: Vec<ConcludedLicense>,
    /// 4.8: Copyright Text (mandatory, one)
    pub copyright_text: String,
}

/// The fully-populated document handed to the tag-value encoder.
#[derive(Debug, Clone)]
pub struct Document {
    pub creation_info: CreationInfo,
    pub packages: BTreeMap<ElementId, PackageRecord>,
}
