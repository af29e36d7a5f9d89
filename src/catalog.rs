//! Input data model: the package catalog snapshot.
//!
//! Catalog construction happens upstream; this crate only consumes a
//! serialized snapshot of it. The snapshot is read-only for the duration
//! of a presentation run.

use serde::Deserialize;

/// Metadata describing the scanned artifact (e.g. a container image).
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    /// The identifying string the user supplied for the scan target.
    /// Used verbatim for document naming and namespacing.
    pub user_input: String,
}

/// Package metadata payload, tagged by the cataloger that produced it.
///
/// Only the OS package manager variants record which files the package
/// installed; a package without metadata has no file-ownership claim.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PackageMetadata {
    DpkgEntry {
        #[serde(default)]
        files: Vec<String>,
    },
    RpmEntry {
        #[serde(default)]
        files: Vec<String>,
    },
    ApkEntry {
        #[serde(default)]
        files: Vec<String>,
    },
}

impl PackageMetadata {
    /// The absolute paths this package claims to have installed.
    pub fn owned_files(&self) -> &[String] {
        match self {
            PackageMetadata::DpkgEntry { files }
            | PackageMetadata::RpmEntry { files }
            | PackageMetadata::ApkEntry { files } => files,
        }
    }
}

/// A single discovered package.
///
/// The type/name pair is not guaranteed globally unique; license strings
/// arrive unvalidated from the cataloger.
#[derive(Deserialize, Debug, Clone)]
pub struct Package {
    #[serde(rename = "type")]
    pub pkg_type: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub metadata: Option<PackageMetadata>,
}

/// A finite, order-unspecified collection of packages.
#[derive(Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct Catalog {
    packages: Vec<Package>,
}

impl Catalog {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    /// Iterate the catalog packages (read-only).
    pub fn enumerate(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }
}

/// The on-disk snapshot format: scan source plus the discovered packages.
#[derive(Deserialize, Debug)]
pub struct Snapshot {
    pub source: SourceMetadata,
    #[serde(default, rename = "packages")]
    pub catalog: Catalog,
}
