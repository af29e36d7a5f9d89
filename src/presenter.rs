//! Projects a package catalog into an SPDX 2.2 document.
//!
//! One presentation call walks the catalog once, builds the document
//! envelope and all package/file records, and hands the finished
//! document to the tag-value encoder. Per-package license resolution
//! failures degrade to `NOASSERTION` with a warning; only the terminal
//! encode/write step can fail the whole operation.

use crate::catalog::{Catalog, Package, SourceMetadata};
use crate::document::{
    CreationInfo, DATA_LICENSE, Document, ElementId, FileRecord, NO_ASSERTION, PackageFiles,
    PackageRecord, SPDX_VERSION,
};
use crate::errors::PresenterError;
use crate::license::{ConcludedLicense, LicenseLookup};
use crate::tagvalue;
use chrono::{DateTime, SecondsFormat, Utc};
use log::warn;
use std::collections::BTreeMap;
use std::io::Write;

/// 2.8: the fixed organization creator.
const CREATOR_ORGANIZATION: &str = "Stondo Labs";

/// 2.5: namespace URI template. Purely an identifier; neither globally
/// unique nor dereferenceable.
const NAMESPACE_BASE: &str = "https://stondo.dev/spdx-presenter/image";

/// Wall-clock capability, injected so document assembly stays
/// deterministic under test.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Name and version of the running application, used in the tool
/// creator entry.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    pub name: String,
    pub version: String,
}

impl ToolMetadata {
    /// Build-time metadata of this crate.
    pub fn from_build() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn creator_text(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// Present the catalog to the given writer as an SPDX 2.2 tag-value
/// document. Any failure means no valid document was produced.
pub fn present<W: Write>(
    catalog: &Catalog,
    source: &SourceMetadata,
    lookup: &dyn LicenseLookup,
    clock: &dyn Clock,
    tool: &ToolMetadata,
    output: &mut W,
) -> Result<(), PresenterError> {
    let document = assemble(catalog, source, lookup, clock, tool);
    tagvalue::save(&document, output)
}

/// Build the document without serializing it.
pub fn assemble(
    catalog: &Catalog,
    source: &SourceMetadata,
    lookup: &dyn LicenseLookup,
    clock: &dyn Clock,
    tool: &ToolMetadata,
) -> Document {
    Document {
        creation_info: creation_info(source, clock, tool),
        packages: project_packages(catalog, lookup),
    }
}

fn creation_info(source: &SourceMetadata, clock: &dyn Clock, tool: &ToolMetadata) -> CreationInfo {
    CreationInfo {
        spdx_version: SPDX_VERSION.to_string(),
        data_license: DATA_LICENSE.to_string(),
        spdx_identifier: ElementId::document(),
        // 2.4: the user input string, verbatim; escaping is the
        // encoder's concern.
        document_name: source.user_input.clone(),
        document_namespace: format!("{}/{}", NAMESPACE_BASE, source.user_input),
        creator_organizations: vec![CREATOR_ORGANIZATION.to_string()],
        creator_tools: vec![tool.creator_text()],
        created: clock.now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

fn project_packages(
    catalog: &Catalog,
    lookup: &dyn LicenseLookup,
) -> BTreeMap<ElementId, PackageRecord> {
    let mut records = BTreeMap::new();
    for package in catalog.enumerate() {
        let id = ElementId::for_package(&package.pkg_type, &package.name);
        records.insert(id.clone(), package_record(package, id, lookup));
    }
    records
}

fn package_record(package: &Package, id: ElementId, lookup: &dyn LicenseLookup) -> PackageRecord {
    PackageRecord {
        name: package.name.clone(),
        spdx_identifier: id,
        version: package.version.clone(),
        download_location: NO_ASSERTION.to_string(),
        license_concluded: ConcludedLicense::NoAssertion,
        license_declared: declared_license(package, lookup),
        copyright_text: NO_ASSERTION.to_string(),
        files: package_files(package),
    }
}

/// Exactly one of three outcomes: no license strings at all means
/// confirmed absence, a resolvable first string yields its canonical
/// identifier, anything else downgrades to no assertion.
fn declared_license(package: &Package, lookup: &dyn LicenseLookup) -> ConcludedLicense {
    // Only the first license string is considered; expressions are
    // explicitly unsupported.
    match package.licenses.first() {
        None => ConcludedLicense::None,
        Some(raw) => match lookup.lookup(raw) {
            Ok(id) => ConcludedLicense::License(id),
            Err(err) => {
                warn!(
                    "unable to resolve license for package type={} name={}: {}",
                    package.pkg_type, package.name, err
                );
                ConcludedLicense::NoAssertion
            }
        },
    }
}

fn package_files(package: &Package) -> PackageFiles {
    match &package.metadata {
        None => PackageFiles::NotAnalyzed,
        Some(metadata) => {
            let mut files = BTreeMap::new();
            for path in metadata.owned_files() {
                let id = ElementId::for_file(path);
                files.insert(id.clone(), file_record(path, id));
            }
            PackageFiles::Analyzed(files)
        }
    }
}

fn file_record(path: &str, id: ElementId) -> FileRecord {
    FileRecord {
        name: path.to_string(),
        spdx_identifier: id,
        license_concluded: ConcludedLicense::NoAssertion,
        license_info_in_file: vec![ConcludedLicense::NoAssertion],
        copyright_text: NO_ASSERTION.to_string(),
    }
}
