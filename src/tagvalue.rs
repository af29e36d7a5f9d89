//! Tag-value serialization of the SPDX 2.2 document.
//!
//! Sections are emitted in the mandatory order: Document Creation
//! Information first, then one Package Information block per package,
//! each followed by its nested File Information blocks. Element maps
//! are ordered, so the byte output is stable across runs.

use crate::document::Document;
use crate::errors::PresenterError;
use std::io::Write;

/// Serialize a fully-populated document to `output`.
///
/// A failure here means no valid document was produced; partial output
/// must be discarded by the caller.
pub fn save<W: Write>(document: &Document, output: &mut W) -> Result<(), PresenterError> {
    render(document, output).map_err(PresenterError::Encode)
}

fn render<W: Write>(doc: &Document, out: &mut W) -> std::io::Result<()> {
    let ci = &doc.creation_info;
    writeln!(out, "SPDXVersion: {}", ci.spdx_version)?;
    writeln!(out, "DataLicense: {}", ci.data_license)?;
    writeln!(out, "SPDXID: SPDXRef-{}", ci.spdx_identifier.as_str())?;
    writeln!(out, "DocumentName: {}", ci.document_name)?;
    writeln!(out, "DocumentNamespace: {}", ci.document_namespace)?;
    for org in &ci.creator_organizations {
        writeln!(out, "Creator: Organization: {}", org)?;
    }
    for tool in &ci.creator_tools {
        writeln!(out, "Creator: Tool: {}", tool)?;
    }
    writeln!(out, "Created: {}", ci.created)?;

    for package in doc.packages.values() {
        writeln!(out)?;
        writeln!(out, "##### Package: {}", package.name)?;
        writeln!(out)?;
        writeln!(out, "PackageName: {}", package.name)?;
        writeln!(out, "SPDXID: SPDXRef-{}", package.spdx_identifier.as_str())?;
        // PackageVersion is optional; omit the tag rather than emit an
        // empty value.
        if !package.version.is_empty() {
            writeln!(out, "PackageVersion: {}", package.version)?;
        }
        writeln!(out, "PackageDownloadLocation: {}", package.download_location)?;
        writeln!(out, "FilesAnalyzed: {}", package.files.analyzed())?;
        writeln!(
            out,
            "PackageLicenseConcluded: {}",
            package.license_concluded.as_tag_value()
        )?;
        writeln!(
            out,
            "PackageLicenseDeclared: {}",
            package.license_declared.as_tag_value()
        )?;
        writeln!(out, "PackageCopyrightText: {}", package.copyright_text)?;

        for (_, file) in package.files.records() {
            writeln!(out)?;
            writeln!(out, "FileName: {}", file.name)?;
            writeln!(out, "SPDXID: SPDXRef-{}", file.spdx_identifier.as_str())?;
            writeln!(
                out,
                "LicenseConcluded: {}",
                file.license_concluded.as_tag_value()
            )?;
            for info in &file.license_info_in_file {
                writeln!(out, "LicenseInfoInFile: {}", info.as_tag_value())?;
            }
            writeln!(out, "FileCopyrightText: {}", file.copyright_text)?;
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{
        CreationInfo, ElementId, FileRecord, NO_ASSERTION, PackageFiles, PackageRecord,
    };
    use crate::license::ConcludedLicense;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn creation_info() -> CreationInfo {
        CreationInfo {
            spdx_version: "SPDX-2.2".to_string(),
            data_license: "CC0-1.0".to_string(),
            spdx_identifier: ElementId::document(),
            document_name: "alpine:3.19".to_string(),
            document_namespace: "https://stondo.dev/spdx-presenter/image/alpine:3.19".to_string(),
            creator_organizations: vec!["Stondo Labs".to_string()],
            creator_tools: vec!["spdx-presenter-0.1.0".to_string()],
            created: "2024-03-01T12:00:00Z".to_string(),
        }
    }

    fn render_to_string(doc: &Document) -> String {
        let mut buf = Vec::new();
        save(doc, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_envelope_only_document() {
        let doc = Document {
            creation_info: creation_info(),
            packages: BTreeMap::new(),
        };

        let expected = "\
SPDXVersion: SPDX-2.2
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: alpine:3.19
DocumentNamespace: https://stondo.dev/spdx-presenter/image/alpine:3.19
Creator: Organization: Stondo Labs
Creator: Tool: spdx-presenter-0.1.0
Created: 2024-03-01T12:00:00Z
";
        assert_eq!(render_to_string(&doc), expected);
    }

    #[test]
    fn test_package_block_with_files() {
        let file_id = ElementId::for_file("/usr/bin/curl");
        let mut files = BTreeMap::new();
        files.insert(
            file_id.clone(),
            FileRecord {
                name: "/usr/bin/curl".to_string(),
                spdx_identifier: file_id,
                license_concluded: ConcludedLicense::NoAssertion,
                license_info_in_file: vec![ConcludedLicense::NoAssertion],
                copyright_text: NO_ASSERTION.to_string(),
            },
        );

        let pkg_id = ElementId::for_package("deb", "curl");
        let mut packages = BTreeMap::new();
        packages.insert(
            pkg_id.clone(),
            PackageRecord {
                name: "curl".to_string(),
                spdx_identifier: pkg_id,
                version: "7.68".to_string(),
                download_location: NO_ASSERTION.to_string(),
                license_concluded: ConcludedLicense::NoAssertion,
                license_declared: ConcludedLicense::License("MIT".to_string()),
                copyright_text: NO_ASSERTION.to_string(),
                files: PackageFiles::Analyzed(files),
            },
        );

        let doc = Document {
            creation_info: creation_info(),
            packages,
        };

        let rendered = render_to_string(&doc);
        let expected_tail = "\
##### Package: curl

PackageName: curl
SPDXID: SPDXRef-Package-deb-curl
PackageVersion: 7.68
PackageDownloadLocation: NOASSERTION
FilesAnalyzed: true
PackageLicenseConcluded: NOASSERTION
PackageLicenseDeclared: MIT
PackageCopyrightText: NOASSERTION

FileName: /usr/bin/curl
SPDXID: SPDXRef-/usr/bin/curl
LicenseConcluded: NOASSERTION
LicenseInfoInFile: NOASSERTION
FileCopyrightText: NOASSERTION
";
        assert!(rendered.ends_with(expected_tail), "got:\n{}", rendered);
    }

    /// Sink that accepts a fixed number of bytes, then fails.
    struct FailingSink {
        remaining: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.remaining == 0 {
                return Err(std::io::Error::other("sink unwritable"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unwritable_sink_fails_the_operation() {
        let doc = Document {
            creation_info: creation_info(),
            packages: BTreeMap::new(),
        };

        let mut sink = FailingSink { remaining: 16 };
        let err = save(&doc, &mut sink).unwrap_err();
        assert!(matches!(err, PresenterError::Encode(_)), "got: {:?}", err);
    }

    #[test]
    fn test_unanalyzed_package_block() {
        let pkg_id = ElementId::for_package("binary", "busybox");
        let mut packages = BTreeMap::new();
        packages.insert(
            pkg_id.clone(),
            PackageRecord {
                name: "busybox".to_string(),
                spdx_identifier: pkg_id,
                version: String::new(),
                download_location: NO_ASSERTION.to_string(),
                license_concluded: ConcludedLicense::NoAssertion,
                license_declared: ConcludedLicense::None,
                copyright_text: NO_ASSERTION.to_string(),
                files: PackageFiles::NotAnalyzed,
            },
        );

        let doc = Document {
            creation_info: creation_info(),
            packages,
        };

        let rendered = render_to_string(&doc);
        assert!(rendered.contains("FilesAnalyzed: false\n"));
        assert!(rendered.contains("PackageLicenseDeclared: NONE\n"));
        // Optional empty version is omitted entirely.
        assert!(!rendered.contains("PackageVersion:"));
        // No file blocks for an unanalyzed package.
        assert!(!rendered.contains("FileName:"));
    }
}
