//! Pass archive packaging.
//!
//! Assembles the finished members into a deflate-compressed ZIP. Member order
//! is a contract with the consuming wallet client, not cosmetic: the
//! descriptor first, then the icons, then the manifest, then the detached
//! signature. Nothing may be omitted or reordered.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::assets::{ICON_2X_FILE, ICON_FILE};
use super::errors::PassBuildError;
use super::manifest::{MANIFEST_FILE, SIGNATURE_FILE};
use super::PASS_FILE;

/// Required archive member order.
pub const MEMBER_ORDER: [&str; 5] = [
    PASS_FILE,
    ICON_FILE,
    ICON_2X_FILE,
    MANIFEST_FILE,
    SIGNATURE_FILE,
];

/// Finalized byte content for every archive member.
#[derive(Debug, Clone)]
pub struct ArchiveMembers {
    pub pass_json: Vec<u8>,
    pub icon: Vec<u8>,
    pub icon_2x: Vec<u8>,
    pub manifest: Vec<u8>,
    pub signature: Vec<u8>,
}

impl ArchiveMembers {
    /// Members paired with their archive names, in required order.
    fn in_order(&self) -> [(&'static str, &[u8]); 5] {
        [
            (PASS_FILE, self.pass_json.as_slice()),
            (ICON_FILE, self.icon.as_slice()),
            (ICON_2X_FILE, self.icon_2x.as_slice()),
            (MANIFEST_FILE, self.manifest.as_slice()),
            (SIGNATURE_FILE, self.signature.as_slice()),
        ]
    }
}

/// Write the members into a deflate ZIP, in required order, and return the
/// archive bytes.
pub fn build_archive(members: &ArchiveMembers) -> Result<Vec<u8>, PassBuildError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in members.in_order() {
        zip.start_file(name, options)
            .map_err(|e| PassBuildError::packaging(format!("failed to start {name}: {e}")))?;
        zip.write_all(bytes)
            .map_err(|e| PassBuildError::packaging(format!("failed to write {name}: {e}")))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| PassBuildError::packaging(format!("failed to finalize archive: {e}")))?;
    Ok(cursor.into_inner())
}

/// Suggested download filename for a merchant's pass.
///
/// Lower-cased, spaces replaced by hyphens.
pub fn suggested_filename(merchant_name: &str) -> String {
    let slug = merchant_name.trim().to_lowercase().replace(' ', "-");
    format!("{slug}-loyalty.pkpass")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn test_members() -> ArchiveMembers {
        ArchiveMembers {
            pass_json: b"{\"formatVersion\":1}".to_vec(),
            icon: b"icon-bytes".to_vec(),
            icon_2x: b"icon-2x-bytes".to_vec(),
            manifest: b"{\"pass.json\":\"digest\"}".to_vec(),
            signature: b"der-signature".to_vec(),
        }
    }

    #[test]
    fn archive_members_appear_in_required_order() {
        let bytes = build_archive(&test_members()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(archive.len(), MEMBER_ORDER.len());
        for (index, expected) in MEMBER_ORDER.iter().enumerate() {
            let entry = archive.by_index(index).unwrap();
            assert_eq!(entry.name(), *expected);
        }
    }

    #[test]
    fn archive_members_use_deflate() {
        let bytes = build_archive(&test_members()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        for index in 0..archive.len() {
            let entry = archive.by_index(index).unwrap();
            assert_eq!(entry.compression(), CompressionMethod::Deflated);
        }
    }

    #[test]
    fn archive_round_trips_member_bytes() {
        let members = test_members();
        let bytes = build_archive(&members).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut contents = Vec::new();
        archive
            .by_name("signature")
            .unwrap()
            .read_to_end(&mut contents)
            .unwrap();
        assert_eq!(contents, members.signature);

        contents.clear();
        archive
            .by_name("pass.json")
            .unwrap()
            .read_to_end(&mut contents)
            .unwrap();
        assert_eq!(contents, members.pass_json);
    }

    #[test]
    fn filename_slug_lowercases_and_hyphenates() {
        assert_eq!(suggested_filename("Corner Cafe"), "corner-cafe-loyalty.pkpass");
        assert_eq!(
            suggested_filename("The Daily Grind Coffee"),
            "the-daily-grind-coffee-loyalty.pkpass"
        );
    }

    #[test]
    fn filename_slug_is_idempotent_for_clean_names() {
        assert_eq!(suggested_filename("espresso"), "espresso-loyalty.pkpass");
    }
}
