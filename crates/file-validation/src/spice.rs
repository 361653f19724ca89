//! SPICE kernel filenames.
//!
//! Kernels follow NAIF naming and are only recognised by suffix. The suffix
//! picks the archive subdirectory; nothing else in the name is checked.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{FileNameError, Result};
use crate::file_path::under_root;

/// Kernel suffix to archive subdirectory.
///
/// `.repoint.csv` and `.spin.csv` are two-part suffixes; every other key is the
/// final extension alone.
pub const SPICE_DIR_MAPPING: &[(&str, &str)] = &[
    (".bc", "ck"),
    (".bpc", "pck"),
    (".bsp", "spk"),
    (".mk", "mk"),
    (".repoint.csv", "repoint"),
    (".sff", "activities"),
    (".spin.csv", "spin"),
    (".tf", "fk"),
    (".tls", "lsk"),
    (".tm", "mk"),
    (".tpc", "pck"),
    (".tsc", "sclk"),
];

/// Subdirectory for a suffix key, if it is a known kernel type.
pub fn spice_subdir(extension: &str) -> Option<&'static str> {
    SPICE_DIR_MAPPING
        .iter()
        .find(|(key, _)| *key == extension)
        .map(|(_, subdir)| *subdir)
}

pub(crate) fn known_extensions() -> Vec<&'static str> {
    SPICE_DIR_MAPPING.iter().map(|(key, _)| *key).collect()
}

/// Suffix key used for the table lookup.
///
/// For `.csv` files every suffix is kept (`.spin.csv`), otherwise only the last.
fn extension_key(filename: &str) -> Option<&str> {
    let last_dot = filename.rfind('.')?;
    if &filename[last_dot..] == ".csv" {
        filename.find('.').map(|first_dot| &filename[first_dot..])
    } else {
        Some(&filename[last_dot..])
    }
}

/// A recognised SPICE kernel filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiceFilePath {
    filename: String,
    extension: &'static str,
    subdir: &'static str,
}

impl SpiceFilePath {
    pub fn new(filename: &str) -> Result<Self> {
        let filename = crate::bare_filename(filename);

        let (extension, subdir) = extension_key(filename)
            .and_then(|key| SPICE_DIR_MAPPING.iter().find(|(k, _)| *k == key))
            .copied()
            .ok_or_else(|| FileNameError::UnknownSpiceExtension {
                filename: filename.to_string(),
            })?;

        Ok(Self {
            filename: filename.to_string(),
            extension,
            subdir,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Suffix key, including the leading dot.
    pub fn extension(&self) -> &str {
        self.extension
    }

    /// Archive subdirectory, which doubles as the kernel type (`ck`, `spk`, ...).
    pub fn kernel_type(&self) -> &str {
        self.subdir
    }

    /// `<root>/spice/<subdir>/<filename>`
    pub fn construct_path(&self, archive_root: Option<&Path>) -> PathBuf {
        let relative = PathBuf::from("spice").join(self.subdir).join(&self.filename);
        under_root(archive_root, relative)
    }
}

impl FromStr for SpiceFilePath {
    type Err = FileNameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_suffix() {
        let kernel = SpiceFilePath::new("imap_1000_100_1000_100_01.ap.bc").unwrap();
        assert_eq!(kernel.extension(), ".bc");
        assert_eq!(kernel.kernel_type(), "ck");

        let kernel = SpiceFilePath::new("naif0012.tls").unwrap();
        assert_eq!(kernel.kernel_type(), "lsk");
    }

    #[test]
    fn test_compound_csv_suffix() {
        let kernel = SpiceFilePath::new("imap_2025_122_2025_160_01.spin.csv").unwrap();
        assert_eq!(kernel.extension(), ".spin.csv");
        assert_eq!(kernel.kernel_type(), "spin");

        let kernel = SpiceFilePath::new("imap_2025_122_2025_160_01.repoint.csv").unwrap();
        assert_eq!(kernel.kernel_type(), "repoint");
    }

    #[test]
    fn test_plain_csv_is_not_a_kernel() {
        assert!(SpiceFilePath::new("imap_2025_122.csv").is_err());
        assert!(SpiceFilePath::new("imap_2025_122.a.spin.csv").is_err());
    }

    #[test]
    fn test_unknown_suffix() {
        let err = SpiceFilePath::new("imap_mag_l1a_norm-magi_20240312_v000.cdf").unwrap_err();
        assert!(matches!(err, FileNameError::UnknownSpiceExtension { .. }));
        assert!(err.to_string().contains(".bsp"));
        assert!(SpiceFilePath::new("no_extension").is_err());
    }

    #[test]
    fn test_construct_path() {
        let kernel = SpiceFilePath::new("de440.bsp").unwrap();
        assert_eq!(
            kernel.construct_path(Some(Path::new("/data"))),
            PathBuf::from("/data/spice/spk/de440.bsp")
        );
        assert_eq!(kernel.construct_path(None), PathBuf::from("spice/spk/de440.bsp"));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(spice_subdir(".tm"), Some("mk"));
        assert_eq!(spice_subdir(".ti"), None);
    }
}
