//! Filename validation and archive layout for IMAP data files.
//!
//! Every file in the archive follows one of three naming conventions:
//!
//! - science products: `imap_<instrument>_<level>_<descriptor>_<date>[-repointNNNNN]_<version>.<cdf|pkts>`
//! - ancillary products: `imap_<instrument>_<descriptor>_<date>[-<date>]_<version>.<ext>`
//! - SPICE kernels: recognised purely by their NAIF suffix
//!
//! [`classify`] decides which convention a name follows and returns a fully
//! validated [`ImapFilePath`]. Holding one of the path types is proof that the
//! name passed every check; there is no partially valid value.
//! [`ImapFilePath::construct_path`] then derives where the file lives under an
//! archive root.

pub mod ancillary;
pub mod error;
pub mod file_path;
pub mod science;
pub mod spice;

pub use ancillary::AncillaryFilePath;
pub use error::{FileNameError, Result};
pub use file_path::{classify, FileFamily, ImapFilePath};
pub use science::ScienceFilePath;
pub use spice::{spice_subdir, SpiceFilePath, SPICE_DIR_MAPPING};

use std::path::Path;

/// Strip any leading directories, leaving the bare filename.
pub(crate) fn bare_filename(input: &str) -> &str {
    Path::new(input)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(input)
}
