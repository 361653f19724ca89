//! Client for the IMAP data access API.
//!
//! [`ArchiveClient`] downloads files into the local archive layout, uploads
//! finished products and queries the remote catalog. It also implements
//! [`processing_input::FileFetcher`], so a processing input collection can
//! pull its dependencies through it.

pub mod client;
pub mod error;
pub mod query;

pub use client::ArchiveClient;
pub use error::{ArchiveError, Result};
pub use query::{filter_latest, QueryParams, QueryRecord};
