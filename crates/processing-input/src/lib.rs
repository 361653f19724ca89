//! Processing inputs: the validated files a pipeline run depends on.
//!
//! A [`ProcessingInput`] groups one or more files of a single family that share
//! an instrument and descriptor (and, for science files, a data level). A
//! [`ProcessingInputCollection`] keeps those groups in insertion order and is
//! what gets handed from one pipeline stage to the next, either in memory or
//! through its serialized form.
//!
//! # Hand-off between stages
//!
//! ```ignore
//! let payload = collection.serialize()?;
//! // ... next stage ...
//! let mut inputs = ProcessingInputCollection::new();
//! inputs.deserialize(&payload)?;
//! ```

pub mod collection;
pub mod error;
pub mod fetch;
pub mod input;

// Re-exports
pub use collection::ProcessingInputCollection;
pub use error::{ProcessingInputError, Result};
pub use fetch::FileFetcher;
pub use input::{
    AncillaryInput, DataType, ProcessingInput, ProcessingInputType, ScienceInput, SpiceInput,
};
