//! Ordered registry of processing inputs and its serialized form.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ProcessingInputError, Result};
use crate::fetch::FileFetcher;
use crate::input::{AncillaryInput, DataType, ProcessingInput, ScienceInput, SpiceInput};

/// Wire form of a single input: its data type tag and filenames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SerializedInput {
    #[serde(rename = "type")]
    data_type: String,
    files: Vec<String>,
}

/// Processing inputs in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingInputCollection {
    processing_input: Vec<ProcessingInput>,
}

impl ProcessingInputCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input after every existing entry.
    pub fn add(&mut self, input: impl Into<ProcessingInput>) {
        self.processing_input.push(input.into());
    }

    pub fn processing_inputs(&self) -> &[ProcessingInput] {
        &self.processing_input
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessingInput> {
        self.processing_input.iter()
    }

    pub fn len(&self) -> usize {
        self.processing_input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processing_input.is_empty()
    }

    /// Archive paths of every file in matching inputs, in collection order.
    ///
    /// `source` must equal the input's source. `descriptor` only has to appear
    /// somewhere in the input's descriptor, so `45se` selects every
    /// `45sensor-*` product. `None` matches anything.
    pub fn get_file_paths(
        &self,
        archive_root: Option<&Path>,
        source: Option<&str>,
        descriptor: Option<&str>,
    ) -> Vec<PathBuf> {
        self.processing_input
            .iter()
            .filter(|input| source.map_or(true, |s| input.source() == s))
            .filter(|input| descriptor.map_or(true, |d| input.descriptor().contains(d)))
            .flat_map(|input| input.construct_paths(archive_root))
            .collect()
    }

    pub fn get_science_inputs(&self) -> Vec<&ScienceInput> {
        self.processing_input
            .iter()
            .filter_map(|input| match input {
                ProcessingInput::Science(science) => Some(science),
                _ => None,
            })
            .collect()
    }

    pub fn get_ancillary_inputs(&self) -> Vec<&AncillaryInput> {
        self.processing_input
            .iter()
            .filter_map(|input| match input {
                ProcessingInput::Ancillary(ancillary) => Some(ancillary),
                _ => None,
            })
            .collect()
    }

    pub fn get_spice_inputs(&self) -> Vec<&SpiceInput> {
        self.processing_input
            .iter()
            .filter_map(|input| match input {
                ProcessingInput::Spice(spice) => Some(spice),
                _ => None,
            })
            .collect()
    }

    /// Encode every input as `{"type": <data type>, "files": [...]}`, in order.
    ///
    /// Only tags and filenames are written; the validated fields are rebuilt by
    /// [`deserialize`](Self::deserialize).
    pub fn serialize(&self) -> Result<String> {
        let entries: Vec<SerializedInput> = self
            .processing_input
            .iter()
            .map(|input| SerializedInput {
                data_type: input.data_type().to_string(),
                files: input.filenames().to_vec(),
            })
            .collect();

        Ok(serde_json::to_string(&entries)?)
    }

    /// Decode `payload` and append its inputs after the existing ones.
    ///
    /// Every file is classified and validated again. If any entry fails,
    /// nothing is appended.
    pub fn deserialize(&mut self, payload: &str) -> Result<()> {
        let entries: Vec<SerializedInput> = serde_json::from_str(payload)?;

        let decoded = entries
            .into_iter()
            .map(|entry| {
                let data_type: DataType = entry.data_type.parse()?;
                ProcessingInput::from_data_type(data_type, &entry.files)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            existing = self.processing_input.len(),
            appended = decoded.len(),
            "Deserialized processing inputs"
        );
        self.processing_input.extend(decoded);
        Ok(())
    }

    /// Make every file in the collection available locally, one at a time.
    ///
    /// Stops at the first failure. Returns local paths in collection order.
    pub async fn download_all_files<F>(&self, fetcher: &F) -> Result<Vec<PathBuf>>
    where
        F: FileFetcher + ?Sized,
    {
        let files: Vec<_> = self
            .processing_input
            .iter()
            .flat_map(ProcessingInput::imap_file_paths)
            .collect();
        info!(count = files.len(), "Fetching processing input files");

        let mut local_paths = Vec::with_capacity(files.len());
        for file in &files {
            let path = fetcher
                .fetch(file)
                .await
                .map_err(|e| ProcessingInputError::Fetch {
                    filename: file.filename().to_string(),
                    source: Box::new(e),
                })?;
            local_paths.push(path);
        }
        Ok(local_paths)
    }
}

impl<I: Into<ProcessingInput>> FromIterator<I> for ProcessingInputCollection {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            processing_input: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<I: Into<ProcessingInput>> Extend<I> for ProcessingInputCollection {
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        self.processing_input.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a ProcessingInputCollection {
    type Item = &'a ProcessingInput;
    type IntoIter = std::slice::Iter<'a, ProcessingInput>;

    fn into_iter(self) -> Self::IntoIter {
        self.processing_input.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let collection: ProcessingInputCollection = [ProcessingInput::from(
            ScienceInput::new(["imap_glows_l1a_hist_20250202_v001.cdf"]).unwrap(),
        )]
        .into_iter()
        .collect();

        let payload = collection.serialize().unwrap();
        assert_eq!(
            payload,
            r#"[{"type":"l1a","files":["imap_glows_l1a_hist_20250202_v001.cdf"]}]"#
        );
    }

    #[test]
    fn test_unknown_tag_appends_nothing() {
        let mut collection = ProcessingInputCollection::new();
        let payload = r#"[
            {"type": "ancillary", "files": ["imap_mag_l1b-cal_20250101_v001.cdf"]},
            {"type": "calibration", "files": ["imap_mag_l1b-cal_20250101_v001.cdf"]}
        ]"#;

        let err = collection.deserialize(payload).unwrap_err();
        assert!(matches!(err, ProcessingInputError::UnknownDataType(tag) if tag == "calibration"));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_malformed_payload() {
        let mut collection = ProcessingInputCollection::new();
        let err = collection.deserialize(r#"{"type": "l1a"}"#).unwrap_err();
        assert!(matches!(err, ProcessingInputError::Serialization(_)));
    }

    #[test]
    fn test_empty_collection_round_trip() {
        let collection = ProcessingInputCollection::new();
        let payload = collection.serialize().unwrap();
        assert_eq!(payload, "[]");

        let mut decoded = ProcessingInputCollection::new();
        decoded.deserialize(&payload).unwrap();
        assert!(decoded.is_empty());
    }
}
