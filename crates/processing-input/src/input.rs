//! Groups of same-source files that make up one dependency of a pipeline run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use file_validation::{
    classify, AncillaryFilePath, FileFamily, ImapFilePath, ScienceFilePath, SpiceFilePath,
};
use imap_common::{DataLevel, DateRange, Instrument};
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingInputError, Result};

/// Source name shared by every SPICE input.
pub const SPICE_SOURCE: &str = "spice";

/// Which family of files an input holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingInputType {
    ScienceFile,
    AncillaryFile,
    SpiceFile,
}

impl ProcessingInputType {
    pub fn family(&self) -> FileFamily {
        match self {
            ProcessingInputType::ScienceFile => FileFamily::Science,
            ProcessingInputType::AncillaryFile => FileFamily::Ancillary,
            ProcessingInputType::SpiceFile => FileFamily::Spice,
        }
    }
}

/// Tag identifying what an input holds: a science data level, or the literal
/// `ancillary` / `spice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Science(DataLevel),
    Ancillary,
    Spice,
}

impl DataType {
    pub fn input_type(&self) -> ProcessingInputType {
        match self {
            DataType::Science(_) => ProcessingInputType::ScienceFile,
            DataType::Ancillary => ProcessingInputType::AncillaryFile,
            DataType::Spice => ProcessingInputType::SpiceFile,
        }
    }
}

impl FromStr for DataType {
    type Err = ProcessingInputError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ancillary" => Ok(DataType::Ancillary),
            "spice" => Ok(DataType::Spice),
            level => DataLevel::from_str(level)
                .map(DataType::Science)
                .map_err(|_| ProcessingInputError::UnknownDataType(s.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Science(level) => write!(f, "{level}"),
            DataType::Ancillary => f.write_str("ancillary"),
            DataType::Spice => f.write_str("spice"),
        }
    }
}

/// Classify every filename and keep only those of the expected family.
fn classify_members<T>(
    filenames: &[String],
    expected: FileFamily,
    pick: impl Fn(ImapFilePath) -> Option<T>,
) -> Result<Vec<T>> {
    if filenames.is_empty() {
        return Err(ProcessingInputError::Empty);
    }

    filenames
        .iter()
        .map(|filename| {
            let path = classify(filename)?;
            let found = path.family();
            pick(path).ok_or_else(|| ProcessingInputError::WrongFamily {
                filename: filename.clone(),
                expected,
                found,
            })
        })
        .collect()
}

/// Check that every member shares the first member's grouping key.
fn ensure_same_source<T, K>(
    filenames: &[String],
    members: &[T],
    key: impl Fn(&T) -> K,
) -> Result<()>
where
    K: PartialEq + fmt::Display,
{
    let Some(first) = members.first() else {
        return Err(ProcessingInputError::Empty);
    };
    let expected = key(first);

    for (filename, member) in filenames.iter().zip(members) {
        let found = key(member);
        if found != expected {
            return Err(ProcessingInputError::MixedSources {
                filename: filename.clone(),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }
    Ok(())
}

fn collect_filenames<I, S>(filenames: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    filenames.into_iter().map(|f| f.as_ref().to_string()).collect()
}

/// Grouping key for science files.
#[derive(PartialEq)]
struct ScienceKey {
    instrument: Instrument,
    data_level: DataLevel,
    descriptor: String,
}

impl fmt::Display for ScienceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.instrument, self.data_level, self.descriptor)
    }
}

/// Science files from one instrument, level and descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScienceInput {
    filenames: Vec<String>,
    files: Vec<ScienceFilePath>,
}

impl ScienceInput {
    pub fn new<I, S>(filenames: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filenames = collect_filenames(filenames);
        let files = classify_members(&filenames, FileFamily::Science, |path| match path {
            ImapFilePath::Science(p) => Some(p),
            _ => None,
        })?;
        ensure_same_source(&filenames, &files, |p| ScienceKey {
            instrument: p.instrument(),
            data_level: p.data_level(),
            descriptor: p.descriptor().to_string(),
        })?;

        Ok(Self { filenames, files })
    }

    fn first(&self) -> &ScienceFilePath {
        // Construction rejects empty inputs
        &self.files[0]
    }

    pub fn source(&self) -> Instrument {
        self.first().instrument()
    }

    pub fn descriptor(&self) -> &str {
        self.first().descriptor()
    }

    pub fn data_level(&self) -> DataLevel {
        self.first().data_level()
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn files(&self) -> &[ScienceFilePath] {
        &self.files
    }

    /// Earliest through latest start date.
    pub fn time_range(&self) -> DateRange {
        self.files
            .iter()
            .map(|p| DateRange::single(p.start_date()))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| DateRange::single(self.first().start_date()))
    }
}

/// Ancillary files from one instrument and descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncillaryInput {
    filenames: Vec<String>,
    files: Vec<AncillaryFilePath>,
}

impl AncillaryInput {
    pub fn new<I, S>(filenames: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filenames = collect_filenames(filenames);
        let files = classify_members(&filenames, FileFamily::Ancillary, |path| match path {
            ImapFilePath::Ancillary(p) => Some(p),
            _ => None,
        })?;
        ensure_same_source(&filenames, &files, |p| {
            format!("{} {}", p.instrument(), p.descriptor())
        })?;

        Ok(Self { filenames, files })
    }

    fn first(&self) -> &AncillaryFilePath {
        &self.files[0]
    }

    pub fn source(&self) -> Instrument {
        self.first().instrument()
    }

    pub fn descriptor(&self) -> &str {
        self.first().descriptor()
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn files(&self) -> &[AncillaryFilePath] {
        &self.files
    }

    /// Earliest start date through the latest end date, where a file without an
    /// end date ends on its start date.
    pub fn time_range(&self) -> DateRange {
        self.files
            .iter()
            .map(AncillaryFilePath::date_range)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| self.first().date_range())
    }
}

/// SPICE kernels of a single kernel type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiceInput {
    filenames: Vec<String>,
    files: Vec<SpiceFilePath>,
}

impl SpiceInput {
    pub fn new<I, S>(filenames: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filenames = collect_filenames(filenames);
        let files = classify_members(&filenames, FileFamily::Spice, |path| match path {
            ImapFilePath::Spice(p) => Some(p),
            _ => None,
        })?;
        ensure_same_source(&filenames, &files, |p| p.kernel_type().to_string())?;

        Ok(Self { filenames, files })
    }

    /// Kernel type shared by every member (`ck`, `spk`, ...).
    pub fn kernel_type(&self) -> &str {
        self.files[0].kernel_type()
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn files(&self) -> &[SpiceFilePath] {
        &self.files
    }
}

/// One dependency of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingInput {
    Science(ScienceInput),
    Ancillary(AncillaryInput),
    Spice(SpiceInput),
}

impl ProcessingInput {
    /// Rebuild an input of the kind named by `data_type` from its filenames.
    ///
    /// For science inputs the files must also be at the tagged data level.
    pub fn from_data_type<I, S>(data_type: DataType, filenames: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let input = match data_type {
            DataType::Science(_) => ProcessingInput::Science(ScienceInput::new(filenames)?),
            DataType::Ancillary => ProcessingInput::Ancillary(AncillaryInput::new(filenames)?),
            DataType::Spice => ProcessingInput::Spice(SpiceInput::new(filenames)?),
        };

        if input.data_type() != data_type {
            return Err(ProcessingInputError::DataTypeMismatch {
                tag: data_type.to_string(),
                actual: input.data_type().to_string(),
            });
        }
        Ok(input)
    }

    pub fn input_type(&self) -> ProcessingInputType {
        match self {
            ProcessingInput::Science(_) => ProcessingInputType::ScienceFile,
            ProcessingInput::Ancillary(_) => ProcessingInputType::AncillaryFile,
            ProcessingInput::Spice(_) => ProcessingInputType::SpiceFile,
        }
    }

    /// Instrument name, or `spice` for kernels.
    pub fn source(&self) -> &str {
        match self {
            ProcessingInput::Science(input) => input.source().as_str(),
            ProcessingInput::Ancillary(input) => input.source().as_str(),
            ProcessingInput::Spice(_) => SPICE_SOURCE,
        }
    }

    /// Product descriptor, or the kernel type for SPICE inputs.
    pub fn descriptor(&self) -> &str {
        match self {
            ProcessingInput::Science(input) => input.descriptor(),
            ProcessingInput::Ancillary(input) => input.descriptor(),
            ProcessingInput::Spice(input) => input.kernel_type(),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ProcessingInput::Science(input) => DataType::Science(input.data_level()),
            ProcessingInput::Ancillary(_) => DataType::Ancillary,
            ProcessingInput::Spice(_) => DataType::Spice,
        }
    }

    /// Filenames in the order they were given.
    pub fn filenames(&self) -> &[String] {
        match self {
            ProcessingInput::Science(input) => input.filenames(),
            ProcessingInput::Ancillary(input) => input.filenames(),
            ProcessingInput::Spice(input) => input.filenames(),
        }
    }

    /// Validated paths, parallel to [`filenames`](Self::filenames).
    pub fn imap_file_paths(&self) -> Vec<ImapFilePath> {
        match self {
            ProcessingInput::Science(input) => {
                input.files().iter().cloned().map(ImapFilePath::Science).collect()
            }
            ProcessingInput::Ancillary(input) => {
                input.files().iter().cloned().map(ImapFilePath::Ancillary).collect()
            }
            ProcessingInput::Spice(input) => {
                input.files().iter().cloned().map(ImapFilePath::Spice).collect()
            }
        }
    }

    /// Archive locations of every member, in order.
    pub fn construct_paths(&self, archive_root: Option<&Path>) -> Vec<PathBuf> {
        match self {
            ProcessingInput::Science(input) => input
                .files()
                .iter()
                .map(|p| p.construct_path(archive_root))
                .collect(),
            ProcessingInput::Ancillary(input) => input
                .files()
                .iter()
                .map(|p| p.construct_path(archive_root))
                .collect(),
            ProcessingInput::Spice(input) => input
                .files()
                .iter()
                .map(|p| p.construct_path(archive_root))
                .collect(),
        }
    }

    /// Dates spanned by the input: earliest start through latest effective end.
    ///
    /// `None` for SPICE inputs, which carry no dates.
    pub fn get_time_range(&self) -> Option<DateRange> {
        match self {
            ProcessingInput::Science(input) => Some(input.time_range()),
            ProcessingInput::Ancillary(input) => Some(input.time_range()),
            ProcessingInput::Spice(_) => None,
        }
    }
}

impl From<ScienceInput> for ProcessingInput {
    fn from(input: ScienceInput) -> Self {
        ProcessingInput::Science(input)
    }
}

impl From<AncillaryInput> for ProcessingInput {
    fn from(input: AncillaryInput) -> Self {
        ProcessingInput::Ancillary(input)
    }
}

impl From<SpiceInput> for ProcessingInput {
    fn from(input: SpiceInput) -> Self {
        ProcessingInput::Spice(input)
    }
}
