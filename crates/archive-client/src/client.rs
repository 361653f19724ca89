//! HTTP transport to the data access API.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use file_validation::{classify, ImapFilePath};
use futures::StreamExt;
use imap_common::ArchiveConfig;
use processing_input::FileFetcher;
use reqwest::{header, Client, Response, Url};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

use crate::error::{ArchiveError, Result};
use crate::query::{filter_latest, record_from_json, QueryParams, QueryRecord};

const API_KEY_HEADER: &str = "X-api-key";

/// Client for one data access endpoint and one local archive root.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: Client,
    config: ArchiveConfig,
}

impl ArchiveClient {
    /// Create a client for the endpoint and data directory in `config`.
    pub fn new(config: ArchiveConfig) -> Result<Self> {
        Url::parse(config.base_url()).map_err(|e| ArchiveError::InvalidUrl {
            url: config.data_access_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Download a file by name into the local archive.
    ///
    /// Any directories in `file_path` are ignored; the destination is always
    /// derived from the filename. Returns the local path.
    pub async fn download(&self, file_path: impl AsRef<Path>) -> Result<PathBuf> {
        let file = classify(&file_path.as_ref().to_string_lossy())?;
        self.download_file(&file).await
    }

    /// Fetch `file` unless it already exists locally.
    #[instrument(skip(self, file), fields(file = %file.filename()))]
    pub async fn download_file(&self, file: &ImapFilePath) -> Result<PathBuf> {
        let destination = file.construct_path(Some(self.config.data_dir.as_path()));

        if fs::try_exists(&destination)
            .await
            .map_err(|e| ArchiveError::io(&destination, e))?
        {
            info!(path = %destination.display(), "File already exists, skipping download");
            return Ok(destination);
        }

        let url = format!(
            "{}/download/{}",
            self.config.base_url(),
            url_path(&file.construct_path(None))
        );
        info!(url = %url, destination = %destination.display(), "Downloading file");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        debug!(status = %response.status(), "Received download response");

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ArchiveError::io(parent, e))?;
        }

        let partial = partial_path(&destination);
        if let Err(e) = stream_to_file(response, &partial).await {
            fs::remove_file(&partial).await.ok();
            return Err(e);
        }
        fs::rename(&partial, &destination)
            .await
            .map_err(|e| ArchiveError::io(&destination, e))?;

        info!(path = %destination.display(), "File downloaded successfully");
        Ok(destination)
    }

    /// Upload a local file to the archive.
    ///
    /// The API answers with a presigned URL that the bytes are then PUT to.
    /// `api_key` overrides the configured key.
    #[instrument(skip(self, file_path, api_key), fields(path = %file_path.as_ref().display()))]
    pub async fn upload(&self, file_path: impl AsRef<Path>, api_key: Option<&str>) -> Result<()> {
        let file_path = file_path.as_ref();
        let exists = fs::try_exists(file_path)
            .await
            .map_err(|e| ArchiveError::io(file_path, e))?;
        if !exists {
            return Err(ArchiveError::FileNotFound(file_path.to_path_buf()));
        }

        let filename = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ArchiveError::FileNotFound(file_path.to_path_buf()))?;

        let url = format!("{}/upload/{}", self.config.base_url(), filename);
        info!(url = %url, "Uploading file");

        let mut request = self.client.get(&url);
        if let Some(key) = api_key.or(self.config.api_key.as_deref()) {
            request = request.header(API_KEY_HEADER, key);
        }
        let body = request.send().await?.error_for_status()?.text().await?;
        let presigned: String = serde_json::from_str(&body)?;
        debug!(presigned = %presigned, "Received presigned upload URL");

        let contents = fs::read(file_path)
            .await
            .map_err(|e| ArchiveError::io(file_path, e))?;
        let response = self
            .client
            .put(&presigned)
            .header(header::CONTENT_TYPE, "")
            .body(contents)
            .send()
            .await?
            .error_for_status()?;
        debug!(status = %response.status(), "Upload accepted");

        info!(filename = %filename, "File uploaded successfully");
        Ok(())
    }

    /// Query the catalog.
    ///
    /// Parameters are validated before any request is made. With a `latest`
    /// version only the highest version among the results is returned.
    #[instrument(skip(self))]
    pub async fn query(&self, params: &QueryParams) -> Result<Vec<QueryRecord>> {
        let request_params = params.request_params()?;
        let url = format!("{}/query", self.config.base_url());
        debug!(url = %url, params = ?request_params, "Querying data archive");

        let body = self
            .client
            .get(&url)
            .query(&request_params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let objects: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(&body)?;
        let records: Vec<QueryRecord> = objects.into_iter().map(record_from_json).collect();
        debug!(count = records.len(), "Received query results");

        if params.wants_latest() {
            let latest = filter_latest(records);
            debug!(count = latest.len(), "Filtered query results to latest version");
            return Ok(latest);
        }
        Ok(records)
    }
}

#[async_trait]
impl FileFetcher for ArchiveClient {
    type Error = ArchiveError;

    async fn fetch(&self, file: &ImapFilePath) -> Result<PathBuf> {
        self.download_file(file).await
    }
}

/// Archive-relative path with `/` separators for use in a URL.
fn url_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    destination.with_file_name(name)
}

async fn stream_to_file(response: Response, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .await
        .map_err(|e| ArchiveError::io(path, e))?;

    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| ArchiveError::io(path, e))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| ArchiveError::io(path, e))?;
    debug!(bytes = written, path = %path.display(), "Wrote response body");
    Ok(())
}
