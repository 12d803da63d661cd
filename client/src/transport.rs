//! HTTP transport for local files.
//!
//! Each file becomes one multipart part streamed from disk. The body stream
//! bumps a shared byte counter as reqwest pulls chunks from it, and the
//! counter is sampled every 100 ms while the request is in flight.

use futures::TryStreamExt;
use reqwest::{multipart, Body, Client};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use gnome::{FileHandle, RawResponse, SelectedFile, UploadError, UploadTransport};

use crate::error::{ClientError, ClientResult};

/// Size of the chunks fed to the request body.
const CHUNK_SIZE: usize = 64 * 1024;

/// How often progress is sampled while uploading.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// A file picked from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size: u64,
}

impl LocalFile {
    /// Stat `path`. Fails if it is missing or not a regular file.
    pub fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path).map_err(|e| ClientError::io(path, e))?;
        if !meta.is_file() {
            return Err(ClientError::NotAFile(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
        })
    }

    /// Open the file for reading. Catches files removed or locked since
    /// [`LocalFile::open`] before anything is sent.
    pub async fn reader(&self) -> ClientResult<File> {
        File::open(&self.path)
            .await
            .map_err(|e| ClientError::io(&self.path, e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Content type sent with the part, guessed from the extension.
    pub fn mime(&self) -> Option<&'static str> {
        let (_, ext) = self.name.rsplit_once('.')?;
        let mime = match ext.to_ascii_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "pdf" => "application/pdf",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "csv" => "text/csv",
            "txt" => "text/plain",
            _ => return None,
        };
        Some(mime)
    }
}

impl FileHandle for LocalFile {
    fn describe(&self) -> SelectedFile {
        SelectedFile::new(self.name.clone(), self.size, self.mime().map(str::to_string))
    }
}

/// reqwest-backed [`UploadTransport`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("gnome-upload/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl UploadTransport for HttpTransport {
    type Handle = LocalFile;

    async fn send(
        &self,
        endpoint: &str,
        field_name: &str,
        files: &[LocalFile],
        on_progress: &mut dyn FnMut(u64, u64),
    ) -> Result<RawResponse, UploadError> {
        let sent = Arc::new(AtomicU64::new(0));
        let mut total = 0u64;
        let mut form = multipart::Form::new();

        for file in files {
            let reader = File::open(&file.path).await.map_err(|e| {
                UploadError::network(format!("cannot read {}: {}", file.path.display(), e))
            })?;
            let len = reader
                .metadata()
                .await
                .map_err(|e| {
                    UploadError::network(format!("cannot stat {}: {}", file.path.display(), e))
                })?
                .len();
            total += len;

            let body = counted_body(reader, sent.clone());
            let mut part = multipart::Part::stream_with_length(body, len)
                .file_name(file.name.clone());
            if let Some(mime) = file.mime() {
                part = part
                    .mime_str(mime)
                    .map_err(|e| UploadError::network(e.to_string()))?;
            }
            form = form.part(field_name.to_string(), part);
        }

        log::debug!("POST {} ({} part(s), {} bytes)", endpoint, files.len(), total);

        let request = self.client.post(endpoint).multipart(form).send();
        tokio::pin!(request);

        let mut ticker = tokio::time::interval(PROGRESS_INTERVAL);
        let mut reported = 0u64;
        let response = loop {
            tokio::select! {
                result = &mut request => break result,
                _ = ticker.tick() => {
                    let now = sent.load(Ordering::Relaxed);
                    if now != reported {
                        reported = now;
                        on_progress(now, total);
                    }
                }
            }
        };
        let response = response.map_err(|e| UploadError::network(e.to_string()))?;

        let now = sent.load(Ordering::Relaxed);
        if now != reported {
            on_progress(now, total);
        }

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::network(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

/// Body read from `file` that counts the bytes reqwest has taken from it.
fn counted_body(file: File, sent: Arc<AtomicU64>) -> Body {
    let stream = ReaderStream::with_capacity(file, CHUNK_SIZE).inspect_ok(move |chunk| {
        sent.fetch_add(chunk.len() as u64, Ordering::Relaxed);
    });
    Body::wrap_stream(stream)
}
