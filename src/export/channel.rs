use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::Artifact;
use crate::common::QRResult;

// Collaborators
//------------------------------------------------------------------------------

/// OS or browser save mechanism.
#[async_trait]
pub trait SaveTarget: Send + Sync {
    async fn save(&self, filename: &str, artifact: &Artifact) -> QRResult<()>;
}

/// Clipboard that takes a single image payload. May refuse based on permission state.
#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn write_image(&self, artifact: &Artifact) -> QRResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Native share sheet. Availability depends on the platform and is probed before every use.
#[async_trait]
pub trait ShareSheet: Send + Sync {
    fn is_available(&self) -> bool;

    /// `Err` covers both a failed share and the user cancelling.
    async fn share(&self, request: ShareRequest) -> QRResult<()>;
}

/// Opens a `mailto:` URI. Fire and forget.
pub trait MailClient: Send + Sync {
    fn open(&self, uri: &str);
}

// Directory saver
//------------------------------------------------------------------------------

/// [`SaveTarget`] that writes into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SaveTarget for DirectorySaver {
    async fn save(&self, filename: &str, artifact: &Artifact) -> QRResult<()> {
        let path = self.dir.join(filename);
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, artifact.bytes()).await?;
        debug!(path = %path.display(), len = artifact.len(), "Saved artifact");
        Ok(())
    }
}
