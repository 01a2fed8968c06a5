//! Export pipeline.
//!
//! A [`Document`] is serialized into an [`Artifact`] at the moment an export is requested. The
//! artifact is captured inside a [`Dispatch`] and handed to the [`Exporter`], which routes it to
//! the matching collaborator and turns the outcome into exactly one [`Notification`]. Failures
//! stop here: nothing is retried and nothing propagates back into the session.

mod channel;

pub use channel::*;

use std::fmt::{Debug, Formatter};

use base64::{engine::general_purpose, Engine as _};
use tracing::{info, warn};

use crate::common::QRError;
use crate::compose::Document;
use crate::notify::Notification;

pub const SVG_MIME: &str = "image/svg+xml;charset=utf-8";

pub const DOWNLOAD_OK: &str = "QR code downloaded successfully!";
pub const DOWNLOAD_UNSUPPORTED: &str = "Saving files is not supported on this platform.";
pub const CLIPBOARD_OK: &str = "QR code copied to clipboard!";
pub const CLIPBOARD_FAILED: &str = "Failed to copy QR code. Please try again.";
pub const SHARE_OK: &str = "QR code shared successfully!";
pub const SHARE_FAILED: &str = "Failed to share QR code. Please try again.";
pub const SHARE_UNSUPPORTED: &str = "Web Share API is not supported in your browser.";
pub const EMAIL_OK: &str = "Email client opened with QR code information!";
pub const EMAIL_UNSUPPORTED: &str = "No email client is available on this platform.";

// Artifact
//------------------------------------------------------------------------------

/// Serialized document, as handed to collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
}

impl Artifact {
    pub fn serialize(doc: &Document) -> Self {
        Self::from_svg(doc.as_str().to_owned())
    }

    pub fn from_svg(svg: String) -> Self {
        Self { bytes: svg.into_bytes() }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime(&self) -> &'static str {
        SVG_MIME
    }

    /// Self-contained URL for collaborators that take a link rather than bytes.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", SVG_MIME, general_purpose::STANDARD.encode(&self.bytes))
    }
}

// Dispatch
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Download,
    Clipboard,
    Share,
    Email,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Download, Channel::Clipboard, Channel::Share, Channel::Email];

    /// Email only carries the raw text, every other channel carries the image.
    pub fn needs_artifact(&self) -> bool {
        !matches!(self, Channel::Email)
    }
}

/// Export request with its payload already captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Download { filename: String, artifact: Artifact },
    Clipboard { artifact: Artifact },
    Share { title: String, text: String, artifact: Artifact },
    Email { uri: String },
}

impl Dispatch {
    pub fn channel(&self) -> Channel {
        match self {
            Dispatch::Download { .. } => Channel::Download,
            Dispatch::Clipboard { .. } => Channel::Clipboard,
            Dispatch::Share { .. } => Channel::Share,
            Dispatch::Email { .. } => Channel::Email,
        }
    }
}

pub fn mailto_uri(subject: &str, text: &str) -> String {
    let body = format!("I've generated a QR code for: {text}");
    format!("mailto:?subject={}&body={}", urlencoding::encode(subject), urlencoding::encode(&body))
}

// Exporter
//------------------------------------------------------------------------------

/// Routes dispatches to whichever collaborators the platform provides. A missing collaborator
/// is reported the same way as one that is present but unavailable.
///
/// Download and email have no failure outcome once their collaborator exists: a failed save is
/// only logged and opening the mail client always succeeds. Without a [`SaveTarget`] or
/// [`MailClient`] at all the platform cannot perform the export, so those channels report
/// [`DOWNLOAD_UNSUPPORTED`] and [`EMAIL_UNSUPPORTED`] as error notifications instead.
#[derive(Default)]
pub struct Exporter {
    saver: Option<Box<dyn SaveTarget>>,
    clipboard: Option<Box<dyn ClipboardSink>>,
    share: Option<Box<dyn ShareSheet>>,
    mail: Option<Box<dyn MailClient>>,
}

impl Debug for Exporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("saver", &self.saver.is_some())
            .field("clipboard", &self.clipboard.is_some())
            .field("share", &self.share.is_some())
            .field("mail", &self.mail.is_some())
            .finish()
    }
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saver(mut self, saver: impl SaveTarget + 'static) -> Self {
        self.saver = Some(Box::new(saver));
        self
    }

    pub fn clipboard(mut self, clipboard: impl ClipboardSink + 'static) -> Self {
        self.clipboard = Some(Box::new(clipboard));
        self
    }

    pub fn share(mut self, share: impl ShareSheet + 'static) -> Self {
        self.share = Some(Box::new(share));
        self
    }

    pub fn mail(mut self, mail: impl MailClient + 'static) -> Self {
        self.mail = Some(Box::new(mail));
        self
    }

    pub async fn dispatch(&self, dispatch: Dispatch) -> Notification {
        let channel = dispatch.channel();
        let notification = match dispatch {
            Dispatch::Download { filename, artifact } => self.download(&filename, &artifact).await,
            Dispatch::Clipboard { artifact } => self.copy(&artifact).await,
            Dispatch::Share { title, text, artifact } => {
                self.share_artifact(ShareRequest { title, text, url: artifact.to_data_url() }).await
            }
            Dispatch::Email { uri } => self.email(&uri),
        };
        info!(?channel, kind = ?notification.kind, "Export finished");
        notification
    }

    async fn download(&self, filename: &str, artifact: &Artifact) -> Notification {
        let Some(saver) = &self.saver else {
            warn!("No save target configured");
            return Notification::error(DOWNLOAD_UNSUPPORTED);
        };
        // Once the save is requested the outcome is out of our hands
        if let Err(e) = saver.save(filename, artifact).await {
            warn!(filename, error = %e, "Save target failed");
        }
        Notification::success(DOWNLOAD_OK)
    }

    async fn copy(&self, artifact: &Artifact) -> Notification {
        let result = match &self.clipboard {
            Some(clipboard) => clipboard.write_image(artifact).await,
            None => Err(QRError::Unsupported("Clipboard image write")),
        };
        match result {
            Ok(()) => Notification::success(CLIPBOARD_OK),
            Err(e) => {
                warn!(error = %e, "Error copying to clipboard");
                Notification::error(CLIPBOARD_FAILED)
            }
        }
    }

    async fn share_artifact(&self, request: ShareRequest) -> Notification {
        let share = match &self.share {
            Some(share) if share.is_available() => share,
            _ => {
                warn!("Share sheet unavailable");
                return Notification::error(SHARE_UNSUPPORTED);
            }
        };
        match share.share(request).await {
            Ok(()) => Notification::success(SHARE_OK),
            Err(e) => {
                warn!(error = %e, "Error sharing");
                Notification::error(SHARE_FAILED)
            }
        }
    }

    fn email(&self, uri: &str) -> Notification {
        match &self.mail {
            Some(mail) => {
                mail.open(uri);
                Notification::success(EMAIL_OK)
            }
            None => {
                warn!("No mail client configured");
                Notification::error(EMAIL_UNSUPPORTED)
            }
        }
    }
}
