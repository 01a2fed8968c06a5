use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::Session;
use crate::common::{Color, QRError, QRResult};
use crate::compose::{compose, Document, Overlay};
use crate::config::Config;
use crate::encoder::{ECLevel, Encoder, QrCodeEncoder};
use crate::export::{mailto_uri, Artifact, Channel, Dispatch, Exporter};
use crate::logo::Logo;
use crate::notify::{Notification, Notifier};
use crate::placement::{compute_geometry, OverlayGeometry};

pub const EMPTY_PLACEHOLDER: &str = "QR Code will appear here";
pub const RENDER_FAILED: &str = "Failed to generate QR code.";

/// What the preview area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// No text yet, show [`EMPTY_PLACEHOLDER`].
    Empty,
    Code(Document),
}

impl Preview {
    pub fn document(&self) -> Option<&Document> {
        match self {
            Preview::Empty => None,
            Preview::Code(doc) => Some(doc),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Preview::Empty)
    }
}

// Studio
//------------------------------------------------------------------------------

/// Controller owning the session. All edits go through it; each one publishes the new session
/// revision to subscribers. Rendering is recomputed from the session on every read.
#[derive(Debug)]
pub struct Studio<E = QrCodeEncoder> {
    session: Session,
    encoder: E,
    config: Config,
    exporter: Arc<Exporter>,
    notifier: Notifier,
    revisions: watch::Sender<u64>,
}

impl Studio<QrCodeEncoder> {
    pub fn new(config: Config, exporter: Exporter) -> Self {
        Self::with_encoder(QrCodeEncoder, config, exporter)
    }
}

impl<E: Encoder> Studio<E> {
    pub fn with_encoder(encoder: E, config: Config, exporter: Exporter) -> Self {
        let (revisions, _) = watch::channel(0);
        Self {
            session: Session::new(),
            encoder,
            config,
            exporter: Arc::new(exporter),
            notifier: Notifier::new(),
            revisions,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Receives the session revision after every edit.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revisions.subscribe()
    }

    fn publish(&self) {
        self.revisions.send_replace(self.session.revision());
    }
}

// Edits
//------------------------------------------------------------------------------

impl<E: Encoder> Studio<E> {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.session.set_text(text);
        self.publish();
    }

    pub fn set_foreground(&mut self, color: impl Into<Color>) {
        let color = color.into();
        if color.rgb().is_none() {
            debug!(%color, "Foreground is not a hex colour, keeping it as-is");
        }
        self.session.set_foreground(color);
        self.publish();
    }

    pub fn set_background(&mut self, color: impl Into<Color>) {
        let color = color.into();
        if color.rgb().is_none() {
            debug!(%color, "Background is not a hex colour, keeping it as-is");
        }
        self.session.set_background(color);
        self.publish();
    }

    pub fn set_logo(&mut self, logo: Option<Logo>) {
        self.session.set_logo(logo);
        self.publish();
    }

    pub fn remove_logo(&mut self) {
        self.session.remove_logo();
        self.publish();
    }

    pub fn set_logo_size(&mut self, size: u8) {
        self.session.set_logo_size(size);
        self.publish();
    }

    pub fn set_logo_x(&mut self, x: u8) {
        self.session.set_logo_x(x);
        self.publish();
    }

    pub fn set_logo_y(&mut self, y: u8) {
        self.session.set_logo_y(y);
        self.publish();
    }

    pub fn clear(&mut self) {
        self.session.clear();
        self.publish();
    }
}

// Render
//------------------------------------------------------------------------------

impl<E: Encoder> Studio<E> {
    /// `None` while there is no logo.
    pub fn overlay_geometry(&self) -> Option<OverlayGeometry> {
        self.session.logo().map(|_| {
            compute_geometry(self.session.placement(), self.config.display_size, self.config.placement_mode)
        })
    }

    pub fn preview(&self) -> QRResult<Preview> {
        if self.session.is_empty() {
            return Ok(Preview::Empty);
        }

        // Always the highest level, the logo may cover up to ~30% of the code
        let matrix = self.encoder.encode(self.session.text(), ECLevel::H)?;
        let overlay = self.session.logo().zip(self.overlay_geometry()).map(|(logo, geometry)| Overlay {
            href: logo.data_uri(),
            geometry,
            excavate: true,
        });

        let doc = compose(
            &matrix,
            self.session.foreground(),
            self.session.background(),
            overlay.as_ref(),
            self.config.render_options(),
        );
        Ok(Preview::Code(doc))
    }
}

// Export
//------------------------------------------------------------------------------

impl<E: Encoder> Studio<E> {
    /// Export controls are inert while there is no text.
    pub fn can_export(&self) -> bool {
        !self.session.is_empty()
    }

    /// Serializes the current state for `channel`. The result owns its payload.
    pub fn capture(&self, channel: Channel) -> QRResult<Dispatch> {
        if channel == Channel::Email {
            return Ok(Dispatch::Email { uri: mailto_uri(&self.config.email_subject, self.session.text()) });
        }

        let artifact = match self.preview()? {
            Preview::Code(doc) => Artifact::serialize(&doc),
            Preview::Empty => return Err(QRError::EmptyData),
        };
        let dispatch = match channel {
            Channel::Download => Dispatch::Download { filename: self.config.download_filename.clone(), artifact },
            Channel::Clipboard => Dispatch::Clipboard { artifact },
            Channel::Share => Dispatch::Share {
                title: self.config.share_title.clone(),
                text: self.config.share_text.clone(),
                artifact,
            },
            Channel::Email => unreachable!("Email is captured without an artifact"),
        };
        Ok(dispatch)
    }

    /// Captures the payload now and returns the dispatch as a detached future, or `None` when
    /// there is nothing to export. The future posts exactly one notification on completion.
    /// Later edits to the session do not affect it.
    pub fn export(&self, channel: Channel) -> Option<impl Future<Output = Notification> + Send + 'static> {
        if !self.can_export() {
            debug!(?channel, "Ignoring export of empty session");
            return None;
        }

        let captured = self.capture(channel);
        let exporter = Arc::clone(&self.exporter);
        let notifier = self.notifier.clone();
        let timeout = self.config.notification_timeout();

        Some(async move {
            let notification = match captured {
                Ok(dispatch) => exporter.dispatch(dispatch).await,
                Err(e) => {
                    warn!(?channel, error = %e, "Failed to render for export");
                    Notification::error(RENDER_FAILED)
                }
            };
            notifier.post_with_timeout(notification.clone(), timeout);
            notification
        })
    }

    pub async fn download(&self) -> Option<Notification> {
        self.run(Channel::Download).await
    }

    pub async fn copy_to_clipboard(&self) -> Option<Notification> {
        self.run(Channel::Clipboard).await
    }

    pub async fn share(&self) -> Option<Notification> {
        self.run(Channel::Share).await
    }

    pub async fn email(&self) -> Option<Notification> {
        self.run(Channel::Email).await
    }

    async fn run(&self, channel: Channel) -> Option<Notification> {
        match self.export(channel) {
            Some(dispatch) => Some(dispatch.await),
            None => None,
        }
    }
}
