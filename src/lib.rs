//! # qrcanvas
//!
//! A Rust library for composing QR codes with custom colors and an optional logo overlay, and
//! exporting the result as SVG through download, clipboard, native share and email channels.
//!
//! ## Features
//!
//! - **Session**: A single editing session holding text, colors, logo and logo placement
//! - **Placement**: Normalized size and position sliders mapped onto overlay geometry
//! - **Composition**: Deterministic SVG output with quiet margin and logo excavation
//! - **Export**: Four channels behind small collaborator traits, each reporting exactly one
//!   notification
//!
//! ## Quick Start
//!
//! ```rust
//! use qrcanvas::{Config, Exporter, Studio};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut studio = Studio::new(Config::default(), Exporter::new());
//! studio.set_text("https://example.com");
//! studio.set_foreground("#1e3a8a");
//!
//! let preview = studio.preview()?;
//! let svg = preview.document().expect("text is set").as_str();
//! assert!(svg.starts_with("<svg"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Logo Placement
//!
//! Logo size ranges over `10..=100` and position over `0..=100`, all defaulting to 50. The
//! logo is always square with a side of `size` pixels on the rendered code, and its top-left
//! corner sits at `2 * position - size`. Placement is not clamped unless
//! [`PlacementMode::Clamped`] is configured, so extreme positions crop the logo at the edges.
//! Modules under the logo are cleared, and codes are always encoded at error correction level
//! H so they stay readable.
//!
//! ## Exporting
//!
//! ```rust
//! use qrcanvas::{Channel, Config, DirectorySaver, Exporter, Studio};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let dir = std::env::temp_dir().join("qrcanvas-doc");
//! let exporter = Exporter::new().saver(DirectorySaver::new(&dir));
//! let mut studio = Studio::new(Config::default(), exporter);
//!
//! // Nothing to export yet
//! assert!(studio.export(Channel::Download).is_none());
//!
//! studio.set_text("Hello, world!");
//! let notification = studio.download().await.unwrap();
//! assert_eq!(notification.message, "QR code downloaded successfully!");
//! # }
//! ```

pub(crate) mod common;
pub mod compose;
pub mod config;
pub mod encoder;
pub mod export;
pub mod logo;
pub mod notify;
pub mod placement;
pub mod session;

pub use common::{Color, QRError, QRResult};
pub use compose::{compose, Document, Overlay, RenderOptions};
pub use config::Config;
pub use encoder::{ECLevel, Encoder, Matrix, QrCodeEncoder};
pub use export::{
    Artifact, Channel, ClipboardSink, DirectorySaver, Dispatch, Exporter, MailClient, SaveTarget, ShareRequest,
    ShareSheet,
};
pub use logo::{Logo, LogoFormat};
pub use notify::{Notification, NotificationKind, Notifier};
pub use placement::{compute_geometry, OverlayGeometry, Placement, PlacementMode};
pub use session::{Preview, Session, Studio};
