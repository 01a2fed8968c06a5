use std::error::Error;

use async_trait::async_trait;
use qrcanvas::{Artifact, ClipboardSink, Config, DirectorySaver, Exporter, MailClient, QRError, QRResult, Studio};

/// Clipboard that never grants permission
struct LockedClipboard;

#[async_trait]
impl ClipboardSink for LockedClipboard {
    async fn write_image(&self, _artifact: &Artifact) -> QRResult<()> {
        Err(QRError::Rejected("clipboard permission denied".to_string()))
    }
}

struct PrintMailer;

impl MailClient for PrintMailer {
    fn open(&self, uri: &str) {
        println!("Opening {uri}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let exporter = Exporter::new()
        .saver(DirectorySaver::new("."))
        .clipboard(LockedClipboard)
        .mail(PrintMailer);
    let mut studio = Studio::new(Config::default(), exporter);
    studio.set_text("Hello, world! 🌏");

    // Share has no collaborator here, so it reports an unsupported platform
    let outcomes =
        [studio.download().await, studio.copy_to_clipboard().await, studio.share().await, studio.email().await];
    for notification in outcomes.into_iter().flatten() {
        println!("{}: {}", notification.title(), notification.message);
    }

    Ok(())
}
