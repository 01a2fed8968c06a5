use std::error::Error;

use qrcanvas::{Config, Exporter, Logo, Studio};

fn main() -> Result<(), Box<dyn Error>> {
    let logo_path = std::env::args().nth(1).ok_or("usage: logo_overlay <logo image>")?;

    let mut studio = Studio::new(Config::default(), Exporter::new());
    studio.set_text("https://example.com");
    studio.set_foreground("#1e3a8a");
    studio.set_logo(Some(Logo::from_path(&logo_path)?));
    studio.set_logo_size(40);

    let preview = studio.preview()?;
    let doc = preview.document().ok_or("nothing to render")?;
    std::fs::write("logo_qr.svg", doc.as_str())?;

    println!("QR with logo saved to: logo_qr.svg");
    println!("Overlay geometry: {:?}", studio.overlay_geometry());

    Ok(())
}
