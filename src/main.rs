use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qrcanvas::{Channel, Config, DirectorySaver, Exporter, Logo, MailClient, Studio};

/// Compose a QR code with an optional logo and save it as SVG
#[derive(Parser, Debug)]
#[command(name = "qrcanvas", version)]
struct Args {
    /// Text or URL to encode
    text: String,

    /// Image to overlay on the code
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Logo size, 10 to 100
    #[arg(long, default_value_t = 50)]
    logo_size: u8,

    /// Logo horizontal position, 0 to 100
    #[arg(long, default_value_t = 50)]
    logo_x: u8,

    /// Logo vertical position, 0 to 100
    #[arg(long, default_value_t = 50)]
    logo_y: u8,

    /// Module color
    #[arg(long, default_value = "#000000")]
    fg: String,

    /// Background color
    #[arg(long, default_value = "#FFFFFF")]
    bg: String,

    /// TOML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Directory the SVG is saved into
    #[arg(long, short = 'o', default_value = ".")]
    out: PathBuf,

    /// Also print a mailto link for the text
    #[arg(long)]
    email: bool,
}

struct StdoutMailer;

impl MailClient for StdoutMailer {
    fn open(&self, uri: &str) {
        println!("{uri}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let exporter = Exporter::new().saver(DirectorySaver::new(&args.out)).mail(StdoutMailer);
    let mut studio = Studio::new(config, exporter);
    studio.set_text(args.text);
    studio.set_foreground(args.fg);
    studio.set_background(args.bg);
    if let Some(path) = &args.logo {
        studio.set_logo(Some(Logo::from_path(path)?));
        studio.set_logo_size(args.logo_size);
        studio.set_logo_x(args.logo_x);
        studio.set_logo_y(args.logo_y);
    }

    let mut channels = vec![Channel::Download];
    if args.email {
        channels.push(Channel::Email);
    }
    for channel in channels {
        let Some(dispatch) = studio.export(channel) else {
            return Err("Nothing to export, text is empty".into());
        };
        let notification = dispatch.await;
        eprintln!("{}: {}", notification.title(), notification.message);
        if notification.is_error() {
            return Err(notification.message.into());
        }
    }

    Ok(())
}
