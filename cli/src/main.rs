use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, debug, info};
use otpqr::{QrCode, RenderOptions, Version};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "otpqr")]
#[command(about = "Render QR codes locally, without sending the payload anywhere", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text (e.g. an otpauth:// URI) as a QR code
    Encode {
        /// Text to encode
        #[arg(conflicts_with = "stdin", required_unless_present = "stdin")]
        text: Option<String>,
        /// Read the text from standard input instead
        #[arg(long)]
        stdin: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Compact)]
        format: Format,
        /// Output file (stdout when omitted; required for png)
        #[arg(short, long)]
        output: Option<String>,
        /// Target image size in pixels (svg, png)
        #[arg(long, default_value_t = 256)]
        size: usize,
        /// Quiet zone in modules (minimum 2)
        #[arg(long, default_value_t = otpqr::render::DEFAULT_QUIET_ZONE)]
        quiet_zone: usize,
    },
    /// Show the Byte-mode capacity of every supported version
    Capacity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Two characters per module
    Ascii,
    /// Half-block characters, two module rows per line
    Compact,
    Svg,
    Png,
    /// Version, size and module rows as JSON
    Json,
}

/// JSON view of an encoded symbol.
#[derive(Debug, Serialize)]
struct SymbolSummary {
    version: u8,
    size: usize,
    /// One string per row, '1' = dark
    modules: Vec<String>,
}

impl From<&QrCode> for SymbolSummary {
    fn from(qr: &QrCode) -> Self {
        Self {
            version: qr.version().number(),
            size: qr.size(),
            modules: qr
                .rows()
                .map(|row| row.iter().map(|&m| if m { '1' } else { '0' }).collect())
                .collect(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode {
            text,
            stdin,
            format,
            output,
            size,
            quiet_zone,
        } => {
            let text = match text {
                Some(text) if !stdin => text,
                _ => read_stdin()?,
            };
            let options = RenderOptions::new().quiet_zone(quiet_zone);
            encode(&text, format, output.as_deref(), size, &options)
        }
        Commands::Capacity => show_capacity(),
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    // A trailing newline from `echo` is not part of the payload
    let trimmed = text.trim_end_matches(['\r', '\n']).len();
    text.truncate(trimmed);
    Ok(text)
}

fn encode(
    text: &str,
    format: Format,
    output: Option<&str>,
    size: usize,
    options: &RenderOptions,
) -> Result<()> {
    let qr = QrCode::encode(text).context("Cannot generate QR code")?;
    info!(
        "encoded {} bytes as version {} ({}x{})",
        text.len(),
        qr.version(),
        qr.size(),
        qr.size()
    );

    let rendered = render(&qr, format, size, options)?;
    match output {
        Some(path) => {
            fs::write(Path::new(path), &rendered)
                .with_context(|| format!("Failed to write '{}'", path))?;
            debug!("wrote {} bytes to {}", rendered.len(), path);
        }
        None if format == Format::Png => {
            bail!("PNG output needs --output; refusing to write binary data to the terminal")
        }
        None => {
            io::stdout()
                .write_all(&rendered)
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn render(qr: &QrCode, format: Format, size: usize, options: &RenderOptions) -> Result<Vec<u8>> {
    let bytes = match format {
        Format::Ascii => qr.to_ascii(options).into_bytes(),
        Format::Compact => qr.to_ascii_compact(options).into_bytes(),
        Format::Svg => qr.to_svg(size, options).into_bytes(),
        Format::Png => qr.to_png(size, options)?,
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&SymbolSummary::from(qr))?;
            json.push('\n');
            json.into_bytes()
        }
    };
    Ok(bytes)
}

fn show_capacity() -> Result<()> {
    println!("Version  Modules  Data codewords  Max bytes");
    println!("-------  -------  --------------  ---------");
    for version in Version::all() {
        println!(
            "{:>7}  {:>7}  {:>14}  {:>9}",
            version.number(),
            format!("{0}x{0}", version.side()),
            version.data_capacity(),
            version.byte_capacity()
        );
    }
    Ok(())
}
