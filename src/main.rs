use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use image_proxy_url::config::{Config, LogFormat};
use image_proxy_url::constants::DEFAULT_CONFIG_PATH;
use image_proxy_url::{parse_request_path, parse_request_url, FormState, Size};
use std::path::PathBuf;

/// Build and inspect request URLs for the image-transformation proxy
#[derive(Parser, Debug)]
#[command(name = "image-proxy-url")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults are used when it does not exist)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log output format, overrides the config file
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a proxy request URL for an image
    Build(BuildArgs),

    /// Print the options and image URL carried by a proxy request URL
    Inspect {
        /// Full request URL, or just its `<options>/<image-url>` path
        url: String,

        /// Proxy origin, overrides the config file
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct BuildArgs {
    /// URL of the source image
    image_url: String,

    /// Output format: png, jpeg or webp
    #[arg(short, long, default_value = "")]
    format: String,

    /// Target width in pixels
    #[arg(long, default_value = "")]
    width: String,

    /// Target height in pixels
    #[arg(long, default_value = "")]
    height: String,

    /// Target size as WIDTH,HEIGHT
    #[arg(long, conflicts_with_all = ["width", "height"])]
    size: Option<Size>,

    /// Quality percentage (webp only)
    #[arg(short, long, default_value = "")]
    quality: String,

    /// Image URL is already percent-encoded, append it as is
    #[arg(long)]
    raw: bool,

    /// Proxy origin, overrides the config file
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config).with_context(|| {
        format!("Failed to load configuration from {}", args.config.display())
    })?;
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }

    // Initialize logging subsystem
    image_proxy_url::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow!("Failed to initialize logging subsystem: {}", e))?;

    tracing::debug!(
        config_file = %args.config.display(),
        base_url = %config.proxy.base_url,
        encode_image_url = config.proxy.encode_image_url,
        "Configuration loaded"
    );

    match args.command {
        Command::Build(build) => run_build(build, &config),
        Command::Inspect { url, base_url } => run_inspect(&url, base_url, &config),
    }
}

fn run_build(args: BuildArgs, config: &Config) -> anyhow::Result<()> {
    let (width, height) = match args.size {
        Some(size) => (size.width.to_string(), size.height.to_string()),
        None => (args.width, args.height),
    };

    let form = FormState {
        image_url: args.image_url,
        format: args.format,
        width,
        height,
        quality: args.quality,
    };

    if !form.quality.trim().is_empty() && !form.shows_quality() {
        tracing::warn!(
            format = %form.format,
            "quality only affects webp output, the proxy will ignore it"
        );
    }

    let proxy = config
        .proxy
        .with_base_url_override(args.base_url.as_deref())
        .map_err(|e| anyhow!("Invalid base URL: {}", e))?;
    let encode = proxy.encode_image_url && !args.raw;
    let url = form.submit(&proxy.base_url, encode).map_err(|e| {
        if e.is_validation_error() {
            tracing::warn!(error = %e, "Form rejected");
        }
        e
    })?;

    tracing::info!(
        segment = %url.segment(),
        image_ref = %url.image_ref(),
        "Request URL built"
    );
    println!("{}", url);
    Ok(())
}

fn run_inspect(url: &str, base_url: Option<String>, config: &Config) -> anyhow::Result<()> {
    let base_url = config
        .proxy
        .with_base_url_override(base_url.as_deref())
        .map_err(|e| anyhow!("Invalid base URL: {}", e))?
        .base_url;
    let parsed = if url.starts_with("http://") || url.starts_with("https://") {
        parse_request_url(url, &base_url)?
    } else {
        parse_request_path(url)?
    };

    let image_url = parsed.decoded_image_url()?;
    let output = serde_json::json!({
        "options": parsed.options,
        "image_ref": parsed.image_ref,
        "image_url": image_url,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
