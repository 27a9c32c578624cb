use anyhow::Result;
use clap::Parser;
use retrowave_icons::{icon_gen, RetrowaveConfig};
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Parser)]
#[clap(
    name = "retrowave-icons",
    about = "Generate retrowave-style PWA icons from a neon logo"
)]
struct Args {
    /// Path to the source logo (bright artwork on a dark background).
    #[clap(value_name = "INPUT", required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    output: PathBuf,

    /// Square icon sizes to generate. Each size yields a standard and a maskable icon.
    #[clap(
        short,
        long,
        value_delimiter = ',',
        value_name = "SIZES",
        default_values_t = icon_gen::DEFAULT_SIZES
    )]
    sizes: Vec<u32>,

    /// JSON file overriding colors, thresholds and blur radii
    #[clap(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[clap(long)]
    print_config: bool,

    /// Log rendering details to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => RetrowaveConfig::load(path)?,
        None => RetrowaveConfig::default(),
    };

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let Some(input) = args.input else {
        anyhow::bail!("An input logo image is required");
    };

    icon_gen::generate_icons(&icon_gen::Args {
        input,
        output: args.output,
        sizes: args.sizes,
        config,
    })?;

    Ok(())
}
