use clap::{Parser, Subcommand};
use iiif_plan::config::{self, OutputStyle};
use iiif_plan::iiif::{self, Dimensions, ParamKind};
use iiif_plan::output;
use iiif_plan::request::{self, ImageRequest};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "iiif-plan")]
#[command(about = "Turn IIIF Image API requests into transform plans")]
#[command(long_about = "\
Turn IIIF Image API requests into transform plans

Reads the parameter part of an IIIF Image API 2.x request and prints the
ordered image operations it asks for, computed against the source size.

Request shape:

  [{identifier}/]{region}/{size}/{rotation}/{quality}.{format}

  region    full | square | x,y,w,h | pct:x,y,w,h
  size      full | max | w, | ,h | w,h | !w,h | pct:n
  rotation  n | !n              (! mirrors before rotating)
  quality   color | gray | bitonal | default
  format    jpg | tif | gif | png | webp

Example:

  iiif-plan plan --width 200 --height 100 square/50,/!90/gray.png

Run 'iiif-plan gen-config' to generate a documented iiif-plan.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing iiif-plan.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log interpretation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the transform plan for a request path
    Plan {
        /// Request path, e.g. full/max/0/default.jpg
        path: String,
        /// Source image width in pixels
        #[arg(long)]
        width: Option<u32>,
        /// Source image height in pixels
        #[arg(long)]
        height: Option<u32>,
        /// Print JSON regardless of the configured style
        #[arg(long)]
        json: bool,
    },
    /// Check a single parameter string against its grammar
    Check {
        /// region, size, rotation, quality or format
        kind: ParamKind,
        value: String,
    },
    /// Print a stock iiif-plan.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Plan {
            path,
            width,
            height,
            json,
        } => {
            let config = config::load_config(&cli.config_dir)?;
            let (width, height) = match (width, height, config.source.dimensions()) {
                (Some(w), Some(h), _) => (w, h),
                (None, None, Some(dims)) => dims,
                _ => return Err("source size required: pass --width and --height".into()),
            };
            let dims = Dimensions::new(width, height)?;
            let request = ImageRequest::from_path(&path)?;
            let directives = request::plan(dims, &request)?;

            if json || config.output.style == OutputStyle::Json {
                println!(
                    "{}",
                    output::format_plan_json(&directives, config.output.pretty)?
                );
            } else {
                for line in output::format_plan(dims, &directives) {
                    println!("{}", line);
                }
            }
        }
        Command::Check { kind, value } => {
            iiif::validate(kind, &value)?;
            println!("ok");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. Warnings only unless `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
