use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trackside::{config, output, parse, render};

#[derive(Parser)]
#[command(name = "trackside")]
#[command(about = "Static report generator for cross-country meet results")]
#[command(long_about = "\
Static report generator for cross-country meet results

A scraped results CSV plus a directory of meet photos in; one
self-contained HTML report out.

Expected inputs:

  meet.csv                       # Scraped results file:
                                 #   rows 0-3: name, date, URL, comments
                                 #   team table, boundary row,
                                 #   individual table to end of file
  gallery/                       # Meet photos (jpg/jpeg/png/webp),
                                 #   shown sorted by filename
  report.toml                    # Optional: layout strategy, colors, grid

Run 'trackside gen-config' to generate a documented report.toml.")]
#[command(version)]
struct Cli {
    /// Results CSV scraped from the meet page
    #[arg(long, default_value = "meet.csv", global = true)]
    csv: PathBuf,

    /// Directory of meet photos
    #[arg(long, default_value = "gallery", global = true)]
    gallery: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".trackside-temp", global = true)]
    temp_dir: PathBuf,

    /// Report configuration file
    #[arg(long, default_value = "report.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the results CSV and gallery into a manifest
    Parse,
    /// Produce the HTML report from an existing manifest
    Render,
    /// Run the full pipeline: parse → render
    Build,
    /// Validate the results file without writing anything
    Check,
    /// Print a stock report.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics are opt-in via RUST_LOG; summaries go to stdout through
    // `output`, warnings and up to stderr.
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse => {
            let config = config::load_config(&cli.config)?;
            let manifest = parse::parse(&cli.csv, &cli.gallery, &config)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_parse_output(&manifest);
        }
        Command::Render => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            render::render(&manifest_path, &cli.gallery, &cli.output)?;
            let manifest = render::load_manifest(&manifest_path)?;
            output::print_render_output(&manifest, &cli.output);
        }
        Command::Build => {
            let config = config::load_config(&cli.config)?;

            println!("==> Stage 1: Parsing {}", cli.csv.display());
            let manifest = parse::parse(&cli.csv, &cli.gallery, &config)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_parse_output(&manifest);

            println!("==> Stage 2: Rendering → {}", cli.output.display());
            render::render(&manifest_path, &cli.gallery, &cli.output)?;
            output::print_render_output(&manifest, &cli.output);

            println!(
                "==> Build complete: {}",
                cli.output.join("index.html").display()
            );
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            println!("==> Checking {}", cli.csv.display());
            let manifest = parse::parse(&cli.csv, &cli.gallery, &config)?;
            output::print_parse_output(&manifest);
            println!("==> Results file is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
