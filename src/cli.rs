use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, FetchConfig};
use crate::engine::Engine;
use crate::runtime::block_on;
use crate::tools::extract::{extract_with_policy, ExtractPolicy};
use crate::tools::fetch::{load_cookies, HttpFetcher, PageFetcher};

#[derive(Parser)]
#[command(
    name = "listing-photos",
    version,
    about = "Listing photos, floor plans and renovation reports (JSON on stdout)"
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract image candidates from listing markup
    Extract(ExtractArgs),
    /// Fetch a listing page and print its markup
    Fetch(FetchArgs),
    /// Download, label, estimate and write report.html for a listing
    Run(RunArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Site {
    Auto,
    Generic,
    Zillow,
}

#[derive(Args)]
struct ExtractArgs {
    /// `-` for stdin, an http(s) URL, or a file path
    input: String,
    #[arg(long, value_enum, default_value_t = Site::Auto)]
    site: Site,
    /// Page URL used by `--site auto` when the input is a file or stdin
    #[arg(long)]
    url: Option<String>,
    /// Netscape cookie file, used when the input is a URL
    #[arg(long)]
    cookies: Option<PathBuf>,
}

#[derive(Args)]
struct FetchArgs {
    url: String,
    #[arg(long)]
    cookies: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    url: String,
    /// Output directory (default `output`)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Design style used in prompts and the report
    #[arg(long)]
    style: Option<String>,
    #[arg(long)]
    address: Option<String>,
    /// Generate concept renders (needs REPLICATE_API_TOKEN)
    #[arg(long)]
    render: bool,
    #[arg(long)]
    cookies: Option<PathBuf>,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();

    match cli.cmd {
        Command::Extract(args) => {
            let cookies = args.cookies.or_else(|| config.run.cookies.clone());
            let markup = read_input(&args.input, &config.fetch, cookies)?;
            let policy = match args.site {
                Site::Generic => ExtractPolicy::Generic,
                Site::Zillow => ExtractPolicy::zillow(),
                Site::Auto if is_url(&args.input) => ExtractPolicy::for_url(&args.input),
                Site::Auto => args
                    .url
                    .as_deref()
                    .map(ExtractPolicy::for_url)
                    .unwrap_or(ExtractPolicy::Generic),
            };
            print_json(&extract_with_policy(&markup, &policy))
        }
        Command::Fetch(args) => {
            let cookies = args.cookies.or_else(|| config.run.cookies.clone());
            let markup = fetch_markup(&args.url, &config.fetch, cookies)?;
            println!("{markup}");
            Ok(())
        }
        Command::Run(args) => {
            if let Some(out) = args.out {
                config.run.output_dir = out;
            }
            if let Some(style) = args.style {
                config.run.design_style = style;
            }
            if args.address.is_some() {
                config.run.address = args.address;
            }
            if args.cookies.is_some() {
                config.run.cookies = args.cookies;
            }
            config.run.render |= args.render;

            let engine = Engine::new(config)?;
            let summary = block_on(engine.run(&args.url))?;
            print_json(&summary)
        }
    }
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn read_input(input: &str, cfg: &FetchConfig, cookies: Option<PathBuf>) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else if is_url(input) {
        fetch_markup(input, cfg, cookies)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read file '{input}'"))
    }
}

fn fetch_markup(url: &str, cfg: &FetchConfig, cookies: Option<PathBuf>) -> anyhow::Result<String> {
    let jar = cookies.map(|path| load_cookies(&path)).transpose()?.map(Arc::new);
    let fetcher = HttpFetcher::new(cfg.clone(), jar)?;
    Ok(block_on(fetcher.fetch_page(url))?)
}

fn print_json<T: Serialize>(val: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}
