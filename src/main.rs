//! CLI entry point for the sitemapper tool.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sitemapper_core::{
    DEFAULT_FETCH_INTERVAL, FailurePolicy, FetchOptions, Fetcher, RateLimiter, Sitemap,
    SitemapResolver, TransportSettings, combine_file_into_url, to_urlset_xml,
};
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::{FileConfig, load_default_file_config};
use cli::{Cli, Command, CombineArgs, OutputFormat, ResolveArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let loaded = load_default_file_config()?;
    let file_config = loaded.config.unwrap_or_default();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config file > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => file_config
                .verbosity
                .map_or("info", app_config::VerbositySetting::log_level),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?cli, config_path = ?loaded.path, "CLI arguments parsed");

    let resolver = build_resolver(&cli, &file_config)?;
    let options = build_fetch_options(&cli.headers)?;

    match &cli.command {
        Command::Resolve(args) => run_resolve(&resolver, &options, args).await,
        Command::Combine(args) => run_combine(&resolver, &options, args).await,
    }
}

fn build_resolver(cli: &Cli, file_config: &FileConfig) -> Result<SitemapResolver> {
    let interval = cli
        .interval_ms
        .or(file_config.interval_ms)
        .map_or(DEFAULT_FETCH_INTERVAL, Duration::from_millis);

    let rate_limiter = if interval.is_zero() {
        debug!("fetch interval disabled");
        Arc::new(RateLimiter::disabled())
    } else {
        debug!(interval_ms = interval.as_millis(), "fetch interval enabled");
        Arc::new(RateLimiter::new(interval))
    };

    let defaults = TransportSettings::default();
    let settings = TransportSettings {
        connect_timeout_secs: cli
            .connect_timeout
            .or(file_config.connect_timeout_secs)
            .unwrap_or(defaults.connect_timeout_secs),
        read_timeout_secs: cli
            .read_timeout
            .or(file_config.read_timeout_secs)
            .unwrap_or(defaults.read_timeout_secs),
        user_agent: file_config.user_agent.clone(),
    };

    let fetcher = Fetcher::with_settings(rate_limiter, &settings)
        .context("failed to build HTTP client")?;
    Ok(SitemapResolver::new(Arc::new(fetcher)))
}

fn build_fetch_options(headers: &[(String, String)]) -> Result<FetchOptions> {
    let mut options = FetchOptions::default();
    for (name, value) in headers {
        options = options.with_header(name, value)?;
    }
    Ok(options)
}

async fn run_resolve(
    resolver: &SitemapResolver,
    options: &FetchOptions,
    args: &ResolveArgs,
) -> Result<()> {
    let policy = if args.force {
        FailurePolicy::Force
    } else {
        FailurePolicy::Strict
    };

    let sitemap = resolver.resolve(&args.location, options, policy).await?;
    let rendered = render(&sitemap, args.format)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            info!(
                urls = sitemap.len(),
                output = %path.display(),
                "wrote resolved sitemap"
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

async fn run_combine(
    resolver: &SitemapResolver,
    options: &FetchOptions,
    args: &CombineArgs,
) -> Result<()> {
    let combined = combine_file_into_url(
        resolver,
        &args.local_file,
        &args.remote_url,
        &args.dest,
        options,
    )
    .await?;
    info!(
        urls = combined.len(),
        dest = %args.dest.display(),
        "combine complete"
    );
    Ok(())
}

fn render(sitemap: &Sitemap, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(sitemap
            .locations()
            .map(|loc| format!("{loc}\n"))
            .collect()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&sitemap.urls)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Xml => Ok(to_urlset_xml(sitemap)?),
    }
}
