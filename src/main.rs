// src/main.rs

use anyhow::Result;
use clap::Parser;
use recipe_sync::{RepositoryClient, recipe, repodata, resolve, sources};
use std::path::PathBuf;
use tracing::info;

/// Repository the source tarballs are mirrored from
const DEFAULT_BASE_URL: &str = "https://repository.egi.eu/sw/production/cas/1/current/";

/// Metapackage whose dependency closure drives the source list
const DEFAULT_METAPACKAGE: &str = "ca-policy-lcg";

/// Recipe document rewritten in place
const DEFAULT_RECIPE: &str = "meta.yaml";

#[derive(Parser)]
#[command(name = "recipe-sync")]
#[command(author, version, about = "Synchronize a recipe's source list with an RPM repository", long_about = None)]
struct Cli {
    /// Base URL of the RPM repository
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Metapackage whose requirements select the source tarballs
    #[arg(long, default_value = DEFAULT_METAPACKAGE)]
    metapackage: String,

    /// Path to the recipe document to rewrite
    #[arg(long, default_value = DEFAULT_RECIPE)]
    recipe: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let client = RepositoryClient::new()?;

    // Parse the repo manifest
    info!("Fetching repository manifest from {}", cli.base_url);
    let repomd_url = recipe_sync::client::join_url(&cli.base_url, "repodata/repomd.xml");
    let repomd = fetch_string(&client, &repomd_url)?;
    let manifest = repodata::parse_repomd(&repomd)?;

    // Build the dependency map from the primary document
    let primary = fetch_gzip_string(&client, &manifest.primary_url(&cli.base_url))?;
    let dependency_map = repodata::parse_primary(&primary)?;
    info!(
        "Dependency map covers {} packages with requirements",
        dependency_map.len()
    );

    // Resolve the metapackage's transitive closure
    let install_set = resolve::resolve_closure(&dependency_map, &cli.metapackage);
    info!(
        "{} requires {} packages transitively",
        cli.metapackage,
        install_set.len()
    );

    // Locate and hash the source tarballs
    let filelists = fetch_gzip_string(&client, &manifest.filelists_url(&cli.base_url))?;
    let packages = repodata::parse_filelists(&filelists)?;
    let plan = sources::plan_sources(&cli.base_url, &packages, install_set)?;
    let entries = sources::hash_sources(&client, &plan)?;

    // Rewrite the recipe with the new version and sources
    let content = recipe::load_recipe(&cli.recipe)?;
    let rewritten = recipe::rewrite_recipe(&content, &plan.version, &entries, &cli.metapackage)?;
    recipe::write_recipe(&cli.recipe, &rewritten)?;

    println!("Updated the recipe with the new sources");
    Ok(())
}

/// Fetch a URL and decode the body as UTF-8
fn fetch_string(client: &RepositoryClient, url: &str) -> Result<String> {
    let bytes = client.download_to_bytes(url)?;
    Ok(String::from_utf8(bytes)?)
}

/// Fetch a gzip-compressed URL and decode the decompressed body as UTF-8
fn fetch_gzip_string(client: &RepositoryClient, url: &str) -> Result<String> {
    let bytes = client.fetch_gzip(url)?;
    Ok(String::from_utf8(bytes)?)
}
