//! catalog - command line client for the catalog API
//!
//! Fetches one resource and prints it as pretty JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_sdk::{spawn_cleanup_task, CatalogClient, SdkConfig};

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Query the catalog API")]
struct Cli {
    /// API root, overrides CATALOG_BASE_URL
    #[arg(long, env = "CATALOG_BASE_URL")]
    base_url: Option<String>,

    /// License key, overrides CATALOG_LICENSE_KEY
    #[arg(long, env = "CATALOG_LICENSE_KEY", hide_env_values = true)]
    license_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List banners
    Banners,
    /// List categories
    Categories,
    /// Show one category
    Category { id: String },
    /// List products
    Products {
        #[arg(long)]
        no_variations: bool,
        #[arg(long)]
        no_grouping: bool,
    },
    /// Show one product
    Product {
        id: u64,
        #[arg(long)]
        no_variations: bool,
        #[arg(long)]
        no_grouping: bool,
    },
    /// Search products
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Fetch products by SKU, in the order given
    Filter {
        #[arg(required = true)]
        skus: Vec<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long)]
        no_variations: bool,
    },
    /// List the variations of one product
    Variations { id: u64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_sdk=info,catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = SdkConfig::from_env().context("invalid environment configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(license_key) = cli.license_key {
        config.license_key = license_key;
    }
    debug!(base_url = %config.base_url, "configuration loaded");

    let client = CatalogClient::from_config(&config).context("failed to build catalog client")?;
    let cleanup = (config.cleanup_interval > 0)
        .then(|| spawn_cleanup_task(client.cache().clone(), config.cleanup_interval));

    let result = run(&client, cli.command).await;

    if let Some(handle) = cleanup {
        handle.abort();
    }
    info!(stats = ?client.cache().stats(), "done");
    result
}

async fn run(client: &CatalogClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Banners => print(&client.banners().get_banners().await?),
        Command::Categories => print(&client.categories().get_categories().await?),
        Command::Category { id } => print(&client.categories().get_category_by_id(&id).await?),
        Command::Products {
            no_variations,
            no_grouping,
        } => print(
            &client
                .products()
                .get_products(!no_variations, !no_grouping)
                .await?,
        ),
        Command::Product {
            id,
            no_variations,
            no_grouping,
        } => print(
            &client
                .products()
                .get_product_by_id(id, !no_variations, !no_grouping)
                .await?,
        ),
        Command::Search { query, page, limit } => {
            print(&client.products().search_products(&query, page, limit).await?)
        }
        Command::Filter {
            skus,
            page,
            limit,
            no_variations,
        } => print(
            &client
                .products()
                .filter_products_by_sku(&skus, page, limit, !no_variations)
                .await?,
        ),
        Command::Variations { id } => {
            print(&client.products().get_product_variations(id).await?)
        }
    }
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
