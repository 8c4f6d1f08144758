use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use reqwest::Client;

#[derive(Parser)]
#[command(name = "artisan-cli")]
#[command(about = "Artisan Order Manager CLI", long_about = None)]
struct Cli {
    #[arg(short, long, env = "ARTISAN_ENDPOINT", default_value = "http://localhost:8080")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

/// Search and paging options shared by every list command
#[derive(Args, Debug, Clone)]
struct ListArgs {
    /// Search text; blank lists everything
    #[arg(short, long, default_value = "")]
    query: String,

    #[arg(short, long, default_value = "1")]
    page: i64,

    #[arg(short = 's', long, default_value = "5")]
    page_size: i64,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health,

    /// Search clients by name
    Clients(ListArgs),

    /// Search products by name
    Products(ListArgs),

    /// Search orders by client name
    Orders(ListArgs),

    /// Search the lines of one order by product name
    Lines {
        #[arg(value_name = "ORDER_ID")]
        order_id: u64,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Client picker
    PickClients {
        /// `name` or `ci`
        #[arg(short, long, default_value = "name")]
        mode: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Product picker
    PickProducts(ListArgs),
}

async fn get_json(client: &Client, url: String, query: &[(&str, String)]) -> Result<()> {
    let response = client
        .get(&url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;
    let body: serde_json::Value = response
        .json()
        .await
        .with_context(|| format!("response from {} is not JSON", url))?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn list_params(list: &ListArgs) -> Vec<(&'static str, String)> {
    vec![
        ("q", list.query.clone()),
        ("page", list.page.to_string()),
        ("page_size", list.page_size.to_string()),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let endpoint = cli.endpoint.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            get_json(&client, format!("{}/health", endpoint), &[]).await?;
        }

        Commands::Clients(list) => {
            get_json(&client, format!("{}/v1/clients", endpoint), &list_params(&list)).await?;
        }

        Commands::Products(list) => {
            get_json(&client, format!("{}/v1/products", endpoint), &list_params(&list)).await?;
        }

        Commands::Orders(list) => {
            get_json(&client, format!("{}/v1/orders", endpoint), &list_params(&list)).await?;
        }

        Commands::Lines { order_id, list } => {
            get_json(
                &client,
                format!("{}/v1/orders/{}/lines", endpoint, order_id),
                &list_params(&list),
            )
            .await?;
        }

        Commands::PickClients { mode, list } => {
            let mut params = list_params(&list);
            params.push(("mode", mode));
            get_json(&client, format!("{}/v1/pickers/clients", endpoint), &params).await?;
        }

        Commands::PickProducts(list) => {
            get_json(
                &client,
                format!("{}/v1/pickers/products", endpoint),
                &list_params(&list),
            )
            .await?;
        }
    }

    Ok(())
}
