use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inventory::dashboard::{
    client::DEFAULT_API_URL, transfer, Dashboard, ProductClient, SortKey, SubmitOutcome,
};
use inventory::products::repo_types::NewProduct;
use inventory::telemetry;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal dashboard for the inventory API")]
struct Cli {
    /// Products collection URL
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of the (optionally filtered and sorted) product table
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        sort: Option<SortKey>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        per_page: usize,
    },
    /// Show a single product
    Show { id: i64 },
    /// Totals and stock per category
    Summary,
    /// Create a product
    Add(ProductArgs),
    /// Replace a product; omitted fields keep their current value
    Edit {
        id: i64,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete a product after confirmation
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Write the product list to a JSON file
    Export {
        #[arg(long, default_value = transfer::DEFAULT_EXPORT_FILE)]
        out: PathBuf,
    },
    /// Create every product listed in a JSON file
    Import { file: PathBuf },
}

#[derive(Args, Debug)]
struct ProductArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    stock: i32,
}

#[derive(Args, Debug)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    stock: Option<i32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("inventory=warn");

    let cli = Cli::parse();
    let mut dashboard = Dashboard::new(ProductClient::new(cli.api_url));

    match cli.command {
        Command::List {
            search,
            sort,
            page,
            per_page,
        } => {
            dashboard.load().await.context("could not load products")?;
            let state = dashboard.state_mut();
            state.set_search(search);
            state.set_sort(sort);
            state.set_items_per_page(per_page);
            state.go_to_page(page);
            if !state.search().is_empty() {
                println!("Search: {:?}", state.search());
            }
            if let Some(key) = state.sort() {
                println!("Sorted by {key}");
            }
            println!("{} per page", state.items_per_page());
            print!("{}", state.render());
        }
        Command::Show { id } => {
            let product = dashboard.client().get(id).await?;
            println!("{}", serde_json::to_string_pretty(&product)?);
        }
        Command::Summary => {
            dashboard.load().await.context("could not load products")?;
            print!("{}", dashboard.state().summary().render());
        }
        Command::Add(args) => {
            let product = NewProduct {
                name: args.name.trim().to_string(),
                category: args.category.trim().to_string(),
                price: args.price,
                stock: args.stock,
            };
            if let SubmitOutcome::Created(id) = dashboard.submit(&product).await? {
                println!("Created product {id}");
            }
        }
        Command::Edit { id, fields } => {
            dashboard.load().await.context("could not load products")?;
            let current = dashboard
                .state_mut()
                .begin_edit(id)
                .cloned()
                .with_context(|| format!("product {id} is not in the current list"))?;

            let product = NewProduct {
                name: fields.name.map(|s| s.trim().to_string()).unwrap_or(current.name),
                category: fields
                    .category
                    .map(|s| s.trim().to_string())
                    .unwrap_or(current.category),
                price: fields.price.unwrap_or(current.price),
                stock: fields.stock.unwrap_or(current.stock),
            };
            if let SubmitOutcome::Updated(id) = dashboard.submit(&product).await? {
                println!("Updated product {id}");
            }
        }
        Command::Delete { id, yes } => {
            let pending = dashboard.request_delete(id);
            let id = pending.id();
            if !yes && !confirm(&format!("Really delete product {id}?"))? {
                println!("Cancelled");
                return Ok(());
            }
            dashboard.confirm_delete(pending).await?;
            println!("Deleted product {id}");
        }
        Command::Export { out } => {
            dashboard.load().await.context("could not load products")?;
            let json = dashboard.export_json()?;
            std::fs::write(&out, json).with_context(|| format!("write {}", out.display()))?;
            println!(
                "Exported {} products to {}",
                dashboard.state().products().len(),
                out.display()
            );
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let records = transfer::parse_import(&text)?;
            let report = dashboard.import(records).await;
            print!("{}", report.render());
            if !report.is_complete() {
                anyhow::bail!("import finished with rejected records");
            }
        }
    }

    Ok(())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
