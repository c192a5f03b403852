use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yousmala_api::{ApiConfig, BackOfficeApi, BackOfficeClient};
use yousmala_engine::{OrderEntryWorkflow, SubmitOutcome, SubmitRejection};
use serde_json::Value;
use yousmala_types::{OrderStatus, ProductInput};

/// Back office order entry. Without a subcommand the terminal UI starts.
#[derive(Debug, Parser)]
#[command(name = "yousmala", version, about)]
struct Cli {
    /// Base URL of the back office API (overrides YOUSMALA_API_BASE).
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order entry.
    #[command(subcommand)]
    Orders(OrdersCommand),
    /// Supplier reference list.
    #[command(subcommand)]
    Suppliers(ListCommand),
    /// Client reference list.
    #[command(subcommand)]
    Clients(ListCommand),
    /// Product catalogue and stock queries.
    #[command(subcommand)]
    Products(ProductsCommand),
}

#[derive(Debug, Subcommand)]
enum OrdersCommand {
    /// Create an order through the same validation as the order form.
    Create(CreateOrderArgs),
}

#[derive(Debug, Args)]
struct CreateOrderArgs {
    #[arg(long, value_name = "ID")]
    supplier: Option<String>,
    /// Total amount; a decimal comma is accepted.
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    amount: Option<String>,
    /// Status label, e.g. "En attente".
    #[arg(long, value_name = "LABEL")]
    status: Option<String>,
    #[arg(long, value_name = "ID")]
    client: Option<String>,
    /// Product to attach; repeat for several.
    #[arg(long = "product", value_name = "ID")]
    products: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum ListCommand {
    List,
}

#[derive(Debug, Subcommand)]
enum ProductsCommand {
    List,
    Show {
        id: String,
    },
    Stock {
        id: String,
    },
    Availability {
        id: String,
        #[arg(long)]
        quantity: u32,
    },
    /// Products expiring soon.
    Expiring,
    /// Add a product to the catalogue.
    Create(ProductArgs),
    /// Replace a product's catalogue entry.
    Update {
        id: String,
        #[command(flatten)]
        product: ProductArgs,
    },
    Delete {
        id: String,
    },
    /// Record a sale, taking units out of stock.
    Sell {
        id: String,
        #[arg(long)]
        quantity: u32,
    },
    /// Record a purchase, adding units to stock.
    Purchase {
        id: String,
        #[arg(long)]
        quantity: u32,
    },
    /// Overwrite the stock level.
    UpdateStock {
        id: String,
        #[arg(long)]
        quantity: u32,
    },
    /// Reorder every product whose stock is below the threshold.
    AutoReorder {
        #[arg(long)]
        threshold: u32,
    },
}

#[derive(Debug, Args)]
struct ProductArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Purchase price.
    #[arg(long)]
    price: f64,
    #[arg(long)]
    price_for_sale: f64,
    #[arg(long)]
    quantity: u32,
    #[arg(long = "category", value_name = "ID")]
    category_id: String,
    /// Expiry date (YYYY-MM-DD).
    #[arg(long = "expires", value_name = "DATE")]
    date_exp: NaiveDate,
}

impl From<ProductArgs> for ProductInput {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            price: args.price,
            price_for_sale: args.price_for_sale,
            quantity: args.quantity,
            category_id: args.category_id,
            date_exp: args.date_exp,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = build_client(cli.api_base.as_deref())?;

    // No subcommand => TUI
    let Some(command) = cli.command else {
        let log_path = yousmala_tui::init_file_tracing()?;
        info!(path = %log_path.display(), "starting order entry terminal");
        return yousmala_tui::run(Arc::new(client)).await;
    };

    init_tracing();
    run_command(&client, command).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_client(api_base: Option<&str>) -> Result<BackOfficeClient> {
    let mut config = ApiConfig::from_env();
    if let Some(base) = api_base {
        config = config.with_base_url(base);
    }
    BackOfficeClient::new(&config).context("failed to configure the back office client")
}

async fn run_command(client: &BackOfficeClient, command: Command) -> Result<()> {
    match command {
        Command::Orders(OrdersCommand::Create(args)) => create_order(client, args).await,
        Command::Suppliers(ListCommand::List) => print_json(&client.list_suppliers().await?),
        Command::Clients(ListCommand::List) => print_json(&client.list_clients().await?),
        Command::Products(products) => run_products(client, products).await,
    }
}

async fn run_products(client: &BackOfficeClient, command: ProductsCommand) -> Result<()> {
    match command {
        ProductsCommand::List => print_json(&client.list_products().await?),
        ProductsCommand::Show { id } => print_json(&client.get_product(&id).await?),
        ProductsCommand::Stock { id } => print_json(&client.check_stock(&id).await?),
        ProductsCommand::Availability { id, quantity } => print_json(&client.check_availability(&id, quantity).await?),
        ProductsCommand::Expiring => print_json(&client.products_expiring_soon().await?),
        ProductsCommand::Create(product) => print_json(&client.create_product(&product.into()).await?),
        ProductsCommand::Update { id, product } => {
            let answer = client.update_product(&id, &product.into()).await?;
            print_answer(&answer, &format!("product {id} updated"))
        }
        ProductsCommand::Delete { id } => {
            let answer = client.delete_product(&id).await?;
            print_answer(&answer, &format!("product {id} deleted"))
        }
        ProductsCommand::Sell { id, quantity } => {
            let answer = client.sell_product(&id, quantity).await?;
            print_answer(&answer, &format!("sold {quantity} of {id}"))
        }
        ProductsCommand::Purchase { id, quantity } => {
            let answer = client.purchase_product(&id, quantity).await?;
            print_answer(&answer, &format!("purchased {quantity} of {id}"))
        }
        ProductsCommand::UpdateStock { id, quantity } => {
            let answer = client.update_stock(&id, quantity).await?;
            print_answer(&answer, &format!("stock of {id} set to {quantity}"))
        }
        ProductsCommand::AutoReorder { threshold } => {
            let answer = client.auto_reorder(threshold).await?;
            print_answer(&answer, &format!("auto reorder requested below {threshold}"))
        }
    }
}

/// Drive the order workflow headlessly: open, fill, submit.
async fn create_order(api: &dyn BackOfficeApi, args: CreateOrderArgs) -> Result<()> {
    let mut workflow = OrderEntryWorkflow::new();
    workflow.open_create_modal();
    fill_draft(&mut workflow, args)?;

    let outcome = workflow.submit(api).await;
    if let Some(notification) = workflow.notifications().latest() {
        println!("{}", notification.message);
    }

    match outcome {
        SubmitOutcome::Created(order) => print_json(&order),
        SubmitOutcome::Rejected(SubmitRejection::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {}", field.wire_name(), message);
            }
            bail!("the order is invalid");
        }
        SubmitOutcome::Rejected(rejection) => bail!(rejection),
        SubmitOutcome::Failed(reason) | SubmitOutcome::Detached(Err(reason)) => {
            bail!("order submission failed: {reason}")
        }
        SubmitOutcome::Detached(Ok(order)) => print_json(&order),
    }
}

fn fill_draft(workflow: &mut OrderEntryWorkflow, args: CreateOrderArgs) -> Result<()> {
    let draft = workflow.draft_mut();
    if let Some(supplier) = args.supplier {
        draft.set_supplier(supplier);
    }
    if let Some(amount) = args.amount {
        draft.set_total_amount(amount);
    }
    if let Some(status) = args.status {
        let status: OrderStatus = status.parse().with_context(|| {
            let known = OrderStatus::ALL.iter().map(|s| s.label()).collect::<Vec<_>>().join(", ");
            format!("unknown status; expected one of: {known}")
        })?;
        draft.set_status(status);
    }
    if let Some(client) = args.client {
        draft.set_client(client);
    }
    draft.set_products(args.products);
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}

/// Print the server's answer, or `done` when it answered with an empty body.
fn print_answer(answer: &Value, done: &str) -> Result<()> {
    if answer.is_null() {
        println!("{done}");
        Ok(())
    } else {
        print_json(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["yousmala"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.api_base.is_none());
    }

    #[test]
    fn create_order_collects_repeated_products() {
        let cli = Cli::try_parse_from([
            "yousmala",
            "orders",
            "create",
            "--supplier",
            "S1",
            "--amount",
            "12,5",
            "--status",
            "En attente",
            "--client",
            "C1",
            "--product",
            "P1",
            "--product",
            "P2",
            "--api-base",
            "http://localhost:9000",
        ])
        .expect("parse");

        assert_eq!(cli.api_base.as_deref(), Some("http://localhost:9000"));
        let Some(Command::Orders(OrdersCommand::Create(args))) = cli.command else {
            panic!("expected orders create");
        };
        assert_eq!(args.products, ["P1", "P2"]);
        assert_eq!(args.amount.as_deref(), Some("12,5"));
    }

    #[test]
    fn availability_requires_quantity() {
        assert!(Cli::try_parse_from(["yousmala", "products", "availability", "P1"]).is_err());
        let cli = Cli::try_parse_from(["yousmala", "products", "availability", "P1", "--quantity", "3"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Command::Products(ProductsCommand::Availability { quantity: 3, .. }))
        ));
    }

    #[test]
    fn fill_draft_rejects_unknown_status() {
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        let args = CreateOrderArgs {
            supplier: Some("S1".into()),
            amount: None,
            status: Some("Perdu".into()),
            client: None,
            products: Vec::new(),
        };
        let error = fill_draft(&mut workflow, args).expect_err("unknown status");
        assert!(error.to_string().contains("En attente"));
    }

    #[test]
    fn fill_draft_accepts_labels_case_insensitively() {
        let mut workflow = OrderEntryWorkflow::new();
        workflow.open_create_modal();
        let args = CreateOrderArgs {
            supplier: Some("S1".into()),
            amount: Some("100".into()),
            status: Some("en attente".into()),
            client: Some("C1".into()),
            products: vec!["P1".into()],
        };
        fill_draft(&mut workflow, args).expect("valid arguments");
        assert_eq!(workflow.draft().status, Some(OrderStatus::Pending));
        assert!(workflow.draft().product_ids.contains("P1"));
    }

    #[test]
    fn product_update_parses_catalogue_fields() {
        let cli = Cli::try_parse_from([
            "yousmala",
            "products",
            "update",
            "P9",
            "--name",
            "Savon noir",
            "--price",
            "3",
            "--price-for-sale",
            "5.5",
            "--quantity",
            "20",
            "--category",
            "CAT2",
            "--expires",
            "2027-01-15",
        ])
        .expect("parse");

        let Some(Command::Products(ProductsCommand::Update { id, product })) = cli.command else {
            panic!("expected products update");
        };
        assert_eq!(id, "P9");
        let input = ProductInput::from(product);
        assert_eq!(input.description, "");
        assert_eq!(input.category_id, "CAT2");
        assert_eq!(input.date_exp, NaiveDate::from_ymd_opt(2027, 1, 15).expect("date"));
    }

    #[test]
    fn product_create_rejects_malformed_expiry() {
        let result = Cli::try_parse_from([
            "yousmala",
            "products",
            "create",
            "--name",
            "Savon noir",
            "--price",
            "3",
            "--price-for-sale",
            "5.5",
            "--quantity",
            "20",
            "--category",
            "CAT2",
            "--expires",
            "15/01/2027",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn stock_commands_use_kebab_case_names() {
        let cli = Cli::try_parse_from(["yousmala", "products", "update-stock", "P1", "--quantity", "35"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Command::Products(ProductsCommand::UpdateStock { quantity: 35, .. }))
        ));

        let cli = Cli::try_parse_from(["yousmala", "products", "auto-reorder", "--threshold", "5"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Command::Products(ProductsCommand::AutoReorder { threshold: 5 }))
        ));
    }
}
