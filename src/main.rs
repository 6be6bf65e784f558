use clap::Parser;
use kiosk_ledger::application::command::OrderCommand;
use kiosk_ledger::application::session::OrderSession;
use kiosk_ledger::infrastructure::json_catalog::JsonCatalogSource;
use kiosk_ledger::infrastructure::mock_checkout::MockCheckout;
use kiosk_ledger::infrastructure::summary_log::SummaryLog;
use kiosk_ledger::interfaces::csv::command_reader::CommandReader;
use kiosk_ledger::interfaces::csv::order_writer::OrderWriter;
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product catalog JSON file
    catalog: PathBuf,

    /// Order commands CSV file (action, product, index, quantity)
    #[arg(required_unless_present = "list_catalog")]
    commands: Option<PathBuf>,

    /// Print the catalog and exit
    #[arg(long)]
    list_catalog: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the order. Override with RUST_LOG.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let source = JsonCatalogSource::new(&cli.catalog);
    let mut session = OrderSession::open(&source, Box::new(MockCheckout::new()))
        .await
        .into_diagnostic()?;

    if cli.list_catalog {
        for category in &session.catalog().categories {
            for product in &category.products {
                println!(
                    "{}\t{}\t{}",
                    category.name,
                    product.name,
                    product.price.formatted()
                );
            }
        }
        return Ok(());
    }

    session.subscribe(Box::new(SummaryLog));

    let path = cli
        .commands
        .ok_or_else(|| miette!("No commands file given"))?;
    let file = File::open(path).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for record in reader.commands() {
        match record.and_then(OrderCommand::try_from) {
            Ok(command) => {
                if let Err(e) = session.apply(command).await {
                    tracing::warn!("Error processing command: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Error reading command: {}", e);
            }
        }
    }

    let order = session.into_order();
    tracing::info!(
        items = order.item_count,
        total = %order.total_price.formatted(),
        "Final order"
    );

    let stdout = io::stdout();
    let mut writer = OrderWriter::new(stdout.lock());
    writer.write_order(&order).into_diagnostic()?;

    Ok(())
}
