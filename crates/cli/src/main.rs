use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use shipsync_core::{BatchId, OrderId};
use shipsync_export::{InvoiceLinkProvider, OrderExporter};
use shipsync_infra::{EnvConfig, ExportSettings, InMemoryOrderStore, MetaInvoiceLinks, fixtures};

/// Preview fulfilment export batches from JSON order fixtures.
#[derive(Debug, Parser)]
#[command(name = "shipsync", version)]
struct Cli {
    /// JSON array of order records.
    #[arg(long, env = "SHIPSYNC_ORDERS")]
    orders: PathBuf,

    /// JSON array of `{label, code}` delivery services.
    #[arg(long, env = "SHIPSYNC_SERVICES")]
    services: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the payloads the next export batch would send.
    Preview {
        /// Batch id to select for; a fresh one is generated when omitted.
        #[arg(long)]
        batch: Option<String>,
        /// Overrides `SHIPSYNC_BATCH_LIMIT`.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the payload of a single order.
    Show { id: OrderId },
    /// Print how many orders are synced or failed.
    Counts,
}

fn main() -> anyhow::Result<()> {
    shipsync_observability::init();

    let cli = Cli::parse();
    let settings = ExportSettings::from_env();

    let store = fixtures::load_order_store(&cli.orders).context("failed to load orders")?;
    let catalog =
        fixtures::load_service_catalog(&cli.services).context("failed to load delivery services")?;
    let invoices = if settings.invoice_links {
        InvoiceLinkProvider::active(MetaInvoiceLinks)
    } else {
        InvoiceLinkProvider::Absent
    };

    let exporter: OrderExporter<InMemoryOrderStore> = OrderExporter::new(
        store,
        &catalog,
        Arc::new(EnvConfig::from_env()),
        invoices,
        settings.policy(),
    )
    .context("failed to build exporter")?;

    let output = match cli.command {
        Command::Preview { batch, limit } => {
            let batch = match batch {
                Some(raw) => raw.parse::<BatchId>()?,
                None => BatchId::generate(),
            };
            let limit = limit.unwrap_or(settings.batch_limit);
            let payloads = exporter.fetch_for_export(&batch, limit)?;
            tracing::info!(batch = %batch, limit, orders = payloads.len(), "export batch preview");
            serde_json::to_string_pretty(&payloads)?
        }
        Command::Show { id } => serde_json::to_string_pretty(&exporter.fetch_by_id(id)?)?,
        Command::Counts => {
            let counts = serde_json::json!({
                "total": exporter.count()?,
                "synced": exporter.count_synced()?,
                "error": exporter.count_error()?,
            });
            serde_json::to_string_pretty(&counts)?
        }
    };

    println!("{output}");
    Ok(())
}
