//! Document gateway server and catalog demo.
//!
//! `docgate serve` mounts the product, student and catalog gateways on one
//! listener; `docgate catalog-demo` runs the nested-document queries once.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use docgate::domains::catalog::{self, CatalogProduct};
use docgate::domains::products::{self, Product};
use docgate::domains::students::{self, Student};
use docgate::{gateway, Document, Gateway, InMemoryDocumentStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Document CRUD gateway")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve /products, /students and /catalog/products over HTTP
    Serve {
        /// TCP listener address
        #[arg(long, default_value = "127.0.0.1:3000")]
        listen: SocketAddr,
    },
    /// Seed the catalog and print the results of its canned queries
    CatalogDemo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    match args.command {
        Command::Serve { listen } => serve(listen).await,
        Command::CatalogDemo => catalog_demo(),
    }
}

async fn serve(listen: SocketAddr) -> Result<()> {
    // fail fast: no request is served without its database
    let product_db = InMemoryDocumentStore::open(products::DATABASE)
        .context("open product database")?;
    let student_db = InMemoryDocumentStore::open(students::DATABASE)
        .context("open student database")?;
    let catalog_db = InMemoryDocumentStore::open(catalog::DATABASE)
        .context("open catalog database")?;
    info!(
        databases = ?[product_db.database(), student_db.database(), catalog_db.database()],
        "connected"
    );

    let app = Router::new()
        .merge(gateway::health_router(&[
            Product::COLLECTION,
            Student::COLLECTION,
            "catalog/products",
        ]))
        .merge(gateway::router(Arc::new(Gateway::<_, Product>::new(
            product_db.clone(),
        ))))
        .merge(gateway::router(Arc::new(Gateway::<_, Student>::new(
            student_db.clone(),
        ))))
        .nest(
            "/catalog",
            gateway::router(Arc::new(Gateway::<_, CatalogProduct>::new(
                catalog_db.clone(),
            ))),
        );

    gateway::serve(app, listen, shutdown_signal())
        .await
        .with_context(|| format!("serve on {}", listen))?;

    for db in [&product_db, &student_db, &catalog_db] {
        db.close();
    }
    info!("databases closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(?err, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

fn catalog_demo() -> Result<()> {
    let store = InMemoryDocumentStore::open(catalog::DATABASE).context("open catalog database")?;
    let report = catalog::run_demo(&store).context("run catalog demo")?;
    store.close();

    println!("All products:\n{}", serde_json::to_string_pretty(&report.all)?);
    println!(
        "\nElectronics category:\n{}",
        serde_json::to_string_pretty(&report.electronics)?
    );
    println!(
        "\nVariant colors and stock:\n{}",
        serde_json::to_string_pretty(&report.variant_projection)?
    );
    println!(
        "\nProducts having Blue variants:\n{}",
        serde_json::to_string_pretty(&report.blue_variants)?
    );
    Ok(())
}
