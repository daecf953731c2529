use clap::Parser;
use es_storage::engine::catalog::options::{
    OPT_CLUSTER, OPT_FETCH_SIZE, OPT_INDEX, OPT_NODES, OPT_TYPE,
};
use es_storage::engine::catalog::table::ELASTICSEARCH_STORE_TYPE;
use es_storage::engine::catalog::{Schema, TableDesc, TableMeta, TableOptions};
use es_storage::engine::client::{ClientOptions, HttpConnector};
use es_storage::engine::registry::ConnectionRegistry;
use es_storage::engine::split::ScanContext;
use es_storage::engine::storage::ElasticsearchStorageManager;
use es_storage::logging;
use std::sync::Arc;
use tracing::info;

/// Plans scan fragments for an index and prints them as JSON.
#[derive(Parser, Debug)]
#[command(name = "es_splits")]
struct Args {
    #[arg(long)]
    cluster: String,

    /// Comma-separated host:port list
    #[arg(long)]
    nodes: String,

    #[arg(long)]
    index: String,

    #[arg(long = "type")]
    doc_type: String,

    #[arg(long, default_value = "100")]
    fetch_size: String,

    #[arg(long)]
    max_parallelism: Option<usize>,

    #[arg(long, default_value = "es_splits")]
    plan_id: String,

    /// Plan a direct read instead of a scan-node split
    #[arg(long)]
    non_forward: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let options = TableOptions::new()
        .with(OPT_CLUSTER, &args.cluster)
        .with(OPT_NODES, &args.nodes)
        .with(OPT_INDEX, &args.index)
        .with(OPT_TYPE, &args.doc_type)
        .with(OPT_FETCH_SIZE, &args.fetch_size);
    let desc = TableDesc::new(
        args.index.clone(),
        Schema::new(),
        TableMeta::new(ELASTICSEARCH_STORE_TYPE, options),
    );

    let connector = Arc::new(HttpConnector::new(ClientOptions::from_config()));
    let registry = Arc::new(ConnectionRegistry::new(connector));
    let manager = ElasticsearchStorageManager::from_config(registry);

    let fragments = if args.non_forward {
        manager.get_non_forward_split(&desc, 0, usize::MAX).await?
    } else {
        let mut scan = ScanContext::new(0);
        scan.max_parallelism = args.max_parallelism;
        manager.get_splits(&args.plan_id, &desc, &scan).await?
    };

    info!(fragment_count = fragments.len(), "Planned fragments");
    println!("{}", serde_json::to_string_pretty(&fragments)?);
    Ok(())
}
