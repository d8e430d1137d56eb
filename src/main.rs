use anyhow::Result;
use clap::Parser;
use tracing::info;

use k8sghost::cli::{Cli, OutputFormat};
use k8sghost::cluster::{connect, KubeAccessor};
use k8sghost::report;
use k8sghost::scanner::ZombieScanner;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let pro = report::is_pro_key(cli.pro_key.as_deref());

    let client = connect(cli.kubeconfig.as_deref(), cli.context.as_deref()).await?;
    let scanner = ZombieScanner::new(KubeAccessor::new(client));
    let zombies = scanner.scan_all(cli.namespace.as_deref()).await?;
    info!("Scan complete with {} findings", zombies.len());

    match cli.format {
        OutputFormat::Table => println!("{}", report::render_table(&zombies, pro)),
        OutputFormat::Json => {
            let payload = report::build_json_report(&zombies, pro);
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

// Diagnostics go to stderr so piped --format json output stays clean.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
