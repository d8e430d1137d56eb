use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Find zombie resources in a Kubernetes cluster and estimate what they cost.
#[derive(Debug, Parser)]
#[command(name = "k8sghost", version, about)]
pub struct Cli {
    /// Scan a single namespace instead of the whole cluster
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Path to a kubeconfig file (default: standard discovery)
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, value_name = "NAME")]
    pub context: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// License key that unlocks the full finding list
    #[arg(long, env = "K8SGHOST_PRO_KEY", hide = true)]
    pub pro_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
