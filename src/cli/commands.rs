// CLI command definitions

use super::manifest::{DeployCommand, DestroyCommand, StatusCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kube-dispatch",
    version,
    about = "Create, check and delete Kubernetes resources from YAML manifests",
    long_about = "Routes manifests by kind to typed Kubernetes API calls. Supported kinds: \
                  deployment, service, job, persistentvolumeclaim, configmap, petset"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    /// If not specified, uses current context from kubeconfig
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Path to a TOML settings file with a [kubernetes] table
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create the resources described by the manifests (existing ones are skipped)
    Deploy(DeployCommand),

    /// Delete the resources described by the manifests, with dependents
    Destroy(DestroyCommand),

    /// Report whether the resources described by the manifests exist
    Status(StatusCommand),
}
