use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use capi_kubeconfig::adapters::{kube_store, KubeSecretStore, ManagementKubeconfig};
use capi_kubeconfig::config::AppConfig;
use capi_kubeconfig::domain::{GetKubeconfigOptions, KubeconfigService};

#[derive(Parser, Debug)]
#[clap(version = env!("CAPI_KUBECONFIG_VERSION"), author = env!("CARGO_PKG_AUTHORS"))]
pub struct Opts {
    /// Configuration file to use instead of the per-user one
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Get information from the management cluster
    Get {
        #[clap(subcommand)]
        resource: GetCommand,
    },
}

#[derive(Subcommand, Debug)]
enum GetCommand {
    /// Gets the kubeconfig file for accessing a workload cluster
    ///
    /// The user kubeconfig is returned when it exists, otherwise the workload
    /// cluster kubeconfig is returned.
    Kubeconfig(GetKubeconfigArgs),
}

#[derive(Args, Debug)]
struct GetKubeconfigArgs {
    /// Name of the workload cluster
    cluster: String,

    /// Namespace where the workload cluster exist
    #[clap(long, short = 'n', default_value = "")]
    namespace: String,

    /// Path to the kubeconfig file to use for accessing the management cluster
    #[clap(long)]
    kubeconfig: Option<PathBuf>,

    /// Context to be used within the kubeconfig file
    #[clap(long = "kubeconfig-context")]
    kubeconfig_context: Option<String>,

    /// Return the user kubeconfig when available; --user=false fetches the workload cluster kubeconfig
    #[clap(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    user: Option<bool>,

    /// Seconds to wait for each management cluster request
    #[clap(long)]
    timeout: Option<u64>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("capi_kubeconfig=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn get_kubeconfig(config: AppConfig, args: GetKubeconfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let management = ManagementKubeconfig {
        path: args.kubeconfig.or(config.kubeconfig.clone()),
        context: args.kubeconfig_context.or(config.kubeconfig_context.clone()),
    };
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.request_timeout());

    let client = kube_store::connect(&management).await?;
    let store = Arc::new(KubeSecretStore::new(client).with_timeout(timeout));
    let service = KubeconfigService::from_store(store);

    let options = GetKubeconfigOptions::new(args.cluster)
        .with_namespace(args.namespace)
        .with_user_kubeconfig(args.user.unwrap_or(config.prefer_user));

    let kubeconfig = service.get_kubeconfig(&options).await?;
    debug!("Writing {} bytes of kubeconfig", kubeconfig.len());

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(kubeconfig.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

async fn run(opts: Opts) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &opts.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match opts.command {
        Command::Get {
            resource: GetCommand::Kubeconfig(args),
        } => get_kubeconfig(config, args).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let opts = Opts::parse();

    match run(opts).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
