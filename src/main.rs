use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dbm_domain::ClusterPhase;
use dbm_workflow::{builtin_registry, init_registry, FlowController, WorkflowConfig};
use drs_client::HttpDrsClient;
use flow::InMemoryRunRepository;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dbm-flow", about = "Orquestador de flujos de administración de MySQL")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ejecuta un ticket leído de un fichero JSON y muestra el resultado
    Run {
        /// Fichero con el ticket `{uid, created_by, bk_biz_id, ticket_type, infos}`
        #[arg(long)]
        ticket_file: PathBuf,
        /// Tipo de ticket; por defecto el campo `ticket_type` del fichero
        #[arg(long)]
        ticket_type: Option<String>,
    },
    /// Lista los tipos de ticket registrados
    List {
        #[arg(long, value_enum)]
        phase: Option<Phase>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Phase {
    Online,
    Offline,
}

impl From<Phase> for ClusterPhase {
    fn from(p: Phase) -> Self {
        match p {
            Phase::Online => ClusterPhase::Online,
            Phase::Offline => ClusterPhase::Offline,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dbm_flow=info,dbm_workflow=info,drs_client=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let registry = init_registry(builtin_registry())?;

    match Cli::parse().command {
        Command::List { phase } => {
            for binding in registry.bindings() {
                if phase.map_or(true, |p| binding.phase == ClusterPhase::from(p)) {
                    println!("{:<26} {:<8} {:<24} {}",
                             binding.ticket_type.to_string(),
                             binding.phase.to_string(),
                             binding.iam.to_string(),
                             binding.display_name);
                }
            }
            Ok(())
        }
        Command::Run { ticket_file, ticket_type } => {
            let config = WorkflowConfig::from_env()?;
            let raw = std::fs::read_to_string(&ticket_file)
                .with_context(|| format!("no se pudo leer {}", ticket_file.display()))?;
            let payload: Value = serde_json::from_str(&raw).context("el ticket no es JSON válido")?;
            let ticket_type = match ticket_type {
                Some(t) => t,
                None => payload.get("ticket_type")
                               .and_then(Value::as_str)
                               .map(str::to_string)
                               .ok_or_else(|| anyhow!("falta --ticket-type y el ticket no trae ticket_type"))?,
            };

            tracing::info!(drs_url = %config.drs_url, ticket_type = %ticket_type, "running ticket");
            let executor = HttpDrsClient::new(&config.drs_url, config.drs_connect_timeout, config.drs_timeout)?;
            let controller = FlowController::new(registry,
                                                 Arc::new(executor),
                                                 Arc::new(InMemoryRunRepository::new()));

            let run = controller.submit(&ticket_type, payload)?;
            let root_id = run.root_id().clone();
            println!("root_id: {}", root_id);

            let outcome = run.wait().await;
            let inspected = controller.inspect(&root_id)?;
            println!("{}", serde_json::to_string_pretty(&inspected)?);
            let report = outcome?;
            println!("{}", serde_json::to_string_pretty(&report.trans_data)?);
            if report.status != flow::RunStatus::Succeeded {
                return Err(anyhow!("la ejecución {} terminó como {}", root_id, report.status));
            }
            Ok(())
        }
    }
}
