// Archivo: controller.rs
// Propósito: punto de entrada de las peticiones. Valida el ticket, construye
// su flujo, registra la ejecución y la lanza en segundo plano.
use crate::errors::WorkflowError;
use crate::factory::TicketRegistry;
use crate::flows::FlowReport;
use crate::step::FlowRuntime;
use dashmap::DashMap;
use drs_client::RemoteExecutor;
use flow::{FlowEngine, RootId, RunMeta, RunReport, RunRepository, RunService};
use serde_json::Value as JsonValue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type ActiveRuns = Arc<DashMap<RootId, Arc<AtomicBool>>>;

/// Saca la ejecución de la tabla de activas cuando su tarea termina, tanto
/// si acaba bien como si falla o entra en pánico.
struct ActiveGuard {
  active: ActiveRuns,
  root_id: RootId,
}

impl Drop for ActiveGuard {
  fn drop(&mut self) {
    self.active.remove(&self.root_id);
  }
}

/// Ejecución lanzada por `submit`. Soltarla no detiene la tarea.
pub struct RunHandle {
  root_id: RootId,
  task: JoinHandle<Result<FlowReport, WorkflowError>>,
}

impl RunHandle {
  pub fn root_id(&self) -> &RootId {
    &self.root_id
  }

  /// Espera a que termine la ejecución y devuelve su informe.
  pub async fn wait(self) -> Result<FlowReport, WorkflowError> {
    self.task
        .await
        .map_err(|e| WorkflowError::TaskFailed(e.to_string()))?
  }
}

/// Controlador de ejecuciones.
///
/// `start` vuelve en cuanto la ejecución queda registrada; el flujo corre en
/// una tarea de tokio. Las ejecuciones son independientes entre sí.
pub struct FlowController {
  registry: Arc<TicketRegistry>,
  runtime: FlowRuntime,
  active: ActiveRuns,
}

impl FlowController {
  pub fn new(registry: Arc<TicketRegistry>, executor: Arc<dyn RemoteExecutor>, repo: Arc<dyn RunRepository>) -> Self {
    Self { registry,
           runtime: FlowRuntime::new(executor, FlowEngine::new(repo)),
           active: Arc::new(DashMap::new()) }
  }

  pub fn registry(&self) -> &TicketRegistry {
    &self.registry
  }

  /// Valida `raw` como ticket de `ticket_type`, registra la ejecución y la
  /// lanza. Devuelve el `root_id` sin esperar a que termine.
  ///
  /// Ninguna llamada remota ocurre antes de lanzar la tarea: un tipo sin
  /// registrar o un payload inválido se rechazan aquí.
  pub fn start(&self, ticket_type: &str, raw: JsonValue) -> Result<RootId, WorkflowError> {
    self.submit(ticket_type, raw).map(|run| run.root_id)
  }

  /// Igual que `start`, pero devuelve un `RunHandle` para esperar el informe.
  pub fn submit(&self, ticket_type: &str, raw: JsonValue) -> Result<RunHandle, WorkflowError> {
    let root_id = RootId::generate();
    let binding = self.registry.resolve_str(ticket_type)?;
    let prepared = binding.prepare(&raw, root_id.clone())?;
    let handle = Handle::try_current().map_err(|e| WorkflowError::Config(format!("no hay runtime de tokio: {}", e)))?;

    let meta = RunMeta::new(root_id.clone(),
                            binding.ticket_type.as_str(),
                            prepared.flow.name(),
                            prepared.header.created_by.clone(),
                            prepared.header.bk_biz_id,
                            raw);
    self.runtime.engine.register_run(&meta)?;

    let cancel = Arc::new(AtomicBool::new(false));
    self.active.insert(root_id.clone(), cancel.clone());
    let guard = ActiveGuard { active: self.active.clone(), root_id: root_id.clone() };
    let run = prepared.flow.run(self.runtime.clone(), cancel);
    let task = handle.spawn(async move {
      let _guard = guard;
      run.await
    });
    tracing::info!(root_id = %root_id,
                   ticket_type = %binding.ticket_type,
                   uid = %prepared.header.uid,
                   "run started");
    Ok(RunHandle { root_id, task })
  }

  /// Pide cancelar la ejecución. El paso en curso termina; el siguiente no
  /// empieza. Devuelve `false` si la ejecución ya terminó o no existe.
  pub fn cancel(&self, root_id: &RootId) -> bool {
    match self.active.get(root_id) {
      Some(flag) => {
        flag.store(true, Ordering::SeqCst);
        tracing::warn!(root_id = %root_id, "run cancellation requested");
        true
      }
      None => false,
    }
  }

  pub fn is_active(&self, root_id: &RootId) -> bool {
    self.active.contains_key(root_id)
  }

  /// Número de ejecuciones lanzadas que aún no han terminado.
  pub fn active_runs(&self) -> usize {
    self.active.len()
  }

  /// Metadatos y rastro de logs de una ejecución.
  pub fn inspect(&self, root_id: &RootId) -> Result<RunReport, WorkflowError> {
    let service = RunService::new(self.runtime.engine.repo().clone());
    Ok(service.inspect(root_id)?)
  }
}
