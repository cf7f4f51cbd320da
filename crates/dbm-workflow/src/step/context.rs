use drs_client::RemoteExecutor;
use flow::{FlowEngine, LogLevel, RootId};
use std::sync::Arc;

/// Colaboradores que comparte toda una ejecución: el cliente remoto y el
/// motor que registra estado y logs.
#[derive(Clone)]
pub struct FlowRuntime {
  pub executor: Arc<dyn RemoteExecutor>,
  pub engine: FlowEngine,
}

impl FlowRuntime {
  pub fn new(executor: Arc<dyn RemoteExecutor>, engine: FlowEngine) -> Self {
    Self { executor, engine }
  }
}

/// Contexto pasado a cada paso.
///
/// Da acceso al `root_id` de la ejecución, al ejecutor remoto y a los
/// helpers de log, que emiten un evento `tracing` y además dejan la línea
/// en el rastro de la ejecución.
pub struct StepContext {
  pub root_id: RootId,
  pub step_name: String,
  runtime: FlowRuntime,
}

impl StepContext {
  pub fn new(root_id: RootId, step_name: impl Into<String>, runtime: FlowRuntime) -> Self {
    Self { root_id, step_name: step_name.into(), runtime }
  }

  pub fn executor(&self) -> &dyn RemoteExecutor {
    self.runtime.executor.as_ref()
  }

  pub fn log_info(&self, node_name: &str, message: impl AsRef<str>) {
    let message = message.as_ref();
    tracing::info!(root_id = %self.root_id, step = %self.step_name, node = node_name, "{}", message);
    self.record(node_name, LogLevel::Info, message);
  }

  pub fn log_error(&self, node_name: &str, message: impl AsRef<str>) {
    let message = message.as_ref();
    tracing::error!(root_id = %self.root_id, step = %self.step_name, node = node_name, "{}", message);
    self.record(node_name, LogLevel::Error, message);
  }

  // Un fallo al guardar el log no cambia el resultado del paso.
  fn record(&self, node_name: &str, level: LogLevel, message: &str) {
    let line = format!("[{}] {}", node_name, message);
    if let Err(e) = self.runtime.engine.log(&self.root_id, &self.step_name, node_name, level, line) {
      tracing::warn!(root_id = %self.root_id, error = %e, "no se pudo guardar la línea de log");
    }
  }
}
