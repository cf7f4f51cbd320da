// Archivo: engine.rs
// Propósito: implementar `FlowEngine`, el delegado que registra el ciclo de
// vida de una ejecución (created -> running -> terminal) y su rastro de logs.
//
// La ejecución de los pasos ocurre fuera de este crate; el motor sólo
// garantiza que cada transición y cada línea de log queden registradas en el
// `RunRepository` inyectado.
use crate::domain::{LogLevel, RootId, RunMeta, RunStatus, StepLog};
use crate::errors::{FlowError, Result};
use crate::repository::RunRepository;
use chrono::Utc;
use std::sync::Arc;

/// Motor de registro de ejecuciones.
///
/// Es barato de clonar (sólo comparte el `Arc` del repositorio), de modo que
/// cada tarea en segundo plano puede llevarse su propia copia.
pub struct FlowEngine<R = dyn RunRepository>
    where R: RunRepository + ?Sized
{
    repo: Arc<R>,
}

impl<R> Clone for FlowEngine<R> where R: RunRepository + ?Sized
{
    fn clone(&self) -> Self {
        Self { repo: self.repo.clone() }
    }
}

impl<R> FlowEngine<R> where R: RunRepository + ?Sized
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &Arc<R> {
        &self.repo
    }

    /// Registra una ejecución nueva en estado `created`.
    pub fn register_run(&self, meta: &RunMeta) -> Result<()> {
        if meta.status != RunStatus::Created {
            return Err(FlowError::Conflict(format!("run {} debe registrarse como created, no {}",
                                                   meta.root_id, meta.status)));
        }
        self.repo.create_run(meta)
    }

    /// `created -> running`.
    pub fn mark_running(&self, root_id: &RootId) -> Result<RunMeta> {
        self.repo.update_status(root_id, RunStatus::Running, None)
    }

    /// Cierra la ejecución con un estado terminal. `failed_step` sólo tiene
    /// sentido para `failed`/`revoked`.
    pub fn finish(&self, root_id: &RootId, status: RunStatus, failed_step: Option<String>) -> Result<RunMeta> {
        if !status.is_terminal() {
            return Err(FlowError::Conflict(format!("{} no es un estado terminal", status)));
        }
        self.repo.update_status(root_id, status, failed_step)
    }

    /// Añade una línea al rastro de logs de la ejecución.
    pub fn log(&self, root_id: &RootId, step_name: &str, node_name: &str, level: LogLevel, message: impl Into<String>) -> Result<()> {
        let entry = StepLog { root_id: root_id.clone(),
                              step_name: step_name.to_string(),
                              node_name: node_name.to_string(),
                              level,
                              message: message.into(),
                              created_at: Utc::now() };
        self.repo.append_log(&entry)
    }

    pub fn get_run(&self, root_id: &RootId) -> Result<RunMeta> {
        self.repo.get_run(root_id)
    }

    pub fn read_logs(&self, root_id: &RootId) -> Result<Vec<StepLog>> {
        self.repo.read_logs(root_id)
    }
}
