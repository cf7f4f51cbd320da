// Archivo: service.rs
// Propósito: implementar `RunService`, la capa de consulta que usan los
// handlers externos para inspeccionar una ejecución por su `root_id`.
use crate::domain::{RootId, RunMeta, StepLog};
use crate::engine::FlowEngine;
use crate::errors::Result;
use crate::repository::RunRepository;
use serde::Serialize;
use std::sync::Arc;

/// Vista completa de una ejecución: metadatos más rastro de logs.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub meta: RunMeta,
    pub logs: Vec<StepLog>,
}

/// Servicio de alto nivel sobre el repositorio de ejecuciones.
pub struct RunService<R = dyn RunRepository>
    where R: RunRepository + ?Sized
{
    engine: FlowEngine<R>,
}

impl<R> RunService<R> where R: RunRepository + ?Sized
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { engine: FlowEngine::new(repo) }
    }

    /// Motor compartido, para entregarlo a quien ejecuta los flujos.
    pub fn engine(&self) -> FlowEngine<R> {
        self.engine.clone()
    }

    pub fn inspect(&self, root_id: &RootId) -> Result<RunReport> {
        let meta = self.engine.get_run(root_id)?;
        let logs = self.engine.read_logs(root_id)?;
        Ok(RunReport { meta, logs })
    }

    pub fn list(&self) -> Result<Vec<RunMeta>> {
        self.engine.repo().list_runs()
    }
}
