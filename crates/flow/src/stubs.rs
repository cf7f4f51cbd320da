// Archivo: stubs.rs
// Propósito: implementación en memoria del repositorio de ejecuciones.
//
// No es durable; se usa para pruebas, para el binario local y como
// referencia de la semántica esperada de `RunRepository`.
use crate::domain::{RootId, RunMeta, RunStatus, StepLog};
use crate::errors::{FlowError, Result};
use crate::repository::RunRepository;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

// Minimal in-memory repository (not durable)
pub struct InMemoryRunRepository {
    /// Metadatos indexados por `root_id`.
    runs: Mutex<HashMap<RootId, RunMeta>>,
    /// Orden de creación, para `list_runs`.
    order: Mutex<Vec<RootId>>,
    /// Rastro de logs por ejecución.
    logs: Mutex<HashMap<RootId, Vec<StepLog>>>,
}

impl InMemoryRunRepository {
    /// Crea una nueva instancia del repositorio en memoria.
    pub fn new() -> Self {
        Self { runs: Mutex::new(HashMap::new()),
               order: Mutex::new(Vec::new()),
               logs: Mutex::new(HashMap::new()) }
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `FlowError::Storage`.
    fn lock<'a, T>(&'a self, m: &'a Mutex<T>) -> std::result::Result<MutexGuard<'a, T>, FlowError> {
        m.lock().map_err(|e| FlowError::Storage(format!("mutex poisoned: {:?}", e)))
    }
}

impl Default for InMemoryRunRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RunRepository for InMemoryRunRepository {
    fn create_run(&self, meta: &RunMeta) -> Result<()> {
        let mut runs = self.lock(&self.runs)?;
        if runs.contains_key(&meta.root_id) {
            return Err(FlowError::Conflict(format!("run {} ya existe", meta.root_id)));
        }
        runs.insert(meta.root_id.clone(), meta.clone());
        self.lock(&self.order)?.push(meta.root_id.clone());
        Ok(())
    }

    fn get_run(&self, root_id: &RootId) -> Result<RunMeta> {
        let runs = self.lock(&self.runs)?;
        runs.get(root_id)
            .cloned()
            .ok_or(FlowError::NotFound(format!("run {}", root_id)))
    }

    fn update_status(&self, root_id: &RootId, status: RunStatus, failed_step: Option<String>) -> Result<RunMeta> {
        let mut runs = self.lock(&self.runs)?;
        let meta = runs.get_mut(root_id)
                       .ok_or(FlowError::NotFound(format!("run {}", root_id)))?;
        if meta.status.is_terminal() {
            return Err(FlowError::Conflict(format!("run {} ya terminó como {}", root_id, meta.status)));
        }
        meta.status = status;
        if failed_step.is_some() {
            meta.failed_step = failed_step;
        }
        meta.updated_at = Utc::now();
        Ok(meta.clone())
    }

    fn append_log(&self, log: &StepLog) -> Result<()> {
        if !self.lock(&self.runs)?.contains_key(&log.root_id) {
            return Err(FlowError::NotFound(format!("run {}", log.root_id)));
        }
        self.lock(&self.logs)?
            .entry(log.root_id.clone())
            .or_default()
            .push(log.clone());
        Ok(())
    }

    fn read_logs(&self, root_id: &RootId) -> Result<Vec<StepLog>> {
        if !self.lock(&self.runs)?.contains_key(root_id) {
            return Err(FlowError::NotFound(format!("run {}", root_id)));
        }
        Ok(self.lock(&self.logs)?.get(root_id).cloned().unwrap_or_default())
    }

    fn list_runs(&self) -> Result<Vec<RunMeta>> {
        let order = self.lock(&self.order)?.clone();
        let runs = self.lock(&self.runs)?;
        Ok(order.iter().filter_map(|id| runs.get(id).cloned()).collect())
    }
}
