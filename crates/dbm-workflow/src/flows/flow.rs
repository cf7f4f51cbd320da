// Archivo: flow.rs
// Propósito: ensamblar una lista ordenada de pasos y ejecutarla con
// semántica fail-fast, registrando el ciclo de vida en el motor.
use crate::errors::WorkflowError;
use crate::step::{FlowRuntime, Step, StepContext, TransData};
use flow::{RootId, RunStatus};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Informe final de una ejecución.
#[derive(Debug, Clone, Serialize)]
pub struct FlowReport {
  pub root_id: RootId,
  pub flow_name: String,
  pub status: RunStatus,
  /// Paso que devolvió `false`, falló con error o no llegó a empezar por
  /// cancelación.
  pub failed_step: Option<String>,
  /// Contexto tal como lo dejó el último paso ejecutado.
  pub trans_data: TransData,
}

/// Construye un `Flow` paso a paso.
pub struct FlowBuilder {
  root_id: RootId,
  name: String,
  trans_data: TransData,
  steps: Vec<Box<dyn Step>>,
}

impl FlowBuilder {
  pub fn new(root_id: RootId, name: impl Into<String>) -> Self {
    Self { root_id, name: name.into(), trans_data: TransData::default(), steps: Vec::new() }
  }

  pub fn root_id(&self) -> &RootId {
    &self.root_id
  }

  /// Contexto inicial con el que arranca el primer paso.
  pub fn trans_data(mut self, trans_data: TransData) -> Self {
    self.trans_data = trans_data;
    self
  }

  /// Añade un paso al final de la lista.
  pub fn step<S: Step + 'static>(mut self, step: S) -> Self {
    self.steps.push(Box::new(step));
    self
  }

  pub fn build(self) -> Flow {
    Flow { root_id: self.root_id, name: self.name, trans_data: self.trans_data, steps: self.steps }
  }
}

/// Lista ordenada de pasos lista para ejecutarse una sola vez.
pub struct Flow {
  root_id: RootId,
  name: String,
  trans_data: TransData,
  steps: Vec<Box<dyn Step>>,
}

impl Flow {
  pub fn root_id(&self) -> &RootId {
    &self.root_id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name()).collect()
  }

  /// Ejecuta los pasos en orden de declaración.
  ///
  /// - El primer `success = false` detiene la ejecución (`failed`); los
  ///   pasos ya completados no se compensan.
  /// - Un `Err` de un paso se registra, deja la ejecución en `failed` y se
  ///   propaga.
  /// - `cancel` se consulta antes de cada paso; si está activo la ejecución
  ///   termina como `revoked` sin empezar el siguiente paso.
  pub async fn run(self, runtime: FlowRuntime, cancel: Arc<AtomicBool>) -> Result<FlowReport, WorkflowError> {
    let Flow { root_id, name, mut trans_data, steps } = self;
    let engine = runtime.engine.clone();
    engine.mark_running(&root_id)?;
    tracing::info!(root_id = %root_id, flow = %name, steps = steps.len(), "flow started");

    for step in &steps {
      if cancel.load(Ordering::SeqCst) {
        tracing::warn!(root_id = %root_id, step = step.name(), "flow revoked before step");
        engine.finish(&root_id, RunStatus::Revoked, Some(step.name().to_string()))?;
        return Ok(FlowReport { root_id,
                               flow_name: name,
                               status: RunStatus::Revoked,
                               failed_step: Some(step.name().to_string()),
                               trans_data });
      }

      let ctx = StepContext::new(root_id.clone(), step.name(), runtime.clone());
      match step.execute(&ctx, trans_data).await {
        Ok(output) => {
          trans_data = output.trans_data;
          if !output.success {
            ctx.log_error(step.node_name(), format!("paso {} fallido, la ejecución se detiene", step.name()));
            engine.finish(&root_id, RunStatus::Failed, Some(step.name().to_string()))?;
            return Ok(FlowReport { root_id,
                                   flow_name: name,
                                   status: RunStatus::Failed,
                                   failed_step: Some(step.name().to_string()),
                                   trans_data });
          }
        }
        Err(e) => {
          ctx.log_error(step.node_name(), format!("paso {} abortado: {}", step.name(), e));
          engine.finish(&root_id, RunStatus::Failed, Some(step.name().to_string()))?;
          return Err(e);
        }
      }
    }

    engine.finish(&root_id, RunStatus::Succeeded, None)?;
    tracing::info!(root_id = %root_id, flow = %name, "flow succeeded");
    Ok(FlowReport { root_id, flow_name: name, status: RunStatus::Succeeded, failed_step: None, trans_data })
  }
}
