use dbm_domain::{join_field_errors, DomainError, FieldError};
use thiserror::Error;

// Errores comunes del motor de workflow.
//
// Agrupa los fallos que abortan un `start` o una ejecución: tipo de ticket
// sin registrar, payload inválido, violaciones de contrato entre pasos y
// errores envueltos de los crates inferiores. Los fallos remotos esperados
// no llegan aquí: los pasos los devuelven como `success = false`.
#[derive(Error, Debug)]
pub enum WorkflowError {
  /// No hay flujo registrado para el tipo de ticket.
  #[error("tipo de ticket no registrado: {0}")]
  UnregisteredTicketType(String),

  /// El payload no pasó la validación; incluye el detalle por campo.
  #[error("payload inválido: {}", join_field_errors(.0))]
  InvalidPayload(Vec<FieldError>),

  /// Defecto de programación: un paso no encontró lo que otro debía dejar
  /// en el contexto, o se intentó una llamada remota sin direcciones.
  #[error("violación de contrato: {0}")]
  ContractViolation(String),

  /// Configuración de entorno inválida.
  #[error("configuración inválida: {0}")]
  Config(String),

  /// La tarea en segundo plano de una ejecución terminó sin informe
  /// (pánico o cancelación del runtime).
  #[error("la tarea de la ejecución terminó de forma anómala: {0}")]
  TaskFailed(String),

  /// Errores originados por el registro de ejecuciones (crate `flow`).
  #[error("Error de flujo: {0}")]
  Flow(#[from] flow::errors::FlowError),

  /// Otros errores del dominio.
  #[error("Error de dominio: {0}")]
  Domain(DomainError),

  /// Errores de serializacion/deserializacion JSON.
  #[error("Error de serializacion: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl From<DomainError> for WorkflowError {
  fn from(e: DomainError) -> Self {
    match e {
      DomainError::InvalidPayload(fields) => WorkflowError::InvalidPayload(fields),
      DomainError::UnknownTicketType(t) => WorkflowError::UnregisteredTicketType(t),
      other => WorkflowError::Domain(other),
    }
  }
}

impl From<drs_client::DrsError> for WorkflowError {
  fn from(e: drs_client::DrsError) -> Self {
    WorkflowError::ContractViolation(e.to_string())
  }
}
