// errors.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error de validación asociado a un campo concreto del payload.
///
/// `field` usa una ruta legible (`infos[0].targets[1].db_name`) para que la
/// capa HTTP pueda devolver el detalle tal cual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self { field: field.into(), message: message.into() }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

/// Formatea una lista de errores de campo en una sola línea.
pub fn join_field_errors(errors: &[FieldError]) -> String {
  errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

#[derive(Debug, Error, Clone)]
pub enum DomainError {
  #[error("Error de validación: {0}")]
  ValidationError(String),
  #[error("Payload inválido: {}", join_field_errors(.0))]
  InvalidPayload(Vec<FieldError>),
  #[error("Tipo de ticket desconocido: {0}")]
  UnknownTicketType(String),
  #[error("Dirección inválida: {0}")]
  InvalidAddress(String),
  #[error("Error de serialización: {0}")]
  SerializationError(String),
}

impl From<serde_json::Error> for DomainError {
  fn from(e: serde_json::Error) -> Self {
    Self::SerializationError(e.to_string())
  }
}
