// Archivo: errors.rs
// Propósito: definir los errores del registro de ejecuciones y el alias
// Result<T> usado por las APIs del crate.
use thiserror::Error;
/// Errores comunes del dominio de ejecuciones.
///
/// - `NotFound`: ejecución no encontrada.
/// - `Conflict`: id duplicado o transición de estado no permitida.
/// - `Storage`: error al acceder al almacenamiento.
#[derive(Error, Debug)]
pub enum FlowError {
  /// Entidad no encontrada (por ejemplo, root_id desconocido).
  #[error("No encontrado: {0}")]
  NotFound(String),
  /// La ejecución ya existe o ya está en estado terminal.
  #[error("Conflicto: {0}")]
  Conflict(String),
  /// Error genérico de almacenamiento (BD, mutex envenenado, etc.).
  #[error("Error de almacenamiento: {0}")]
  Storage(String),
}
/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, FlowError>;
