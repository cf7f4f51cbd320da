use thiserror::Error;

/// Errores del cliente DRS.
///
/// Sólo `EmptyAddresses` y `ZoneMismatch` llegan al llamador de `execute`:
/// son violaciones de contrato. Los fallos de transporte se convierten en
/// un `error_msg` por dirección.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrsError {
  #[error("la lista de direcciones está vacía")]
  EmptyAddresses,
  #[error("la dirección {address} pertenece a la zona {actual}, se esperaba {expected}")]
  ZoneMismatch { address: String, expected: i64, actual: i64 },
  #[error("error de transporte DRS: {0}")]
  Transport(String),
  #[error("respuesta DRS ilegible: {0}")]
  Decode(String),
}
