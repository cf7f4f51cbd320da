// address.rs
//! Direcciones de instancias de base de datos alcanzables por el DRS.
use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separador fijo entre host y puerto en el protocolo del DRS.
pub const IP_PORT_DIVIDER: char = ':';

/// Identificador de zona de red / nube (`bk_cloud_id`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub i64);

impl fmt::Display for ZoneId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Una instancia alcanzable: `host:port` dentro de una zona.
///
/// Se construye siempre a partir de los parámetros de la ejecución y nunca
/// se persiste más allá de ella.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointAddress {
  pub host: String,
  pub port: u16,
  pub zone: ZoneId,
}

impl EndpointAddress {
  /// Crea una dirección validando host no vacío y puerto distinto de cero.
  pub fn new(host: impl Into<String>, port: u16, zone: ZoneId) -> Result<Self, DomainError> {
    let host = host.into();
    let trimmed = host.trim();
    if trimmed.is_empty() {
      return Err(DomainError::InvalidAddress("host vacío".into()));
    }
    if trimmed.contains(IP_PORT_DIVIDER) {
      return Err(DomainError::InvalidAddress(format!("host con separador: {}", trimmed)));
    }
    if port == 0 {
      return Err(DomainError::InvalidAddress(format!("puerto 0 para {}", trimmed)));
    }
    Ok(Self { host: trimmed.to_string(), port, zone })
  }

  /// Parsea `host:port`. El separador se busca desde la derecha.
  pub fn parse(s: &str, zone: ZoneId) -> Result<Self, DomainError> {
    let (host, port) = s.trim()
                        .rsplit_once(IP_PORT_DIVIDER)
                        .ok_or_else(|| DomainError::InvalidAddress(format!("falta '{}' en {}", IP_PORT_DIVIDER, s)))?;
    let port: u16 = port.parse()
                        .map_err(|_| DomainError::InvalidAddress(format!("puerto inválido en {}", s)))?;
    Self::new(host, port, zone)
  }

  /// Forma de cable usada por el DRS (`host:port`).
  pub fn addr(&self) -> String {
    format!("{}{}{}", self.host, IP_PORT_DIVIDER, self.port)
  }
}

impl fmt::Display for EndpointAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}{}", self.host, IP_PORT_DIVIDER, self.port)
  }
}
