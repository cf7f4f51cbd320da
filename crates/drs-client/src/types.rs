// Tipos de cable del DRS.
use dbm_domain::ZoneId;
use serde::{Deserialize, Serialize};

/// Lote ordenado de comandos enviado a una o varias direcciones.
///
/// `force` es una indicación para el lado remoto (continuar tras una
/// sentencia fallida); el cliente no la aplica localmente.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBatch {
  pub cmds: Vec<String>,
  pub force: bool,
}

impl CommandBatch {
  pub fn new(cmds: Vec<String>, force: bool) -> Self {
    Self { cmds, force }
  }

  pub fn is_empty(&self) -> bool {
    self.cmds.is_empty()
  }
}

/// Cuerpo de la petición `mysql/rpc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrsRequest {
  pub addresses: Vec<String>,
  pub cmds: Vec<String>,
  pub force: bool,
  pub bk_cloud_id: i64,
}

impl DrsRequest {
  pub fn new(addresses: Vec<String>, batch: &CommandBatch, zone: ZoneId) -> Self {
    Self { addresses, cmds: batch.cmds.clone(), force: batch.force, bk_cloud_id: zone.0 }
  }
}

/// Resultado por dirección. `error_msg` vacío significa éxito.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrsResult {
  #[serde(default)]
  pub address: String,
  #[serde(default)]
  pub error_msg: String,
}

impl DrsResult {
  pub fn success(address: impl Into<String>) -> Self {
    Self { address: address.into(), error_msg: String::new() }
  }

  pub fn failure(address: impl Into<String>, error_msg: impl Into<String>) -> Self {
    Self { address: address.into(), error_msg: error_msg.into() }
  }

  pub fn is_success(&self) -> bool {
    self.error_msg.is_empty()
  }
}

/// Sobre de respuesta del servicio.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DrsEnvelope {
  #[serde(default)]
  pub code: i64,
  #[serde(default)]
  pub msg: String,
  #[serde(default)]
  pub data: Vec<DrsResult>,
}
