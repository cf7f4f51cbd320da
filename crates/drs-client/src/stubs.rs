// Archivo: stubs.rs
// Propósito: ejecutor en memoria para pruebas y wiring rápido.
//
// `ScriptedExecutor` registra cada petición (para contar llamadas) y
// responde éxito salvo que una regla configurada coincida con la dirección
// y/o con alguno de los comandos del lote. No hay red.
use crate::client::RemoteExecutor;
use crate::errors::DrsError;
use crate::types::{DrsRequest, DrsResult};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct FailureRule {
  address: Option<String>,
  cmd_contains: Option<String>,
  error_msg: String,
}

impl FailureRule {
  fn matches(&self, address: &str, cmds: &[String]) -> bool {
    let addr_ok = self.address.as_deref().map_or(true, |a| a == address);
    let cmd_ok = self.cmd_contains
                     .as_deref()
                     .map_or(true, |pat| cmds.iter().any(|c| c.contains(pat)));
    addr_ok && cmd_ok
  }
}

/// Doble de prueba del DRS.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
  calls: Mutex<Vec<DrsRequest>>,
  rules: Mutex<Vec<FailureRule>>,
  transport_error: Mutex<Option<String>>,
}

impl ScriptedExecutor {
  pub fn new() -> Self {
    Self::default()
  }

  /// Toda llamada que incluya `address` devuelve `error_msg` para ella.
  pub fn fail_on_address(&self, address: &str, error_msg: &str) {
    self.push_rule(FailureRule { address: Some(address.to_string()),
                                 cmd_contains: None,
                                 error_msg: error_msg.to_string() });
  }

  /// Todo lote con un comando que contenga `pattern` falla en todas sus
  /// direcciones.
  pub fn fail_on_command(&self, pattern: &str, error_msg: &str) {
    self.push_rule(FailureRule { address: None,
                                 cmd_contains: Some(pattern.to_string()),
                                 error_msg: error_msg.to_string() });
  }

  /// Simula la caída del servicio: `rpc` devuelve error de transporte.
  pub fn fail_transport(&self, msg: &str) {
    *self.transport_error.lock().unwrap_or_else(|e| e.into_inner()) = Some(msg.to_string());
  }

  /// Copia de las peticiones recibidas, en orden.
  pub fn calls(&self) -> Vec<DrsRequest> {
    self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
  }

  /// Todos los comandos enviados, aplanados en orden de llegada.
  pub fn sent_commands(&self) -> Vec<String> {
    self.calls().into_iter().flat_map(|c| c.cmds).collect()
  }

  fn push_rule(&self, rule: FailureRule) {
    self.rules.lock().unwrap_or_else(|e| e.into_inner()).push(rule);
  }
}

#[async_trait]
impl RemoteExecutor for ScriptedExecutor {
  async fn rpc(&self, request: &DrsRequest) -> Result<Vec<DrsResult>, DrsError> {
    self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(request.clone());

    if let Some(msg) = self.transport_error.lock().unwrap_or_else(|e| e.into_inner()).clone() {
      return Err(DrsError::Transport(msg));
    }

    let rules = self.rules.lock().unwrap_or_else(|e| e.into_inner()).clone();
    Ok(request.addresses
              .iter()
              .map(|addr| match rules.iter().find(|r| r.matches(addr, &request.cmds)) {
                Some(rule) => DrsResult::failure(addr.clone(), rule.error_msg.clone()),
                None => DrsResult::success(addr.clone()),
              })
              .collect())
  }
}
