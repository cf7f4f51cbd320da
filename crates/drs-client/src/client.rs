// Archivo: client.rs
// Propósito: contrato del cliente de ejecución remota. Las implementaciones
// sólo proveen el transporte (`rpc`); `execute` concentra las garantías
// (no-op con lote vacío, un resultado por dirección y en el mismo orden,
// fallos de transporte como mensaje por dirección).
use crate::errors::DrsError;
use crate::types::{CommandBatch, DrsRequest, DrsResult};
use async_trait::async_trait;
use dbm_domain::{EndpointAddress, ZoneId};
use std::collections::{HashMap, VecDeque};

#[async_trait]
pub trait RemoteExecutor: Send + Sync {
  /// Envía la petición tal cual al servicio remoto. Los errores de
  /// transporte se devuelven como `Err`; `execute` los reparte entre las
  /// direcciones.
  async fn rpc(&self, request: &DrsRequest) -> Result<Vec<DrsResult>, DrsError>;

  /// Ejecuta `batch` en todas las `addresses` de la zona `zone`.
  ///
  /// Devuelve exactamente un `DrsResult` por dirección, en el orden de
  /// `addresses`. Sólo falla por violaciones de contrato (lista vacía o
  /// dirección de otra zona).
  async fn execute(&self,
                   addresses: &[EndpointAddress],
                   batch: &CommandBatch,
                   zone: ZoneId)
                   -> Result<Vec<DrsResult>, DrsError> {
    if addresses.is_empty() {
      return Err(DrsError::EmptyAddresses);
    }
    if let Some(other) = addresses.iter().find(|a| a.zone != zone) {
      return Err(DrsError::ZoneMismatch { address: other.addr(), expected: zone.0, actual: other.zone.0 });
    }
    let addrs: Vec<String> = addresses.iter().map(|a| a.addr()).collect();
    if batch.is_empty() {
      return Ok(addrs.into_iter().map(DrsResult::success).collect());
    }

    let request = DrsRequest::new(addrs.clone(), batch, zone);
    match self.rpc(&request).await {
      Ok(results) => Ok(align_results(&addrs, results)),
      Err(e) => {
        tracing::warn!(addresses = ?addrs, error = %e, "DRS rpc failed");
        let msg = e.to_string();
        Ok(addrs.iter().map(|a| DrsResult::failure(a.clone(), msg.clone())).collect())
      }
    }
  }
}

/// Ordena `results` según `addresses`.
///
/// Si la respuesta ya es paralela a la petición se usa por posición; si no,
/// se empareja por dirección y las que falten reciben un error.
pub fn align_results(addresses: &[String], results: Vec<DrsResult>) -> Vec<DrsResult> {
  let positional = results.len() == addresses.len()
                   && results.iter()
                             .zip(addresses)
                             .all(|(r, a)| r.address.is_empty() || &r.address == a);
  if positional {
    return results.into_iter()
                  .zip(addresses)
                  .map(|(mut r, a)| {
                    r.address = a.clone();
                    r
                  })
                  .collect();
  }

  let mut by_address: HashMap<String, VecDeque<DrsResult>> = HashMap::new();
  for r in results {
    by_address.entry(r.address.clone()).or_default().push_back(r);
  }
  addresses.iter()
           .map(|a| {
             by_address.get_mut(a)
                       .and_then(|q| q.pop_front())
                       .unwrap_or_else(|| DrsResult::failure(a.clone(), format!("sin resultado del DRS para {}", a)))
           })
           .collect()
}
