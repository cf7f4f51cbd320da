use crate::errors::WorkflowError;
use crate::step::{Step, StepContext, StepOutput, StepResult, TransData};
use async_trait::async_trait;
use dbm_domain::{EndpointAddress, ZoneId};
use drs_client::CommandBatch;
use futures::future::join_all;
use indexmap::IndexMap;

/// Paso genérico: ejecuta un lote fijo de comandos en un conjunto de
/// direcciones.
///
/// Las direcciones se agrupan por zona y cada zona se llama en paralelo;
/// todas las llamadas terminan antes de mirar los resultados. Cualquier
/// dirección fallida hace fallar el paso y cada fallo queda en el log.
pub struct ExecuteCommandsStep {
  name: String,
  node_name: String,
  addresses: Vec<EndpointAddress>,
  batch: CommandBatch,
}

impl ExecuteCommandsStep {
  pub fn new(name: impl Into<String>,
             node_name: impl Into<String>,
             addresses: Vec<EndpointAddress>,
             batch: CommandBatch)
             -> Self {
    Self { name: name.into(), node_name: node_name.into(), addresses, batch }
  }

  fn by_zone(&self) -> IndexMap<ZoneId, Vec<EndpointAddress>> {
    let mut zones: IndexMap<ZoneId, Vec<EndpointAddress>> = IndexMap::new();
    for addr in &self.addresses {
      zones.entry(addr.zone).or_default().push(addr.clone());
    }
    zones
  }
}

#[async_trait]
impl Step for ExecuteCommandsStep {
  fn name(&self) -> &str {
    &self.name
  }

  fn node_name(&self) -> &str {
    &self.node_name
  }

  async fn execute(&self, ctx: &StepContext, trans_data: TransData) -> StepResult {
    if self.addresses.is_empty() {
      return Err(WorkflowError::ContractViolation(format!("el paso {} no tiene direcciones", self.name)));
    }

    let zones = self.by_zone();
    let calls = zones.iter()
                     .map(|(zone, addrs)| ctx.executor().execute(addrs, &self.batch, *zone));
    let outcomes = join_all(calls).await;

    let mut failed = 0usize;
    for outcome in outcomes {
      for r in outcome? {
        if !r.is_success() {
          failed += 1;
          ctx.log_error(&self.node_name, format!("{} falló: {}", r.address, r.error_msg));
        }
      }
    }
    if failed > 0 {
      return Ok(StepOutput::failed(trans_data));
    }
    ctx.log_info(&self.node_name,
                 format!("{} comandos ejecutados en {} direcciones", self.batch.cmds.len(), self.addresses.len()));
    Ok(StepOutput::succeeded(trans_data))
  }
}
