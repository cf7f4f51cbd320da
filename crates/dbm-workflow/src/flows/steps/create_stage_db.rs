use crate::step::{Step, StepContext, StepOutput, StepResult, TransData};
use async_trait::async_trait;
use dbm_domain::{quote_ident, EndpointAddress};
use drs_client::CommandBatch;
use std::slice;

/// Crea en la instancia destino todas las bases de stage del contexto.
pub struct CreateStageDbStep {
  name: String,
  node_name: String,
  address: EndpointAddress,
}

impl CreateStageDbStep {
  pub fn new(name: impl Into<String>, node_name: impl Into<String>, address: EndpointAddress) -> Self {
    Self { name: name.into(), node_name: node_name.into(), address }
  }
}

#[async_trait]
impl Step for CreateStageDbStep {
  fn name(&self) -> &str {
    &self.name
  }

  fn node_name(&self) -> &str {
    &self.node_name
  }

  async fn execute(&self, ctx: &StepContext, trans_data: TransData) -> StepResult {
    let cmds: Vec<String> = trans_data.old_new_map
                                      .values()
                                      .map(|stage| format!("CREATE DATABASE IF NOT EXISTS {}", quote_ident(stage)))
                                      .collect();
    let batch = CommandBatch::new(cmds, false);
    let results = ctx.executor()
                     .execute(slice::from_ref(&self.address), &batch, self.address.zone)
                     .await?;

    for r in results.iter().filter(|r| !r.is_success()) {
      ctx.log_error(&self.node_name,
                    format!("no se pudieron crear las bases de stage en {}: {}", r.address, r.error_msg));
    }
    if results.iter().any(|r| !r.is_success()) {
      return Ok(StepOutput::failed(trans_data));
    }
    ctx.log_info(&self.node_name,
                 format!("{} bases de stage listas en {}", batch.cmds.len(), self.address));
    Ok(StepOutput::succeeded(trans_data))
  }
}
