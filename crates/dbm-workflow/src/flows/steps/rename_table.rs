// Archivo: rename_table.rs
// Propósito: mover las tablas de cada base a su base de stage con
// `RENAME TABLE` y marcarlas como procesadas.
use crate::errors::WorkflowError;
use crate::step::{Step, StepContext, StepOutput, StepResult, TransData};
use async_trait::async_trait;
use dbm_domain::{quote_ident, EndpointAddress, ZoneId};
use drs_client::CommandBatch;
use serde::{Deserialize, Serialize};
use std::slice;

pub const RENAME_TABLE_CODE: &str = "truncate_data_rename_table";

/// Entradas propias del paso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTableKwargs {
  pub node_name: String,
  pub bk_cloud_id: i64,
}

/// Datos globales de la ejecución que usa el paso: la instancia destino.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTableGlobalData {
  pub ip: String,
  pub port: u16,
}

/// Renombra las tablas de cada base hacia su base de stage.
///
/// Procesa las bases en el orden de `targets`, una llamada remota por base
/// contra una única dirección y con `force = true`. Las tablas se marcan
/// como procesadas antes de enviar el lote: "procesada" significa
/// "intentada". El primer fallo detiene el paso y las bases siguientes no
/// se intentan.
pub struct RenameTableStep {
  name: String,
  kwargs: RenameTableKwargs,
  global: RenameTableGlobalData,
}

impl RenameTableStep {
  pub fn new(kwargs: RenameTableKwargs, global: RenameTableGlobalData) -> Self {
    Self { name: RENAME_TABLE_CODE.to_string(), kwargs, global }
  }

  /// Distingue el paso cuando un ticket trae varios clústeres:
  /// `truncate_data_rename_table:{cluster_id}`.
  pub fn for_cluster(mut self, cluster_id: i64) -> Self {
    self.name = format!("{}:{}", RENAME_TABLE_CODE, cluster_id);
    self
  }

  fn address(&self) -> Result<EndpointAddress, WorkflowError> {
    EndpointAddress::new(self.global.ip.clone(), self.global.port, ZoneId(self.kwargs.bk_cloud_id))
      .map_err(|e| WorkflowError::ContractViolation(format!("dirección del paso {}: {}", self.name, e)))
  }
}

#[async_trait]
impl Step for RenameTableStep {
  fn name(&self) -> &str {
    &self.name
  }

  fn node_name(&self) -> &str {
    &self.kwargs.node_name
  }

  async fn execute(&self, ctx: &StepContext, mut trans_data: TransData) -> StepResult {
    let address = self.address()?;
    let node = self.node_name();
    let dbs: Vec<String> = trans_data.targets.keys().cloned().collect();

    for db in dbs {
      let new_db = trans_data.old_new_map
                             .get(&db)
                             .cloned()
                             .ok_or_else(|| WorkflowError::ContractViolation(format!("no hay base de stage para {}", db)))?;
      let tables: Vec<String> = trans_data.targets
                                          .get(&db)
                                          .map(|t| t.keys().cloned().collect())
                                          .unwrap_or_default();
      let cmds = tables.iter()
                       .map(|t| {
                         format!("RENAME TABLE {}.{} TO {}.{}",
                                 quote_ident(&db), quote_ident(t), quote_ident(&new_db), quote_ident(t))
                       })
                       .collect();
      for table in &tables {
        trans_data.mark_processed(&db, table);
      }

      let results = ctx.executor()
                       .execute(slice::from_ref(&address), &CommandBatch::new(cmds, true), address.zone)
                       .await?;
      if let Some(failure) = results.iter().find(|r| !r.is_success()) {
        ctx.log_error(node,
                      format!("rename de {} a {} falló en {}: {}", db, new_db, failure.address, failure.error_msg));
        return Ok(StepOutput::failed(trans_data));
      }
      ctx.log_info(node, format!("{} tablas movidas de {} a {}", tables.len(), db, new_db));
    }

    Ok(StepOutput::succeeded(trans_data))
  }
}
