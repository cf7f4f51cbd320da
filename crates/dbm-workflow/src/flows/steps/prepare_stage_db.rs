use crate::step::{Step, StepContext, StepOutput, StepResult, TransData};
use async_trait::async_trait;
use dbm_domain::details::TruncateTarget;
use flow::RootId;
use indexmap::IndexMap;

pub const STAGE_DB_PREFIX: &str = "stage_truncate";
pub const MAX_DB_NAME_LEN: usize = dbm_domain::MAX_IDENTIFIER_LEN;

/// Nombre de la base de stage que recibe las tablas de `db` en la ejecución
/// `root_id`.
pub fn stage_db_name(root_id: &RootId, db: &str) -> String {
  format!("{}_{}_{}", STAGE_DB_PREFIX, root_id.short_tag(), db)
}

/// Paso local: carga en el contexto las bases y tablas de un destino y el
/// mapa base original -> base de stage. Sustituye lo que hubiera.
pub struct PrepareStageDbStep {
  name: String,
  node_name: String,
  targets: Vec<TruncateTarget>,
}

impl PrepareStageDbStep {
  pub fn new(name: impl Into<String>, node_name: impl Into<String>, targets: Vec<TruncateTarget>) -> Self {
    Self { name: name.into(), node_name: node_name.into(), targets }
  }
}

#[async_trait]
impl Step for PrepareStageDbStep {
  fn name(&self) -> &str {
    &self.name
  }

  fn node_name(&self) -> &str {
    &self.node_name
  }

  async fn execute(&self, ctx: &StepContext, mut trans_data: TransData) -> StepResult {
    let mut old_new_map = IndexMap::new();
    for target in &self.targets {
      let stage = stage_db_name(&ctx.root_id, &target.db_name);
      if stage.len() > MAX_DB_NAME_LEN {
        ctx.log_error(&self.node_name,
                      format!("el nombre de stage {} supera {} caracteres", stage, MAX_DB_NAME_LEN));
        return Ok(StepOutput::failed(trans_data));
      }
      old_new_map.insert(target.db_name.clone(), stage);
    }

    trans_data.load_targets(&self.targets);
    trans_data.old_new_map = old_new_map;
    ctx.log_info(&self.node_name,
                 format!("{} bases preparadas: {:?}", trans_data.old_new_map.len(), trans_data.old_new_map));
    Ok(StepOutput::succeeded(trans_data))
  }
}
