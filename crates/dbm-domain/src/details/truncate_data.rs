//! Detalle del ticket de clear de datos (`MYSQL_HA_TRUNCATE_DATA`).
use crate::address::{EndpointAddress, ZoneId};
use crate::errors::FieldError;
use crate::identifier::{identifier_problem, MAX_IDENTIFIER_LEN, MAX_TRUNCATE_DB_NAME_LEN};
use crate::ticket::{collect_validation_errors, TicketDetail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

/// Una base de datos y las tablas que se mueven a su base de stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TruncateTarget {
  #[validate(length(min = 1, message = "no puede estar vacío"))]
  pub db_name: String,
  /// Puede ir vacío: la base se procesa igualmente (lote sin comandos).
  #[serde(default)]
  pub table_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TruncateDataDetail {
  pub cluster_id: i64,
  #[validate(length(min = 1, message = "no puede estar vacío"))]
  pub ip: String,
  #[validate(range(min = 1, message = "debe ser mayor que 0"))]
  pub port: u16,
  #[serde(default)]
  pub bk_cloud_id: i64,
  #[validate(length(min = 1, message = "debe contener al menos una base de datos"))]
  pub targets: Vec<TruncateTarget>,
}

impl TruncateDataDetail {
  pub fn zone(&self) -> ZoneId {
    ZoneId(self.bk_cloud_id)
  }
}

impl TicketDetail for TruncateDataDetail {
  fn check(&self, path: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Err(e) = EndpointAddress::new(self.ip.clone(), self.port, self.zone()) {
      errors.push(FieldError::new(format!("{}.ip", path), e.to_string()));
    }
    let mut seen = HashSet::new();
    for (i, target) in self.targets.iter().enumerate() {
      let target_path = format!("{}.targets[{}]", path, i);
      if let Err(e) = target.validate() {
        collect_validation_errors(&target_path, &e, &mut errors);
      }
      if !seen.insert(target.db_name.as_str()) {
        errors.push(FieldError::new(format!("{}.db_name", target_path),
                                    format!("base de datos duplicada: {}", target.db_name)));
      }
      if let Some(problem) = identifier_problem(&target.db_name, MAX_TRUNCATE_DB_NAME_LEN).filter(|_| !target.db_name.is_empty()) {
        errors.push(FieldError::new(format!("{}.db_name", target_path), problem));
      }
      for (j, table) in target.table_names.iter().enumerate() {
        if let Some(problem) = identifier_problem(table, MAX_IDENTIFIER_LEN) {
          errors.push(FieldError::new(format!("{}.table_names[{}]", target_path, j), problem));
        }
      }
    }
    errors
  }
}
