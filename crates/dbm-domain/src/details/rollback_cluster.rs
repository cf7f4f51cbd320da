//! Detalle del ticket de recuperación a un clúster destino
//! (`MYSQL_ROLLBACK_CLUSTER`).
use crate::address::{EndpointAddress, ZoneId};
use crate::errors::FieldError;
use crate::identifier::{identifier_problem, MAX_IDENTIFIER_LEN};
use crate::ticket::TicketDetail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupSource {
  Remote,
  Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RollbackType {
  RemoteAndTime,
  RemoteAndBackupid,
  LocalAndTime,
  LocalAndBackupid,
}

impl RollbackType {
  pub fn needs_time(&self) -> bool {
    matches!(self, RollbackType::RemoteAndTime | RollbackType::LocalAndTime)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RollbackClusterDetail {
  pub cluster_id: i64,
  pub rollback_cluster_id: i64,
  /// Instancia del clúster destino que recibe los datos.
  #[validate(length(min = 1, message = "no puede estar vacío"))]
  pub rollback_ip: String,
  #[validate(range(min = 1, message = "debe ser mayor que 0"))]
  pub rollback_port: u16,
  #[serde(default)]
  pub bk_cloud_id: i64,
  pub rollback_time: Option<DateTime<Utc>>,
  pub backupinfo: Option<JsonValue>,
  pub backup_source: BackupSource,
  pub rollback_type: RollbackType,
  #[validate(length(min = 1, message = "debe contener al menos una base de datos"))]
  pub databases: Vec<String>,
  #[serde(default)]
  pub tables: Option<Vec<String>>,
  #[serde(default)]
  pub databases_ignore: Option<Vec<String>>,
  #[serde(default)]
  pub tables_ignore: Option<Vec<String>>,
}

impl RollbackClusterDetail {
  pub fn zone(&self) -> ZoneId {
    ZoneId(self.bk_cloud_id)
  }

  /// Bases que se crean en el destino: `databases` menos las ignoradas.
  pub fn effective_databases(&self) -> Vec<String> {
    let ignore = self.databases_ignore.clone().unwrap_or_default();
    self.databases
        .iter()
        .filter(|db| !ignore.contains(db))
        .cloned()
        .collect()
  }
}

impl TicketDetail for RollbackClusterDetail {
  fn check(&self, path: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Err(e) = EndpointAddress::new(self.rollback_ip.clone(), self.rollback_port, self.zone()) {
      errors.push(FieldError::new(format!("{}.rollback_ip", path), e.to_string()));
    }
    if self.rollback_type.needs_time() && self.rollback_time.is_none() {
      errors.push(FieldError::new(format!("{}.rollback_time", path),
                                  format!("obligatorio para {:?}", self.rollback_type)));
    }
    if !self.rollback_type.needs_time() && self.backupinfo.is_none() {
      errors.push(FieldError::new(format!("{}.backupinfo", path),
                                  format!("obligatorio para {:?}", self.rollback_type)));
    }
    let remote_type = matches!(self.rollback_type, RollbackType::RemoteAndTime | RollbackType::RemoteAndBackupid);
    if remote_type != (self.backup_source == BackupSource::Remote) {
      errors.push(FieldError::new(format!("{}.backup_source", path),
                                  format!("{:?} no es compatible con {:?}", self.backup_source, self.rollback_type)));
    }
    let lists = [("databases", Some(&self.databases)),
                 ("tables", self.tables.as_ref()),
                 ("databases_ignore", self.databases_ignore.as_ref()),
                 ("tables_ignore", self.tables_ignore.as_ref())];
    for (field, names) in lists {
      for (i, name) in names.into_iter().flatten().enumerate() {
        if let Some(problem) = identifier_problem(name, MAX_IDENTIFIER_LEN) {
          errors.push(FieldError::new(format!("{}.{}[{}]", path, field, i), problem));
        }
      }
    }
    if self.effective_databases().is_empty() {
      errors.push(FieldError::new(format!("{}.databases_ignore", path), "ignora todas las bases de datos"));
    }
    errors
  }
}
