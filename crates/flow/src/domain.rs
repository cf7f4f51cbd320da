// Archivo: domain.rs
// Propósito: tipos de una ejecución (run) y de su rastro de logs.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

/// Identificador opaco y único de una ejecución.
///
/// Formato: fecha `YYYYMMDD` seguida de 24 caracteres hex de un UUID v4.
/// Se genera antes de empezar y no cambia después.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootId(String);

impl RootId {
  pub fn generate() -> Self {
    let hex = Uuid::new_v4().simple().to_string();
    RootId(format!("{}{}", Utc::now().format("%Y%m%d"), &hex[..24]))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Etiqueta corta para nombres derivados: `YYYYMMDD_` + 6 hex.
  pub fn short_tag(&self) -> String {
    let (date, rest) = self.0.split_at(self.0.len().min(8));
    let suffix: String = rest.chars().take(6).collect();
    format!("{}_{}", date, suffix)
  }
}

impl From<&str> for RootId {
  fn from(s: &str) -> Self {
    RootId(s.to_string())
  }
}

impl fmt::Display for RootId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Estado de una ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
  Created,
  Running,
  Succeeded,
  Failed,
  /// Cancelada antes de empezar el siguiente paso.
  Revoked,
}

impl RunStatus {
  pub fn is_terminal(&self) -> bool {
    matches!(self, RunStatus::Succeeded | RunStatus::Failed | RunStatus::Revoked)
  }
}

impl fmt::Display for RunStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      RunStatus::Created => "created",
      RunStatus::Running => "running",
      RunStatus::Succeeded => "succeeded",
      RunStatus::Failed => "failed",
      RunStatus::Revoked => "revoked",
    };
    f.write_str(s)
  }
}

/// Metadatos de una ejecución.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
  pub root_id: RootId,
  pub ticket_type: String,
  pub flow_name: String,
  pub created_by: String,
  pub bk_biz_id: i64,
  pub status: RunStatus,
  /// Paso en el que se detuvo la ejecución, si falló.
  pub failed_step: Option<String>,
  /// Payload original del ticket.
  pub payload: JsonValue,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl RunMeta {
  pub fn new(root_id: RootId,
             ticket_type: impl Into<String>,
             flow_name: impl Into<String>,
             created_by: impl Into<String>,
             bk_biz_id: i64,
             payload: JsonValue)
             -> Self {
    let now = Utc::now();
    RunMeta { root_id,
              ticket_type: ticket_type.into(),
              flow_name: flow_name.into(),
              created_by: created_by.into(),
              bk_biz_id,
              status: RunStatus::Created,
              failed_step: None,
              payload,
              created_at: now,
              updated_at: now }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Info,
  Error,
}

/// Una línea del rastro de logs de una ejecución.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLog {
  pub root_id: RootId,
  pub step_name: String,
  pub node_name: String,
  pub level: LogLevel,
  pub message: String,
  pub created_at: DateTime<Utc>,
}
