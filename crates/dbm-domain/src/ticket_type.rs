use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tipos de ticket que pueden traducirse a un flujo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
  MysqlHaTruncateData,
  MysqlHaEnable,
  MysqlHaDisable,
  MysqlRollbackCluster,
}

impl TicketType {
  pub const ALL: [TicketType; 4] = [TicketType::MysqlHaTruncateData,
                                    TicketType::MysqlHaEnable,
                                    TicketType::MysqlHaDisable,
                                    TicketType::MysqlRollbackCluster];

  pub fn as_str(&self) -> &'static str {
    match self {
      TicketType::MysqlHaTruncateData => "MYSQL_HA_TRUNCATE_DATA",
      TicketType::MysqlHaEnable => "MYSQL_HA_ENABLE",
      TicketType::MysqlHaDisable => "MYSQL_HA_DISABLE",
      TicketType::MysqlRollbackCluster => "MYSQL_ROLLBACK_CLUSTER",
    }
  }
}

impl fmt::Display for TicketType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for TicketType {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_uppercase();
    TicketType::ALL.iter()
                   .copied()
                   .find(|t| t.as_str() == wanted)
                   .ok_or_else(|| DomainError::UnknownTicketType(s.to_string()))
  }
}

/// Fase del ciclo de vida del clúster a la que aplica un tipo de ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterPhase {
  Online,
  Offline,
}

impl fmt::Display for ClusterPhase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ClusterPhase::Online => "online",
      ClusterPhase::Offline => "offline",
    };
    write!(f, "{}", s)
  }
}

/// Etiqueta de permiso requerida para emitir el ticket. Se transporta con
/// el registro; la comprobación la hace la capa de autorización.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IamAction {
  MysqlTruncateData,
  MysqlEnableDisable,
  MysqlRollbackCluster,
}

impl fmt::Display for IamAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      IamAction::MysqlTruncateData => "mysql_truncate_data",
      IamAction::MysqlEnableDisable => "mysql_enable_disable",
      IamAction::MysqlRollbackCluster => "mysql_rollback_cluster",
    };
    write!(f, "{}", s)
  }
}
