//! Detalle de los tickets de habilitar / deshabilitar clúster.
use crate::address::{EndpointAddress, ZoneId};
use crate::errors::FieldError;
use crate::ticket::TicketDetail;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_force() -> bool {
  true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClusterSwitchDetail {
  pub cluster_id: i64,
  /// Direcciones `ip:port` de los proxies del clúster.
  #[validate(length(min = 1, message = "debe contener al menos un proxy"))]
  pub proxy_addresses: Vec<String>,
  #[serde(default)]
  pub bk_cloud_id: i64,
  #[serde(default = "default_force")]
  pub force: bool,
}

impl ClusterSwitchDetail {
  pub fn zone(&self) -> ZoneId {
    ZoneId(self.bk_cloud_id)
  }

  /// Direcciones ya parseadas. Sólo falla si el detalle no pasó por
  /// `check`.
  pub fn endpoints(&self) -> Result<Vec<EndpointAddress>, crate::DomainError> {
    self.proxy_addresses
        .iter()
        .map(|a| EndpointAddress::parse(a, self.zone()))
        .collect()
  }
}

impl TicketDetail for ClusterSwitchDetail {
  fn check(&self, path: &str) -> Vec<FieldError> {
    self.proxy_addresses
        .iter()
        .enumerate()
        .filter_map(|(i, a)| {
          EndpointAddress::parse(a, self.zone()).err()
                                                .map(|e| FieldError::new(format!("{}.proxy_addresses[{}]", path, i), e.to_string()))
        })
        .collect()
  }
}
