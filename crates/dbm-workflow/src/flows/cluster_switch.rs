// Archivo: cluster_switch.rs
// Propósito: flujos de habilitar y deshabilitar un clúster conmutando
// `offline_mode` en todos sus proxies.
use crate::errors::WorkflowError;
use crate::factory::FlowParamBuilder;
use crate::flows::flow::FlowBuilder;
use crate::flows::steps::ExecuteCommandsStep;
use dbm_domain::details::ClusterSwitchDetail;
use dbm_domain::Ticket;
use drs_client::CommandBatch;

/// `offline = true` deshabilita el clúster; `false` lo habilita.
pub struct ClusterSwitchFlow {
  offline: bool,
}

impl ClusterSwitchFlow {
  pub fn enable() -> Self {
    Self { offline: false }
  }

  pub fn disable() -> Self {
    Self { offline: true }
  }

  fn command(&self) -> String {
    format!("SET GLOBAL offline_mode = {}", if self.offline { "ON" } else { "OFF" })
  }
}

impl FlowParamBuilder for ClusterSwitchFlow {
  type Detail = ClusterSwitchDetail;

  fn flow_name(&self) -> &str {
    if self.offline {
      "cluster_disable"
    } else {
      "cluster_enable"
    }
  }

  fn build(&self, ticket: &Ticket<ClusterSwitchDetail>, mut flow: FlowBuilder) -> Result<FlowBuilder, WorkflowError> {
    for info in &ticket.infos {
      let batch = CommandBatch::new(vec![self.command()], info.force);
      flow = flow.step(ExecuteCommandsStep::new(format!("switch_offline_mode:{}", info.cluster_id),
                                                format!("cluster {} proxies", info.cluster_id),
                                                info.endpoints()?,
                                                batch));
    }
    Ok(flow)
  }
}
