// Archivo: rollback_cluster.rs
// Propósito: flujo de construcción a un punto en el tiempo. Comprueba que la
// instancia destino responde y crea en ella las bases a recuperar.
use crate::errors::WorkflowError;
use crate::factory::FlowParamBuilder;
use crate::flows::flow::FlowBuilder;
use crate::flows::steps::ExecuteCommandsStep;
use dbm_domain::details::RollbackClusterDetail;
use dbm_domain::{quote_ident, EndpointAddress, Ticket};
use drs_client::CommandBatch;

pub struct RollbackClusterFlow;

impl FlowParamBuilder for RollbackClusterFlow {
  type Detail = RollbackClusterDetail;

  fn flow_name(&self) -> &str {
    "rollback_cluster"
  }

  fn build(&self, ticket: &Ticket<RollbackClusterDetail>, mut flow: FlowBuilder) -> Result<FlowBuilder, WorkflowError> {
    for info in &ticket.infos {
      let target = EndpointAddress::new(info.rollback_ip.clone(), info.rollback_port, info.zone())?;
      let node = format!("rollback {} -> {} ({})", info.cluster_id, info.rollback_cluster_id, target);
      let create = info.effective_databases()
                       .iter()
                       .map(|db| format!("CREATE DATABASE IF NOT EXISTS {}", quote_ident(db)))
                       .collect();
      flow = flow.step(ExecuteCommandsStep::new(format!("precheck_target:{}", info.cluster_id),
                                                node.clone(),
                                                vec![target.clone()],
                                                CommandBatch::new(vec!["SELECT 1".to_string()], false)))
                 .step(ExecuteCommandsStep::new(format!("create_target_databases:{}", info.cluster_id),
                                                node,
                                                vec![target],
                                                CommandBatch::new(create, false)));
    }
    Ok(flow)
  }
}
