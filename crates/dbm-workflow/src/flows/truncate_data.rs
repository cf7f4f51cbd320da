// Archivo: truncate_data.rs
// Propósito: flujo de clear de datos. Por cada clúster del ticket prepara
// el contexto, crea las bases de stage y mueve las tablas a ellas.
use crate::errors::WorkflowError;
use crate::factory::FlowParamBuilder;
use crate::flows::flow::FlowBuilder;
use crate::flows::steps::{CreateStageDbStep, PrepareStageDbStep, RenameTableGlobalData, RenameTableKwargs, RenameTableStep};
use dbm_domain::details::TruncateDataDetail;
use dbm_domain::{EndpointAddress, Ticket};

pub struct TruncateDataFlow;

impl FlowParamBuilder for TruncateDataFlow {
  type Detail = TruncateDataDetail;

  fn flow_name(&self) -> &str {
    "truncate_data"
  }

  fn build(&self, ticket: &Ticket<TruncateDataDetail>, mut flow: FlowBuilder) -> Result<FlowBuilder, WorkflowError> {
    // Los destinos comparten un único contexto, así que se procesan uno
    // detrás de otro: cada preparación sustituye al anterior.
    for info in &ticket.infos {
      let address = EndpointAddress::new(info.ip.clone(), info.port, info.zone())?;
      let node = format!("cluster {} ({})", info.cluster_id, address);
      let prepare = format!("prepare_stage_db:{}", info.cluster_id);
      let create = format!("create_stage_db:{}", info.cluster_id);
      flow = flow.step(PrepareStageDbStep::new(prepare, node.clone(), info.targets.clone()))
                 .step(CreateStageDbStep::new(create, node.clone(), address.clone()))
                 .step(RenameTableStep::new(RenameTableKwargs { node_name: node, bk_cloud_id: info.bk_cloud_id },
                                            RenameTableGlobalData { ip: info.ip.clone(), port: info.port })
                         .for_cluster(info.cluster_id));
    }
    Ok(flow)
  }
}
