// Archivo: registry.rs
// Propósito: tabla tipo de ticket -> flujo. Se construye una vez al
// arrancar y después sólo se lee.
use crate::errors::WorkflowError;
use crate::flows::flow::{Flow, FlowBuilder};
use crate::flows::{ClusterSwitchFlow, RollbackClusterFlow, TruncateDataFlow};
use dbm_domain::{ClusterPhase, IamAction, Ticket, TicketDetail, TicketHeader, TicketType};
use flow::RootId;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Traduce un ticket validado en la lista de pasos de su flujo.
///
/// `Detail` es el tipo de cada `infos[i]`; su validación corre antes de
/// llamar a `build`.
pub trait FlowParamBuilder: Send + Sync + 'static {
  type Detail: TicketDetail;

  fn flow_name(&self) -> &str;

  fn build(&self, ticket: &Ticket<Self::Detail>, flow: FlowBuilder) -> Result<FlowBuilder, WorkflowError>;
}

/// Ticket validado y flujo listo para ejecutarse.
pub struct PreparedFlow {
  pub header: TicketHeader,
  pub flow: Flow,
}

// Borra el tipo `Detail` para poder guardar builders distintos en la misma
// tabla.
trait FlowStrategy: Send + Sync {
  fn prepare(&self, ticket_type: TicketType, raw: &JsonValue, root_id: RootId) -> Result<PreparedFlow, WorkflowError>;
}

struct Typed<B>(B);

impl<B: FlowParamBuilder> FlowStrategy for Typed<B> {
  fn prepare(&self, ticket_type: TicketType, raw: &JsonValue, root_id: RootId) -> Result<PreparedFlow, WorkflowError> {
    let ticket = Ticket::<B::Detail>::parse(raw, ticket_type)?;
    let flow = self.0.build(&ticket, FlowBuilder::new(root_id, self.0.flow_name()))?.build();
    Ok(PreparedFlow { header: ticket.header(), flow })
  }
}

/// Entrada del registro.
#[derive(Clone)]
pub struct Binding {
  pub ticket_type: TicketType,
  pub phase: ClusterPhase,
  /// Permiso requerido para emitir el ticket.
  pub iam: IamAction,
  pub display_name: String,
  strategy: Arc<dyn FlowStrategy>,
}

impl Binding {
  /// Valida `raw` contra el tipo de detalle del flujo y construye el flujo.
  pub fn prepare(&self, raw: &JsonValue, root_id: RootId) -> Result<PreparedFlow, WorkflowError> {
    self.strategy.prepare(self.ticket_type, raw, root_id)
  }
}

impl std::fmt::Debug for Binding {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Binding")
     .field("ticket_type", &self.ticket_type)
     .field("phase", &self.phase)
     .field("iam", &self.iam)
     .field("display_name", &self.display_name)
     .finish()
  }
}

#[derive(Default)]
pub struct RegistryBuilder {
  bindings: IndexMap<TicketType, Binding>,
}

impl RegistryBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Asocia `builder` a `ticket_type`. Si ya había una entrada se
  /// sustituye: gana el último registro.
  pub fn register<B: FlowParamBuilder>(&mut self,
                                       ticket_type: TicketType,
                                       phase: ClusterPhase,
                                       iam: IamAction,
                                       display_name: impl Into<String>,
                                       builder: B)
                                       -> &mut Self {
    let binding = Binding { ticket_type,
                            phase,
                            iam,
                            display_name: display_name.into(),
                            strategy: Arc::new(Typed(builder)) };
    if let Some(prev) = self.bindings.insert(ticket_type, binding) {
      tracing::warn!(ticket_type = %ticket_type, previous = %prev.display_name, "ticket type registered twice, last registration wins");
    }
    self
  }

  pub fn build(self) -> TicketRegistry {
    TicketRegistry { bindings: self.bindings }
  }
}

/// Registro inmutable de flujos.
#[derive(Debug)]
pub struct TicketRegistry {
  bindings: IndexMap<TicketType, Binding>,
}

impl TicketRegistry {
  pub fn resolve(&self, ticket_type: TicketType) -> Result<&Binding, WorkflowError> {
    self.bindings
        .get(&ticket_type)
        .ok_or_else(|| WorkflowError::UnregisteredTicketType(ticket_type.to_string()))
  }

  /// Igual que `resolve` partiendo del nombre recibido en la petición.
  pub fn resolve_str(&self, ticket_type: &str) -> Result<&Binding, WorkflowError> {
    let parsed: TicketType = ticket_type.parse()?;
    self.resolve(parsed)
  }

  /// Tipos de ticket aplicables a un clúster en la fase indicada.
  pub fn ticket_types_for_phase(&self, phase: ClusterPhase) -> Vec<TicketType> {
    self.bindings
        .values()
        .filter(|b| b.phase == phase)
        .map(|b| b.ticket_type)
        .collect()
  }

  pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
    self.bindings.values()
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }
}

/// Registra los flujos incluidos en el crate.
pub fn register_builtin_flows(builder: &mut RegistryBuilder) {
  builder.register(TicketType::MysqlHaTruncateData,
                   ClusterPhase::Online,
                   IamAction::MysqlTruncateData,
                   "清档",
                   TruncateDataFlow)
         .register(TicketType::MysqlHaEnable,
                   ClusterPhase::Offline,
                   IamAction::MysqlEnableDisable,
                   "启用集群",
                   ClusterSwitchFlow::enable())
         .register(TicketType::MysqlHaDisable,
                   ClusterPhase::Online,
                   IamAction::MysqlEnableDisable,
                   "禁用集群",
                   ClusterSwitchFlow::disable())
         .register(TicketType::MysqlRollbackCluster,
                   ClusterPhase::Online,
                   IamAction::MysqlRollbackCluster,
                   "定点构造",
                   RollbackClusterFlow);
}

pub fn builtin_registry() -> TicketRegistry {
  let mut builder = RegistryBuilder::new();
  register_builtin_flows(&mut builder);
  builder.build()
}

static REGISTRY: OnceCell<Arc<TicketRegistry>> = OnceCell::new();

/// Instala el registro global del proceso. Sólo puede llamarse una vez.
pub fn init_registry(registry: TicketRegistry) -> Result<Arc<TicketRegistry>, WorkflowError> {
  let registry = Arc::new(registry);
  REGISTRY.set(registry.clone())
          .map_err(|_| WorkflowError::Config("el registro de flujos ya estaba inicializado".into()))?;
  tracing::info!(ticket_types = registry.len(), "flow registry initialized");
  Ok(registry)
}

/// Registro global instalado con `init_registry`.
pub fn registry() -> Result<Arc<TicketRegistry>, WorkflowError> {
  REGISTRY.get()
          .cloned()
          .ok_or_else(|| WorkflowError::Config("el registro de flujos no está inicializado".into()))
}
