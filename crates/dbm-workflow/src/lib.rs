//! dbm-workflow: orquestación de flujos de administración de MySQL
//!
//! Un ticket (`{uid, created_by, bk_biz_id, ticket_type, infos}`) se
//! resuelve contra el `TicketRegistry`, se valida con el tipo de detalle de
//! su flujo y se convierte en una lista ordenada de pasos (`Flow`). El
//! `FlowController` registra la ejecución y la lanza en segundo plano; cada
//! paso recibe el contexto (`TransData`) del anterior y devuelve si tuvo
//! éxito. El primer fallo detiene la ejecución.
//!
//! ```
//! use dbm_workflow::{builtin_registry, FlowController};
//! use drs_client::ScriptedExecutor;
//! use flow::{InMemoryRunRepository, RunStatus};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! tokio_test::block_on(async {
//!   let ctl = FlowController::new(Arc::new(builtin_registry()),
//!                                 Arc::new(ScriptedExecutor::new()),
//!                                 Arc::new(InMemoryRunRepository::new()));
//!   let ticket = json!({
//!     "uid": 1, "created_by": "admin", "bk_biz_id": 3, "ticket_type": "MYSQL_HA_DISABLE",
//!     "infos": [{"cluster_id": 9, "proxy_addresses": ["10.0.0.1:10000"]}]
//!   });
//!   let run = ctl.submit("MYSQL_HA_DISABLE", ticket).unwrap();
//!   let report = run.wait().await.unwrap();
//!   assert_eq!(report.status, RunStatus::Succeeded);
//!   assert_eq!(ctl.active_runs(), 0);
//! });
//! ```

pub mod config;
pub mod controller;
pub mod errors;
pub mod factory;
pub mod flows;
pub mod step;

pub use config::WorkflowConfig;
pub use controller::{FlowController, RunHandle};
pub use errors::WorkflowError;
pub use factory::{builtin_registry, init_registry, register_builtin_flows, registry, Binding, FlowParamBuilder,
                  RegistryBuilder, TicketRegistry};
pub use flows::{Flow, FlowBuilder, FlowReport};
pub use step::{FlowRuntime, Step, StepContext, StepOutput, StepResult, TransData};
