//! Crate `flow`: registro de ejecuciones de flujos.
//!
//! Define los tipos de una ejecución (`RootId`, `RunMeta`, `RunStatus`,
//! `StepLog`), el contrato de almacenamiento `RunRepository` y una
//! implementación en memoria (`InMemoryRunRepository`). `FlowEngine` registra
//! las transiciones de estado y `RunService` permite inspeccionar una
//! ejecución por su `root_id`.
//!
//! Ejemplo rápido:
//! ```rust
//! use flow::{InMemoryRunRepository, RootId, RunMeta, RunService, RunStatus};
//! use std::sync::Arc;
//! let service = RunService::new(Arc::new(InMemoryRunRepository::new()));
//! let engine = service.engine();
//! let id = RootId::generate();
//! engine.register_run(&RunMeta::new(id.clone(), "MYSQL_HA_DISABLE", "disable", "admin", 1, serde_json::json!({}))).unwrap();
//! engine.mark_running(&id).unwrap();
//! engine.finish(&id, RunStatus::Succeeded, None).unwrap();
//! assert_eq!(service.inspect(&id).unwrap().meta.status, RunStatus::Succeeded);
//! ```
pub mod domain;
pub mod engine;
pub mod errors;
pub mod repository;
pub mod service;
pub mod stubs;

pub use domain::*;
pub use engine::*;
pub use errors::*;
pub use repository::*;
pub use service::*;
pub use stubs::*;
