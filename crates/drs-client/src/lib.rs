//! Crate `drs-client`: cliente del servicio de ejecución remota (DRS).
//!
//! Envía lotes de comandos a una o varias instancias de base de datos y
//! devuelve un resultado por dirección. Un `error_msg` vacío es éxito; fallos
//! de conexión, autenticación o SQL llegan todos como mensaje no vacío: la
//! interpretación queda en manos del llamador.
//!
//! ```rust
//! use drs_client::{CommandBatch, RemoteExecutor, ScriptedExecutor};
//! use dbm_domain::{EndpointAddress, ZoneId};
//! # tokio_test::block_on(async {
//! let drs = ScriptedExecutor::new();
//! let addr = EndpointAddress::parse("127.0.0.1:3306", ZoneId(0)).unwrap();
//! let res = drs.execute(&[addr], &CommandBatch::new(vec!["SELECT 1".into()], false), ZoneId(0)).await.unwrap();
//! assert!(res[0].is_success());
//! # });
//! ```
pub mod client;
pub mod errors;
pub mod http;
pub mod stubs;
pub mod types;

pub use client::*;
pub use errors::*;
pub use http::*;
pub use stubs::*;
pub use types::*;
