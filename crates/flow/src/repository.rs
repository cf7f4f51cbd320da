// Archivo: repository.rs
// Propósito: definir el trait `RunRepository`, el contrato que deben
// implementar los almacenes de ejecuciones (en memoria, BD externa, etc.).
use crate::domain::{RootId, RunMeta, RunStatus, StepLog};
use crate::errors::Result;

/// Contrato mínimo del repositorio de ejecuciones.
///
/// La persistencia duradera de tickets es de un colaborador externo; este
/// contrato sólo cubre lo que el motor necesita para que una ejecución sea
/// inspeccionable por su `root_id`.
pub trait RunRepository: Send + Sync {
    /// Registra una ejecución nueva. `Conflict` si el `root_id` ya existe.
    fn create_run(&self, meta: &RunMeta) -> Result<()>;

    /// Obtiene los metadatos de una ejecución.
    fn get_run(&self, root_id: &RootId) -> Result<RunMeta>;

    /// Cambia el estado. Un estado terminal se registra una sola vez: cambiar
    /// desde un estado terminal devuelve `Conflict`.
    fn update_status(&self, root_id: &RootId, status: RunStatus, failed_step: Option<String>) -> Result<RunMeta>;

    /// Añade una línea al rastro de logs.
    fn append_log(&self, log: &StepLog) -> Result<()>;

    /// Lee el rastro de logs en orden de llegada.
    fn read_logs(&self, root_id: &RootId) -> Result<Vec<StepLog>>;

    /// Lista las ejecuciones conocidas, de la más antigua a la más reciente.
    fn list_runs(&self) -> Result<Vec<RunMeta>>;
}
