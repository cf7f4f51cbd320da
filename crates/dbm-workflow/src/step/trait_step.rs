use crate::errors::WorkflowError;
use crate::step::context::StepContext;
use crate::step::trans_data::TransData;
use async_trait::async_trait;

/// Resultado de ejecutar un paso: la señal de éxito y el contexto que pasa
/// al siguiente paso.
#[derive(Debug, Clone)]
pub struct StepOutput {
    pub success: bool,
    pub trans_data: TransData,
}

impl StepOutput {
    pub fn succeeded(trans_data: TransData) -> Self {
        Self { success: true, trans_data }
    }

    pub fn failed(trans_data: TransData) -> Self {
        Self { success: false, trans_data }
    }
}

pub type StepResult = Result<StepOutput, WorkflowError>;

/// Trait que representa un paso del flujo.
///
/// Un fallo remoto esperado se registra con `ctx.log_error` y se devuelve
/// como `success = false`. `Err` queda para violaciones de contrato, que
/// abortan la ejecución.
#[async_trait]
pub trait Step: Send + Sync {
    /// Nombre o identificador del paso
    fn name(&self) -> &str;

    /// Nombre del nodo que aparece en los logs. Por defecto, el del paso.
    fn node_name(&self) -> &str {
        self.name()
    }

    /// Ejecuta la logica del paso. Recibe el contexto por valor y lo
    /// devuelve (posiblemente modificado) dentro de `StepOutput`.
    async fn execute(&self, ctx: &StepContext, trans_data: TransData) -> StepResult;
}
