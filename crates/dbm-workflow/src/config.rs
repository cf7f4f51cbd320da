// Archivo: config.rs
// Propósito: leer la configuración del proceso desde el entorno (`.env`
// incluido) con valores por defecto razonables para desarrollo local.
use crate::errors::WorkflowError;
use std::env;
use std::time::Duration;

pub const DEFAULT_DRS_URL: &str = "http://127.0.0.1:8088";
pub const DEFAULT_DRS_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DRS_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuración del orquestador.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
  /// URL base del servicio DRS.
  pub drs_url: String,
  /// Tiempo máximo de una llamada al DRS.
  pub drs_timeout: Duration,
  pub drs_connect_timeout: Duration,
}

impl Default for WorkflowConfig {
  fn default() -> Self {
    Self { drs_url: DEFAULT_DRS_URL.to_string(),
           drs_timeout: Duration::from_secs(DEFAULT_DRS_TIMEOUT_SECS),
           drs_connect_timeout: Duration::from_secs(DEFAULT_DRS_CONNECT_TIMEOUT_SECS) }
  }
}

impl WorkflowConfig {
  /// Carga `.env` si existe y lee `DBM_DRS_URL`, `DBM_DRS_TIMEOUT_SECS` y
  /// `DBM_DRS_CONNECT_TIMEOUT_SECS`.
  pub fn from_env() -> Result<Self, WorkflowError> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Igual que `from_env` pero con una fuente de variables arbitraria.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, WorkflowError>
    where F: Fn(&str) -> Option<String>
  {
    let drs_url = match lookup("DBM_DRS_URL") {
      Some(url) if url.trim().is_empty() => return Err(WorkflowError::Config("DBM_DRS_URL está vacío".into())),
      Some(url) => url.trim().trim_end_matches('/').to_string(),
      None => DEFAULT_DRS_URL.to_string(),
    };
    let timeout = secs(&lookup, "DBM_DRS_TIMEOUT_SECS", DEFAULT_DRS_TIMEOUT_SECS)?;
    let connect = secs(&lookup, "DBM_DRS_CONNECT_TIMEOUT_SECS", DEFAULT_DRS_CONNECT_TIMEOUT_SECS)?;
    Ok(Self { drs_url,
              drs_timeout: Duration::from_secs(timeout),
              drs_connect_timeout: Duration::from_secs(connect) })
  }
}

fn secs<F>(lookup: &F, key: &str, default: u64) -> Result<u64, WorkflowError>
  where F: Fn(&str) -> Option<String>
{
  match lookup(key) {
    None => Ok(default),
    Some(raw) => {
      let v = raw.trim()
                 .parse::<u64>()
                 .map_err(|_| WorkflowError::Config(format!("{} debe ser un entero positivo, se recibió '{}'", key, raw)))?;
      if v == 0 {
        return Err(WorkflowError::Config(format!("{} debe ser mayor que 0", key)));
      }
      Ok(v)
    }
  }
}
