use crate::client::RemoteExecutor;
use crate::errors::DrsError;
use crate::types::{DrsEnvelope, DrsRequest, DrsResult};
use async_trait::async_trait;
use std::time::Duration;

const RPC_PATH: &str = "mysql/rpc";

/// Cliente HTTP del DRS.
///
/// El timeout es una política de configuración: se fija al construir el
/// cliente y aplica a cada llamada completa.
pub struct HttpDrsClient {
  http: reqwest::Client,
  base_url: String,
}

impl HttpDrsClient {
  pub fn new(base_url: impl Into<String>, connect_timeout: Duration, timeout: Duration) -> Result<Self, DrsError> {
    let http = reqwest::Client::builder().connect_timeout(connect_timeout)
                                         .timeout(timeout)
                                         .build()
                                         .map_err(|e| DrsError::Transport(format!("no se pudo crear el cliente HTTP: {}", e)))?;
    Ok(Self { http, base_url: base_url.into() })
  }

  fn rpc_url(&self) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), RPC_PATH)
  }
}

#[async_trait]
impl RemoteExecutor for HttpDrsClient {
  async fn rpc(&self, request: &DrsRequest) -> Result<Vec<DrsResult>, DrsError> {
    let response = self.http
                       .post(self.rpc_url())
                       .json(request)
                       .send()
                       .await
                       .map_err(|e| DrsError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(DrsError::Transport(format!("DRS devolvió {}: {}", status, body)));
    }

    let envelope: DrsEnvelope = response.json().await.map_err(|e| DrsError::Decode(e.to_string()))?;
    if envelope.code != 0 {
      return Err(DrsError::Transport(format!("DRS code {}: {}", envelope.code, envelope.msg)));
    }
    Ok(envelope.data)
  }
}
