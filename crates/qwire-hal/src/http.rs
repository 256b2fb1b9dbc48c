//! HTTP client for a remote simulation engine.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use qwire_compile::{CircuitRequest, StabilizerRequest};

use crate::engine::{EngineConfig, SimulationEngine};
use crate::error::{HalError, HalResult};
use crate::qec::{QecRequest, QecResult};
use crate::result::{ProbabilityResult, StabilizerEvolution};

/// Simulation engine reached over HTTP with JSON bodies.
#[derive(Debug)]
pub struct HttpEngine {
    /// HTTP client with timeouts configured.
    client: Client,
    /// Connection settings.
    config: EngineConfig,
}

impl HttpEngine {
    /// Create a client for the configured engine.
    pub fn new(config: EngineConfig) -> HalResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a client for `base_url` with default settings.
    pub fn with_base_url(base_url: impl Into<String>) -> HalResult<Self> {
        Self::new(EngineConfig::new(base_url))
    }

    /// The connection settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// Perform a POST request with a JSON body, returning the JSON response.
    async fn post(&self, path: &str, body: &impl Serialize) -> HalResult<Value> {
        let url = self.url(path);
        debug!("POST {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        let resp = request.send().await?;

        self.handle_response(resp).await
    }

    /// Handle HTTP response: parse JSON or return an error.
    async fn handle_response(&self, response: reqwest::Response) -> HalResult<Value> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            serde_json::from_str(&text)
                .map_err(|e| HalError::ResponseShape(format!("body is not JSON: {e}")))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(HalError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl SimulationEngine for HttpEngine {
    fn name(&self) -> &str {
        &self.config.base_url
    }

    #[instrument(skip_all, fields(qubits = request.qubit_nodes.len(), ops = request.operations.len()))]
    async fn simulate_circuit(&self, request: &CircuitRequest) -> HalResult<ProbabilityResult> {
        let body = self.post(&self.config.circuit_path, request).await?;
        ProbabilityResult::from_response(&body, request.qubit_nodes.len())
    }

    #[instrument(skip_all, fields(qubits = request.num_qubits, ops = request.operations.len()))]
    async fn evolve_stabilizer(
        &self,
        request: &StabilizerRequest,
    ) -> HalResult<StabilizerEvolution> {
        let body = self.post(&self.config.stabilizer_path, request).await?;
        StabilizerEvolution::from_response(&body, request.num_qubits)
    }

    #[instrument(skip_all, fields(code = %request.code_type, errors = request.errors.len()))]
    async fn correct_errors(&self, request: &QecRequest) -> HalResult<QecResult> {
        request.validate()?;
        let body = self.post(&self.config.qec_path, request).await?;
        QecResult::from_response(&body, request.code_type)
    }
}
