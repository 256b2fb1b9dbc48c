//! Engine trait and configuration.
//!
//! A simulation engine exposes three calls:
//!
//! | Method | Request | Returns |
//! |--------|---------|---------|
//! | `simulate_circuit()` | [`CircuitRequest`] | [`ProbabilityResult`] |
//! | `evolve_stabilizer()` | [`StabilizerRequest`] | [`StabilizerEvolution`] |
//! | `correct_errors()` | [`QecRequest`] | [`QecResult`] |

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use qwire_compile::{CircuitRequest, StabilizerRequest};

use crate::error::{HalError, HalResult};
use crate::qec::{QecRequest, QecResult};
use crate::result::{ProbabilityResult, StabilizerEvolution};

/// Default engine base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
/// Default path of the circuit simulation endpoint.
pub const DEFAULT_CIRCUIT_PATH: &str = "/quantum/circuit/simulate";
/// Default path of the stabilizer evolution endpoint.
pub const DEFAULT_STABILIZER_PATH: &str = "/quantum/stabilizer/simulate";
/// Default path of the error correction endpoint.
pub const DEFAULT_QEC_PATH: &str = "/quantum/qec/simulate";

/// Connection settings for an engine.
#[derive(Clone)]
pub struct EngineConfig {
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Path of the circuit simulation endpoint.
    pub circuit_path: String,
    /// Path of the stabilizer evolution endpoint.
    pub stabilizer_path: String,
    /// Path of the error correction endpoint.
    pub qec_path: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Optional bearer token.
    pub token: Option<String>,
}

impl EngineConfig {
    /// Create a configuration for `base_url` with default paths and timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            circuit_path: DEFAULT_CIRCUIT_PATH.to_string(),
            stabilizer_path: DEFAULT_STABILIZER_PATH.to_string(),
            qec_path: DEFAULT_QEC_PATH.to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            token: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the three endpoint paths.
    #[must_use]
    pub fn with_paths(
        mut self,
        circuit: impl Into<String>,
        stabilizer: impl Into<String>,
        qec: impl Into<String>,
    ) -> Self {
        self.circuit_path = circuit.into();
        self.stabilizer_path = stabilizer.into();
        self.qec_path = qec.into();
        self
    }

    /// Check that the URL and timeouts are usable.
    pub fn validate(&self) -> HalResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(HalError::Configuration(format!(
                "engine URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(HalError::Configuration("timeout must be non-zero".into()));
        }
        for path in [&self.circuit_path, &self.stabilizer_path, &self.qec_path] {
            if !path.starts_with('/') {
                return Err(HalError::Configuration(format!(
                    "endpoint path must start with '/', got '{path}'"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("base_url", &self.base_url)
            .field("circuit_path", &self.circuit_path)
            .field("stabilizer_path", &self.stabilizer_path)
            .field("qec_path", &self.qec_path)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// A simulation engine that runs compiled circuits.
///
/// Implementations must be shareable across tasks. Each call is a single
/// request/response exchange; there is no job lifecycle.
#[async_trait]
pub trait SimulationEngine: Send + Sync {
    /// Get the name of this engine.
    fn name(&self) -> &str;

    /// Run a general circuit and return the basis-state probabilities.
    async fn simulate_circuit(&self, request: &CircuitRequest) -> HalResult<ProbabilityResult>;

    /// Evolve a stabilizer state through the request's operations.
    async fn evolve_stabilizer(&self, request: &StabilizerRequest)
    -> HalResult<StabilizerEvolution>;

    /// Inject errors into a code and attempt recovery.
    async fn correct_errors(&self, request: &QecRequest) -> HalResult<QecResult>;
}
