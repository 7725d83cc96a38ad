//! Command line and environment configuration for the three binaries.
//!
//! Every flag has an environment variable fallback, so the services can be
//! configured either way:
//!
//! ```bash
//! ORDER_SERVICE_PORT=9000 order-service
//! price-predictor --order-service-url http://127.0.0.1:9000
//! ORDER_API_URL=http://127.0.0.1:9000 order-cli list
//! ```

use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::utils::CircuitBreakerConfig;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "In-memory order store with per item type analysis")]
pub struct OrderServiceArgs {
    /// Interface to bind
    #[arg(long, env = "ORDER_SERVICE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "ORDER_SERVICE_PORT", default_value_t = 8000)]
    pub port: u16,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Per item type linear price prediction")]
pub struct PredictorArgs {
    /// Interface to bind
    #[arg(long, env = "PREDICTOR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PREDICTOR_PORT", default_value_t = 8001)]
    pub port: u16,

    /// Base URL of the order service
    #[arg(long, env = "ORDER_SERVICE_URL", default_value = "http://127.0.0.1:8000")]
    pub order_service_url: String,

    /// Timeout for each call to the order service
    #[arg(long, env = "PREDICTOR_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    #[command(flatten)]
    pub breaker: BreakerArgs,
}

impl PredictorArgs {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Circuit breaker settings for the order service client
#[derive(Args, Debug, Clone)]
pub struct BreakerArgs {
    /// Consecutive failures before calls fail fast
    #[arg(long = "breaker-failure-threshold", env = "PREDICTOR_BREAKER_FAILURE_THRESHOLD", default_value_t = 5)]
    pub failure_threshold: u32,

    /// Seconds to wait before probing the order service again
    #[arg(long = "breaker-timeout-secs", env = "PREDICTOR_BREAKER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Probe successes needed to close the circuit
    #[arg(long = "breaker-success-threshold", env = "PREDICTOR_BREAKER_SUCCESS_THRESHOLD", default_value_t = 2)]
    pub success_threshold: u32,
}

impl From<&BreakerArgs> for CircuitBreakerConfig {
    fn from(args: &BreakerArgs) -> Self {
        Self {
            failure_threshold: args.failure_threshold,
            timeout: Duration::from_secs(args.timeout_secs),
            success_threshold: args.success_threshold,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Terminal client for the order and prediction services")]
pub struct CliArgs {
    /// Base URL of the order service
    #[arg(long, env = "ORDER_API_URL", default_value = "http://127.0.0.1:8000")]
    pub order_url: String,

    /// Base URL of the price predictor
    #[arg(long, env = "AI_API_URL", default_value = "http://127.0.0.1:8001")]
    pub predictor_url: String,

    /// Per request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Submit a new order
    Create {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        item_type: String,
        #[arg(long)]
        quantity: i64,
        #[arg(long = "price")]
        price_per_item: f64,
    },
    /// List all orders
    List,
    /// Per item type averages
    Analyze,
    /// Predict the price per item for a quantity
    Predict {
        #[arg(long)]
        item_type: String,
        #[arg(long)]
        quantity: i64,
    },
}
