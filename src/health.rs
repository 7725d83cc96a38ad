use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Health Reporting
// ============================================================================
//
// Each service collects ComponentHealth from its parts (order store, upstream
// circuit) and folds them into one SystemHealth for `GET /health`.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, HealthStatus::Degraded(_))
    }

    pub fn is_unhealthy(&self) -> bool {
        matches!(self, HealthStatus::Unhealthy(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub last_check: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ComponentHealth {
    pub fn new(name: impl Into<String>, status: HealthStatus) -> Self {
        Self {
            name: name.into(),
            status,
            last_check: Utc::now(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Anything that can describe its own health at a point in time
pub trait HealthCheckable {
    fn check_health(&self) -> ComponentHealth;

    fn component_name(&self) -> &str;
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemHealth {
    pub service: String,
    pub status: HealthStatus,
    pub components: Vec<ComponentHealth>,
    pub check_time: DateTime<Utc>,
}

impl SystemHealth {
    /// Unhealthy if any component is, degraded if any component is, else healthy
    pub fn from_components(service: impl Into<String>, components: Vec<ComponentHealth>) -> Self {
        let unhealthy: Vec<String> = components
            .iter()
            .filter_map(|c| match &c.status {
                HealthStatus::Unhealthy(msg) => Some(format!("{}: {}", c.name, msg)),
                _ => None,
            })
            .collect();

        let status = if !unhealthy.is_empty() {
            HealthStatus::Unhealthy(unhealthy.join(", "))
        } else if components.iter().any(|c| c.status.is_degraded()) {
            HealthStatus::Degraded("Some components degraded".to_string())
        } else {
            HealthStatus::Healthy
        };

        Self {
            service: service.into(),
            status,
            components,
            check_time: Utc::now(),
        }
    }
}
