//! Health report types for [`AppContext`](crate::AppContext) components.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Share of healthy components needed for the whole app to count as healthy.
const HEALTHY_THRESHOLD: f64 = 0.8;

/// Overall health status of the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// From 0.0 (nothing works) to 1.0: healthy components over total.
    pub score: f64,

    pub message: Option<String>,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp of the check.
    pub timestamp: i64,
}

impl HealthStatus {
    /// Healthy, score 1.0, no components yet.
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            message: None,
            components: Vec::new(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components.
    ///
    /// Call after the last component has been added.
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy = self.components.iter().filter(|c| c.is_healthy).count();
        self.score = healthy as f64 / self.components.len() as f64;
        self.is_healthy = self.score >= HEALTHY_THRESHOLD;
        self.message = self
            .components
            .iter()
            .find(|c| !c.is_healthy)
            .map(|c| format!("{} unhealthy", c.name));
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health status of an individual component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub is_healthy: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
