//! Storage status types reported by the pool

/// Health status of the storage system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// Whether the pool is healthy
    pub healthy: bool,

    /// Number of open connections
    pub active_connections: usize,

    /// Number of idle connections
    pub idle_connections: usize,

    /// Maximum pool size
    pub max_connections: usize,

    /// Optional error message if unhealthy
    pub message: Option<String>,
}

impl HealthStatus {
    /// Create a healthy status
    pub fn healthy(active: usize, idle: usize, max: usize) -> Self {
        Self {
            healthy: true,
            active_connections: active,
            idle_connections: idle,
            max_connections: max,
            message: None,
        }
    }

    /// Create an unhealthy status
    pub fn unhealthy(message: String) -> Self {
        Self {
            healthy: false,
            active_connections: 0,
            idle_connections: 0,
            max_connections: 0,
            message: Some(message),
        }
    }
}

/// Connection pool metrics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolMetrics {
    pub connections_acquired: u64,
    pub connections_timeout: u64,
    pub connections_error: u64,
    /// Average connection acquisition time (milliseconds)
    pub avg_acquisition_time_ms: u64,
    pub transactions_committed: u64,
    pub transactions_rolled_back: u64,
}
