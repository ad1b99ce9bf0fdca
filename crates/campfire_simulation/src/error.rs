//! Error taxonomy for the pursuit core.
//!
//! Only configuration problems are errors. Missing references degrade a tick
//! to a no-op ([`MissingReference`] travels inside `TickOutcome`), and a
//! zero-length direction vector is treated as "arrived".

use std::path::PathBuf;
use thiserror::Error;

/// InvalidConfiguration: rejected at construction, never mid-session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },

    #[error("`{field}` must be > 0 (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be >= 0 (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("`chaseExitMultiplier` must be > 1 for hysteresis (got {0})")]
    ChaseExitMultiplier(f32),

    #[error("`wanderMinDist` ({min}) exceeds `wanderMaxDist` ({max})")]
    WanderRange { min: f32, max: f32 },

    #[error("protected zone reaches {reach} from origin, beyond boundary radius {boundary}")]
    ProtectedZoneOutsideBoundary { reach: f32, boundary: f32 },

    #[error("`{field}` lies {distance} from origin, beyond boundary radius {boundary}")]
    PointOutsideBoundary {
        field: &'static str,
        distance: f32,
        boundary: f32,
    },
}

/// Failure to load a config bundle from JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// A collaborator the core needs is not available yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MissingReference {
    #[error("player handle not attached")]
    Player,

    #[error("agent visual not loaded")]
    AgentVisual,
}
