//! Construction-time configuration errors.
//!
//! Steady-state operations (filter, sort, windowing, chunk loading, gesture classification) are
//! total and never fail; only building an engine from invalid options does.

/// Result type alias for configuration checks.
pub type Result<T> = core::result::Result<T, ConfigError>;

/// Invalid configuration detected while constructing an engine component.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `chunk_size` must be at least 1.
    #[error("chunk_size must be at least 1")]
    ZeroChunkSize,

    /// `items_per_page` must be at least 1.
    #[error("items_per_page must be at least 1")]
    ZeroItemsPerPage,

    /// A debounce/throttle/sampling window was zero.
    #[error("{name} must be a positive number of milliseconds")]
    ZeroWindow { name: &'static str },

    /// Data sampling was enabled with `max_data_points == 0`.
    #[error("max_data_points must be at least 1 when data sampling is enabled")]
    ZeroMaxDataPoints,

    /// A gesture threshold was negative, zero, or not finite.
    #[error("invalid value for {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
}

impl ConfigError {
    pub(crate) fn zero_window(name: &'static str) -> Self {
        Self::ZeroWindow { name }
    }

    pub(crate) fn invalid_threshold(name: &'static str, value: impl Into<f64>) -> Self {
        Self::InvalidThreshold {
            name,
            value: value.into(),
        }
    }
}
