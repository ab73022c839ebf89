use crate::GestureConfig;
use crate::error::{ConfigError, Result};
use crate::perf::DEFAULT_MEMORY_SAMPLE_INTERVAL_MS;

/// Configuration for an optimized data view.
///
/// Every field has a documented default (see [`OptimizerOptions::default`]). Invalid
/// combinations are rejected by [`OptimizerOptions::validate`] at construction time; nothing is
/// validated again during steady-state operation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerOptions {
    /// Rows shown before the first scroll metrics arrive, and the page size for pagination.
    pub items_per_page: usize,

    /// When disabled, the whole processed collection is "visible".
    pub enable_virtualization: bool,

    /// Quiet period before a search edit is applied.
    pub debounce_ms: u64,

    /// Minimum spacing between scroll-driven window recomputations.
    pub throttle_ms: u64,

    pub chunk_size: usize,

    /// Extra rows rendered past the viewport to hide scroll jank.
    pub buffer_size: usize,

    /// Upper bound on processed entries when `enable_data_sampling` is set.
    pub max_data_points: usize,
    pub enable_data_sampling: bool,

    /// Load only chunk 0 up front and the rest on demand. When `false`, every chunk is loaded
    /// at construction.
    pub progressive_loading: bool,

    /// With progressive loading, load the next chunk when the window nears the loaded end.
    pub auto_load_chunks: bool,

    pub memory_sample_interval_ms: u64,

    pub gesture: GestureConfig,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            items_per_page: 50,
            enable_virtualization: true,
            debounce_ms: 300,
            throttle_ms: 100,
            chunk_size: 100,
            buffer_size: 5,
            max_data_points: 1_000,
            enable_data_sampling: false,
            progressive_loading: false,
            auto_load_chunks: true,
            memory_sample_interval_ms: DEFAULT_MEMORY_SAMPLE_INTERVAL_MS,
            gesture: GestureConfig::default(),
        }
    }
}

impl OptimizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.items_per_page == 0 {
            return Err(ConfigError::ZeroItemsPerPage);
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::zero_window("debounce_ms"));
        }
        if self.throttle_ms == 0 {
            return Err(ConfigError::zero_window("throttle_ms"));
        }
        if self.memory_sample_interval_ms == 0 {
            return Err(ConfigError::zero_window("memory_sample_interval_ms"));
        }
        if self.enable_data_sampling && self.max_data_points == 0 {
            return Err(ConfigError::ZeroMaxDataPoints);
        }
        self.gesture.validate()
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    pub fn with_virtualization(mut self, enabled: bool) -> Self {
        self.enable_virtualization = enabled;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Enables downsampling of the processed collection to at most `max_data_points` entries.
    pub fn with_data_sampling(mut self, max_data_points: usize) -> Self {
        self.enable_data_sampling = true;
        self.max_data_points = max_data_points;
        self
    }

    pub fn with_progressive_loading(mut self, progressive: bool) -> Self {
        self.progressive_loading = progressive;
        self
    }

    pub fn with_auto_load_chunks(mut self, auto_load: bool) -> Self {
        self.auto_load_chunks = auto_load;
        self
    }

    pub fn with_memory_sample_interval_ms(mut self, interval_ms: u64) -> Self {
        self.memory_sample_interval_ms = interval_ms;
        self
    }

    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }
}
