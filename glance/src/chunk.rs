//! Progressive loading of large collections in fixed-size chunks.
//!
//! The loader only tracks bookkeeping (collection length, chunk size, which chunks are loaded);
//! it never owns or copies items. Chunk 0 is always loaded, and the loaded set only grows.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::ops::Range;

use crate::Record;
use crate::error::{ConfigError, Result};

/// A contiguous, order-preserving slice of the raw collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk<'a, T> {
    pub index: usize,
    pub items: &'a [T],
}

impl<T> Chunk<'_, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Inclusive-start, exclusive-end window over item timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DateRange {
    /// Builds a range, swapping the bounds when given in reverse.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        if start_ms <= end_ms {
            Self { start_ms, end_ms }
        } else {
            Self {
                start_ms: end_ms,
                end_ms: start_ms,
            }
        }
    }

    pub fn contains(&self, ts_ms: i64) -> bool {
        ts_ms >= self.start_ms && ts_ms < self.end_ms
    }

    /// Items without a timestamp are always admitted.
    pub fn admits<T: Record + ?Sized>(&self, item: &T) -> bool {
        item.timestamp_ms().is_none_or(|ts| self.contains(ts))
    }
}

/// Splits a collection of `len` items into `ceil(len / chunk_size)` chunks and tracks which of
/// them are loaded.
#[derive(Clone, Debug)]
pub struct ChunkedLoader {
    chunk_size: NonZeroUsize,
    len: usize,
    loaded: BTreeSet<usize>,
}

impl ChunkedLoader {
    /// Creates a loader with chunk 0 loaded.
    pub fn new(len: usize, chunk_size: usize) -> Result<Self> {
        let chunk_size = NonZeroUsize::new(chunk_size).ok_or(ConfigError::ZeroChunkSize)?;
        let mut loader = Self {
            chunk_size,
            len,
            loaded: BTreeSet::new(),
        };
        if loader.chunk_count() > 0 {
            loader.loaded.insert(0);
        }
        gdebug!(
            len,
            chunk_size = chunk_size.get(),
            chunks = loader.chunk_count(),
            "ChunkedLoader::new"
        );
        Ok(loader)
    }

    /// Starts over for a collection of `len` items: only chunk 0 stays loaded.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.loaded.clear();
        if self.chunk_count() > 0 {
            self.loaded.insert(0);
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size.get()
    }

    /// Length of the raw collection.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn chunk_count(&self) -> usize {
        self.len.div_ceil(self.chunk_size.get())
    }

    /// Raw-collection index range covered by chunk `index`.
    pub fn chunk_range(&self, index: usize) -> Option<Range<usize>> {
        if index >= self.chunk_count() {
            return None;
        }
        let size = self.chunk_size.get();
        let start = index * size;
        Some(start..start.saturating_add(size).min(self.len))
    }

    /// Chunk holding raw index `item_index`.
    pub fn chunk_of(&self, item_index: usize) -> Option<usize> {
        (item_index < self.len).then(|| item_index / self.chunk_size.get())
    }

    /// Marks chunk `index` as loaded.
    ///
    /// Returns `true` when the chunk was newly loaded; out-of-range and already-loaded chunks are
    /// no-ops.
    pub fn load_chunk(&mut self, index: usize) -> bool {
        if index >= self.chunk_count() {
            gwarn!(
                index,
                chunks = self.chunk_count(),
                "ChunkedLoader::load_chunk: out-of-range chunk"
            );
            return false;
        }
        let inserted = self.loaded.insert(index);
        if inserted {
            gdebug!(index, loaded = self.loaded.len(), "ChunkedLoader::load_chunk");
        }
        inserted
    }

    /// Loads every chunk.
    pub fn load_all(&mut self) {
        self.loaded.extend(0..self.chunk_count());
    }

    /// First chunk (in index order) that is not loaded yet.
    pub fn next_unloaded(&self) -> Option<usize> {
        (0..self.chunk_count()).find(|i| !self.loaded.contains(i))
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.contains(&index)
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.loaded.len() == self.chunk_count()
    }

    /// Loaded chunk indexes in ascending order.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = usize> + '_ {
        self.loaded.iter().copied()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of raw items in loaded chunks.
    pub fn loaded_len(&self) -> usize {
        self.loaded
            .iter()
            .filter_map(|&i| self.chunk_range(i))
            .map(|r| r.len())
            .sum()
    }

    /// Partitions `items` into chunks. `items.len()` is expected to equal [`Self::len`].
    pub fn chunks<'a, T>(&self, items: &'a [T]) -> impl Iterator<Item = Chunk<'a, T>> + use<'a, T> {
        debug_assert_eq!(items.len(), self.len, "ChunkedLoader: length mismatch");
        items
            .chunks(self.chunk_size.get())
            .enumerate()
            .map(|(index, items)| Chunk { index, items })
    }

    /// Raw indexes of every loaded item, in chunk order then original order.
    pub fn loaded_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.loaded
            .iter()
            .filter_map(|&i| self.chunk_range(i))
            .flatten()
    }

    /// The dataset exposed to the filter stage: loaded items admitted by `date_range`.
    pub fn effective_indices<T: Record>(
        &self,
        items: &[T],
        date_range: Option<&DateRange>,
    ) -> Vec<usize> {
        match date_range {
            None => self.loaded_indices().filter(|&i| i < items.len()).collect(),
            Some(range) => self
                .loaded_indices()
                .filter(|&i| items.get(i).is_some_and(|item| range.admits(item)))
                .collect(),
        }
    }
}
