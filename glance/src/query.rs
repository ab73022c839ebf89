#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Free-text search plus an optional sort column.
///
/// `sort_direction` is only meaningful while `sort_key` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub search_text: String,
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(key.into());
        self.sort_direction = direction;
        self
    }

    /// Sorts by `key`: toggles the direction when `key` is already the sort key, otherwise
    /// switches to `key` ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort_key.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.reversed();
        } else {
            self.sort_key = Some(key.to_owned());
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn clear_sort(&mut self) {
        self.sort_key = None;
        self.sort_direction = SortDirection::Asc;
    }

    /// Returns `true` when filtering would be the identity.
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_empty()
    }
}
