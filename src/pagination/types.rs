//! Pagination types
//!
//! Phases, page requests and completion outcomes shared by the state
//! machine and its drivers.

/// Phase of the pagination state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Last fetch succeeded and more data may exist
    Loaded,
    /// Last fetch succeeded and no more data exists
    Exhausted,
    /// Last fetch failed
    Failed,
}

impl Phase {
    /// Check if a fetch is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Whether a fetch replaces the list or extends it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First page; results replace the accumulated list
    Initial,
    /// Following page; new results are appended
    Incremental,
}

impl LoadKind {
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::Initial)
    }
}

/// A fetch the caller should perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: LoadKind,
    /// Page index the request was issued for
    pub page_index: u32,
    /// Value for the `limit` query parameter
    pub limit: u32,
}

/// Result of handing a fetch result back to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list was updated
    Updated {
        /// Records that were not already in the list
        new_count: usize,
        /// Whether another page may be requested
        has_more: bool,
    },
    /// The fetch failed; the list is unchanged
    Failed {
        /// User-facing description of the failure
        message: String,
    },
    /// No matching request was in flight; nothing changed
    Stale,
}

/// Limit for a given page: `base * 2^page_index`, saturating at `u32::MAX`
pub fn page_limit(base_page_size: u32, page_index: u32) -> u32 {
    match 1u32.checked_shl(page_index) {
        Some(factor) => base_page_size.saturating_mul(factor),
        None => u32::MAX,
    }
}
