//! Pagination state machine

use super::types::{page_limit, LoadKind, LoadOutcome, PageRequest, Phase};
use crate::error::Error;
use crate::product::Product;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Tracks the accumulated product list and the paging cursor
///
/// Invariants:
/// - `products` never holds two entries with the same id
/// - at most one request is in flight (`Phase::Loading`)
/// - `page_index` only advances when a fetch succeeds
#[derive(Debug, Clone)]
pub struct PaginationState {
    base_page_size: u32,
    page_index: u32,
    products: Vec<Product>,
    known_ids: HashSet<i64>,
    has_more: bool,
    last_failed: bool,
    phase: Phase,
    in_flight: Option<PageRequest>,
}

impl PaginationState {
    /// Create an empty state. A zero page size is treated as 1.
    pub fn new(base_page_size: u32) -> Self {
        Self {
            base_page_size: base_page_size.max(1),
            page_index: 0,
            products: Vec::new(),
            known_ids: HashSet::new(),
            has_more: true,
            last_failed: false,
            phase: Phase::Idle,
            in_flight: None,
        }
    }

    pub fn base_page_size(&self) -> u32 {
        self.base_page_size
    }

    /// Number of successful fetches since the last initial load
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Accumulated products in arrival order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn last_failed(&self) -> bool {
        self.last_failed
    }

    /// Limit the next incremental request would use
    pub fn next_limit(&self) -> u32 {
        page_limit(self.base_page_size, self.page_index)
    }

    /// Start a fresh load from the first page
    ///
    /// Returns `None` while another request is in flight.
    pub fn begin_initial(&mut self) -> Option<PageRequest> {
        if self.is_loading() {
            debug!("Initial load skipped: request already in flight");
            return None;
        }

        self.page_index = 0;
        self.has_more = true;
        self.products.clear();
        self.known_ids.clear();

        Some(self.start(LoadKind::Initial))
    }

    /// Request the next page if one may exist
    ///
    /// Returns `None` while loading or once the data is exhausted.
    pub fn begin_more(&mut self) -> Option<PageRequest> {
        if self.is_loading() || !self.has_more {
            return None;
        }
        Some(self.start(LoadKind::Incremental))
    }

    /// Retry after connectivity returns
    ///
    /// Reloads from scratch when nothing has been loaded yet, requests the
    /// next page when the last request failed, and does nothing otherwise.
    pub fn begin_reload(&mut self) -> Option<PageRequest> {
        if self.products.is_empty() {
            self.begin_initial()
        } else if self.last_failed {
            self.begin_more()
        } else {
            None
        }
    }

    fn start(&mut self, kind: LoadKind) -> PageRequest {
        let request = PageRequest {
            kind,
            page_index: self.page_index,
            limit: self.next_limit(),
        };
        self.phase = Phase::Loading;
        self.in_flight = Some(request);
        debug!(
            "Requesting page {} with limit {} ({:?})",
            request.page_index, request.limit, kind
        );
        request
    }

    /// Apply the result of the fetch started by `request`
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<Vec<Product>, Error>,
    ) -> LoadOutcome {
        if self.in_flight != Some(request) {
            debug!("Ignoring completion for request {:?}: not in flight", request);
            return LoadOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(records) => self.apply_page(request, records),
            Err(error) => {
                warn!("Loading page {} failed: {}", request.page_index, error);
                self.last_failed = true;
                self.phase = Phase::Failed;
                LoadOutcome::Failed {
                    message: error.user_message(),
                }
            }
        }
    }

    fn apply_page(&mut self, request: PageRequest, records: Vec<Product>) -> LoadOutcome {
        let raw_count = records.len();
        self.page_index += 1;

        let mut new_count = 0;
        for product in records {
            if self.known_ids.insert(product.id()) {
                self.products.push(product);
                new_count += 1;
            }
        }

        self.has_more = new_count > 0 && raw_count == request.limit as usize;
        self.last_failed = false;
        self.phase = if self.has_more {
            Phase::Loaded
        } else {
            Phase::Exhausted
        };

        debug!(
            "Page {} returned {} records, {} new, has_more={}",
            request.page_index, raw_count, new_count, self.has_more
        );

        LoadOutcome::Updated {
            new_count,
            has_more: self.has_more,
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(crate::config::PaginationSettings::default().base_page_size)
    }
}
