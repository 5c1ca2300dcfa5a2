//! Pagination module
//!
//! Growing-limit pagination with de-duplication.
//!
//! # Overview
//!
//! The catalog API has no cursor or offset. Each page request asks for the
//! whole result set again with a larger `limit` (`base * 2^page`), so
//! consecutive responses overlap. `PaginationState` tracks the page index,
//! drops records whose id has already been seen and decides from the raw
//! response size whether more data exists.
//!
//! The state machine is synchronous and performs no I/O: callers obtain a
//! `PageRequest` from one of the `begin_*` methods, perform the fetch, then
//! hand the result back to `complete`.

mod state;
mod types;

pub use state::PaginationState;
pub use types::{page_limit, LoadKind, LoadOutcome, PageRequest, Phase};
