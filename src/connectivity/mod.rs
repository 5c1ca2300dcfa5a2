//! Connectivity module
//!
//! Edge-triggered network reachability notifications.
//!
//! # Overview
//!
//! A `ReachabilitySource` answers a one-shot reachability check and delivers
//! flag changes as a stream. `ConnectivityObserver` keeps the current flag,
//! consumes the stream on a single monitor task and fires `restored` or
//! `lost` callbacks only when the flag actually flips.

mod observer;
mod sources;

pub use observer::{ConnectivityObserver, Transition};
pub use sources::{HostProbe, ReachabilityChannel, ReachabilitySource};
