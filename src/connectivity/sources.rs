//! Reachability sources
//!
//! Where reachability information comes from: a channel the host
//! environment pushes into, or a plain TCP probe.

use futures::stream::{self, BoxStream, StreamExt};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;

/// Provider of reachability information
pub trait ReachabilitySource: Send + Sync {
    /// One-shot synchronous check
    fn check(&self) -> bool;

    /// Flag-change notifications from the environment
    fn changes(&self) -> BoxStream<'static, bool>;
}

// ============================================================================
// Channel Source
// ============================================================================

/// Reachability pushed in by the host environment
///
/// Every subscriber sees every notification in order.
#[derive(Debug)]
pub struct ReachabilityChannel {
    current: AtomicBool,
    sender: broadcast::Sender<bool>,
}

impl ReachabilityChannel {
    /// Create a channel with an initial reachability value
    pub fn new(reachable: bool) -> Self {
        let (sender, _) = broadcast::channel(64);
        Self {
            current: AtomicBool::new(reachable),
            sender,
        }
    }

    /// Deliver a reachability notification
    pub fn notify(&self, reachable: bool) {
        self.current.store(reachable, Ordering::SeqCst);
        // No subscribers is fine: the stored value still answers `check`
        let _ = self.sender.send(reachable);
    }
}

impl ReachabilitySource for ReachabilityChannel {
    fn check(&self) -> bool {
        self.current.load(Ordering::SeqCst)
    }

    fn changes(&self) -> BoxStream<'static, bool> {
        let receiver = self.sender.subscribe();
        stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(reachable) => return Some((reachable, receiver)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("Reachability stream lagged, skipped {} updates", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }
}

// ============================================================================
// Host Probe
// ============================================================================

/// TCP connect check against a host; delivers no change notifications
#[derive(Debug, Clone)]
pub struct HostProbe {
    address: String,
    timeout: Duration,
}

impl HostProbe {
    /// Probe `host` (optionally "host:port"); the port defaults from the scheme
    pub fn new(scheme: &str, host: &str, timeout: Duration) -> Self {
        let address = if host.contains(':') {
            host.to_string()
        } else {
            let port = if scheme == "http" { 80 } else { 443 };
            format!("{host}:{port}")
        };
        Self { address, timeout }
    }

    /// Address the probe connects to
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl ReachabilitySource for HostProbe {
    fn check(&self) -> bool {
        let Ok(addrs) = self.address.to_socket_addrs() else {
            debug!("Could not resolve {}", self.address);
            return false;
        };
        addrs
            .into_iter()
            .any(|addr| TcpStream::connect_timeout(&addr, self.timeout).is_ok())
    }

    fn changes(&self) -> BoxStream<'static, bool> {
        stream::empty().boxed()
    }
}
