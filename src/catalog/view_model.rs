//! Product list view-model

use super::types::{ProductListDelegate, ProductsApi};
use crate::connectivity::ConnectivityObserver;
use crate::error::{Error, Result};
use crate::pagination::{LoadOutcome, PageRequest, PaginationState, Phase};
use crate::product::Product;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Paginated product list
///
/// Load operations start a fetch on a spawned task and return its handle,
/// or `None` when the request is a no-op (already loading, or nothing more
/// to load). The task holds only a weak reference to the view-model: if the
/// view-model is dropped before the fetch finishes, the result is discarded.
pub struct ProductListViewModel {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn ProductsApi>,
    state: Mutex<PaginationState>,
    delegate: Mutex<Option<Weak<dyn ProductListDelegate>>>,
}

impl ProductListViewModel {
    /// Create a view-model with an empty list
    pub fn new(api: Arc<dyn ProductsApi>, base_page_size: u32) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                state: Mutex::new(PaginationState::new(base_page_size)),
                delegate: Mutex::new(None),
            }),
        }
    }

    /// Set the delegate; only a weak reference is kept
    pub fn set_delegate<D: ProductListDelegate + 'static>(&self, delegate: &Arc<D>) {
        let delegate: Arc<dyn ProductListDelegate> = delegate.clone();
        *lock(&self.inner.delegate) = Some(Arc::downgrade(&delegate));
    }

    /// Load the first page, replacing whatever is loaded
    pub fn load_initial_products(&self) -> Option<JoinHandle<()>> {
        Inner::start(&self.inner, PaginationState::begin_initial)
    }

    /// Load the next page unless loading or exhausted
    pub fn load_more_products_if_possible(&self) -> Option<JoinHandle<()>> {
        Inner::start(&self.inner, PaginationState::begin_more)
    }

    /// Retry after a failure or when nothing is loaded yet
    pub fn handle_reload_products(&self) -> Option<JoinHandle<()>> {
        Inner::start(&self.inner, PaginationState::begin_reload)
    }

    /// Retry automatically whenever `observer` reports the network is back
    pub fn bind_connectivity(&self, observer: &ConnectivityObserver) {
        let inner = Arc::downgrade(&self.inner);
        observer.register_callbacks(
            move || {
                let Some(inner) = inner.upgrade() else {
                    return;
                };
                if Inner::start(&inner, PaginationState::begin_reload).is_some() {
                    info!("Reloading products after reconnect");
                }
            },
            || warn!("Offline; product loading will resume when the connection returns"),
        );
    }

    /// Snapshot of the loaded products
    pub fn products(&self) -> Vec<Product> {
        lock(&self.inner.state).products().to_vec()
    }

    /// Find a loaded product by id
    pub fn product(&self, id: i64) -> Option<Product> {
        lock(&self.inner.state)
            .products()
            .iter()
            .find(|product| product.id() == id)
            .cloned()
    }

    pub fn product_count(&self) -> usize {
        lock(&self.inner.state).products().len()
    }

    pub fn phase(&self) -> Phase {
        lock(&self.inner.state).phase()
    }

    pub fn has_more(&self) -> bool {
        lock(&self.inner.state).has_more()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.inner.state).is_loading()
    }

    pub fn page_index(&self) -> u32 {
        lock(&self.inner.state).page_index()
    }
}

impl std::fmt::Debug for ProductListViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.inner.state);
        f.debug_struct("ProductListViewModel")
            .field("phase", &state.phase())
            .field("page_index", &state.page_index())
            .field("products", &state.products().len())
            .field("has_more", &state.has_more())
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn start(
        inner: &Arc<Inner>,
        begin: fn(&mut PaginationState) -> Option<PageRequest>,
    ) -> Option<JoinHandle<()>> {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime; cannot load products");
            return None;
        };

        let request = begin(&mut lock(&inner.state))?;
        if !request.kind.is_initial() {
            if let Some(delegate) = inner.delegate() {
                delegate.on_loading_started();
            }
        }

        let owner = Arc::downgrade(inner);
        let api = Arc::clone(&inner.api);
        // Created outside the task so an abort before the first poll still fires it
        let mut guard = CancelGuard {
            owner: owner.clone(),
            request,
            armed: true,
        };
        Some(runtime.spawn(async move {
            let result = fetch(api.as_ref(), request.limit).await;
            guard.armed = false;
            match owner.upgrade() {
                Some(inner) => inner.finish(request, result),
                None => debug!(
                    "Dropping page {} result: view-model is gone",
                    request.page_index
                ),
            }
        }))
    }

    fn finish(&self, request: PageRequest, result: Result<Vec<Product>>) {
        let outcome = lock(&self.state).complete(request, result);
        let delegate = self.delegate();

        match outcome {
            LoadOutcome::Updated { new_count, .. } => {
                debug!("Loaded {} new products", new_count);
                if let Some(ref delegate) = delegate {
                    delegate.on_products_updated();
                }
            }
            LoadOutcome::Failed { message } => {
                if let Some(ref delegate) = delegate {
                    delegate.on_load_failed(&message);
                }
            }
            LoadOutcome::Stale => return,
        }

        if !request.kind.is_initial() {
            if let Some(delegate) = delegate {
                delegate.on_loading_stopped();
            }
        }
    }

    fn delegate(&self) -> Option<Arc<dyn ProductListDelegate>> {
        lock(&self.delegate).as_ref().and_then(Weak::upgrade)
    }
}

/// Fails the in-flight request if its task is aborted or panics, so the
/// loading gate reopens
struct CancelGuard {
    owner: Weak<Inner>,
    request: PageRequest,
    armed: bool,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(inner) = self.owner.upgrade() {
            warn!("Page {} load was cancelled", self.request.page_index);
            inner.finish(self.request, Err(Error::Cancelled));
        }
    }
}

async fn fetch(api: &dyn ProductsApi, limit: u32) -> Result<Vec<Product>> {
    let records = api.fetch_products(limit).await?;
    Ok(records.into_iter().map(Product::from).collect())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
