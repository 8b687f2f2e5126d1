//! Product list: the displayed collection, search and delete.
//!
//! Several requests may be in flight at once (fast typing in the search box,
//! a reload racing a search). Each request takes a ticket when issued; its
//! response is applied only if no newer request was issued since and the
//! search term is still the one it was issued for. The state lock is never
//! held across a repository call.
//!
//! The loading flag counts loads in flight. Each load holds a [`LoadGuard`]
//! that gives its slot back when dropped, so a load abandoned mid-flight
//! (timeout, `select!`, aborted task) does not leave the list loading forever.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, watch};

use margin_client::{ProductRepository, RepositoryResult};
use margin_core::ProductId;
use margin_products::Product;

use crate::format::ProductRow;
use crate::notify::Notifier;
use crate::orchestrator::RefreshToken;

pub const FETCH_FAILED: &str = "Failed to fetch products. Please ensure the backend is running.";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this product?";
pub const DELETE_FAILED: &str = "Failed to delete product";
pub const EMPTY_MESSAGE: &str = "No products found. Add your first product to get started!";

/// What the list area should show, by precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Error(String),
    Empty,
    Table(Vec<ProductRow>),
}

#[derive(Debug, Default)]
struct ListState {
    search_term: String,
    error: Option<String>,
    /// Sequence number of the most recently issued request.
    latest: u64,
    mounted: Option<RefreshToken>,
}

#[derive(Debug, Clone)]
struct Ticket {
    seq: u64,
    term: String,
}

impl ListState {
    fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket {
            seq: self.latest,
            term: self.search_term.clone(),
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest == ticket.seq && self.search_term == ticket.term
    }
}

/// One load in flight.
struct LoadGuard<'a>(&'a AtomicUsize);

impl<'a> LoadGuard<'a> {
    fn start(pending: &'a AtomicUsize) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self(pending)
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct ListController {
    repo: Arc<dyn ProductRepository>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ListState>,
    /// Loads issued but not yet settled or abandoned.
    pending_loads: AtomicUsize,
    products: watch::Sender<Vec<Arc<Product>>>,
}

impl core::fmt::Debug for ListController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListController")
            .field("products", &self.products.borrow().len())
            .finish_non_exhaustive()
    }
}

impl ListController {
    pub fn new(repo: Arc<dyn ProductRepository>, notifier: Arc<dyn Notifier>) -> Self {
        let (products, _) = watch::channel(Vec::new());
        Self {
            repo,
            notifier,
            state: Mutex::new(ListState::default()),
            pending_loads: AtomicUsize::new(0),
            products,
        }
    }

    /// Receive the collection every time it is replaced.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Arc<Product>>> {
        self.products.subscribe()
    }

    /// The displayed collection, in server order.
    pub fn products(&self) -> Vec<Arc<Product>> {
        self.products.borrow().clone()
    }

    pub async fn search_term(&self) -> String {
        self.state.lock().await.search_term.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads.load(Ordering::SeqCst) > 0
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    /// Loading, then error, then the empty state, then the table.
    pub async fn view(&self) -> ListView {
        let state = self.state.lock().await;
        if self.is_loading() {
            return ListView::Loading;
        }
        if let Some(error) = &state.error {
            return ListView::Error(error.clone());
        }
        let products = self.products.borrow();
        if products.is_empty() {
            ListView::Empty
        } else {
            ListView::Table(products.iter().map(|p| ProductRow::from(p.as_ref())).collect())
        }
    }

    fn publish(&self, products: Vec<Product>) {
        self.products
            .send_replace(products.into_iter().map(Arc::new).collect());
    }

    /// Fetch the full collection.
    ///
    /// On failure the previous collection stays and a visible error is set.
    pub async fn load(&self) {
        let (ticket, guard) = {
            let mut state = self.state.lock().await;
            (state.issue(), LoadGuard::start(&self.pending_loads))
        };
        self.load_with(ticket, guard).await;
    }

    /// Fetch for a ticket issued in the same critical section that set the
    /// term, so no other request can slip in between.
    async fn load_with(&self, ticket: Ticket, guard: LoadGuard<'_>) {
        let result = self.repo.list_all().await;
        self.settle_load(ticket, result).await;
        drop(guard);
    }

    async fn settle_load(&self, ticket: Ticket, result: RepositoryResult<Vec<Product>>) {
        let mut state = self.state.lock().await;

        if !state.is_current(&ticket) {
            tracing::debug!("discarding stale product list (request {})", ticket.seq);
            return;
        }

        match result {
            Ok(products) => {
                tracing::debug!("loaded {} products", products.len());
                state.error = None;
                self.publish(products);
            }
            Err(e) => {
                tracing::warn!("error fetching products: {e}");
                state.error = Some(FETCH_FAILED.to_string());
            }
        }
    }

    /// Filter by name.
    ///
    /// The term is recorded immediately. A blank term reloads everything.
    /// Search failures keep the current collection and are only logged, so
    /// typing is never interrupted.
    pub async fn search(&self, term: impl Into<String>) {
        let term = term.into();
        let (ticket, reload) = {
            let mut state = self.state.lock().await;
            state.search_term = term.clone();
            let reload = term
                .trim()
                .is_empty()
                .then(|| LoadGuard::start(&self.pending_loads));
            (state.issue(), reload)
        };

        if let Some(guard) = reload {
            self.load_with(ticket, guard).await;
            return;
        }

        let result = self.repo.search_by_name(&term).await;

        let state = self.state.lock().await;
        if !state.is_current(&ticket) {
            tracing::debug!("discarding stale search results for {:?}", ticket.term);
            return;
        }
        match result {
            Ok(products) => {
                tracing::debug!("search {:?} matched {} products", term, products.len());
                self.publish(products);
            }
            Err(e) => tracing::warn!("error searching products for {term:?}: {e}"),
        }
    }

    /// Delete after explicit confirmation, then reload.
    ///
    /// Returns whether the product was deleted. Nothing is removed locally:
    /// the collection only changes through the reload.
    pub async fn delete(&self, id: ProductId) -> bool {
        if !self.notifier.confirm(DELETE_CONFIRMATION).await {
            tracing::debug!(product_id = %id, "delete declined");
            return false;
        }

        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(product_id = %id, "product deleted");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!(product_id = %id, "error deleting product: {e}");
                self.notifier.alert(DELETE_FAILED);
                false
            }
        }
    }

    /// The displayed product with `id`, shared rather than copied.
    pub fn edit(&self, id: ProductId) -> Option<Arc<Product>> {
        self.products.borrow().iter().find(|p| p.id == id).cloned()
    }

    /// Start over when the refresh token changes: clear the search term and
    /// reload. A token already seen is ignored.
    pub async fn remount(&self, token: RefreshToken) {
        let (ticket, guard) = {
            let mut state = self.state.lock().await;
            if state.mounted == Some(token) {
                return;
            }
            state.mounted = Some(token);
            state.search_term.clear();
            (state.issue(), LoadGuard::start(&self.pending_loads))
        };
        self.load_with(ticket, guard).await;
    }
}
