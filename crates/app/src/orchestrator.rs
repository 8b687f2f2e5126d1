//! Ties the form, the list and the dashboard together.

use std::sync::Arc;

use margin_client::ProductRepository;
use margin_core::ProductId;
use margin_products::{DashboardStats, Field, Product};

use crate::dashboard::Dashboard;
use crate::form::{FormController, FormSignal};
use crate::list::ListController;
use crate::notify::Notifier;

/// Monotonic counter that tells the list to start over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub fn get(self) -> u64 {
        self.0
    }

    pub fn bump(&mut self) {
        self.0 += 1;
    }
}

/// Owns the shared UI state: which product is being edited and the refresh
/// token.
pub struct Orchestrator {
    form: FormController,
    list: ListController,
    dashboard: Dashboard,
    editing_product: Option<Arc<Product>>,
    refresh_token: RefreshToken,
}

impl core::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("form", &self.form)
            .field("list", &self.list)
            .field("editing_product", &self.editing_product)
            .field("refresh_token", &self.refresh_token)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn new(repo: Arc<dyn ProductRepository>, notifier: Arc<dyn Notifier>) -> Self {
        let list = ListController::new(repo.clone(), notifier.clone());
        let dashboard = Dashboard::new(list.subscribe());
        Self {
            form: FormController::new(repo, notifier),
            list,
            dashboard,
            editing_product: None,
            refresh_token: RefreshToken::default(),
        }
    }

    /// Initial load.
    pub async fn mount(&mut self) {
        self.list.remount(self.refresh_token).await;
        self.dashboard.refresh();
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn list(&self) -> &ListController {
        &self.list
    }

    pub fn stats(&mut self) -> DashboardStats {
        self.dashboard.stats()
    }

    pub fn dashboard(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn editing_product(&self) -> Option<&Arc<Product>> {
        self.editing_product.as_ref()
    }

    pub fn refresh_token(&self) -> RefreshToken {
        self.refresh_token
    }

    pub fn start_edit(&mut self, product: Arc<Product>) {
        tracing::debug!(product_id = %product.id, "editing product");
        self.form.bind(Some(product.clone()));
        self.editing_product = Some(product);
    }

    /// Edit the displayed product with `id`. Returns `false` if the list does
    /// not show it.
    pub fn start_edit_by_id(&mut self, id: ProductId) -> bool {
        match self.list.edit(id) {
            Some(product) => {
                self.start_edit(product);
                true
            }
            None => false,
        }
    }

    pub fn field_change(&mut self, field: Field, value: impl Into<String>) {
        self.form.on_field_change(field, value);
    }

    /// Submit the form; a successful save refreshes the list and dashboard.
    pub async fn submit(&mut self) -> Option<FormSignal> {
        let signal = self.form.submit().await;
        if matches!(signal, Some(FormSignal::Saved(_))) {
            self.on_form_saved().await;
        }
        signal
    }

    pub fn cancel(&mut self) -> Option<FormSignal> {
        let signal = self.form.cancel();
        if signal == Some(FormSignal::Cancelled) {
            self.on_form_cancelled();
        }
        signal
    }

    pub async fn on_form_saved(&mut self) {
        self.editing_product = None;
        self.refresh_token.bump();
        tracing::debug!(refresh_token = self.refresh_token.get(), "product saved, refreshing");
        self.list.remount(self.refresh_token).await;
        self.dashboard.refresh();
    }

    pub fn on_form_cancelled(&mut self) {
        self.editing_product = None;
    }

    pub async fn search(&self, term: impl Into<String>) {
        self.list.search(term).await;
    }

    /// Delete through the list. If the deleted product was being edited the
    /// form keeps its buffer; saving it will report the failure.
    pub async fn delete(&mut self, id: ProductId) -> bool {
        let deleted = self.list.delete(id).await;
        self.dashboard.refresh();
        deleted
    }
}
