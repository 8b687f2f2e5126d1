//! Product create/edit form.
//!
//! The form owns an edit buffer of raw strings. Every edit refreshes the live
//! profit/margin preview; submitting validates, normalizes the buffer into a
//! payload and creates or updates the product depending on the mode.

use std::sync::Arc;

use margin_client::ProductRepository;
use margin_products::{
    Derivation, Field, Product, ProductFields, ValidationErrors, validate,
};

use crate::notify::Notifier;

pub const SAVE_FAILED: &str = "Failed to save product. Please try again.";

/// Which product, if any, the form is bound to.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormMode {
    #[default]
    Create,
    /// Bound to a product shared with the list that displays it.
    Edit(Arc<Product>),
}

/// Completion signal for the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSignal {
    /// The product was created or updated; the form is back in create mode.
    Saved(Product),
    /// Editing was abandoned without any repository call.
    Cancelled,
}

pub struct FormController {
    repo: Arc<dyn ProductRepository>,
    notifier: Arc<dyn Notifier>,
    mode: FormMode,
    buffer: ProductFields,
    errors: ValidationErrors,
    preview: Derivation,
}

impl core::fmt::Debug for FormController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FormController")
            .field("mode", &self.mode)
            .field("buffer", &self.buffer)
            .field("errors", &self.errors)
            .field("preview", &self.preview)
            .finish_non_exhaustive()
    }
}

impl FormController {
    pub fn new(repo: Arc<dyn ProductRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repo,
            notifier,
            mode: FormMode::Create,
            buffer: ProductFields::default(),
            errors: ValidationErrors::new(),
            preview: Derivation::default(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn buffer(&self) -> &ProductFields {
        &self.buffer
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn preview(&self) -> Derivation {
        self.preview
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() { "Edit Product" } else { "Add New Product" }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { "Update Product" } else { "Add Product" }
    }

    /// Bind the form to a product (edit mode) or unbind it (create mode).
    ///
    /// Binding copies the product's fields into the buffer; unbinding resets
    /// the buffer to empty defaults. Both clear pending errors.
    pub fn bind(&mut self, product: Option<Arc<Product>>) {
        match product {
            Some(product) => {
                self.buffer = ProductFields::from_product(&product);
                self.mode = FormMode::Edit(product);
                self.errors = ValidationErrors::new();
                self.preview = self.buffer.preview();
            }
            None => self.reset(),
        }
    }

    fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.buffer = ProductFields::default();
        self.errors = ValidationErrors::new();
        self.preview = Derivation::default();
    }

    /// Record an edit. Clears that field's error (others stay until the next
    /// submit) and refreshes the preview.
    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        self.buffer.set(field, value);
        self.errors.clear(field);
        self.preview = self.buffer.preview();
    }

    /// Validate and save.
    ///
    /// Returns `Some(FormSignal::Saved)` on success. Validation failures are
    /// stored in [`errors`](Self::errors) and never reach the repository.
    /// Repository failures alert the user and leave the buffer as it was, so
    /// the same submit can be retried.
    pub async fn submit(&mut self) -> Option<FormSignal> {
        self.errors = validate(&self.buffer);
        if !self.errors.is_empty() {
            tracing::debug!("product form invalid: {}", self.errors);
            return None;
        }

        let payload = match self.buffer.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("product form could not be normalized: {e}");
                return None;
            }
        };

        let result = match &self.mode {
            FormMode::Create => self.repo.create(&payload).await,
            FormMode::Edit(product) => self.repo.update(product.id, &payload).await,
        };

        match result {
            Ok(saved) => {
                tracing::info!(product_id = %saved.id, "product saved");
                self.reset();
                Some(FormSignal::Saved(saved))
            }
            Err(e) => {
                tracing::warn!("failed to save product: {e}");
                self.notifier.alert(SAVE_FAILED);
                None
            }
        }
    }

    /// Abandon editing. Only meaningful in edit mode; a no-op otherwise.
    pub fn cancel(&mut self) -> Option<FormSignal> {
        if !self.is_editing() {
            return None;
        }
        self.reset();
        Some(FormSignal::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use margin_core::ProductId;
    use margin_products::ProductPayload;

    use crate::testing::{Call, RecordingNotifier, ScriptedRepository, product};

    fn form(repo: &Arc<ScriptedRepository>, notifier: &Arc<RecordingNotifier>) -> FormController {
        FormController::new(repo.clone(), notifier.clone())
    }

    fn fill(form: &mut FormController, name: &str, cost: &str, selling: &str) {
        form.on_field_change(Field::ProductName, name);
        form.on_field_change(Field::CostPrice, cost);
        form.on_field_change(Field::SellingPrice, selling);
    }

    #[tokio::test]
    async fn invalid_submit_stores_errors_and_skips_repository() {
        let repo = ScriptedRepository::with_products(vec![]);
        let notifier = RecordingNotifier::answering(true);
        let mut form = form(&repo, &notifier);

        assert_eq!(form.submit().await, None);
        assert_eq!(form.errors().len(), 3);
        assert!(repo.calls().is_empty());
        assert!(notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn editing_a_field_clears_only_its_error() {
        let repo = ScriptedRepository::with_products(vec![]);
        let notifier = RecordingNotifier::answering(true);
        let mut form = form(&repo, &notifier);

        form.submit().await;
        form.on_field_change(Field::ProductName, "L");

        assert!(!form.errors().contains(Field::ProductName));
        assert!(form.errors().contains(Field::CostPrice));
        assert!(form.errors().contains(Field::SellingPrice));
    }

    #[tokio::test]
    async fn valid_create_calls_create_once_and_resets() {
        let repo = ScriptedRepository::with_products(vec![]);
        let notifier = RecordingNotifier::answering(true);
        let mut form = form(&repo, &notifier);

        fill(&mut form, "Laptop", "100", "150");
        let signal = form.submit().await;

        assert_eq!(
            repo.calls(),
            vec![Call::Create(ProductPayload {
                product_name: "Laptop".to_string(),
                cost_price: 100.0,
                selling_price: 150.0,
                category: String::new(),
                description: String::new(),
            })]
        );
        match signal {
            Some(FormSignal::Saved(saved)) => assert_eq!(saved.product_name, "Laptop"),
            other => panic!("Expected Saved signal, got {other:?}"),
        }
        assert_eq!(form.buffer(), &ProductFields::default());
        assert_eq!(form.mode(), &FormMode::Create);
        assert_eq!(form.preview(), Derivation::default());
    }

    #[tokio::test]
    async fn valid_edit_updates_bound_id_and_keeps_other_fields() {
        let mut existing = product(12, "Old", 10.0, 15.0);
        existing.category = Some("Office".to_string());
        existing.description = Some("Ergonomic".to_string());
        let repo = ScriptedRepository::with_products(vec![existing.clone()]);
        let notifier = RecordingNotifier::answering(true);
        let mut form = form(&repo, &notifier);

        form.bind(Some(Arc::new(existing)));
        assert_eq!(form.submit_label(), "Update Product");
        form.on_field_change(Field::ProductName, "Updated");
        let signal = form.submit().await;

        assert_eq!(
            repo.calls(),
            vec![Call::Update(
                ProductId::new(12),
                ProductPayload {
                    product_name: "Updated".to_string(),
                    cost_price: 10.0,
                    selling_price: 15.0,
                    category: "Office".to_string(),
                    description: "Ergonomic".to_string(),
                }
            )]
        );
        assert!(matches!(signal, Some(FormSignal::Saved(ref p)) if p.id == ProductId::new(12)));
        assert!(!form.is_editing());
    }

    #[tokio::test]
    async fn failed_save_alerts_and_keeps_buffer() {
        let existing = product(3, "Desk", 50.0, 80.0);
        let repo = ScriptedRepository::with_products(vec![existing.clone()]);
        repo.fail("update");
        let notifier = RecordingNotifier::answering(true);
        let mut form = form(&repo, &notifier);

        form.bind(Some(Arc::new(existing)));
        form.on_field_change(Field::SellingPrice, "90");
        let before = form.buffer().clone();

        assert_eq!(form.submit().await, None);
        assert_eq!(notifier.alerts(), vec![SAVE_FAILED.to_string()]);
        assert_eq!(form.buffer(), &before);
        assert!(form.is_editing());

        // Retry succeeds once the backend recovers.
        repo.succeed("update");
        assert!(matches!(form.submit().await, Some(FormSignal::Saved(_))));
    }

    #[test]
    fn cancel_only_applies_in_edit_mode() {
        let repo = ScriptedRepository::with_products(vec![]);
        let notifier = RecordingNotifier::answering(true);
        let mut form = form(&repo, &notifier);

        assert_eq!(form.cancel(), None);

        form.bind(Some(Arc::new(product(4, "Chair", 20.0, 45.0))));
        assert_eq!(form.title(), "Edit Product");
        assert_eq!(form.cancel(), Some(FormSignal::Cancelled));
        assert_eq!(form.buffer(), &ProductFields::default());
        assert_eq!(form.title(), "Add New Product");
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn preview_follows_every_edit() {
        let repo = ScriptedRepository::with_products(vec![]);
        let notifier = RecordingNotifier::answering(true);
        let mut form = form(&repo, &notifier);

        form.on_field_change(Field::CostPrice, "100");
        assert_eq!(form.preview().profit, -100.0);
        form.on_field_change(Field::SellingPrice, "125");
        assert_eq!(form.preview().profit, 25.0);
        assert_eq!(form.preview().margin, 25.0);
        form.on_field_change(Field::CostPrice, "oops");
        assert_eq!(form.preview().profit, 125.0);
        assert_eq!(form.preview().margin, 0.0);
    }

    #[tokio::test]
    async fn binding_populates_buffer_and_unbinding_clears_errors() {
        let repo = ScriptedRepository::with_products(vec![]);
        let notifier = RecordingNotifier::answering(true);
        let mut form = form(&repo, &notifier);

        form.bind(Some(Arc::new(product(9, "Lamp", 20.0, 35.0))));
        assert_eq!(form.buffer().product_name, "Lamp");
        assert_eq!(form.buffer().cost_price, "20");
        assert_eq!(form.buffer().selling_price, "35");
        assert_eq!(form.preview().profit, 15.0);

        form.on_field_change(Field::ProductName, "");
        form.submit().await;
        assert!(form.errors().contains(Field::ProductName));

        form.bind(None);
        assert!(form.errors().is_empty());
        assert_eq!(form.buffer(), &ProductFields::default());
    }
}
