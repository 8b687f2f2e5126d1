//! Scripted collaborators for controller tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use margin_client::{ProductRepository, RepositoryError, RepositoryResult};
use margin_core::ProductId;
use margin_products::{Product, ProductPayload};

use crate::notify::Notifier;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListAll,
    GetById(ProductId),
    Create(ProductPayload),
    Update(ProductId, ProductPayload),
    Delete(ProductId),
    Search(String),
    ByCategory(String),
}

/// Repository whose responses, failures and timing are set up by the test.
#[derive(Debug, Default)]
pub struct ScriptedRepository {
    calls: Mutex<Vec<Call>>,
    products: Mutex<Vec<Product>>,
    search_results: Mutex<HashMap<String, Vec<Product>>>,
    search_gates: Mutex<HashMap<String, Arc<Notify>>>,
    list_gate: Mutex<Option<Arc<Notify>>>,
    failing: Mutex<HashSet<&'static str>>,
    next_id: AtomicU64,
}

impl ScriptedRepository {
    pub fn with_products(products: Vec<Product>) -> Arc<Self> {
        let repo = Self::default();
        *repo.products.lock().unwrap() = products;
        repo.next_id.store(100, Ordering::SeqCst);
        Arc::new(repo)
    }

    pub fn set_search(&self, term: &str, products: Vec<Product>) {
        self.search_results
            .lock()
            .unwrap()
            .insert(term.to_string(), products);
    }

    /// Hold `search_by_name(term)` until the returned gate is notified.
    pub fn gate_search(&self, term: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.search_gates
            .lock()
            .unwrap()
            .insert(term.to_string(), gate.clone());
        gate
    }

    /// Hold the next `list_all` calls until the returned gate is notified.
    pub fn gate_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.list_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Make an operation (`"list"`, `"create"`, `"update"`, `"delete"`, `"search"`) fail.
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn succeed(&self, op: &'static str) {
        self.failing.lock().unwrap().remove(op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: &'static str) -> RepositoryResult<()> {
        if self.failing.lock().unwrap().contains(op) {
            Err(RepositoryError::Network(format!("{op} unavailable")))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl ProductRepository for ScriptedRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        self.record(Call::ListAll);
        let gate = self.list_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check("list")?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: ProductId) -> RepositoryResult<Product> {
        self.record(Call::GetById(id));
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, payload: &ProductPayload) -> RepositoryResult<Product> {
        self.record(Call::Create(payload.clone()));
        self.check("create")?;
        let id = ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let product = Product::from_payload(id, payload.clone());
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, payload: &ProductPayload) -> RepositoryResult<Product> {
        self.record(Call::Update(id, payload.clone()));
        self.check("update")?;
        let product = Product::from_payload(id, payload.clone());
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == id) {
            Some(slot) => *slot = product.clone(),
            None => return Err(RepositoryError::NotFound),
        }
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<()> {
        self.record(Call::Delete(id));
        self.check("delete")?;
        self.products.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn search_by_name(&self, name: &str) -> RepositoryResult<Vec<Product>> {
        self.record(Call::Search(name.to_string()));
        let gate = self.search_gates.lock().unwrap().get(name).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check("search")?;
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    async fn by_category(&self, category: &str) -> RepositoryResult<Vec<Product>> {
        self.record(Call::ByCategory(category.to_string()));
        Ok(Vec::new())
    }
}

/// Notifier that remembers every alert and answers prompts as configured.
#[derive(Debug)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
    answer: AtomicBool,
}

impl RecordingNotifier {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            alerts: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            answer: AtomicBool::new(answer),
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer.load(Ordering::SeqCst)
    }
}

pub fn product(id: u64, name: &str, cost: f64, selling: f64) -> Product {
    Product::from_payload(
        ProductId::new(id),
        ProductPayload {
            product_name: name.to_string(),
            cost_price: cost,
            selling_price: selling,
            category: String::new(),
            description: String::new(),
        },
    )
}
