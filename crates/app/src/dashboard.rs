//! Portfolio statistics that follow the list's collection.

use std::sync::Arc;

use tokio::sync::watch;

use margin_products::{DashboardStats, Product, aggregate};

use crate::format::{format_currency, format_percentage};

/// Total profit and average margin over whatever the list currently shows.
///
/// Statistics are recomputed only when the collection has been replaced since
/// the last read.
#[derive(Debug)]
pub struct Dashboard {
    products: watch::Receiver<Vec<Arc<Product>>>,
    stats: DashboardStats,
}

impl Dashboard {
    pub fn new(mut products: watch::Receiver<Vec<Arc<Product>>>) -> Self {
        let stats = compute(&products.borrow_and_update());
        Self { products, stats }
    }

    pub fn stats(&mut self) -> DashboardStats {
        self.refresh();
        self.stats
    }

    /// Recompute if the collection changed. Returns whether it did.
    pub fn refresh(&mut self) -> bool {
        if !self.products.has_changed().unwrap_or(false) {
            return false;
        }
        self.stats = compute(&self.products.borrow_and_update());
        tracing::debug!(
            total_profit = self.stats.total_profit,
            avg_margin = self.stats.avg_margin,
            "dashboard recomputed"
        );
        true
    }

    pub fn total_profit_display(&mut self) -> String {
        format_currency(self.stats().total_profit)
    }

    pub fn avg_margin_display(&mut self) -> String {
        format_percentage(self.stats().avg_margin)
    }
}

fn compute(products: &[Arc<Product>]) -> DashboardStats {
    aggregate(products.iter().map(|p| p.as_ref()))
}
