use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::{
    authentication::value_objects::Identity,
    barcode::entities::{Product, ProductAnalysis},
    common::entities::app_errors::CoreError,
};

/// External product database keyed by barcode.
#[cfg_attr(test, mockall::automock)]
pub trait ProductCatalog: Send + Sync {
    fn lookup(
        &self,
        barcode: String,
    ) -> impl Future<Output = Result<Option<Product>, CoreError>> + Send;
}

/// Stored copies of catalog lookups.
#[cfg_attr(test, mockall::automock)]
pub trait ProductCache: Send + Sync {
    /// The cached product with the time it was stored.
    fn get(
        &self,
        barcode: String,
    ) -> impl Future<Output = Result<Option<(Product, DateTime<Utc>)>, CoreError>> + Send;

    /// Inserts or refreshes the entry for `product.barcode`.
    fn put(
        &self,
        product: Product,
        cached_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait BarcodeService: Send + Sync {
    fn lookup_product(
        &self,
        identity: Identity,
        barcode: String,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    fn analyze_product(
        &self,
        identity: Identity,
        barcode: String,
    ) -> impl Future<Output = Result<ProductAnalysis, CoreError>> + Send;
}
