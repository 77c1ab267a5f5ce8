use chrono::{Duration, Utc};
use tracing::{debug, instrument, warn};

use crate::domain::{
    barcode::{
        entities::Product,
        ports::{ProductCache, ProductCatalog},
    },
    common::entities::app_errors::CoreError,
};

/// Read-through cache in front of a product catalog.
///
/// Only found products are stored. A failing cache never fails the lookup:
/// reads fall through to the catalog and writes are dropped with a warning.
#[derive(Debug, Clone)]
pub struct CachedProductCatalog<C, S> {
    catalog: C,
    cache: S,
    ttl: Duration,
}

impl<C, S> CachedProductCatalog<C, S> {
    pub fn new(catalog: C, cache: S, ttl_hours: i64) -> Self {
        Self {
            catalog,
            cache,
            ttl: Duration::hours(ttl_hours.max(0)),
        }
    }
}

impl<C, S> ProductCatalog for CachedProductCatalog<C, S>
where
    C: ProductCatalog,
    S: ProductCache,
{
    #[instrument(skip(self))]
    async fn lookup(&self, barcode: String) -> Result<Option<Product>, CoreError> {
        match self.cache.get(barcode.clone()).await {
            Ok(Some((product, cached_at))) if Utc::now() - cached_at < self.ttl => {
                debug!("Barcode cache hit");
                return Ok(Some(product));
            }
            Ok(_) => {}
            Err(e) => warn!("Barcode cache read failed: {}", e),
        }

        let product = self.catalog.lookup(barcode).await?;

        if let Some(product) = &product {
            if let Err(e) = self.cache.put(product.clone(), Utc::now()).await {
                warn!("Barcode cache write failed: {}", e);
            }
        }

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use chrono::DateTime;

    use super::*;
    use crate::domain::barcode::entities::NutritionInfo;

    #[derive(Clone, Default)]
    struct CountingCatalog {
        products: HashMap<String, Product>,
        calls: Arc<AtomicUsize>,
    }

    impl ProductCatalog for CountingCatalog {
        async fn lookup(&self, barcode: String) -> Result<Option<Product>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.products.get(&barcode).cloned())
        }
    }

    #[derive(Clone, Default)]
    struct MemoryCache {
        entries: Arc<Mutex<HashMap<String, (Product, DateTime<Utc>)>>>,
        broken: bool,
    }

    impl ProductCache for MemoryCache {
        async fn get(&self, barcode: String) -> Result<Option<(Product, DateTime<Utc>)>, CoreError> {
            if self.broken {
                return Err(CoreError::InternalServerError);
            }
            Ok(self.entries.lock().unwrap().get(&barcode).cloned())
        }

        async fn put(&self, product: Product, cached_at: DateTime<Utc>) -> Result<(), CoreError> {
            if self.broken {
                return Err(CoreError::InternalServerError);
            }
            self.entries
                .lock()
                .unwrap()
                .insert(product.barcode.clone(), (product, cached_at));
            Ok(())
        }
    }

    const BARCODE: &str = "3017620422003";

    fn spread() -> Product {
        Product {
            barcode: BARCODE.to_string(),
            name: "Hazelnut spread".to_string(),
            brand: "Acme".to_string(),
            quantity: "400 g".to_string(),
            categories: vec![],
            ingredients_text: "sugar, palm oil, hazelnuts".to_string(),
            ingredients_list: vec![],
            allergens: vec![],
            allergens_text: String::new(),
            nutrition: NutritionInfo::default(),
            nutriscore: None,
            nova_group: None,
            image_url: None,
            image_small_url: None,
        }
    }

    fn catalog() -> CountingCatalog {
        CountingCatalog {
            products: HashMap::from([(BARCODE.to_string(), spread())]),
            ..CountingCatalog::default()
        }
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let inner = catalog();
        let cached = CachedProductCatalog::new(inner.clone(), MemoryCache::default(), 24);

        let first = cached.lookup(BARCODE.to_string()).await.unwrap();
        let second = cached.lookup(BARCODE.to_string()).await.unwrap();

        assert_eq!(first, Some(spread()));
        assert_eq!(second, first);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_is_refetched() {
        let inner = catalog();
        let cache = MemoryCache::default();
        cache.entries.lock().unwrap().insert(
            BARCODE.to_string(),
            (spread(), Utc::now() - Duration::hours(25)),
        );
        let cached = CachedProductCatalog::new(inner.clone(), cache.clone(), 24);

        cached.lookup(BARCODE.to_string()).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        let (_, refreshed_at) = cache.entries.lock().unwrap()[BARCODE].clone();
        assert!(Utc::now() - refreshed_at < Duration::minutes(1));
    }

    #[tokio::test]
    async fn test_unknown_products_are_not_cached() {
        let inner = catalog();
        let cache = MemoryCache::default();
        let cached = CachedProductCatalog::new(inner.clone(), cache.clone(), 24);

        assert_eq!(cached.lookup("00000000".to_string()).await.unwrap(), None);
        assert_eq!(cached.lookup("00000000".to_string()).await.unwrap(), None);

        assert!(cache.entries.lock().unwrap().is_empty());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_broken_cache_falls_through_to_catalog() {
        let inner = catalog();
        let cache = MemoryCache {
            broken: true,
            ..MemoryCache::default()
        };
        let cached = CachedProductCatalog::new(inner.clone(), cache, 24);

        let product = cached.lookup(BARCODE.to_string()).await.unwrap();

        assert_eq!(product, Some(spread()));
    }
}
