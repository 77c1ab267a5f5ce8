use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, EntityTrait, sea_query::OnConflict,
};
use tracing::error;

use crate::{
    domain::{
        barcode::{entities::Product, ports::ProductCache},
        common::entities::app_errors::CoreError,
    },
    entity::barcode_cache::{ActiveModel, Column, Entity},
    infrastructure::db::json::{from_json, to_json},
};

#[derive(Debug, Clone)]
pub struct PostgresProductCache {
    pub db: DatabaseConnection,
}

impl PostgresProductCache {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ProductCache for PostgresProductCache {
    async fn get(&self, barcode: String) -> Result<Option<(Product, DateTime<Utc>)>, CoreError> {
        let entry = Entity::find_by_id(barcode)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to read barcode cache: {}", e);
                CoreError::InternalServerError
            })?;

        entry
            .map(|entry| {
                let product: Product = from_json(entry.product_data, "product_data")?;
                Ok((product, entry.cached_at.to_utc()))
            })
            .transpose()
    }

    async fn put(&self, product: Product, cached_at: DateTime<Utc>) -> Result<(), CoreError> {
        let active_model = ActiveModel {
            barcode: Set(product.barcode.clone()),
            product_data: Set(to_json(&product, "product_data")?),
            cached_at: Set(cached_at.fixed_offset()),
        };

        Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(Column::Barcode)
                    .update_columns([Column::ProductData, Column::CachedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to write barcode cache: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
