use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use merx_catalog::{DiscountRule, Product, ProductRepository, TaxCategory};

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    base_price: f64,
    tax_category: String,
    discount_rules: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, Box<dyn std::error::Error + Send + Sync>> {
        // Unrecognized stored categories map to Unknown (priced with no
        // tax) instead of failing the read.
        let tax_category =
            TaxCategory::parse(&self.tax_category).unwrap_or(TaxCategory::Unknown);
        let discount_rules: Vec<DiscountRule> = serde_json::from_value(self.discount_rules)?;

        Ok(Product {
            id: self.id,
            name: self.name,
            base_price: self.base_price,
            tax_category,
            discount_rules,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn tax_category_column(category: TaxCategory) -> &'static str {
    match category {
        TaxCategory::Basic => "basic",
        TaxCategory::Luxury => "luxury",
        TaxCategory::ZeroTax => "zero-tax",
        TaxCategory::Unknown => "unknown",
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn save(
        &self,
        product: &Product,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let discount_rules = serde_json::to_value(&product.discount_rules)?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, base_price, tax_category, discount_rules, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                base_price = EXCLUDED.base_price,
                tax_category = EXCLUDED.tax_category,
                discount_rules = EXCLUDED.discount_rules,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.base_price)
        .bind(tax_category_column(product.tax_category))
        .bind(discount_rules)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Product>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, base_price, tax_category, discount_rules, created_at, updated_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row.into_product()?)),
            None => Ok(None),
        }
    }
}
