use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::compute_final_price;

/// Discount kinds supported by the pricing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Fixed,
    Percentage,
}

/// Tax categories a product can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxCategory {
    Basic,
    Luxury,
    ZeroTax,
    /// Catch-all for unrecognized categories found in storage.
    /// These price with no tax applied instead of failing the read.
    #[serde(other)]
    Unknown,
}

impl TaxCategory {
    /// Parse a client-supplied category. Only the three known categories
    /// are accepted here; `Unknown` never enters through this path.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(TaxCategory::Basic),
            "luxury" => Some(TaxCategory::Luxury),
            "zero-tax" => Some(TaxCategory::ZeroTax),
            _ => None,
        }
    }

    pub fn rate(self) -> f64 {
        match self {
            TaxCategory::Basic => 0.10,
            TaxCategory::Luxury => 0.20,
            TaxCategory::ZeroTax | TaxCategory::Unknown => 0.0,
        }
    }
}

/// A single discount entry on a product's rule list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
    #[serde(default = "default_stackable")]
    pub stackable: bool,
}

fn default_stackable() -> bool {
    true
}

/// Core product structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub base_price: f64,
    pub tax_category: TaxCategory,
    pub discount_rules: Vec<DiscountRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: String,
        base_price: f64,
        tax_category: TaxCategory,
        discount_rules: Vec<DiscountRule>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            base_price,
            tax_category,
            discount_rules,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a validated discount rule. A non-stackable rule evicts every
    /// previously stored non-stackable rule, so at most one survives at any
    /// time; stackable rules accumulate in insertion order.
    pub fn apply_discount(&mut self, rule: DiscountRule) {
        if !rule.stackable {
            self.discount_rules.retain(|d| d.stackable);
        }
        self.discount_rules.push(rule);
        self.updated_at = Utc::now();
    }

    /// Current customer-facing price for this product.
    pub fn final_price(&self) -> f64 {
        compute_final_price(self.base_price, &self.discount_rules, self.tax_category)
    }
}
