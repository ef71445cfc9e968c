use serde::Deserialize;

use crate::product::{DiscountKind, DiscountRule, Product, TaxCategory};

/// Violations a client request can be rejected for. Each variant carries
/// the human-readable message returned in the 400 body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Base price is required")]
    BasePriceRequired,
    #[error("Base price cannot be negative")]
    NegativeBasePrice,
    #[error("Invalid tax category")]
    InvalidTaxCategory,
    #[error("Invalid discount type.")]
    InvalidDiscountType,
    #[error("Discount value is required")]
    DiscountValueRequired,
    #[error("Discount value must be non-negative.")]
    NegativeDiscountValue,
    #[error("Percentage discounts cannot exceed 50%")]
    PercentageCapExceeded,
    #[error("Fixed discount cannot exceed the base price")]
    FixedCapExceeded,
}

/// Bound applied to a fixed discount relative to the base price. Product
/// creation rejects a fixed discount equal to the base price; appending
/// one to an existing product accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedCap {
    BelowBase,
    AtMostBase,
}

/// Raw product-creation payload. All fields optional so missing ones are
/// reported as specific validation errors instead of body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductInput {
    pub name: Option<String>,
    pub base_price: Option<f64>,
    pub tax_category: Option<String>,
    #[serde(default)]
    pub discount_rules: Vec<DiscountRuleInput>,
}

/// Raw discount-rule payload, either embedded in a creation request or
/// posted on its own to the discount endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscountRuleInput {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<f64>,
    pub stackable: Option<bool>,
}

impl NewProductInput {
    /// Validate a creation request into a fresh `Product`. Checks run in a
    /// fixed order: name, base price, tax category, then each discount
    /// rule in turn.
    pub fn into_product(self) -> Result<Product, ValidationError> {
        let name = match self.name {
            Some(n) if !n.is_empty() => n,
            _ => return Err(ValidationError::NameRequired),
        };

        let base_price = self.base_price.ok_or(ValidationError::BasePriceRequired)?;
        if base_price < 0.0 {
            return Err(ValidationError::NegativeBasePrice);
        }

        let tax_category = self
            .tax_category
            .as_deref()
            .and_then(TaxCategory::parse)
            .ok_or(ValidationError::InvalidTaxCategory)?;

        let mut rules = Vec::with_capacity(self.discount_rules.len());
        for input in self.discount_rules {
            let rule = input.into_rule()?;
            check_caps(&rule, base_price, FixedCap::BelowBase)?;
            rules.push(rule);
        }

        Ok(Product::new(name, base_price, tax_category, rules))
    }
}

impl DiscountRuleInput {
    /// Validate type and value. The base-price-dependent caps are checked
    /// separately via `check_caps`, since on the append path the product
    /// has to be loaded first.
    pub fn into_rule(self) -> Result<DiscountRule, ValidationError> {
        let kind = match self.kind.as_deref() {
            Some("fixed") => DiscountKind::Fixed,
            Some("percentage") => DiscountKind::Percentage,
            _ => return Err(ValidationError::InvalidDiscountType),
        };

        let value = self.value.ok_or(ValidationError::DiscountValueRequired)?;
        if value < 0.0 {
            return Err(ValidationError::NegativeDiscountValue);
        }

        Ok(DiscountRule {
            kind,
            value,
            stackable: self.stackable.unwrap_or(true),
        })
    }
}

/// Enforce the value caps that depend on the product's base price.
pub fn check_caps(
    rule: &DiscountRule,
    base_price: f64,
    cap: FixedCap,
) -> Result<(), ValidationError> {
    match rule.kind {
        DiscountKind::Percentage => {
            if rule.value > 50.0 {
                return Err(ValidationError::PercentageCapExceeded);
            }
        }
        DiscountKind::Fixed => {
            let over = match cap {
                FixedCap::BelowBase => rule.value >= base_price,
                FixedCap::AtMostBase => rule.value > base_price,
            };
            if over {
                return Err(ValidationError::FixedCapExceeded);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, base_price: f64, tax_category: &str) -> NewProductInput {
        NewProductInput {
            name: Some(name.to_string()),
            base_price: Some(base_price),
            tax_category: Some(tax_category.to_string()),
            discount_rules: Vec::new(),
        }
    }

    fn rule_input(kind: &str, value: f64, stackable: Option<bool>) -> DiscountRuleInput {
        DiscountRuleInput {
            kind: Some(kind.to_string()),
            value: Some(value),
            stackable,
        }
    }

    #[test]
    fn valid_input_builds_product() {
        let mut req = input("Lamp", 120.0, "luxury");
        req.discount_rules = vec![rule_input("percentage", 10.0, None)];

        let product = req.into_product().unwrap();
        assert_eq!(product.name, "Lamp");
        assert_eq!(product.base_price, 120.0);
        assert_eq!(product.tax_category, TaxCategory::Luxury);
        assert_eq!(product.discount_rules.len(), 1);
        assert!(product.discount_rules[0].stackable);
    }

    #[test]
    fn missing_or_empty_name_rejected() {
        let mut req = input("Lamp", 120.0, "basic");
        req.name = None;
        assert_eq!(req.into_product(), Err(ValidationError::NameRequired));

        let req = input("", 120.0, "basic");
        assert_eq!(req.into_product(), Err(ValidationError::NameRequired));
    }

    #[test]
    fn negative_base_price_rejected() {
        let req = input("Lamp", -1.0, "basic");
        assert_eq!(req.into_product(), Err(ValidationError::NegativeBasePrice));
    }

    #[test]
    fn missing_base_price_rejected() {
        let mut req = input("Lamp", 0.0, "basic");
        req.base_price = None;
        assert_eq!(req.into_product(), Err(ValidationError::BasePriceRequired));
    }

    #[test]
    fn unknown_tax_category_rejected() {
        let req = input("Lamp", 120.0, "invalid-category");
        assert_eq!(req.into_product(), Err(ValidationError::InvalidTaxCategory));

        let mut req = input("Lamp", 120.0, "basic");
        req.tax_category = None;
        assert_eq!(req.into_product(), Err(ValidationError::InvalidTaxCategory));
    }

    #[test]
    fn bad_discount_type_rejected() {
        assert_eq!(
            rule_input("bogus", 10.0, None).into_rule(),
            Err(ValidationError::InvalidDiscountType)
        );
        assert_eq!(
            DiscountRuleInput::default().into_rule(),
            Err(ValidationError::InvalidDiscountType)
        );
    }

    #[test]
    fn negative_discount_value_rejected() {
        assert_eq!(
            rule_input("fixed", -10.0, None).into_rule(),
            Err(ValidationError::NegativeDiscountValue)
        );
    }

    #[test]
    fn percentage_cap_is_fifty() {
        let rule = rule_input("percentage", 50.0, None).into_rule().unwrap();
        assert!(check_caps(&rule, 100.0, FixedCap::BelowBase).is_ok());

        let rule = rule_input("percentage", 50.5, None).into_rule().unwrap();
        assert_eq!(
            check_caps(&rule, 100.0, FixedCap::BelowBase),
            Err(ValidationError::PercentageCapExceeded)
        );
    }

    #[test]
    fn fixed_cap_excludes_base_at_creation_but_not_append() {
        let rule = rule_input("fixed", 100.0, None).into_rule().unwrap();

        assert_eq!(
            check_caps(&rule, 100.0, FixedCap::BelowBase),
            Err(ValidationError::FixedCapExceeded)
        );
        assert!(check_caps(&rule, 100.0, FixedCap::AtMostBase).is_ok());

        let rule = rule_input("fixed", 100.1, None).into_rule().unwrap();
        assert_eq!(
            check_caps(&rule, 100.0, FixedCap::AtMostBase),
            Err(ValidationError::FixedCapExceeded)
        );
    }

    #[test]
    fn creation_rejects_over_cap_embedded_rule() {
        let mut req = input("Lamp", 100.0, "basic");
        req.discount_rules = vec![rule_input("fixed", 100.0, None)];
        assert_eq!(req.into_product(), Err(ValidationError::FixedCapExceeded));
    }
}
