use crate::product::{DiscountKind, DiscountRule, TaxCategory};

/// Compute the customer-facing price from a base price, the product's
/// discount rules, and its tax category.
///
/// Stackable rules apply first, then non-stackable ones, each partition in
/// insertion order. Percentage discounts compound against the running
/// price, not the base. The discounted price is clamped at zero before tax
/// is added. Plain `f64` arithmetic throughout; no rounding is applied.
pub fn compute_final_price(
    base_price: f64,
    rules: &[DiscountRule],
    tax_category: TaxCategory,
) -> f64 {
    let mut price = base_price;

    for rule in rules.iter().filter(|r| r.stackable) {
        price = apply_rule(price, rule);
    }

    for rule in rules.iter().filter(|r| !r.stackable) {
        price = apply_rule(price, rule);
    }

    price = price.max(0.0);

    price + price * tax_category.rate()
}

fn apply_rule(price: f64, rule: &DiscountRule) -> f64 {
    match rule.kind {
        DiscountKind::Fixed => price - rule.value,
        DiscountKind::Percentage => price - price * (rule.value / 100.0),
    }
}
