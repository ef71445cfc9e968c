pub mod pricing;
pub mod product;
pub mod repository;
pub mod validate;

pub use pricing::compute_final_price;
pub use product::{DiscountKind, DiscountRule, Product, TaxCategory};
pub use repository::ProductRepository;
pub use validate::{DiscountRuleInput, FixedCap, NewProductInput, ValidationError};
