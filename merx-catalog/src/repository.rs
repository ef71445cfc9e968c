use async_trait::async_trait;
use uuid::Uuid;

use crate::product::Product;

/// Repository trait for product storage. `save` is an upsert: it creates
/// the record on first call and overwrites it afterwards. There is no
/// conditional update; the discount-append path performs a plain
/// read-modify-write with no transactional guarantee between the calls.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn save(
        &self,
        product: &Product,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Product>, Box<dyn std::error::Error + Send + Sync>>;
}
