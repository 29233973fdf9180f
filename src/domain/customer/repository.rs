//! Customer repository interface

use async_trait::async_trait;

use super::model::Customer;
use crate::domain::DomainResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Customer>>;

    /// Save a new customer (used by startup seeding)
    async fn save(&self, customer: Customer) -> DomainResult<()>;

    /// Total number of registered customers
    async fn count(&self) -> DomainResult<u64>;
}
