use async_trait::async_trait;

use super::{Account, AccountChanges, NewAccount};
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepositoryInterface: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;
    async fn find_by_emails(&self, emails: &[&str]) -> DomainResult<Vec<Account>>;

    async fn create_account(&self, account: NewAccount) -> DomainResult<Account>;

    /// Applies `changes` atomically. `Ok(None)` when the account does not exist;
    /// `DomainError::NotFound` when a referenced language or role does not resolve,
    /// in which case nothing is written.
    async fn update_account(&self, id: i32, changes: AccountChanges)
        -> DomainResult<Option<Account>>;
}
