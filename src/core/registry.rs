use crate::core::ids::new_id;
use crate::domain::model::{AccountId, Domain, DomainId};
use crate::utils::error::{Result, ScanApiError};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// In-memory store of accounts and their registered domains. Records live for
/// the lifetime of the process.
#[derive(Debug, Default)]
pub struct Registry {
    accounts: RwLock<HashSet<AccountId>>,
    domains: RwLock<HashMap<DomainId, Domain>>,
    enforce_account_exists: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject account-scoped operations on accounts this registry never issued.
    pub fn with_account_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_account_exists = enforce;
        self
    }

    pub async fn create_account(&self) -> AccountId {
        let id = new_id();
        self.accounts.write().await.insert(id);
        id
    }

    /// No-op unless account enforcement is on.
    pub async fn ensure_account(&self, account_id: AccountId) -> Result<()> {
        if self.enforce_account_exists && !self.accounts.read().await.contains(&account_id) {
            return Err(ScanApiError::not_found("Account", account_id));
        }
        Ok(())
    }

    pub async fn add_domain(
        &self,
        account_id: AccountId,
        domain_name: Option<String>,
    ) -> Result<DomainId> {
        let name = domain_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ScanApiError::validation("domain_name", "Missing domain name"))?;
        self.ensure_account(account_id).await?;

        let domain = Domain {
            id: new_id(),
            account_id,
            name,
        };
        let id = domain.id;
        self.domains.write().await.insert(id, domain);
        Ok(id)
    }

    pub async fn get_domain(&self, domain_id: DomainId) -> Result<Domain> {
        self.domains
            .read()
            .await
            .get(&domain_id)
            .cloned()
            .ok_or_else(|| ScanApiError::not_found("Domain", domain_id))
    }

    pub async fn domain_count(&self) -> usize {
        self.domains.read().await.len()
    }
}
