use crate::domain::model::{AccountId, DomainId, ResultProfile, ScanId, ScanView};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

/// Source of randomness for synthetic results.
///
/// Callers clamp whatever comes back, so a misbehaving source can skew the
/// distribution but never break count or uniqueness guarantees.
pub trait RandomSource: Send {
    /// Uniform value in `range` (inclusive on both ends).
    fn pick_in_range(&mut self, range: RangeInclusive<usize>) -> usize;

    fn pick_index(&mut self, len: usize) -> usize {
        self.pick_in_range(0..=len.saturating_sub(1))
    }
}

pub trait Clock: Send + Sync {
    /// Monotonic instant used for elapsed-time checks.
    fn now(&self) -> Instant;
    /// Wall-clock time used for display timestamps.
    fn utc_now(&self) -> DateTime<Utc>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> String;
    fn bearer_token(&self) -> Option<String>;
    fn pending_threshold(&self) -> Duration;
    fn result_profile(&self) -> ResultProfile;
    fn min_endpoints(&self) -> Option<usize>;
    fn max_endpoints(&self) -> Option<usize>;
    fn max_risk_factors(&self) -> Option<usize>;
    fn enforce_account_exists(&self) -> bool;
}

#[async_trait]
pub trait ScanService: Send + Sync {
    async fn create_account(&self) -> Result<AccountId>;

    async fn add_domain(&self, account_id: AccountId, domain_name: Option<String>)
        -> Result<DomainId>;

    async fn request_scan(&self, account_id: AccountId, domain_id: DomainId) -> Result<ScanId>;

    async fn scan_status(
        &self,
        account_id: AccountId,
        domain_id: DomainId,
        scan_id: ScanId,
    ) -> Result<ScanView>;

    /// Status of the earliest scan requested for `domain_id`.
    async fn scan_status_by_domain(
        &self,
        account_id: AccountId,
        domain_id: DomainId,
    ) -> Result<ScanView>;
}
