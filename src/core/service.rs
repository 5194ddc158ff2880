use crate::core::engine::ScanEngine;
use crate::core::generator::{GeneratorSettings, ResultGenerator};
use crate::core::registry::Registry;
use crate::domain::model::{AccountId, DomainId, ScanId, ScanView};
use crate::domain::ports::{Clock, ConfigProvider, RandomSource, ScanService};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The mock scanning backend: account/domain bookkeeping plus the scan engine.
pub struct ScanSimulator {
    registry: Arc<Registry>,
    engine: Arc<ScanEngine>,
}

impl ScanSimulator {
    pub fn new(registry: Arc<Registry>, engine: Arc<ScanEngine>) -> Self {
        Self { registry, engine }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(
        config: &C,
        random: Box<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let settings = GeneratorSettings::for_profile(config.result_profile()).with_overrides(
            config.min_endpoints(),
            config.max_endpoints(),
            config.max_risk_factors(),
        );
        let engine = ScanEngine::new(ResultGenerator::new(settings), random, clock)
            .with_pending_threshold(config.pending_threshold());
        let registry = Registry::new().with_account_enforcement(config.enforce_account_exists());

        Self::new(Arc::new(registry), Arc::new(engine))
    }

    pub fn engine(&self) -> &Arc<ScanEngine> {
        &self.engine
    }
}

#[async_trait]
impl ScanService for ScanSimulator {
    async fn create_account(&self) -> Result<AccountId> {
        Ok(self.registry.create_account().await)
    }

    async fn add_domain(
        &self,
        account_id: AccountId,
        domain_name: Option<String>,
    ) -> Result<DomainId> {
        self.registry.add_domain(account_id, domain_name).await
    }

    async fn request_scan(&self, account_id: AccountId, domain_id: DomainId) -> Result<ScanId> {
        self.registry.ensure_account(account_id).await?;
        let domain = self.registry.get_domain(domain_id).await?;
        Ok(self.engine.request_scan(&domain).await)
    }

    async fn scan_status(
        &self,
        account_id: AccountId,
        domain_id: DomainId,
        scan_id: ScanId,
    ) -> Result<ScanView> {
        self.registry.ensure_account(account_id).await?;
        self.engine.get_status_scoped(domain_id, scan_id).await
    }

    async fn scan_status_by_domain(
        &self,
        account_id: AccountId,
        domain_id: DomainId,
    ) -> Result<ScanView> {
        self.registry.ensure_account(account_id).await?;
        self.engine.get_status_by_domain(domain_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::random::RngSource;
    use crate::domain::model::{ResultProfile, ScanStatus};
    use crate::utils::error::ScanApiError;
    use std::time::Duration;
    use uuid::Uuid;

    struct TestConfig {
        profile: ResultProfile,
        enforce: bool,
    }

    impl ConfigProvider for TestConfig {
        fn bind_address(&self) -> String {
            "127.0.0.1:0".to_string()
        }
        fn bearer_token(&self) -> Option<String> {
            None
        }
        fn pending_threshold(&self) -> Duration {
            Duration::from_secs(5)
        }
        fn result_profile(&self) -> ResultProfile {
            self.profile
        }
        fn min_endpoints(&self) -> Option<usize> {
            None
        }
        fn max_endpoints(&self) -> Option<usize> {
            Some(2)
        }
        fn max_risk_factors(&self) -> Option<usize> {
            None
        }
        fn enforce_account_exists(&self) -> bool {
            self.enforce
        }
    }

    fn simulator(config: &TestConfig, clock: Arc<ManualClock>) -> ScanSimulator {
        ScanSimulator::from_config(config, Box::new(RngSource::seeded(5)), clock)
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let clock = Arc::new(ManualClock::new());
        let config = TestConfig {
            profile: ResultProfile::Domain,
            enforce: false,
        };
        let service = simulator(&config, clock.clone());

        let account = service.create_account().await.unwrap();
        let domain = service
            .add_domain(account, Some("example.com".to_string()))
            .await
            .unwrap();
        let scan = service.request_scan(account, domain).await.unwrap();

        let pending = service.scan_status(account, domain, scan).await.unwrap();
        assert_eq!(pending.status(), ScanStatus::Pending);
        assert_eq!(pending.domain_name, "example.com");

        clock.advance(Duration::from_secs(6));
        let done = service.scan_status(account, domain, scan).await.unwrap();
        assert_eq!(done.status(), ScanStatus::Completed);
        // a ceiling below the profile minimum collapses to the minimum
        assert_eq!(done.endpoints().unwrap().len(), 3);

        let by_domain = service.scan_status_by_domain(account, domain).await.unwrap();
        assert_eq!(by_domain, done);
    }

    #[tokio::test]
    async fn test_request_scan_unknown_domain() {
        let clock = Arc::new(ManualClock::new());
        let config = TestConfig {
            profile: ResultProfile::Placeholder,
            enforce: false,
        };
        let service = simulator(&config, clock);
        let account = service.create_account().await.unwrap();

        let err = service
            .request_scan(account, DomainId::from_uuid(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanApiError::NotFound { entity: "Domain", .. }));
        assert_eq!(service.engine().scan_count().await, 0);
    }

    #[tokio::test]
    async fn test_enforced_accounts_guard_every_operation() {
        let clock = Arc::new(ManualClock::new());
        let config = TestConfig {
            profile: ResultProfile::Domain,
            enforce: true,
        };
        let service = simulator(&config, clock);
        let account = service.create_account().await.unwrap();
        let domain = service
            .add_domain(account, Some("example.com".to_string()))
            .await
            .unwrap();

        let stranger = AccountId::from_uuid(Uuid::new_v4());
        assert!(service.request_scan(stranger, domain).await.is_err());
        assert!(service.scan_status_by_domain(stranger, domain).await.is_err());
        assert!(service.request_scan(account, domain).await.is_ok());
    }
}
