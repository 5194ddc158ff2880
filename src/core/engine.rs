use crate::core::generator::ResultGenerator;
use crate::core::ids::new_id;
use crate::domain::model::{Domain, DomainId, Scan, ScanId, ScanState, ScanView};
use crate::domain::ports::{Clock, RandomSource};
use crate::utils::error::{Result, ScanApiError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

pub const DEFAULT_PENDING_THRESHOLD: Duration = Duration::from_secs(5);

#[derive(Default)]
struct ScanTable {
    by_id: HashMap<ScanId, Arc<Mutex<Scan>>>,
    /// Scan ids per domain in request order.
    by_domain: HashMap<DomainId, Vec<ScanId>>,
}

/// Owns every scan record and drives the pending -> completed transition.
///
/// Nothing runs in the background: a scan completes on the first status query
/// made after the pending threshold has elapsed. The per-scan lock is held
/// across the check, the result generation and the store, so concurrent
/// pollers see either the pending record or the finished one and results are
/// generated once.
pub struct ScanEngine {
    scans: RwLock<ScanTable>,
    generator: ResultGenerator,
    random: Mutex<Box<dyn RandomSource>>,
    clock: Arc<dyn Clock>,
    pending_threshold: Duration,
}

impl ScanEngine {
    pub fn new(
        generator: ResultGenerator,
        random: Box<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            scans: RwLock::new(ScanTable::default()),
            generator,
            random: Mutex::new(random),
            clock,
            pending_threshold: DEFAULT_PENDING_THRESHOLD,
        }
    }

    pub fn with_pending_threshold(mut self, threshold: Duration) -> Self {
        self.pending_threshold = threshold;
        self
    }

    pub fn pending_threshold(&self) -> Duration {
        self.pending_threshold
    }

    /// Start a scan of `domain`. The domain name is copied into the scan, so
    /// later changes to the domain record do not reach it.
    pub async fn request_scan(&self, domain: &Domain) -> ScanId {
        let scan = Scan {
            id: new_id(),
            domain_id: domain.id,
            domain_name: domain.name.clone(),
            created_at: self.clock.utc_now(),
            started_at: self.clock.now(),
            state: ScanState::Pending,
        };
        let id = scan.id;

        let mut table = self.scans.write().await;
        table.by_id.insert(id, Arc::new(Mutex::new(scan)));
        table.by_domain.entry(domain.id).or_default().push(id);
        id
    }

    pub async fn get_status(&self, scan_id: ScanId) -> Result<ScanView> {
        let entry = self.lookup(scan_id).await?;
        Ok(self.advance(&entry).await)
    }

    /// Like [`ScanEngine::get_status`], but a scan belonging to another domain
    /// is reported as missing.
    pub async fn get_status_scoped(
        &self,
        domain_id: DomainId,
        scan_id: ScanId,
    ) -> Result<ScanView> {
        let entry = self.lookup(scan_id).await?;
        if entry.lock().await.domain_id != domain_id {
            return Err(ScanApiError::not_found("Scan", scan_id));
        }
        Ok(self.advance(&entry).await)
    }

    /// Status of the earliest scan requested for `domain_id`.
    pub async fn get_status_by_domain(&self, domain_id: DomainId) -> Result<ScanView> {
        let entry = {
            let table = self.scans.read().await;
            table
                .by_domain
                .get(&domain_id)
                .and_then(|ids| ids.first())
                .and_then(|id| table.by_id.get(id))
                .cloned()
                .ok_or_else(|| ScanApiError::not_found("Scan", domain_id))?
        };
        Ok(self.advance(&entry).await)
    }

    pub async fn scan_count(&self) -> usize {
        self.scans.read().await.by_id.len()
    }

    async fn lookup(&self, scan_id: ScanId) -> Result<Arc<Mutex<Scan>>> {
        self.scans
            .read()
            .await
            .by_id
            .get(&scan_id)
            .cloned()
            .ok_or_else(|| ScanApiError::not_found("Scan", scan_id))
    }

    async fn advance(&self, entry: &Mutex<Scan>) -> ScanView {
        let mut scan = entry.lock().await;
        let elapsed = self.clock.now().saturating_duration_since(scan.started_at);

        if scan.state == ScanState::Pending && elapsed > self.pending_threshold {
            let endpoints = {
                let mut random = self.random.lock().await;
                self.generator.generate(&scan.domain_name, &mut **random)
            };
            scan.state = ScanState::Completed { endpoints };
        }

        scan.view()
    }
}
