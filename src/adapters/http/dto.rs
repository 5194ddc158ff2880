use crate::domain::model::{AccountId, DomainId, Endpoint, ScanId, ScanStatus, ScanView};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreated {
    pub account_uid: AccountId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDomainRequest {
    pub domain_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainCreated {
    pub domain_uid: DomainId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanCreated {
    pub scan_uid: ScanId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanStatusResponse {
    pub scan_uid: ScanId,
    pub scan_status: ScanStatus,
    pub domain: ScannedDomain,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedDomain {
    pub domain_uid: DomainId,
    pub name: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,
}

impl From<ScanView> for ScanStatusResponse {
    fn from(view: ScanView) -> Self {
        let scan_status = view.status();
        let endpoints = view.endpoints().map(<[Endpoint]>::to_vec);

        Self {
            scan_uid: view.scan_id,
            scan_status,
            domain: ScannedDomain {
                domain_uid: view.domain_id,
                name: view.domain_name,
                timestamp: view.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
                endpoints,
            },
        }
    }
}
