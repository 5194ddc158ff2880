use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use uuid::Uuid;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.hyphenated().fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

identifier!(
    /// Account identifier. Accounts carry no other data.
    AccountId
);
identifier!(DomainId);
identifier!(ScanId);
identifier!(EndpointId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub id: DomainId,
    pub account_id: AccountId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Production,
    Staging,
    Development,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Production,
        Environment::Staging,
        Environment::Development,
    ];
}

/// A synthetic API-surface finding attached to a completed scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "endpoint_uid")]
    pub id: EndpointId,
    #[serde(rename = "endpoint_name")]
    pub path: String,
    pub hostname: String,
    pub environment: Environment,
    pub framework: String,
    pub api_type: String,
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Pending,
    Completed,
}

/// Lifecycle state of a scan. Results exist only in the completed state, so a
/// record can never be observed with a flipped status but missing endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Pending,
    Completed { endpoints: Vec<Endpoint> },
}

impl ScanState {
    pub fn status(&self) -> ScanStatus {
        match self {
            ScanState::Pending => ScanStatus::Pending,
            ScanState::Completed { .. } => ScanStatus::Completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scan {
    pub id: ScanId,
    pub domain_id: DomainId,
    /// Domain name as it was when the scan was requested.
    pub domain_name: String,
    pub created_at: DateTime<Utc>,
    pub(crate) started_at: Instant,
    pub state: ScanState,
}

impl Scan {
    pub fn view(&self) -> ScanView {
        ScanView {
            scan_id: self.id,
            domain_id: self.domain_id,
            domain_name: self.domain_name.clone(),
            created_at: self.created_at,
            state: self.state.clone(),
        }
    }
}

/// Read-only snapshot of a scan handed out to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanView {
    pub scan_id: ScanId,
    pub domain_id: DomainId,
    pub domain_name: String,
    pub created_at: DateTime<Utc>,
    pub state: ScanState,
}

impl ScanView {
    pub fn status(&self) -> ScanStatus {
        self.state.status()
    }

    pub fn endpoints(&self) -> Option<&[Endpoint]> {
        match &self.state {
            ScanState::Pending => None,
            ScanState::Completed { endpoints } => Some(endpoints),
        }
    }
}

/// Which flavour of synthetic results to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultProfile {
    /// Hostnames derived from the scanned domain, 3 to 10 endpoints.
    #[default]
    Domain,
    /// Hostnames on a fixed placeholder domain, 1 to 5 endpoints.
    Placeholder,
}

impl FromStr for ResultProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domain" => Ok(ResultProfile::Domain),
            "placeholder" => Ok(ResultProfile::Placeholder),
            other => Err(format!(
                "unknown result profile '{}', expected 'domain' or 'placeholder'",
                other
            )),
        }
    }
}
