use super::dto::{AccountCreated, AddDomainRequest, DomainCreated, ScanCreated, ScanStatusResponse};
use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::domain::model::{AccountId, DomainId, ScanId};
use crate::utils::error::ScanApiError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Value};
use std::str::FromStr;

pub async fn health() -> Json<Value> {
    Json(json!({ "message": "Tropico Demo API is running!" }))
}

pub async fn create_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<AccountCreated>> {
    require_json(&headers)?;

    let account_uid = state.service.create_account().await?;
    tracing::info!(%account_uid, "account created");
    Ok(Json(AccountCreated { account_uid }))
}

pub async fn add_domain(
    State(state): State<AppState>,
    Path(account_uid): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<DomainCreated>> {
    require_json(&headers)?;
    let request: AddDomainRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))?;
    let account_id: AccountId = parse_id("Account", &account_uid)?;

    let domain_uid = state
        .service
        .add_domain(account_id, request.domain_name)
        .await?;
    tracing::info!(%account_id, %domain_uid, "domain registered");
    Ok(Json(DomainCreated { domain_uid }))
}

pub async fn request_scan(
    State(state): State<AppState>,
    Path((account_uid, domain_uid)): Path<(String, String)>,
) -> ApiResult<Json<ScanCreated>> {
    let account_id: AccountId = parse_id("Account", &account_uid)?;
    let domain_id: DomainId = parse_id("Domain", &domain_uid)?;

    let scan_uid = state.service.request_scan(account_id, domain_id).await?;
    tracing::info!(%domain_id, %scan_uid, "scan requested");
    Ok(Json(ScanCreated { scan_uid }))
}

pub async fn scan_status(
    State(state): State<AppState>,
    Path((account_uid, domain_uid, scan_uid)): Path<(String, String, String)>,
) -> ApiResult<Json<ScanStatusResponse>> {
    let account_id: AccountId = parse_id("Account", &account_uid)?;
    let domain_id: DomainId = parse_id("Scan", &domain_uid)?;
    let scan_id: ScanId = parse_id("Scan", &scan_uid)?;

    let view = state
        .service
        .scan_status(account_id, domain_id, scan_id)
        .await?;
    tracing::debug!(%scan_id, status = ?view.status(), "scan status served");
    Ok(Json(view.into()))
}

/// 舊版客戶端只帶 domain id 查詢掃描狀態
pub async fn scan_status_by_domain(
    State(state): State<AppState>,
    Path((account_uid, domain_uid)): Path<(String, String)>,
) -> ApiResult<Json<ScanStatusResponse>> {
    let account_id: AccountId = parse_id("Account", &account_uid)?;
    let domain_id: DomainId = parse_id("Scan", &domain_uid)?;

    let view = state
        .service
        .scan_status_by_domain(account_id, domain_id)
        .await?;
    tracing::debug!(scan_id = %view.scan_id, status = ?view.status(), "scan status served");
    Ok(Json(view.into()))
}

fn require_json(headers: &HeaderMap) -> ApiResult<()> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false);

    if is_json {
        Ok(())
    } else {
        Err(ApiError::bad_request("Invalid content type"))
    }
}

/// Path segments that are not identifiers can never name a stored record.
fn parse_id<T: FromStr>(entity: &'static str, raw: &str) -> Result<T, ScanApiError> {
    raw.parse().map_err(|_| ScanApiError::not_found(entity, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_require_json() {
        let mut headers = HeaderMap::new();
        assert!(require_json(&headers).is_err());

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(require_json(&headers).is_ok());

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(require_json(&headers).is_err());
    }

    #[test]
    fn test_parse_id_maps_garbage_to_not_found() {
        let err = parse_id::<ScanId>("Scan", "nope").unwrap_err();
        assert!(matches!(err, ScanApiError::NotFound { entity: "Scan", .. }));
    }
}
