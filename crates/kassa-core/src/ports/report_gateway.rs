use thiserror::Error;

use crate::domain::{CategorySale, Credential, TenderSale, TimeWindow, TurnoverBucket};

pub const DEFAULT_INTERVAL_GROUPING: u32 = 3600;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportGatewayError {
    #[error("authentication failed (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("credential rejected by {endpoint}")]
    Unauthorized { endpoint: String },

    #[error("request to {endpoint} failed (HTTP {status}): {body}")]
    Fetch {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("parse error: {message}")]
    Parse { message: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ReportGatewayError {
    /// True when the cached credential should no longer be used.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ReportGatewayError::Unauthorized { .. })
    }
}

/// Read-only access to the point-of-sale reporting API.
///
/// Implementations hold no session state: the credential is passed in on
/// every call and owned by the caller.
pub trait ReportGateway: Send + Sync {
    fn acquire_credential(&self) -> Result<Credential, ReportGatewayError>;

    /// Shop-scoped turnover falls back to the global endpoint when the shop
    /// endpoint answers with a server error.
    fn fetch_turnover(
        &self,
        credential: &Credential,
        window: &TimeWindow,
        shop_id: Option<&str>,
        interval_grouping: u32,
    ) -> Result<Vec<TurnoverBucket>, ReportGatewayError>;

    /// A server error means "no data" and yields an empty list.
    fn fetch_category_sales(
        &self,
        credential: &Credential,
        window: &TimeWindow,
        shop_id: Option<&str>,
    ) -> Result<Vec<CategorySale>, ReportGatewayError>;

    /// Always account-wide. A server error yields an empty list.
    fn fetch_tender_sales(
        &self,
        credential: &Credential,
        window: &TimeWindow,
    ) -> Result<Vec<TenderSale>, ReportGatewayError>;

    fn provider_name(&self) -> &'static str;
}
