use kassa_core::{
    CategorySale, Credential, ReportGateway, ReportGatewayError, TenderSale, TimeWindow,
    TurnoverBucket,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Gateway whose token request succeeds and whose reports all fail, or
/// whose token request itself fails.
pub struct FailingReportGateway {
    error: ReportGatewayError,
    fail_authentication: bool,
    report_requests: AtomicUsize,
}

impl FailingReportGateway {
    pub fn authentication_error(status: u16) -> Self {
        Self {
            error: ReportGatewayError::Authentication {
                status,
                body: "invalid_client".to_string(),
            },
            fail_authentication: true,
            report_requests: AtomicUsize::new(0),
        }
    }

    pub fn network_error() -> Self {
        Self::with_error(ReportGatewayError::Network {
            message: "connection refused".to_string(),
        })
    }

    pub fn fetch_error(endpoint: &str, status: u16) -> Self {
        Self::with_error(ReportGatewayError::Fetch {
            endpoint: endpoint.to_string(),
            status,
            body: String::new(),
        })
    }

    pub fn with_error(error: ReportGatewayError) -> Self {
        Self {
            error,
            fail_authentication: false,
            report_requests: AtomicUsize::new(0),
        }
    }

    pub fn report_requests(&self) -> usize {
        self.report_requests.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, ReportGatewayError> {
        self.report_requests.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

impl ReportGateway for FailingReportGateway {
    fn acquire_credential(&self) -> Result<Credential, ReportGatewayError> {
        if self.fail_authentication {
            return Err(self.error.clone());
        }
        Ok(Credential::new("failing-token"))
    }

    fn fetch_turnover(
        &self,
        _credential: &Credential,
        _window: &TimeWindow,
        _shop_id: Option<&str>,
        _interval_grouping: u32,
    ) -> Result<Vec<TurnoverBucket>, ReportGatewayError> {
        self.fail()
    }

    fn fetch_category_sales(
        &self,
        _credential: &Credential,
        _window: &TimeWindow,
        _shop_id: Option<&str>,
    ) -> Result<Vec<CategorySale>, ReportGatewayError> {
        self.fail()
    }

    fn fetch_tender_sales(
        &self,
        _credential: &Credential,
        _window: &TimeWindow,
    ) -> Result<Vec<TenderSale>, ReportGatewayError> {
        self.fail()
    }

    fn provider_name(&self) -> &'static str {
        "Failing"
    }
}
