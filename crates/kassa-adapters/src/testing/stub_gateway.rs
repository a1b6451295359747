use kassa_core::{
    CategorySale, Credential, ReportGateway, ReportGatewayError, TenderSale, TimeWindow,
    TurnoverBucket,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory gateway returning canned records and counting calls.
pub struct StubReportGateway {
    turnover: Mutex<Vec<TurnoverBucket>>,
    categories: Mutex<Vec<CategorySale>>,
    tenders: Mutex<Vec<TenderSale>>,
    requested_shops: Mutex<Vec<Option<String>>>,
    token_requests: AtomicUsize,
    report_requests: AtomicUsize,
}

impl StubReportGateway {
    pub fn new() -> Self {
        Self {
            turnover: Mutex::new(Vec::new()),
            categories: Mutex::new(Vec::new()),
            tenders: Mutex::new(Vec::new()),
            requested_shops: Mutex::new(Vec::new()),
            token_requests: AtomicUsize::new(0),
            report_requests: AtomicUsize::new(0),
        }
    }

    pub fn with_report(
        turnover: Vec<TurnoverBucket>,
        categories: Vec<CategorySale>,
        tenders: Vec<TenderSale>,
    ) -> Self {
        let gateway = Self::new();
        gateway.given_turnover(turnover);
        gateway.given_categories(categories);
        gateway.given_tenders(tenders);
        gateway
    }

    pub fn given_turnover(&self, turnover: Vec<TurnoverBucket>) {
        *self.turnover.lock().unwrap() = turnover;
    }

    pub fn given_categories(&self, categories: Vec<CategorySale>) {
        *self.categories.lock().unwrap() = categories;
    }

    pub fn given_tenders(&self, tenders: Vec<TenderSale>) {
        *self.tenders.lock().unwrap() = tenders;
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    pub fn report_requests(&self) -> usize {
        self.report_requests.load(Ordering::SeqCst)
    }

    /// Shop scope of every turnover and category request, in call order.
    pub fn requested_shops(&self) -> Vec<Option<String>> {
        self.requested_shops.lock().unwrap().clone()
    }

    fn record_request(&self, shop_id: Option<&str>) {
        self.report_requests.fetch_add(1, Ordering::SeqCst);
        self.requested_shops
            .lock()
            .unwrap()
            .push(shop_id.map(String::from));
    }
}

impl Default for StubReportGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGateway for StubReportGateway {
    fn acquire_credential(&self) -> Result<Credential, ReportGatewayError> {
        let count = self.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Credential::new(format!("stub-token-{}", count)))
    }

    fn fetch_turnover(
        &self,
        _credential: &Credential,
        _window: &TimeWindow,
        shop_id: Option<&str>,
        interval_grouping: u32,
    ) -> Result<Vec<TurnoverBucket>, ReportGatewayError> {
        if interval_grouping == 0 {
            return Err(ReportGatewayError::InvalidRequest {
                message: "interval_grouping must be greater than zero".to_string(),
            });
        }
        self.record_request(shop_id);
        Ok(self.turnover.lock().unwrap().clone())
    }

    fn fetch_category_sales(
        &self,
        _credential: &Credential,
        _window: &TimeWindow,
        shop_id: Option<&str>,
    ) -> Result<Vec<CategorySale>, ReportGatewayError> {
        self.record_request(shop_id);
        Ok(self.categories.lock().unwrap().clone())
    }

    fn fetch_tender_sales(
        &self,
        _credential: &Credential,
        _window: &TimeWindow,
    ) -> Result<Vec<TenderSale>, ReportGatewayError> {
        self.report_requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.tenders.lock().unwrap().clone())
    }

    fn provider_name(&self) -> &'static str {
        "Stub"
    }
}
