use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use crate::domain::{CategorySale, Credential, DailyReport, TenderSale, TimeWindow, TurnoverBucket};
use crate::ports::{ReportGateway, ReportGatewayError};

/// A reporting session: one gateway and the credential it was granted.
///
/// The credential is acquired lazily, reused for every report and only
/// dropped through [`ReportSession::invalidate_credential`] or when a report
/// endpoint rejects it.
pub struct ReportSession {
    gateway: Arc<dyn ReportGateway>,
    credential: Mutex<Option<Credential>>,
}

impl ReportSession {
    pub fn new(gateway: Arc<dyn ReportGateway>) -> Self {
        Self {
            gateway,
            credential: Mutex::new(None),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.gateway.provider_name()
    }

    pub fn credential(&self) -> Result<Credential, ReportGatewayError> {
        let mut cached = self.lock_credential();

        if let Some(credential) = cached.as_ref() {
            return Ok(credential.clone());
        }

        let credential = self.gateway.acquire_credential()?;
        info!(provider = self.gateway.provider_name(), "credential acquired");
        *cached = Some(credential.clone());

        Ok(credential)
    }

    pub fn has_credential(&self) -> bool {
        self.lock_credential().is_some()
    }

    pub fn invalidate_credential(&self) {
        self.lock_credential().take();
    }

    pub fn fetch_turnover(
        &self,
        window: &TimeWindow,
        shop_id: Option<&str>,
        interval_grouping: u32,
    ) -> Result<Vec<TurnoverBucket>, ReportGatewayError> {
        let credential = self.credential()?;
        let result = self
            .gateway
            .fetch_turnover(&credential, window, shop_id, interval_grouping);
        self.observe(result)
    }

    pub fn fetch_category_sales(
        &self,
        window: &TimeWindow,
        shop_id: Option<&str>,
    ) -> Result<Vec<CategorySale>, ReportGatewayError> {
        let credential = self.credential()?;
        let result = self
            .gateway
            .fetch_category_sales(&credential, window, shop_id);
        self.observe(result)
    }

    pub fn fetch_tender_sales(
        &self,
        window: &TimeWindow,
    ) -> Result<Vec<TenderSale>, ReportGatewayError> {
        let credential = self.credential()?;
        let result = self.gateway.fetch_tender_sales(&credential, window);
        self.observe(result)
    }

    /// Turnover, category and tender sales for one window, fetched in that
    /// order with a single credential.
    pub fn fetch_daily_report(
        &self,
        window: &TimeWindow,
        shop_id: Option<&str>,
        interval_grouping: u32,
    ) -> Result<DailyReport, ReportGatewayError> {
        let turnover = self.fetch_turnover(window, shop_id, interval_grouping)?;
        let categories = self.fetch_category_sales(window, shop_id)?;
        let tenders = self.fetch_tender_sales(window)?;

        Ok(DailyReport {
            window: *window,
            shop_id: shop_id.map(String::from),
            interval_grouping,
            turnover,
            categories,
            tenders,
        })
    }

    fn observe<T>(&self, result: Result<T, ReportGatewayError>) -> Result<T, ReportGatewayError> {
        if let Err(error) = &result {
            if error.is_unauthorized() {
                info!(%error, "credential rejected, invalidating");
                self.invalidate_credential();
            }
        }
        result
    }

    fn lock_credential(&self) -> MutexGuard<'_, Option<Credential>> {
        self.credential
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
