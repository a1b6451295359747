use serde::Serialize;

use super::TimeWindow;

/// One interval of aggregated turnover. `interval_index` counts intervals
/// of the requested grouping since the window start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnoverBucket {
    pub interval_index: i64,
    pub turnover: i64,
    pub order_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySale {
    pub category_name: String,
    pub turnover: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenderSale {
    pub tender_type: String,
    pub turnover: i64,
}

/// The three datasets of one reporting cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub window: TimeWindow,
    pub shop_id: Option<String>,
    pub interval_grouping: u32,
    pub turnover: Vec<TurnoverBucket>,
    pub categories: Vec<CategorySale>,
    pub tenders: Vec<TenderSale>,
}

impl DailyReport {
    pub fn is_empty(&self) -> bool {
        self.turnover.is_empty() && self.categories.is_empty() && self.tenders.is_empty()
    }

    /// Categories ordered by turnover, largest first.
    pub fn categories_by_turnover(&self) -> Vec<&CategorySale> {
        let mut categories: Vec<_> = self.categories.iter().collect();
        categories.sort_by(|a, b| b.turnover.cmp(&a.turnover));
        categories
    }

    pub fn tenders_by_turnover(&self) -> Vec<&TenderSale> {
        let mut tenders: Vec<_> = self.tenders.iter().collect();
        tenders.sort_by(|a, b| b.turnover.cmp(&a.turnover));
        tenders
    }
}
