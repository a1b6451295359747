mod credential;
mod sales;
mod sales_summary;
mod time_window;

pub use credential::Credential;
pub use sales::{CategorySale, DailyReport, TenderSale, TurnoverBucket};
pub use sales_summary::{hourly_series, minor_to_major, HourlySlot, SalesSummary};
pub use time_window::{TimeWindow, WindowError};
