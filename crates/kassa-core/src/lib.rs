//! Kassa core library
//!
//! Domain types, the reporting port and its error taxonomy, the credential
//! caching report session, configuration and translations.
//! This crate has no knowledge of HTTP.

pub mod config;
pub mod domain;
pub mod i18n;
pub mod ports;
pub mod report_session;
pub mod secrets;

pub use config::{
    BackendConfig, Config, ConfigError, GeneralConfig, ReportConfig, BASE_URL_ENV,
    DEFAULT_BASE_URL, SHOP_ID_ENV,
};
pub use domain::{
    hourly_series, minor_to_major, CategorySale, Credential, DailyReport, HourlySlot,
    SalesSummary, TenderSale, TimeWindow, TurnoverBucket, WindowError,
};
pub use i18n::{Language, Translator, UnsupportedLanguageError};
pub use ports::{ReportGateway, ReportGatewayError, DEFAULT_INTERVAL_GROUPING};
pub use report_session::ReportSession;
pub use secrets::{resolve_extenda_credentials, ClientCredentials, SecretsError};
