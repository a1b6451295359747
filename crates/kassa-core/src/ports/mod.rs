mod report_gateway;

pub use report_gateway::{ReportGateway, ReportGatewayError, DEFAULT_INTERVAL_GROUPING};
