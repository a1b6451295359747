mod failing_gateway;
mod stub_gateway;

pub use failing_gateway::FailingReportGateway;
pub use stub_gateway::StubReportGateway;
