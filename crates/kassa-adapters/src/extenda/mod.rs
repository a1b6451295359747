mod dto;
mod endpoint;
mod gateway;

pub use endpoint::{Endpoint, ServerErrorPolicy};
pub use gateway::ExtendaReportGateway;
