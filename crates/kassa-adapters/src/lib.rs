//! Kassa adapters - backend implementations
//!
//! Concrete implementations of the reporting port defined in kassa-core,
//! plus in-memory doubles for tests.

pub mod extenda;
pub mod testing;

pub use extenda::ExtendaReportGateway;
pub use testing::{FailingReportGateway, StubReportGateway};
