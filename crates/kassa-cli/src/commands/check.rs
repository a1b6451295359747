use anyhow::{bail, Result};
use kassa_core::{ReportGateway, Translator};

use crate::backend;

pub fn execute() -> Result<()> {
    let (config, translator) = backend::load_config()?;
    let gateway = backend::open_gateway(&config, &translator)?;

    println!("{}", verify(&gateway, gateway.base_url(), &translator)?);
    Ok(())
}

/// Requests a credential and describes the outcome. The token is never shown.
fn verify(
    gateway: &dyn ReportGateway,
    base_url: &str,
    translator: &Translator,
) -> Result<String> {
    match gateway.acquire_credential() {
        Ok(_) => Ok(format!(
            "✅ {}",
            translator.format("check.success", &[("url", base_url)])
        )),
        Err(error) => bail!(
            "{}: {}",
            translator.format("check.failure", &[("url", base_url)]),
            error
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kassa_adapters::{FailingReportGateway, StubReportGateway};
    use kassa_core::Language;

    const BASE_URL: &str = "https://pos.example.com";

    #[test]
    fn accepted_credentials_report_success() {
        let gateway = StubReportGateway::new();

        let message = verify(&gateway, BASE_URL, &Translator::new(Language::En)).unwrap();

        assert_eq!(message, "✅ Authenticated against https://pos.example.com");
        assert!(!message.contains("token"));
        assert_eq!(gateway.token_requests(), 1);
    }

    #[test]
    fn rejected_credentials_report_failure_with_status() {
        let gateway = FailingReportGateway::authentication_error(401);

        let error = verify(&gateway, BASE_URL, &Translator::new(Language::En)).unwrap_err();

        let message = error.to_string();
        assert!(message.starts_with("Authentication against https://pos.example.com failed"));
        assert!(message.contains("401"));
        assert_eq!(gateway.report_requests(), 0);
    }

    #[test]
    fn failure_message_is_translated() {
        let gateway = FailingReportGateway::authentication_error(403);

        let error = verify(&gateway, BASE_URL, &Translator::new(Language::Sv)).unwrap_err();

        assert!(error
            .to_string()
            .starts_with("Autentisering mot https://pos.example.com misslyckades"));
    }
}
