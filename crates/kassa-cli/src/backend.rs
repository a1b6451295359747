use std::sync::Arc;

use anyhow::{Context, Result};
use kassa_adapters::ExtendaReportGateway;
use kassa_core::{resolve_extenda_credentials, Config, ReportSession, Translator};

pub fn open_gateway(config: &Config, translator: &Translator) -> Result<ExtendaReportGateway> {
    let credentials =
        resolve_extenda_credentials().with_context(|| translator.get("error.credentials_missing"))?;

    Ok(ExtendaReportGateway::new(&config.backend, credentials))
}

pub fn open_session(config: &Config, translator: &Translator) -> Result<ReportSession> {
    let gateway = open_gateway(config, translator)?;
    Ok(ReportSession::new(Arc::new(gateway)))
}

pub fn load_config() -> Result<(Config, Translator)> {
    let config = Config::load_with_environment()
        .with_context(|| Translator::default().get("error.config_load"))?;
    let translator = Translator::new(config.general.language);
    Ok((config, translator))
}
