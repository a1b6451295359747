use kassa_core::{
    BackendConfig, CategorySale, ClientCredentials, Credential, ReportGateway, ReportGatewayError,
    TenderSale, TimeWindow, TurnoverBucket,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::dto::{CategorySaleDto, TenderSaleDto, TokenRequest, TokenResponse, TurnoverBucketDto};
use super::endpoint::{
    Endpoint, ServerErrorPolicy, CATEGORY_SALES, GLOBAL_TURNOVER, SHOP_TURNOVER,
    TENDER_TYPE_SALES, TOKEN,
};

const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Blocking client for the Extenda (Wallmob) retail reporting API.
pub struct ExtendaReportGateway {
    agent: ureq::Agent,
    base_url: String,
    scopes: String,
    credentials: ClientCredentials,
}

impl ExtendaReportGateway {
    pub fn new(backend: &BackendConfig, credentials: ClientCredentials) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(backend.timeout())
            .build();

        Self {
            agent,
            base_url: backend.base_url.trim_end_matches('/').to_string(),
            scopes: backend.scopes.clone(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs a list endpoint, applying the endpoint's server-error policy.
    fn fetch_list<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        credential: &Credential,
        shop_id: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ReportGatewayError> {
        let path = endpoint.path(shop_id);
        let request = query.iter().fold(
            self.agent
                .get(&endpoint.url(&self.base_url, shop_id))
                .set("Authorization", &credential.authorization_header()),
            |request, (name, value)| request.query(name, value),
        );

        match request.call() {
            Ok(response) => {
                let body = response
                    .into_json::<Value>()
                    .map_err(|error| ReportGatewayError::Parse {
                        message: format!("{}: {}", path, error),
                    })?;
                parse_list(&path, body)
            }
            Err(ureq::Error::Status(401, _)) => {
                Err(ReportGatewayError::Unauthorized { endpoint: path })
            }
            Err(ureq::Error::Status(status, response)) if status >= 500 => {
                let body = response.into_string().unwrap_or_default();
                match endpoint.on_server_error {
                    ServerErrorPolicy::Fail => Err(ReportGatewayError::Fetch {
                        endpoint: path,
                        status,
                        body,
                    }),
                    ServerErrorPolicy::TreatAsEmpty => {
                        tracing::warn!(endpoint = %path, status, "server error treated as no data");
                        Ok(Vec::new())
                    }
                    ServerErrorPolicy::FallbackTo(fallback) => {
                        tracing::warn!(
                            endpoint = %path,
                            fallback = %fallback.path(None),
                            status,
                            "server error, falling back"
                        );
                        self.fetch_list(fallback, credential, None, query)
                    }
                }
            }
            Err(ureq::Error::Status(status, response)) => Err(ReportGatewayError::Fetch {
                endpoint: path,
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(transport)) => Err(ReportGatewayError::Network {
                message: format!("{}: {}", path, transport),
            }),
        }
    }
}

/// Only a JSON array carries records; anything else on a 2xx is no data.
fn parse_list<T: DeserializeOwned>(path: &str, body: Value) -> Result<Vec<T>, ReportGatewayError> {
    if !body.is_array() {
        tracing::debug!(endpoint = path, %body, "non-list body treated as no data");
        return Ok(Vec::new());
    }

    serde_json::from_value(body).map_err(|error| ReportGatewayError::Parse {
        message: format!("{}: {}", path, error),
    })
}

/// Blank ids mean no shop scope. Dot segments would be resolved away by the
/// URL parser and land on another route, so they are refused.
fn shop_scope(shop_id: Option<&str>) -> Result<Option<&str>, ReportGatewayError> {
    match shop_id.filter(|shop_id| !shop_id.trim().is_empty()) {
        Some(shop_id @ ("." | "..")) => Err(ReportGatewayError::InvalidRequest {
            message: format!("invalid shop id: {:?}", shop_id),
        }),
        scope => Ok(scope),
    }
}

fn window_query(window: &TimeWindow) -> Vec<(&'static str, String)> {
    vec![
        ("starttime", window.start_timestamp().to_string()),
        ("endtime", window.end_timestamp().to_string()),
    ]
}

impl ReportGateway for ExtendaReportGateway {
    fn acquire_credential(&self) -> Result<Credential, ReportGatewayError> {
        let request = TokenRequest {
            grant_type: CLIENT_CREDENTIALS_GRANT,
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
            scopes: &self.scopes,
        };

        let response = self
            .agent
            .post(&TOKEN.url(&self.base_url, None))
            .set("Content-Type", "application/json")
            .send_json(&request)
            .map_err(|error| match error {
                ureq::Error::Status(status, response) => ReportGatewayError::Authentication {
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(transport) => ReportGatewayError::Network {
                    message: transport.to_string(),
                },
            })?;

        let token = response
            .into_json::<TokenResponse>()
            .map_err(|error| ReportGatewayError::Parse {
                message: error.to_string(),
            })?
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ReportGatewayError::Parse {
                message: "token response without access_token".to_string(),
            })?;

        Ok(Credential::new(token))
    }

    fn fetch_turnover(
        &self,
        credential: &Credential,
        window: &TimeWindow,
        shop_id: Option<&str>,
        interval_grouping: u32,
    ) -> Result<Vec<TurnoverBucket>, ReportGatewayError> {
        if interval_grouping == 0 {
            return Err(ReportGatewayError::InvalidRequest {
                message: "interval_grouping must be greater than zero".to_string(),
            });
        }

        let shop_id = shop_scope(shop_id)?;
        let mut query = window_query(window);
        query.push(("interval_grouping", interval_grouping.to_string()));

        let endpoint = match shop_id {
            Some(_) => &SHOP_TURNOVER,
            None => &GLOBAL_TURNOVER,
        };

        let buckets: Vec<TurnoverBucketDto> =
            self.fetch_list(endpoint, credential, shop_id, &query)?;

        tracing::debug!(bucket_count = buckets.len(), ?shop_id, "fetched turnover");

        Ok(buckets
            .into_iter()
            .map(TurnoverBucketDto::into_turnover_bucket)
            .collect())
    }

    fn fetch_category_sales(
        &self,
        credential: &Credential,
        window: &TimeWindow,
        shop_id: Option<&str>,
    ) -> Result<Vec<CategorySale>, ReportGatewayError> {
        let shop_id = shop_scope(shop_id)?;
        let mut query = window_query(window);
        if let Some(shop_id) = shop_id {
            query.push(("shopid", shop_id.to_string()));
        }

        let categories: Vec<CategorySaleDto> =
            self.fetch_list(&CATEGORY_SALES, credential, None, &query)?;

        tracing::debug!(category_count = categories.len(), ?shop_id, "fetched category sales");

        Ok(categories
            .into_iter()
            .map(CategorySaleDto::into_category_sale)
            .collect())
    }

    fn fetch_tender_sales(
        &self,
        credential: &Credential,
        window: &TimeWindow,
    ) -> Result<Vec<TenderSale>, ReportGatewayError> {
        let tenders: Vec<TenderSaleDto> =
            self.fetch_list(&TENDER_TYPE_SALES, credential, None, &window_query(window))?;

        tracing::debug!(tender_count = tenders.len(), "fetched tender type sales");

        Ok(tenders
            .into_iter()
            .map(TenderSaleDto::into_tender_sale)
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "Extenda"
    }
}
