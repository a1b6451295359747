/// What a report endpoint's 5xx answer means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerErrorPolicy {
    /// A genuine failure, surfaced as a fetch error.
    Fail,
    /// Some backend instances answer 500 instead of an empty list.
    TreatAsEmpty,
    /// Retry once against another endpoint with identical parameters.
    FallbackTo(&'static Endpoint),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    path: &'static str,
    pub on_server_error: ServerErrorPolicy,
}

pub const TOKEN: Endpoint = Endpoint {
    path: "/auth/token",
    on_server_error: ServerErrorPolicy::Fail,
};

pub const GLOBAL_TURNOVER: Endpoint = Endpoint {
    path: "/turnover",
    on_server_error: ServerErrorPolicy::Fail,
};

pub const SHOP_TURNOVER: Endpoint = Endpoint {
    path: "/shops/{shop_id}/turnover",
    on_server_error: ServerErrorPolicy::FallbackTo(&GLOBAL_TURNOVER),
};

pub const CATEGORY_SALES: Endpoint = Endpoint {
    path: "/category_sales",
    on_server_error: ServerErrorPolicy::TreatAsEmpty,
};

pub const TENDER_TYPE_SALES: Endpoint = Endpoint {
    path: "/tender_type_sales",
    on_server_error: ServerErrorPolicy::TreatAsEmpty,
};

impl Endpoint {
    /// Concrete request path; `{shop_id}` is substituted, percent-encoded,
    /// as a single path segment when present.
    pub fn path(&self, shop_id: Option<&str>) -> String {
        match shop_id {
            Some(shop_id) => self
                .path
                .replace("{shop_id}", &urlencoding::encode(shop_id)),
            None => self.path.to_string(),
        }
    }

    pub fn url(&self, base_url: &str, shop_id: Option<&str>) -> String {
        format!("{}{}", base_url, self.path(shop_id))
    }
}
