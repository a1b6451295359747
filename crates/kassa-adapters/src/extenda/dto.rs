use kassa_core::{CategorySale, TenderSale, TurnoverBucket};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Debug)]
pub struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub scopes: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct TurnoverBucketDto {
    #[serde(default, deserialize_with = "lenient_integer")]
    pub intervals_since_start: i64,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub turnover: i64,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub order_count: i64,
}

impl TurnoverBucketDto {
    pub fn into_turnover_bucket(self) -> TurnoverBucket {
        TurnoverBucket {
            interval_index: self.intervals_since_start,
            turnover: self.turnover,
            order_count: self.order_count,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CategorySaleDto {
    #[serde(default)]
    pub category_name: String,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub turnover: i64,
}

impl CategorySaleDto {
    pub fn into_category_sale(self) -> CategorySale {
        CategorySale {
            category_name: self.category_name,
            turnover: self.turnover,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct TenderSaleDto {
    #[serde(default)]
    pub tender_type: String,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub turnover: i64,
}

impl TenderSaleDto {
    pub fn into_tender_sale(self) -> TenderSale {
        TenderSale {
            tender_type: self.tender_type,
            turnover: self.turnover,
        }
    }
}

/// The backend sends amounts as numbers on some instances and as numeric
/// strings on others. `null` counts as zero.
fn lenient_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.round() as i64))
            .ok_or_else(|| de::Error::custom(format!("integer out of range: {}", number))),
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .or_else(|_| trimmed.parse::<f64>().map(|float| float.round() as i64))
                .map_err(|_| de::Error::custom(format!("not a number: {:?}", text)))
        }
        other => Err(de::Error::custom(format!("expected integer, found {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_turnover_bucket_with_backend_field_names() {
        let json = r#"{"intervals_since_start": 9, "turnover": 125000, "order_count": 4}"#;

        let bucket: TurnoverBucketDto = serde_json::from_str(json).unwrap();

        assert_eq!(
            bucket.into_turnover_bucket(),
            TurnoverBucket {
                interval_index: 9,
                turnover: 125_000,
                order_count: 4,
            }
        );
    }

    #[test]
    fn missing_bucket_fields_default_to_zero() {
        let bucket: TurnoverBucketDto = serde_json::from_str(r#"{"turnover": 500}"#).unwrap();

        assert_eq!(bucket.intervals_since_start, 0);
        assert_eq!(bucket.turnover, 500);
        assert_eq!(bucket.order_count, 0);
    }

    #[test]
    fn numeric_strings_and_nulls_are_accepted() {
        let json = r#"{"category_name": "Bakery", "turnover": "4200"}"#;
        let category: CategorySaleDto = serde_json::from_str(json).unwrap();
        assert_eq!(category.turnover, 4200);

        let json = r#"{"tender_type": "Cash", "turnover": null}"#;
        let tender: TenderSaleDto = serde_json::from_str(json).unwrap();
        assert_eq!(tender.turnover, 0);
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let json = r#"{"category_name": "Bakery", "turnover": "lots"}"#;

        let result: Result<CategorySaleDto, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }

    #[test]
    fn token_request_serializes_client_credentials_grant() {
        let request = TokenRequest {
            grant_type: "client_credentials",
            client_id: "id",
            client_secret: "secret",
            scopes: "public",
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["grant_type"], "client_credentials");
        assert_eq!(json["client_id"], "id");
        assert_eq!(json["client_secret"], "secret");
        assert_eq!(json["scopes"], "public");
    }
}
