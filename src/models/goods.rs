use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::{PredictionBlock, SupplierPerformance};

/// A catalog entry. Derived blocks are computed once at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsRecord {
    pub goods_id: String,
    pub goods_name: String,
    pub cost: BigDecimal,
    pub price: BigDecimal,
    pub date: NaiveDate,
    pub supplier_id: String,
    pub supplier_name: String,
    pub current_price: BigDecimal,
    pub predictions: PredictionBlock,
    pub supplier_performance: SupplierPerformance,
    pub created_at: DateTime<Utc>,
}

/// Raw form submission. Every field arrives as text and may be blank.
///
/// JSON `null` reads as blank and numbers read as their decimal text, so
/// both reach validation instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateGoods {
    #[serde(deserialize_with = "form_text")]
    pub goods_id: String,
    #[serde(deserialize_with = "form_text")]
    pub goods_name: String,
    #[serde(deserialize_with = "form_text")]
    pub cost: String,
    #[serde(deserialize_with = "form_text")]
    pub price: String,
    #[serde(deserialize_with = "form_text")]
    pub date: String,
    #[serde(deserialize_with = "form_text")]
    pub supplier_id: String,
    #[serde(deserialize_with = "form_text")]
    pub supplier_name: String,
}

fn form_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!(
            "expected text or a number, got {}",
            other
        ))),
    }
}

/// Submission after validation, with typed amounts and date.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidGoods {
    pub goods_id: String,
    pub goods_name: String,
    pub cost: BigDecimal,
    pub price: BigDecimal,
    pub date: NaiveDate,
    pub supplier_id: String,
    pub supplier_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceQuery {
    pub currency: Option<String>,
}

/// Current price of a record expressed in another currency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedPrice {
    pub goods_id: String,
    pub currency: String,
    pub rate: f64,
    pub amount: f64,
}
