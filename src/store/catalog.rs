use std::collections::HashMap;
use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::errors::{AppError, ValidationErrors};
use crate::models::{CreateGoods, GoodsRecord, SupplierHistory, ValidGoods};
use crate::services::forecasting_service::Forecaster;
use crate::services::supplier_risk_service::SupplierClassifier;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Append-only, insertion-ordered catalog keyed by `goods_id`.
///
/// Records are never updated or removed once added.
#[derive(Debug, Default)]
pub struct CatalogStore {
    records: Vec<GoodsRecord>,
    index: HashMap<String, usize>,
    forecaster: Forecaster,
    classifier: SupplierClassifier,
}

impl CatalogStore {
    pub fn new(forecaster: Forecaster, classifier: SupplierClassifier) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            forecaster,
            classifier,
        }
    }

    pub fn forecaster(&self) -> &Forecaster {
        &self.forecaster
    }

    pub fn classifier(&self) -> &SupplierClassifier {
        &self.classifier
    }

    /// Validate a submission, derive its prediction and supplier blocks and
    /// append it. On any error the catalog is left unchanged.
    pub fn add(
        &mut self,
        input: CreateGoods,
        history: Option<&SupplierHistory>,
    ) -> Result<GoodsRecord, AppError> {
        let goods = validate(input)?;

        if self.index.contains_key(&goods.goods_id) {
            warn!("Rejecting duplicate goods id {}", goods.goods_id);
            return Err(AppError::Conflict(format!(
                "Goods {} already exists in the catalog",
                goods.goods_id
            )));
        }

        let current_price = goods.price.clone();
        let price = current_price.to_f64().ok_or_else(|| {
            AppError::InvalidInput(format!("price {} is out of range", current_price))
        })?;

        let predictions = self.forecaster.project(price)?;
        let supplier_performance = self.classifier.classify(&goods.supplier_id, history, true)?;

        let record = GoodsRecord {
            goods_id: goods.goods_id,
            goods_name: goods.goods_name,
            cost: goods.cost,
            price: goods.price,
            date: goods.date,
            supplier_id: goods.supplier_id,
            supplier_name: goods.supplier_name,
            current_price,
            predictions,
            supplier_performance,
            created_at: Utc::now(),
        };

        self.index.insert(record.goods_id.clone(), self.records.len());
        self.records.push(record.clone());
        info!("Added goods {} ({} in catalog)", record.goods_id, self.records.len());

        Ok(record)
    }

    /// Every record in insertion order.
    pub fn list(&self) -> &[GoodsRecord] {
        &self.records
    }

    pub fn get(&self, goods_id: &str) -> Option<&GoodsRecord> {
        self.index.get(goods_id).map(|&i| &self.records[i])
    }

    pub fn has_supplier(&self, supplier_id: &str) -> bool {
        self.records.iter().any(|r| r.supplier_id == supplier_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Check that every field is present and typed fields parse.
pub fn validate(input: CreateGoods) -> Result<ValidGoods, AppError> {
    let mut errors = ValidationErrors::new("Please fill in all fields with valid values");

    let goods_id = required(&input.goods_id, "goodsId", &mut errors);
    let goods_name = required(&input.goods_name, "goodsName", &mut errors);
    let cost = required(&input.cost, "cost", &mut errors)
        .and_then(|raw| positive_decimal(raw, "cost", &mut errors));
    let price = required(&input.price, "price", &mut errors)
        .and_then(|raw| positive_decimal(raw, "price", &mut errors));
    let date = required(&input.date, "date", &mut errors).and_then(|raw| {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| errors.invalid("date"))
            .ok()
    });
    let supplier_id = required(&input.supplier_id, "supplierId", &mut errors);
    let supplier_name = required(&input.supplier_name, "supplierName", &mut errors);

    match (goods_id, goods_name, cost, price, date, supplier_id, supplier_name) {
        (
            Some(goods_id),
            Some(goods_name),
            Some(cost),
            Some(price),
            Some(date),
            Some(supplier_id),
            Some(supplier_name),
        ) if errors.is_empty() => Ok(ValidGoods {
            goods_id: goods_id.to_string(),
            goods_name: goods_name.to_string(),
            cost,
            price,
            date,
            supplier_id: supplier_id.to_string(),
            supplier_name: supplier_name.to_string(),
        }),
        _ => {
            warn!("Rejected goods submission: {}", errors);
            Err(AppError::Validation(errors))
        }
    }
}

fn required<'a>(value: &'a str, field: &str, errors: &mut ValidationErrors) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.missing(field);
        None
    } else {
        Some(trimmed)
    }
}

/// Positive decimal whose `f64` image is a normal number, so projections
/// stay strictly above and below it.
fn positive_decimal(raw: &str, field: &str, errors: &mut ValidationErrors) -> Option<BigDecimal> {
    let representable = |value: &BigDecimal| {
        value
            .to_f64()
            .map(|f| f.is_normal() && f > 0.0)
            .unwrap_or(false)
    };

    match BigDecimal::from_str(raw) {
        Ok(value) if value > BigDecimal::zero() && representable(&value) => Some(value),
        _ => {
            errors.invalid(field);
            None
        }
    }
}
