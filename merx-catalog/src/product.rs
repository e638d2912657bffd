use crate::pricing::LineItemPricingInput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a markup (or any money adjustment) is expressed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Fixed,
    Percent,
}

/// A markup expressed either as an absolute currency amount or as a
/// percentage of a base. Backend JSON shape: `{ "type": ..., "value": ... }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MoneyAdjustment {
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub value: f64,
}

impl MoneyAdjustment {
    pub fn fixed(value: f64) -> Self {
        Self { kind: AdjustmentKind::Fixed, value }
    }

    pub fn percent(value: f64) -> Self {
        Self { kind: AdjustmentKind::Percent, value }
    }

    /// Resolve the concrete currency amount this adjustment adds over `base`.
    pub fn amount_over(&self, base: f64) -> f64 {
        match self.kind {
            AdjustmentKind::Fixed => self.value,
            AdjustmentKind::Percent => base * self.value / 100.0,
        }
    }
}

/// A selectable product option carrying a signed price delta
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariationOption {
    pub name: String,
    pub price_adjustment: f64,
}

/// A variation axis (e.g. size, color) with its options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variation {
    pub name: String,
    pub options: Vec<VariationOption>,
}

/// Core catalog record as edited by the admin screens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub product_code: String,
    pub name: String,
    pub description: Option<String>,
    /// Base cost of one unit before markup/VAT
    pub capital: f64,
    pub additional_capital: MoneyAdjustment,
    pub vat_percent: f64,
    pub discount_percent: f64,
    pub variations: Vec<Variation>,
    pub is_active: bool,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(product_code: impl Into<String>, name: impl Into<String>, capital: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_code: product_code.into(),
            name: name.into(),
            description: None,
            capital,
            additional_capital: MoneyAdjustment::fixed(0.0),
            vat_percent: 0.0,
            discount_percent: 0.0,
            variations: Vec::new(),
            is_active: true,
            metadata: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum the price deltas of the selected options.
    ///
    /// `selections` pairs a variation name with the chosen option name; every
    /// pair must resolve against this product's variations.
    pub fn variation_adjustment(
        &self,
        selections: &[(&str, &str)],
    ) -> Result<f64, CatalogError> {
        let mut adjustment = 0.0;

        for (variation_name, option_name) in selections {
            let variation = self
                .variations
                .iter()
                .find(|v| v.name == *variation_name)
                .ok_or_else(|| CatalogError::UnknownVariation(variation_name.to_string()))?;

            let option = variation
                .options
                .iter()
                .find(|o| o.name == *option_name)
                .ok_or_else(|| CatalogError::UnknownOption {
                    variation: variation_name.to_string(),
                    option: option_name.to_string(),
                })?;

            adjustment += option.price_adjustment;
        }

        Ok(adjustment)
    }

    /// Derive a pricing input fresh from this record.
    ///
    /// Nothing is cached: every call re-reads the current field values, so a
    /// product edit is reflected by the next pricing computation.
    pub fn line_pricing_input(
        &self,
        selections: &[(&str, &str)],
        quantity: u32,
    ) -> Result<LineItemPricingInput, CatalogError> {
        Ok(LineItemPricingInput {
            capital: self.capital,
            additional_capital: self.additional_capital,
            vat_percent: self.vat_percent,
            discount_percent: self.discount_percent,
            variation_adjustment: self.variation_adjustment(selections)?,
            quantity,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown variation: {0}")]
    UnknownVariation(String),

    #[error("Unknown option {option} for variation {variation}")]
    UnknownOption { variation: String, option: String },
}
