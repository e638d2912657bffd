pub mod pricing;
pub mod product;

pub use pricing::{LineItemPricingInput, LineItemPricingResult, OrderTotals, PricingEngine};
pub use product::{AdjustmentKind, CatalogError, MoneyAdjustment, Product, Variation, VariationOption};
