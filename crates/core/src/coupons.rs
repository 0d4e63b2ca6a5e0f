//! Coupons

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::amount::Amount;

/// A coupon accepted by the backend and applied to the cart.
///
/// Code and discount always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCoupon {
    /// Normalized coupon code returned by validation.
    pub code: String,

    /// Absolute discount.
    pub discount: Amount,
}

/// How a listed offer computes its discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percentage of the order amount, capped by `max_discount`.
    Percentage,

    /// Fixed amount off.
    Flat,
}

/// An offer published on the offers page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Coupon code.
    pub name: String,

    /// Customer-facing description.
    #[serde(default)]
    pub description: String,

    /// Discount kind.
    pub discount_type: DiscountType,

    /// Percentage points or rupees, depending on `discount_type`.
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,

    /// Minimum order amount.
    #[serde(default)]
    pub min_order: Amount,

    /// Upper bound on the discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<Amount>,
}

impl Coupon {
    /// Human-readable summary of the discount rule.
    pub fn headline(&self) -> String {
        match self.discount_type {
            DiscountType::Percentage => {
                let percent = self.discount_value.normalize();

                match self.max_discount {
                    Some(cap) => format!("{percent}% off (up to {cap})"),
                    None => format!("{percent}% off"),
                }
            }
            DiscountType::Flat => match Amount::from_decimal(self.discount_value) {
                Ok(amount) => format!("{amount} off"),
                Err(_) => format!("{} off", self.discount_value.normalize()),
            },
        }
    }
}

/// Coupon listing response: `{"coupons": [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CouponsPayload {
    /// Bare array of coupons.
    Items(Vec<Value>),

    /// Wrapped coupons.
    Wrapped {
        /// Coupon entries.
        #[serde(default)]
        coupons: Vec<Value>,
    },
}

impl CouponsPayload {
    /// Normalize into typed coupons, skipping malformed entries.
    pub fn into_coupons(self) -> Vec<Coupon> {
        let raw = match self {
            CouponsPayload::Items(items) | CouponsPayload::Wrapped { coupons: items } => items,
        };

        raw.into_iter()
            .filter_map(|entry| {
                serde_json::from_value(entry)
                    .inspect_err(|error| warn!(%error, "skipping undecodable coupon"))
                    .ok()
            })
            .collect()
    }
}

/// Request body for `POST /coupons/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponValidationRequest {
    /// Code typed by the customer.
    pub coupon_code: String,

    /// Pre-discount cart total.
    pub order_amount: Amount,
}

/// Successful coupon validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CouponValidation {
    /// Normalized coupon code.
    pub coupon_name: String,

    /// Absolute discount granted.
    pub discount_amount: Amount,

    /// Offer description.
    #[serde(default)]
    pub description: Option<String>,

    /// Amount payable after the discount, as computed by the backend.
    #[serde(default)]
    pub final_amount: Option<Amount>,

    /// Amount the discount was computed against.
    #[serde(default)]
    pub original_amount: Option<Amount>,
}

impl From<CouponValidation> for AppliedCoupon {
    fn from(validation: CouponValidation) -> Self {
        Self {
            code: validation.coupon_name,
            discount: validation.discount_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn wrapped_coupon_listing_is_normalized() -> TestResult {
        let payload: CouponsPayload = serde_json::from_value(json!({
            "success": true,
            "coupons": [{
                "name": "WELCOME10",
                "description": "Get 10% off on your first order",
                "discount_type": "percentage",
                "discount_value": 10,
                "min_order": 100,
                "max_discount": 50
            }, {
                "name": "BROKEN"
            }]
        }))?;

        let coupons = payload.into_coupons();

        assert_eq!(coupons.len(), 1);
        assert_eq!(
            coupons.first().map(Coupon::headline),
            Some(format!("10% off (up to {})", Amount::from_major(50)))
        );

        Ok(())
    }

    #[test]
    fn validation_converts_into_applied_coupon() -> TestResult {
        let validation: CouponValidation = serde_json::from_value(json!({
            "success": true,
            "coupon_name": "FLAT50",
            "description": "Flat ₹50 off",
            "discount_amount": 50,
            "final_amount": 150,
            "original_amount": 200
        }))?;

        let applied = AppliedCoupon::from(validation);

        assert_eq!(applied.code, "FLAT50");
        assert_eq!(applied.discount, Amount::from_major(50));

        Ok(())
    }

    #[test]
    fn validation_request_encodes_amount_as_number() -> TestResult {
        let body = serde_json::to_value(CouponValidationRequest {
            coupon_code: "SAVE20".to_string(),
            order_amount: Amount::from_major(300),
        })?;

        assert_eq!(body, json!({"coupon_code": "SAVE20", "order_amount": 300.0}));

        Ok(())
    }
}
