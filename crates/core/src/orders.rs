//! Orders

use std::{
    cmp::Reverse,
    fmt::{self, Display, Formatter},
};

use jiff::{Timestamp, civil::DateTime, tz::TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{
    addresses::Address,
    amount::Amount,
    cart::{Cart, CartLine},
    menu::ProductId,
};

/// Server-assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create an order identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last six characters, uppercased, used in order listings.
    pub fn short(&self) -> String {
        let skip = self.0.chars().count().saturating_sub(6);

        self.0.chars().skip(skip).collect::<String>().to_uppercase()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of an order's item snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product identifier at the time of ordering.
    #[serde(alias = "_id")]
    pub id: ProductId,

    /// Product name.
    pub name: String,

    /// Unit price.
    pub price: Amount,

    /// Ordered quantity.
    pub quantity: u32,

    /// Optional image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl OrderLine {
    /// Price multiplied by quantity.
    pub fn line_total(&self) -> Amount {
        self.price.saturating_mul(self.quantity)
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            image_url: line.image_url.clone(),
        }
    }
}

/// Lifecycle status of an order.
///
/// `Cancelled` is absorbing and reachable only from `Placed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted, not yet in the kitchen.
    #[default]
    Placed,

    /// Being cooked.
    Preparing,

    /// With the delivery rider.
    OutForDelivery,

    /// Handed over.
    Delivered,

    /// Cancelled by the customer.
    Cancelled,

    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Marker for one step of the progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Already passed.
    Done,

    /// Where the order is now.
    Current,

    /// Not reached yet.
    Pending,
}

/// One entry of the four-step progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    /// Status represented by the step.
    pub status: OrderStatus,

    /// Where the order stands relative to this step.
    pub state: StepState,
}

impl OrderStatus {
    /// Fixed progression shown by the tracker.
    pub const STEPS: [OrderStatus; 4] = [
        OrderStatus::Placed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// Whether the customer may still cancel.
    pub fn is_cancellable(self) -> bool {
        self == OrderStatus::Placed
    }

    /// Progress tracker, or `None` for a cancelled order.
    ///
    /// An unknown status marks every step as pending.
    pub fn progress(self) -> Option<[ProgressStep; 4]> {
        if self == OrderStatus::Cancelled {
            return None;
        }

        let current = Self::STEPS.iter().position(|step| *step == self);

        Some(Self::STEPS.map(|status| {
            let index = Self::STEPS.iter().position(|step| *step == status);

            let state = match (index, current) {
                (Some(index), Some(current)) if index < current => StepState::Done,
                (Some(index), Some(current)) if index == current => StepState::Current,
                _ => StepState::Pending,
            };

            ProgressStep { status, state }
        }))
    }

    /// Human-readable label, e.g. `OUT FOR DELIVERY`.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::OutForDelivery => "OUT FOR DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    Card,

    /// UPI apps.
    Upi,

    /// Net banking.
    Net,

    /// Pay the rider.
    Cod,

    /// Anything the backend reports that this client does not know.
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::Upi => "UPI / Google Pay",
            PaymentMethod::Net => "Net Banking",
            PaymentMethod::Cod => "Cash on Delivery",
            PaymentMethod::Other => "Online Payment",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Order {
    /// Order identifier.
    #[serde(alias = "_id", alias = "id")]
    pub order_id: OrderId,

    /// Item snapshot.
    #[serde(default)]
    pub items: Vec<OrderLine>,

    /// Pre-discount total.
    pub total_amount: Amount,

    /// Coupon discount.
    #[serde(default)]
    pub discount_amount: Option<Amount>,

    /// Amount charged.
    #[serde(default)]
    pub final_amount: Option<Amount>,

    /// Lifecycle status.
    #[serde(default, deserialize_with = "status_or_placed")]
    pub status: OrderStatus,

    /// Payment method.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,

    /// Gateway result, e.g. `SUCCESS`.
    #[serde(default)]
    pub payment_status: Option<String>,

    /// Delivery address snapshot.
    #[serde(default)]
    pub delivery_address: Option<Address>,

    /// Reason given at cancellation.
    #[serde(default, alias = "cancellation_reason")]
    pub cancel_reason: Option<String>,

    /// Creation time.
    #[serde(default, deserialize_with = "utc_timestamp")]
    pub created_at: Option<Timestamp>,
}

impl Order {
    /// Amount actually charged.
    pub fn payable(&self) -> Amount {
        self.final_amount.unwrap_or_else(|| {
            self.total_amount
                .saturating_sub(self.discount_amount.unwrap_or(Amount::ZERO))
        })
    }

    /// Payment method label; unknown or missing methods read "Online Payment".
    pub fn payment_label(&self) -> &'static str {
        self.payment_method.unwrap_or(PaymentMethod::Other).label()
    }
}

fn status_or_placed<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OrderStatus>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 timestamps and naive datetimes, the latter as UTC.
fn utc_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Ok(Some(timestamp));
    }

    raw.parse::<DateTime>()
        .and_then(|naive| naive.to_zoned(TimeZone::UTC))
        .map(|zoned| Some(zoned.timestamp()))
        .map_err(serde::de::Error::custom)
}

/// Orders response: `{"count": n, "orders": [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OrdersPayload {
    /// Bare array of orders.
    Items(Vec<Value>),

    /// Wrapped orders.
    Wrapped {
        /// Order entries.
        #[serde(default)]
        orders: Vec<Value>,
    },
}

impl OrdersPayload {
    /// Normalize into typed orders, skipping entries that fail to decode.
    pub fn into_orders(self) -> Vec<Order> {
        let raw = match self {
            OrdersPayload::Items(items) | OrdersPayload::Wrapped { orders: items } => items,
        };

        raw.into_iter()
            .filter_map(|entry| {
                serde_json::from_value(entry)
                    .inspect_err(|error| warn!(%error, "skipping undecodable order"))
                    .ok()
            })
            .collect()
    }
}

/// Ordering of the order history list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderSort {
    /// Most recent first.
    #[default]
    Newest,

    /// Oldest first.
    Oldest,

    /// Largest total first.
    Highest,

    /// Smallest total first.
    Lowest,
}

impl OrderSort {
    /// Sort `orders` in place. Orders without a timestamp sort as oldest.
    pub fn apply(self, orders: &mut [Order]) {
        match self {
            OrderSort::Newest => orders.sort_by_key(|order| Reverse(order.created_at)),
            OrderSort::Oldest => orders.sort_by_key(|order| order.created_at),
            OrderSort::Highest => orders.sort_by_key(|order| Reverse(order.total_amount)),
            OrderSort::Lowest => orders.sort_by_key(|order| order.total_amount),
        }
    }
}

/// Body of `POST /payment/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSubmission {
    /// Cart lines at submission time.
    pub items: Vec<OrderLine>,

    /// Pre-discount total.
    pub total_amount: Amount,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Default address at submission time.
    pub delivery_address: Address,

    /// Discount granted by the coupon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Amount>,

    /// Amount after the discount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_amount: Option<Amount>,

    /// Applied coupon code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

impl OrderSubmission {
    /// Build a submission from the cart contents.
    pub fn from_cart(cart: &Cart, payment_method: PaymentMethod, address: Address) -> Self {
        let coupon = cart.coupon();

        Self {
            items: cart.lines().iter().map(OrderLine::from).collect(),
            total_amount: cart.total(),
            payment_method,
            delivery_address: address,
            discount_amount: coupon.map(|coupon| coupon.discount),
            final_amount: coupon.map(|_| cart.final_total()),
            coupon_code: coupon.map(|coupon| coupon.code.clone()),
        }
    }
}

/// Response of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderConfirmation {
    /// New order identifier.
    pub order_id: OrderId,

    /// Gateway result.
    #[serde(default)]
    pub payment_status: Option<String>,

    /// Human-readable confirmation.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /orders/{id}/cancel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelRequest {
    /// Reason typed by the customer.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::coupons::AppliedCoupon;

    use super::*;

    #[test]
    fn short_id_is_last_six_uppercased() {
        assert_eq!(OrderId::new("ORD_1a2b3c4d").short(), "2B3C4D");
        assert_eq!(OrderId::new("ab").short(), "AB");
    }

    #[test]
    fn progress_marks_steps_around_current_status() -> TestResult {
        let steps = OrderStatus::OutForDelivery
            .progress()
            .ok_or("expected progress")?;

        let states: Vec<StepState> = steps.iter().map(|step| step.state).collect();

        assert_eq!(
            states,
            vec![
                StepState::Done,
                StepState::Done,
                StepState::Current,
                StepState::Pending
            ]
        );

        Ok(())
    }

    #[test]
    fn cancelled_orders_have_no_progress() {
        assert_eq!(OrderStatus::Cancelled.progress(), None);
    }

    #[test]
    fn only_placed_orders_are_cancellable() {
        let cancellable: Vec<OrderStatus> = [
            OrderStatus::Placed,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Unknown,
        ]
        .into_iter()
        .filter(|status| status.is_cancellable())
        .collect();

        assert_eq!(cancellable, vec![OrderStatus::Placed]);
    }

    #[test]
    fn order_decodes_backend_shape() -> TestResult {
        let order: Order = serde_json::from_value(json!({
            "order_id": "ORD_deadbeef",
            "user_email": "a@b.c",
            "items": [{"id": "p1", "name": "Thali", "price": 120, "quantity": 2}],
            "total_amount": 240,
            "payment_gateway": "DUMMY",
            "payment_status": "SUCCESS",
            "created_at": "2025-01-15T10:30:00.123000"
        }))?;

        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.payment_label(), "Online Payment");
        assert_eq!(order.payable(), Amount::from_major(240));
        assert_eq!(
            order.created_at,
            Some("2025-01-15T10:30:00.123Z".parse::<Timestamp>()?)
        );

        Ok(())
    }

    #[test]
    fn order_accepts_alternate_keys_and_unknown_status() -> TestResult {
        let order: Order = serde_json::from_value(json!({
            "_id": "X1",
            "total_amount": 100,
            "status": "ON_HOLD",
            "payment_method": "upi",
            "cancellation_reason": "changed my mind",
            "created_at": null
        }))?;

        assert_eq!(order.order_id.as_str(), "X1");
        assert_eq!(order.status, OrderStatus::Unknown);
        assert_eq!(order.payment_label(), "UPI / Google Pay");
        assert_eq!(order.cancel_reason.as_deref(), Some("changed my mind"));

        Ok(())
    }

    #[test]
    fn orders_payload_accepts_both_shapes() -> TestResult {
        let wrapped: OrdersPayload = serde_json::from_value(json!({
            "count": 1,
            "orders": [{"order_id": "A", "total_amount": 10}]
        }))?;
        let bare: OrdersPayload =
            serde_json::from_value(json!([{"order_id": "A", "total_amount": 10}, {"bad": 1}]))?;

        assert_eq!(wrapped.into_orders().len(), 1);
        assert_eq!(bare.into_orders().len(), 1);

        Ok(())
    }

    #[test]
    fn sort_orders_by_time_and_amount() -> TestResult {
        let mut orders: Vec<Order> = serde_json::from_value(json!([
            {"order_id": "old", "total_amount": 300, "created_at": "2025-01-01T09:00:00"},
            {"order_id": "new", "total_amount": 100, "created_at": "2025-03-01T09:00:00"},
            {"order_id": "mid", "total_amount": 200, "created_at": "2025-02-01T09:00:00"}
        ]))?;

        OrderSort::Newest.apply(&mut orders);
        let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);

        OrderSort::Highest.apply(&mut orders);
        let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["old", "mid", "new"]);

        Ok(())
    }

    #[test]
    fn submission_includes_coupon_fields_only_when_applied() -> TestResult {
        let address: Address = serde_json::from_value(json!({
            "id": "a1", "label": "Home", "addressLine": "1 Main St",
            "city": "Pune", "state": "MH", "pincode": "411001", "isDefault": true
        }))?;

        let mut cart = Cart::new();
        cart.add(CartLine {
            id: ProductId::new("p1"),
            name: "Thali".to_string(),
            price: Amount::from_major(100),
            image_url: None,
            quantity: 1,
        });

        let plain = serde_json::to_value(OrderSubmission::from_cart(
            &cart,
            PaymentMethod::Card,
            address.clone(),
        ))?;
        assert!(plain.get("coupon_code").is_none());

        cart.apply_coupon(AppliedCoupon {
            code: "FLAT50".to_string(),
            discount: Amount::from_major(50),
        });

        let discounted = serde_json::to_value(OrderSubmission::from_cart(
            &cart,
            PaymentMethod::Upi,
            address,
        ))?;

        assert_eq!(discounted.get("coupon_code"), Some(&json!("FLAT50")));
        assert_eq!(discounted.get("final_amount"), Some(&json!(50.0)));
        assert_eq!(discounted.get("payment_method"), Some(&json!("upi")));

        Ok(())
    }
}
