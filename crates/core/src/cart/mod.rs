//! Cart

use serde::{Deserialize, Serialize};

use crate::{
    amount::Amount,
    coupons::AppliedCoupon,
    menu::{MenuItem, ProductId},
    orders::OrderLine,
};

mod store;

pub use store::CartStore;

/// One product entry in the cart.
///
/// The serialized shape doubles as the order line submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Stable key of the line.
    pub id: ProductId,

    /// Product name.
    pub name: String,

    /// Unit price.
    pub price: Amount,

    /// Optional image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price multiplied by quantity.
    pub fn line_total(&self) -> Amount {
        self.price.saturating_mul(self.quantity)
    }
}

impl From<&MenuItem> for CartLine {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            quantity: 1,
        }
    }
}

impl From<&OrderLine> for CartLine {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            price: line.price,
            image_url: line.image_url.clone(),
            quantity: 1,
        }
    }
}

/// Shopping cart contents and the coupon applied to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    coupon: Option<AppliedCoupon>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from previously persisted lines.
    ///
    /// Lines with a zero quantity are dropped and duplicate keys are merged
    /// so the one-line-per-key invariant holds for hand-edited snapshots too.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            match cart.position(&line.id) {
                Some(index) => {
                    if let Some(existing) = cart.lines.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }

        cart
    }

    /// Add one unit of `line`'s product.
    ///
    /// Existing lines keep their position; new products are appended.
    pub fn add(&mut self, line: CartLine) {
        match self.position(&line.id) {
            Some(index) => {
                if let Some(existing) = self.lines.get_mut(index) {
                    existing.quantity = existing.quantity.saturating_add(1);
                }
            }
            None => self.lines.push(CartLine { quantity: 1, ..line }),
        }
    }

    /// Change a line's quantity by `delta`.
    ///
    /// A resulting quantity of zero or less removes the line. Returns `false`
    /// when no line has the given key.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };

        let quantity = i64::from(line.quantity).saturating_add(delta);

        if quantity <= 0 {
            self.lines.remove(index);
        } else {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }

        true
    }

    /// Remove a line regardless of its quantity.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| &line.id != id);

        self.lines.len() != before
    }

    /// Empty the cart and drop any coupon.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.coupon = None;
    }

    /// Apply a validated coupon, replacing any previous one.
    pub fn apply_coupon(&mut self, coupon: AppliedCoupon) {
        self.coupon = Some(coupon);
    }

    /// Remove the applied coupon.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line with the given key.
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Applied coupon, if any.
    pub fn coupon(&self) -> Option<&AppliedCoupon> {
        self.coupon.as_ref()
    }

    /// Applied discount, zero without a coupon.
    pub fn discount(&self) -> Amount {
        self.coupon
            .as_ref()
            .map_or(Amount::ZERO, |coupon| coupon.discount)
    }

    /// Sum of price × quantity over all lines.
    pub fn total(&self) -> Amount {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total after discount, never below zero.
    pub fn final_total(&self) -> Amount {
        self.total().saturating_sub(self.discount())
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }
}
