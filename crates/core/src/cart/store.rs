//! Persistent cart container.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    amount::Amount,
    cart::{Cart, CartLine},
    coupons::AppliedCoupon,
    menu::{MenuItem, ProductId},
    orders::OrderLine,
    storage::{CART_KEY, COUPON_KEY, KeyValueStore},
};

/// The storefront's cart, mirrored to local storage after every mutation.
///
/// Lines are stored under [`CART_KEY`] and the applied coupon under
/// [`COUPON_KEY`]. Storage failures are logged and the cart carries on in
/// memory.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Rehydrate the cart from `storage`.
    ///
    /// A missing or unreadable snapshot yields an empty cart. A stored coupon
    /// is restored only alongside a non-empty cart.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut cart = match storage.get(CART_KEY) {
            Ok(Some(snapshot)) => match serde_json::from_str::<Vec<CartLine>>(&snapshot) {
                Ok(lines) => Cart::from_lines(lines),
                Err(error) => {
                    warn!(%error, "ignoring malformed cart snapshot");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(%error, "failed to read cart snapshot");
                Cart::new()
            }
        };

        if !cart.is_empty()
            && let Some(coupon) = load_coupon(storage.as_ref())
        {
            cart.apply_coupon(coupon);
        }

        Self { cart, storage }
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a menu item.
    pub fn add_item(&mut self, item: &MenuItem) {
        self.cart.add(CartLine::from(item));
        self.persist();
    }

    /// Re-add every line of a past order at its ordered quantity.
    pub fn add_order_lines(&mut self, lines: &[OrderLine]) {
        for line in lines.iter().filter(|line| line.quantity > 0) {
            self.cart.add(CartLine::from(line));
            self.cart
                .update_quantity(&line.id, i64::from(line.quantity) - 1);
        }

        self.persist();
    }

    /// Change a line's quantity by `delta`; see [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> bool {
        let changed = self.cart.update_quantity(id, delta);

        if changed {
            self.persist();
        }

        changed
    }

    /// Remove a line entirely.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let changed = self.cart.remove(id);

        if changed {
            self.persist();
        }

        changed
    }

    /// Empty the cart, drop the coupon and delete the persisted snapshot.
    pub fn clear(&mut self) {
        self.cart.clear();

        if let Err(error) = self.storage.remove(CART_KEY) {
            warn!(%error, "failed to remove cart snapshot");
        }

        self.persist_coupon();
    }

    /// Apply a validated coupon.
    pub fn apply_coupon(&mut self, coupon: AppliedCoupon) {
        debug!(code = %coupon.code, discount = %coupon.discount, "coupon applied");
        self.cart.apply_coupon(coupon);
        self.persist_coupon();
    }

    /// Drop the applied coupon. Returns `false` if none was applied.
    pub fn remove_coupon(&mut self) -> bool {
        let applied = self.cart.coupon().is_some();

        self.cart.remove_coupon();
        self.persist_coupon();

        applied
    }

    /// Sum of price × quantity.
    pub fn total(&self) -> Amount {
        self.cart.total()
    }

    /// Total after discount.
    pub fn final_total(&self) -> Amount {
        self.cart.final_total()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn persist(&self) {
        let snapshot = match serde_json::to_string(self.cart.lines()) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "failed to serialize cart snapshot");
                return;
            }
        };

        if let Err(error) = self.storage.set(CART_KEY, &snapshot) {
            warn!(%error, "failed to persist cart snapshot");
        }
    }

    fn persist_coupon(&self) {
        let result = match self.cart.coupon() {
            Some(coupon) => match serde_json::to_string(coupon) {
                Ok(snapshot) => self.storage.set(COUPON_KEY, &snapshot),
                Err(error) => {
                    warn!(%error, "failed to serialize coupon");
                    return;
                }
            },
            None => self.storage.remove(COUPON_KEY),
        };

        if let Err(error) = result {
            warn!(%error, "failed to persist coupon");
        }
    }
}

fn load_coupon(storage: &dyn KeyValueStore) -> Option<AppliedCoupon> {
    match storage.get(COUPON_KEY) {
        Ok(Some(snapshot)) => serde_json::from_str(&snapshot)
            .inspect_err(|error| warn!(%error, "ignoring malformed coupon snapshot"))
            .ok(),
        Ok(None) => None,
        Err(error) => {
            warn!(%error, "failed to read coupon snapshot");
            None
        }
    }
}
