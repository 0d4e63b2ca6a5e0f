//! Order cancellation and reorder flows.

use thiserror::Error;
use tiffin::{
    cart::CartStore,
    orders::{Order, OrderStatus},
};
use tracing::info;

use crate::{domain::orders::OrdersService, http::ApiError};

/// Reasons an order is not cancelled.
#[derive(Debug, Error)]
pub enum CancelError {
    /// A reason is required.
    #[error("Please provide a reason for cancellation")]
    EmptyReason,

    /// Only orders that have just been placed can be cancelled.
    #[error("Orders that are {0} can no longer be cancelled")]
    NotCancellable(OrderStatus),

    /// The order could not be fetched or the backend refused the cancellation.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Cancel `order` and return it as the backend now reports it.
///
/// # Errors
///
/// Returns [`CancelError::EmptyReason`] or [`CancelError::NotCancellable`]
/// before any call is made, or the error of the cancel or refetch call.
pub async fn cancel_order(
    orders: &dyn OrdersService,
    order: &Order,
    reason: &str,
) -> Result<Order, CancelError> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(CancelError::EmptyReason);
    }

    if !order.status.is_cancellable() {
        return Err(CancelError::NotCancellable(order.status));
    }

    orders
        .cancel_order(order.order_id.clone(), reason.to_string())
        .await?;

    info!(order_id = %order.order_id, "order cancelled");

    Ok(orders.get_order(order.order_id.clone()).await?)
}

/// Put every line of a past order back in the cart at its ordered quantity.
pub fn reorder(cart: &mut CartStore, order: &Order) {
    cart.add_order_lines(&order.items);

    info!(
        order_id = %order.order_id,
        lines = order.items.len(),
        "order added to cart"
    );
}
