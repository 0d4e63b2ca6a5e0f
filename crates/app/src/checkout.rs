//! Checkout and coupon flows.

use thiserror::Error;
use tiffin::{
    cart::CartStore,
    coupons::{AppliedCoupon, CouponValidationRequest},
    orders::{OrderConfirmation, OrderSubmission, PaymentMethod},
};
use tracing::{info, warn};

use crate::{
    domain::{addresses::AddressService, coupons::CouponsService, payment::PaymentService},
    http::ApiError,
};

/// Reasons an order is not placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,

    /// No default delivery address is set.
    #[error("Please add a delivery address before placing your order")]
    MissingAddress,

    /// The address lookup or the payment call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Reasons a coupon is not applied.
#[derive(Debug, Error)]
pub enum CouponError {
    /// Blank code; nothing was sent.
    #[error("Please enter a coupon code")]
    EmptyCode,

    /// Nothing in the cart to discount; nothing was sent.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The backend refused the code or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Place an order for the cart contents.
///
/// The cart must be non-empty and a default address must exist before
/// anything is submitted. The cart is cleared only once the backend accepts
/// the order; a failed payment leaves it untouched.
///
/// # Errors
///
/// Returns a [`CheckoutError`] for an unmet precondition or a failed call.
pub async fn place_order(
    cart: &mut CartStore,
    addresses: &dyn AddressService,
    payments: &dyn PaymentService,
    method: PaymentMethod,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let address = addresses
        .default_address()
        .await?
        .ok_or(CheckoutError::MissingAddress)?;

    let submission = OrderSubmission::from_cart(cart.cart(), method, address);

    let confirmation = payments.checkout(submission).await.inspect_err(|error| {
        warn!(%error, "checkout failed");
    })?;

    info!(order_id = %confirmation.order_id, "order placed");

    cart.clear();

    Ok(confirmation)
}

/// Validate `code` against the cart total and apply the resulting discount.
///
/// # Errors
///
/// Returns [`CouponError::EmptyCode`] for a blank code and
/// [`CouponError::EmptyCart`] for an empty cart without calling the backend,
/// or the backend's error; the cart is unchanged on error.
pub async fn apply_coupon(
    cart: &mut CartStore,
    coupons: &dyn CouponsService,
    code: &str,
) -> Result<AppliedCoupon, CouponError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(CouponError::EmptyCode);
    }

    if cart.is_empty() {
        return Err(CouponError::EmptyCart);
    }

    let validation = coupons
        .validate_coupon(CouponValidationRequest {
            coupon_code: code.to_string(),
            order_amount: cart.total(),
        })
        .await?;

    let coupon = AppliedCoupon::from(validation);

    cart.apply_coupon(coupon.clone());

    Ok(coupon)
}
