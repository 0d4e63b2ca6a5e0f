//! Tiffin prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    addresses::{Address, NewAddress},
    amount::{Amount, AmountError},
    cart::{Cart, CartLine, CartStore},
    coupons::{AppliedCoupon, Coupon, CouponValidation, CouponValidationRequest, DiscountType},
    menu::{ALL_CATEGORIES, MenuItem, MenuPayload, MenuQuery, PriceSort, ProductId},
    orders::{
        CancelRequest, Order, OrderConfirmation, OrderId, OrderLine, OrderSort, OrderStatus,
        OrderSubmission, OrdersPayload, PaymentMethod, ProgressStep, StepState,
    },
    page::{Banner, Page, PageState, Resolution, Ticket},
    profile::{NewReview, OtpRequest, PhoneUpdate, ReviewError, UserProfile},
    receipt::{Receipt, ReceiptError},
    routes::{AuthStatus, Navigation, View, guard, resolve},
    storage::{CART_KEY, COUPON_KEY, FileStore, KeyValueStore, MemoryStore, StorageError, TOKEN_KEY},
};
