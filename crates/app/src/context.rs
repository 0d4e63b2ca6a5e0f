//! Storefront Context

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use thiserror::Error;
use tiffin::{
    addresses::Address,
    cart::CartStore,
    coupons::{AppliedCoupon, Coupon},
    menu::{self, MenuItem, ProductId},
    orders::{Order, OrderConfirmation, OrderId, OrderSort, PaymentMethod},
    page::{Page, PageState, Resolution},
    profile::{NewReview, ReviewError},
    routes::{self, AuthStatus, Navigation, View},
    storage::{KeyValueStore, StorageError},
};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::{
    auth::{AuthService, AuthStore, Credentials, HttpAuthService, RegisterOutcome, SessionToken},
    checkout::{self, CheckoutError, CouponError},
    config::StorefrontConfig,
    domain::{
        addresses::{AddressService, HttpAddressService},
        coupons::{CouponsService, HttpCouponsService},
        menu::{HttpMenuService, MenuService},
        orders::{HttpOrdersService, OrdersService},
        payment::{HttpPaymentService, PaymentService},
        profile::{HttpProfileService, ProfileService},
        reviews::{HttpReviewsService, ReviewsService},
    },
    http::{ApiClient, ApiError, ReqwestTransport, SessionSignal},
    orders::{self as order_flows, CancelError},
};

const SESSION_REJECTED: &str = "Your session could not be verified. Please log in again.";

/// Reasons the storefront cannot start.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The state directory is unusable.
    #[error("failed to open state directory")]
    Storage(#[source] StorageError),
}

/// Reasons a product is not added to the cart.
#[derive(Debug, Error)]
pub enum CartActionError {
    /// No menu item carries the id.
    #[error("no menu item with id {0}")]
    UnknownProduct(ProductId),

    /// The menu could not be loaded.
    #[error("{0}")]
    MenuUnavailable(String),
}

/// Reasons a review is not published.
#[derive(Debug, Error)]
pub enum ReviewSubmitError {
    /// Refused locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ReviewError),

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Backend service handles.
#[derive(Clone)]
pub struct Services {
    /// Login, registration and logout.
    pub auth: Arc<dyn AuthService>,
    /// Profile, phone and password.
    pub profile: Arc<dyn ProfileService>,
    /// Menu listing.
    pub menu: Arc<dyn MenuService>,
    /// Address book.
    pub addresses: Arc<dyn AddressService>,
    /// Order history and cancellation.
    pub orders: Arc<dyn OrdersService>,
    /// Payment checkout.
    pub payment: Arc<dyn PaymentService>,
    /// Offers and coupon validation.
    pub coupons: Arc<dyn CouponsService>,
    /// Reviews.
    pub reviews: Arc<dyn ReviewsService>,
}

impl Services {
    /// HTTP-backed services sharing one client.
    #[must_use]
    pub fn http(client: &ApiClient) -> Self {
        Self {
            auth: Arc::new(HttpAuthService::new(client.clone())),
            profile: Arc::new(HttpProfileService::new(client.clone())),
            menu: Arc::new(HttpMenuService::new(client.clone())),
            addresses: Arc::new(HttpAddressService::new(client.clone())),
            orders: Arc::new(HttpOrdersService::new(client.clone())),
            payment: Arc::new(HttpPaymentService::new(client.clone())),
            coupons: Arc::new(HttpCouponsService::new(client.clone())),
            reviews: Arc::new(HttpReviewsService::new(client.clone())),
        }
    }
}

/// Session, cart and page state for one storefront customer.
///
/// After any backend call the session signals are drained, so a 401 seen by
/// any service ends the session before the next view is routed.
pub struct Storefront {
    services: Services,
    auth: AuthStore,
    cart: CartStore,
    clear_cart_on_logout: bool,
    menu: Page<Vec<MenuItem>>,
    offers: Page<Vec<Coupon>>,
    orders: Page<Vec<Order>>,
    order: Page<Order>,
    addresses: Page<Vec<Address>>,
}

impl Debug for Storefront {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("auth", &self.auth)
            .field("cart", &self.cart)
            .field("clear_cart_on_logout", &self.clear_cart_on_logout)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Assemble a storefront from its parts.
    pub fn new(
        services: Services,
        storage: Arc<dyn KeyValueStore>,
        signals: broadcast::Receiver<SessionSignal>,
        clear_cart_on_logout: bool,
    ) -> Self {
        Self {
            services,
            auth: AuthStore::new(storage.clone(), signals),
            cart: CartStore::load(storage),
            clear_cart_on_logout,
            menu: Page::new(),
            offers: Page::new(),
            orders: Page::new(),
            order: Page::new(),
            addresses: Page::new(),
        }
    }

    /// Build an HTTP-backed storefront from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the state directory cannot be opened.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, AppInitError> {
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(config.storage.open().map_err(AppInitError::Storage)?);

        let transport = ReqwestTransport::new(&config.api.api_base_url, config.api.timeout());
        let client = ApiClient::new(Arc::new(transport), storage.clone());
        let signals = client.subscribe();

        debug!(base_url = %config.api.api_base_url, "storefront configured");

        Ok(Self::new(
            Services::http(&client),
            storage,
            signals,
            !config.storage.keep_cart_on_logout,
        ))
    }

    /// Backend service handles.
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Session state.
    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// Cart state.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable cart state.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Session status used by the view guard.
    pub fn status(&self) -> AuthStatus {
        self.auth.status()
    }

    /// Settle a rehydrated session by fetching its profile.
    pub async fn resume_session(&mut self) {
        if self.auth.status() != AuthStatus::Resolving {
            return;
        }

        self.auth.refresh_profile(self.services.profile.as_ref()).await;

        if !self.auth.is_authenticated() {
            self.abandon_session();
        }
    }

    /// Apply pending session signals. Returns `true` if the session ended.
    pub fn sync_session(&mut self) -> bool {
        let ended = self.auth.poll_signals();

        if ended {
            self.end_session();
        }

        ended
    }

    /// Route a path for the current session.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        self.sync_session();

        routes::resolve(path, self.auth.status())
    }

    /// Gate a view for the current session.
    pub fn open(&mut self, view: View) -> Navigation {
        self.sync_session();

        routes::guard(view, self.auth.status())
    }

    /// Sign in and return the view to continue with.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or [`ApiError::Unauthorized`] when the
    /// new token is rejected by the profile fetch and the session is torn
    /// down again.
    pub async fn login(
        &mut self,
        credentials: &Credentials,
        from: Option<View>,
    ) -> Result<View, ApiError> {
        let token = self.services.auth.login(credentials).await?;

        self.start_session(token).await?;

        Ok(routes::after_login(from))
    }

    /// Create an account, signing in when the backend issues a token.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or [`ApiError::Unauthorized`] when the
    /// issued token is rejected by the profile fetch.
    pub async fn register(&mut self, credentials: &Credentials) -> Result<RegisterOutcome, ApiError> {
        let outcome = self.services.auth.register(credentials).await?;

        if let RegisterOutcome::SignedIn(token) = &outcome {
            self.start_session(token.clone()).await?;
        }

        Ok(outcome)
    }

    /// End the session.
    pub async fn logout(&mut self) {
        self.auth.logout(self.services.auth.as_ref()).await;
        self.auth.poll_signals();
        self.end_session();
    }

    /// Load the menu.
    pub async fn load_menu(&mut self) -> &PageState<Vec<MenuItem>> {
        let ticket = self.menu.begin();
        let result = self.services.menu.list_menu().await;

        let resolution = ticket_result(&mut self.menu, ticket, result);
        self.settle(resolution);

        self.menu.state()
    }

    /// Load the published offers.
    pub async fn load_offers(&mut self) -> &PageState<Vec<Coupon>> {
        let ticket = self.offers.begin();
        let result = self.services.coupons.list_coupons().await;

        let resolution = ticket_result(&mut self.offers, ticket, result);
        self.settle(resolution);

        self.offers.state()
    }

    /// Load the order history in the given order.
    pub async fn load_orders(&mut self, sort: OrderSort) -> &PageState<Vec<Order>> {
        let ticket = self.orders.begin();
        let result = self.services.orders.list_orders().await.map(|mut orders| {
            sort.apply(&mut orders);
            orders
        });

        let resolution = ticket_result(&mut self.orders, ticket, result);
        self.settle(resolution);

        self.orders.state()
    }

    /// Load one order.
    pub async fn load_order(&mut self, id: &OrderId) -> &PageState<Order> {
        let ticket = self.order.begin();
        let result = self.services.orders.get_order(id.clone()).await;

        let resolution = ticket_result(&mut self.order, ticket, result);
        self.settle(resolution);

        self.order.state()
    }

    /// Load the address book.
    pub async fn load_addresses(&mut self) -> &PageState<Vec<Address>> {
        let ticket = self.addresses.begin();
        let result = self.services.addresses.list_addresses().await;

        let resolution = ticket_result(&mut self.addresses, ticket, result);
        self.settle(resolution);

        self.addresses.state()
    }

    /// Add one unit of a menu item, loading the menu first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the menu cannot be loaded or has no such item.
    pub async fn add_to_cart(&mut self, id: &ProductId) -> Result<(), CartActionError> {
        if self.menu.data().is_none() {
            self.load_menu().await;
        }

        let item = match self.menu.state() {
            PageState::Loaded(items) => menu::find(items, id)
                .cloned()
                .ok_or_else(|| CartActionError::UnknownProduct(id.clone()))?,
            PageState::Failed(message) => {
                return Err(CartActionError::MenuUnavailable(message.clone()));
            }
            PageState::Idle | PageState::Loading(_) => {
                return Err(CartActionError::UnknownProduct(id.clone()));
            }
        };

        self.cart.add_item(&item);

        Ok(())
    }

    /// Validate and apply a coupon to the cart.
    ///
    /// # Errors
    ///
    /// See [`checkout::apply_coupon`].
    pub async fn apply_coupon(&mut self, code: &str) -> Result<AppliedCoupon, CouponError> {
        let result =
            checkout::apply_coupon(&mut self.cart, self.services.coupons.as_ref(), code).await;

        self.sync_session();

        result
    }

    /// Place an order for the cart contents.
    ///
    /// # Errors
    ///
    /// See [`checkout::place_order`].
    pub async fn checkout(
        &mut self,
        method: PaymentMethod,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let result = checkout::place_order(
            &mut self.cart,
            self.services.addresses.as_ref(),
            self.services.payment.as_ref(),
            method,
        )
        .await;

        self.sync_session();

        if result.is_ok() {
            self.orders.reset();
        }

        result
    }

    /// Cancel an order and show its refetched state.
    ///
    /// # Errors
    ///
    /// See [`order_flows::cancel_order`].
    pub async fn cancel_order(&mut self, id: &OrderId, reason: &str) -> Result<Order, CancelError> {
        let result = match self.current_order(id).await {
            Ok(order) => {
                order_flows::cancel_order(self.services.orders.as_ref(), &order, reason).await
            }
            Err(error) => Err(CancelError::Api(error)),
        };

        self.sync_session();

        let refreshed = result?;

        self.order.set(refreshed.clone());
        self.orders.reset();

        Ok(refreshed)
    }

    /// Put a past order's lines back in the cart.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the order has to be fetched and cannot be.
    pub async fn reorder(&mut self, id: &OrderId) -> Result<(), ApiError> {
        let result = self.current_order(id).await;

        self.sync_session();

        order_flows::reorder(&mut self.cart, &result?);

        Ok(())
    }

    /// Publish a review as the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError`] for an anonymous session or invalid input,
    /// otherwise the backend's error.
    pub async fn submit_review(&mut self, rating: u8, comment: &str) -> Result<(), ReviewSubmitError> {
        if !self.auth.is_authenticated() {
            return Err(ReviewError::NotAuthenticated.into());
        }

        let review = NewReview::new(rating, comment)?;
        let result = self.services.reviews.submit_review(review).await;

        self.sync_session();

        Ok(result?)
    }

    async fn current_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        match self.order.data() {
            Some(order) if &order.order_id == id => Ok(order.clone()),
            _ => self.services.orders.get_order(id.clone()).await,
        }
    }

    fn settle(&mut self, resolution: Resolution) {
        if resolution == Resolution::Stale {
            debug!("discarded stale page result");
        }

        self.sync_session();
    }

    async fn start_session(&mut self, token: SessionToken) -> Result<(), ApiError> {
        self.sync_session();
        self.auth.login(token);
        self.auth.refresh_profile(self.services.profile.as_ref()).await;

        if self.auth.is_authenticated() {
            return Ok(());
        }

        self.abandon_session();

        Err(ApiError::Unauthorized {
            message: SESSION_REJECTED.to_string(),
        })
    }

    /// Drop signals raised by the failed profile fetch and reset the
    /// session-scoped state.
    fn abandon_session(&mut self) {
        self.auth.poll_signals();
        self.end_session();
    }

    fn end_session(&mut self) {
        info!(clear_cart = self.clear_cart_on_logout, "session ended");

        if self.clear_cart_on_logout {
            self.cart.clear();
        }

        self.orders.reset();
        self.order.reset();
        self.addresses.reset();
    }
}

fn ticket_result<T>(
    page: &mut Page<T>,
    ticket: tiffin::page::Ticket,
    result: Result<T, ApiError>,
) -> Resolution {
    page.resolve(ticket, result.map_err(|error| error.message()))
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;
    use testresult::TestResult;
    use tiffin::{
        amount::Amount,
        profile::UserProfile,
        storage::{CART_KEY, MemoryStore, TOKEN_KEY},
    };

    use crate::{
        auth::MockAuthService,
        domain::{
            addresses::MockAddressService, coupons::MockCouponsService, menu::MockMenuService,
            orders::MockOrdersService, payment::MockPaymentService, profile::MockProfileService,
            reviews::MockReviewsService,
        },
    };

    use super::*;

    struct Mocks {
        auth: MockAuthService,
        profile: MockProfileService,
        menu: MockMenuService,
        orders: MockOrdersService,
        reviews: MockReviewsService,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                auth: MockAuthService::new(),
                profile: MockProfileService::new(),
                menu: MockMenuService::new(),
                orders: MockOrdersService::new(),
                reviews: MockReviewsService::new(),
            }
        }

        fn into_services(self) -> Services {
            Services {
                auth: Arc::new(self.auth),
                profile: Arc::new(self.profile),
                menu: Arc::new(self.menu),
                addresses: Arc::new(MockAddressService::new()),
                orders: Arc::new(self.orders),
                payment: Arc::new(MockPaymentService::new()),
                coupons: Arc::new(MockCouponsService::new()),
                reviews: Arc::new(self.reviews),
            }
        }
    }

    struct Harness {
        storefront: Storefront,
        storage: Arc<MemoryStore>,
        signals: broadcast::Sender<SessionSignal>,
    }

    fn harness(mocks: Mocks, token: Option<&str>, clear_cart: bool) -> TestResult<Harness> {
        let storage = Arc::new(MemoryStore::new());

        if let Some(token) = token {
            storage.set(TOKEN_KEY, token)?;
        }

        let (signals, receiver) = broadcast::channel(8);
        let storefront = Storefront::new(mocks.into_services(), storage.clone(), receiver, clear_cart);

        Ok(Harness {
            storefront,
            storage,
            signals,
        })
    }

    fn menu() -> TestResult<Vec<MenuItem>> {
        Ok(serde_json::from_value(json!([
            {"id": "p1", "name": "Veg Thali", "price": 120, "category": "veg"},
            {"id": "p2", "name": "Lassi", "price": 40, "category": "drinks"}
        ]))?)
    }

    fn profile() -> UserProfile {
        UserProfile {
            email: "asha@example.com".to_string(),
            phone: None,
            phone_verified: None,
        }
    }

    fn unauthorized() -> ApiError {
        ApiError::Unauthorized {
            message: "Could not validate credentials".to_string(),
        }
    }

    #[test]
    fn anonymous_visit_to_orders_redirects_to_login() -> TestResult {
        let mut harness = harness(Mocks::new(), None, true)?;

        let navigation = harness.storefront.navigate("/dashboard/orders");

        assert_eq!(
            navigation,
            Navigation::Redirect {
                to: View::Login,
                from: Some(View::Orders),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_returns_to_the_protected_view() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_login()
            .once()
            .returning(|_| Ok(SessionToken::new("fresh")));
        mocks.profile.expect_profile().once().returning(|| Ok(profile()));

        let mut harness = harness(mocks, None, true)?;
        let credentials = Credentials::new("asha@example.com", "secret");

        let next = harness
            .storefront
            .login(&credentials, Some(View::Orders))
            .await?;

        assert_eq!(next, View::Orders);
        assert_eq!(harness.storefront.open(View::Orders), Navigation::Render(View::Orders));
        assert_eq!(harness.storage.get(TOKEN_KEY)?, Some("fresh".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn login_rejected_by_profile_fetch_ends_the_session() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_login()
            .once()
            .returning(|_| Ok(SessionToken::new("revoked")));
        mocks.profile.expect_profile().once().returning(|| Err(unauthorized()));

        let mut harness = harness(mocks, None, true)?;
        let items = menu()?;
        harness.storefront.cart_mut().add_item(&items[0]);

        let credentials = Credentials::new("asha@example.com", "secret");
        let result = harness
            .storefront
            .login(&credentials, Some(View::Orders))
            .await;

        assert!(
            matches!(&result, Err(error) if error.is_unauthorized()),
            "got {result:?}"
        );
        assert_eq!(harness.storefront.status(), AuthStatus::Anonymous);
        assert_eq!(harness.storage.get(TOKEN_KEY)?, None);
        assert!(harness.storefront.cart().is_empty());
        assert_eq!(
            harness.storefront.open(View::Orders),
            Navigation::Redirect {
                to: View::Login,
                from: Some(View::Orders),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_rejected_by_profile_fetch_reports_unauthorized() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .auth
            .expect_register()
            .once()
            .returning(|_| Ok(RegisterOutcome::SignedIn(SessionToken::new("revoked"))));
        mocks.profile.expect_profile().once().returning(|| Err(unauthorized()));

        let mut harness = harness(mocks, None, true)?;
        let credentials = Credentials::new("asha@example.com", "secret");

        let result = harness.storefront.register(&credentials).await;

        assert!(
            matches!(&result, Err(error) if error.is_unauthorized()),
            "got {result:?}"
        );
        assert_eq!(harness.storefront.status(), AuthStatus::Anonymous);
        assert_eq!(harness.storage.get(TOKEN_KEY)?, None);

        Ok(())
    }

    #[tokio::test]
    async fn expired_stored_session_is_dropped_on_resume() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.profile.expect_profile().once().returning(|| Err(unauthorized()));

        let mut harness = harness(mocks, Some("stale"), true)?;

        assert_eq!(harness.storefront.status(), AuthStatus::Resolving);
        assert_eq!(harness.storefront.open(View::Orders), Navigation::Pending);

        harness.storefront.resume_session().await;

        assert_eq!(harness.storefront.status(), AuthStatus::Anonymous);
        assert_eq!(harness.storage.get(TOKEN_KEY)?, None);

        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_response_ends_session_and_clears_cart() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.profile.expect_profile().once().returning(|| Ok(profile()));
        let items = menu()?;
        mocks
            .menu
            .expect_list_menu()
            .once()
            .returning(move || Ok(items.clone()));

        let mut harness = harness(mocks, Some("abc"), true)?;

        harness.storefront.resume_session().await;
        harness.storefront.add_to_cart(&ProductId::new("p1")).await?;

        harness.signals.send(SessionSignal::Invalidated)?;

        assert!(harness.storefront.sync_session());
        assert!(harness.storefront.cart().is_empty());
        assert_eq!(harness.storage.get(CART_KEY)?, None);

        Ok(())
    }

    #[tokio::test]
    async fn logout_keeps_cart_when_configured() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.profile.expect_profile().once().returning(|| Ok(profile()));
        let items = menu()?;
        mocks
            .menu
            .expect_list_menu()
            .once()
            .returning(move || Ok(items.clone()));
        mocks.auth.expect_logout().once().returning(|| Ok(()));

        let mut harness = harness(mocks, Some("abc"), false)?;

        harness.storefront.resume_session().await;
        harness.storefront.add_to_cart(&ProductId::new("p2")).await?;
        harness.storefront.logout().await;

        assert_eq!(harness.storefront.status(), AuthStatus::Anonymous);
        assert_eq!(harness.storefront.cart().total(), Amount::from_major(40));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_not_added() -> TestResult {
        let mut mocks = Mocks::new();

        let items = menu()?;
        mocks
            .menu
            .expect_list_menu()
            .once()
            .returning(move || Ok(items.clone()));

        let mut harness = harness(mocks, None, true)?;
        let result = harness.storefront.add_to_cart(&ProductId::new("p9")).await;

        assert!(
            matches!(&result, Err(CartActionError::UnknownProduct(id)) if id.as_str() == "p9"),
            "got {result:?}"
        );
        assert!(harness.storefront.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn menu_failure_is_reported() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.menu.expect_list_menu().once().returning(|| {
            Err(ApiError::Server {
                status: StatusCode::BAD_GATEWAY,
                message: "Request failed with status code 502".to_string(),
            })
        });

        let mut harness = harness(mocks, None, true)?;
        let state = harness.storefront.load_menu().await;

        assert_eq!(
            state,
            &PageState::Failed("Request failed with status code 502".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_review_is_refused_locally() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.reviews.expect_submit_review().never();

        let mut harness = harness(mocks, None, true)?;
        let result = harness.storefront.submit_review(5, "Lovely").await;

        assert!(
            matches!(result, Err(ReviewSubmitError::Invalid(ReviewError::NotAuthenticated))),
            "got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reorder_uses_the_loaded_order() -> TestResult {
        let mut mocks = Mocks::new();
        let order: Order = serde_json::from_value(json!({
            "order_id": "ORD_9",
            "status": "DELIVERED",
            "total_amount": 240,
            "items": [{"id": "p1", "name": "Veg Thali", "price": 120, "quantity": 2}]
        }))?;

        mocks
            .orders
            .expect_get_order()
            .once()
            .returning(move |_| Ok(order.clone()));

        let mut harness = harness(mocks, None, true)?;
        let id = OrderId::new("ORD_9");

        harness.storefront.load_order(&id).await;
        harness.storefront.reorder(&id).await?;

        assert_eq!(harness.storefront.cart().total(), Amount::from_major(240));

        Ok(())
    }
}
