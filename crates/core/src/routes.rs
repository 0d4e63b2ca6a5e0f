//! View routing
//!
//! Maps storefront paths to views and gates the protected ones behind the
//! session status.

use std::fmt::{self, Display, Formatter};

use crate::orders::OrderId;

/// A screen of the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum View {
    /// Landing page.
    Home,

    /// Menu browser.
    Menu,

    /// About page.
    About,

    /// Published offers.
    Offers,

    /// Sign-in form.
    Login,

    /// Registration form.
    Signup,

    /// Customer profile.
    Profile,

    /// Order history.
    Orders,

    /// One order, with tracking and cancellation.
    OrderDetail(OrderId),

    /// Address book.
    Addresses,

    /// Feedback form.
    Review,

    /// Checkout and payment.
    Payment,

    /// Confirmation shown after a successful checkout.
    OrderSuccess,
}

impl View {
    /// Resolve a path to a view. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<View> {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(trimmed);

        let view = match trimmed {
            "/" | "" => View::Home,
            "/menu" => View::Menu,
            "/about" => View::About,
            "/offers" => View::Offers,
            "/login" => View::Login,
            "/signup" => View::Signup,
            "/dashboard/profile" => View::Profile,
            "/dashboard/orders" => View::Orders,
            "/dashboard/address" => View::Addresses,
            "/dashboard/review" => View::Review,
            "/payment" => View::Payment,
            "/orders/success" => View::OrderSuccess,
            other => {
                let id = other.strip_prefix("/dashboard/orders/")?;

                if id.is_empty() || id.contains('/') {
                    return None;
                }

                View::OrderDetail(OrderId::new(id))
            }
        };

        Some(view)
    }

    /// Canonical path of the view.
    pub fn path(&self) -> String {
        match self {
            View::Home => "/".to_string(),
            View::Menu => "/menu".to_string(),
            View::About => "/about".to_string(),
            View::Offers => "/offers".to_string(),
            View::Login => "/login".to_string(),
            View::Signup => "/signup".to_string(),
            View::Profile => "/dashboard/profile".to_string(),
            View::Orders => "/dashboard/orders".to_string(),
            View::OrderDetail(id) => format!("/dashboard/orders/{id}"),
            View::Addresses => "/dashboard/address".to_string(),
            View::Review => "/dashboard/review".to_string(),
            View::Payment => "/payment".to_string(),
            View::OrderSuccess => "/orders/success".to_string(),
        }
    }

    /// Whether the view needs a signed-in customer.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            View::Profile
                | View::Orders
                | View::OrderDetail(_)
                | View::Addresses
                | View::Review
                | View::Payment
                | View::OrderSuccess
        )
    }
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Session status as seen by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// A stored token is being checked against the profile endpoint.
    Resolving,

    /// No session.
    Anonymous,

    /// Signed in.
    Authenticated,
}

/// Outcome of routing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Show the view.
    Render(View),

    /// Go somewhere else, remembering where the customer wanted to be.
    Redirect {
        /// Destination.
        to: View,

        /// View to return to once the redirect is satisfied.
        from: Option<View>,
    },

    /// Show nothing until the session status settles.
    Pending,
}

/// Gate a view on the session status.
pub fn guard(view: View, status: AuthStatus) -> Navigation {
    if !view.requires_auth() {
        return Navigation::Render(view);
    }

    match status {
        AuthStatus::Authenticated => Navigation::Render(view),
        AuthStatus::Resolving => Navigation::Pending,
        AuthStatus::Anonymous => Navigation::Redirect {
            to: View::Login,
            from: Some(view),
        },
    }
}

/// Route a raw path. Unknown paths redirect home.
pub fn resolve(path: &str, status: AuthStatus) -> Navigation {
    match View::from_path(path) {
        Some(view) => guard(view, status),
        None => Navigation::Redirect {
            to: View::Home,
            from: None,
        },
    }
}

/// Where to land after a successful login.
pub fn after_login(from: Option<View>) -> View {
    from.unwrap_or(View::Home)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_views() {
        assert_eq!(View::from_path("/"), Some(View::Home));
        assert_eq!(View::from_path("/menu/"), Some(View::Menu));
        assert_eq!(
            View::from_path("/dashboard/orders/ORD_1"),
            Some(View::OrderDetail(OrderId::new("ORD_1")))
        );
        assert_eq!(View::from_path("/dashboard/orders/a/b"), None);
        assert_eq!(View::from_path("/nowhere"), None);
    }

    #[test]
    fn path_is_inverse_of_from_path() {
        let views = [
            View::Home,
            View::Menu,
            View::About,
            View::Offers,
            View::Login,
            View::Signup,
            View::Profile,
            View::Orders,
            View::OrderDetail(OrderId::new("X")),
            View::Addresses,
            View::Review,
            View::Payment,
            View::OrderSuccess,
        ];

        for view in views {
            assert_eq!(View::from_path(&view.path()), Some(view));
        }
    }

    #[test]
    fn anonymous_customers_are_sent_to_login_with_origin() {
        assert_eq!(
            guard(View::Payment, AuthStatus::Anonymous),
            Navigation::Redirect {
                to: View::Login,
                from: Some(View::Payment)
            }
        );
    }

    #[test]
    fn resolving_session_renders_nothing_for_protected_views() {
        assert_eq!(guard(View::Orders, AuthStatus::Resolving), Navigation::Pending);
        assert_eq!(
            guard(View::Menu, AuthStatus::Resolving),
            Navigation::Render(View::Menu)
        );
    }

    #[test]
    fn authenticated_customers_reach_protected_views() {
        assert_eq!(
            guard(View::Profile, AuthStatus::Authenticated),
            Navigation::Render(View::Profile)
        );
    }

    #[test]
    fn unknown_paths_redirect_home() {
        assert_eq!(
            resolve("/definitely/not/here", AuthStatus::Authenticated),
            Navigation::Redirect {
                to: View::Home,
                from: None
            }
        );
    }

    #[test]
    fn login_returns_to_origin_or_home() {
        assert_eq!(after_login(Some(View::Payment)), View::Payment);
        assert_eq!(after_login(None), View::Home);
    }
}
