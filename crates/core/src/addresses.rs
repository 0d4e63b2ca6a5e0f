//! Delivery addresses

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Backend identifier; absent on some order snapshots.
    #[serde(default)]
    pub id: String,

    /// Short name such as "Home" or "Office".
    #[serde(default)]
    pub label: String,

    /// Street line.
    #[serde(default)]
    pub address_line: String,

    /// City.
    #[serde(default)]
    pub city: String,

    /// State.
    #[serde(default)]
    pub state: String,

    /// Postal code.
    #[serde(default)]
    pub pincode: String,

    /// Whether checkout uses this address.
    #[serde(default, alias = "is_default")]
    pub is_default: bool,
}

impl Address {
    /// Whether the record carries any deliverable content.
    ///
    /// The default-address endpoint answers `{}` when nothing is set.
    pub fn is_blank(&self) -> bool {
        self.id.is_empty() && self.address_line.trim().is_empty()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} - {}",
            self.address_line, self.city, self.state, self.pincode
        )
    }
}

/// Fields submitted when creating or replacing an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    /// Short name such as "Home".
    pub label: String,

    /// Street line.
    pub address_line: String,

    /// City.
    pub city: String,

    /// State.
    pub state: String,

    /// Postal code.
    pub pincode: String,

    /// Make this the default address.
    pub is_default: bool,
}

/// Default address as returned by `GET /addresses/default`.
///
/// The backend answers `null` or `{}` when no default exists.
pub fn default_from_payload(payload: Option<Address>) -> Option<Address> {
    payload.filter(|address| !address.is_blank())
}
