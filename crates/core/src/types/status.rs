//! Status and role enums shared across the client.
//!
//! All of these serialize in SCREAMING_SNAKE_CASE to match the backend's
//! wire format.

use serde::{Deserialize, Serialize};

/// Account role, as reported by the login endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

impl Role {
    /// The path segment used by the `/auth/login/{segment}` and
    /// `/auth/signup/{segment}` endpoints.
    #[must_use]
    pub const fn auth_segment(self) -> &'static str {
        match self {
            Self::Buyer => "user",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buyer => write!(f, "BUYER"),
            Self::Seller => write!(f, "SELLER"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tokens sometimes carry Spring-style "ROLE_" prefixes.
        match s.trim_start_matches("ROLE_") {
            "BUYER" | "USER" => Ok(Self::Buyer),
            "SELLER" => Ok(Self::Seller),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Seller account approval state.
///
/// New sellers start in `PendingApproval` and are activated (or suspended)
/// by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    #[default]
    PendingApproval,
    Active,
    Suspended,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingApproval => write!(f, "PENDING_APPROVAL"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Suspended => write!(f, "SUSPENDED"),
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING_APPROVAL" => Ok(Self::PendingApproval),
            "ACTIVE" => Ok(Self::Active),
            "SUSPENDED" => Ok(Self::Suspended),
            _ => Err(format!("invalid account status: {s}")),
        }
    }
}

/// Order lifecycle status.
///
/// The backend enforces a strict state machine; `can_transition_to` mirrors
/// it so consoles can grey out illegal actions before making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    PendingApproval,
    Approved,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether a seller may move an order from this status to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::PendingApproval => matches!(next, Self::Approved | Self::Cancelled),
            Self::Approved => matches!(next, Self::Shipped | Self::Cancelled),
            Self::Shipped => matches!(next, Self::Delivered),
            Self::Delivered | Self::Cancelled => false,
        }
    }

    /// Whether the buyer may still cancel an order in this status.
    #[must_use]
    pub const fn buyer_cancellable(self) -> bool {
        matches!(self, Self::PendingApproval | Self::Approved)
    }

    /// Whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingApproval => write!(f, "PENDING_APPROVAL"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Shipped => write!(f, "SHIPPED"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING_APPROVAL" => Ok(Self::PendingApproval),
            "APPROVED" => Ok(Self::Approved),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
