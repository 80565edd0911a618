//! The checkout wizard: a strictly linear state machine.
//!
//! `Address → Payment → Review → Confirmed`, no skipping. The only way out
//! of `Review` is a successful order placement; a failed placement leaves
//! the wizard (and the cart) exactly where they were.
//!
//! Payment details are collected for the review screen but deliberately
//! never serialized - there is no payment gateway behind this flow, and the
//! type system enforces that card data cannot reach the wire.

use secrecy::SecretString;

use crate::api::types::{Order, OrderItemRequest, OrderRequest};
use crate::api::ApiError;
use crate::cart::CartStore;
use crate::session::SessionState;

pub use ecobazaar_core::Address;

/// The wizard's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Address,
    Payment,
    Review,
    Confirmed,
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Payment => write!(f, "payment"),
            Self::Review => write!(f, "review"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Card details collected by the payment step.
///
/// Presence-checked only, and intentionally not `Serialize`: nothing in
/// this client transmits card data anywhere.
#[derive(Clone, Default)]
pub struct PaymentDetails {
    pub card_name: String,
    pub card_number: String,
    pub exp_date: String,
    pub cvv: String,
}

impl PaymentDetails {
    /// Names of required fields that are empty or whitespace-only.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let required: [(&'static str, &str); 4] = [
            ("name on card", &self.card_name),
            ("card number", &self.card_number),
            ("expiration date", &self.exp_date),
            ("CVV", &self.cvv),
        ];

        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// The last four digits for the review screen, e.g. `**** **** **** 4242`.
    #[must_use]
    pub fn masked_number(&self) -> String {
        let digits: String = self.card_number.chars().filter(char::is_ascii_digit).collect();
        let last4 = if digits.len() >= 4 {
            &digits[digits.len() - 4..]
        } else {
            digits.as_str()
        };
        format!("**** **** **** {last4}")
    }
}

impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_name", &self.card_name)
            .field("card_number", &"[REDACTED]")
            .field("exp_date", &self.exp_date)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

/// Why the checkout could not be entered, and where to send the user
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutRedirect {
    /// Not signed in - go to the sign-in view.
    SignIn,
    /// Cart is empty - go back to the catalog.
    Catalog,
}

/// Errors raised while driving the wizard.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("address is incomplete: missing {}", .0.join(", "))]
    IncompleteAddress(Vec<&'static str>),

    #[error("payment details are incomplete: missing {}", .0.join(", "))]
    IncompletePayment(Vec<&'static str>),

    #[error("nothing follows the {0} step")]
    NoNextStep(CheckoutStep),

    #[error("orders can only be placed from the review step")]
    NotAtReview,

    #[error("not signed in")]
    NotAuthenticated,

    #[error("order placement failed: {0}")]
    Placement(#[from] ApiError),
}

/// The boundary the wizard places orders through.
///
/// The production implementation is `ApiClient`; tests substitute an
/// in-process stub so the success and failure paths can be exercised
/// without a backend.
pub trait OrderGateway {
    /// Submit an order on behalf of the signed-in buyer.
    fn submit_order(
        &self,
        token: &SecretString,
        request: &OrderRequest,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send;
}

/// A run of the checkout wizard.
///
/// Ephemeral by design: it is never persisted, and dropping it (the
/// component unmounting, in frontend terms) discards the collected details.
#[derive(Debug)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    pub address: Address,
    pub payment: PaymentDetails,
}

impl CheckoutFlow {
    /// Enter the wizard.
    ///
    /// Guarded: requires an authenticated session and a non-empty cart.
    /// Violations return the view to redirect to instead of a flow.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutRedirect::SignIn`] or [`CheckoutRedirect::Catalog`]
    /// when the guard fails.
    pub fn begin(session: &SessionState, cart: &CartStore) -> Result<Self, CheckoutRedirect> {
        if !session.is_authenticated() {
            return Err(CheckoutRedirect::SignIn);
        }
        if cart.is_empty() {
            return Err(CheckoutRedirect::Catalog);
        }

        Ok(Self {
            step: CheckoutStep::Address,
            address: Address::default(),
            payment: PaymentDetails::default(),
        })
    }

    /// The wizard's current position.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Advance one step.
    ///
    /// Valid from `Address` (once the address is complete) and `Payment`
    /// (once the card fields are present). `Review` has no next step -
    /// [`CheckoutFlow::place_order`] is the only way forward from there.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing missing fields, or
    /// [`CheckoutError::NoNextStep`] from `Review`/`Confirmed`.
    pub fn next(&mut self) -> Result<CheckoutStep, CheckoutError> {
        match self.step {
            CheckoutStep::Address => {
                let missing = self.address.missing_fields();
                if !missing.is_empty() {
                    return Err(CheckoutError::IncompleteAddress(missing));
                }
                self.step = CheckoutStep::Payment;
            }
            CheckoutStep::Payment => {
                let missing = self.payment.missing_fields();
                if !missing.is_empty() {
                    return Err(CheckoutError::IncompletePayment(missing));
                }
                self.step = CheckoutStep::Review;
            }
            CheckoutStep::Review | CheckoutStep::Confirmed => {
                return Err(CheckoutError::NoNextStep(self.step));
            }
        }
        Ok(self.step)
    }

    /// Step back one step. A no-op from `Address` and `Confirmed`.
    pub fn back(&mut self) -> CheckoutStep {
        self.step = match self.step {
            CheckoutStep::Payment => CheckoutStep::Address,
            CheckoutStep::Review => CheckoutStep::Payment,
            other => other,
        };
        self.step
    }

    /// Place the order. Only valid from `Review`.
    ///
    /// On success the cart is cleared and the wizard moves to `Confirmed`.
    /// On failure the cart and the wizard are left untouched so the user
    /// can retry or go back; no automatic retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotAtReview`] off-step,
    /// [`CheckoutError::NotAuthenticated`] if the session lapsed, or the
    /// placement failure.
    pub async fn place_order<G: OrderGateway>(
        &mut self,
        gateway: &G,
        session: &SessionState,
        cart: &CartStore,
    ) -> Result<Order, CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::NotAtReview);
        }
        let token = session.token().ok_or(CheckoutError::NotAuthenticated)?;

        let request = OrderRequest {
            order_items: cart
                .lines()
                .iter()
                .map(|line| OrderItemRequest {
                    product_id: line.product.id,
                    quantity: line.quantity,
                })
                .collect(),
            shipping_address: self.address.clone(),
        };

        let order = gateway.submit_order(token, &request).await?;

        cart.clear();
        self.step = CheckoutStep::Confirmed;
        tracing::info!(order_id = %order.id, "order placed");
        Ok(order)
    }
}
