//! The whole buyer journey, driven against an in-process order gateway.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use chrono::NaiveDateTime;
use secrecy::SecretString;

use ecobazaar_core::{Address, CurrencyCode, OrderId, OrderStatus, Price};
use ecobazaar_integration_tests::{bearer_token, test_product};
use ecobazaar_storefront::api::ApiError;
use ecobazaar_storefront::api::types::{Order, OrderRequest};
use ecobazaar_storefront::cart::CartStore;
use ecobazaar_storefront::checkout::{
    CheckoutFlow, CheckoutRedirect, CheckoutStep, OrderGateway, PaymentDetails,
};
use ecobazaar_storefront::session::SessionStore;
use ecobazaar_storefront::storage::Storage;

/// Gateway that records requests and answers from a script.
struct ScriptedGateway {
    fail_first: bool,
    calls: Mutex<u32>,
    requests: Mutex<Vec<OrderRequest>>,
}

impl ScriptedGateway {
    fn new(fail_first: bool) -> Self {
        Self {
            fail_first,
            calls: Mutex::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl OrderGateway for ScriptedGateway {
    async fn submit_order(
        &self,
        _token: &SecretString,
        request: &OrderRequest,
    ) -> Result<Order, ApiError> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        self.requests.lock().unwrap().push(request.clone());

        if self.fail_first && *calls == 1 {
            return Err(ApiError::Status {
                status: reqwest_status_500(),
                message: "order placement failed".into(),
            });
        }

        Ok(Order {
            id: OrderId::new(501),
            buyer_name: "Asha".into(),
            shipping_address: request.shipping_address.clone(),
            total_price: Price::new("45.97".parse().unwrap(), CurrencyCode::INR),
            status: OrderStatus::PendingApproval,
            created_at: NaiveDateTime::default(),
            items: Vec::new(),
        })
    }
}

fn reqwest_status_500() -> reqwest::StatusCode {
    reqwest::StatusCode::INTERNAL_SERVER_ERROR
}

fn shipping_address() -> Address {
    Address {
        first_name: "Asha".into(),
        last_name: "Verma".into(),
        address1: "12 Lake View Road".into(),
        address2: Some("Flat 3B".into()),
        city: "Pune".into(),
        state: "MH".into(),
        zip: "411001".into(),
        country: "India".into(),
    }
}

fn card_details() -> PaymentDetails {
    PaymentDetails {
        card_name: "Asha Verma".into(),
        card_number: "4242 4242 4242 4242".into(),
        exp_date: "12/27".into(),
        cvv: "123".into(),
    }
}

#[tokio::test]
async fn buyer_flow_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());

    // Sign in.
    let session = SessionStore::open(storage.clone());
    session.login(&bearer_token("asha@example.com", &["BUYER"], 3600));
    assert!(session.current().is_authenticated());

    // Fill the cart: 2 × 12.99 + 1 × 19.99.
    let cart = CartStore::open(storage);
    let brush = test_product(1, "Bamboo Toothbrush", "12.99");
    let tea = test_product(2, "Organic Tea", "19.99");
    cart.add(&brush);
    cart.add(&brush);
    cart.add(&tea);
    assert_eq!(cart.count(), 3);
    assert_eq!(cart.total().amount, "45.97".parse().unwrap());

    // Walk the wizard.
    let mut flow = CheckoutFlow::begin(&session.current(), &cart).unwrap();
    flow.address = shipping_address();
    assert_eq!(flow.next().unwrap(), CheckoutStep::Payment);
    flow.payment = card_details();
    assert_eq!(flow.next().unwrap(), CheckoutStep::Review);

    // First placement fails: wizard and cart must be untouched.
    let gateway = ScriptedGateway::new(true);
    let err = flow
        .place_order(&gateway, &session.current(), &cart)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("order placement failed"));
    assert_eq!(flow.step(), CheckoutStep::Review);
    assert_eq!(cart.count(), 3);

    // Retrying (an explicit user action) succeeds and clears the cart.
    let order = flow
        .place_order(&gateway, &session.current(), &cart)
        .await
        .unwrap();
    assert_eq!(flow.step(), CheckoutStep::Confirmed);
    assert_eq!(order.id, OrderId::new(501));
    assert!(cart.is_empty());

    // The payload carried the cart's IDs/quantities and the address.
    let requests = gateway.requests.lock().unwrap();
    let request = requests.last().unwrap();
    assert_eq!(request.order_items.len(), 2);
    let quantities: Vec<u32> = request.order_items.iter().map(|i| i.quantity).collect();
    assert_eq!(quantities, vec![2, 1]);
    assert_eq!(request.shipping_address.address2.as_deref(), Some("Flat 3B"));
}

#[tokio::test]
async fn checkout_guards_redirect() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());

    // Anonymous with a full cart → sign-in.
    let session = SessionStore::open(storage.clone());
    let cart = CartStore::open(storage);
    cart.add(&test_product(1, "Bamboo Toothbrush", "12.99"));
    assert_eq!(
        CheckoutFlow::begin(&session.current(), &cart).unwrap_err(),
        CheckoutRedirect::SignIn
    );

    // Signed in with an empty cart → catalog.
    session.login(&bearer_token("asha@example.com", &["BUYER"], 3600));
    cart.clear();
    assert_eq!(
        CheckoutFlow::begin(&session.current(), &cart).unwrap_err(),
        CheckoutRedirect::Catalog
    );
}
