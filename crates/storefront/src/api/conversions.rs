//! Conversions from wire shapes to domain types.

use ecobazaar_core::{CurrencyCode, OrderId, Price, ProductId, SellerId};
use rust_decimal::Decimal;
use secrecy::SecretString;

use super::types::{LoginOutcome, Order, OrderItem, Product, SellerSummary};
use super::wire::{LoginWire, OrderItemWire, OrderWire, ProductWire, SellerWire};

/// Convert a JSON number into an exact decimal.
///
/// The backend serializes money as JSON numbers. Going through the f64's
/// shortest display form gives the decimal a human wrote ("12.99"), not the
/// binary expansion of the nearest double.
pub(crate) fn decimal_from_f64(value: f64) -> Decimal {
    value.to_string().parse().unwrap_or_else(|_| {
        tracing::warn!(value, "non-finite amount in API response, using zero");
        Decimal::ZERO
    })
}

/// Convert a JSON number into a price in the marketplace currency.
pub(crate) fn price_from_f64(value: f64) -> Price {
    Price::new(decimal_from_f64(value), CurrencyCode::INR)
}

pub(crate) fn convert_login(wire: LoginWire) -> LoginOutcome {
    LoginOutcome {
        token: SecretString::from(wire.token),
        role: wire.role,
        status: wire.status,
    }
}

pub(crate) fn convert_seller(wire: SellerWire) -> SellerSummary {
    SellerSummary {
        id: SellerId::new(wire.seller_id),
        name: wire.name,
        email: wire.email,
        business_name: wire.business_name,
    }
}

pub(crate) fn convert_product(wire: ProductWire) -> Product {
    Product {
        id: ProductId::new(wire.product_id),
        name: wire.name,
        description: wire.description,
        stock: wire.stock,
        category: wire.category,
        image_path: wire.image_path,
        carbon_emission: wire.carbon_emission,
        price: price_from_f64(wire.price),
        created_at: wire.created_at,
        zero_waste: wire.is_zero_waste_product,
        seller: convert_seller(wire.seller),
    }
}

pub(crate) fn convert_order_item(wire: OrderItemWire) -> OrderItem {
    OrderItem {
        product_id: ProductId::new(wire.product_id),
        product_name: wire.product_name,
        quantity: wire.quantity,
        price: price_from_f64(wire.price),
    }
}

pub(crate) fn convert_order(wire: OrderWire) -> Order {
    Order {
        id: OrderId::new(wire.order_id),
        buyer_name: wire.buyer_name,
        shipping_address: wire.shipping_address,
        total_price: price_from_f64(wire.total_price),
        status: wire.status,
        created_at: wire.created_at,
        items: wire.order_items.into_iter().map(convert_order_item).collect(),
    }
}
