//! Shop client command.
//!
//! Talks to a running storefront API while keeping a durable local cart
//! (JSON file, see [`crate::cart_file::FileStorage`]). The cart is only
//! cleared when the server accepts the checkout; a failed submission
//! leaves it untouched so the order can be retried.

use std::path::Path;

use clap::Subcommand;
use serde::{Deserialize, Serialize};

use ferme_verte_core::cart::{CartStore, DeliveryMethod, ProductSnapshot, grand_total, shipping_fee};
use ferme_verte_core::{Money, ProductId};

use crate::cart_file::FileStorage;

/// Shop subcommands.
#[derive(Subcommand)]
pub enum ShopAction {
    /// List the catalog
    Products,
    /// Add a product to the cart by slug
    Add {
        /// Product slug (see `shop products`)
        slug: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line (0 removes it)
    Set {
        /// Product id of the line
        product_id: String,

        /// New quantity
        quantity: i64,
    },
    /// Remove a cart line
    Remove {
        /// Product id of the line
        product_id: String,
    },
    /// Show the cart with totals
    Show,
    /// Empty the cart
    Clear,
    /// Submit the cart as an order
    Checkout {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// `delivery` or `pickup`
        #[arg(long, default_value = "delivery")]
        method: DeliveryMethod,

        #[arg(long, default_value = "")]
        line1: String,

        #[arg(long)]
        line2: Option<String>,

        #[arg(long, default_value = "")]
        city: String,

        #[arg(long, default_value = "")]
        zip: String,

        #[arg(long, default_value = "France")]
        country: String,

        /// Delivery window ("morning", "afternoon", "evening")
        #[arg(long)]
        slot: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
}

/// Errors from shop commands.
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("the storefront answered {status}: {message}")]
    Api { status: u16, message: String },

    #[error("no product with slug \"{0}\"")]
    ProductNotFound(String),

    #[error("the cart is empty")]
    EmptyCart,
}

/// A catalog product as served by `GET /api/products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiProduct {
    id: ProductId,
    name: String,
    slug: String,
    price: Money,
    unit: String,
    #[serde(default)]
    images: Vec<String>,
    total_stock: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutItemPayload {
    product_id: ProductId,
    name: String,
    price: Money,
    quantity: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutPayload {
    name: String,
    email: String,
    phone: String,
    delivery_method: DeliveryMethod,
    line1: String,
    line2: String,
    city: String,
    zip: String,
    country: String,
    delivery_slot: Option<String>,
    notes: Option<String>,
    items: Vec<CheckoutItemPayload>,
    total: Money,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderResponse {
    id: String,
    total: Money,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Run a shop subcommand against the storefront at `base_url`.
///
/// # Errors
///
/// Returns `ShopError` if the request fails or the server rejects it.
pub async fn run(base_url: &str, cart_path: &Path, action: ShopAction) -> Result<(), ShopError> {
    let client = reqwest::Client::new();
    let mut cart = CartStore::open(FileStorage::new(cart_path));

    match action {
        ShopAction::Products => {
            let products = fetch_products(&client, base_url).await?;
            print_products(&products);
        }
        ShopAction::Add { slug, quantity } => {
            let product = fetch_product(&client, base_url, &slug).await?;
            cart.add_item(
                ProductSnapshot {
                    id: product.id,
                    name: product.name.clone(),
                    price: product.price,
                    unit: product.unit,
                    images: product.images,
                    slug: product.slug,
                },
                quantity,
            );
            print_line(&format!("Added {quantity} x {}", product.name));
            print_cart(&cart);
        }
        ShopAction::Set {
            product_id,
            quantity,
        } => {
            cart.update_quantity(&ProductId::from(product_id), quantity);
            print_cart(&cart);
        }
        ShopAction::Remove { product_id } => {
            cart.remove_item(&ProductId::from(product_id));
            print_cart(&cart);
        }
        ShopAction::Show => print_cart(&cart),
        ShopAction::Clear => {
            cart.clear();
            print_line("Cart emptied");
        }
        ShopAction::Checkout {
            name,
            email,
            phone,
            method,
            line1,
            line2,
            city,
            zip,
            country,
            slot,
            notes,
        } => {
            if cart.is_empty() {
                return Err(ShopError::EmptyCart);
            }

            let items: Vec<CheckoutItemPayload> = cart
                .lines()
                .iter()
                .map(|line| CheckoutItemPayload {
                    product_id: line.product.id.clone(),
                    name: line.product.name.clone(),
                    price: line.product.price,
                    quantity: line.quantity,
                })
                .collect();
            let total = grand_total(cart.subtotal(), method);

            let payload = CheckoutPayload {
                name,
                email,
                phone,
                delivery_method: method,
                line1,
                line2: line2.unwrap_or_default(),
                city,
                zip,
                country,
                delivery_slot: slot,
                notes,
                items,
                total,
            };

            let response = client
                .post(format!("{base_url}/api/orders"))
                .json(&payload)
                .send()
                .await?;

            // Keep the cart unless the server took the order
            let order: OrderResponse = parse_response(response).await?;
            cart.clear();

            print_line(&format!("Order {} placed, total {}", order.id, order.total));
        }
    }

    Ok(())
}

async fn fetch_products(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<ApiProduct>, ShopError> {
    let response = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await?;
    parse_response(response).await
}

async fn fetch_product(
    client: &reqwest::Client,
    base_url: &str,
    slug: &str,
) -> Result<ApiProduct, ShopError> {
    let response = client
        .get(format!("{base_url}/api/products/{slug}"))
        .send()
        .await?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(ShopError::ProductNotFound(slug.to_string()));
    }
    parse_response(response).await
}

/// Decode a JSON body, turning non-2xx statuses into `ShopError::Api`.
async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ShopError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<ApiErrorBody>()
        .await
        .map_or_else(|_| status.to_string(), |body| body.error);

    Err(ShopError::Api {
        status: status.as_u16(),
        message,
    })
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}

#[allow(clippy::print_stdout)]
fn print_products(products: &[ApiProduct]) {
    if products.is_empty() {
        println!("No products in the shop right now.");
        return;
    }
    for p in products {
        println!(
            "{:<28} {:>8} / {:<8} stock: {:<4} ({})",
            p.name,
            p.price.to_string(),
            p.unit,
            p.total_stock,
            p.slug
        );
    }
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &CartStore<FileStorage>) {
    if cart.is_empty() {
        println!("The cart is empty.");
        return;
    }

    for line in cart.lines() {
        println!(
            "{} x {:<28} {:>8}   [{}]",
            line.quantity,
            line.product.name,
            line.line_total().to_string(),
            line.product.id
        );
    }

    let subtotal = cart.subtotal();
    println!("Subtotal: {subtotal}");
    println!(
        "Delivery: {} (pickup: {})",
        shipping_fee(subtotal, DeliveryMethod::Delivery),
        shipping_fee(subtotal, DeliveryMethod::Pickup)
    );
    println!("Total if delivered: {}", grand_total(subtotal, DeliveryMethod::Delivery));
}
