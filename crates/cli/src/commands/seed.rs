//! Database seeding command.
//!
//! Loads the farm catalog, inventory lots, subscription plans, and two
//! demo accounts. Safe to re-run: existing rows are left alone.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use ferme_verte_core::Money;

/// Errors from seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    MissingEnvVar(#[from] super::MissingEnvVar),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed")]
    PasswordHash,
}

struct SeedProduct {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    price: Money,
    unit: &'static str,
    images: &'static [&'static str],
    tags: &'static [&'static str],
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Asperges Vertes - 500g",
        slug: "asperges-vertes-500g",
        description: "Botte de 500g d'asperges vertes fraîches, récoltées le matin même. \
                      Idéal pour 2 personnes.",
        price: Money::from_cents(8_50),
        unit: "botte",
        images: &["/images/asperges-500g.jpg"],
        tags: &["populaire", "frais"],
    },
    SeedProduct {
        name: "Asperges Vertes - 1kg",
        slug: "asperges-vertes-1kg",
        description: "Botte de 1kg d'asperges vertes fraîches. Parfait pour une famille \
                      ou un repas entre amis.",
        price: Money::from_cents(15_00),
        unit: "kg",
        images: &["/images/asperges-1kg.jpg"],
        tags: &["famille", "frais"],
    },
    SeedProduct {
        name: "Caisse Asperges Vertes - 5kg",
        slug: "asperges-vertes-5kg",
        description: "Caisse de 5kg d'asperges vertes fraîches. Idéal pour les \
                      restaurateurs ou grandes tablées.",
        price: Money::from_cents(65_00),
        unit: "caisse",
        images: &["/images/asperges-5kg.jpg"],
        tags: &["pro", "gros volume"],
    },
];

struct SeedPlan {
    name: &'static str,
    /// Weekly quantity in tenths of a kilogram.
    qty_kg_tenths: i64,
    price_weekly: Money,
    benefits: &'static [&'static str],
}

const PLANS: &[SeedPlan] = &[
    SeedPlan {
        name: "Mini",
        qty_kg_tenths: 5,
        price_weekly: Money::from_cents(8_50),
        benefits: &[
            "500g d'asperges fraîches par semaine",
            "Livraison gratuite",
            "Recettes exclusives",
        ],
    },
    SeedPlan {
        name: "Famille",
        qty_kg_tenths: 15,
        price_weekly: Money::from_cents(22_00),
        benefits: &[
            "1.5kg d'asperges fraîches par semaine",
            "Livraison gratuite",
            "Recettes exclusives",
            "10% de réduction sur la boutique",
        ],
    },
    SeedPlan {
        name: "Pro",
        qty_kg_tenths: 50,
        price_weekly: Money::from_cents(60_00),
        benefits: &[
            "5kg d'asperges fraîches par semaine",
            "Livraison prioritaire",
            "Support dédié",
            "15% de réduction sur la boutique",
            "Accès early à la précommande",
        ],
    },
];

/// Seed the database.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    let database_url = super::database_url()?;
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Seeding database...");

    seed_user(&pool, "Administrateur", "admin@farm.local", "Admin123!", "ADMIN").await?;
    seed_user(&pool, "Client Test", "user@farm.local", "User123!", "USER").await?;

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for product in PRODUCTS {
        product_ids.push(seed_product(&pool, product).await?);
    }
    tracing::info!(count = PRODUCTS.len(), "Products seeded");

    // Two harvest lots for the bunch products; the 5kg crate starts out of stock
    seed_lot(&pool, &product_ids[0], "LOT-2026-001", 50).await?;
    seed_lot(&pool, &product_ids[1], "LOT-2026-002", 30).await?;

    for plan in PLANS {
        seed_plan(&pool, plan).await?;
    }
    tracing::info!(count = PLANS.len(), "Subscription plans seeded");

    tracing::info!("Seeding complete");
    Ok(())
}

async fn seed_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<(), SeedError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| SeedError::PasswordHash)?
        .to_string();

    sqlx::query(
        r"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5::user_role)
        ON CONFLICT (email) DO NOTHING
        ",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(name)
    .bind(email)
    .bind(hash)
    .bind(role)
    .execute(pool)
    .await?;

    tracing::info!(email, "User seeded");
    Ok(())
}

async fn seed_product(pool: &PgPool, product: &SeedProduct) -> Result<String, SeedError> {
    let images: Vec<String> = product.images.iter().map(ToString::to_string).collect();
    let tags: Vec<String> = product.tags.iter().map(ToString::to_string).collect();

    // Keep the existing row on re-run but still return its id
    let (id,): (String,) = sqlx::query_as(
        r"
        INSERT INTO products (id, name, slug, description, price, unit, images, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
        RETURNING id
        ",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(product.name)
    .bind(product.slug)
    .bind(product.description)
    .bind(product.price)
    .bind(product.unit)
    .bind(images)
    .bind(tags)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn seed_lot(
    pool: &PgPool,
    product_id: &str,
    lot_code: &str,
    quantity: i32,
) -> Result<(), SeedError> {
    sqlx::query(
        r"
        INSERT INTO inventory_lots
            (id, product_id, lot_code, quantity_available, harvest_date, expires_at)
        VALUES ($1, $2, $3, $4, CURRENT_DATE, now() + INTERVAL '7 days')
        ON CONFLICT (lot_code) DO NOTHING
        ",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(product_id)
    .bind(lot_code)
    .bind(quantity)
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_plan(pool: &PgPool, plan: &SeedPlan) -> Result<(), SeedError> {
    let benefits: Vec<String> = plan.benefits.iter().map(ToString::to_string).collect();
    let qty_kg = rust_decimal::Decimal::new(plan.qty_kg_tenths, 1);

    sqlx::query(
        r"
        INSERT INTO subscription_plans (id, name, qty_kg, price_weekly, benefits)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (name) DO NOTHING
        ",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(plan.name)
    .bind(qty_kg)
    .bind(plan.price_weekly)
    .bind(benefits)
    .execute(pool)
    .await?;
    Ok(())
}
