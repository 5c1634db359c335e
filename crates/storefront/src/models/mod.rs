//! Domain models for the storefront.

pub mod address;
pub mod order;
pub mod preorder;
pub mod product;
pub mod session;
pub mod subscription;
pub mod user;

pub use address::Address;
pub use order::{AddressSnapshot, Order, OrderItem, OrderWithItems};
pub use preorder::PreorderRequest;
pub use product::{Product, ProductWithStock};
pub use session::{CurrentUser, keys as session_keys};
pub use subscription::{Subscription, SubscriptionPlan, SubscriptionWithPlan};
pub use user::{User, UserRole};
