//! Client-local cart store.
//!
//! The cart is the visitor's "what I intend to buy" state: it lives on the
//! client, survives restarts through a [`CartStorage`] backend, and is never
//! owned by the server. Views observe it through [`CartStore::subscribe`]
//! and re-render from the in-memory state immediately after every mutation;
//! persistence is fire-and-forget.
//!
//! Two failure rules shape the design:
//!
//! - A corrupt or legacy persisted record loads as an empty cart.
//! - A failed write degrades the store to session-only operation with a
//!   single warning; no cart operation ever fails because storage did.

pub mod pricing;
pub mod storage;

pub use pricing::{DELIVERY_FEE, DeliveryMethod, FREE_SHIPPING_THRESHOLD, grand_total, shipping_fee};
pub use storage::{CartStorage, MemoryStorage, PERSISTED_CART_VERSION, PersistedCart, StorageError};

use serde::{Deserialize, Serialize};

use crate::types::{Money, ProductId};

/// Catalog data frozen at the moment an item is added to the cart.
///
/// Later catalog edits (price changes, renames) do not touch existing
/// lines. Adding more of an already-carted product only increments the
/// quantity; a fresh snapshot is captured only after the line has been
/// removed and the product added again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Stable catalog identifier.
    pub id: ProductId,
    /// Display name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Money,
    /// Sales unit label ("botte", "kg", "caisse").
    pub unit: String,
    /// Image references, possibly empty.
    #[serde(default)]
    pub images: Vec<String>,
    /// URL slug for linking back to the product page.
    pub slug: String,
}

/// One row in the cart: a product snapshot and a quantity.
///
/// Invariant: `quantity >= 1`. A quantity edit that would reach zero
/// removes the line instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product as it looked when added.
    pub product: ProductSnapshot,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// Observer invoked synchronously after every state change.
type Observer = Box<dyn Fn(&[CartLine])>;

/// The cart state container.
///
/// Explicitly constructed (one per client session) and injected into
/// whatever needs it; there is no ambient global cart. All operations are
/// synchronous and single-threaded.
pub struct CartStore<S: CartStorage> {
    lines: Vec<CartLine>,
    storage: S,
    observers: Vec<Observer>,
    session_only: bool,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart from its storage backend.
    ///
    /// A missing, unreadable, malformed, or wrong-version record yields an
    /// empty cart; this constructor never fails.
    pub fn open(storage: S) -> Self {
        let lines = match storage.load() {
            Ok(Some(payload)) => parse_record(&payload).unwrap_or_else(|| {
                tracing::warn!("discarding unreadable persisted cart, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "cart storage unreadable, starting empty");
                Vec::new()
            }
        };

        Self {
            lines,
            storage,
            observers: Vec::new(),
            session_only: false,
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// If a line for the product already exists its quantity increases and
    /// its original snapshot is kept; otherwise a new line is appended.
    /// Stock is not checked here; that happens at checkout. A zero
    /// quantity is a no-op.
    pub fn add_item(&mut self, product: ProductSnapshot, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { product, quantity }),
        }

        self.commit();
    }

    /// Set a line's quantity exactly.
    ///
    /// A value of zero or less removes the line. An unknown product id is
    /// a silent no-op, never an error.
    pub fn update_quantity(&mut self, product_id: &ProductId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let new_quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|l| &l.product.id == product_id) {
            Some(line) if line.quantity != new_quantity => {
                line.quantity = new_quantity;
                self.commit();
            }
            _ => {}
        }
    }

    /// Remove a line. Idempotent; unknown ids are a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product.id != product_id);
        if self.lines.len() != before {
            self.commit();
        }
    }

    /// Empty the cart. Used after a successful order. Idempotent.
    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.commit();
        }
    }

    /// Sum of all line totals, in exact cents.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Register an observer called after every state change.
    pub fn subscribe(&mut self, observer: impl Fn(&[CartLine]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Whether a persistence failure has put the store in session-only
    /// mode: state still works but will not survive a restart.
    #[must_use]
    pub const fn is_session_only(&self) -> bool {
        self.session_only
    }

    /// Persist the current state and notify observers.
    ///
    /// The in-memory state is already updated when this runs, so a write
    /// failure only costs durability, never correctness.
    fn commit(&mut self) {
        let record = PersistedCart {
            version: PERSISTED_CART_VERSION,
            lines: self.lines.clone(),
        };

        match serde_json::to_string(&record) {
            Ok(payload) => {
                if let Err(e) = self.storage.save(&payload) {
                    if !self.session_only {
                        tracing::warn!(
                            error = %e,
                            "cart persistence failed, continuing session-only"
                        );
                    }
                    self.session_only = true;
                } else {
                    self.session_only = false;
                }
            }
            Err(e) => {
                // Serialization of plain data should not fail; treat like a write failure.
                tracing::warn!(error = %e, "cart serialization failed");
                self.session_only = true;
            }
        }

        for observer in &self.observers {
            observer(&self.lines);
        }
    }
}

/// Parse a persisted record, returning `None` when it cannot be trusted.
///
/// Zero-quantity lines are dropped and duplicate product ids merged, so
/// the cart invariants hold no matter what was on disk.
fn parse_record(payload: &str) -> Option<Vec<CartLine>> {
    let record: PersistedCart = serde_json::from_str(payload).ok()?;
    if record.version != PERSISTED_CART_VERSION {
        return None;
    }

    let mut lines: Vec<CartLine> = Vec::with_capacity(record.lines.len());
    for line in record.lines {
        if line.quantity == 0 {
            continue;
        }
        match lines.iter_mut().find(|l| l.product.id == line.product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => lines.push(line),
        }
    }
    Some(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn snapshot(id: &str, cents: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Produit {id}"),
            price: Money::from_cents(cents),
            unit: "botte".to_owned(),
            images: vec![],
            slug: format!("produit-{id}"),
        }
    }

    fn empty_store() -> CartStore<MemoryStorage> {
        CartStore::open(MemoryStorage::new())
    }

    /// Storage backend whose writes always fail (quota exceeded, etc.).
    struct BrokenStorage;

    impl CartStorage for BrokenStorage {
        fn load(&self) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn save(&mut self, _payload: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".to_owned()))
        }
    }

    #[test]
    fn test_add_accumulates_into_single_line() {
        let mut cart = empty_store();
        cart.add_item(snapshot("p1", 850), 2);
        cart.add_item(snapshot("p1", 850), 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_add_keeps_original_snapshot_on_merge() {
        let mut cart = empty_store();
        cart.add_item(snapshot("p1", 850), 1);
        // Catalog price changed between adds; the carted price stays frozen.
        cart.add_item(snapshot("p1", 999), 1);

        assert_eq!(cart.lines()[0].product.price, Money::from_cents(850));
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = empty_store();
        cart.add_item(snapshot("p1", 850), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let mut cart = empty_store();
        cart.add_item(snapshot("p1", 850), 2);
        cart.update_quantity(&ProductId::new("p1"), 7);
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_quantity_floor_removes_line() {
        for floor in [0, -5] {
            let mut cart = empty_store();
            cart.add_item(snapshot("p1", 850), 2);
            cart.update_quantity(&ProductId::new("p1"), floor);
            assert!(cart.is_empty(), "quantity {floor} should remove the line");
        }
    }

    #[test]
    fn test_update_quantity_unknown_product_is_noop() {
        let mut cart = empty_store();
        cart.add_item(snapshot("p1", 850), 2);
        cart.update_quantity(&ProductId::new("ghost"), 3);
        cart.update_quantity(&ProductId::new("ghost"), -1);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = empty_store();
        cart.add_item(snapshot("p1", 850), 1);
        cart.add_item(snapshot("p2", 1500), 1);

        cart.remove_item(&ProductId::new("p1"));
        let once = cart.lines().to_vec();
        cart.remove_item(&ProductId::new("p1"));

        assert_eq!(cart.lines(), once.as_slice());
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_subtotal_is_exact() {
        let mut cart = empty_store();
        cart.add_item(snapshot("p1", 850), 2);
        cart.add_item(snapshot("p2", 1500), 1);

        assert_eq!(cart.subtotal(), Money::from_cents(3200));
        assert_eq!(cart.subtotal().to_string(), "32.00");
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_clear_resets_fully() {
        let mut cart = empty_store();
        cart.add_item(snapshot("p1", 850), 4);
        cart.add_item(snapshot("p2", 1500), 2);

        cart.clear();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Money::ZERO);

        // Idempotent
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_round_trip_persistence() {
        let mut storage = MemoryStorage::new();
        {
            let mut cart = CartStore::open(storage.clone());
            cart.add_item(snapshot("p1", 850), 2);
            cart.add_item(snapshot("p2", 1500), 1);
            cart.update_quantity(&ProductId::new("p1"), 3);
            storage = MemoryStorage::with_record(
                cart.storage.record().unwrap().to_owned(),
            );
        }

        let reloaded = CartStore::open(storage);
        assert_eq!(reloaded.lines().len(), 2);
        assert_eq!(reloaded.lines()[0].product.id, ProductId::new("p1"));
        assert_eq!(reloaded.lines()[0].quantity, 3);
        assert_eq!(reloaded.lines()[1].product.id, ProductId::new("p2"));
        assert_eq!(reloaded.lines()[1].quantity, 1);
    }

    #[test]
    fn test_corrupt_record_loads_empty() {
        for record in [
            "not json at all",
            "{\"version\":1}",
            "{\"version\":99,\"lines\":[]}",
            "[1,2,3]",
            "",
        ] {
            let cart = CartStore::open(MemoryStorage::with_record(record.to_owned()));
            assert!(cart.is_empty(), "record {record:?} should load as empty");
        }
    }

    #[test]
    fn test_persisted_duplicates_and_zeroes_are_sanitized() {
        let record = PersistedCart {
            version: PERSISTED_CART_VERSION,
            lines: vec![
                CartLine {
                    product: snapshot("p1", 850),
                    quantity: 2,
                },
                CartLine {
                    product: snapshot("p2", 1500),
                    quantity: 0,
                },
                CartLine {
                    product: snapshot("p1", 850),
                    quantity: 1,
                },
            ],
        };
        let payload = serde_json::to_string(&record).unwrap();

        let cart = CartStore::open(MemoryStorage::with_record(payload));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_write_failure_degrades_to_session_only() {
        let mut cart = CartStore::open(BrokenStorage);
        cart.add_item(snapshot("p1", 850), 2);

        // Mutation succeeded in memory despite the failed write.
        assert_eq!(cart.item_count(), 2);
        assert!(cart.is_session_only());

        // Further operations keep working.
        cart.add_item(snapshot("p2", 1500), 1);
        assert_eq!(cart.subtotal(), Money::from_cents(3200));
    }

    #[test]
    fn test_observers_fire_on_mutation_only() {
        let seen: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut cart = empty_store();
        cart.subscribe(move |lines| {
            sink.borrow_mut()
                .push(lines.iter().map(|l| l.quantity).sum());
        });

        cart.add_item(snapshot("p1", 850), 2);
        cart.remove_item(&ProductId::new("ghost")); // no-op, no notification
        cart.update_quantity(&ProductId::new("p1"), 5);
        cart.clear();
        cart.clear(); // no-op, no notification

        assert_eq!(*seen.borrow(), vec![2, 5, 0]);
    }
}
