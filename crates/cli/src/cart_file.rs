//! File-backed cart storage.
//!
//! The shop commands keep the cart in a JSON file so it survives between
//! invocations, the way a browser cart survives page reloads.

use std::path::PathBuf;

use ferme_verte_core::cart::{CartStorage, StorageError};

/// Cart storage backed by a JSON file.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(e.to_string())),
        }
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        std::fs::write(&self.path, payload).map_err(|e| StorageError::Write(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    use ferme_verte_core::Money;
    use ferme_verte_core::cart::{CartStore, ProductSnapshot};

    fn snapshot() -> ProductSnapshot {
        ProductSnapshot {
            id: "prod-1".into(),
            name: "Asperges Vertes - 500g".to_string(),
            price: Money::from_cents(8_50),
            unit: "botte".to_string(),
            images: vec![],
            slug: "asperges-vertes-500g".to_string(),
        }
    }

    #[test]
    fn cart_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        let mut cart = CartStore::open(FileStorage::new(&path));
        cart.add_item(snapshot(), 3);
        assert_eq!(cart.item_count(), 3);

        let cart = CartStore::open(FileStorage::new(&path));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Money::from_cents(25_50));
    }

    #[test]
    fn missing_file_means_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let cart = CartStore::open(FileStorage::new(dir.path().join("absent.json")));
        assert!(cart.is_empty());
    }
}
