//! Single-file persistence slot for the serialized cart.
//!
//! The cart is stored as one JSON array and replaced wholesale on every
//! accepted mutation. Writes go to a sibling temp file first and are
//! renamed into place, so a reader never observes a partial write.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, instrument};

use rocket_shoes_core::CartItem;

use crate::error::StoreError;

/// File-backed persistence slot holding the serialized cart sequence.
#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    /// Create a store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted cart.
    ///
    /// An absent file is an empty cart. Content that does not parse as a
    /// cart sequence is surfaced as [`StoreError::Corrupt`]; recovery is
    /// the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be read, `Corrupt` if its
    /// content is not a serialized cart.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<CartItem>, StoreError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No persisted cart, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_slice(&raw).map_err(StoreError::Corrupt)
    }

    /// Replace the persisted cart with `items`.
    ///
    /// The new content is written to a temp file and renamed over the slot,
    /// so a crash mid-write leaves the previous cart intact.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the slot cannot be written.
    #[instrument(skip(self, items), fields(path = %self.path.display(), lines = items.len()))]
    pub async fn save(&self, items: &[CartItem]) -> Result<(), StoreError> {
        let json = serde_json::to_vec(items).map_err(StoreError::Corrupt)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rocket_shoes_core::{Product, ProductId};
    use rust_decimal::Decimal;

    fn line(id: i64, amount: u32) -> CartItem {
        CartItem::new(
            Product {
                id: ProductId::new(id),
                title: format!("Product {id}"),
                price: Decimal::new(905, 1), // 90.5
                image: None,
            },
            amount,
        )
    }

    #[tokio::test]
    async fn absent_file_loads_as_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(dir.path().join("cart.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_returns_the_same_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(dir.path().join("cart.json"));

        let items = vec![line(1, 2), line(2, 1)];
        store.save(&items).await.unwrap();
        assert_eq!(store.load().await.unwrap(), items);
    }

    #[tokio::test]
    async fn save_replaces_previous_content_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(dir.path().join("cart.json"));

        store.save(&[line(1, 2), line(2, 1)]).await.unwrap();
        store.save(&[line(2, 3)]).await.unwrap();

        let items = store.load().await.unwrap();
        assert_eq!(items, vec![line(2, 3)]);
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(dir.path().join("cart.json"));

        store.save(&[line(1, 1)]).await.unwrap();
        assert!(!dir.path().join("cart.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_content_surfaces_corrupt_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "{{ definitely not a cart").unwrap();

        let store = CartStore::new(path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn save_into_missing_directory_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(dir.path().join("missing").join("cart.json"));

        let err = store.save(&[line(1, 1)]).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
