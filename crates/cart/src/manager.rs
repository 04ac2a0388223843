//! The cart manager: authoritative in-memory cart state.
//!
//! All mutations run under a single mutex held across the whole
//! read-validate-persist-commit sequence, so overlapping calls serialize in
//! arrival order and a rapid double-add cannot lose an update. The
//! persistence slot is written before the in-memory commit; a failed write
//! leaves the cart exactly as it was.

use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use rocket_shoes_core::{CartItem, ProductId};

use crate::catalog::CatalogClient;
use crate::config::CartConfig;
use crate::error::{CartError, CatalogError};
use crate::storage::CartStore;

/// Client-side cart state manager.
///
/// Owned by the application root and handed to whatever renders the cart.
/// The cart is an ordered sequence of lines, unique by product id; a re-add
/// increments the existing line instead of appending a duplicate.
#[derive(Debug)]
pub struct CartManager {
    catalog: CatalogClient,
    store: CartStore,
    items: Mutex<Vec<CartItem>>,
}

impl CartManager {
    /// Initialize the manager from configuration: build the catalog client
    /// and hydrate the cart from the persistence slot.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built, or if the slot content is
    /// unreadable or corrupt. Callers that prefer recovery over failure can
    /// delete the slot file and retry.
    pub async fn new(config: &CartConfig) -> Result<Self, CartError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let store = CartStore::new(config.storage_path.clone());
        Self::with_parts(catalog, store).await
    }

    /// Initialize the manager from pre-built collaborators.
    ///
    /// # Errors
    ///
    /// Fails if the slot content is unreadable or corrupt.
    pub async fn with_parts(catalog: CatalogClient, store: CartStore) -> Result<Self, CartError> {
        let items = store.load().await?;
        Ok(Self {
            catalog,
            store,
            items: Mutex::new(items),
        })
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// Snapshot of the current cart contents.
    pub async fn items(&self) -> Vec<CartItem> {
        self.items.lock().await.clone()
    }

    /// Number of lines in the cart.
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    /// Whether the cart has no lines.
    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    /// Sum of line totals across the cart.
    pub async fn subtotal(&self) -> Decimal {
        self.items.lock().await.iter().map(CartItem::line_total).sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `id` to the cart.
    ///
    /// A product already in the cart has its amount bumped by one, which
    /// re-validates stock. A product not yet in the cart is fetched from the
    /// catalog; an unknown id is reported as [`CartError::ProductNotFound`]
    /// rather than ignored.
    ///
    /// # Errors
    ///
    /// Returns `ProductNotFound`, `InsufficientStock` (on the bump path), or
    /// a catalog/store error. The cart and the slot are unchanged on any
    /// failure.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn add(&self, id: ProductId) -> Result<(), CartError> {
        let mut items = self.items.lock().await;

        let current = items.iter().find(|item| item.id == id).map(|item| item.amount);
        if let Some(current) = current {
            return self
                .set_amount(&mut items, id, current.saturating_add(1))
                .await;
        }

        let product = match self.catalog.product(id).await {
            Ok(product) => product,
            Err(CatalogError::NotFound(_)) => return Err(CartError::ProductNotFound(id)),
            Err(e) => return Err(e.into()),
        };

        let mut next = items.clone();
        next.push(CartItem::new(product, 1));
        self.store.save(&next).await?;
        *items = next;
        Ok(())
    }

    /// Remove the line for `id` from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if there is no such line; the cart
    /// and the slot are unchanged on any failure.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, id: ProductId) -> Result<(), CartError> {
        let mut items = self.items.lock().await;

        if !items.iter().any(|item| item.id == id) {
            return Err(CartError::NotInCart(id));
        }

        let next: Vec<CartItem> = items.iter().filter(|item| item.id != id).cloned().collect();
        self.store.save(&next).await?;
        *items = next;
        Ok(())
    }

    /// Set the absolute quantity for `id`.
    ///
    /// A non-positive `amount` is a silent no-op: nothing changes and
    /// nothing is persisted (removal is only ever explicit). Otherwise the
    /// target amount is validated against the stock available at call time.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if there is no line for `id`,
    /// [`CartError::InsufficientStock`] if `amount` exceeds available
    /// stock, or a catalog/store error. The cart and the slot are unchanged
    /// on any failure.
    #[instrument(skip(self), fields(id = %id, amount))]
    pub async fn update_amount(&self, id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount <= 0 {
            debug!("Ignoring non-positive amount");
            return Ok(());
        }
        // Anything past u32::MAX fails the stock bound regardless.
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);

        let mut items = self.items.lock().await;

        if !items.iter().any(|item| item.id == id) {
            return Err(CartError::NotInCart(id));
        }

        self.set_amount(&mut items, id, amount).await
    }

    /// Validate `amount` against current stock, then persist and commit it
    /// for `id`. Caller holds the state lock and has checked membership.
    async fn set_amount(
        &self,
        items: &mut Vec<CartItem>,
        id: ProductId,
        amount: u32,
    ) -> Result<(), CartError> {
        let stock = self.catalog.stock(id).await?;
        if amount > stock.amount {
            warn!(
                requested = amount,
                available = stock.amount,
                "Amount exceeds available stock"
            );
            return Err(CartError::InsufficientStock {
                id,
                requested: amount,
                available: stock.amount,
            });
        }

        let mut next = items.clone();
        for item in &mut next {
            if item.id == id {
                item.amount = amount;
            }
        }
        self.store.save(&next).await?;
        *items = next;
        Ok(())
    }
}
