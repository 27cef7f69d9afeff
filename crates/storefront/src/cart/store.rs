//! Persistent store for the shopper's cart.
//!
//! The cart is kept as JSON text under a single well-known key. Loading never
//! fails: an absent or unreadable document is an empty cart. Saving is
//! best-effort and only logs on failure.

use std::future::Future;
#[cfg(test)]
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tienda_core::Cart;
use tower_sessions::Session;

use crate::models::session_keys;

/// Errors reading or writing a stored cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The stored text is not a valid cart document.
    #[error("stored cart is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The session backend failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Durable key-value slot holding one cart.
pub trait CartStore: Send + Sync {
    /// Load the last saved cart, or an empty cart if none is readable.
    fn load(&self) -> impl Future<Output = Cart> + Send;

    /// Save the cart, logging (not returning) any failure.
    fn save(&self, cart: &Cart) -> impl Future<Output = ()> + Send;
}

/// Decode stored cart text.
///
/// Rejects documents that break cart invariants (duplicate ids, zero
/// quantities, negative prices, blank ids), not just invalid JSON.
///
/// # Errors
///
/// Returns [`CartStoreError::Malformed`] if the text is not a valid cart.
pub fn decode_cart(raw: &str) -> Result<Cart, CartStoreError> {
    Ok(serde_json::from_str(raw)?)
}

/// Encode a cart as stored text.
///
/// # Errors
///
/// Returns [`CartStoreError::Malformed`] if serialization fails.
pub fn encode_cart(cart: &Cart) -> Result<String, CartStoreError> {
    Ok(serde_json::to_string(cart)?)
}

/// Cart store backed by the shopper's session.
#[derive(Debug, Clone)]
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    async fn read(&self) -> Result<Option<Cart>, CartStoreError> {
        let raw = self.session.get::<String>(session_keys::CART).await?;
        raw.as_deref().map(decode_cart).transpose()
    }

    async fn write(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let raw = encode_cart(cart)?;
        self.session.insert(session_keys::CART, raw).await?;
        Ok(())
    }
}

impl CartStore for SessionCartStore {
    async fn load(&self) -> Cart {
        match self.read().await {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable cart");
                Cart::new()
            }
        }
    }

    async fn save(&self, cart: &Cart) {
        if let Err(e) = self.write(cart).await {
            tracing::error!(error = %e, "Failed to save cart");
        }
    }
}

/// In-process cart store holding the raw stored text.
///
/// Clones share the same slot.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    slot: Arc<Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose slot already holds the given text.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The raw stored text, if anything was saved.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
impl CartStore for MemoryCartStore {
    async fn load(&self) -> Cart {
        let Some(raw) = self.raw() else {
            return Cart::new();
        };
        decode_cart(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding unreadable cart");
            Cart::new()
        })
    }

    async fn save(&self, cart: &Cart) {
        match encode_cart(cart) {
            Ok(raw) => {
                *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw);
            }
            Err(e) => tracing::error!(error = %e, "Failed to save cart"),
        }
    }
}
