//! Cart session: owns the active cart, keeps it in sync with the server, and
//! notifies subscribers whenever the observable state changes.
//!
//! Every mutation replaces the local cart with the server's snapshot. The
//! client never computes quantities or totals itself, and a failed mutation
//! leaves the previous snapshot untouched.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tonic_core::Cart;
use tonic_storefront::{
    CartLineInput, CartLineUpdate, CartMutation, StorefrontClient, StorefrontError, UserError,
};
use tracing::{debug, error, info, warn};

use crate::storage::CartIdStore;

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    /// Last snapshot received from the server, if any.
    pub cart: Option<Cart>,
    /// Number of cart mutations awaiting a response.
    pub in_flight: usize,
    /// Whether the cart drawer is shown.
    pub is_open: bool,
}

impl CartState {
    /// True while at least one mutation is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.cart.as_ref().map_or(0, |c| c.total_quantity)
    }
}

/// How responses to overlapping mutations are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// Every successful response is applied as it arrives; the final state is
    /// whichever response resolved last.
    LastResponseWins,
    /// A response is applied only if no later-issued mutation has already been
    /// applied. Stale responses are discarded.
    #[default]
    LatestRequestWins,
}

/// What happened to a single cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server snapshot was applied.
    Applied,
    /// Nothing was sent: the session is unconfigured, has no cart, or the
    /// referenced line does not exist.
    Skipped,
    /// The server answered with user errors; the cart is unchanged.
    Rejected(Vec<UserError>),
    /// The request failed; the cart is unchanged.
    Failed(String),
    /// The response arrived after a newer mutation was applied and was dropped.
    Discarded,
}

impl MutationOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

/// Result of [`CartSession::bootstrap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// No storefront client; nothing was attempted.
    NotConfigured,
    /// The persisted cart id still resolves to a cart.
    Restored,
    /// A fresh cart was created and its id persisted.
    Created,
    /// No cart could be established. The session stays usable but every
    /// mutation is skipped until a later bootstrap succeeds.
    Failed(String),
}

enum LineMutation {
    Add(CartLineInput),
    Update(CartLineUpdate),
    Remove(String),
}

impl LineMutation {
    fn operation(&self) -> &'static str {
        match self {
            LineMutation::Add(_) => "add",
            LineMutation::Update(_) => "update",
            LineMutation::Remove(_) => "remove",
        }
    }

    async fn send(
        self,
        client: &StorefrontClient,
        cart_id: &str,
    ) -> Result<CartMutation, StorefrontError> {
        match self {
            LineMutation::Add(line) => client.add_lines(cart_id, &[line]).await,
            LineMutation::Update(line) => client.update_lines(cart_id, &[line]).await,
            LineMutation::Remove(line_id) => client.remove_lines(cart_id, &[line_id]).await,
        }
    }
}

/// A single shopper's cart session.
pub struct CartSession<S> {
    client: Option<StorefrontClient>,
    store: S,
    policy: OrderingPolicy,
    state: watch::Sender<CartState>,
    issued: AtomicU64,
    applied: AtomicU64,
}

impl<S: CartIdStore> CartSession<S> {
    /// Creates an idle session. `client` is `None` when no access token is
    /// configured; every operation then short-circuits.
    pub fn new(client: Option<StorefrontClient>, store: S) -> Self {
        let (state, _) = watch::channel(CartState::default());
        Self {
            client,
            store,
            policy: OrderingPolicy::default(),
            state,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: OrderingPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        self.state.send_modify(|s| s.is_open = !s.is_open);
    }

    fn set_open(&self, open: bool) {
        self.state.send_if_modified(|s| {
            let changed = s.is_open != open;
            s.is_open = open;
            changed
        });
    }

    /// Restores the persisted cart or creates a new one.
    ///
    /// A persisted id that no longer resolves, or whose lookup fails, is
    /// cleared before a fresh cart is created.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        let Some(client) = self.client.as_ref() else {
            debug!("storefront not configured; skipping cart bootstrap");
            return BootstrapOutcome::NotConfigured;
        };

        let saved = self.store.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read persisted cart id");
            None
        });

        if let Some(cart_id) = saved {
            match client.get_cart(&cart_id).await {
                Ok(Some(cart)) => {
                    info!(cart_id = %cart.id, lines = cart.lines.len(), "restored cart");
                    self.adopt(cart);
                    return BootstrapOutcome::Restored;
                }
                Ok(None) => {
                    info!(cart_id = %cart_id, "persisted cart no longer exists");
                    self.forget_cart_id();
                }
                Err(e) => {
                    warn!(cart_id = %cart_id, error = %e, "failed to fetch persisted cart");
                    self.forget_cart_id();
                }
            }
        }

        match client.create_cart().await {
            Ok(CartMutation {
                cart: Some(cart),
                user_errors,
            }) => {
                if !user_errors.is_empty() {
                    warn!(count = user_errors.len(), "cart created with user errors");
                }
                if let Err(e) = self.store.save(&cart.id) {
                    warn!(error = %e, "could not persist cart id");
                }
                info!(cart_id = %cart.id, "created cart");
                self.adopt(cart);
                BootstrapOutcome::Created
            }
            Ok(CartMutation { user_errors, .. }) => {
                let message = join_user_errors(&user_errors, "cart creation returned no cart");
                error!(error = %message, "failed to create cart");
                BootstrapOutcome::Failed(message)
            }
            Err(e) => {
                error!(error = %e, "failed to create cart");
                BootstrapOutcome::Failed(e.to_string())
            }
        }
    }

    /// Adds `quantity` of a variant and opens the drawer on success.
    pub async fn add_line(&self, variant_id: &str, quantity: u32) -> MutationOutcome {
        if quantity == 0 {
            debug!(variant_id, "ignoring add with zero quantity");
            return MutationOutcome::Skipped;
        }
        let line = CartLineInput {
            merchandise_id: variant_id.to_owned(),
            quantity,
        };
        self.mutate(LineMutation::Add(line), true).await
    }

    /// Adds a single unit of a variant.
    pub async fn add_variant(&self, variant_id: &str) -> MutationOutcome {
        self.add_line(variant_id, 1).await
    }

    /// Sets a line's quantity. Zero removes the line.
    pub async fn set_quantity(&self, line_id: &str, quantity: u32) -> MutationOutcome {
        if quantity == 0 {
            return self.remove_line(line_id).await;
        }
        let line = CartLineUpdate {
            id: line_id.to_owned(),
            quantity,
        };
        self.mutate(LineMutation::Update(line), false).await
    }

    pub async fn increment(&self, line_id: &str) -> MutationOutcome {
        match self.line_quantity(line_id) {
            Some(quantity) => self.set_quantity(line_id, quantity.saturating_add(1)).await,
            None => unknown_line(line_id),
        }
    }

    /// Decrements a line; at quantity 1 the line is removed instead.
    pub async fn decrement(&self, line_id: &str) -> MutationOutcome {
        match self.line_quantity(line_id) {
            Some(quantity) if quantity > 1 => self.set_quantity(line_id, quantity - 1).await,
            Some(_) => self.remove_line(line_id).await,
            None => unknown_line(line_id),
        }
    }

    pub async fn remove_line(&self, line_id: &str) -> MutationOutcome {
        self.mutate(LineMutation::Remove(line_id.to_owned()), false)
            .await
    }

    /// Hosted checkout URL for the current cart.
    #[must_use]
    pub fn checkout_url(&self) -> Option<String> {
        self.state
            .borrow()
            .cart
            .as_ref()
            .map(|c| c.checkout_url.clone())
    }

    fn line_quantity(&self, line_id: &str) -> Option<u32> {
        self.state
            .borrow()
            .cart
            .as_ref()
            .and_then(|c| c.line(line_id))
            .map(|l| l.quantity)
    }

    fn adopt(&self, cart: Cart) {
        self.state.send_modify(|s| s.cart = Some(cart));
    }

    fn forget_cart_id(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not clear persisted cart id");
        }
    }

    async fn mutate(&self, mutation: LineMutation, open_on_success: bool) -> MutationOutcome {
        let operation = mutation.operation();
        let Some(client) = self.client.as_ref() else {
            debug!(operation, "storefront not configured; skipping cart mutation");
            return MutationOutcome::Skipped;
        };
        let Some(cart_id) = self.state.borrow().cart.as_ref().map(|c| c.id.clone()) else {
            debug!(operation, "no active cart; skipping cart mutation");
            return MutationOutcome::Skipped;
        };

        // Sequence is fixed before the first await so issue order matches call order.
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.in_flight += 1);

        let result = mutation.send(client, &cart_id).await;

        let mut fresh = None;
        let mut outcome = match result {
            Ok(CartMutation {
                cart: Some(cart),
                user_errors,
            }) if user_errors.is_empty() => {
                fresh = Some(cart);
                MutationOutcome::Applied
            }
            Ok(CartMutation { user_errors, .. }) if !user_errors.is_empty() => {
                warn!(
                    operation,
                    error = %join_user_errors(&user_errors, ""),
                    "cart mutation rejected"
                );
                MutationOutcome::Rejected(user_errors)
            }
            Ok(_) => {
                error!(operation, "cart mutation returned no cart");
                MutationOutcome::Failed("cart mutation returned no cart".to_string())
            }
            Err(e) => {
                error!(operation, error = %e, "cart mutation failed");
                MutationOutcome::Failed(e.to_string())
            }
        };

        let policy = self.policy;
        self.state.send_modify(|s| {
            s.in_flight = s.in_flight.saturating_sub(1);
            let Some(cart) = fresh else {
                return;
            };
            let newest_applied = self.applied.load(Ordering::SeqCst);
            if policy == OrderingPolicy::LatestRequestWins && seq < newest_applied {
                debug!(operation, seq, newest_applied, "discarding stale cart response");
                outcome = MutationOutcome::Discarded;
                return;
            }
            self.applied.fetch_max(seq, Ordering::SeqCst);
            s.cart = Some(cart);
            if open_on_success {
                s.is_open = true;
            }
        });

        outcome
    }
}

fn unknown_line(line_id: &str) -> MutationOutcome {
    debug!(line_id, "line not in cart; skipping");
    MutationOutcome::Skipped
}

fn join_user_errors(errors: &[UserError], fallback: &str) -> String {
    if errors.is_empty() {
        return fallback.to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
