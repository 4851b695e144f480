//! Checkout orchestrator.
//!
//! Drives `Idle -> Validating -> SessionRequested -> AwaitingPaymentRedirect`
//! for one checkout attempt. The transition out of `AwaitingPaymentRedirect`
//! is never observed here: control leaves with the browser redirect, and
//! resolution arrives as a fresh entry through the payment callback routes
//! (see [`super::finalize`]). The two are connected only by the session id
//! the provider holds - this is deliberately not one continuous in-memory
//! state machine across the redirect boundary.
//!
//! Nothing before the hand-off creates an order or mutates the cart, so an
//! attempt that starts and never completes (browser closed mid-payment)
//! leaves no partial state behind.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

use velvet_penguin_core::{CheckoutSession, CustomerId};

use crate::error::{AppError, Result};
use crate::services::cart::CartService;
use crate::store::StoreApi;

/// Observable state of a caller's checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    SessionRequested,
    AwaitingPaymentRedirect,
}

impl CheckoutState {
    /// In-flight states block a second submit; `AwaitingPaymentRedirect`
    /// does not - that attempt already left the process and a new
    /// user-initiated checkout is a fresh attempt.
    const fn blocks_new_attempt(self) -> bool {
        matches!(self, Self::Validating | Self::SessionRequested)
    }
}

type StateMap = Arc<Mutex<HashMap<CustomerId, CheckoutState>>>;

/// The checkout state machine, tracked per caller.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    store: Option<Arc<dyn StoreApi>>,
    cart: CartService,
    states: StateMap,
    success_url: Url,
    cancel_url: Url,
    currency: String,
}

impl CheckoutOrchestrator {
    /// Build the orchestrator; the two callback URLs are derived from the
    /// storefront's public base URL once, up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot host the callback paths.
    pub fn new(
        store: Option<Arc<dyn StoreApi>>,
        cart: CartService,
        base_url: &Url,
        currency: &str,
    ) -> std::result::Result<Self, url::ParseError> {
        Ok(Self {
            store,
            cart,
            states: Arc::new(Mutex::new(HashMap::new())),
            success_url: base_url.join("/payment/success")?,
            cancel_url: base_url.join("/payment/failure")?,
            currency: currency.to_string(),
        })
    }

    /// Current state of a caller's attempt.
    #[must_use]
    pub fn state(&self, caller: &CustomerId) -> CheckoutState {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(caller)
            .copied()
            .unwrap_or_default()
    }

    /// Run one checkout attempt up to the redirect hand-off.
    ///
    /// Preconditions (no remote session call is made when they fail):
    /// an authenticated caller, a non-empty cart, and - distinct from an
    /// empty cart - at least one cart line that still resolves to a
    /// product. Session-creation failure surfaces as retryable and returns
    /// the machine to `Idle` with no order created and no cart mutation.
    pub async fn begin(&self, caller: Option<&CustomerId>) -> Result<CheckoutSession> {
        let Some(caller) = caller else {
            return Err(AppError::Precondition("not authenticated".to_string()));
        };

        let guard = self.enter_validating(caller)?;

        let priced = self.cart.priced(caller).await?;
        if priced.lines.is_empty() {
            return Err(AppError::Precondition("cart is empty".to_string()));
        }
        if !priced.has_resolvable_lines() {
            return Err(AppError::EmptyCheckout);
        }
        let items = priced.line_items(&self.currency);

        guard.set(CheckoutState::SessionRequested);
        let store = self.store.as_ref().ok_or(AppError::RemoteUnavailable)?;
        let session = store
            .create_checkout_session(
                caller,
                &items,
                self.success_url.as_str(),
                self.cancel_url.as_str(),
            )
            .await
            .map_err(|e| AppError::SessionCreation(e.to_string()))?;

        guard.finish();
        tracing::info!(
            caller = %caller,
            session_id = %session.id,
            line_items = items.len(),
            "checkout session created, handing off to payment provider"
        );
        Ok(session)
    }

    /// Claim the attempt slot for `caller`, rejecting a double submit.
    fn enter_validating(&self, caller: &CustomerId) -> Result<AttemptGuard> {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        if states.get(caller).copied().unwrap_or_default().blocks_new_attempt() {
            return Err(AppError::Precondition(
                "checkout already in progress".to_string(),
            ));
        }
        states.insert(caller.clone(), CheckoutState::Validating);
        drop(states);
        Ok(AttemptGuard {
            states: self.states.clone(),
            caller: caller.clone(),
            armed: true,
        })
    }

    #[cfg(test)]
    pub(crate) fn force_state(&self, caller: &CustomerId, state: CheckoutState) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(caller.clone(), state);
    }
}

/// Resets the attempt to `Idle` on any exit that is not an explicit
/// hand-off, including a dropped future (the browser abandoning the
/// request mid-call discards the local work; the request already sent to
/// the backend cannot be recalled).
struct AttemptGuard {
    states: StateMap,
    caller: CustomerId,
    armed: bool,
}

impl AttemptGuard {
    fn set(&self, state: CheckoutState) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(self.caller.clone(), state);
    }

    /// Complete the hand-off: the machine stays in
    /// `AwaitingPaymentRedirect` and the guard disarms.
    fn finish(mut self) {
        self.set(CheckoutState::AwaitingPaymentRedirect);
        self.armed = false;
    }
}

impl Drop for AttemptGuard {
    fn drop(&mut self) {
        if self.armed {
            self.set(CheckoutState::Idle);
        }
    }
}
