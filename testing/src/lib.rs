//! # Storefront Testing
//!
//! Testing utilities for storefront reducers and stores.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then builder for reducers ([`ReducerTest`])
//! - Effect assertions and an effect driver for reducer tests
//! - Tracing setup for test output
//!
//! ## Example
//!
//! ```ignore
//! use storefront_testing::{ReducerTest, assertions};
//!
//! #[test]
//! fn adding_a_product_creates_a_line() {
//!     ReducerTest::new(CartReducer::new())
//!         .with_env(())
//!         .given_state(CartState::new())
//!         .when_action(CartAction::AddToCart(shirt()))
//!         .then_state(|state| assert_eq!(state.total_items(), 1))
//!         .then_effects(assertions::assert_no_effects)
//!         .run();
//! }
//! ```

use chrono::{DateTime, Utc};
use storefront_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Deterministic implementations of Environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use storefront_testing::mocks::FixedClock;
    /// use storefront_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

/// Helpers for driving effects and test output.
pub mod helpers {
    use futures::future::BoxFuture;
    use storefront_core::effect::Effect;

    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Honors `RUST_LOG`; safe to call from every test.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Resolve effects into the actions they would feed back to the store
    ///
    /// Futures are awaited in place and delays are collapsed, so a reducer's
    /// follow-up actions can be checked without a store or a timer. Parallel
    /// effects are resolved in declaration order.
    pub fn resolve_effects<A, I>(effects: I) -> BoxFuture<'static, Vec<A>>
    where
        A: Send + 'static,
        I: IntoIterator<Item = Effect<A>>,
    {
        let effects: Vec<Effect<A>> = effects.into_iter().collect();
        Box::pin(async move {
            let mut actions = Vec::new();
            for effect in effects {
                match effect {
                    Effect::None => {},
                    Effect::Delay { action, .. } => actions.push(*action),
                    Effect::Future(fut) => actions.extend(fut.await),
                    Effect::Parallel(inner) | Effect::Sequential(inner) => {
                        actions.extend(resolve_effects(inner).await);
                    },
                }
            }
            actions
        })
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, resolve_effects};
pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use storefront_core::effect::Effect;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn test_resolve_effects_flattens_nested_effects() {
        let effects = vec![
            Effect::None,
            Effect::future(async { Some(1) }),
            Effect::future(async { None }),
            Effect::Parallel(vec![
                Effect::Delay {
                    duration: Duration::from_secs(60),
                    action: Box::new(2),
                },
                Effect::Sequential(vec![Effect::future(async { Some(3) })]),
            ]),
        ];

        assert_eq!(resolve_effects(effects).await, vec![1, 2, 3]);
    }
}
