//! Metric names recorded by the [`Store`](crate::Store).
//!
//! The store records through the `metrics` facade; nothing is exported until
//! the application installs a recorder. Call [`describe_store_metrics`] once
//! after installing one so the names carry descriptions.
//!
//! | Metric | Kind | Labels |
//! |--------|------|--------|
//! | `store.commands.total` | counter | |
//! | `store.reducer.duration_seconds` | histogram | |
//! | `store.effects.executed` | counter | `type` |
//! | `store.shutdown.initiated` | counter | |
//! | `store.shutdown.rejected_actions` | counter | |

use metrics::{Unit, describe_counter, describe_histogram};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions accepted by any store
pub const COMMANDS_TOTAL: &str = "store.commands.total";

/// Time spent inside `Reducer::reduce`
pub const REDUCER_DURATION_SECONDS: &str = "store.reducer.duration_seconds";

/// Effects started, labelled by effect type
pub const EFFECTS_EXECUTED: &str = "store.effects.executed";

/// Register descriptions for every store metric with the installed recorder.
pub fn describe_store_metrics() {
    describe_counter!(COMMANDS_TOTAL, Unit::Count, "Actions processed by stores");
    describe_histogram!(
        REDUCER_DURATION_SECONDS,
        Unit::Seconds,
        "Reducer execution time per action"
    );
    describe_counter!(
        EFFECTS_EXECUTED,
        Unit::Count,
        "Effects started, by effect type"
    );
    describe_counter!(
        "store.shutdown.initiated",
        Unit::Count,
        "Graceful shutdowns initiated"
    );
    describe_counter!(
        "store.shutdown.rejected_actions",
        Unit::Count,
        "Actions rejected because the store was shutting down"
    );
}
