// ── Reactive alert store ──
//
// Snapshot storage with push-based change notification.

mod alert_store;
mod collection;
mod refresh;

pub use alert_store::{AlertStore, AlertUpdate};
