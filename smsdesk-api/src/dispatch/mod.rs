//! Bulk SMS dispatch and delivery accounting.
//!
//! [`DispatchEngine`] walks a recipient list once, in order, pacing sends and
//! turning every transport result into a [`DispatchOutcome`]. The
//! [`ledger`] then reduces those outcomes into the single history record
//! written per batch.
//!
//! [`DispatchOutcome`]: shared_types::DispatchOutcome

pub mod engine;
pub mod ledger;
pub mod recipients;

pub use engine::DispatchEngine;
pub use ledger::{record_dispatch, DeliverySummary};
pub use recipients::select_recipients;
