pub mod client;
pub mod error;
pub mod extract;
pub mod reconcile;
pub mod targets;
pub mod types;

pub use client::PageClient;
pub use error::{ScraperError, TargetsError};
pub use extract::extract_signals;
pub use reconcile::reconcile;
pub use targets::load_targets;
pub use types::{ControlState, PageSignals, StructuredAvailability, Verdict};
