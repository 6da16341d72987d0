//! Signal and verdict types shared by extraction and reconciliation.

/// Availability declared by the page's JSON-LD `Product` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredAvailability {
    InStock,
    OutOfStock,
    /// No parseable `Product` block on the page.
    Absent,
}

/// State of the page's add-to-cart button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Active,
    InactiveOrMissing,
    /// Never produced by [`crate::extract_signals`]; reconciled like
    /// [`ControlState::InactiveOrMissing`].
    Absent,
}

/// Both signals read from one page.
///
/// `control` is `None` when no structured availability was found: the button
/// is only inspected once a `Product` block exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSignals {
    pub availability: StructuredAvailability,
    pub control: Option<ControlState>,
}

/// Stock verdict for one target in one polling round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// JSON-LD says in stock and the button agrees.
    InStock,
    /// JSON-LD says out of stock and the button is missing or disabled.
    OutOfStock,
    DiscrepancyClaimedOutOfStockButControlActive,
    DiscrepancyClaimedInStockButControlInactive,
    NoStructuredDataAvailable,
    FetchFailed,
}

impl Verdict {
    /// Status text written after the timestamp and target in a status line.
    ///
    /// `None` for [`Verdict::NoStructuredDataAvailable`] and
    /// [`Verdict::FetchFailed`]: those never produce a status line and are
    /// reported as a warning or error naming the target instead.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Verdict::InStock => Some("IN STOCK (Confirmed by Add to Cart button)"),
            Verdict::OutOfStock => {
                Some("OUT OF STOCK (Confirmed by missing/disabled Add to Cart button)")
            }
            Verdict::DiscrepancyClaimedOutOfStockButControlActive => {
                Some("DISCREPANCY: JSON-LD says OUT OF STOCK, but Add to Cart button is active")
            }
            Verdict::DiscrepancyClaimedInStockButControlInactive => Some(
                "DISCREPANCY: JSON-LD says IN STOCK, but Add to Cart button is missing or disabled",
            ),
            Verdict::NoStructuredDataAvailable | Verdict::FetchFailed => None,
        }
    }

    #[must_use]
    pub fn is_discrepancy(self) -> bool {
        matches!(
            self,
            Verdict::DiscrepancyClaimedOutOfStockButControlActive
                | Verdict::DiscrepancyClaimedInStockButControlInactive
        )
    }
}
