//! Combines the JSON-LD availability and the add-to-cart button state into a
//! single verdict.
//!
//! Agreement is reported as confirmed. Disagreement is reported as a
//! discrepancy that names what the JSON-LD claimed and what the button showed;
//! neither signal silently overrides the other.

use crate::types::{ControlState, StructuredAvailability, Verdict};

/// Reconciles the two page signals.
///
/// Callers short-circuit on [`StructuredAvailability::Absent`] before calling
/// this; if it is passed anyway the result is
/// [`Verdict::NoStructuredDataAvailable`] and `control` is ignored.
#[must_use]
pub fn reconcile(availability: StructuredAvailability, control: ControlState) -> Verdict {
    let control_active = matches!(control, ControlState::Active);
    match (availability, control_active) {
        (StructuredAvailability::Absent, _) => Verdict::NoStructuredDataAvailable,
        (StructuredAvailability::InStock, true) => Verdict::InStock,
        (StructuredAvailability::InStock, false) => {
            Verdict::DiscrepancyClaimedInStockButControlInactive
        }
        (StructuredAvailability::OutOfStock, true) => {
            Verdict::DiscrepancyClaimedOutOfStockButControlActive
        }
        (StructuredAvailability::OutOfStock, false) => Verdict::OutOfStock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_stock_with_active_button_is_confirmed() {
        assert_eq!(
            reconcile(StructuredAvailability::InStock, ControlState::Active),
            Verdict::InStock
        );
    }

    #[test]
    fn in_stock_with_inactive_button_is_discrepancy() {
        assert_eq!(
            reconcile(
                StructuredAvailability::InStock,
                ControlState::InactiveOrMissing
            ),
            Verdict::DiscrepancyClaimedInStockButControlInactive
        );
    }

    #[test]
    fn out_of_stock_with_active_button_is_discrepancy() {
        assert_eq!(
            reconcile(StructuredAvailability::OutOfStock, ControlState::Active),
            Verdict::DiscrepancyClaimedOutOfStockButControlActive
        );
    }

    #[test]
    fn out_of_stock_with_inactive_button_is_confirmed() {
        assert_eq!(
            reconcile(
                StructuredAvailability::OutOfStock,
                ControlState::InactiveOrMissing
            ),
            Verdict::OutOfStock
        );
    }

    #[test]
    fn absent_control_reconciles_like_missing_button() {
        assert_eq!(
            reconcile(StructuredAvailability::InStock, ControlState::Absent),
            Verdict::DiscrepancyClaimedInStockButControlInactive
        );
        assert_eq!(
            reconcile(StructuredAvailability::OutOfStock, ControlState::Absent),
            Verdict::OutOfStock
        );
    }

    #[test]
    fn absent_availability_never_yields_a_stock_verdict() {
        for control in [
            ControlState::Active,
            ControlState::InactiveOrMissing,
            ControlState::Absent,
        ] {
            assert_eq!(
                reconcile(StructuredAvailability::Absent, control),
                Verdict::NoStructuredDataAvailable
            );
        }
    }

    #[test]
    fn discrepancy_messages_name_the_claimed_side() {
        assert_eq!(
            Verdict::DiscrepancyClaimedOutOfStockButControlActive.message(),
            Some("DISCREPANCY: JSON-LD says OUT OF STOCK, but Add to Cart button is active")
        );
        assert_eq!(
            Verdict::DiscrepancyClaimedInStockButControlInactive.message(),
            Some(
                "DISCREPANCY: JSON-LD says IN STOCK, but Add to Cart button is missing or disabled"
            )
        );
        assert!(Verdict::DiscrepancyClaimedInStockButControlInactive.is_discrepancy());
        assert!(!Verdict::InStock.is_discrepancy());
    }

    #[test]
    fn short_circuit_verdicts_have_no_status_message() {
        assert_eq!(Verdict::NoStructuredDataAvailable.message(), None);
        assert_eq!(Verdict::FetchFailed.message(), None);
    }
}
