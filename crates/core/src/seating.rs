//! Seating-chart invariants.
//!
//! A guest holds at most one assignment; moving a guest replaces the old
//! row. Capacity is a real constraint here: a table never accepts more
//! guests than `max_seats`, and numbered seats are exclusive. The
//! repository runs these checks inside the assignment transaction; the
//! functions themselves are pure so they can be exercised directly.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Largest table the floor-plan editor supports.
pub const MAX_TABLE_SEATS: i32 = 26;

/// Validate a table's seat count on create/update.
pub fn validate_max_seats(max_seats: i32) -> Result<(), CoreError> {
    if !(1..=MAX_TABLE_SEATS).contains(&max_seats) {
        return Err(CoreError::Validation(format!(
            "max_seats must be between 1 and {MAX_TABLE_SEATS}, got {max_seats}"
        )));
    }
    Ok(())
}

/// Validate a requested seat number against the table size.
pub fn validate_seat_number(seat_number: i32, max_seats: i32) -> Result<(), CoreError> {
    if !(1..=max_seats).contains(&seat_number) {
        return Err(CoreError::Validation(format!(
            "Seat {seat_number} does not exist at this table (1..{max_seats})"
        )));
    }
    Ok(())
}

/// Reject an assignment to a table that is already full.
///
/// `occupancy` counts the table's current assignments excluding the guest
/// being placed, so moving a guest within one table never trips this.
pub fn check_capacity(occupancy: i64, max_seats: i32) -> Result<(), CoreError> {
    if occupancy >= max_seats as i64 {
        return Err(CoreError::Conflict(format!(
            "Table is full ({occupancy}/{max_seats} seats taken)"
        )));
    }
    Ok(())
}

/// Reject a numbered seat that another guest already holds.
pub fn check_seat_free(seat_taken: bool, seat_number: i32) -> Result<(), CoreError> {
    if seat_taken {
        return Err(CoreError::Conflict(format!(
            "Seat {seat_number} is already taken"
        )));
    }
    Ok(())
}

/// Where a guest currently sits.
///
/// Transitions: `Unassigned -> Assigned` (assign), `Assigned -> Assigned`
/// (move, a replace not a merge), `Assigned -> Unassigned` (remove).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GuestSeating {
    Unassigned,
    Assigned {
        table_id: DbId,
        seat_number: Option<i32>,
    },
}

impl GuestSeating {
    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned { .. })
    }

    /// The state after assigning or moving the guest.
    pub fn assign(self, table_id: DbId, seat_number: Option<i32>) -> Self {
        Self::Assigned {
            table_id,
            seat_number,
        }
    }

    /// The state after removing the guest from their table.
    pub fn remove(self) -> Self {
        Self::Unassigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_seats_bounds() {
        assert!(validate_max_seats(1).is_ok());
        assert!(validate_max_seats(MAX_TABLE_SEATS).is_ok());
        assert!(validate_max_seats(0).is_err());
        assert!(validate_max_seats(MAX_TABLE_SEATS + 1).is_err());
    }

    #[test]
    fn seat_number_bounds() {
        assert!(validate_seat_number(1, 8).is_ok());
        assert!(validate_seat_number(8, 8).is_ok());
        assert!(validate_seat_number(0, 8).is_err());
        assert!(validate_seat_number(9, 8).is_err());
    }

    #[test]
    fn capacity_blocks_full_table() {
        assert!(check_capacity(7, 8).is_ok());
        assert!(check_capacity(8, 8).is_err());
        assert!(check_capacity(9, 8).is_err());
    }

    #[test]
    fn taken_seat_is_a_conflict() {
        assert!(check_seat_free(false, 3).is_ok());
        assert!(check_seat_free(true, 3).is_err());
    }

    #[test]
    fn assignment_state_machine() {
        let state = GuestSeating::Unassigned;
        assert!(!state.is_assigned());

        let seated = state.assign(10, Some(3));
        assert_eq!(
            seated,
            GuestSeating::Assigned {
                table_id: 10,
                seat_number: Some(3)
            }
        );

        // A move replaces the previous assignment outright.
        let moved = seated.assign(11, None);
        assert_eq!(
            moved,
            GuestSeating::Assigned {
                table_id: 11,
                seat_number: None
            }
        );

        assert_eq!(moved.remove(), GuestSeating::Unassigned);
    }
}
