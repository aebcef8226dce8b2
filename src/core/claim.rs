//! Open-shift claiming. The availability check and the assignment are one
//! conditional UPDATE, so two claimers can never both win.

use crate::db::log::audit;
use crate::db::schedules;
use crate::errors::{AppError, AppResult};
use crate::models::{Profile, Role, Shift};
use rusqlite::Connection;

pub struct ClaimLogic;

impl ClaimLogic {
    pub fn claim(conn: &Connection, shift_id: i64, claimant: &Profile) -> AppResult<Shift> {
        if claimant.role != Role::Employee || !claimant.is_active {
            return Err(AppError::Forbidden(
                "Only active employees can claim open shifts".to_string(),
            ));
        }

        if schedules::claim_if_open(conn, shift_id, claimant.id)? == 0 {
            return Err(match schedules::find_shift(conn, shift_id)? {
                None => AppError::NotFound(format!("shift {shift_id}")),
                Some(_) => AppError::AlreadyClaimed(shift_id),
            });
        }

        audit(
            conn,
            "claim",
            &shift_id.to_string(),
            &format!("Claimed by {}", claimant.full_name),
        )?;

        schedules::require_shift(conn, shift_id)
    }
}
