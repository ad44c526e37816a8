use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::tracking::assessments::domain::UserId;

/// One daily state snapshot as submitted by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCheckin {
    pub urge: u8,
    pub stress: u8,
    pub mood: u8,
    #[serde(default)]
    pub relapse: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub loss_amount: Option<i64>,
}

/// Stored check-in row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkin {
    pub user_id: UserId,
    pub urge: u8,
    pub stress: u8,
    pub mood: u8,
    pub relapse: bool,
    pub note: Option<String>,
    pub loss_amount: Option<i64>,
    pub recorded_at: NaiveDateTime,
}

/// Per-user streak state: consecutive clean check-in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakSnapshot {
    pub current: u32,
    pub best: u32,
    pub last_checkin_date: Option<NaiveDate>,
}

impl StreakSnapshot {
    pub fn empty() -> Self {
        Self {
            current: 0,
            best: 0,
            last_checkin_date: None,
        }
    }
}

/// What the caller gets back after recording a check-in.
#[derive(Debug, Clone, Serialize)]
pub struct CheckinReceipt {
    pub checkin: Checkin,
    pub previous_streak: u32,
    pub streak: StreakSnapshot,
}
