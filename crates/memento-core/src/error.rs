use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// `magnitude` is only defined for positive reals.
    NonPositiveMagnitude(f64),
    UnparsableDate(String),
    /// Date of birth must lie strictly before today.
    BirthNotInPast { dob: NaiveDate, today: NaiveDate },
    DateOutOfRange { dob: NaiveDate, offset_days: i64 },
    GridShape { rows: usize, cols: usize, cells: usize },
    /// Distance in km would not fit an `i64`.
    DistanceOverflow { days: u64 },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::NonPositiveMagnitude(n) => {
                write!(f, "magnitude requires a positive number, got {n}")
            }
            CoreError::UnparsableDate(raw) => write!(f, "unrecognised date: {raw:?}"),
            CoreError::BirthNotInPast { dob, today } => {
                write!(f, "date of birth {dob} must be before today ({today})")
            }
            CoreError::DateOutOfRange { dob, offset_days } => {
                write!(f, "{dob} + {offset_days} days is outside the calendar range")
            }
            CoreError::GridShape { rows, cols, cells } => {
                write!(f, "{cells} cells cannot be reshaped into {rows}x{cols}")
            }
            CoreError::DistanceOverflow { days } => {
                write!(f, "distance travelled in {days} days is too large to represent")
            }
        }
    }
}

impl std::error::Error for CoreError {}

pub type Result<T> = std::result::Result<T, CoreError>;
