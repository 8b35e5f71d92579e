use chrono::{Days, NaiveDate};

use crate::constants::{
    ANT_CM, CELL_NUCLEUS_CM, DAYS_PER_YEAR, EARTH_DIAMETER_CM, EARTH_SPEED_KMH, HOURS_PER_DAY,
    LIGHT_YEAR_KM, OBSERVABLE_UNIVERSE_LY,
};
use crate::error::{CoreError, Result};

/// Distance covered riding along with Earth for a number of days.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CosmicDistance {
    pub total_hours: i64,
    pub distance_km: i64,
    pub distance_ly: f64,
    /// Share of the observable universe's diameter, in percent.
    pub universe_proportion: f64,
}

/// Where a date sits relative to today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporalRelation {
    Past,
    Today,
    Future,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dayversary {
    pub date: NaiveDate,
    pub age_years: i64,
    pub relation: TemporalRelation,
}

/// Whole days between two dates. Negative when `dob` is after `today`.
pub fn days_alive(dob: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(dob).num_days()
}

/// speed × time = distance, then unit conversions. Fails once the distance
/// in km no longer fits an `i64` (about 2.9e11 days).
pub fn cosmic_distance(days: u64) -> Result<CosmicDistance> {
    let overflow = CoreError::DistanceOverflow { days };
    let total_hours = i64::try_from(days)
        .ok()
        .and_then(|d| d.checked_mul(HOURS_PER_DAY))
        .ok_or(overflow.clone())?;
    let distance_km = total_hours.checked_mul(EARTH_SPEED_KMH).ok_or(overflow)?;
    let distance_ly = distance_km as f64 / LIGHT_YEAR_KM;
    let universe_proportion = distance_ly / OBSERVABLE_UNIVERSE_LY as f64 * 100.0;
    Ok(CosmicDistance {
        total_hours,
        distance_km,
        distance_ly,
        universe_proportion,
    })
}

/// Pharaoh ant length as a share of Earth's diameter (%).
pub fn ant_proportion() -> f64 {
    ANT_CM / EARTH_DIAMETER_CM as f64 * 100.0
}

/// Cell nucleus diameter as a share of Earth's diameter (%).
pub fn cell_proportion() -> f64 {
    CELL_NUCLEUS_CM / EARTH_DIAMETER_CM as f64 * 100.0
}

/// Order of magnitude: floor(log10(n)). Defined for positive reals only.
pub fn magnitude(n: f64) -> Result<i32> {
    if n.is_nan() || n <= 0.0 {
        return Err(CoreError::NonPositiveMagnitude(n));
    }
    Ok(n.log10().floor() as i32)
}

/// How many orders of magnitude separate two percentages.
pub fn orders_of_magnitude_apart(a_percent: f64, b_percent: f64) -> Result<i32> {
    Ok((magnitude(a_percent / 100.0)? - magnitude(b_percent / 100.0)?).abs())
}

/// The date `offset_days` calendar days after birth, and how it relates to
/// `today`. Age is rounded with the 365.25-day mean year, which can be off by
/// one near birthdays.
pub fn dayversary_date(dob: NaiveDate, offset_days: i64, today: NaiveDate) -> Result<Dayversary> {
    let shifted = if offset_days >= 0 {
        dob.checked_add_days(Days::new(offset_days as u64))
    } else {
        dob.checked_sub_days(Days::new(offset_days.unsigned_abs()))
    };
    let date = shifted.ok_or(CoreError::DateOutOfRange { dob, offset_days })?;

    let relation = match date.cmp(&today) {
        std::cmp::Ordering::Less => TemporalRelation::Past,
        std::cmp::Ordering::Equal => TemporalRelation::Today,
        std::cmp::Ordering::Greater => TemporalRelation::Future,
    };

    Ok(Dayversary {
        date,
        age_years: (offset_days as f64 / DAYS_PER_YEAR).round() as i64,
        relation,
    })
}

/// Age in fractional years using the mean year length.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> f64 {
    days_alive(dob, today) as f64 / DAYS_PER_YEAR
}
