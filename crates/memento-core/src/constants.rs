/// Earth's speed relative to the cosmic microwave background, km/h
pub const EARTH_SPEED_KMH: i64 = 1_332_000;

/// One light-year in km
pub const LIGHT_YEAR_KM: f64 = 9_461_000_000_000.0;

/// Diameter of the observable universe in light-years
pub const OBSERVABLE_UNIVERSE_LY: i64 = 92_000_000_000;

/// Length of a Pharaoh ant in cm
pub const ANT_CM: f64 = 0.2;

/// Average diameter of an animal cell nucleus in cm
pub const CELL_NUCLEUS_CM: f64 = 0.001;

/// Earth's diameter in cm
pub const EARTH_DIAMETER_CM: i64 = 1_274_200_000;

pub const HOURS_PER_DAY: i64 = 24;

pub const DAYS_PER_WEEK: i64 = 7;

/// Mean calendar year length, accounting for leap years
pub const DAYS_PER_YEAR: f64 = 365.25;

pub const WEEKS_PER_YEAR: u32 = 52;

pub const AVERAGE_LIFESPAN_YEARS: u32 = 80;

/// Dayversary offset shown before the user picks one
pub const DEFAULT_DAYVERSARY_DAYS: i64 = 10_000;

/// Shown in greetings when no name was given
pub const ANONYMOUS_NAME: &str = "space traveller";
