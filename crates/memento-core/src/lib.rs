//! Life-in-numbers arithmetic.
//!
//! Cosmic distance traveled riding along with Earth, dayversary dates, and a
//! memento mori grid of weeks lived against an average lifespan. Also holds
//! the display text for each panel and the tab/form state a front end drives.
//!
//! Zero I/O. Callers pass `today` explicitly everywhere except
//! [`date::today`].

pub mod calc;
pub mod constants;
pub mod date;
pub mod error;
pub mod format;
pub mod layout;
pub mod lifespan;
pub mod report;
pub mod session;

pub use calc::{
    CosmicDistance, Dayversary, TemporalRelation, age_in_years, ant_proportion, cell_proportion,
    cosmic_distance, dayversary_date, days_alive, magnitude, orders_of_magnitude_apart,
};
pub use date::{midnight, parse_date, today};
pub use error::{CoreError, Result};
pub use layout::{ChartLayout, Margins};
pub use lifespan::{LifespanGrid, LifespanSettings, X_TITLE, Y_TITLE, years_left};
pub use report::{DayversaryReport, MementoReport, SpaceJourney};
pub use session::{Panel, Session, Subject, Tab};
