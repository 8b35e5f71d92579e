//! Display text for the three panels. Every builder takes the date of birth
//! and today's date explicitly; nothing here reads a clock.

use chrono::NaiveDate;

use crate::calc::{
    CosmicDistance, TemporalRelation, age_in_years, ant_proportion, cell_proportion,
    cosmic_distance, dayversary_date, days_alive, orders_of_magnitude_apart,
};
use crate::constants::{
    ANT_CM, ANONYMOUS_NAME, CELL_NUCLEUS_CM, EARTH_DIAMETER_CM, EARTH_SPEED_KMH,
    OBSERVABLE_UNIVERSE_LY,
};
use crate::error::{CoreError, Result};
use crate::format::{long_date, short_date, thousands, weekday};
use crate::lifespan::{LifespanSettings, years_left};

/// "A Space Journey" panel.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceJourney {
    pub days: i64,
    pub distance: CosmicDistance,
    pub orders_apart: i32,
    pub greeting: String,
    pub birth_info: String,
    pub speed_info: String,
    pub distance_info: String,
    pub feeling_down: String,
    pub need_grounding: String,
    pub universe_comparison: String,
    pub ant_comparison: String,
    pub cell_comparison: String,
    pub conclusion: String,
}

impl SpaceJourney {
    pub fn paragraphs(&self) -> [&str; 10] {
        [
            &self.greeting,
            &self.birth_info,
            &self.speed_info,
            &self.distance_info,
            &self.feeling_down,
            &self.need_grounding,
            &self.universe_comparison,
            &self.ant_comparison,
            &self.cell_comparison,
            &self.conclusion,
        ]
    }
}

/// "Dayversary" panel.
#[derive(Clone, Debug, PartialEq)]
pub struct DayversaryReport {
    pub offset_days: i64,
    pub relation: TemporalRelation,
    pub headline: String,
    /// Empty when the dayversary is today.
    pub age_line: String,
}

/// "Memento Mori" panel text; the grid itself is built separately.
#[derive(Clone, Debug, PartialEq)]
pub struct MementoReport {
    pub years_left: f64,
    pub lifespan_info: String,
    pub calendar_explanation: String,
}

pub fn display_name(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        ANONYMOUS_NAME
    } else {
        trimmed
    }
}

pub fn space_journey(name: &str, dob: NaiveDate, today: NaiveDate) -> Result<SpaceJourney> {
    let days = days_alive(dob, today);
    let elapsed = u64::try_from(days).map_err(|_| CoreError::BirthNotInPast { dob, today })?;
    let distance = cosmic_distance(elapsed)?;
    let ant = ant_proportion();
    let cell = cell_proportion();
    let orders_apart = orders_of_magnitude_apart(distance.universe_proportion, ant)?;

    let speed = thousands(EARTH_SPEED_KMH);
    let billion_km = format!("{:.2}", distance.distance_km as f64 / 1_000_000_000.0);

    Ok(SpaceJourney {
        days,
        distance,
        orders_apart,
        greeting: format!("\u{1F44B} Hello {}!", display_name(name)),
        birth_info: format!(
            "You were born on {}, it was a {}, and you've been travelling on this \
             amazing spaceship we call Earth for {} days.",
            long_date(dob),
            weekday(dob),
            thousands(days)
        ),
        speed_info: format!(
            "Relative to the cosmic microwave background, Earth moves through space \
             at about {speed} km/h."
        ),
        distance_info: format!(
            "Now, since 1 day = 24 hours, it follows that {} days = {} hours and since \
             Earth travels at a speed of {speed} km/h it means that so far in your \
             lifetime you have traveled {} km.",
            thousands(days),
            thousands(distance.total_hours),
            thousands(distance.distance_km)
        ),
        feeling_down: format!(
            "On those days when you wake up and feel like you haven't accomplished \
             enough or if you just need a little nudge, remember that in your lifetime \
             you've already explored over {billion_km} billion kilometers of cosmic space!"
        ),
        need_grounding: format!(
            "When, on the other hand, you feel on top of the world and need to come \
             back down to earth, consider that those {billion_km} billion kilometers are \
             equivalent to just about {:.5} light-years.",
            distance.distance_ly
        ),
        universe_comparison: format!(
            "The observable universe currently has a diameter of about {} light-years, \
             so the portion you've explored so far is equivalent to {:.15}% of its \
             diameter.",
            thousands(OBSERVABLE_UNIVERSE_LY),
            distance.universe_proportion
        ),
        ant_comparison: format!(
            "Does this make you feel like a tiny ant? The comparison doesn't actually \
             hold up. A small ant like the Pharaoh ant is about {ANT_CM}cm long, and \
             compared to Earth's diameter of about {}cm the insect is about {ant:.15}% \
             of it, so this comparison would overestimate the proportion by about \
             {orders_apart} orders of magnitude!",
            thousands(EARTH_DIAMETER_CM)
        ),
        cell_comparison: format!(
            "For a more accurate comparison we need to borrow a microscope! The nucleus \
             of an animal cell measures an average of {CELL_NUCLEUS_CM}cm which, compared \
             to the Earth's diameter, is about {cell:.15}%, much more aligned to our \
             initial proportion."
        ),
        conclusion: "So in conclusion, the distance you've traveled in space so far \
                     compared to the observable universe is equivalent to the length of \
                     the nucleus of an animal cell compared to the Earth's diameter!"
            .to_string(),
    })
}

pub fn dayversary(dob: NaiveDate, offset_days: i64, today: NaiveDate) -> Result<DayversaryReport> {
    let result = dayversary_date(dob, offset_days, today)?;
    let days = thousands(offset_days);
    let when = short_date(result.date);

    let (headline, age_line) = match result.relation {
        TemporalRelation::Past => (
            format!("Your {days} dayversary was on {when}"),
            format!("and you were about {} years old", result.age_years),
        ),
        TemporalRelation::Future => (
            format!("Your {days} dayversary will be on {when}"),
            format!("and you will be about {} years old", result.age_years),
        ),
        TemporalRelation::Today => ("Hooray! Your dayversary is today!!".to_string(), String::new()),
    };

    Ok(DayversaryReport {
        offset_days,
        relation: result.relation,
        headline,
        age_line,
    })
}

pub fn memento_mori(dob: NaiveDate, today: NaiveDate, settings: LifespanSettings) -> MementoReport {
    let average = settings.average_years;
    let age = age_in_years(dob, today);
    let left = years_left(dob, today, settings);
    let preamble = format!(
        "Nowadays, the average human lifespan is {average} years, that is {} weeks or {} days",
        thousands(settings.total_weeks() as i64),
        thousands(settings.total_days() as i64)
    );

    let lifespan_info = if age < average as f64 {
        format!(
            "{preamble}. If you were lucky enough to live that long, you would have {} \
             years left to live, then think again to Marcus Aurelius' words: how will \
             you spend them?",
            left.round() as i64
        )
    } else {
        format!("{preamble} and you were lucky enough to live that long!")
    };

    let calendar_explanation = format!(
        "Each square in this calendar represents a week of your life and each row \
         contains {} weeks, that is 1 year of your life:\n\
         - the dark squares show how much life you've already lived (or as Seneca \
         said, how much you've already died),\n\
         - the light squares show how much life you've (hopefully) got left.",
        settings.weeks_per_year
    );

    MementoReport {
        years_left: left,
        lifespan_info,
        calendar_explanation,
    }
}
