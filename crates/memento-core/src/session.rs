//! Form and tab state for an interactive front end.
//!
//! The session only remembers what the user entered and which panel is
//! showing. Rendering always goes through [`Session::render`] with an
//! explicit `today`, so a front end never caches computed text.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::constants::DEFAULT_DAYVERSARY_DAYS;
use crate::date::parse_date;
use crate::error::{CoreError, Result};
use crate::lifespan::{LifespanGrid, LifespanSettings};
use crate::report::{self, DayversaryReport, MementoReport, SpaceJourney};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    SpaceJourney,
    Dayversary,
    MementoMori,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::SpaceJourney, Tab::Dayversary, Tab::MementoMori];

    pub fn title(self) -> &'static str {
        match self {
            Tab::SpaceJourney => "A Space Journey",
            Tab::Dayversary => "Dayversary",
            Tab::MementoMori => "Memento Mori",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::SpaceJourney => 0,
            Tab::Dayversary => 1,
            Tab::MementoMori => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "journey" | "space" | "space-journey" | "1" => Ok(Tab::SpaceJourney),
            "dayversary" | "2" => Ok(Tab::Dayversary),
            "memento" | "memento-mori" | "3" => Ok(Tab::MementoMori),
            other => Err(format!("unknown tab: {other}")),
        }
    }
}

/// Who the numbers are about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub dob: NaiveDate,
}

/// Rendered content of the active panel.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
    SpaceJourney(SpaceJourney),
    Dayversary(DayversaryReport),
    MementoMori {
        report: MementoReport,
        grid: LifespanGrid,
    },
}

#[derive(Clone, Debug)]
pub struct Session {
    active: Tab,
    subject: Option<Subject>,
    dayversary_days: i64,
    settings: LifespanSettings,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LifespanSettings::default())
    }
}

impl Session {
    pub fn new(settings: LifespanSettings) -> Self {
        Self {
            active: Tab::default(),
            subject: None,
            dayversary_days: DEFAULT_DAYVERSARY_DAYS,
            settings,
        }
    }

    /// Submit the form. A blank date is ignored and returns `Ok(false)`.
    /// The date must parse and lie strictly before `today`.
    pub fn submit(&mut self, name: &str, raw_dob: &str, today: NaiveDate) -> Result<bool> {
        if raw_dob.trim().is_empty() {
            return Ok(false);
        }
        let dob = parse_date(raw_dob)?;
        if dob >= today {
            return Err(CoreError::BirthNotInPast { dob, today });
        }
        self.subject = Some(Subject {
            name: name.trim().to_string(),
            dob,
        });
        Ok(true)
    }

    pub fn is_submitted(&self) -> bool {
        self.subject.is_some()
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn next_tab(&mut self) {
        self.active = self.active.next();
    }

    pub fn prev_tab(&mut self) {
        self.active = self.active.prev();
    }

    pub fn dayversary_days(&self) -> i64 {
        self.dayversary_days
    }

    pub fn set_dayversary_days(&mut self, days: i64) {
        self.dayversary_days = days;
    }

    pub fn settings(&self) -> LifespanSettings {
        self.settings
    }

    /// Render the active panel, or `None` before a date has been submitted.
    pub fn render(&self, today: NaiveDate) -> Result<Option<Panel>> {
        self.subject
            .as_ref()
            .map(|subject| self.render_tab(self.active, subject, today))
            .transpose()
    }

    fn render_tab(&self, tab: Tab, subject: &Subject, today: NaiveDate) -> Result<Panel> {
        Ok(match tab {
            Tab::SpaceJourney => {
                Panel::SpaceJourney(report::space_journey(&subject.name, subject.dob, today)?)
            }
            Tab::Dayversary => Panel::Dayversary(report::dayversary(
                subject.dob,
                self.dayversary_days,
                today,
            )?),
            Tab::MementoMori => Panel::MementoMori {
                report: report::memento_mori(subject.dob, today, self.settings),
                grid: LifespanGrid::build(subject.dob, today, self.settings),
            },
        })
    }
}
