//! Cross-module properties: date parsing → calculations → grid → session.

use chrono::{Days, NaiveDate};
use memento_core::{
    LifespanGrid, LifespanSettings, Panel, Session, Tab, TemporalRelation, cosmic_distance,
    dayversary_date, days_alive, magnitude, parse_date,
};
use proptest::prelude::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn epoch() -> NaiveDate {
    ymd(1900, 1, 1)
}

/// Dates between 1900 and roughly 2173.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..100_000).prop_map(|offset| epoch() + Days::new(offset))
}

#[test]
fn end_to_end_ten_days() {
    let dob = parse_date("2000-01-01").unwrap();
    let today = ymd(2000, 1, 11);
    let days = days_alive(dob, today);
    assert_eq!(days, 10);
    assert_eq!(cosmic_distance(days as u64).unwrap().total_hours, 240);
}

#[test]
fn magnitude_examples() {
    assert_eq!(magnitude(10.0), Ok(1));
    assert_eq!(magnitude(1.0), Ok(0));
    assert_eq!(magnitude(0.5), Ok(-1));
    assert!(magnitude(0.0).is_err());
    assert!(magnitude(-1.0).is_err());
}

#[test]
fn session_walks_all_tabs() {
    let today = ymd(2024, 6, 1);
    let mut session = Session::default();
    session.submit("Grace", "09/12/1906", today).unwrap();

    for tab in Tab::ALL {
        session.select(tab);
        let panel = session.render(today).unwrap().expect("submitted");
        match (tab, panel) {
            (Tab::SpaceJourney, Panel::SpaceJourney(j)) => {
                assert!(j.greeting.contains("Grace"));
            }
            (Tab::Dayversary, Panel::Dayversary(r)) => {
                assert_eq!(r.relation, TemporalRelation::Past);
            }
            (Tab::MementoMori, Panel::MementoMori { grid, report }) => {
                assert_eq!(grid.lived_count(), grid.len());
                assert_eq!(report.years_left, 0.0);
            }
            (tab, panel) => panic!("tab {tab:?} rendered {panel:?}"),
        }
    }
}

proptest! {
    #[test]
    fn days_alive_matches_day_count(d1 in any_date(), gap in 0u64..40_000) {
        let d2 = d1 + Days::new(gap);
        let days = days_alive(d1, d2);
        prop_assert!(days >= 0);
        prop_assert_eq!(days as u64, gap);
    }

    #[test]
    fn dayversary_relation_follows_sign(dob in any_date(), offset in -20_000i64..40_000, today in any_date()) {
        let result = dayversary_date(dob, offset, today).unwrap();
        let expected = match result.date.cmp(&today) {
            std::cmp::Ordering::Less => TemporalRelation::Past,
            std::cmp::Ordering::Equal => TemporalRelation::Today,
            std::cmp::Ordering::Greater => TemporalRelation::Future,
        };
        prop_assert_eq!(result.relation, expected);
        prop_assert_eq!(days_alive(dob, result.date), offset);
    }

    #[test]
    fn dayversary_zero_is_today_only_on_birth_date(dob in any_date(), today in any_date()) {
        let result = dayversary_date(dob, 0, today).unwrap();
        prop_assert_eq!(result.relation == TemporalRelation::Today, dob == today);
    }

    #[test]
    fn grid_size_and_lived_count(
        dob in any_date(),
        today in any_date(),
        years in 1u32..120,
        weeks in 1u32..60,
    ) {
        let settings = LifespanSettings { average_years: years, weeks_per_year: weeks };
        let grid = LifespanGrid::build(dob, today, settings);
        let total = settings.total_weeks();
        prop_assert_eq!(grid.len(), total);

        let weeks_lived = days_alive(dob, today).div_euclid(7);
        prop_assert_eq!(grid.lived_count() as i64, weeks_lived.clamp(0, total as i64));
    }

    #[test]
    fn reshape_then_flatten_is_identity(
        rows in 1usize..20,
        cols in 1usize..20,
        seed in proptest::collection::vec(any::<bool>(), 400),
    ) {
        let flat: Vec<bool> = seed.into_iter().take(rows * cols).collect();
        let grid = LifespanGrid::from_flat(rows, cols, flat.clone()).unwrap();
        let rejoined: Vec<bool> = grid.iter_rows().flatten().copied().collect();
        prop_assert_eq!(&rejoined, &flat);
        prop_assert_eq!(grid.flatten(), flat);
    }
}
