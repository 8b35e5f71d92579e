//! Plain-text rendering of a panel, shared by the one-shot commands and
//! the TUI.

use crossterm::style::{Stylize, style};
use memento_core::Panel;
use memento_core::TemporalRelation;

use crate::chart;

/// Lines for a panel. `width` wraps prose; the grid is never wrapped.
pub fn panel_lines(panel: &Panel, color: bool, width: Option<usize>) -> Vec<String> {
    let mut lines = Vec::new();
    match panel {
        Panel::SpaceJourney(journey) => {
            for (i, paragraph) in journey.paragraphs().iter().enumerate() {
                if i > 0 {
                    lines.push(String::new());
                }
                let text = if i == 0 && color {
                    style(paragraph).bold().to_string()
                } else {
                    paragraph.to_string()
                };
                push_wrapped(&mut lines, &text, width);
            }
        }
        Panel::Dayversary(report) => {
            let headline = if color && report.relation == TemporalRelation::Today {
                style(&report.headline).bold().to_string()
            } else {
                report.headline.clone()
            };
            push_wrapped(&mut lines, &headline, width);
            if !report.age_line.is_empty() {
                push_wrapped(&mut lines, &report.age_line, width);
            }
        }
        Panel::MementoMori { report, grid } => {
            push_wrapped(&mut lines, &report.lifespan_info, width);
            lines.push(String::new());
            for line in report.calendar_explanation.lines() {
                push_wrapped(&mut lines, line, width);
            }
            lines.push(String::new());
            lines.extend(chart::terminal_rows(grid, color));
        }
    }
    lines
}

fn push_wrapped(lines: &mut Vec<String>, text: &str, width: Option<usize>) {
    match width {
        Some(w) if w > 0 => lines.extend(wrap(text, w)),
        _ => lines.push(text.to_string()),
    }
}

/// Greedy word wrap on whitespace. Words longer than `width` get a line of
/// their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            out.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || out.is_empty() {
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use memento_core::{Session, Tab};

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rendered(tab: Tab) -> Vec<String> {
        let today = ymd(2000, 1, 11);
        let mut session = Session::default();
        session.submit("", "2000-01-01", today).unwrap();
        session.select(tab);
        let panel = session.render(today).unwrap().unwrap();
        panel_lines(&panel, false, None)
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("averyverylongword x", 4), vec!["averyverylongword", "x"]);
        assert!(wrap("one two three four five", 9).iter().all(|l| l.len() <= 9));
    }

    #[test]
    fn test_journey_lines() {
        let lines = rendered(Tab::SpaceJourney);
        assert!(lines[0].contains("Hello space traveller!"));
        // ten paragraphs separated by blank lines
        assert_eq!(lines.len(), 19);
    }

    #[test]
    fn test_dayversary_lines() {
        let lines = rendered(Tab::Dayversary);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("will be on"));
    }

    #[test]
    fn test_memento_lines_include_grid() {
        let lines = rendered(Tab::MementoMori);
        // header plus one line per year
        assert!(lines.len() > 81);
        assert!(lines.iter().any(|l| l.contains('■')));
    }
}
