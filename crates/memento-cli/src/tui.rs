//! Interactive tabbed terminal UI.

use std::io::{self, Write};

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, Stylize, style};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use memento_core::{Session, Tab};

use crate::view;

/// Days added or removed per `+`/`-` press.
const DAYVERSARY_STEP: i64 = 100;
const SCROLL_PAGE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Form,
    Panels,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Name,
    Dob,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

pub struct App {
    session: Session,
    today: NaiveDate,
    mode: Mode,
    field: Field,
    name: String,
    dob: String,
    message: Option<String>,
    scroll: usize,
}

impl App {
    /// Starts on the panels when the session already has a subject,
    /// otherwise on the date form.
    pub fn new(session: Session, today: NaiveDate) -> Self {
        let (mode, name, dob) = match session.subject() {
            Some(subject) => (
                Mode::Panels,
                subject.name.clone(),
                subject.dob.format("%Y-%m-%d").to_string(),
            ),
            None => (Mode::Form, String::new(), String::new()),
        };
        Self {
            session,
            today,
            mode,
            field: Field::Dob,
            name,
            dob,
            message: None,
            scroll: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match self.mode {
            Mode::Form => self.form_key(key),
            Mode::Panels => self.panel_key(key),
        }
    }

    fn form_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = match self.field {
                    Field::Name => Field::Dob,
                    Field::Dob => Field::Name,
                };
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input().pop();
            }
            KeyCode::Char(c) => self.input().push(c),
            _ => {}
        }
        Action::Continue
    }

    fn panel_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.session.next_tab();
                self.scroll = 0;
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.session.prev_tab();
                self.scroll = 0;
            }
            KeyCode::Char(c @ '1'..='3') => {
                if let Ok(tab) = c.to_string().parse::<Tab>() {
                    self.session.select(tab);
                    self.scroll = 0;
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => self.shift_dayversary(1),
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => self.shift_dayversary(-1),
            KeyCode::PageDown | KeyCode::Char('j') => self.scroll += SCROLL_PAGE,
            KeyCode::PageUp | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(SCROLL_PAGE);
            }
            KeyCode::Char('e') => {
                self.mode = Mode::Form;
                self.message = None;
            }
            _ => {}
        }
        Action::Continue
    }

    fn input(&mut self) -> &mut String {
        match self.field {
            Field::Name => &mut self.name,
            Field::Dob => &mut self.dob,
        }
    }

    fn submit(&mut self) {
        match self.session.submit(&self.name, &self.dob, self.today) {
            Ok(true) => {
                tracing::debug!("submitted date of birth {}", self.dob.trim());
                self.mode = Mode::Panels;
                self.message = None;
                self.scroll = 0;
            }
            Ok(false) => {}
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn shift_dayversary(&mut self, direction: i64) {
        let days = self
            .session
            .dayversary_days()
            .saturating_add(direction * DAYVERSARY_STEP);
        self.session.set_dayversary_days(days);
    }

    /// Full screen contents for a terminal `width` wide and `height` tall.
    pub fn lines(&self, width: usize, height: usize, color: bool) -> Vec<String> {
        let mut lines = vec![self.tab_bar(color), String::new()];

        let body = match self.mode {
            Mode::Form => self.form_lines(color),
            Mode::Panels => match self.session.render(self.today) {
                Ok(Some(panel)) => view::panel_lines(&panel, color, Some(width)),
                Ok(None) => Vec::new(),
                Err(e) => vec![format!("error: {e}")],
            },
        };

        let room = height.saturating_sub(lines.len() + 2);
        let start = self.scroll.min(body.len().saturating_sub(room));
        lines.extend(body.into_iter().skip(start).take(room));

        lines.push(String::new());
        lines.push(self.help_line().to_string());
        lines
    }

    fn tab_bar(&self, color: bool) -> String {
        Tab::ALL
            .iter()
            .map(|&tab| {
                let label = format!(" {} {} ", tab.index() + 1, tab.title());
                match (tab == self.session.active(), color) {
                    (true, true) => style(label).reverse().to_string(),
                    (true, false) => format!("[{label}]"),
                    (false, _) => format!(" {label} "),
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    fn form_lines(&self, color: bool) -> Vec<String> {
        let marker = |field: Field| if self.field == field { ">" } else { " " };
        let mut lines = vec![
            format!("{} Name:          {}", marker(Field::Name), self.name),
            format!("{} Date of birth: {}", marker(Field::Dob), self.dob),
        ];
        if let Some(message) = &self.message {
            lines.push(String::new());
            lines.push(if color {
                style(message).red().to_string()
            } else {
                message.clone()
            });
        }
        lines
    }

    fn help_line(&self) -> &'static str {
        match self.mode {
            Mode::Form => "Tab switch field  Enter submit  Esc quit",
            Mode::Panels => "Tab/arrows panel  1-3 jump  +/- dayversary  PgUp/PgDn scroll  e edit  q quit",
        }
    }
}

/// Take over the terminal until the user quits.
pub fn run(mut app: App) -> Result<()> {
    let mut out = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(&mut out, &mut app);

    execute!(out, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}

fn event_loop(out: &mut impl Write, app: &mut App) -> Result<()> {
    loop {
        let (w, h) = terminal::size()?;
        draw(out, app, w as usize, h as usize)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) == Action::Quit {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

fn draw(out: &mut impl Write, app: &App, width: usize, height: usize) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in app.lines(width, height, true).iter().enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16), Print(line))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 11).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn submitted() -> App {
        let mut app = App::new(Session::default(), today());
        type_str(&mut app, "2000-01-01");
        press(&mut app, KeyCode::Enter);
        app
    }

    #[test]
    fn test_starts_on_form() {
        let app = App::new(Session::default(), today());
        assert_eq!(app.mode, Mode::Form);
        let lines = app.lines(80, 24, false);
        assert!(lines.iter().any(|l| l.contains("Date of birth:")));
    }

    #[test]
    fn test_blank_submit_stays_on_form() {
        let mut app = App::new(Session::default(), today());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Form);
        assert_eq!(app.message, None);
    }

    #[test]
    fn test_bad_date_shows_message() {
        let mut app = App::new(Session::default(), today());
        type_str(&mut app, "not a date");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Form);
        assert!(app.message.is_some());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.dob, "not a dat");
    }

    #[test]
    fn test_name_field() {
        let mut app = App::new(Session::default(), today());
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Ada");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2000-01-01");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.subject().unwrap().name, "Ada");
    }

    #[test]
    fn test_tab_navigation() {
        let mut app = submitted();
        assert_eq!(app.mode, Mode::Panels);
        assert_eq!(app.session.active(), Tab::SpaceJourney);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.active(), Tab::Dayversary);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.session.active(), Tab::MementoMori);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.active(), Tab::SpaceJourney);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.session.active(), Tab::MementoMori);
    }

    #[test]
    fn test_adjust_dayversary() {
        let mut app = submitted();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.session.dayversary_days(), 10_100);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.session.dayversary_days(), 9_900);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = submitted();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Quit);
        let mut form = App::new(Session::default(), today());
        // 'q' is just a letter on the form
        assert_eq!(press(&mut form, KeyCode::Char('q')), Action::Continue);
        assert_eq!(press(&mut form, KeyCode::Esc), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(form.handle_key(ctrl_c), Action::Quit);
    }

    #[test]
    fn test_lines_fit_height() {
        let mut app = submitted();
        press(&mut app, KeyCode::Char('3'));
        let lines = app.lines(120, 30, false);
        assert_eq!(lines.len(), 30);
        assert!(lines[0].contains("[ 3 Memento Mori ]"));

        press(&mut app, KeyCode::PageDown);
        let scrolled = app.lines(120, 30, false);
        assert_ne!(lines[2], scrolled[2]);
    }

    #[test]
    fn test_edit_returns_to_form() {
        let mut app = submitted();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Form);
        assert_eq!(app.dob, "2000-01-01");
    }
}
