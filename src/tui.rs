use crate::event::{EventSource, Input, TerminalEvents};
use crate::markup;
use crate::model::{Catalog, Page};
use crate::navigator::{ExitReason, Key, Navigator, Outcome};
use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::stdout;

/// Raw mode plus alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        // From here on, Drop undoes whatever was switched on.
        let guard = TerminalGuard;
        execute!(stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(stdout(), LeaveAlternateScreen, Show) {
            warn!("failed to leave alternate screen: {}", e);
        }
    }
}

/// Run the wizard on the real terminal until the user leaves.
pub fn run_tui(catalog: &Catalog) -> Result<ExitReason> {
    let mut events = TerminalEvents::new().context("failed to install signal handlers")?;
    let _guard = TerminalGuard::enter()?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout())).context("failed to set up terminal")?;
    terminal.clear()?;

    let mut nav = Navigator::new(catalog.len());
    info!("session started with {} pages", catalog.len());

    let reason = event_loop(&mut nav, &mut events, |nav| {
        let page = catalog.page_at(nav.current())?;
        terminal
            .draw(|f| ui(f, page, nav))
            .context("failed to draw page")?;
        Ok(())
    })?;

    info!("session ended on page {} ({:?})", nav.current() + 1, reason);
    Ok(reason)
}

/// Draw, then read and dispatch keys until one of them ends the session.
pub fn event_loop<S, D>(nav: &mut Navigator, events: &mut S, mut draw: D) -> Result<ExitReason>
where
    S: EventSource,
    D: FnMut(&mut Navigator) -> Result<()>,
{
    draw(nav)?;

    loop {
        let event = match events
            .next_input()
            .context("failed to read terminal input")?
        {
            Input::Event(event) => event,
            Input::Closed => return Ok(ExitReason::InputClosed),
            Input::Terminated => return Ok(ExitReason::Interrupted),
        };

        if let Event::Resize(width, height) = event {
            debug!("terminal resized to {}x{}", width, height);
            draw(nav)?;
            continue;
        }

        let key = Key::from_event(&event);
        debug!("key {:?} on page {}", key, nav.current() + 1);

        match nav.on_key(key) {
            Outcome::Redraw => draw(nav)?,
            Outcome::Unchanged => {}
            Outcome::Exit(reason) => return Ok(reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Previous,
    Next,
    Quit,
}

impl Hint {
    fn label(self) -> &'static str {
        match self {
            Hint::Previous => "[P]revious",
            Hint::Next => "[N]ext",
            Hint::Quit => "[Q]uit",
        }
    }

    fn color(self) -> Color {
        match self {
            Hint::Previous => Color::Blue,
            Hint::Next => Color::Green,
            Hint::Quit => Color::Yellow,
        }
    }
}

/// Navigation options offered on the current page.
pub fn hints(nav: &Navigator) -> Vec<Hint> {
    let mut hints = Vec::with_capacity(3);
    if !nav.is_first() {
        hints.push(Hint::Previous);
    }
    if !nav.is_last() {
        hints.push(Hint::Next);
    }
    hints.push(Hint::Quit);
    hints
}

fn hint_line(nav: &Navigator) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, hint) in hints(nav).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  •  "));
        }
        spans.push(Span::styled(hint.label(), Style::default().fg(hint.color())));
    }
    Line::from(spans)
}

fn ui(f: &mut Frame, page: &Page, nav: &mut Navigator) {
    let size = f.area();
    let dim = Style::default().add_modifier(Modifier::DIM);
    let rule = |c: char| Line::from(Span::styled(c.to_string().repeat(size.width as usize), dim));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4), // title + progress
                Constraint::Min(1),    // body
                Constraint::Length(3), // hints
            ]
            .as_ref(),
        )
        .split(size);

    let header = Paragraph::new(vec![
        rule('='),
        Line::from(Span::styled(
            page.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Step {} of {}", nav.current() + 1, nav.len()),
            dim,
        )),
        rule('='),
    ]);
    f.render_widget(header, chunks[0]);

    let body_area = chunks[1];
    let body = Paragraph::new(markup::parse(&page.body)).wrap(Wrap { trim: false });
    let body_height = u16::try_from(body.line_count(body_area.width)).unwrap_or(u16::MAX);
    nav.set_max_scroll(body_height.saturating_sub(body_area.height));
    f.render_widget(body.scroll((nav.scroll(), 0)), body_area);

    let footer = Paragraph::new(vec![rule('─'), Line::default(), hint_line(nav)]);
    f.render_widget(footer, chunks[2]);
}
