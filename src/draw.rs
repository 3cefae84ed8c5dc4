use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::countdown::{BIG_HEIGHT, CountdownDisplay};
use crate::state::countdown::CountdownPhase;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::view::{GameView, ViewState};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 2] = &["Next Home Game", "Help"];

const HELP_TEXT: &str = "q / Ctrl-C  quit
r           reload the schedule
f           toggle full screen
\"           toggle the log pane
?           this help (Esc to go back)";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.title_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Countdown => draw_countdown_tab(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, title_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Countdown => 0,
        MenuItem::Help => 1,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, title_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, title_bar[1]);
}

fn draw_countdown_tab(f: &mut Frame, area: Rect, app: &App) {
    match &app.state.view {
        ViewState::Loading => draw_message(f, area, Color::DarkGray, "Loading schedule..."),
        ViewState::Error { message } => draw_message(
            f,
            area,
            Color::Red,
            &format!("Couldn't load the schedule.\n{message}\n\nPress r to try again."),
        ),
        ViewState::Empty => draw_message(
            f,
            area,
            Color::Gray,
            &format!("No upcoming home games in {}.", app.settings.schedule),
        ),
        ViewState::HasGame(game) => {
            let (card, list) = LayoutAreas::split_game(area, game.upcoming.len());
            draw_game_card(f, card, app, game);
            if !game.upcoming.is_empty() {
                draw_upcoming(f, list, game);
            }
        }
    }
}

fn draw_message(f: &mut Frame, area: Rect, color: Color, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = msg.lines().count() as u16;
    let [_, text_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(
        Paragraph::new(msg.to_owned())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        text_area,
    );
}

fn draw_game_card(f: &mut Frame, area: Rect, app: &App, game: &GameView) {
    let accent = if game.is_today { Color::Yellow } else { Color::Cyan };
    let block = default_border(accent).title(" Next Home Game ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_, matchup, when, _, clock, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(BIG_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(game.matchup.as_str())
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        matchup,
    );

    let when_style = if game.is_today {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    f.render_widget(
        Paragraph::new(game.when.as_str())
            .style(when_style)
            .alignment(Alignment::Center),
        when,
    );

    if let Some(countdown) = app.state.countdown.countdown() {
        let style = match countdown.phase() {
            CountdownPhase::Running => Style::default().fg(accent),
            CountdownPhase::Started => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        };
        f.render_widget(CountdownDisplay { text: countdown.text(), style }, clock);
    }
}

fn draw_upcoming(f: &mut Frame, area: Rect, game: &GameView) {
    let block = default_border(Color::DarkGray).title(format!(" {} ", game.upcoming_title()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = game
        .upcoming
        .iter()
        .map(|r| r.opponent.chars().count())
        .max()
        .unwrap_or(0);
    let lines: Vec<Line> = game
        .upcoming
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", row.opponent),
                    Style::default().fg(Color::White),
                ),
                Span::styled(row.when.clone(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default().block(default_border(Color::DarkGray).title(" Logs "));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
