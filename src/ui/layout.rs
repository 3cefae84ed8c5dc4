use tui::layout::{Constraint, Layout, Rect, Size};
pub const TITLE_BAR_HEIGHT: u16 = 3;
pub const LOG_PANE_HEIGHT: u16 = 8;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub title_bar: [Rect; 2],
    pub main: Rect,
    pub logs: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (body, logs) = if show_logs {
            let [body, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_PANE_HEIGHT)])
                    .areas(area);
            (body, logs)
        } else {
            (area, Rect::ZERO)
        };

        if full_screen {
            return LayoutAreas {
                title_bar: [Rect::ZERO, Rect::ZERO],
                main: body,
                logs,
            };
        }

        let [title, main] = Layout::vertical([
            Constraint::Length(TITLE_BAR_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(body);

        LayoutAreas {
            title_bar: Self::split_title_bar(title),
            main,
            logs,
        }
    }

    fn split_title_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }

    /// Game card on top, upcoming list below when there is one.
    pub fn split_game(area: Rect, upcoming_rows: usize) -> (Rect, Rect) {
        if upcoming_rows == 0 {
            return (area, Rect::ZERO);
        }
        // Two border rows around the list.
        let list_height = (upcoming_rows as u16).saturating_add(2);
        let [card, list] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(list_height)]).areas(area);
        (card, list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bar_is_hidden_in_full_screen() {
        let mut layout = LayoutAreas::new(Size::new(80, 24));
        layout.update(Rect::new(0, 0, 80, 24), true, false);
        assert_eq!(layout.title_bar[0], Rect::ZERO);
        assert_eq!(layout.main.height, 24);
    }

    #[test]
    fn log_pane_takes_the_bottom_rows() {
        let mut layout = LayoutAreas::new(Size::new(80, 24));
        layout.update(Rect::new(0, 0, 80, 24), false, true);
        assert_eq!(layout.logs.height, LOG_PANE_HEIGHT);
        assert_eq!(layout.main.height, 24 - LOG_PANE_HEIGHT - TITLE_BAR_HEIGHT);
    }

    #[test]
    fn no_upcoming_games_gives_the_card_everything() {
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(LayoutAreas::split_game(area, 0), (area, Rect::ZERO));
        let (card, list) = LayoutAreas::split_game(area, 3);
        assert_eq!(list.height, 5);
        assert_eq!(card.height, 15);
    }
}
