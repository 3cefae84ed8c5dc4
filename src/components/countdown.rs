use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::{Line, Span};
use tui::widgets::Widget;

pub const BIG_HEIGHT: u16 = 3;

const DIGITS: [[&str; 3]; 10] = [
    [" _ ", "| |", "|_|"],
    ["   ", "  |", "  |"],
    [" _ ", " _|", "|_ "],
    [" _ ", " _|", " _|"],
    ["   ", "|_|", "  |"],
    [" _ ", "|_ ", " _|"],
    [" _ ", "|_ ", "|_|"],
    [" _ ", "  |", "  |"],
    [" _ ", "|_|", "|_|"],
    [" _ ", "|_|", " _|"],
];

/// Countdown text drawn with three-row digits, or as a plain line when the
/// area is too small.
pub struct CountdownDisplay<'a> {
    pub text: &'a str,
    pub style: Style,
}

impl Widget for CountdownDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let rows = big_rows(self.text);
        let big_width = rows[0].chars().count() as u16;
        if area.height < BIG_HEIGHT || big_width > area.width {
            let y = area.y + area.height / 2;
            render_centered(Line::from(Span::styled(self.text, self.style)), area, y, buf);
            return;
        }

        let top = area.y + area.height.saturating_sub(BIG_HEIGHT) / 2;
        for (i, row) in rows.iter().enumerate() {
            render_centered(
                Line::from(Span::styled(row.as_str(), self.style)),
                area,
                top + i as u16,
                buf,
            );
        }
    }
}

/// Digits become 3x3 glyphs; anything else sits on the bottom row.
pub fn big_rows(text: &str) -> [String; 3] {
    let mut rows = [String::new(), String::new(), String::new()];
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            for row in rows.iter_mut() {
                row.push(' ');
            }
        }
        match ch.to_digit(10) {
            Some(d) => {
                for (row, glyph) in rows.iter_mut().zip(DIGITS[d as usize]) {
                    row.push_str(glyph);
                }
            }
            None => {
                rows[0].push(' ');
                rows[1].push(' ');
                rows[2].push(ch);
            }
        }
    }
    rows
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    render_line(line, x, y, area.width, buf);
}

fn render_line(line: Line, x: u16, y: u16, max_width: u16, buf: &mut Buffer) {
    let mut cx = x;
    let limit = x.saturating_add(max_width);
    for span in &line.spans {
        let mut run = String::new();
        for ch in span.content.chars() {
            if cx >= limit {
                break;
            }
            run.push(ch);
            cx += 1;
        }
        let start = cx.saturating_sub(run.chars().count() as u16);
        if !run.is_empty() {
            buf.set_string(start, y, run, span.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn digits_expand_to_three_rows() {
        let rows = big_rows("1h");
        assert_eq!(rows[0], "     ");
        assert_eq!(rows[1], "  |  ");
        assert_eq!(rows[2], "  | h");
    }

    #[test]
    fn rows_have_equal_width() {
        let rows = big_rows("1d 23h 4m 56s");
        let widths: Vec<usize> = rows.iter().map(|r| r.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn narrow_area_falls_back_to_plain_text() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        CountdownDisplay { text: "0h 5m 9s", style: Style::default() }.render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "0h 5m 9s");
    }

    #[test]
    fn wide_area_draws_big_digits() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        CountdownDisplay { text: "8s", style: Style::default() }.render(area, &mut buf);
        assert_eq!(row_text(&buf, 1).trim(), "|_|");
        assert_eq!(row_text(&buf, 2).trim(), "|_| s");
    }
}
