use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{Alert, ExpenseWidget, WidgetAction};
use crate::error::Result;
use crate::fmt::{format_currency, split_currency};

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub const FOCUSED_STYLE: Style = Style::new().fg(Color::Cyan);
pub const PLACEHOLDER_STYLE: Style = Style::new().fg(Color::DarkGray);

/// The currency symbol is drawn dim so the number stands on its own.
pub const CURRENCY_SYMBOL_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::DIM);
pub const AMOUNT_STYLE: Style = Style::new()
    .fg(Color::Rgb(80, 220, 100))
    .add_modifier(Modifier::BOLD);

const ALERT_STYLE: Style = Style::new().fg(Color::Red);

/// Format cents as two spans: dim symbol, then the bold number.
pub fn money_spans(cents: i64) -> Vec<Span<'static>> {
    let text = format_currency(cents);
    match split_currency(&text) {
        Some((symbol, number)) => vec![
            Span::styled(symbol.to_string(), CURRENCY_SYMBOL_STYLE),
            Span::raw(" "),
            Span::styled(number.to_string(), AMOUNT_STYLE),
        ],
        None => vec![Span::styled(text, AMOUNT_STYLE)],
    }
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

/// Draw a blocking alert centered over `area`.
pub fn draw_alert(frame: &mut Frame, area: Rect, alert: &Alert) {
    let width = area.width.saturating_sub(4).min(60);
    let inner_width = width.saturating_sub(4) as usize;
    let (message, message_lines) = wrap_text(&alert.message, inner_width);
    let height = (message_lines + 4).min(area.height);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let mut lines: Vec<Line> = message
        .lines()
        .map(|l| Line::from(format!(" {l}")))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Enter=fechar", FOOTER_STYLE)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ALERT_STYLE)
        .title(Span::styled(
            format!(" {} ", alert.title),
            ALERT_STYLE.add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

/// Run the widget full screen until it asks to quit. Sets up the terminal,
/// mouse capture and panic hook, then restores the terminal on exit.
pub fn run_widget(widget: &mut ExpenseWidget) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| widget.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                match widget.handle_key(key.code) {
                    WidgetAction::Quit => break Ok(()),
                    WidgetAction::Continue => {}
                }
            }
            Ok(Event::Mouse(mouse)) => widget.handle_mouse(mouse),
            _ => {}
        }
    };

    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    drop(terminal);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_spans_separate_symbol() {
        let spans = money_spans(2050);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content, "R$");
        assert_eq!(spans[0].style, CURRENCY_SYMBOL_STYLE);
        assert_eq!(spans[2].content, "20,50");
    }

    #[test]
    fn test_wrap_text_counts_lines() {
        let (wrapped, lines) = wrap_text("um dois tres quatro", 8);
        assert_eq!(lines, 3);
        assert!(wrapped.contains('\n'));
        assert_eq!(wrap_text("abc", 0), ("abc".to_string(), 1));
    }
}
