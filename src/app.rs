use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{error, info};

use crate::error::Result;
use crate::expenses::{EntryBuilder, ExpenseList, Totals};
use crate::fmt::format_currency;
use crate::form::ExpenseForm;
use crate::logging;
use crate::models::Category;
use crate::render::REMOVE_CONTROL_WIDTH;
use crate::settings::Settings;
use crate::tui::{
    self, money_spans, FOCUSED_STYLE, FOOTER_STYLE, HEADER_STYLE, PLACEHOLDER_STYLE,
    SELECTED_STYLE,
};

const LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Amount,
    Description,
    Category,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Amount => Focus::Description,
            Focus::Description => Focus::Category,
            Focus::Category => Focus::List,
            Focus::List => Focus::Amount,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Amount => Focus::List,
            Focus::Description => Focus::Amount,
            Focus::Category => Focus::Description,
            Focus::List => Focus::Category,
        }
    }
}

pub enum WidgetAction {
    Continue,
    Quit,
}

/// A modal message. While one is open every key only dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

pub struct ExpenseWidget {
    categories: Vec<Category>,
    form: ExpenseForm,
    builder: EntryBuilder,
    list: ExpenseList,
    totals: Totals,
    /// Set when the last recomputation failed and `totals` are left over.
    totals_stale: bool,
    focus: Focus,
    selected: usize,
    scroll_offset: usize,
    /// Where the list was last drawn, for mouse hit-testing.
    list_area: Rect,
    alert: Option<Alert>,
}

impl ExpenseWidget {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            form: ExpenseForm::new(),
            builder: EntryBuilder::new(),
            list: ExpenseList::new(),
            totals: Totals::default(),
            totals_stale: false,
            focus: Focus::Amount,
            selected: 0,
            scroll_offset: 0,
            list_area: Rect::default(),
            alert: None,
        }
    }

    pub fn list(&self) -> &ExpenseList {
        &self.list
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn totals_stale(&self) -> bool {
        self.totals_stale
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn form(&self) -> &ExpenseForm {
        &self.form
    }

    fn raise(&mut self, title: &str, message: String) {
        if self.alert.is_none() {
            self.alert = Some(Alert {
                title: title.to_string(),
                message,
            });
        }
    }

    pub fn submit(&mut self) {
        self.submit_at(Local::now());
    }

    /// Build a record from the form and append it. On success the form is
    /// cleared; on failure the list and form stay as they were.
    pub fn submit_at(&mut self, now: DateTime<Local>) {
        let submission = self.form.submission(&self.categories);
        let record = self.builder.build(submission, now);
        let (id, category, created_at) = (
            record.id,
            record.category_id.clone(),
            record.created_at.clone(),
        );

        match self.list.append(record, &self.categories) {
            Ok(()) => {
                info!(id, category = %category, created_at = %created_at, "expense added");
                self.form.clear();
                self.focus = Focus::Amount;
                self.selected = self.list.len() - 1;
                self.recompute_totals();
            }
            Err(e) => {
                error!(id, error = %e, "failed to add expense");
                self.raise("Erro", format!("Não foi possível adicionar a despesa. {e}"));
            }
        }
    }

    /// On failure the previous totals stay on screen, marked stale.
    pub fn recompute_totals(&mut self) {
        match self.list.totals() {
            Ok(totals) => {
                self.totals = totals;
                self.totals_stale = false;
            }
            Err(e) => {
                error!(error = %e, "failed to update totals");
                self.totals_stale = true;
                self.raise("Erro", format!("Não foi possível atualizar os totais. {e}"));
            }
        }
    }

    fn remove_at(&mut self, index: usize) {
        if let Some(record) = self.list.remove(index) {
            info!(id = record.id, "expense removed");
            if self.selected >= self.list.len() {
                self.selected = self.list.len().saturating_sub(1);
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> WidgetAction {
        if self.alert.is_some() {
            self.alert = None;
            return WidgetAction::Continue;
        }

        match code {
            KeyCode::Esc => return WidgetAction::Quit,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return WidgetAction::Continue;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return WidgetAction::Continue;
            }
            _ => {}
        }

        let count = self.categories.len();
        match self.focus {
            Focus::Amount => match code {
                KeyCode::Enter => self.submit(),
                KeyCode::Backspace => self.form.amount.backspace(),
                KeyCode::Char(c) => self.form.amount.input(c),
                _ => {}
            },
            Focus::Description => match code {
                KeyCode::Enter => self.submit(),
                KeyCode::Backspace => {
                    self.form.description.pop();
                }
                KeyCode::Char(c) => self.form.description.push(c),
                _ => {}
            },
            Focus::Category => match code {
                KeyCode::Enter => self.submit(),
                KeyCode::Right | KeyCode::Down => self.form.next_category(count),
                KeyCode::Left | KeyCode::Up => self.form.prev_category(count),
                _ => {}
            },
            Focus::List => self.handle_list_key(code),
        }
        WidgetAction::Continue
    }

    /// Every list event ends in a totals recomputation, whether or not it
    /// removed anything.
    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.list.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.list.len().saturating_sub(1),
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') => {
                self.remove_at(self.selected);
            }
            _ => {}
        }
        self.recompute_totals();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.alert.is_some() || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let area = self.list_area;
        let inside = mouse.column >= area.x
            && mouse.column < area.right()
            && mouse.row >= area.y
            && mouse.row < area.bottom();
        if !inside {
            return;
        }

        self.focus = Focus::List;
        let index = self.scroll_offset + (mouse.row - area.y) as usize;
        if index < self.list.len() {
            self.selected = index;
            if mouse.column >= area.right().saturating_sub(REMOVE_CONTROL_WIDTH) {
                self.remove_at(index);
            }
        }
        self.recompute_totals();
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let [header_area, sep1, form_area, sep2, list_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.draw_header(frame, header_area);

        let sep_line = "\u{2501}".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(sep_line.as_str()).style(border_style), sep1);
        self.draw_form(frame, form_area);
        frame.render_widget(Paragraph::new(sep_line.as_str()).style(border_style), sep2);
        self.draw_list(frame, list_area);

        let hints = match self.focus {
            Focus::List => " \u{2191}\u{2193}=selecionar  x/Del=remover  Tab=formulário  Esc=sair",
            Focus::Category => " \u{2190}\u{2192}=categoria  Enter=adicionar  Tab=próximo  Esc=sair",
            _ => " Enter=adicionar  Tab=próximo  Esc=sair",
        };
        frame.render_widget(Paragraph::new(hints).style(FOOTER_STYLE), hints_area);

        if let Some(alert) = &self.alert {
            tui::draw_alert(frame, area, alert);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(self.totals.count_label(), HEADER_STYLE),
            Span::raw("  "),
        ];
        spans.extend(money_spans(self.totals.sum_cents));
        if self.totals_stale {
            spans.push(Span::styled(" !", Style::default().fg(Color::Red)));
        }
        spans.push(Span::raw(" "));
        let totals_line = Line::from(spans);
        let totals_width = totals_line.width() as u16;

        let [title_area, totals_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(totals_width)])
                .areas(area);
        frame.render_widget(
            Paragraph::new(" Despesas").style(HEADER_STYLE),
            title_area,
        );
        frame.render_widget(Paragraph::new(totals_line), totals_area);
    }

    fn field_line(&self, label: &str, field: Focus, value: Span<'static>) -> Line<'static> {
        let focused = self.focus == field;
        let marker = if focused { "\u{25b8}" } else { " " };
        let mut spans = vec![Span::styled(
            format!(" {marker} {label:<LABEL_WIDTH$}"),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        spans.push(value);
        if focused && field != Focus::Category {
            spans.push(Span::styled("_", FOCUSED_STYLE));
        }
        Line::from(spans)
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let value_style = |field: Focus| {
            if self.focus == field {
                FOCUSED_STYLE
            } else {
                Style::default()
            }
        };

        let amount = if self.form.amount.is_empty() {
            Span::styled(format_currency(0), PLACEHOLDER_STYLE)
        } else {
            Span::styled(self.form.amount.text().to_string(), value_style(Focus::Amount))
        };

        let description = Span::styled(
            self.form.description.clone(),
            value_style(Focus::Description),
        );

        let category = match self.form.selected_category(&self.categories) {
            Some(c) => Span::styled(format!("\u{2039} {} \u{203a}", c.name), value_style(Focus::Category)),
            None => Span::styled("\u{2039} Selecione \u{203a}", PLACEHOLDER_STYLE),
        };

        let lines = vec![
            self.field_line("Valor", Focus::Amount, amount),
            self.field_line("Despesa", Focus::Description, description),
            self.field_line("Categoria", Focus::Category, category),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
        self.list_area = area;

        if self.list.is_empty() {
            self.scroll_offset = 0;
            frame.render_widget(
                Paragraph::new("   Nenhuma despesa. Preencha o formulário e tecle Enter.")
                    .style(PLACEHOLDER_STYLE),
                area,
            );
            return;
        }

        let visible = (area.height as usize).max(1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible {
            self.scroll_offset = self.selected + 1 - visible;
        }

        let lines: Vec<Line> = self
            .list
            .rows()
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible)
            .map(|(i, row)| {
                let line = row.view.to_line(area.width);
                if self.focus == Focus::List && i == self.selected {
                    line.style(SELECTED_STYLE)
                } else {
                    line
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Start the interactive widget with the configured categories.
pub fn run(settings: Settings) -> Result<()> {
    logging::init(&settings)?;
    info!(categories = settings.categories.len(), "starting expense widget");
    let mut widget = ExpenseWidget::new(settings.categories);
    tui::run_widget(&mut widget)?;
    info!(count = widget.totals().count, "expense widget closed");
    Ok(())
}
