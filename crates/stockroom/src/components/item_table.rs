use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use inventory::ItemRecord;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Row, Table, TableState},
};
use tokio::sync::mpsc::UnboundedSender;

use super::{error_message::ErrorMessage, spinner, table_loading::TableLoading, Component};
use crate::{
    action::Action,
    tui::{EventResponse, Frame},
};

const COLUMNS: [&str; 6] = ["Name", "Category", "Cost", "Price", "Stock", "Options"];
const SKELETON_ROWS: u16 = 5;

/// Item list. Asks for a refresh as soon as it gets an action sender.
#[derive(Default)]
pub struct ItemTable {
    items: Vec<ItemRecord>,
    loading: bool,
    error: Option<String>,
    state: TableState,
    tick: u64,
}

impl ItemTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn selected(&self) -> Option<&ItemRecord> {
        self.state.selected().and_then(|idx| self.items.get(idx))
    }

    fn row(item: &ItemRecord) -> Row<'_> {
        let options = if item.with_options {
            item.options.join(", ")
        } else {
            String::new()
        };
        Row::new(vec![
            item.name.clone(),
            item.category.to_string(),
            format!("{:.2}", item.cost),
            format!("{:.2}", item.price),
            item.stock.to_string(),
            options,
        ])
    }
}

impl Component for ItemTable {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        tx.send(Action::RefreshItems)?;
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.select_next();
                Action::Update
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select_previous();
                Action::Update
            }
            KeyCode::Enter => match self.selected().and_then(|item| item.id.clone()) {
                Some(id) => Action::OpenEdit(id),
                None => return Ok(None),
            },
            KeyCode::Char('n') => Action::OpenCreate,
            KeyCode::Char('r') => Action::RefreshItems,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => return Ok(None),
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.tick = self.tick.wrapping_add(1),
            Action::RefreshItems => {
                self.loading = true;
                self.error = None;
            }
            Action::ItemsLoaded(items) => {
                self.loading = false;
                self.items = items;
                let selected = match self.state.selected() {
                    _ if self.items.is_empty() => None,
                    Some(idx) => Some(idx.min(self.items.len() - 1)),
                    None => Some(0),
                };
                self.state.select(selected);
            }
            Action::ItemsFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let [header, error, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(if self.error.is_some() { 1 } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let mut title = vec![Span::styled(
            "Items",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if self.loading {
            title.push(Span::raw(" "));
            title.push(Span::styled(
                spinner::frame(self.tick),
                Style::default().fg(Color::Cyan),
            ));
        }
        f.render_widget(Line::from(title), header);

        if let Some(message) = &self.error {
            f.render_widget(ErrorMessage::new(message), error);
        }

        let widths = [
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(3),
        ];
        let column_header = Row::new(COLUMNS).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

        if self.loading {
            let [head, skeleton] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(body);
            f.render_widget(Table::new(Vec::<Row>::new(), widths).header(column_header), head);
            f.render_widget(
                TableLoading::new(SKELETON_ROWS, COLUMNS.len() as u16).phase(self.tick),
                skeleton,
            );
        } else if self.items.is_empty() {
            let [head, hint] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(body);
            f.render_widget(Table::new(Vec::<Row>::new(), widths).header(column_header), head);
            f.render_widget(
                Line::from("No items yet. Press n to add one.").style(Style::default().fg(Color::DarkGray)),
                hint,
            );
        } else {
            let table = Table::new(self.items.iter().map(Self::row), widths)
                .header(column_header)
                .row_highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
                .highlight_symbol("> ");
            f.render_stateful_widget(table, body, &mut self.state);
        }

        f.render_widget(
            Line::from(vec![
                Span::styled("Up/Down", Style::default().fg(Color::White)),
                Span::raw(": Select   "),
                Span::styled("Enter", Style::default().fg(Color::White)),
                Span::raw(": Edit   "),
                Span::styled("n", Style::default().fg(Color::White)),
                Span::raw(": New   "),
                Span::styled("r", Style::default().fg(Color::White)),
                Span::raw(": Reload   "),
                Span::styled("q", Style::default().fg(Color::White)),
                Span::raw(": Quit"),
            ])
            .style(Style::default().fg(Color::DarkGray)),
            footer,
        );
        Ok(())
    }
}
