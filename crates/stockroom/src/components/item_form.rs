//! Item create/edit form.
//!
//! All values live in the `inventory::ItemForm`; this component only keeps
//! UI state: which row is focused and the line editor while a row is being
//! edited. Rows, top to bottom:
//!
//! name, category, cost, price, stock, "with options" checkbox,
//! then (checkbox on) the option scratch box and one row per option,
//! then the submit button.

use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use inventory::{Category, ItemField, ItemForm, ItemId, ItemRecord, SubmitError, SubmitOutcome};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tracing::{debug, warn};
use tui_input::{backend::crossterm::EventHandler, Input};

use super::{
    error_message::ErrorMessage,
    spinner,
    text_input::{InputKind, TextInput},
    Component,
};
use crate::{
    action::Action,
    tui::{EventResponse, Frame},
};

const OPTION_PLACEHOLDER: &str = "Option";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Field(ItemField),
    OptionInput,
    Option(usize),
    Submit,
}

pub struct ItemFormView {
    label: String,
    form: ItemForm,
    /// Id of the record this view is waiting for, if any.
    awaiting: Option<ItemId>,
    load_error: Option<String>,
    focused: usize,
    editing: Option<Row>,
    input: Input,
    tick: u64,
}

impl ItemFormView {
    pub fn create() -> Self {
        Self::with_form("New item", ItemForm::create(), None)
    }

    /// Edit form whose record is still on its way; locked until
    /// `Action::ItemLoaded` for `id` arrives. Answers for other ids are
    /// ignored.
    pub fn loading(id: ItemId) -> Self {
        Self::with_form("Edit item", ItemForm::create(), Some(id))
    }

    pub fn edit(id: ItemId, record: &ItemRecord) -> Self {
        Self::with_form("Edit item", ItemForm::edit(id, record), None)
    }

    fn with_form(label: &str, form: ItemForm, awaiting: Option<ItemId>) -> Self {
        Self {
            label: label.to_string(),
            form,
            awaiting,
            load_error: None,
            focused: 0,
            editing: None,
            input: Input::default(),
            tick: 0,
        }
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn is_loading(&self) -> bool {
        self.awaiting.is_some()
    }

    fn locked(&self) -> bool {
        self.is_loading() || self.form.store().is_submitting()
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = vec![
            Row::Field(ItemField::Name),
            Row::Field(ItemField::Category),
            Row::Field(ItemField::Cost),
            Row::Field(ItemField::Price),
            Row::Field(ItemField::Stock),
            Row::Field(ItemField::WithOptions),
        ];
        let values = self.form.store().values();
        if values.with_options {
            rows.push(Row::OptionInput);
            rows.extend((0..values.options.len()).map(Row::Option));
        }
        rows.push(Row::Submit);
        rows
    }

    fn focused_row(&self) -> Row {
        self.rows().get(self.focused).copied().unwrap_or(Row::Submit)
    }

    fn focus_next(&mut self) {
        let count = self.rows().len();
        self.focused = (self.focused + 1) % count;
    }

    fn focus_prev(&mut self) {
        let count = self.rows().len();
        self.focused = (self.focused + count - 1) % count;
    }

    fn clamp_focus(&mut self) {
        let count = self.rows().len();
        if self.focused >= count {
            self.focused = count - 1;
        }
    }

    fn start_editing(&mut self, row: Row) {
        let store = self.form.store();
        let seed = match row {
            Row::Field(field) => store.values().text(field).unwrap_or_default().to_string(),
            Row::OptionInput => store.option_input().to_string(),
            Row::Option(index) => store
                .values()
                .options
                .get(index)
                .unwrap_or_default()
                .to_string(),
            Row::Submit => return,
        };
        self.input = Input::new(seed);
        self.editing = Some(row);
    }

    fn cancel_editing(&mut self) {
        self.editing = None;
        self.input.reset();
    }

    fn commit_editing(&mut self) -> Result<()> {
        let Some(row) = self.editing.take() else {
            return Ok(());
        };
        let value = self.input.value().to_string();
        self.input.reset();

        let store = self.form.store_mut();
        match row {
            Row::Field(field) => store.set_field(field, value)?,
            Row::OptionInput => {
                store.set_option_input(value);
                if !store.commit_option_input() {
                    debug!("option input rejected");
                }
            }
            Row::Option(index) => {
                store.edit_option_at(index, &value);
            }
            Row::Submit => {}
        }
        self.clamp_focus();
        Ok(())
    }

    fn cycle_category(&mut self, dir: i32) -> Result<()> {
        let names = Category::names();
        let current = &self.form.store().values().category;
        let next = match names.iter().position(|n| n == current) {
            Some(idx) => (idx as i32 + dir).rem_euclid(names.len() as i32) as usize,
            None => 0,
        };
        self.form
            .store_mut()
            .set_field(ItemField::Category, names[next].clone())?;
        Ok(())
    }

    fn toggle_with_options(&mut self) -> Result<()> {
        let current = self.form.store().values().with_options;
        self.form
            .store_mut()
            .set_field(ItemField::WithOptions, !current)?;
        self.clamp_focus();
        Ok(())
    }

    fn remove_focused_option(&mut self, index: usize) {
        let Some(value) = self.form.store().values().options.get(index).map(str::to_string) else {
            return;
        };
        self.form.store_mut().remove_option(&value);
        self.clamp_focus();
    }

    fn handle_editing_key(&mut self, row: Row, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.commit_editing()?,
            KeyCode::Esc => self.cancel_editing(),
            KeyCode::Char(c) if !input_kind(row).accepts(c) => {}
            _ => {
                self.input.handle_event(&CrosstermEvent::Key(key));
                if row == Row::OptionInput {
                    self.form.store_mut().set_option_input(self.input.value());
                }
            }
        }
        Ok(())
    }

    fn submit(&mut self) -> Option<Action> {
        match self.form.begin_submit() {
            Ok(record) => Some(Action::Persist(record)),
            Err(SubmitError::Invalid(errors)) => {
                debug!(invalid = errors.len(), "form has errors");
                Some(Action::Update)
            }
            Err(SubmitError::AlreadySubmitting) => None,
            Err(e) => {
                warn!("submit failed before reaching the gateway: {e}");
                Some(Action::Error(e.to_string()))
            }
        }
    }

    fn finish_submit(&mut self, outcome: SubmitOutcome) -> Option<Action> {
        let saved = matches!(outcome, SubmitOutcome::Saved(_));
        self.form.complete_submit(outcome);
        self.clamp_focus();
        // a fresh item goes back to the table, an edit stays open
        (saved && !self.form.is_editing()).then_some(Action::OpenList)
    }

    fn error_text(&self) -> Option<&str> {
        self.load_error
            .as_deref()
            .or_else(|| self.form.store().submit_error())
    }

    fn text_input(&self, row: Row, focused: bool) -> TextInput<'_> {
        let store = self.form.store();
        let editing = self.editing == Some(row);
        let value = if editing {
            self.input.value()
        } else {
            match row {
                Row::Field(field) => store.values().text(field).unwrap_or_default(),
                Row::OptionInput => store.option_input(),
                Row::Option(index) => store.values().options.get(index).unwrap_or_default(),
                Row::Submit => "",
            }
        };

        let input = TextInput::new(value)
            .kind(input_kind(row))
            .focused(focused)
            .disabled(self.locked());
        match row {
            Row::Field(field) => {
                let input = input
                    .label(field.label())
                    .required(store.is_required(field))
                    .error(store.get_error(field));
                match field {
                    ItemField::Category => input.placeholder("Select"),
                    ItemField::Cost | ItemField::Price => input.placeholder("0.00"),
                    ItemField::Stock => input.placeholder("0"),
                    _ => input,
                }
            }
            Row::OptionInput => input.placeholder(OPTION_PLACEHOLDER),
            _ => input,
        }
    }

    fn row_height(&self, row: Row) -> u16 {
        match row {
            Row::Field(ItemField::WithOptions) | Row::Submit => 1,
            _ => self.text_input(row, false).height(),
        }
    }

    /// First row to draw so the focused one fits into `height`.
    fn scroll_start(&self, rows: &[Row], height: u16) -> usize {
        let mut start = 0;
        let focused = self.focused.min(rows.len().saturating_sub(1));
        loop {
            let used: u16 = rows[start..=focused]
                .iter()
                .map(|row| self.row_height(*row))
                .sum();
            if used <= height || start == focused {
                return start;
            }
            start += 1;
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![Span::styled(
            self.label.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if self.locked() && self.error_text().is_none() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                spinner::frame(self.tick),
                Style::default().fg(Color::Cyan),
            ));
        }
        f.render_widget(Line::from(spans), area);
    }

    fn draw_checkbox(&self, f: &mut Frame<'_>, area: Rect, focused: bool) {
        let mark = if self.form.store().values().with_options {
            "[x]"
        } else {
            "[ ]"
        };
        let style = if self.is_loading() {
            Style::default().fg(Color::DarkGray)
        } else if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        f.render_widget(
            Line::from(Span::styled(
                format!("{mark} {}", ItemField::WithOptions.label()),
                style,
            )),
            area,
        );
    }

    fn draw_submit(&self, f: &mut Frame<'_>, area: Rect, focused: bool) {
        let label = if self.form.is_editing() {
            "Update"
        } else {
            "Save"
        };
        let style = if self.locked() {
            Style::default().fg(Color::DarkGray)
        } else if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        f.render_widget(
            Line::from(Span::styled(format!("[ {label} ]"), style)),
            area,
        );
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let key = Style::default().fg(Color::White);
        let hints = if self.editing.is_some() {
            vec![
                Span::styled("Enter", key),
                Span::raw(": Confirm   "),
                Span::styled("Esc", key),
                Span::raw(": Cancel"),
            ]
        } else {
            vec![
                Span::styled("Up/Down", key),
                Span::raw(": Navigate   "),
                Span::styled("Enter", key),
                Span::raw(": Edit/Select   "),
                Span::styled("Left/Right", key),
                Span::raw(": Toggle   "),
                Span::styled("Del", key),
                Span::raw(": Remove option   "),
                Span::styled("Ctrl+S", key),
                Span::raw(": Save   "),
                Span::styled("Esc", key),
                Span::raw(": Back"),
            ]
        };
        f.render_widget(
            Line::from(hints).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}

fn input_kind(row: Row) -> InputKind {
    match row {
        Row::Field(field) if field.is_numeric() => InputKind::Number,
        _ => InputKind::Text,
    }
}

impl Component for ItemFormView {
    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if let Some(row) = self.editing {
            self.handle_editing_key(row, key)?;
            return Ok(Some(EventResponse::Stop(Action::Update)));
        }

        if key.code == KeyCode::Esc {
            // leaving mid-save would drop the outcome
            if self.form.store().is_submitting() {
                return Ok(Some(EventResponse::Stop(Action::Update)));
            }
            return Ok(Some(EventResponse::Stop(Action::OpenList)));
        }
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(EventResponse::Stop(Action::Submit)));
        }

        match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.focus_prev();
                return Ok(Some(EventResponse::Stop(Action::Update)));
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus_next();
                return Ok(Some(EventResponse::Stop(Action::Update)));
            }
            _ => {}
        }

        // everything below changes values
        if self.locked() {
            return Ok(None);
        }

        let row = self.focused_row();
        match (row, key.code) {
            (Row::Submit, KeyCode::Enter) => Ok(Some(EventResponse::Stop(Action::Submit))),
            (Row::Field(ItemField::Category), KeyCode::Left) => {
                self.cycle_category(-1)?;
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            (
                Row::Field(ItemField::Category),
                KeyCode::Right | KeyCode::Enter | KeyCode::Char(' '),
            ) => {
                self.cycle_category(1)?;
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            (
                Row::Field(ItemField::WithOptions),
                KeyCode::Left | KeyCode::Right | KeyCode::Enter | KeyCode::Char(' '),
            ) => {
                self.toggle_with_options()?;
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            (Row::Option(index), KeyCode::Delete | KeyCode::Backspace) => {
                self.remove_focused_option(index);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            (Row::Field(_) | Row::OptionInput | Row::Option(_), KeyCode::Enter) => {
                self.start_editing(row);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                Ok(None)
            }
            Action::Submit => Ok(self.submit()),
            Action::SubmitFinished(outcome) => Ok(self.finish_submit(outcome)),
            Action::ItemLoaded(id, record) if self.awaiting.as_ref() == Some(&id) => {
                self.form = ItemForm::edit(id, &record);
                self.awaiting = None;
                self.focused = 0;
                Ok(Some(Action::Update))
            }
            Action::ItemLoadFailed(id, message) if self.awaiting.as_ref() == Some(&id) => {
                self.load_error = Some(message);
                Ok(Some(Action::Update))
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let [header, error, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(if self.error_text().is_some() { 1 } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        self.draw_header(f, header);
        if let Some(message) = self.error_text() {
            f.render_widget(ErrorMessage::new(message), error);
        }
        self.draw_footer(f, footer);

        let rows = self.rows();
        let start = self.scroll_start(&rows, body.height);
        let mut y = body.y;
        for (idx, row) in rows.iter().enumerate().skip(start) {
            let height = self.row_height(*row);
            if y + height > body.bottom() {
                break;
            }
            let rect = Rect::new(body.x, y, body.width, height);
            let focused = idx == self.focused;
            match row {
                Row::Field(ItemField::WithOptions) => self.draw_checkbox(f, rect, focused),
                Row::Submit => self.draw_submit(f, rect, focused),
                _ => {
                    let input = self.text_input(*row, focused);
                    if self.editing == Some(*row) {
                        let width = rect.width.saturating_sub(2) as usize;
                        let scroll = self.input.visual_scroll(width);
                        let input = input.scroll(scroll);
                        f.set_cursor_position(input.cursor_position(rect, self.input.visual_cursor()));
                        f.render_widget(input, rect);
                    } else {
                        f.render_widget(input, rect);
                    }
                }
            }
            y += height;
        }
        Ok(())
    }
}
