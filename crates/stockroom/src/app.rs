use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use inventory::{ItemGateway, ItemId};
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    action::Action,
    cli::Cmd,
    components::{item_form::ItemFormView, item_table::ItemTable, Component},
    executor::{GatewayExecutor, GatewayTask},
    tui::{Event, EventResponse, Tui},
};

/// The screen currently on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    List,
    Create,
    Edit(ItemId),
}

impl Screen {
    pub fn initial(cmd: &Cmd) -> Self {
        match cmd {
            Cmd::New => Screen::Create,
            Cmd::Edit { id } => Screen::Edit(ItemId::new(id.clone())),
            Cmd::Browse | Cmd::List { .. } => Screen::List,
        }
    }
}

pub struct App {
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub screen: Screen,
    pub page: Box<dyn Component>,
    pub should_quit: bool,
    pub should_suspend: bool,
    executor: GatewayExecutor,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Must be called inside a tokio runtime: the gateway executor is
    /// spawned right away.
    pub fn new(
        gateway: Arc<dyn ItemGateway>,
        cmd: &Cmd,
        tick_rate: f64,
        frame_rate: f64,
    ) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let executor = GatewayExecutor::new(gateway, action_tx.clone());
        let mut app = Self {
            tick_rate,
            frame_rate,
            screen: Screen::List,
            page: Box::new(ItemTable::new()),
            should_quit: false,
            should_suspend: false,
            executor,
            action_tx,
            action_rx,
        };
        app.navigate(Screen::initial(cmd))?;
        Ok(app)
    }

    /// Swap the page. Each screen starts from scratch, so coming back to the
    /// list reloads it.
    pub fn navigate(&mut self, screen: Screen) -> Result<()> {
        info!(?screen, "navigate");
        let mut page: Box<dyn Component> = match &screen {
            Screen::List => Box::new(ItemTable::new()),
            Screen::Create => Box::new(ItemFormView::create()),
            Screen::Edit(id) => {
                self.executor.spawn(GatewayTask::Load(id.clone()));
                Box::new(ItemFormView::loading(id.clone()))
            }
        };
        page.register_action_handler(self.action_tx.clone())?;
        self.page = page;
        self.screen = screen;
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        loop {
            if let Some(event) = tui.next().await {
                self.handle_event(event)?;
            }
            self.handle_actions(&mut tui)?;

            if self.should_suspend {
                tui.suspend()?;
                self.action_tx.send(Action::Resume)?;
                self.action_tx.send(Action::Render)?;
                tui = Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    /// Ctrl bindings win, then the page gets the event; whatever it does not
    /// stop is mapped to a loop action.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = &event {
            if let Some(action) = global_key(*key) {
                self.action_tx.send(action)?;
                return Ok(());
            }
        }

        let stopped = match self.page.handle_events(event.clone())? {
            Some(EventResponse::Continue(action)) => {
                self.action_tx.send(action)?;
                false
            }
            Some(EventResponse::Stop(action)) => {
                self.action_tx.send(action)?;
                true
            }
            None => false,
        };
        if stopped {
            return Ok(());
        }

        let action = match event {
            Event::Quit => Action::Quit,
            Event::Tick => Action::Tick,
            Event::Render => Action::Render,
            Event::Resize(w, h) => Action::Resize(w, h),
            _ => return Ok(()),
        };
        self.action_tx.send(action)?;
        Ok(())
    }

    /// Drain the action channel. Drawing needs the terminal, everything else
    /// works without one.
    pub fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            match action {
                Action::Render => self.render(tui)?,
                Action::Resize(w, h) => {
                    tui.resize(Rect::new(0, 0, w, h))?;
                    self.render(tui)?;
                }
                other => self.dispatch(other)?,
            }
        }
        Ok(())
    }

    /// Apply one action that does not touch the terminal.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Tick | Action::Render | Action::Update => {}
            _ => debug!("{action:?}"),
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resume => self.should_suspend = false,
            Action::Error(message) => error!("{message}"),
            Action::OpenList => self.navigate(Screen::List)?,
            Action::OpenCreate => self.navigate(Screen::Create)?,
            Action::OpenEdit(id) => self.navigate(Screen::Edit(id))?,
            Action::RefreshItems => {
                self.executor.spawn(GatewayTask::List);
                self.forward(Action::RefreshItems)?;
            }
            Action::Persist(record) => {
                self.executor.spawn(GatewayTask::Save(record));
            }
            other => self.forward(other)?,
        }
        Ok(())
    }

    fn forward(&mut self, action: Action) -> Result<()> {
        if let Some(follow_up) = self.page.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let mut result = Ok(());
        tui.draw(|f| {
            let area = f.area();
            result = self.page.draw(f, area);
        })?;
        result
    }

    /// Queue an action as if a component had emitted it.
    pub fn send(&self, action: Action) -> Result<()> {
        self.action_tx.send(action)?;
        Ok(())
    }

    /// Apply everything queued so far, skipping terminal-only actions.
    pub fn drain(&mut self) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            match action {
                Action::Render | Action::Resize(..) => {}
                other => self.dispatch(other)?,
            }
        }
        Ok(())
    }
}

fn global_key(key: KeyEvent) -> Option<Action> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') => Some(Action::Quit),
        KeyCode::Char('z') => Some(Action::Suspend),
        _ => None,
    }
}
