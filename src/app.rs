// App state and main event loop.
// Owns both sections, starts loads on mount and on retry, and handles keyboard input.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::github::RateLimit;
use crate::state::{DataKind, LoadResult, Loader, PortfolioState};
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Projects,
    Activity,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Projects, Tab::Activity];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Projects => "Projects",
            Tab::Activity => "Activity",
        }
    }

    pub fn kind(&self) -> DataKind {
        match self {
            Tab::Projects => DataKind::Projects,
            Tab::Activity => DataKind::Activity,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Projects => Tab::Activity,
            Tab::Activity => Tab::Projects,
        }
    }
}

/// Completed background load.
#[derive(Debug)]
struct Loaded {
    result: LoadResult,
    rate_limit: RateLimit,
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    pub portfolio: PortfolioState,
    /// Last rate limit reported by GitHub.
    pub rate_limit: Option<RateLimit>,
    /// Whether the app should exit.
    pub should_quit: bool,
    loader: Loader,
    runtime: Handle,
    tx: UnboundedSender<Loaded>,
    rx: UnboundedReceiver<Loaded>,
}

impl App {
    pub fn new(loader: Loader, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            active_tab: Tab::default(),
            portfolio: PortfolioState::new(),
            rate_limit: None,
            should_quit: false,
            loader,
            runtime,
            tx,
            rx,
        }
    }

    pub fn username(&self) -> &str {
        self.loader.username()
    }

    /// Start loading every section.
    pub fn mount(&mut self) {
        for tab in Tab::ALL {
            self.request(tab.kind());
        }
    }

    /// Start a background load for `kind` unless one is already running.
    pub fn request(&mut self, kind: DataKind) {
        if self.portfolio.is_loading(kind) {
            return;
        }
        self.portfolio.begin_load(kind);

        let loader = self.loader.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = loader.load(kind).await;
            let rate_limit = loader.rate_limit().await;
            // Receiver only goes away when the app exits.
            let _ = tx.send(Loaded { result, rate_limit });
        });
    }

    /// Apply every finished load without blocking.
    pub fn drain_messages(&mut self) {
        while let Ok(loaded) = self.rx.try_recv() {
            self.rate_limit = Some(loaded.rate_limit);
            self.portfolio.apply(loaded.result);
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.mount();
        while !self.should_quit {
            self.drain_messages();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.active_tab = self.active_tab.next(),
            KeyCode::Char('r') => self.request(self.active_tab.kind()),
            KeyCode::Down | KeyCode::Char('j') => match self.active_tab {
                Tab::Projects => self.portfolio.projects.select_next(),
                Tab::Activity => self.portfolio.activity.select_next(),
            },
            KeyCode::Up | KeyCode::Char('k') => match self.active_tab {
                Tab::Projects => self.portfolio.projects.select_prev(),
                Tab::Activity => self.portfolio.activity.select_prev(),
            },
            _ => {}
        }
    }

    /// Link of the selected item on the active tab.
    pub fn selected_link(&self) -> Option<&str> {
        match self.active_tab {
            Tab::Projects => self
                .portfolio
                .projects
                .selected_item()
                .map(|p| p.url.as_str()),
            Tab::Activity => self
                .portfolio
                .activity
                .selected_item()
                .map(|a| a.link.as_str()),
        }
    }

    pub fn section_failed(&self, kind: DataKind) -> bool {
        match kind {
            DataKind::Projects => self.portfolio.projects.data.is_error(),
            DataKind::Activity => self.portfolio.activity.data.is_error(),
        }
    }
}
