//! Application core: event loop, state mutation and render dispatch.
//!
//! Keys become actions; mutations go through the [`StateStore`]; the store
//! bridge feeds every new snapshot back as [`Action::StateChanged`], which
//! re-runs the shell. Drawing follows the shell's [`RenderDecision`] only.

use chrono::Datelike;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use mdshell_core::{
    Breakpoint, Capability, LayoutMetrics, MainView, NormalShell, PreferenceSignal,
    RenderDecision, Shell, ShellMode, StateSnapshot, StateStore, SystemPreference, ThemeFactory,
};

use crate::action::Action;
use crate::bridge::{run_state_bridge, subscribe_preference};
use crate::component::{Component, RenderContext};
use crate::event::{ANIMATION_STEP, Event, FRAME_INTERVAL, TerminalEvents};
use crate::theme::{Palette, PaletteFactory};
use crate::tui::TerminalSession;
use crate::views::Views;
use crate::views::overlay::{render_help, render_loading};

/// Top-level application state and event loop.
pub struct App {
    /// Host-owned application + device state.
    store: StateStore,
    /// Latest render decision.
    shell: Shell,
    /// Simulated OS dark/light preference.
    preference: PreferenceSignal,
    /// Palette for the most recent resolved theme.
    palette: Palette,
    views: Views,
    metrics: LayoutMetrics,
    throbber: ThrobberState,
    running: bool,
    help_visible: bool,
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(initial: StateSnapshot, preference: PreferenceSignal) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let shell = Shell::new(&initial, preference.prefers_dark());
        let palette = shell
            .decision()
            .theme()
            .map_or_else(Palette::dark, |variant| PaletteFactory.build(variant));

        Self {
            store: StateStore::new(initial),
            shell,
            preference,
            palette,
            views: Views::new(),
            metrics: LayoutMetrics::default(),
            throbber: ThrobberState::default(),
            running: true,
            help_visible: false,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
        }
    }

    pub fn decision(&self) -> &RenderDecision {
        self.shell.decision()
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::open()?;
        self.terminal_size = session.size().unwrap_or((80, 24));

        // Mount: bridge store changes and subscribe to the system preference.
        let cancel = CancellationToken::new();
        let bridge = tokio::spawn(run_state_bridge(
            self.store.subscribe(),
            self.action_tx.clone(),
            cancel.clone(),
        ));
        let subscription = subscribe_preference(&self.preference, self.action_tx.clone());

        let mut events = TerminalEvents::spawn(ANIMATION_STEP, FRAME_INTERVAL);

        info!(mode = ?self.decision().mode(), "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Animate => self.action_tx.send(Action::Tick)?,
                Event::Frame => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    session.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Teardown mirrors mount.
        events.stop();
        subscription.unsubscribe();
        cancel.cancel();
        let _ = bridge.await;
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys first, then the active
    /// content view.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let legacy = self.shell.decision().mode() == ShellMode::Legacy;
        if self.help_visible && !legacy {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let action = match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
                Some(Action::Quit)
            }
            (_, KeyCode::Char('?')) if !legacy => Some(Action::ToggleHelp),
            (_, KeyCode::Char('0')) => Some(Action::SwitchView(None)),
            (_, KeyCode::Char('1')) => Some(Action::SwitchView(Some(MainView::Welcome))),
            (_, KeyCode::Char('2')) => Some(Action::SwitchView(Some(MainView::Main))),
            (_, KeyCode::Char('3')) => Some(Action::SwitchView(Some(MainView::Factory))),
            (_, KeyCode::Char('t')) => Some(Action::CycleColorTheme),
            (_, KeyCode::Char('s')) => Some(Action::ToggleSystemPreference),
            (_, KeyCode::Char('v')) => Some(Action::ToggleVintageMode),
            (_, KeyCode::Char('l')) => Some(Action::ToggleLoading),
            (_, KeyCode::Char('w')) => Some(Action::ToggleFullWidth),
            (_, KeyCode::Char('h')) => Some(Action::ToggleFullHeight),
            (_, KeyCode::Char('c')) => Some(Action::ToggleCapability(Capability::ContentList)),
            _ => None,
        };
        if action.is_some() {
            return Ok(action);
        }

        let Some(view) = self.active_view() else {
            return Ok(None);
        };
        let component = self.views.content_mut(view);
        let action = component.handle_key_event(key)?;
        if let Some(action) = &action {
            trace!(component = component.id(), ?action, "key handled by view");
        }
        Ok(action)
    }

    fn active_view(&self) -> Option<MainView> {
        self.shell.decision().view().and_then(|slots| slots.active())
    }

    /// Apply a mutation to the store. Subscribers hear about it only when
    /// something actually changed.
    fn mutate<F>(&self, mutate: F)
    where
        F: FnOnce(&mut StateSnapshot),
    {
        if self.store.update(mutate) {
            debug!("state mutated");
        }
    }

    fn refresh_palette(&mut self) {
        if let Some(variant) = self.shell.decision().theme() {
            if variant != self.palette.variant {
                debug!(%variant, "applying theme");
                self.palette = PaletteFactory.build(variant);
            }
        }
    }

    /// Process a single action: update state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Resize(w, h) => self.terminal_size = (*w, *h),
            Action::Render => {}
            Action::Tick => {
                if self.shell.decision().overlay().is_some_and(|o| o.is_visible()) {
                    self.throbber.calc_next();
                }
            }

            Action::SwitchView(view) => self.mutate(|s| s.app.main_view = *view),
            Action::CycleColorTheme => {
                self.mutate(|s| s.app.color_theme = s.app.color_theme.next());
            }
            Action::ToggleVintageMode => self.mutate(|s| s.app.vintage_mode = !s.app.vintage_mode),
            Action::ToggleLoading => self.mutate(|s| s.app.loading = !s.app.loading),
            Action::ToggleFullWidth => {
                self.mutate(|s| s.app.page_full_width = !s.app.page_full_width);
            }
            Action::ToggleFullHeight => {
                self.mutate(|s| s.app.page_full_height = !s.app.page_full_height);
            }
            Action::ToggleCapability(capability) => self.mutate(|s| {
                let caps = &mut s.device.device_capabilities;
                if !caps.remove(capability) {
                    caps.insert(*capability);
                }
            }),

            Action::StateChanged(snapshot) => {
                if self.shell.apply_state(snapshot).mode() == ShellMode::Legacy {
                    self.help_visible = false;
                }
                self.refresh_palette();
            }
            Action::ToggleSystemPreference => {
                // The signal notifies the subscription, which comes back
                // as SystemPreferenceChanged.
                self.preference.toggle();
            }
            Action::SystemPreferenceChanged(prefers_dark) => {
                self.shell.apply_system_preference(*prefers_dark);
                self.refresh_palette();
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible && self.shell.decision().normal().is_some();
            }

            Action::SelectNext | Action::SelectPrev => {
                if let Some(view) = self.active_view() {
                    let component = self.views.content_mut(view);
                    trace!(component = component.id(), ?action, "forwarding to view");
                    if let Some(follow_up) = component.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        match self.shell.decision() {
            RenderDecision::Legacy => self.views.legacy.render(frame, area),
            RenderDecision::Normal(shell) => {
                self.render_normal(frame, area, shell);
                if self.help_visible {
                    render_help(frame, area, &self.palette);
                }
            }
        }
    }

    fn render_normal(&self, frame: &mut Frame, area: Rect, shell: &NormalShell) {
        let palette = &self.palette;
        frame.render_widget(Block::default().style(palette.page()), area);

        let [page, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        let [body, footer_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(page);

        let size = self.metrics.panel_size(shell.layout, (body.width, body.height));
        let top_margin = if size.breakpoint == Breakpoint::Compact {
            0
        } else {
            body.height.saturating_sub(size.height).min(1)
        };
        let panel = Rect::new(
            body.x + body.width.saturating_sub(size.width) / 2,
            body.y + top_margin,
            size.width,
            size.height,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.panel_border())
            .style(palette.panel());
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let padded = Rect::new(
            inner.x + 1.min(inner.width),
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        let ctx = RenderContext {
            palette,
            layout: shell.layout,
        };

        let content_area = if shell.view.controls {
            let [content, controls] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(padded);
            self.views.controls.render(frame, controls, ctx);
            content
        } else {
            padded
        };

        if let Some(view) = shell.view.active() {
            self.views.content(view).render(frame, content_area, ctx);
        }

        let footer = Rect::new(
            body.x,
            panel.bottom().min(footer_area.y),
            body.width,
            1,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("© {} mdshell contributors", chrono::Local::now().year()),
                palette.dim(),
            )))
            .alignment(Alignment::Center),
            footer,
        );

        self.render_status_bar(frame, status_area);

        if shell.overlay.is_visible() {
            render_loading(frame, area, palette, &self.throbber);
        }
    }

    /// Bottom status bar: theme preference, system signal, key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let p = &self.palette;
        let snapshot = self.store.current();
        let system = if self.shell.prefers_dark() {
            "dark"
        } else {
            "light"
        };

        let line = Line::from(vec![
            Span::styled(" theme ", p.key_hint()),
            Span::styled(snapshot.app.color_theme.to_string(), p.key_hint_key()),
            Span::styled(format!(" → {}", p.variant), p.accent()),
            Span::styled(format!("  system {system}"), p.key_hint()),
            Span::styled("  │ ? help  q quit", p.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
