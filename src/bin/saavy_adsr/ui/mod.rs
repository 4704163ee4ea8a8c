//! TUI module for saavy-adsr
//!
//! Keys turn into envelope messages sent to the audio thread; a local mirror
//! of the parameter store shows the clamped values the audio thread will use.

mod params;
mod scope;
pub mod state;
mod status;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use saavy_adsr::{
    control::EnvelopeMessage, graph::envelope::EnvelopeHandle, EnvelopeConfig, EnvelopeParams,
};
use std::time::Duration;

pub use state::UiStateUpdate;

use params::render_params;
use scope::render_scope;
use status::render_status;

/// Number of points kept on the scope
pub const SCOPE_LEN: usize = 512;

const TIME_STEP: f32 = 1.25;
const LEVEL_STEP: f32 = 0.05;
const SHAPE_STEP: f32 = 0.1;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Quit,
    Send(EnvelopeMessage),
}

fn scale_time(ms: f32, up: bool) -> f32 {
    if up {
        (ms * TIME_STEP).max(1.0)
    } else {
        ms / TIME_STEP
    }
}

/// Map a key to an action, stepping from the current (unclamped) config
fn key_action(key: KeyCode, current: &EnvelopeConfig, gate: bool) -> Option<Action> {
    let msg = match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char(' ') if gate => EnvelopeMessage::Stop,
        KeyCode::Char(' ') => EnvelopeMessage::Start,
        KeyCode::Char('a') => EnvelopeMessage::Attack(scale_time(current.attack_ms, false)),
        KeyCode::Char('A') => EnvelopeMessage::Attack(scale_time(current.attack_ms, true)),
        KeyCode::Char('d') => EnvelopeMessage::Decay(scale_time(current.decay_ms, false)),
        KeyCode::Char('D') => EnvelopeMessage::Decay(scale_time(current.decay_ms, true)),
        KeyCode::Char('r') => EnvelopeMessage::Release(scale_time(current.release_ms, false)),
        KeyCode::Char('R') => EnvelopeMessage::Release(scale_time(current.release_ms, true)),
        KeyCode::Char('s') => EnvelopeMessage::Sustain(current.sustain_level - LEVEL_STEP),
        KeyCode::Char('S') => EnvelopeMessage::Sustain(current.sustain_level + LEVEL_STEP),
        KeyCode::Char('[') => EnvelopeMessage::AttackShape(current.attack_shape - SHAPE_STEP),
        KeyCode::Char(']') => EnvelopeMessage::AttackShape(current.attack_shape + SHAPE_STEP),
        KeyCode::Char('{') => EnvelopeMessage::ReleaseShape(current.release_shape - SHAPE_STEP),
        KeyCode::Char('}') => EnvelopeMessage::ReleaseShape(current.release_shape + SHAPE_STEP),
        KeyCode::Char('g') => EnvelopeMessage::Gain(current.gain - LEVEL_STEP),
        KeyCode::Char('G') => EnvelopeMessage::Gain(current.gain + LEVEL_STEP),
        _ => return None,
    };
    Some(Action::Send(msg))
}

/// UI application state
pub struct UiApp {
    /// Control queue into the audio thread
    handle: EnvelopeHandle,
    /// Control-side copy of the parameter store
    mirror: EnvelopeParams,
    /// Ring buffer receiver for envelope scope points
    scope_rx: Consumer<f32>,
    /// Ring buffer receiver for status updates
    state_rx: Consumer<UiStateUpdate>,
    /// Latest status from the audio thread
    current_state: UiStateUpdate,
    /// Scope history, oldest first
    history: Vec<f32>,
    /// Whether the last trigger sent was Start
    gate: bool,
    /// Last control error, shown in the help bar
    notice: Option<String>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        handle: EnvelopeHandle,
        config: EnvelopeConfig,
        sample_rate: f32,
        scope_rx: Consumer<f32>,
        state_rx: Consumer<UiStateUpdate>,
    ) -> Self {
        let mut mirror = EnvelopeParams::new(&config);
        mirror.set_sample_rate(sample_rate);

        Self {
            handle,
            mirror,
            scope_rx,
            state_rx,
            current_state: UiStateUpdate::default(),
            history: vec![0.0; SCOPE_LEN],
            gate: false,
            notice: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();
            self.poll_state();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Append new scope points, keeping the last SCOPE_LEN
    fn poll_scope(&mut self) {
        while let Ok(level) = self.scope_rx.pop() {
            self.history.push(level);
        }

        if self.history.len() > SCOPE_LEN {
            let excess = self.history.len() - SCOPE_LEN;
            self.history.drain(0..excess);
        }
    }

    /// Keep only the latest status
    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = state;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let current = self.mirror.to_config();
        match key_action(key, &current, self.gate) {
            Some(Action::Quit) => self.should_quit = true,
            Some(Action::Send(msg)) => self.send(msg),
            None => {}
        }
    }

    fn send(&mut self, msg: EnvelopeMessage) {
        match self.handle.send(msg) {
            Ok(()) => {
                self.notice = None;
                match msg {
                    EnvelopeMessage::Start => self.gate = true,
                    EnvelopeMessage::Stop => self.gate = false,
                    _ => {
                        self.mirror.apply(msg);
                    }
                }
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(9), // Parameters
                Constraint::Min(8),    // Scope
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_status(
            frame,
            chunks[0],
            &self.current_state,
            self.gate,
            self.mirror.start_mode(),
            self.mirror.sample_rate(),
        );
        render_params(frame, chunks[1], &self.mirror);
        render_scope(frame, chunks[2], &self.history);

        let help = match &self.notice {
            Some(notice) => Paragraph::new(format!(" {}", notice))
                .style(Style::default().fg(Color::LightRed)),
            None => Paragraph::new(" [Space] Start/Stop  lower/UPPER case adjusts  [Q] Quit")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(help, chunks[3]);
    }
}
