//! Status bar widget - phase, level, start mode and sample rate

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use saavy_adsr::{EnvelopePhase, StartMode};

use super::UiStateUpdate;

fn phase_color(phase: EnvelopePhase) -> Color {
    match phase {
        EnvelopePhase::Idle => Color::DarkGray,
        EnvelopePhase::Startup => Color::Magenta,
        EnvelopePhase::Attack => Color::Green,
        EnvelopePhase::Decay => Color::Yellow,
        EnvelopePhase::Sustain => Color::Cyan,
        EnvelopePhase::Release => Color::LightRed,
    }
}

/// Render the status bar
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    state: &UiStateUpdate,
    gate: bool,
    start_mode: StartMode,
    sample_rate: f32,
) {
    let block = Block::default().title(" saavy-adsr ").borders(Borders::ALL);

    let gate_symbol = if gate { "●" } else { "○" };
    let mode = match start_mode {
        StartMode::FromCurrent => "from current",
        StartMode::FromSilence => "from silence",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} gate  ", gate_symbol),
            Style::default().fg(if gate { Color::Green } else { Color::DarkGray }),
        ),
        Span::styled(
            format!("{:<8}", format!("{:?}", state.phase)),
            Style::default().fg(phase_color(state.phase)),
        ),
        Span::styled(
            format!("level {:.3}  ", state.level),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("start {}  ", mode),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
