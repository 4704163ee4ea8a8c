//! Parameter panel - the clamped values the envelope is running with

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use saavy_adsr::EnvelopeParams;

fn row(keys: &'static str, name: &'static str, value: String, detail: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<6}", keys), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:<14}", name), Style::default().fg(Color::White)),
        Span::styled(format!("{:>10}  ", value), Style::default().fg(Color::Cyan)),
        Span::styled(detail, Style::default().fg(Color::DarkGray)),
    ])
}

/// Render the parameter panel
pub fn render_params(frame: &mut Frame, area: Rect, params: &EnvelopeParams) {
    let block = Block::default().title(" Parameters ").borders(Borders::ALL);

    let lines = vec![
        row(
            "a/A",
            "attack",
            format!("{:.1} ms", params.attack_ms()),
            format!("{} samples", params.attack_samples()),
        ),
        row(
            "d/D",
            "decay",
            format!("{:.1} ms", params.decay_ms()),
            format!("{} samples", params.decay_samples()),
        ),
        row(
            "s/S",
            "sustain",
            format!("{:.2}", params.sustain_level()),
            String::new(),
        ),
        row(
            "r/R",
            "release",
            format!("{:.1} ms", params.release_ms()),
            format!("{} samples", params.release_samples()),
        ),
        row(
            "[/]",
            "attack shape",
            format!("{:+.2}", params.attack_shape()),
            format!("exponent {:.2}", params.attack_exponent()),
        ),
        row(
            "{/}",
            "release shape",
            format!("{:+.2}", params.release_shape()),
            format!("exponent {:.2}", params.release_exponent()),
        ),
        row("g/G", "gain", format!("{:.2}", params.gain()), String::new()),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
