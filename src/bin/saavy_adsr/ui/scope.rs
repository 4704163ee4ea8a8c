//! Envelope scope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render the recent envelope history, oldest point on the left
pub fn render_scope(frame: &mut Frame, area: Rect, history: &[f32]) {
    let block = Block::default().title(" Envelope ").borders(Borders::ALL);

    let data: Vec<(f64, f64)> = history
        .iter()
        .enumerate()
        .map(|(i, &level)| {
            let x = i as f64 / history.len() as f64;
            (x, level as f64)
        })
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .labels(["0", "0.5", "1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
