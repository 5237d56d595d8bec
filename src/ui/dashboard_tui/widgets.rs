use ratatui::{prelude::*, widgets::Gauge};

use crate::core::telemetry::{Connectivity, Tone, Value};

/// Terminal color for a semantic tone
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Normal => Color::White,
        Tone::Dim => Color::DarkGray,
        Tone::Accent => Color::LightCyan,
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Danger => Color::LightRed,
    }
}

/// Span for a toned value; danger values are bold
pub fn value_span(value: &Value) -> Span<'_> {
    let mut style = Style::default().fg(tone_color(value.tone));
    if value.tone == Tone::Danger {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(value.text.as_str(), style)
}

/// Pulse dot for the connectivity indicator
pub fn pulse_dot(state: Connectivity) -> Span<'static> {
    if state.is_active() {
        Span::styled(
            "●",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::SLOW_BLINK),
        )
    } else {
        Span::styled("○", Style::default().fg(tone_color(state.tone())))
    }
}

/// Create a gauge with color based on usage thresholds
pub fn colored_gauge(ratio: f64, label: &str) -> Gauge<'_> {
    let color = match ratio * 100.0 {
        v if v < 50.0 => Color::Cyan,
        v if v < 75.0 => Color::LightYellow,
        v if v < 90.0 => Color::LightRed,
        _ => Color::Red,
    };

    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label)
}

/// Two-column "label  value" line
pub fn metric_line<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(Color::Gray)),
        value,
    ])
}
