use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

use super::app::DashboardApp;
use super::widgets::{colored_gauge, metric_line, pulse_dot, tone_color, value_span};
use crate::core::telemetry::{AlertSeverity, ModelTable, Value, NO_MODELS_TEXT};

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &DashboardApp) {
    let area = frame.area();
    let alerts = app.view.active_alerts();

    let mut constraints = vec![Constraint::Length(3)]; // Header with status and clock
    if !alerts.is_empty() {
        // 1 line per alert + 2 for borders
        constraints.push(Constraint::Length((alerts.len().min(4) + 2) as u16));
    }
    constraints.extend([
        Constraint::Length(7), // GPU + System + Disk
        Constraint::Length(8), // Thermals
        Constraint::Min(5),    // Models
        Constraint::Length(1), // Footer
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    let mut take = || {
        let rect = chunks[next];
        next += 1;
        rect
    };

    render_header(frame, take(), app);
    if !alerts.is_empty() {
        render_alerts_banner(frame, take(), app);
    }
    render_metrics_row(frame, take(), app);
    render_thermal_card(frame, take(), app);
    render_models_table(frame, take(), app);
    render_footer(frame, take());

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Connectivity dot, status text and the server clock box
fn render_header(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let view = &app.view;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(36)])
        .split(area);

    let last_update = view
        .last_online
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let status = Line::from(vec![
        Span::raw(" "),
        pulse_dot(view.connectivity),
        Span::raw(" "),
        Span::styled(
            view.connectivity.status_text(),
            Style::default()
                .fg(tone_color(view.connectivity.tone()))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  │ Last update: {}", last_update),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let status_block = Block::default()
        .title(format!(" rigmon │ {} │ Refresh: {}ms ", app.endpoint, app.interval_ms))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(status).block(status_block), chunks[0]);

    let clock_block = Block::default()
        .title(" Server time ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tone_color(view.connectivity.frame_tone())));
    let clock = Paragraph::new(Line::from(value_span(&view.clock.time)))
        .alignment(Alignment::Center)
        .block(clock_block);
    frame.render_widget(clock, chunks[1]);
}

/// Render alerts banner
fn render_alerts_banner(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(" ⚠ ALERTS ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    // Critical first
    let mut alerts: Vec<_> = app.view.active_alerts().iter().collect();
    alerts.sort_by_key(|a| match a.severity {
        AlertSeverity::Critical => 0,
        AlertSeverity::Warning => 1,
    });
    alerts.truncate(4);

    let lines: Vec<Line> = alerts
        .iter()
        .map(|alert| {
            let (icon, color) = match alert.severity {
                AlertSeverity::Critical => ("🔴", Color::Red),
                AlertSeverity::Warning => ("⚠ ", Color::Yellow),
            };
            Line::styled(
                format!("{} {}", icon, alert.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_metrics_row(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(30),
            Constraint::Percentage(36),
        ])
        .split(area);

    let gpu = &app.view.gpu;
    let gpu_lines = vec![
        metric_line("Util", Span::raw(gpu.util.as_str())),
        metric_line("Temp", Span::raw(gpu.temp.as_str())),
        metric_line("Memory", Span::raw(gpu.mem.as_str())),
        metric_line("Power", Span::raw(gpu.power.as_str())),
        metric_line("Fan", Span::raw(gpu.fan.as_str())),
    ];
    frame.render_widget(
        Paragraph::new(gpu_lines).block(Block::default().title(" GPU ").borders(Borders::ALL)),
        chunks[0],
    );

    let system = &app.view.system;
    let system_lines = vec![
        metric_line("Load", Span::raw(system.load.as_str())),
        metric_line("Memory", Span::raw(system.memory.as_str())),
    ];
    frame.render_widget(
        Paragraph::new(system_lines)
            .block(Block::default().title(" System ").borders(Borders::ALL)),
        chunks[1],
    );

    render_disk_panel(frame, chunks[2], app);
}

fn render_disk_panel(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let disk = &app.view.disk;

    let title = match (&disk.storage, &disk.mount) {
        (Some(storage), Some(mount)) => format!(" Disk: {} on {} ", storage, mount),
        (Some(storage), None) => format!(" Disk: {} ", storage),
        _ => " Disk ".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let lines = vec![
        metric_line("Used", Span::raw(disk.used.as_str())),
        metric_line("Free", Span::raw(disk.available.as_str())),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    if let Some(ratio) = disk.usage_ratio {
        frame.render_widget(colored_gauge(ratio, &disk.percent), chunks[1]);
    } else {
        frame.render_widget(Paragraph::new(disk.percent.as_str()), chunks[1]);
    }
}

/// Thermal card, outlined when any reading is in danger
fn render_thermal_card(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let thermals = &app.view.thermals;

    let (title, border_style) = if thermals.highlighted {
        (
            " ⚠ Thermals ",
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        )
    } else {
        (" Thermals ", Style::default())
    };
    let border_type = if thermals.highlighted {
        ratatui::widgets::BorderType::Thick
    } else {
        ratatui::widgets::BorderType::Plain
    };

    let badge = |value: &Value| -> Span<'static> {
        Span::styled(
            format!(" [{}]", value.text),
            Style::default().fg(tone_color(value.tone)),
        )
    };
    let fan_badge = Value::new(
        thermals.fan_state.badge_text(),
        thermals.fan_state.badge_tone(),
    );

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<10}", "CPU"), Style::default().fg(Color::Gray)),
            value_span(&thermals.cpu),
            badge(&thermals.cpu_badge),
        ]),
        metric_line("SSD", value_span(&thermals.ssd)),
        metric_line("VRM", value_span(&thermals.vrm)),
        metric_line("AIO pump", value_span(&thermals.pump)),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Sys fan"), Style::default().fg(Color::Gray)),
            value_span(&thermals.fan),
            badge(&fan_badge),
        ]),
    ];

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_models_table(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut header = vec![Cell::from("Model").style(bold)];
    if app.show_model_ids {
        header.push(Cell::from("ID").style(bold));
    }
    header.extend([
        Cell::from("Size").style(bold),
        Cell::from("Processor").style(bold),
        Cell::from("Until").style(bold),
    ]);

    let mut widths = vec![Constraint::Percentage(35)];
    if app.show_model_ids {
        widths.push(Constraint::Length(14));
    }
    widths.extend([
        Constraint::Length(10),
        Constraint::Length(18),
        Constraint::Min(10),
    ]);

    let rows: Vec<Row> = match &app.view.models {
        ModelTable::Empty => vec![Row::new(vec![Cell::from(Span::styled(
            NO_MODELS_TEXT,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))])],
        ModelTable::Rows(models) => models
            .iter()
            .map(|model| {
                let mut cells = vec![Cell::from(Span::styled(
                    model.name.as_str(),
                    Style::default().fg(Color::LightCyan),
                ))];
                if app.show_model_ids {
                    cells.push(Cell::from(model.id.as_deref().unwrap_or("-")));
                }
                cells.extend([
                    Cell::from(model.size.as_str()),
                    Cell::from(Span::styled(
                        format!("[{}]", model.processor.text),
                        Style::default().fg(tone_color(model.processor.tone)),
                    )),
                    Cell::from(model.until.as_str()),
                ]);
                Row::new(cells)
            })
            .collect(),
    };

    let table = Table::new(rows, widths)
        .header(Row::new(header))
        .block(
            Block::default()
                .title(" Loaded models ")
                .borders(Borders::ALL),
        );

    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(" q: quit │ ?: help │ i: model ids ")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 40, area);
    let text = vec![
        Line::styled("Keyboard shortcuts", Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::raw("q / Esc   Quit"),
        Line::raw("? / h     Toggle this help"),
        Line::raw("i         Show or hide model ids"),
        Line::raw(""),
        Line::styled(
            "Thresholds: CPU > 80°C, SSD > 70°C, VRM > 90°C, pump < 500",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        popup,
    );
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
