// Plain terminal output of a dashboard view

use colored::{ColoredString, Colorize};

use crate::core::telemetry::{DashboardView, ModelTable, Tone, Value, NO_MODELS_TEXT};

/// Apply a tone to text with `colored`
pub fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Normal => text.normal(),
        Tone::Dim => text.dimmed(),
        Tone::Accent => text.bright_cyan(),
        Tone::Success => text.green(),
        Tone::Warning => text.yellow(),
        Tone::Danger => text.red().bold(),
    }
}

pub fn paint_value(value: &Value) -> ColoredString {
    paint(&value.text, value.tone)
}

/// One-line summary of the view, for streaming output
pub fn format_status_line(view: &DashboardView) -> String {
    let dot = if view.connectivity.is_active() {
        "●".green()
    } else {
        "○".red()
    };
    let status = paint(view.connectivity.status_text(), view.connectivity.tone());
    let clock = paint_value(&view.clock.time);

    if !view.connectivity.is_active() {
        return format!("{} {} │ {}", dot, status, clock);
    }

    let thermals = &view.thermals;
    format!(
        "{} {} │ {} │ GPU {} {} │ load {} │ CPU {} SSD {} VRM {} │ pump {} │ fan {} │ {} model(s)",
        dot,
        status,
        clock,
        view.gpu.util,
        view.gpu.temp,
        view.system.load,
        paint_value(&thermals.cpu),
        paint_value(&thermals.ssd),
        paint_value(&thermals.vrm),
        paint_value(&thermals.pump),
        paint(
            thermals.fan_state.badge_text(),
            thermals.fan_state.badge_tone()
        ),
        model_count(&view.models),
    )
}

fn model_count(models: &ModelTable) -> usize {
    match models {
        ModelTable::Empty => 0,
        ModelTable::Rows(rows) => rows.len(),
    }
}

/// Multi-line report of the view
pub fn print_view(view: &DashboardView) {
    println!("{}", format_status_line_header(view));
    if !view.connectivity.is_active() {
        return;
    }
    println!();

    let gpu = &view.gpu;
    println!("{}", "GPU".white().bold());
    println!(
        "  util {}  temp {}  mem {}  power {}  fan {}",
        gpu.util, gpu.temp, gpu.mem, gpu.power, gpu.fan
    );

    println!("{}", "System".white().bold());
    println!("  load {}  memory {}", view.system.load, view.system.memory);

    let thermals = &view.thermals;
    let title = if thermals.highlighted {
        "Thermals ⚠".red().bold()
    } else {
        "Thermals".white().bold()
    };
    println!("{}", title);
    println!(
        "  CPU {} [{}]  SSD {}  VRM {}",
        paint_value(&thermals.cpu),
        paint_value(&thermals.cpu_badge),
        paint_value(&thermals.ssd),
        paint_value(&thermals.vrm)
    );
    println!(
        "  pump {}  sys fan {} [{}]",
        paint_value(&thermals.pump),
        paint_value(&thermals.fan),
        paint(
            thermals.fan_state.badge_text(),
            thermals.fan_state.badge_tone()
        )
    );
    for alert in &thermals.alerts {
        println!("  {} {}", "!".red().bold(), alert.message.red());
    }

    let disk = &view.disk;
    println!("{}", "Disk".white().bold());
    println!(
        "  used {} ({})  free {}",
        disk.used, disk.percent, disk.available
    );

    println!("{}", "Loaded models".white().bold());
    match &view.models {
        ModelTable::Empty => println!("  {}", NO_MODELS_TEXT.dimmed().italic()),
        ModelTable::Rows(rows) => {
            for row in rows {
                println!(
                    "  {:<32} {:>10}  [{}]  {}",
                    row.name.cyan(),
                    row.size,
                    paint_value(&row.processor),
                    row.until.dimmed()
                );
            }
        }
    }
}

fn format_status_line_header(view: &DashboardView) -> String {
    format!(
        "{} │ {}",
        paint(view.connectivity.status_text(), view.connectivity.tone()),
        paint_value(&view.clock.time)
    )
}
