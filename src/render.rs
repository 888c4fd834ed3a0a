// File: ./src/render.rs
// Plain-text rendering of the grid and merged table for terminal output.
use crate::grid::DisplayWeek;
use crate::model::SemesterConfig;
use crate::model::date::format_short;
use crate::table::MergedRow;
use unicode_width::UnicodeWidthStr;

/// Pads to a display width, so CJK text lines up with ASCII.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn render_grid(weeks: &[DisplayWeek], config: &SemesterConfig, weekday_names: &[String; 7]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}  ({} ~ {})\n",
        config.name, config.range_start, config.range_end
    ));
    for week in weeks {
        out.push_str(&format!("\n== {}  {}\n", week.label(config), week.caption()));
        for day in &week.days {
            let mut marker = String::new();
            if day.is_weekend() {
                marker.push('*');
            }
            if !day.in_range {
                marker.push_str(" (outside range)");
            }
            out.push_str(&format!(
                "  {}{}\n",
                pad(&format_short(day.date, weekday_names), 12),
                marker
            ));
            for event in &day.events {
                out.push_str(&format!(
                    "      [{}/{}] {}  #{}\n",
                    event.department,
                    event.section,
                    one_line(&event.content),
                    event.id
                ));
            }
        }
    }
    out
}

/// Merged cells print once, on the row whose span is positive.
pub fn render_table(rows: &[MergedRow], weekday_names: &[String; 7]) -> String {
    let week_w = rows
        .iter()
        .map(|r| UnicodeWidthStr::width(r.week_label.as_str()))
        .max()
        .unwrap_or(0)
        .max(4);
    let dept_w = rows
        .iter()
        .map(|r| UnicodeWidthStr::width(r.event.department.as_str()))
        .max()
        .unwrap_or(0)
        .max(10);

    let mut out = format!(
        "{} | {} | {} | Content\n",
        pad("Week", week_w),
        pad("Date", 10),
        pad("Department", dept_w)
    );
    for row in rows {
        let week = if row.week_span > 0 { row.week_label.as_str() } else { "" };
        let date = if row.date_span > 0 {
            format_short(row.event.date, weekday_names)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{} | {} | {} | {}\n",
            pad(week, week_w),
            pad(&date, 10),
            pad(&row.event.department, dept_w),
            one_line(&row.event.content)
        ));
    }
    out
}
