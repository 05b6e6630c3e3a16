//! Axis bars: handler zones, the value bar and its marker on one text row.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use pedal_core::{AlertHandler, AxisMonitor, DeviceInfo, MonitorStatus};

use super::color::{ALERT, MARKER, MUTED, READY, Rgb, TRACK, ZONE_DIM, palette_color};

/// Columns taken by the axis label in front of each bar.
pub const LABEL_WIDTH: usize = 15;

const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 100;

/// What one column of a bar shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BarCell {
    /// Topmost handler zone covering this column.
    pub zone: Option<usize>,
    /// Handler whose zone edge falls in this column.
    pub border: Option<usize>,
    /// Inside the value bar.
    pub filled: bool,
    /// Column of the current value.
    pub marker: bool,
}

/// Bar width for a terminal `columns` wide.
pub fn bar_width(columns: u16) -> usize {
    usize::from(columns)
        .saturating_sub(LABEL_WIDTH + 4)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

fn column(fraction: f32, width: usize) -> usize {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    ((width as f32 * fraction) as usize).min(width.saturating_sub(1))
}

/// Lay out a bar `width` columns wide. Later handlers are drawn over
/// earlier ones.
pub fn layout(value: f32, handlers: &[AlertHandler], width: usize) -> Vec<BarCell> {
    let mut cells = vec![BarCell::default(); width];
    if width == 0 {
        return cells;
    }

    for (i, handler) in handlers.iter().enumerate() {
        let start = column(handler.min_threshold, width);
        let end = column(handler.max_threshold, width).max(start);
        for cell in &mut cells[start..=end] {
            cell.zone = Some(i);
        }
        cells[start].border = Some(i);
        cells[end].border = Some(i);
    }

    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let filled = ((width as f32 * value) as usize).min(width);
    for cell in &mut cells[..filled] {
        cell.filled = true;
    }
    cells[column(value, width)].marker = true;

    cells
}

/// `"Z          42%"` style label.
pub fn axis_label(axis: &AxisMonitor) -> String {
    let percent = (axis.value() * 100.0).round() as u8;
    format!("{:<10}{:>4}%", axis.name(), percent)
}

/// One-line description of a handler.
pub fn handler_summary(handler: &AlertHandler) -> String {
    format!(
        "{}  {:>3}-{:>3}%  {:>4} Hz  {:<8}  vol {:>3}%",
        handler.id,
        handler.min_percent(),
        handler.max_percent(),
        handler.frequency,
        handler.waveform,
        handler.volume_percent()
    )
}

fn queue_cell(out: &mut impl Write, cell: BarCell, axis_color: Rgb) -> io::Result<()> {
    let background = cell
        .zone
        .map_or(TRACK, |i| palette_color(i).dim(ZONE_DIM));

    let (glyph, foreground) = if cell.marker {
        ('┃', MARKER)
    } else if cell.filled {
        ('━', axis_color)
    } else if let Some(i) = cell.border {
        ('│', palette_color(i))
    } else {
        (' ', MUTED)
    };

    queue!(
        out,
        SetBackgroundColor(background.into()),
        SetForegroundColor(foreground.into()),
        Print(glyph)
    )
}

/// Write one axis: the labelled bar, then a line per handler.
pub fn render_axis(out: &mut impl Write, axis: &AxisMonitor, width: usize) -> io::Result<()> {
    let axis_color = palette_color(axis.index());

    queue!(
        out,
        SetForegroundColor(axis_color.into()),
        Print(format!("{:<LABEL_WIDTH$}", axis_label(axis))),
        ResetColor,
        Print(' ')
    )?;
    for cell in layout(axis.value(), axis.handlers(), width) {
        queue_cell(out, cell, axis_color)?;
    }
    queue!(out, ResetColor, Clear(ClearType::UntilNewLine), Print('\n'))?;

    for (i, handler) in axis.handlers().iter().enumerate() {
        let (state, state_color) = if handler.triggered {
            ("● ON", ALERT)
        } else {
            ("", MUTED)
        };
        queue!(
            out,
            Print("    "),
            SetForegroundColor(palette_color(i).into()),
            Print('■'),
            SetForegroundColor(MUTED.into()),
            Print(format!(" {}  ", handler_summary(handler))),
            SetForegroundColor(state_color.into()),
            Print(state),
            ResetColor,
            Clear(ClearType::UntilNewLine),
            Print('\n')
        )?;
    }
    Ok(())
}

/// Write the status line.
pub fn render_status(out: &mut impl Write, status: MonitorStatus) -> io::Result<()> {
    let color = if status.is_alerting() { ALERT } else { READY };
    queue!(
        out,
        SetForegroundColor(Color::from(color)),
        Print(status.to_string()),
        ResetColor,
        Clear(ClearType::UntilNewLine),
        Print('\n')
    )
}

/// Everything shown on one refresh of the monitor.
pub struct Frame<'a> {
    pub device: Option<&'a DeviceInfo>,
    pub output: Option<&'a str>,
    pub axes: &'a [AxisMonitor],
    pub status: MonitorStatus,
}

/// Write a whole frame, starting at the current cursor position.
pub fn render_frame(out: &mut impl Write, frame: &Frame<'_>, columns: u16) -> io::Result<()> {
    let device = frame
        .device
        .map_or_else(|| "no device".to_string(), ToString::to_string);
    let output = frame.output.unwrap_or("no audio output");

    queue!(
        out,
        SetForegroundColor(READY.into()),
        Print("PedalAssistant"),
        SetForegroundColor(MUTED.into()),
        Print(format!("  {device}  |  {output}  |  Ctrl-C to quit")),
        ResetColor,
        Clear(ClearType::UntilNewLine),
        Print("\n\n")
    )?;

    if frame.axes.is_empty() {
        queue!(
            out,
            SetForegroundColor(MUTED.into()),
            Print("Select a device to see its axes"),
            ResetColor,
            Clear(ClearType::UntilNewLine),
            Print('\n')
        )?;
    }

    let width = bar_width(columns);
    for axis in frame.axes {
        render_axis(out, axis, width)?;
    }

    queue!(out, Print('\n'))?;
    render_status(out, frame.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(min: f32, max: f32) -> AlertHandler {
        let mut h = AlertHandler::default();
        h.set_min_threshold(min);
        h.set_max_threshold(max);
        h
    }

    fn rendered(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_layout_fill_and_marker() {
        let cells = layout(0.5, &[], 10);
        assert_eq!(cells.iter().filter(|c| c.filled).count(), 5);
        assert!(cells[5].marker);
        assert_eq!(cells.iter().filter(|c| c.marker).count(), 1);
        assert!(cells.iter().all(|c| c.zone.is_none()));
    }

    #[test]
    fn test_layout_extremes() {
        let empty = layout(0.0, &[], 10);
        assert!(empty.iter().all(|c| !c.filled));
        assert!(empty[0].marker);

        let full = layout(1.0, &[], 10);
        assert!(full.iter().all(|c| c.filled));
        assert!(full[9].marker);

        assert!(layout(0.5, &[handler(0.0, 1.0)], 0).is_empty());
    }

    #[test]
    fn test_layout_zones_and_borders() {
        let cells = layout(0.0, &[handler(0.2, 0.5), handler(0.4, 1.0)], 10);

        assert_eq!(cells[1].zone, None);
        assert_eq!(cells[2].zone, Some(0));
        assert_eq!(cells[2].border, Some(0));
        assert_eq!(cells[3].zone, Some(0));
        // The second handler is drawn over the first.
        assert_eq!(cells[4].zone, Some(1));
        assert_eq!(cells[5].zone, Some(1));
        assert_eq!(cells[5].border, Some(0));
        assert_eq!(cells[9].zone, Some(1));
        assert_eq!(cells[9].border, Some(1));
    }

    #[test]
    fn test_layout_point_zone() {
        let cells = layout(0.0, &[handler(0.5, 0.5)], 10);
        assert_eq!(cells.iter().filter(|c| c.zone.is_some()).count(), 1);
        assert_eq!(cells[5].border, Some(0));
    }

    #[test]
    fn test_bar_width_bounds() {
        assert_eq!(bar_width(0), MIN_BAR_WIDTH);
        assert_eq!(bar_width(80), 80 - LABEL_WIDTH - 4);
        assert_eq!(bar_width(u16::MAX), MAX_BAR_WIDTH);
    }

    #[test]
    fn test_labels() {
        let mut axis = AxisMonitor::new(2);
        axis.add_handler(handler(0.8, 1.0));
        assert_eq!(axis_label(&axis), "Z            0%");

        let summary = handler_summary(&axis.handlers()[0]);
        assert!(summary.contains(" 80-100%"));
        assert!(summary.contains(" 440 Hz"));
        assert!(summary.contains("sine"));
        assert!(summary.contains("vol  50%"));
    }

    #[test]
    fn test_render_frame_text() {
        let mut axis = AxisMonitor::new(0);
        axis.add_handler(handler(0.5, 1.0));
        let device = DeviceInfo::new(3, "Pedals");
        let frame = Frame {
            device: Some(&device),
            output: Some("Speakers"),
            axes: std::slice::from_ref(&axis),
            status: MonitorStatus::Triggered(1),
        };

        let text = rendered(|out| render_frame(out, &frame, 80));
        assert!(text.contains("3: Pedals"));
        assert!(text.contains("Speakers"));
        assert!(text.contains("X "));
        assert!(text.contains("Triggered handlers: 1"));
    }

    #[test]
    fn test_render_frame_without_axes() {
        let frame = Frame {
            device: None,
            output: None,
            axes: &[],
            status: MonitorStatus::Ready,
        };
        let text = rendered(|out| render_frame(out, &frame, 80));
        assert!(text.contains("no device"));
        assert!(text.contains("Select a device"));
        assert!(text.ends_with("Ready\u{1b}[0m\u{1b}[K\n"));
    }
}
