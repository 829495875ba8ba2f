//! Radar chart drawing on a braille canvas

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::output::truncate_name;
use crate::roster::MAX_LEVEL;
use crate::stats::{ChartError, RadarChart};
use crate::tui::theme::ThemeColors;

const RADIUS: f64 = 10.0;
const LABEL_RADIUS: f64 = 11.5;
const GRID_STEPS: [f64; 5] = [2.0, 4.0, 6.0, 8.0, 10.0];

/// Angle of axis `index` out of `count`, starting at 12 o'clock and going
/// clockwise
pub fn axis_angle(index: usize, count: usize) -> f64 {
    FRAC_PI_2 - TAU * index as f64 / count as f64
}

/// Polygon vertices for `values` on a `0..=max` scale drawn at `radius`
pub fn radar_points(values: &[f64], max: f64, radius: f64) -> Vec<(f64, f64)> {
    let count = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let r = radius * (value / max).clamp(0.0, 1.0);
            let angle = axis_angle(i, count);
            (r * angle.cos(), r * angle.sin())
        })
        .collect()
}

fn draw_polygon(ctx: &mut Context, points: &[(f64, f64)], color: Color) {
    for (i, &(x1, y1)) in points.iter().enumerate() {
        let (x2, y2) = points[(i + 1) % points.len()];
        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
    }
}

/// Render a chart, or the reason it can't be drawn, into `area`
pub fn render_radar(
    frame: &mut Frame,
    area: Rect,
    chart: &Result<RadarChart, ChartError>,
    theme: &ThemeColors,
) {
    let chart = match chart {
        Ok(chart) => chart,
        Err(e) => {
            let notice = Paragraph::new(e.to_string())
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(theme.flash_warning))
                .block(Block::bordered().title(" Radar "));
            frame.render_widget(notice, area);
            return;
        }
    };

    let block = Block::bordered().title(Span::styled(
        format!(" {} ", chart.title),
        theme.popup_title,
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(inner);
    let canvas_area = chunks[0];

    // Terminal cells are roughly twice as tall as wide
    let y_half = LABEL_RADIUS + 1.5;
    let x_half = if canvas_area.height > 0 {
        y_half * f64::from(canvas_area.width) / (2.0 * f64::from(canvas_area.height))
    } else {
        y_half
    }
    .max(y_half);

    let count = chart.axes.len();
    let max = f64::from(MAX_LEVEL);
    let series_colors = [theme.series_min, theme.series_max, theme.series_avg];
    let label_width = (x_half - LABEL_RADIUS).max(6.0) as usize;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([-y_half, y_half])
        .paint(|ctx| {
            for step in GRID_STEPS {
                let ring = radar_points(&vec![step; count], max, RADIUS);
                draw_polygon(ctx, &ring, theme.radar_grid);
            }
            for (x, y) in radar_points(&vec![max; count], max, RADIUS) {
                ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, theme.radar_grid));
            }
            ctx.layer();

            for (series, color) in chart.series.iter().zip(series_colors) {
                draw_polygon(ctx, &radar_points(&series.values, max, RADIUS), color);
                ctx.layer();
            }

            for (i, (x, y)) in radar_points(&vec![max; count], max, LABEL_RADIUS)
                .into_iter()
                .enumerate()
            {
                let label = truncate_name(&chart.axes[i], label_width);
                // Shift left-side labels so they end at the axis tip
                let x = if x < -0.5 {
                    x - label.chars().count() as f64 * (2.0 * x_half / f64::from(canvas_area.width.max(1)))
                } else {
                    x
                };
                ctx.print(x, y, Span::styled(label, Style::default().fg(theme.radar_label)));
            }
        });
    frame.render_widget(canvas, canvas_area);

    let mut legend = Vec::new();
    for (series, color) in chart.series.iter().zip(series_colors) {
        legend.push(Span::styled("━━ ", Style::default().fg(color)));
        legend.push(Span::raw(format!("{}  ", series.name)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(legend)).alignment(Alignment::Center),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_first_axis_points_up() {
        assert_close(radar_points(&[10.0, 0.0, 0.0, 0.0], 10.0, 1.0)[0], (0.0, 1.0));
    }

    #[test]
    fn test_axes_go_clockwise() {
        let points = radar_points(&[10.0; 4], 10.0, 1.0);
        assert_close(points[1], (1.0, 0.0));
        assert_close(points[2], (0.0, -1.0));
        assert_close(points[3], (-1.0, 0.0));
    }

    #[test]
    fn test_values_scale_radius() {
        let points = radar_points(&[5.0, 5.0, 5.0, 5.0, 5.0], 10.0, 10.0);
        for (x, y) in points {
            assert!(((x * x + y * y).sqrt() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_values_clamped_to_range() {
        let points = radar_points(&[15.0, -1.0, 0.0, 0.0, 0.0], 10.0, 1.0);
        assert_close(points[0], (0.0, 1.0));
        assert_close(points[1], (0.0, 0.0));
    }
}
