//! ASCII charts for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Chart elements:
//! - daily production: `#` bars
//! - hourly profile: `-` line with `o` markers

use crate::domain::EnergyUnit;
use crate::report::{DailyEnergy, HourlyAverage};

/// Render per-date production totals as a bar chart.
///
/// Bars scale from zero so day-to-day output is visually comparable; days map
/// left-to-right across the width in chronological order.
pub fn render_daily_bars(
    daily: &[DailyEnergy],
    unit: EnergyUnit,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(4);

    let max_wh = daily.iter().map(|d| d.total_wh).fold(0.0_f64, f64::max);

    let mut out = String::new();
    out.push_str(&format!(
        "Daily energy ({}): {} days | max={:.2}\n",
        unit.label(),
        daily.len(),
        max_wh / unit.factor()
    ));

    if daily.is_empty() || max_wh <= 0.0 {
        return out;
    }

    let mut grid = vec![vec![' '; width]; height];
    let n = daily.len();

    for (i, day) in daily.iter().enumerate() {
        let x = map_x(i as f64, 0.0, (n.max(2) - 1) as f64, width);
        let levels = ((day.total_wh / max_wh) * height as f64).round() as usize;
        for level in 0..levels.min(height) {
            grid[height - 1 - level][x] = '#';
        }
    }

    push_grid(&mut out, grid);
    out
}

/// Render the average hourly production profile as a line chart.
pub fn render_hourly_profile(
    profile: &[HourlyAverage],
    unit: EnergyUnit,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut out = String::new();

    let Some((h_min, h_max)) = hour_range(profile) else {
        out.push_str(&format!(
            "Hourly profile ({}): not enough hours to chart\n",
            unit.label()
        ));
        return out;
    };

    let y_max = profile.iter().map(|p| p.mean_wh).fold(0.0_f64, f64::max);
    let (y_lo, y_hi) = pad_range(0.0, y_max.max(1e-9), 0.05);

    out.push_str(&format!(
        "Hourly profile ({}): hour=[{h_min}, {h_max}] | avg max={:.2}\n",
        unit.label(),
        y_max / unit.factor()
    ));

    let mut grid = vec![vec![' '; width]; height];

    // Line first so markers can overlay.
    let mut prev: Option<(usize, usize)> = None;
    for p in profile {
        let x = map_x(p.hour as f64, h_min as f64, h_max as f64, width);
        let y = map_y(p.mean_wh, y_lo, y_hi, height);
        if let Some((x0, y0)) = prev {
            draw_line(&mut grid, x0, y0, x, y, '-');
        }
        prev = Some((x, y));
    }
    for p in profile {
        let x = map_x(p.hour as f64, h_min as f64, h_max as f64, width);
        let y = map_y(p.mean_wh, y_lo, y_hi, height);
        grid[y][x] = 'o';
    }

    push_grid(&mut out, grid);
    out
}

fn hour_range(profile: &[HourlyAverage]) -> Option<(u32, u32)> {
    let first = profile.first()?.hour;
    let last = profile.last()?.hour;
    if last > first { Some((first, last)) } else { None }
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min, max + pad)
}

fn map_x(v: f64, v_min: f64, v_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let span = v_max - v_min;
    if span <= 0.0 {
        return 0;
    }
    let u = ((v - v_min) / span).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn daily_bars_golden_snapshot_small() {
        let daily = vec![
            DailyEnergy {
                date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
                total_wh: 100.0,
                peak_wh: 100.0,
            },
            DailyEnergy {
                date: NaiveDate::from_ymd_opt(2023, 5, 2).unwrap(),
                total_wh: 200.0,
                peak_wh: 200.0,
            },
        ];

        let txt = render_daily_bars(&daily, EnergyUnit::Wh, 10, 4);
        let expected = concat!(
            "Daily energy (Wh): 2 days | max=200.00\n",
            "         #\n",
            "         #\n",
            "#        #\n",
            "#        #\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn daily_bars_empty_dataset_renders_header_only() {
        let txt = render_daily_bars(&[], EnergyUnit::Wh, 20, 5);
        assert_eq!(txt, "Daily energy (Wh): 0 days | max=0.00\n");
    }

    #[test]
    fn hourly_profile_draws_markers_and_line() {
        let profile = vec![
            HourlyAverage { hour: 6, mean_wh: 0.0 },
            HourlyAverage { hour: 12, mean_wh: 1000.0 },
            HourlyAverage { hour: 20, mean_wh: 100.0 },
        ];

        let txt = render_hourly_profile(&profile, EnergyUnit::Wh, 30, 8);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 9); // header + grid rows
        assert!(lines[0].contains("hour=[6, 20]"));

        // Count markers in the grid only; the header text contains 'o's too.
        let markers: usize = lines[1..].iter().map(|l| l.matches('o').count()).sum();
        assert_eq!(markers, 3);
        let dashes: usize = lines[1..].iter().map(|l| l.matches('-').count()).sum();
        assert!(dashes > 0);
    }

    #[test]
    fn hourly_profile_single_hour_degrades_gracefully() {
        let profile = vec![HourlyAverage { hour: 12, mean_wh: 500.0 }];
        let txt = render_hourly_profile(&profile, EnergyUnit::Wh, 20, 5);
        assert!(txt.contains("not enough hours"));
    }
}
