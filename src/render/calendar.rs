// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PNG calendar heatmap: one panel per year, week columns, weekday rows.

use crate::error::{Error, Result};
use crate::models::DailyDistance;
use crate::render::CalendarRenderer;
use chrono::{Datelike, NaiveDate};
use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use std::path::Path;

/// Week columns in a year panel (a year can touch 54 Monday-based weeks).
const WEEK_COLUMNS: u32 = 54;
/// Weekday rows, Monday on top.
const DAY_ROWS: u32 = 7;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const EMPTY_DAY: Rgb<u8> = Rgb([235, 235, 235]);

/// Matplotlib's YlGnBu ramp, light to dark.
const YLGNBU: [[u8; 3]; 9] = [
    [0xff, 0xff, 0xd9],
    [0xed, 0xf8, 0xb1],
    [0xc7, 0xe9, 0xb4],
    [0x7f, 0xcd, 0xbb],
    [0x41, 0xb6, 0xc4],
    [0x1d, 0x91, 0xc0],
    [0x22, 0x5e, 0xa8],
    [0x25, 0x34, 0x94],
    [0x08, 0x1d, 0x58],
];

/// Output size of the calendar image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOptions {
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            width_px: 1500,
            height_px: 900,
        }
    }
}

/// Calendar renderer writing a PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCalendarRenderer;

impl PngCalendarRenderer {
    /// Draw the heatmap into an in-memory image.
    pub fn draw(&self, days: &DailyDistance, options: &CalendarOptions) -> Result<RgbImage> {
        let (width, height) = (options.width_px, options.height_px);
        if width == 0 || height == 0 {
            return Err(Error::Render(format!(
                "Invalid image size {}x{}",
                width, height
            )));
        }

        let (first_year, last_year) = match (days.keys().next(), days.keys().next_back()) {
            (Some(first), Some(last)) => (first.year(), last.year()),
            _ => return Err(Error::NoData),
        };
        let years = (last_year - first_year + 1) as u32;

        // One blank row between year panels, one cell of margin around the grid.
        let grid_rows = years * DAY_ROWS + (years - 1);
        let cell = (width / (WEEK_COLUMNS + 2))
            .min(height / (grid_rows + 2))
            .max(1);
        let gap = (cell / 8).max(if cell > 2 { 1 } else { 0 });

        let max_value = days.values().copied().fold(0.0_f64, f64::max);
        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

        for (panel, year) in (first_year..=last_year).enumerate() {
            let top = cell + panel as u32 * (DAY_ROWS + 1) * cell;
            let Some(jan1) = NaiveDate::from_ymd_opt(year, 1, 1) else {
                continue;
            };

            for date in jan1.iter_days().take_while(|d| d.year() == year) {
                let (col, row) = cell_position(date);
                let color = match days.get(&date) {
                    Some(value) => ramp_color(*value, max_value),
                    None => EMPTY_DAY,
                };
                let rect = Rect::at((cell + col * cell) as i32, (top + row * cell) as i32)
                    .of_size(cell - gap, cell - gap);
                draw_filled_rect_mut(&mut img, rect, color);
            }
        }

        Ok(img)
    }
}

impl CalendarRenderer for PngCalendarRenderer {
    fn render(
        &self,
        days: &DailyDistance,
        options: &CalendarOptions,
        output: &Path,
    ) -> Result<()> {
        let img = self.draw(days, options)?;
        img.save(output)
            .map_err(|e| Error::Render(format!("Failed to write {}: {}", output.display(), e)))?;
        tracing::info!(path = %output.display(), days = days.len(), "Calendar heatmap saved");
        Ok(())
    }
}

/// Week column and weekday row of a date within its year panel.
fn cell_position(date: NaiveDate) -> (u32, u32) {
    let jan1_offset = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(|d| d.weekday().num_days_from_monday())
        .unwrap_or(0);
    let col = (date.ordinal0() + jan1_offset) / DAY_ROWS;
    let row = date.weekday().num_days_from_monday();
    (col, row)
}

/// Linear interpolation along the YlGnBu ramp for `value / max`.
fn ramp_color(value: f64, max: f64) -> Rgb<u8> {
    let t = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let scaled = t * (YLGNBU.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(YLGNBU.len() - 1);
    let frac = scaled - lo as f64;

    let mut out = [0u8; 3];
    for (i, channel) in out.iter_mut().enumerate() {
        let a = YLGNBU[lo][i] as f64;
        let b = YLGNBU[hi][i] as f64;
        *channel = (a + (b - a) * frac).round() as u8;
    }
    Rgb(out)
}
