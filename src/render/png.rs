//! Draws pie charts as PNG images with the `image` crate.
//!
//! Layout: the chart title runs across the top. Below it the pie occupies the left three quarters
//! of the canvas and a legend sits on the right: one color swatch per category, in series order,
//! followed by the category name and its share of the total. Wedges start at twelve o'clock and
//! run clockwise, sized by each category's absolute total.
//!
//! Text is drawn with the 8x8 bitmap glyphs from `font8x8`, so no system fonts are needed.

use crate::error::Res;
use crate::render::{write_to_targets, Chart, ChartRenderer};
use anyhow::Context;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageFormat, Rgb, RgbImage};
use std::f64::consts::TAU;
use std::io::Cursor;
use std::path::PathBuf;
use tracing::trace;

const BACKGROUND: Rgb<u8> = Rgb([235, 235, 235]);
const EMPTY_PIE: Rgb<u8> = Rgb([200, 200, 200]);
const PALETTE: [Rgb<u8>; 10] = [
    Rgb([248, 118, 109]),
    Rgb([0, 186, 56]),
    Rgb([97, 156, 255]),
    Rgb([183, 159, 0]),
    Rgb([0, 191, 196]),
    Rgb([245, 100, 227]),
    Rgb([124, 174, 0]),
    Rgb([199, 124, 255]),
    Rgb([0, 169, 255]),
    Rgb([222, 140, 0]),
];
const TEXT: Rgb<u8> = Rgb([40, 40, 40]);
const SWATCH: u32 = 16;
const SWATCH_GAP: u32 = 8;
const GLYPH: u32 = 8;
const TITLE_SCALE: u32 = 2;
/// Height of the strip reserved for the title.
const TITLE_BAND: u32 = GLYPH * TITLE_SCALE + 2 * SWATCH_GAP;

/// Writes `{id}.png` into every target directory.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    targets: Vec<PathBuf>,
    width: u32,
    height: u32,
}

impl PngRenderer {
    pub fn new(targets: Vec<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            targets,
            width,
            height,
        }
    }
}

impl ChartRenderer for PngRenderer {
    fn render(&mut self, chart: &Chart<'_>) -> Res<Vec<PathBuf>> {
        let image = draw_pie(chart, self.width, self.height);
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .with_context(|| format!("Unable to encode '{}' as PNG", chart.title()))?;
        write_to_targets(
            &self.targets,
            &format!("{}.png", chart.id()),
            bytes.get_ref(),
        )
    }
}

/// The color of the `index`th series.
pub(crate) fn series_color(index: usize) -> Rgb<u8> {
    PALETTE[index % PALETTE.len()]
}

/// Draws `chart` onto a new `width` x `height` canvas.
pub fn draw_pie(chart: &Chart<'_>, width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND);

    let weights: Vec<f64> = chart
        .totals()
        .iter()
        .map(|(_, amount)| amount.abs().to_f64())
        .collect();
    let sum: f64 = weights.iter().sum();

    // Cumulative end of each wedge as a fraction of the full turn.
    let mut ends = Vec::with_capacity(weights.len());
    let mut acc = 0.0;
    for weight in &weights {
        acc += weight;
        ends.push(if sum > 0.0 { acc / sum } else { 0.0 });
    }

    let title = chart.title();
    let title_width = text_width(&title, TITLE_SCALE);
    draw_text(
        &mut image,
        width.saturating_sub(title_width) / 2,
        SWATCH_GAP,
        &title,
        TITLE_SCALE,
    );

    let pie_width = width - width / 4;
    let pie_height = height.saturating_sub(TITLE_BAND);
    let cx = f64::from(pie_width) / 2.0;
    let cy = f64::from(TITLE_BAND) + f64::from(pie_height) / 2.0;
    let radius = f64::from(pie_width.min(pie_height)) / 2.0 * 0.85;
    trace!(
        "Drawing '{title}' with {} wedges, radius {radius:.1}",
        weights.len()
    );

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - cx;
        let dy = f64::from(y) + 0.5 - cy;
        if dx * dx + dy * dy > radius * radius {
            continue;
        }
        if sum <= 0.0 {
            *pixel = EMPTY_PIE;
            continue;
        }
        // Clockwise from twelve o'clock, in [0, 1).
        let turn = dx.atan2(-dy).rem_euclid(TAU) / TAU;
        let wedge = ends
            .iter()
            .position(|end| turn < *end)
            .unwrap_or(ends.len() - 1);
        *pixel = series_color(wedge);
    }

    let labels: Vec<String> = chart
        .totals()
        .iter()
        .zip(&weights)
        .map(|((category, _), weight)| {
            let share = if sum > 0.0 { weight / sum * 100.0 } else { 0.0 };
            format!("{category} {share:.1}%")
        })
        .collect();
    draw_legend(&mut image, pie_width, &labels);
    image
}

fn draw_legend(image: &mut RgbImage, left: u32, labels: &[String]) {
    let (width, height) = image.dimensions();
    let x0 = left + SWATCH_GAP;
    for (index, label) in labels.iter().enumerate() {
        let y0 = TITLE_BAND + index as u32 * (SWATCH + SWATCH_GAP);
        if y0 + SWATCH > height || x0 + SWATCH > width {
            break;
        }
        let color = series_color(index);
        for y in y0..y0 + SWATCH {
            for x in x0..x0 + SWATCH {
                image.put_pixel(x, y, color);
            }
        }
        draw_text(
            image,
            x0 + SWATCH + SWATCH_GAP / 2,
            y0 + (SWATCH - GLYPH) / 2,
            label,
            1,
        );
    }
}

fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH * scale
}

/// Draws `text` with its top left corner at (`x`, `y`), clipping at the canvas edges. Characters
/// without a glyph are drawn as `?`.
fn draw_text(image: &mut RgbImage, x: u32, y: u32, text: &str, scale: u32) {
    let (width, height) = image.dimensions();
    for (index, c) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(c).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let left = x + index as u32 * GLYPH * scale;
        if left >= width {
            break;
        }
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = left + col * scale;
                let py = y + row as u32 * scale;
                for sy in py..(py + scale).min(height) {
                    for sx in px..(px + scale).min(width) {
                        image.put_pixel(sx, sy, TEXT);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, CategoryTotals};
    use crate::render::ChartKind;

    const W: u32 = 400;
    const H: u32 = 300;

    fn centre() -> (u32, u32) {
        ((W - W / 4) / 2, TITLE_BAND + (H - TITLE_BAND) / 2)
    }

    fn has_text(image: &RgbImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> bool {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .any(|(x, y)| *image.get_pixel(x, y) == TEXT)
    }

    #[test]
    fn test_single_category_fills_pie() {
        let totals: CategoryTotals = [("Rent", Amount::from(-900))].into_iter().collect();
        let image = draw_pie(&Chart::new("May", ChartKind::Expenses, &totals), W, H);
        let (cx, cy) = centre();
        assert_eq!(*image.get_pixel(cx, cy), series_color(0));
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn test_two_equal_categories_split_in_half() {
        let totals: CategoryTotals = [("Food", Amount::from(-50)), ("Rent", Amount::from(-50))]
            .into_iter()
            .collect();
        let image = draw_pie(&Chart::new("May", ChartKind::Expenses, &totals), W, H);
        let (cx, cy) = centre();
        // three o'clock is in the first half turn, nine o'clock in the second
        assert_eq!(*image.get_pixel(cx + 40, cy), series_color(0));
        assert_eq!(*image.get_pixel(cx - 40, cy), series_color(1));
    }

    #[test]
    fn test_empty_totals_draw_grey_pie() {
        let totals = CategoryTotals::new();
        let image = draw_pie(&Chart::new("May", ChartKind::Deposits, &totals), W, H);
        let (cx, cy) = centre();
        assert_eq!(*image.get_pixel(cx, cy), EMPTY_PIE);
    }

    #[test]
    fn test_legend_swatches() {
        let totals: CategoryTotals = [("A", Amount::from(1)), ("B", Amount::from(2))]
            .into_iter()
            .collect();
        let image = draw_pie(&Chart::new("May", ChartKind::Deposits, &totals), W, H);
        let x = W - W / 4 + SWATCH_GAP + 1;
        assert_eq!(*image.get_pixel(x, TITLE_BAND + 1), series_color(0));
        assert_eq!(
            *image.get_pixel(x, TITLE_BAND + SWATCH + SWATCH_GAP + 1),
            series_color(1)
        );
        assert_eq!(
            *image.get_pixel(x, TITLE_BAND + 2 * (SWATCH + SWATCH_GAP) + 1),
            BACKGROUND
        );
    }

    #[test]
    fn test_title_is_drawn() {
        let totals: CategoryTotals = [("Food", Amount::from(-5))].into_iter().collect();
        let image = draw_pie(&Chart::new("2024-01", ChartKind::Expenses, &totals), W, H);
        assert!(has_text(&image, 0..W, 0..TITLE_BAND));
        assert!(!has_text(&image, 0..40, 0..TITLE_BAND));
    }

    #[test]
    fn test_legend_labels_are_drawn() {
        let totals: CategoryTotals = [("Food", Amount::from(-30)), ("Rent", Amount::from(-90))]
            .into_iter()
            .collect();
        let image = draw_pie(&Chart::new("May", ChartKind::Expenses, &totals), W, H);
        let text_x = W - W / 4 + SWATCH_GAP + SWATCH;
        let first_row = TITLE_BAND..TITLE_BAND + SWATCH;
        assert!(has_text(&image, text_x..W, first_row));
        let third_top = TITLE_BAND + 2 * (SWATCH + SWATCH_GAP);
        let third_row = third_top..third_top + SWATCH;
        assert!(!has_text(&image, text_x..W, third_row));
    }

    #[test]
    fn test_text_clips_at_edges() {
        let mut image = RgbImage::from_pixel(20, 10, BACKGROUND);
        draw_text(&mut image, 12, 4, "WWWW", 2);
        assert!(has_text(&image, 12..20, 4..10));
        assert_eq!(text_width("WWWW", 2), 64);
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::TempDir::new().unwrap();
        let totals: CategoryTotals = [("Food", Amount::from(-5))].into_iter().collect();
        let mut renderer = PngRenderer::new(vec![dir.path().to_path_buf()], W, H);
        let written = renderer
            .render(&Chart::new("June", ChartKind::Expenses, &totals))
            .unwrap();
        assert_eq!(written, vec![dir.path().join("June-expenses.png")]);
        let decoded = image::open(&written[0]).unwrap();
        assert_eq!(decoded.width(), W);
        assert_eq!(decoded.height(), H);
    }
}
