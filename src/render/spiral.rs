//! Spiral renderer: draws yearly frames with plotters and encodes a GIF
//!
//! Layout per frame:
//! - title band (title + "Year | Latest" line)
//! - square polar panel: grid rings, month spokes and labels, the gray
//!   connecting line, temperature-colored points, optional annotations
//! - colorbar on the right (about 10% of the width)
//! - explanatory footer at the bottom-left

use super::frames::{year_frames, YearFrame};
use super::polar::{PolarProjection, MONTH_LABELS};
use crate::climate::{ClimateError, ColorScale, NormalizedSeries, Result};
use crate::config::SpiralConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, FontTransform};
use std::path::Path;

const FONT: &str = "sans-serif";
const TITLE_HEIGHT: u32 = 80;
const FOOTER_HEIGHT: u32 = 60;
const GRID_RINGS: usize = 4;
const RING_SEGMENTS: usize = 120;
/// Half-width of the Cartesian chart; leaves room for month labels outside the disk
const EXTENT: f64 = 1.15;
const LABEL_RADIUS: f64 = 1.07;
const ANNOTATION_OFFSET: f64 = 0.05;
const COLORBAR_STEPS: usize = 128;

const FOOTER_LINES: [&str; 3] = [
    "Each point represents monthly temperature.",
    "Colors indicate temperature values.",
    "Distance from center shows relative temperature variation.",
];

fn draw_err<E: std::fmt::Display>(err: E) -> ClimateError {
    ClimateError::Render(err.to_string())
}

fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

/// Renders a normalized series as an animated polar spiral
pub struct SpiralRenderer<'a> {
    config: &'a SpiralConfig,
    series: &'a NormalizedSeries,
    scale: ColorScale,
    projection: PolarProjection,
}

impl<'a> SpiralRenderer<'a> {
    pub fn new(config: &'a SpiralConfig, series: &'a NormalizedSeries) -> Result<Self> {
        let scale = ColorScale::new(series.range(), &config.palette)?;
        let projection = PolarProjection::new(
            config.radial_min,
            config.radial_max(series.max_norm()),
        );
        Ok(Self {
            config,
            series,
            scale,
            projection,
        })
    }

    pub fn projection(&self) -> &PolarProjection {
        &self.projection
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    /// Render every yearly frame into an animated GIF, returns the frame count
    pub fn render_gif(&self, path: &Path) -> Result<usize> {
        let backend = BitMapBackend::gif(
            path,
            (self.config.width, self.config.height),
            self.config.frame_delay_ms(),
        )
        .map_err(draw_err)?;
        let root = backend.into_drawing_area();

        let mut count = 0usize;
        for frame in year_frames(self.series) {
            self.draw_frame(&root, &frame)?;
            root.present().map_err(draw_err)?;
            count += 1;
            tracing::debug!(year = frame.year, points = frame.records.len(), "Frame rendered");
        }

        Ok(count)
    }

    /// Draw one frame onto any drawing area
    pub fn draw_frame<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        frame: &YearFrame<'_>,
    ) -> Result<()> {
        root.fill(&WHITE).map_err(draw_err)?;

        let (width, _) = root.dim_in_pixel();
        let bar_width = (width / 10).max(60).min(width / 2);
        let (plot_area, bar_area) = root.split_horizontally(width - bar_width);
        let (title_area, body) = plot_area.split_vertically(TITLE_HEIGHT);

        self.draw_title(&title_area, frame)?;

        // Square panel keeps the rings circular
        let (body_w, body_h) = body.dim_in_pixel();
        let side = body_w.min(body_h.saturating_sub(FOOTER_HEIGHT)).max(1);
        let left = (body_w - side) / 2;
        let panel = body.shrink((left, 0u32), (side, side));

        self.draw_polar(&panel, frame)?;
        self.draw_colorbar(&bar_area)?;
        self.draw_footer(root)?;

        Ok(())
    }

    fn draw_title<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        frame: &YearFrame<'_>,
    ) -> Result<()> {
        let (width, _) = area.dim_in_pixel();
        let center = (width / 2) as i32;
        let style = TextStyle::from((FONT, 24).into_font().style(FontStyle::Bold))
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));

        for (i, line) in frame.title_lines(self.config).iter().enumerate() {
            let y = 12 + 30 * i as i32;
            area.draw(&Text::new(line.as_str(), (center, y), style.clone()))
                .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_polar<DB: DrawingBackend>(
        &self,
        panel: &DrawingArea<DB, Shift>,
        frame: &YearFrame<'_>,
    ) -> Result<()> {
        let mut chart = ChartBuilder::on(panel)
            .margin(10)
            .build_cartesian_2d(-EXTENT..EXTENT, -EXTENT..EXTENT)
            .map_err(draw_err)?;

        let proj = &self.projection;
        let grid = BLACK.mix(self.config.grid_alpha).stroke_width(1);

        for r in proj.grid_radii(GRID_RINGS) {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    proj.ring(r, RING_SEGMENTS),
                    grid,
                )))
                .map_err(draw_err)?;
        }

        let label_style = TextStyle::from((FONT, 15).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for (i, label) in MONTH_LABELS.iter().enumerate() {
            let (x, y) = proj.project_month(i as u32 + 1, proj.r_max());
            chart
                .draw_series(std::iter::once(PathElement::new(vec![(0.0, 0.0), (x, y)], grid)))
                .map_err(draw_err)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    *label,
                    (x * LABEL_RADIUS, y * LABEL_RADIUS),
                    label_style.clone(),
                )))
                .map_err(draw_err)?;
        }

        let coords: Vec<(f64, f64)> = frame
            .records
            .iter()
            .map(|r| proj.project_month(r.month, r.radius()))
            .collect();

        let line = RGBColor(128, 128, 128)
            .mix(self.config.line_alpha)
            .stroke_width(1);
        chart
            .draw_series(LineSeries::new(coords.iter().copied(), line))
            .map_err(draw_err)?;

        chart
            .draw_series(frame.records.iter().zip(&coords).map(|(record, &pos)| {
                let color = rgb(self.scale.color_for(record.temperature));
                Circle::new(
                    pos,
                    self.config.point_size,
                    color.mix(self.config.point_alpha).filled(),
                )
            }))
            .map_err(draw_err)?;

        if self.config.annotate_latest {
            let note_style = TextStyle::from((FONT, 11).into_font())
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart
                .draw_series(frame.current_year().map(|record| {
                    let pos = proj.project_month(record.month, record.radius() + ANNOTATION_OFFSET);
                    Text::new(
                        self.config.format_temperature(record.temperature),
                        pos,
                        note_style.clone(),
                    )
                }))
                .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_colorbar<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let (width, height) = area.dim_in_pixel();
        let x0 = (width as f64 * 0.15) as i32;
        let x1 = x0 + (width as f64 * 0.2).max(8.0) as i32;
        let top = (height as f64 * 0.15) as i32;
        let bottom = (height as f64 * 0.85) as i32;
        let bar_h = (bottom - top).max(1);

        let stops = self.scale.gradient(COLORBAR_STEPS);
        let n = stops.len() as i32;
        for (i, stop) in stops.iter().enumerate() {
            let i = i as i32;
            let y_low = bottom - bar_h * i / n;
            let y_high = bottom - bar_h * (i + 1) / n;
            area.draw(&Rectangle::new(
                [(x0, y_high), (x1, y_low)],
                rgb(stop.color).filled(),
            ))
            .map_err(draw_err)?;
        }
        area.draw(&Rectangle::new(
            [(x0, top), (x1, bottom)],
            BLACK.stroke_width(1),
        ))
        .map_err(draw_err)?;

        let tick_style = TextStyle::from((FONT, 12).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        let range = self.scale.range();
        for value in self.scale.ticks(self.config.colorbar_ticks) {
            let y = bottom - (range.normalize(value) * bar_h as f64).round() as i32;
            area.draw(&PathElement::new(
                vec![(x1, y), (x1 + 4, y)],
                BLACK.stroke_width(1),
            ))
            .map_err(draw_err)?;
            area.draw(&Text::new(
                format!("{:.1}", value),
                (x1 + 7, y),
                tick_style.clone(),
            ))
            .map_err(draw_err)?;
        }

        let label_style = TextStyle::from(
            (FONT, 14)
                .into_font()
                .transform(FontTransform::Rotate270),
        )
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
        let label = format!("Temperature ({})", self.config.temperature_unit);
        let label_x = (x1 + 50).min(width as i32 - 10);
        area.draw(&Text::new(label, (label_x, (top + bottom) / 2), label_style))
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_footer<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let (_, height) = root.dim_in_pixel();
        let style = TextStyle::from((FONT, 12).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Bottom));

        let n = FOOTER_LINES.len() as i32;
        for (i, line) in FOOTER_LINES.iter().enumerate() {
            let y = height as i32 - 12 - 15 * (n - 1 - i as i32);
            root.draw(&Text::new(*line, (16, y), style.clone()))
                .map_err(draw_err)?;
        }
        Ok(())
    }
}
