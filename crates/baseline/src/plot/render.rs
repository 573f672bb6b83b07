//! SVG rendering of the diagnostic grid with `plotters`.
//!
//! The figure is a two-line header (title and fitted equation) above a 2×4
//! grid of charts. Limit lines are green at zero, yellow at ±warning and red
//! at ±alarm; the diagonal of the predicted-vs-actual chart is black.

// External dependencies
use core::fmt::Display;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

// Internal dependencies
use crate::plot::panels::{LineKind, Panel, RegressionPlot};
use crate::primitives::errors::BaselineError;

const HEADER_HEIGHT: u32 = 90;
const FONT: &str = "sans-serif";

const POINT: RGBColor = RGBColor(31, 119, 180);
const WARNING: RGBColor = RGBColor(191, 191, 0);
const WHEAT: RGBColor = RGBColor(245, 222, 179);

impl RegressionPlot<'_> {
    /// Draw the figure into an SVG file.
    pub fn render_svg(&self, path: impl AsRef<Path>, size: (u32, u32)) -> Result<(), BaselineError> {
        let root = SVGBackend::new(path.as_ref(), size).into_drawing_area();
        self.draw(&root)?;
        root.present().map_err(render_error)
    }

    /// Draw the figure and return the SVG document.
    pub fn render_svg_string(&self, size: (u32, u32)) -> Result<String, BaselineError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(render_error)?;
        }
        Ok(svg)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), BaselineError> {
        root.fill(&WHITE).map_err(render_error)?;

        let (header, body) = root.split_vertically(HEADER_HEIGHT);
        header
            .draw(&Text::new(self.title(), (20, 12), (FONT, 26)))
            .map_err(render_error)?;
        header
            .draw(&Text::new(self.subtitle().to_string(), (20, 50), (FONT, 22)))
            .map_err(render_error)?;

        let areas = body.split_evenly(Self::GRID);
        for (area, panel) in areas.iter().zip(self.panels().iter()) {
            draw_panel(area, panel)?;
        }
        Ok(())
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
) -> Result<(), BaselineError> {
    let (x0, x1) = panel.x_range;
    let (y0, y1) = panel.y_range;

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 16))
        .margin(8)
        .x_label_area_size(36)
        .y_label_area_size(52)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .x_labels(6)
        .y_labels(6)
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(panel.bars.iter().map(|bar| {
            Rectangle::new(
                [(bar.left, 0.0), (bar.right, bar.height)],
                POINT.mix(0.4).filled(),
            )
        }))
        .map_err(render_error)?;

    if !panel.curve.is_empty() {
        chart
            .draw_series(LineSeries::new(panel.curve.iter().copied(), BLACK.stroke_width(2)))
            .map_err(render_error)?;
    }

    chart
        .draw_series(
            panel
                .points
                .iter()
                .map(|&p| Circle::new(p, 2, POINT.filled())),
        )
        .map_err(render_error)?;

    for line in &panel.lines {
        let color = match line.kind {
            LineKind::Zero => GREEN,
            LineKind::Warning => WARNING,
            LineKind::Alarm => RED,
            LineKind::Diagonal => BLACK,
        };
        chart
            .draw_series(LineSeries::new([line.from, line.to], color.stroke_width(2)))
            .map_err(render_error)?;
    }

    if !panel.annotation.is_empty() {
        let anchor = (x0 + 0.05 * (x1 - x0), y1 - 0.05 * (y1 - y0));
        let height = 8 + 18 * panel.annotation.len() as i32;
        let width = 12 + 9 * panel.annotation.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;

        chart
            .draw_series(std::iter::once(
                EmptyElement::at(anchor)
                    + Rectangle::new([(0, 0), (width, height)], WHEAT.mix(0.5).filled()),
            ))
            .map_err(render_error)?;
        for (i, text) in panel.annotation.iter().enumerate() {
            chart
                .draw_series(std::iter::once(
                    EmptyElement::at(anchor)
                        + Text::new(text.clone(), (6, 4 + 18 * i as i32), (FONT, 14)),
                ))
                .map_err(render_error)?;
        }
    }

    Ok(())
}

fn render_error<E: Display>(err: E) -> BaselineError {
    BaselineError::Render(err.to_string())
}
