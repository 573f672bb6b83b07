//! SVG rendering of the simulator chart with `plotters`.
//!
//! One "Regression Data" chart: the point source as blue dots and the line
//! source in orange, on the current axis ranges.

// External dependencies
use core::fmt::Display;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

// Internal dependencies
use crate::errors::RegSimError;
use crate::session::Simulator;
use crate::source::Range1d;

const FONT: &str = "sans-serif";

const POINT: RGBColor = RGBColor(31, 119, 180);
const ORANGE: RGBColor = RGBColor(255, 127, 14);

impl Simulator {
    /// Chart title.
    pub const TITLE: &'static str = "Regression Data";

    /// Chart size in pixels, width by height.
    pub const CHART_SIZE: (u32, u32) = (600, 300);

    /// Draw the chart into an SVG file.
    pub fn render_svg(&self, path: impl AsRef<Path>) -> Result<(), RegSimError> {
        let root = SVGBackend::new(path.as_ref(), Self::CHART_SIZE).into_drawing_area();
        self.draw(&root)?;
        root.present().map_err(render_error)
    }

    /// Draw the chart and return the SVG document.
    pub fn render_svg_string(&self) -> Result<String, RegSimError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, Self::CHART_SIZE).into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(render_error)?;
        }
        Ok(svg)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RegSimError> {
        root.fill(&WHITE).map_err(render_error)?;

        let x = non_degenerate(self.x_range());
        let y = non_degenerate(self.y_range());

        let mut chart = ChartBuilder::on(root)
            .caption(Self::TITLE, (FONT, 18))
            .margin(10)
            .x_label_area_size(32)
            .y_label_area_size(44)
            .build_cartesian_2d(x.start..x.end, y.start..y.end)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc("X")
            .y_desc("Y")
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(
                self.data_source()
                    .points()
                    .map(|p| Circle::new(p, 3, POINT.filled())),
            )
            .map_err(render_error)?;

        chart
            .draw_series(LineSeries::new(
                self.line_source().points(),
                ORANGE.stroke_width(2),
            ))
            .map_err(render_error)?;

        Ok(())
    }
}

/// Give a zero-width range unit width around its center.
fn non_degenerate(range: Range1d) -> Range1d {
    if range.span() > 0.0 {
        range
    } else {
        Range1d {
            start: range.start - 0.5,
            end: range.end + 0.5,
        }
    }
}

fn render_error<E: Display>(err: E) -> RegSimError {
    RegSimError::Render(err.to_string())
}
