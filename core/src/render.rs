//! Visualization sink: scatter plot of hotspots with interference overlay.
//!
//! The sink only consumes finalized data. `SvgPlot` draws with plotters'
//! SVG backend, which needs no system fonts; other sinks can implement
//! `RenderSink`.

use crate::{
    error::PlanResult,
    interference::InterferenceModel,
    types::{Coord, DomainBounds, Hotspot},
};
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use std::path::{Path, PathBuf};

const SIZE: (u32, u32) = (1000, 800);
const MARKER_RADIUS: i32 = 4;

const GRAY: RGBColor = RGBColor(128, 128, 128);
const CYAN_FACE: RGBColor = RGBColor(0, 255, 255);
const GREEN_FACE: RGBColor = RGBColor(0, 128, 0);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Face colour per channel symbol; anything else is gray.
pub fn channel_colour(symbol: &str) -> RGBColor {
    match symbol {
        "B" => CYAN_FACE,
        "C" => GREEN_FACE,
        "D" => PURPLE,
        "E" => ORANGE,
        _ => GRAY,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x:           Coord,
    pub y:           Coord,
    pub channel:     String,
    pub interfering: bool,
}

/// Everything a sink needs to draw one assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFrame {
    /// Assignment name, e.g. `iteration_3`.
    pub name:   String,
    pub title:  String,
    pub extent: DomainBounds,
    pub points: Vec<PlotPoint>,
    pub pairs:  Vec<((Coord, Coord), (Coord, Coord))>,
}

impl PlotFrame {
    pub fn build(
        name: &str,
        bounds: DomainBounds,
        hotspots: &[Hotspot],
        model: &InterferenceModel,
    ) -> Self {
        let pairs = model.interfering_pairs(hotspots);
        let flagged = model.interfering_hotspots(hotspots);

        let points = hotspots
            .iter()
            .enumerate()
            .map(|(i, h)| PlotPoint {
                x:           h.x,
                y:           h.y,
                channel:     h.channel.symbol().to_string(),
                interfering: flagged.contains(&i),
            })
            .collect();

        let mut extent = bounds;
        for h in hotspots {
            extent.x_min = extent.x_min.min(h.x);
            extent.x_max = extent.x_max.max(h.x);
            extent.y_min = extent.y_min.min(h.y);
            extent.y_max = extent.y_max.max(h.y);
        }

        Self {
            name:  name.to_string(),
            title: format!("Hotspot Locations (Latest: {name}) with Interference Highlighted"),
            extent,
            points,
            pairs: pairs
                .into_iter()
                .map(|(i, j)| (hotspots[i].position(), hotspots[j].position()))
                .collect(),
        }
    }
}

pub trait RenderSink {
    fn render(&mut self, frame: &PlotFrame) -> PlanResult<()>;
}

/// Writes `<out_dir>/<frame name>.svg`.
pub struct SvgPlot {
    out_dir: PathBuf,
}

impl SvgPlot {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self { out_dir: out_dir.as_ref().to_path_buf() }
    }

    pub fn artifact_path(&self, frame: &PlotFrame) -> PathBuf {
        self.out_dir.join(format!("{}.svg", frame.name))
    }
}

impl RenderSink for SvgPlot {
    fn render(&mut self, frame: &PlotFrame) -> PlanResult<()> {
        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.artifact_path(frame);
        draw_frame(&path, frame)?;
        log::info!("plot written to {}", path.display());
        Ok(())
    }
}

fn draw_frame(path: &Path, frame: &PlotFrame) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let ext = frame.extent;
    let mut chart = ChartBuilder::on(&root)
        .caption(&frame.title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            ext.x_min as f64..ext.x_max as f64,
            ext.y_min as f64..ext.y_max as f64,
        )?;

    chart
        .configure_mesh()
        .x_desc("X Coordinate")
        .y_desc("Y Coordinate")
        .draw()?;

    chart.draw_series(frame.pairs.iter().map(|&((x1, y1), (x2, y2))| {
        PathElement::new(
            vec![(x1 as f64, y1 as f64), (x2 as f64, y2 as f64)],
            RED.mix(0.6).stroke_width(1),
        )
    }))?;

    // Faces, then edges.
    chart.draw_series(frame.points.iter().map(|p| {
        Circle::new(
            (p.x as f64, p.y as f64),
            MARKER_RADIUS,
            channel_colour(&p.channel).filled(),
        )
    }))?;
    chart.draw_series(frame.points.iter().map(|p| {
        let edge = if p.interfering { RED } else { BLACK };
        Circle::new((p.x as f64, p.y as f64), MARKER_RADIUS, edge.stroke_width(1))
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;

    fn frame() -> PlotFrame {
        let hotspots = vec![
            Hotspot::new(1, 10, 10, Channel::known("A")),
            Hotspot::new(2, 60, 10, Channel::known("A")),
            Hotspot::new(3, 4000, 4000, Channel::known("E")),
        ];
        PlotFrame::build(
            "iteration_1",
            DomainBounds::default(),
            &hotspots,
            &InterferenceModel::default(),
        )
    }

    #[test]
    fn frame_flags_interfering_points_and_pairs() {
        let f = frame();
        assert_eq!(f.pairs, vec![((10, 10), (60, 10))]);
        let flags: Vec<bool> = f.points.iter().map(|p| p.interfering).collect();
        assert_eq!(flags, vec![true, true, false]);
        assert!(f.title.contains("Latest: iteration_1"));
    }

    #[test]
    fn frame_extent_covers_points_outside_bounds() {
        let hotspots = vec![Hotspot::new(1, -20, 6000, Channel::known("B"))];
        let f = PlotFrame::build(
            "channel",
            DomainBounds::default(),
            &hotspots,
            &InterferenceModel::default(),
        );
        assert_eq!(f.extent, DomainBounds { x_min: -20, x_max: 5000, y_min: 1, y_max: 6000 });
        assert!(f.pairs.is_empty());
        assert_eq!(f.points[0].channel, "B");
    }

    #[test]
    fn svg_plot_writes_titled_chart() {
        let dir = std::env::temp_dir().join(format!("hotspot-render-{}", std::process::id()));
        let mut sink = SvgPlot::new(&dir);
        let f = frame();
        sink.render(&f).unwrap();

        let svg = std::fs::read_to_string(sink.artifact_path(&f)).unwrap();
        assert!(svg.contains("iteration_1"));
        assert!(svg.contains("X Coordinate"));
        assert!(svg.contains("Y Coordinate"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_channels_render_gray() {
        assert_eq!(channel_colour("Z"), channel_colour("A"));
        assert_eq!(channel_colour("Z"), RGBColor(128, 128, 128));
        assert_eq!(channel_colour("B"), RGBColor(0, 255, 255));
    }
}
