use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{
    Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints, PlotUi, Points, Text,
};

use crate::diagram::Diagram;
use crate::series::{LinePattern, Mark, Marker, Series};
use crate::ui::axes::{self, Edge};

const GRID_COLOR: Color32 = Color32::from_gray(150);
const AXIS_COLOR: Color32 = Color32::BLACK;

// ---------------------------------------------------------------------------
// Ternary plot (central panel)
// ---------------------------------------------------------------------------

/// Render the phase diagram, or a hint when nothing could be loaded.
pub fn ternary_plot(ui: &mut Ui, diagram: Option<&Diagram>) {
    let diagram = match diagram {
        Some(d) => d,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No diagram – see the status bar for the load error");
            });
            return;
        }
    };

    let config = &diagram.config;
    let scale = config.scale;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(&config.title).strong());
    });

    Plot::new("ternary_plot")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-0.25 * scale)
        .include_x(1.25 * scale)
        .include_y(-0.2 * scale)
        .include_y(0.95 * scale)
        .show(ui, |plot_ui| {
            draw_frame(plot_ui, diagram);
            for series in &diagram.series {
                draw_series(plot_ui, series);
            }
        });
}

/// Gridlines, outline, ticks and captions.
fn draw_frame(plot_ui: &mut PlotUi, diagram: &Diagram) {
    let config = &diagram.config;
    let scale = config.scale;

    for [a, b] in axes::gridlines(scale, config.grid_interval) {
        plot_ui.line(
            Line::new(PlotPoints::from(vec![a, b]))
                .color(GRID_COLOR)
                .width(0.5),
        );
    }

    plot_ui.line(
        Line::new(PlotPoints::from(axes::boundary(scale)))
            .color(AXIS_COLOR)
            .width(1.0),
    );

    for tick in axes::ticks(scale, config.grid_interval) {
        plot_ui.line(
            Line::new(PlotPoints::from(vec![tick.base, tick.tip]))
                .color(AXIS_COLOR)
                .width(2.0),
        );
        let anchor = match tick.edge {
            Edge::Bottom => Align2::CENTER_TOP,
            Edge::Right => Align2::LEFT_CENTER,
            Edge::Left => Align2::RIGHT_BOTTOM,
        };
        plot_ui.text(
            Text::new(PlotPoint::new(tick.tip[0], tick.tip[1]), format!("{:.0}", tick.value))
                .anchor(anchor)
                .color(AXIS_COLOR),
        );
    }

    let labels = &config.labels;
    let [right, top, left] = axes::corner_anchors(scale);
    for (pos, text, anchor) in [
        (right, &labels.right_corner, Align2::LEFT_TOP),
        (top, &labels.top_corner, Align2::CENTER_BOTTOM),
        (left, &labels.left_corner, Align2::RIGHT_TOP),
    ] {
        plot_ui.text(
            Text::new(PlotPoint::new(pos[0], pos[1]), RichText::new(text.as_str()).strong())
                .anchor(anchor)
                .color(AXIS_COLOR),
        );
    }

    for (edge, text) in [
        (Edge::Left, &labels.left_edge),
        (Edge::Right, &labels.right_edge),
        (Edge::Bottom, &labels.bottom_edge),
    ] {
        let pos = axes::edge_anchor(scale, edge);
        plot_ui.text(
            Text::new(PlotPoint::new(pos[0], pos[1]), text.as_str())
                .anchor(Align2::CENTER_CENTER)
                .color(AXIS_COLOR),
        );
    }
}

fn draw_series(plot_ui: &mut PlotUi, series: &Series) {
    let points: Vec<[f64; 2]> = series.points.iter().map(|p| p.to_cartesian()).collect();

    match series.mark {
        Mark::Scatter(marker) => {
            let (shape, radius) = match marker {
                Marker::Star => (MarkerShape::Asterisk, 5.0_f32),
                Marker::Circle => (MarkerShape::Circle, 4.0),
                Marker::Diamond => (MarkerShape::Diamond, 5.0),
            };
            let mut item = Points::new(PlotPoints::from(points))
                .shape(shape)
                .radius(radius)
                .filled(true)
                .color(series.color);
            if let Some(label) = &series.label {
                item = item.name(label);
            }
            plot_ui.points(item);
        }
        Mark::Line(pattern) => {
            let style = match pattern {
                LinePattern::Solid => LineStyle::Solid,
                LinePattern::Dashed => LineStyle::Dashed { length: 10.0 },
                LinePattern::Dotted => LineStyle::Dotted { spacing: 6.0 },
            };
            let mut item = Line::new(PlotPoints::from(points))
                .style(style)
                .width(2.0)
                .color(series.color);
            if let Some(label) = &series.label {
                item = item.name(label);
            }
            plot_ui.line(item);
        }
    }
}
