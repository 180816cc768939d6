use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::color::ColorScale;
use crate::data::filter::ComparisonRow;
use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::pages::dataset_missing;

/// Number of colour buckets used to draw many points as a few plot items.
const COLOR_BINS: usize = 24;

const POINT_RADIUS: f32 = 2.0;

// ---------------------------------------------------------------------------
// 2D scatter: one descriptor vs. solubility
// ---------------------------------------------------------------------------

/// Render the 2D scatter page: X = the picked axis column, Y = LogS, point
/// colour = LogS on the continuous ramp.
pub fn scatter_2d(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        dataset_missing(ui);
        return;
    };

    let x_column = state.x_axis_2d.clone();
    // Defensive: the picker only offers catalog columns. A bad name aborts
    // this render only.
    if let Err(e) = dataset.extent(&x_column) {
        log::error!("2D scatter: {e}");
        ui.label(format!("Error: {e}"));
        return;
    }

    ui.heading(format!("Solubility vs. {x_column} (filtered by MolWt)"));
    ui.weak("Colour encodes LogS.");

    let scale = solubility_scale(&dataset);
    let mut bins: Vec<Vec<[f64; 2]>> = vec![Vec::new(); COLOR_BINS];
    for &idx in &state.scatter_indices {
        let compound = &dataset.compounds[idx];
        let Ok(x) = compound.numeric_value(&x_column) else {
            continue;
        };
        let y = compound.solubility;
        if x.is_nan() || y.is_nan() {
            continue;
        }
        if let Some(bin) = scale.bin(y, COLOR_BINS) {
            bins[bin].push([x, y]);
        }
    }

    let label_column = x_column.clone();
    Plot::new("scatter_2d")
        .x_axis_label(x_column)
        .y_axis_label("Solubility (LogS)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |_name, value| {
            format!("{label_column} = {:.2}\nLogS = {:.2}", value.x, value.y)
        })
        .show(ui, |plot_ui| {
            for (bin, points) in bins.into_iter().enumerate() {
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .color(scale.bin_color(bin, COLOR_BINS))
                        .radius(POINT_RADIUS),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 3D scatter: two descriptors vs. solubility, projected
// ---------------------------------------------------------------------------

/// Render the 3D scatter page.  The three axes are normalized and projected
/// orthographically under the user-controlled yaw/pitch; Z (LogS) is also
/// encoded as point colour so the third dimension survives the projection.
pub fn scatter_3d(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        dataset_missing(ui);
        return;
    };

    let x_column = state.x_axis_3d.clone();
    let y_column = state.y_axis_3d.clone();
    let (x_extent, y_extent) = match (dataset.extent(&x_column), dataset.extent(&y_column)) {
        (Ok(x), Ok(y)) => (x, y),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("3D scatter: {e}");
            ui.label(format!("Error: {e}"));
            return;
        }
    };
    let z_extent = match dataset.extent("Solubility") {
        Ok(extent) => extent,
        Err(e) => {
            log::error!("3D scatter: {e}");
            ui.label(format!("Error: {e}"));
            return;
        }
    };

    ui.heading(format!("3D Chemical Space: {x_column} vs {y_column} vs Solubility"));
    ui.weak("Rotate with the yaw/pitch sliders in the sidebar; colour encodes LogS.");

    // Centered unit-cube coordinate per axis; degenerate extents collapse to
    // the cube centre instead of dividing by zero.
    fn normalized(value: f64, (min, max): (f64, f64)) -> f64 {
        if max > min {
            (value - min) / (max - min) - 0.5
        } else {
            0.0
        }
    }

    let (yaw_sin, yaw_cos) = (state.yaw as f64).sin_cos();
    let (pitch_sin, pitch_cos) = (state.pitch as f64).sin_cos();

    let scale = solubility_scale(&dataset);
    let mut bins: Vec<Vec<[f64; 2]>> = vec![Vec::new(); COLOR_BINS];
    for &idx in &state.scatter_indices {
        let compound = &dataset.compounds[idx];
        let (Ok(x), Ok(y)) = (
            compound.numeric_value(&x_column),
            compound.numeric_value(&y_column),
        ) else {
            continue;
        };
        let z = compound.solubility;
        if x.is_nan() || y.is_nan() || z.is_nan() {
            continue;
        }

        let xn = normalized(x, x_extent);
        let yn = normalized(y, y_extent);
        let zn = normalized(z, z_extent);

        // Yaw spins the descriptor plane, pitch tilts the solubility axis
        // toward the viewer.
        let rotated_x = xn * yaw_cos - yn * yaw_sin;
        let depth = xn * yaw_sin + yn * yaw_cos;
        let screen_y = zn * pitch_cos - depth * pitch_sin;

        if let Some(bin) = scale.bin(z, COLOR_BINS) {
            bins[bin].push([rotated_x, screen_y]);
        }
    }

    Plot::new("scatter_3d")
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid([false, false])
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|_name, _value| String::new())
        .show(ui, |plot_ui| {
            for (bin, points) in bins.into_iter().enumerate() {
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .color(scale.bin_color(bin, COLOR_BINS))
                        .radius(POINT_RADIUS),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Comparison bar chart
// ---------------------------------------------------------------------------

/// Bar chart of the de-duplicated comparison rows, one bar per row, coloured
/// by LogS over the compared values' own range.
pub fn solubility_bars(ui: &mut Ui, rows: &[ComparisonRow]) {
    if rows.is_empty() {
        ui.label("No rows to compare.");
        return;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in rows {
        if row.solubility.is_finite() {
            min = min.min(row.solubility);
            max = max.max(row.solubility);
        }
    }
    if min > max {
        (min, max) = (0.0, 0.0);
    }
    let scale = ColorScale::new(min, max);

    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Bar::new(i as f64, row.solubility)
                .width(0.6)
                .fill(scale.color_for(row.solubility))
                .name(&row.name)
        })
        .collect();

    let names: Vec<String> = rows.iter().map(|row| row.name.clone()).collect();
    Plot::new("solubility_comparison")
        .height(280.0)
        .y_axis_label("Solubility (LogS)")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            names.get(i as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn solubility_scale(dataset: &Dataset) -> ColorScale {
    let (min, max) = dataset.extent("Solubility").unwrap_or((0.0, 0.0));
    ColorScale::new(min, max)
}
