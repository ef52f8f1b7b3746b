use crate::transform::{sign_split, DISPLAY_FLOOR};
use std::fmt::Write as _;

pub const WIDTH: f64 = 600.0;
pub const HEIGHT: f64 = 260.0;
const PAD_X: f64 = 44.0;
const PAD_TOP: f64 = 24.0;
const PAD_BOTTOM: f64 = 34.0;

const AXIS_MINUTES: u32 = 60;
const TICK_STEP: u32 = 5;

const POSITIVE_FILL: &str = "rgba(255, 107, 74, 0.35)";
const NEGATIVE_FILL: &str = "rgba(47, 72, 88, 0.35)";
const LINE_COLOR: &str = "#ff6b4a";
const GUIDE_COLOR: &str = "rgba(47, 72, 88, 0.25)";
const GRID_COLOR: &str = "rgba(47, 72, 88, 0.12)";
const LABEL_COLOR: &str = "#7a746d";

fn x_of(minute: f64) -> f64 {
    PAD_X + minute / AXIS_MINUTES as f64 * (WIDTH - PAD_X * 2.0)
}

fn baseline_y() -> f64 {
    (PAD_TOP + HEIGHT - PAD_BOTTOM) / 2.0
}

fn y_of(value: f64, max_scale: i64) -> f64 {
    let half = baseline_y() - PAD_TOP;
    baseline_y() - value / max_scale as f64 * half
}

/// Piecewise cubic Bézier path through the points, derived from a Catmull-Rom
/// spline with the first and last points duplicated as phantom neighbors so
/// the curve starts and ends on the data without overshoot.
pub fn catmull_rom_path(points: &[(f64, f64)]) -> String {
    let Some(&(x0, y0)) = points.first() else {
        return String::new();
    };
    let mut path = format!("M {x0:.2} {y0:.2}");
    if points.len() == 1 {
        return path;
    }

    let at = |i: isize| -> (f64, f64) {
        let i = i.clamp(0, points.len() as isize - 1) as usize;
        points[i]
    };

    for i in 0..points.len() - 1 {
        let p0 = at(i as isize - 1);
        let p1 = at(i as isize);
        let p2 = at(i as isize + 1);
        let p3 = at(i as isize + 2);

        let c1 = (p1.0 + (p2.0 - p0.0) / 6.0, p1.1 + (p2.1 - p0.1) / 6.0);
        let c2 = (p2.0 - (p3.0 - p1.0) / 6.0, p2.1 - (p3.1 - p1.1) / 6.0);
        let _ = write!(
            path,
            " C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
            c1.0, c1.1, c2.0, c2.1, p2.0, p2.1
        );
    }
    path
}

/// Closed fill region: the smoothed curve through a sign-clipped series,
/// dropped to the baseline at both ends.
fn area_path(points: &[(f64, f64)], baseline: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    let mut path = catmull_rom_path(points);
    let _ = write!(
        path,
        " L {:.2} {baseline:.2} L {:.2} {baseline:.2} Z",
        last.0, first.0
    );
    path
}

/// Render the momentum series as a complete standalone SVG document.
///
/// `series` is (minute, value) pairs; values are projected against
/// `max_scale` so the top and bottom guide lines sit at ±max_scale.
pub fn render_svg(series: &[(f64, f64)], max_scale: i64) -> String {
    let mut sorted: Vec<(f64, f64)> = series.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let projected: Vec<(f64, f64)> = sorted
        .iter()
        .map(|&(minute, value)| (x_of(minute), y_of(value, max_scale)))
        .collect();

    let (positive, negative) = sign_split(&sorted);
    let project = |points: &[(f64, f64)]| -> Vec<(f64, f64)> {
        points
            .iter()
            .map(|&(minute, value)| (x_of(minute), y_of(value, max_scale)))
            .collect()
    };

    let baseline = baseline_y();
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Momentum chart">"#
    );

    // Horizontal guides: solid at ±max_scale, dashed baseline at zero.
    let _ = write!(
        svg,
        r#"<line x1="{PAD_X}" y1="{PAD_TOP}" x2="{x2}" y2="{PAD_TOP}" stroke="{GUIDE_COLOR}"/>"#,
        x2 = WIDTH - PAD_X
    );
    let _ = write!(
        svg,
        r#"<line x1="{PAD_X}" y1="{y}" x2="{x2}" y2="{y}" stroke="{GUIDE_COLOR}"/>"#,
        y = HEIGHT - PAD_BOTTOM,
        x2 = WIDTH - PAD_X
    );
    let _ = write!(
        svg,
        r#"<line x1="{PAD_X}" y1="{baseline:.2}" x2="{x2}" y2="{baseline:.2}" stroke="{GUIDE_COLOR}" stroke-dasharray="4 6"/>"#,
        x2 = WIDTH - PAD_X
    );

    // Minute ticks every 5 minutes.
    for minute in (0..=AXIS_MINUTES).step_by(TICK_STEP as usize) {
        let x = x_of(minute as f64);
        let _ = write!(
            svg,
            r#"<line x1="{x:.2}" y1="{PAD_TOP}" x2="{x:.2}" y2="{y2}" stroke="{GRID_COLOR}"/>"#,
            y2 = HEIGHT - PAD_BOTTOM
        );
        let _ = write!(
            svg,
            r#"<text x="{x:.2}" y="{y}" text-anchor="middle" font-size="11" fill="{LABEL_COLOR}">{minute}</text>"#,
            y = HEIGHT - PAD_BOTTOM + 18.0
        );
    }

    // Value-scale labels from +max_scale down to -max_scale, stepped so the
    // label count stays bounded however large the counts get.
    let label_step =
        (max_scale / DISPLAY_FLOOR + (max_scale % DISPLAY_FLOOR != 0) as i64).max(1);
    for k in (-(max_scale / label_step)..=max_scale / label_step).rev() {
        let value = k * label_step;
        let y = y_of(value as f64, max_scale);
        let _ = write!(
            svg,
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end" font-size="11" fill="{LABEL_COLOR}">{value}</text>"#,
            x = PAD_X - 10.0,
            y = y + 4.0
        );
    }

    if !projected.is_empty() {
        let _ = write!(
            svg,
            r#"<path d="{d}" fill="{POSITIVE_FILL}" stroke="none"/>"#,
            d = area_path(&project(&positive), baseline)
        );
        let _ = write!(
            svg,
            r#"<path d="{d}" fill="{NEGATIVE_FILL}" stroke="none"/>"#,
            d = area_path(&project(&negative), baseline)
        );
        let _ = write!(
            svg,
            r#"<path d="{d}" fill="none" stroke="{LINE_COLOR}" stroke-width="2.5"/>"#,
            d = catmull_rom_path(&projected)
        );
    }

    svg.push_str("</svg>");
    svg
}
