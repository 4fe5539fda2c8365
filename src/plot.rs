//! Actual-vs-predicted scatter plot, written as a standalone SVG file.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN: f64 = 48.0;

/// Render the held-out predictions of the winning model and write the SVG
/// to `path`, replacing whatever was there.
pub fn render_scatter(points: &[(f64, f64)], path: &Path) -> io::Result<()> {
    fs::write(path, scatter_svg(points))
}

fn scatter_svg(points: &[(f64, f64)]) -> String {
    // One shared scale for both axes keeps the y = x reference meaningful.
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &(actual, predicted) in points {
        lo = lo.min(actual).min(predicted);
        hi = hi.max(actual).max(predicted);
    }
    if !lo.is_finite() || !hi.is_finite() {
        lo = 0.0;
        hi = 1.0;
    }
    let pad = (hi - lo).max(1e-9) * 0.05;
    lo -= pad;
    hi += pad;

    let scale_x = |v: f64| MARGIN + (v - lo) / (hi - lo) * (WIDTH - 2.0 * MARGIN);
    let scale_y = |v: f64| HEIGHT - MARGIN - (v - lo) / (hi - lo) * (HEIGHT - 2.0 * MARGIN);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="{WIDTH}" height="{HEIGHT}">
<rect width="{WIDTH}" height="{HEIGHT}" fill="#ffffff"/>
<line x1="{m}" y1="{b}" x2="{r}" y2="{b}" stroke="#333333" stroke-width="1"/>
<line x1="{m}" y1="{t}" x2="{m}" y2="{b}" stroke="#333333" stroke-width="1"/>
<line x1="{dx1:.2}" y1="{dy1:.2}" x2="{dx2:.2}" y2="{dy2:.2}" stroke="#999999" stroke-width="1" stroke-dasharray="6 4"/>
<text x="{cx}" y="{lbly}" text-anchor="middle" font-family="sans-serif" font-size="14">actual</text>
<text x="14" y="{cy}" text-anchor="middle" font-family="sans-serif" font-size="14" transform="rotate(-90 14 {cy})">predicted</text>
<text x="{m}" y="{ticky}" text-anchor="middle" font-family="sans-serif" font-size="11">{lo:.2}</text>
<text x="{r}" y="{ticky}" text-anchor="middle" font-family="sans-serif" font-size="11">{hi:.2}</text>
"##,
        m = MARGIN,
        t = MARGIN,
        b = HEIGHT - MARGIN,
        r = WIDTH - MARGIN,
        dx1 = scale_x(lo + pad),
        dy1 = scale_y(lo + pad),
        dx2 = scale_x(hi - pad),
        dy2 = scale_y(hi - pad),
        cx = WIDTH / 2.0,
        cy = HEIGHT / 2.0,
        lbly = HEIGHT - 12.0,
        ticky = HEIGHT - MARGIN + 18.0,
    );

    for &(actual, predicted) in points {
        let _ = writeln!(
            svg,
            r##"<circle cx="{:.2}" cy="{:.2}" r="3.5" fill="#4CAF50" fill-opacity="0.7"/>"##,
            scale_x(actual),
            scale_y(predicted),
        );
    }
    svg.push_str("</svg>\n");
    svg
}
