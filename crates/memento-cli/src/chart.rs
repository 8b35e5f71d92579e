//! Memento mori heatmap: terminal glyphs and standalone SVG.

use std::fmt::Write as _;

use crossterm::style::{Color, Stylize};
use memento_core::{ChartLayout, LifespanGrid, X_TITLE, Y_TITLE};

const LIVED: &str = "■";
const REMAINING: &str = "□";
const TICK_EVERY: usize = 5;

const LIVED_FILL: &str = "darkgrey";
const REMAINING_FILL: &str = "lightgrey";
/// Tick labels sit on the white margin, so they need a dark fill.
const LABEL_FILL: &str = "dimgrey";

fn is_tick(n: usize) -> bool {
    n == 1 || n % TICK_EVERY == 0
}

/// One line per year plus a header of week numbers. Each week takes two
/// columns so two-digit ticks line up with their cell.
pub fn terminal_rows(grid: &LifespanGrid, color: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(grid.rows() + 1);

    let mut header = String::from("    ");
    for week in grid.x_labels() {
        if week % TICK_EVERY == 0 {
            let _ = write!(header, "{week:<2}");
        } else {
            header.push_str("  ");
        }
    }
    lines.push(header.trim_end().to_string());

    for (weeks, year) in grid.iter_rows().zip(grid.y_labels()) {
        let mut line = if is_tick(year) {
            format!("{year:>3} ")
        } else {
            "    ".to_string()
        };
        for &lived in weeks {
            line.push_str(&glyph(lived, color));
            line.push(' ');
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

fn glyph(lived: bool, color: bool) -> String {
    match (lived, color) {
        (true, false) => LIVED.to_string(),
        (false, false) => REMAINING.to_string(),
        (true, true) => LIVED.with(Color::DarkGrey).to_string(),
        (false, true) => LIVED.with(Color::Grey).to_string(),
    }
}

/// Square cells, white gridlines between them, tick labels every five
/// weeks/years.
pub fn render_svg(grid: &LifespanGrid, layout: &ChartLayout) -> String {
    let cell = layout.cell_size;
    let m = layout.margins;
    let plot_w = cell * grid.cols() as f64;
    let plot_h = cell * grid.rows() as f64;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}">"#,
        w = layout.width,
        h = layout.height
    );
    let _ = writeln!(svg, "<title>{X_TITLE} / {Y_TITLE}</title>");

    let _ = writeln!(svg, r#"<g shape-rendering="crispEdges">"#);
    for (row, weeks) in grid.iter_rows().enumerate() {
        for (col, &lived) in weeks.iter().enumerate() {
            let (x, y) = layout.cell_origin(row, col);
            let fill = if lived { LIVED_FILL } else { REMAINING_FILL };
            let _ = writeln!(
                svg,
                r#"<rect x="{x:.2}" y="{y:.2}" width="{cell:.2}" height="{cell:.2}" fill="{fill}"/>"#
            );
        }
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(svg, r#"<g stroke="white" stroke-width="1">"#);
    for i in 0..=grid.cols() {
        let x = m.left + i as f64 * cell;
        let _ = writeln!(
            svg,
            r#"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}"/>"#,
            y1 = m.top,
            y2 = m.top + plot_h
        );
    }
    for i in 0..=grid.rows() {
        let y = m.top + i as f64 * cell;
        let _ = writeln!(
            svg,
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}"/>"#,
            x1 = m.left,
            x2 = m.left + plot_w
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(
        svg,
        r#"<g font-family="sans-serif" font-size="10" fill="{LABEL_FILL}">"#
    );
    for week in grid.x_labels().into_iter().filter(|&w| w % TICK_EVERY == 0) {
        let (x, _) = layout.cell_origin(0, week - 1);
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{week}</text>"#,
            x + cell / 2.0,
            m.top - 6.0
        );
    }
    for year in grid.y_labels().into_iter().filter(|&y| y % TICK_EVERY == 0) {
        let (_, y) = layout.cell_origin(year - 1, 0);
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" dominant-baseline="middle">{year}</text>"#,
            m.left - 4.0,
            y + cell / 2.0
        );
    }
    let _ = writeln!(svg, "</g>");
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> LifespanGrid {
        let mut cells = vec![false; 10 * 6];
        cells[..7].fill(true);
        LifespanGrid::from_flat(6, 10, cells).unwrap()
    }

    #[test]
    fn test_terminal_plain() {
        let lines = terminal_rows(&small_grid(), false);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "            5         10");
        assert_eq!(lines[1], "  1 ■ ■ ■ ■ ■ ■ ■ □ □ □");
        assert_eq!(lines[2], "    □ □ □ □ □ □ □ □ □ □");
        assert!(lines[5].starts_with("  5 "));
    }

    #[test]
    fn test_terminal_counts_match_grid() {
        let lines = terminal_rows(&small_grid(), false);
        let lived: usize = lines.iter().map(|l| l.matches(LIVED).count()).sum();
        let remaining: usize = lines.iter().map(|l| l.matches(REMAINING).count()).sum();
        assert_eq!(lived, 7);
        assert_eq!(remaining, 53);
    }

    #[test]
    fn test_svg_shape() {
        let grid = small_grid();
        let layout = ChartLayout::fit(140.0, 10_000.0, grid.cols(), grid.rows());
        let svg = render_svg(&grid, &layout);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 60);
        assert_eq!(svg.matches(r#"fill="darkgrey""#).count(), 7);
        // (cols + 1) + (rows + 1) gridlines
        assert_eq!(svg.matches("<line").count(), 11 + 7);
        assert!(svg.contains(r#"width="140.00""#));
    }

    #[test]
    fn test_svg_labels_readable_on_white() {
        let grid = small_grid();
        let layout = ChartLayout::fit(140.0, 10_000.0, grid.cols(), grid.rows());
        let svg = render_svg(&grid, &layout);
        let labels = svg
            .lines()
            .find(|l| l.starts_with("<g font-family"))
            .unwrap();
        assert!(labels.contains(r#"fill="dimgrey""#));
        assert!(!svg.to_uppercase().contains("#FAFAFA"));
        // week 5 and 10, year 5
        assert_eq!(svg.matches("<text").count(), 3);
    }
}
