/// Margins around the heatmap: room for year ticks on the left and week
/// ticks on top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 35.0,
            right: 5.0,
            top: 30.0,
            bottom: 5.0,
        }
    }
}

/// Used when the container reports no width.
pub const FALLBACK_WIDTH: f64 = 600.0;

/// Share of the viewport height the chart may occupy.
pub const VIEWPORT_SHARE: f64 = 0.8;

/// Square-cell layout that fits both the container width and most of the
/// viewport height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    pub cell_size: f64,
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub cols: usize,
    pub rows: usize,
}

impl ChartLayout {
    pub fn fit(container_width: f64, viewport_height: f64, cols: usize, rows: usize) -> Self {
        Self::fit_with(container_width, viewport_height, cols, rows, Margins::default())
    }

    pub fn fit_with(
        container_width: f64,
        viewport_height: f64,
        cols: usize,
        rows: usize,
        margins: Margins,
    ) -> Self {
        let width = if container_width > 0.0 {
            container_width
        } else {
            FALLBACK_WIDTH
        };
        let available_height = viewport_height * VIEWPORT_SHARE;

        let from_width = (width - margins.left - margins.right) / cols.max(1) as f64;
        let from_height = (available_height - margins.top - margins.bottom) / rows.max(1) as f64;
        let cell_size = from_width.min(from_height).max(0.0);

        Self {
            cell_size,
            width: cell_size * cols as f64 + margins.left + margins.right,
            height: cell_size * rows as f64 + margins.top + margins.bottom,
            margins,
            cols,
            rows,
        }
    }

    /// Top-left corner of a cell.
    pub fn cell_origin(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.margins.left + col as f64 * self.cell_size,
            self.margins.top + row as f64 * self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_width_bound() {
        // 52 cols in 560px wide = 10px; height allows far more
        let layout = ChartLayout::fit(560.0, 10_000.0, 52, 80);
        assert_relative_eq!(layout.cell_size, 10.0);
        assert_relative_eq!(layout.width, 560.0);
        assert_relative_eq!(layout.height, 835.0);
    }

    #[test]
    fn test_height_bound() {
        // 0.8 * 1043.75 = 835; (835 - 35) / 80 = 10
        let layout = ChartLayout::fit(4000.0, 1043.75, 52, 80);
        assert_relative_eq!(layout.cell_size, 10.0, epsilon = 1e-9);
        assert_relative_eq!(layout.height, 835.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_width_falls_back() {
        let layout = ChartLayout::fit(0.0, 100_000.0, 52, 80);
        assert_relative_eq!(layout.cell_size, (600.0 - 40.0) / 52.0);
    }

    #[test]
    fn test_never_negative() {
        let layout = ChartLayout::fit(10.0, 10.0, 52, 80);
        assert_eq!(layout.cell_size, 0.0);
        assert_relative_eq!(layout.width, 40.0);
    }

    #[test]
    fn test_cell_origin() {
        let layout = ChartLayout::fit(560.0, 10_000.0, 52, 80);
        assert_eq!(layout.cell_origin(0, 0), (35.0, 30.0));
        assert_eq!(layout.cell_origin(2, 3), (65.0, 50.0));
    }
}
