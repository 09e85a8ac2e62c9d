use plotters::style::RGBColor;

/// Points per inch, used to size fonts given in points.
const POINTS_PER_INCH: f64 = 72.0;

/// Drawing configuration for one report image.
///
/// Passed explicitly to the renderer so repeated renders never share state.
#[derive(Clone, Debug)]
pub struct ChartOptions {
    /// Figure size in inches (width, height). Each panel takes half the width.
    pub figure_size: (f64, f64),
    pub dpi: u32,
    pub font_family: &'static str,

    pub total_color: RGBColor,
    pub average_color: RGBColor,
    pub comparison_color: RGBColor,
    /// Opacity applied to every bar.
    pub bar_opacity: f64,
    pub annotation_fill: RGBColor,
    pub annotation_opacity: f64,
    pub grid_opacity: f64,

    /// Font sizes in points.
    pub title_font_pt: f64,
    pub axis_font_pt: f64,
    pub value_font_pt: f64,
    pub annotation_font_pt: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            figure_size: (14.0, 6.0),
            dpi: 150,
            font_family: "sans-serif",
            total_color: RGBColor(70, 130, 180),      // steelblue
            average_color: RGBColor(255, 127, 80),    // coral
            comparison_color: RGBColor(255, 127, 80), // coral
            bar_opacity: 0.7,
            annotation_fill: RGBColor(245, 222, 179), // wheat
            annotation_opacity: 0.5,
            grid_opacity: 0.3,
            title_font_pt: 12.0,
            axis_font_pt: 10.0,
            value_font_pt: 10.0,
            annotation_font_pt: 11.0,
        }
    }
}

impl ChartOptions {
    /// Output image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        let dpi = f64::from(self.dpi);
        ((w * dpi).round() as u32, (h * dpi).round() as u32)
    }

    /// Convert a font size in points to pixels at this DPI.
    pub fn font_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / POINTS_PER_INCH
    }
}
