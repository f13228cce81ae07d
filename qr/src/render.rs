//! Rendering a finished symbol: terminal text, SVG, grayscale raster and PNG.
//!
//! The encoder output carries no quiet zone; every renderer here adds one of
//! at least [`MIN_QUIET_ZONE`] light modules on each side.

use crate::QrCode;

/// Smallest quiet zone any renderer draws, in modules.
pub const MIN_QUIET_ZONE: usize = 2;

/// Quiet zone recommended by ISO/IEC 18004, in modules.
pub const DEFAULT_QUIET_ZONE: usize = 4;

/// Rendering settings shared by all output formats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    quiet_zone: usize,
    dark: String,
    light: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            quiet_zone: DEFAULT_QUIET_ZONE,
            dark: "black".to_string(),
            light: "white".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quiet zone width in modules. Values below [`MIN_QUIET_ZONE`] are
    /// raised to it.
    pub fn quiet_zone(mut self, modules: usize) -> Self {
        self.quiet_zone = modules.max(MIN_QUIET_ZONE);
        self
    }

    /// SVG fill for dark modules.
    pub fn dark_color(mut self, color: impl Into<String>) -> Self {
        self.dark = color.into();
        self
    }

    /// SVG fill for the background.
    pub fn light_color(mut self, color: impl Into<String>) -> Self {
        self.light = color.into();
        self
    }

    pub fn quiet_zone_modules(&self) -> usize {
        self.quiet_zone
    }
}

/// An 8-bit grayscale image of a symbol (0 = dark, 255 = light), square.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    module_px: usize,
    margin: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Scale `code` to roughly `target_px` pixels per side.
    ///
    /// Each module becomes a `module_px` square, with
    /// `module_px = max(1, target_px / (size + 2 * quiet_zone))`. The image is
    /// never smaller than the symbol plus its quiet zone, and the symbol is
    /// centred so the light margin is at least `quiet_zone` modules wide.
    pub fn from_code(code: &QrCode, target_px: usize, quiet_zone: usize) -> Self {
        let size = code.size();
        let quiet_zone = quiet_zone.max(MIN_QUIET_ZONE);
        let span = size + 2 * quiet_zone;
        let module_px = (target_px / span).max(1);
        let width = target_px.max(module_px * span);
        let margin = (width - size * module_px) / 2;

        let mut pixels = vec![255u8; width * width];
        for row in 0..size {
            for col in 0..size {
                if !code.get(row, col) {
                    continue;
                }
                let py = margin + row * module_px;
                let px = margin + col * module_px;
                for y in py..py + module_px {
                    pixels[y * width + px..y * width + px + module_px].fill(0);
                }
            }
        }

        Self {
            width,
            module_px,
            margin,
            pixels,
        }
    }

    /// Image width and height in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pixels per module side.
    pub fn module_px(&self) -> usize {
        self.module_px
    }

    /// Light border in pixels before the first module.
    pub fn margin(&self) -> usize {
        self.margin
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Row-major grayscale samples.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl QrCode {
    /// Rasterise to roughly `target_px` pixels per side.
    pub fn to_raster(&self, target_px: usize, options: &RenderOptions) -> Raster {
        Raster::from_code(self, target_px, options.quiet_zone)
    }

    /// Render as an SVG document `target_px` pixels wide.
    ///
    /// The view box is in module units, so the image scales cleanly.
    pub fn to_svg(&self, target_px: usize, options: &RenderOptions) -> String {
        let quiet_zone = options.quiet_zone;
        let total = self.size() + 2 * quiet_zone;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {total} {total}" width="{target_px}" height="{target_px}" shape-rendering="crispEdges">"#
        );
        svg.push_str(&format!(
            r#"<rect width="{total}" height="{total}" fill="{}"/>"#,
            options.light
        ));

        // One path with a unit square per dark module
        svg.push_str(&format!(r#"<path fill="{}" d=""#, options.dark));
        for row in 0..self.size() {
            for col in 0..self.size() {
                if self.get(row, col) {
                    svg.push_str(&format!(
                        "M{},{}h1v1h-1z",
                        col + quiet_zone,
                        row + quiet_zone
                    ));
                }
            }
        }
        svg.push_str(r#""/></svg>"#);
        svg
    }

    /// Render as a grayscale PNG roughly `target_px` pixels wide.
    #[cfg(feature = "png")]
    pub fn to_png(
        &self,
        target_px: usize,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, crate::QrError> {
        let raster = self.to_raster(target_px, options);
        let side = raster.width() as u32;

        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, side, side);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(raster.pixels())?;
            writer.finish()?;
        }

        log::debug!("rendered {}x{} PNG, {} bytes", side, side, png_data.len());
        Ok(png_data)
    }

    /// Render for a terminal, two characters per module.
    pub fn to_ascii(&self, options: &RenderOptions) -> String {
        let quiet_zone = options.quiet_zone;
        let width = (self.size() + 2 * quiet_zone) * 2;
        let blank_line = format!("{}\n", " ".repeat(width));
        let margin = " ".repeat(quiet_zone * 2);

        let mut result = blank_line.repeat(quiet_zone);
        for row in self.rows() {
            result.push_str(&margin);
            for &dark in row {
                result.push_str(if dark { "\u{2588}\u{2588}" } else { "  " });
            }
            result.push_str(&margin);
            result.push('\n');
        }
        result.push_str(&blank_line.repeat(quiet_zone));
        result
    }

    /// Render for a terminal with half blocks, two module rows per line.
    pub fn to_ascii_compact(&self, options: &RenderOptions) -> String {
        let quiet_zone = options.quiet_zone;
        let size = self.size();
        let span = size + 2 * quiet_zone;

        // Module colour in quiet-zone coordinates; outside the symbol is light
        let dark_at = |row: usize, col: usize| {
            row >= quiet_zone
                && col >= quiet_zone
                && row < size + quiet_zone
                && col < size + quiet_zone
                && self.get(row - quiet_zone, col - quiet_zone)
        };

        let mut result = String::new();
        for row in (0..span).step_by(2) {
            for col in 0..span {
                let ch = match (dark_at(row, col), dark_at(row + 1, col)) {
                    (true, true) => '\u{2588}',
                    (true, false) => '\u{2580}',
                    (false, true) => '\u{2584}',
                    (false, false) => ' ',
                };
                result.push(ch);
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> QrCode {
        QrCode::encode("TEST").unwrap()
    }

    #[test]
    fn quiet_zone_is_clamped() {
        assert_eq!(RenderOptions::new().quiet_zone(0).quiet_zone_modules(), 2);
        assert_eq!(RenderOptions::new().quiet_zone(6).quiet_zone_modules(), 6);
        assert_eq!(RenderOptions::default().quiet_zone_modules(), 4);
    }

    #[test]
    fn raster_geometry() {
        let code = code();
        // 21 modules + 2 * 4 quiet = 29; 256 / 29 = 8 px per module
        let raster = Raster::from_code(&code, 256, 4);
        assert_eq!(raster.module_px(), 8);
        assert_eq!(raster.width(), 256);
        assert_eq!(raster.margin(), (256 - 21 * 8) / 2);
        assert!(raster.margin() >= 4 * raster.module_px());
        // Top-left finder corner is dark
        assert_eq!(raster.pixel(raster.margin(), raster.margin()), 0);
        assert_eq!(raster.pixel(0, 0), 255);
    }

    #[test]
    fn raster_grows_when_target_too_small() {
        let raster = Raster::from_code(&code(), 10, 2);
        assert_eq!(raster.module_px(), 1);
        assert_eq!(raster.width(), 25);
        assert_eq!(raster.margin(), 2);
    }

    #[test]
    fn raster_border_is_light() {
        let raster = Raster::from_code(&code(), 200, 2);
        let border = 2 * raster.module_px();
        let w = raster.width();
        for i in 0..w {
            for j in 0..border {
                assert_eq!(raster.pixel(i, j), 255);
                assert_eq!(raster.pixel(j, i), 255);
                assert_eq!(raster.pixel(i, w - 1 - j), 255);
                assert_eq!(raster.pixel(w - 1 - j, i), 255);
            }
        }
    }

    #[test]
    fn svg_output() {
        let svg = code().to_svg(210, &RenderOptions::new().dark_color("#112233"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 29 29""#));
        assert!(svg.contains(r##"fill="#112233""##));
        // Top-left finder corner, offset by the quiet zone
        assert!(svg.contains("M4,4h1v1h-1z"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn svg_draws_one_square_per_dark_module() {
        let code = code();
        let svg = code.to_svg(100, &RenderOptions::new().quiet_zone(2));
        assert_eq!(svg.matches("h1v1h-1z").count(), code.dark_count());
        assert!(svg.contains(r#"<rect width="25" height="25" fill="white"/>"#));
        assert!(svg.contains(r#"<path fill="black" d="M2,2h1v1h-1z"#));
    }

    #[test]
    fn ascii_dimensions() {
        let opts = RenderOptions::new().quiet_zone(2);
        let ascii = code().to_ascii(&opts);
        let lines: Vec<&str> = ascii.lines().collect();
        assert_eq!(lines.len(), 25);
        assert!(lines.iter().all(|l| l.chars().count() == 50));

        let compact = code().to_ascii_compact(&opts);
        assert_eq!(compact.lines().count(), 13);
    }

    #[cfg(feature = "png")]
    #[test]
    fn png_signature() {
        let png = code().to_png(128, &RenderOptions::default()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
