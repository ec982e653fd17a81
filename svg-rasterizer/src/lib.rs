//! SVG to raster pipeline for floor-plan drawings.
//!
//! Renders a drawing onto a large square canvas, crops the result to its
//! non-background content with a padding margin, and resizes to a fixed
//! square output resolution.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use tiny_skia::Pixmap;

/// Knobs for [`rasterize_plan`]. The defaults reproduce the dataset
/// preparation settings: 2048px render, crop at luma 10 with 20px
/// padding, 512px output.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Edge length of the square canvas for the initial render.
    pub render_size: u32,
    /// Edge length of the square output image.
    pub output_size: u32,
    /// Grayscale values above this count as content when cropping.
    pub content_threshold: u8,
    /// Margin kept around the detected content box, clamped to the
    /// canvas bounds.
    pub padding: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            render_size: 2048,
            output_size: 512,
            content_threshold: 10,
            padding: 20,
        }
    }
}

/// A drawing that cannot be rendered. Fatal for that drawing only.
#[derive(Debug)]
pub enum RasterError {
    Svg(usvg::Error),
    EmptyCanvas { width: u32, height: u32 },
}

impl std::fmt::Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::Svg(e) => write!(f, "malformed SVG drawing: {}", e),
            RasterError::EmptyCanvas { width, height } => {
                write!(f, "cannot allocate a {}x{} canvas", width, height)
            }
        }
    }
}

impl std::error::Error for RasterError {}

impl From<usvg::Error> for RasterError {
    fn from(err: usvg::Error) -> Self {
        RasterError::Svg(err)
    }
}

/// Render, crop to content, and resize one drawing.
pub fn rasterize_plan(svg: &str, opts: &RasterOptions) -> Result<RgbImage, RasterError> {
    let rendered = render_to_canvas(svg, opts.render_size)?;
    let cropped = crop_to_content(&rendered, opts.content_threshold, opts.padding);

    Ok(image::imageops::resize(
        &cropped,
        opts.output_size,
        opts.output_size,
        FilterType::Lanczos3,
    ))
}

/// Render the drawing onto a square canvas, scaled uniformly to fit.
fn render_to_canvas(svg: &str, size: u32) -> Result<RgbImage, RasterError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options)?;

    let svg_size = tree.size();
    let scale = (size as f32 / svg_size.width()).min(size as f32 / svg_size.height());

    let mut pixmap = Pixmap::new(size, size).ok_or(RasterError::EmptyCanvas {
        width: size,
        height: size,
    })?;

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // Dropping the (premultiplied) alpha channel composites the drawing
    // over black, which is what the content crop keys on.
    let rgba = RgbaImage::from_raw(size, size, pixmap.take())
        .expect("pixmap buffer length matches its dimensions");

    Ok(DynamicImage::ImageRgba8(rgba).to_rgb8())
}

/// Crop to non-background content with a padding margin.
///
/// Background is anything at or below `threshold` in grayscale. An image
/// with no content above the threshold is returned unchanged.
pub fn crop_to_content(img: &RgbImage, threshold: u8, padding: u32) -> RgbImage {
    let gray: GrayImage = DynamicImage::ImageRgb8(img.clone()).to_luma8();

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in gray.enumerate_pixels() {
        if pixel[0] > threshold {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if !found {
        return img.clone();
    }

    let x0 = min_x.saturating_sub(padding);
    let y0 = min_y.saturating_sub(padding);
    let x1 = (max_x + 1 + padding).min(img.width());
    let y1 = (max_y + 1 + padding).min(img.height());

    image::imageops::crop_imm(img, x0, y0, x1 - x0, y1 - y0).to_image()
}
