//! Rendering of sequence frames onto a drawing surface.
//!
//! The core works against two small traits so it stays platform-agnostic:
//! [`FrameImage`] for decoded bitmaps and [`FrameSurface`] for whatever
//! the host draws into. The `web` feature provides both for canvas.

use crate::{CoverFit, SurfaceSize};

/// A decoded frame bitmap.
pub trait FrameImage {
    /// Intrinsic `(width, height)` in pixels, or `None` when the image has
    /// nothing drawable (failed or incomplete decode).
    fn dimensions(&self) -> Option<(f64, f64)>;
}

/// A drawing surface that shows one frame at a time.
pub trait FrameSurface<I: ?Sized> {
    /// Resize the backing store to match the container.
    fn resize(&mut self, size: &SurfaceSize) -> Result<(), String>;

    /// Replace the surface contents with `image` placed per `plan`.
    fn draw(&mut self, image: &I, plan: &RenderPlan) -> Result<(), String>;
}

/// Everything needed to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPlan {
    /// 0-based frame index being drawn
    pub frame_index: usize,
    /// Source image size in pixels
    pub source_width: f64,
    pub source_height: f64,
    /// Placement on the surface, in CSS units
    pub fit: CoverFit,
    /// Surface the plan was computed for
    pub surface: SurfaceSize,
}

impl RenderPlan {
    /// Compute a cover-fit plan for `image` on `surface`.
    ///
    /// Returns `None` when the image has no dimensions or the surface has
    /// no area; callers leave the previous frame on screen in that case.
    pub fn for_image<I: FrameImage + ?Sized>(
        frame_index: usize,
        image: &I,
        surface: &SurfaceSize,
    ) -> Option<Self> {
        let (source_width, source_height) = image.dimensions()?;
        let fit = CoverFit::for_surface(source_width, source_height, surface)?;
        Some(Self {
            frame_index,
            source_width,
            source_height,
            fit,
            surface: *surface,
        })
    }
}

/// Web-specific rendering implementation.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    impl FrameImage for HtmlImageElement {
        fn dimensions(&self) -> Option<(f64, f64)> {
            let (w, h) = (self.natural_width(), self.natural_height());
            if self.complete() && w > 0 && h > 0 {
                Some((w as f64, h as f64))
            } else {
                None
            }
        }
    }

    /// Current `window.devicePixelRatio`, or 1.0 outside a browser window.
    pub fn device_pixel_ratio() -> f64 {
        web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
    }

    /// A `<canvas>` that frames are drawn into.
    pub struct CanvasSurface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        size: SurfaceSize,
    }

    impl CanvasSurface {
        /// Wrap a canvas element and acquire its 2D context.
        pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
            let ctx = canvas
                .get_context("2d")
                .map_err(|_| "Failed to get 2d context")?
                .ok_or("No 2d context available")?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;
            Ok(Self {
                canvas,
                ctx,
                size: SurfaceSize::default(),
            })
        }

        pub fn canvas(&self) -> &HtmlCanvasElement {
            &self.canvas
        }

        pub fn size(&self) -> SurfaceSize {
            self.size
        }
    }

    impl FrameSurface<HtmlImageElement> for CanvasSurface {
        fn resize(&mut self, size: &SurfaceSize) -> Result<(), String> {
            self.canvas.set_width(size.pixel_width());
            self.canvas.set_height(size.pixel_height());

            let style = self.canvas.style();
            style
                .set_property("width", &format!("{}px", size.css_width))
                .map_err(|_| "Failed to set canvas width")?;
            style
                .set_property("height", &format!("{}px", size.css_height))
                .map_err(|_| "Failed to set canvas height")?;

            // Resizing resets context state, so the scale goes on afterwards.
            let dpr = size.device_pixel_ratio;
            self.ctx
                .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
                .map_err(|_| "Failed to set transform")?;
            self.size = *size;
            Ok(())
        }

        fn draw(&mut self, image: &HtmlImageElement, plan: &RenderPlan) -> Result<(), String> {
            self.ctx
                .clear_rect(0.0, 0.0, plan.surface.css_width, plan.surface.css_height);
            self.ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image,
                    0.0,
                    0.0,
                    plan.source_width,
                    plan.source_height,
                    plan.fit.dest_x,
                    plan.fit.dest_y,
                    plan.fit.dest_width,
                    plan.fit.dest_height,
                )
                .map_err(|_| "Failed to draw frame image")?;
            Ok(())
        }
    }
}
