//! Surface sizing and cover-fit placement for frame images.

/// Drawing surface dimensions derived from the hosting container.
///
/// `css_*` are layout units; `pixel_*` are the backing store dimensions
/// after applying the device pixel ratio, so output stays sharp on
/// high-density displays. Drawing happens in CSS units under a
/// `scale(dpr)` transform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

impl SurfaceSize {
    /// Build a surface size. Non-finite or non-positive ratios read as 1.
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            css_width: sanitize(css_width),
            css_height: sanitize(css_height),
            device_pixel_ratio: dpr,
        }
    }

    /// Whether there's any area to draw into.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.css_width <= 0.0 || self.css_height <= 0.0
    }

    /// Backing store width in device pixels.
    #[inline]
    pub fn pixel_width(&self) -> u32 {
        (self.css_width * self.device_pixel_ratio).round() as u32
    }

    /// Backing store height in device pixels.
    #[inline]
    pub fn pixel_height(&self) -> u32 {
        (self.css_height * self.device_pixel_ratio).round() as u32
    }
}

/// Where a source image lands on the surface, in CSS units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform scale applied to the source image
    pub scale: f64,
    pub dest_x: f64,
    pub dest_y: f64,
    pub dest_width: f64,
    pub dest_height: f64,
}

impl CoverFit {
    /// Aspect-preserving "cover" placement of an image on a surface.
    ///
    /// The scale is the larger of the width and height ratios, so the image
    /// fills the surface; the overflowing axis is cropped evenly on both
    /// sides. Returns `None` when either side has no area.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use showcase_core_view::CoverFit;
    ///
    /// // A square image on a wide surface is cropped top and bottom.
    /// let fit = CoverFit::compute(100.0, 100.0, 400.0, 200.0).unwrap();
    /// assert_eq!(fit.scale, 4.0);
    /// assert_eq!((fit.dest_x, fit.dest_y), (0.0, -100.0));
    /// assert_eq!((fit.dest_width, fit.dest_height), (400.0, 400.0));
    /// ```
    pub fn compute(
        image_width: f64,
        image_height: f64,
        surface_width: f64,
        surface_height: f64,
    ) -> Option<Self> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !(positive(image_width)
            && positive(image_height)
            && positive(surface_width)
            && positive(surface_height))
        {
            return None;
        }

        let h_ratio = surface_width / image_width;
        let v_ratio = surface_height / image_height;
        let scale = h_ratio.max(v_ratio);

        let dest_width = image_width * scale;
        let dest_height = image_height * scale;

        Some(Self {
            scale,
            dest_x: (surface_width - dest_width) / 2.0,
            dest_y: (surface_height - dest_height) / 2.0,
            dest_width,
            dest_height,
        })
    }

    /// Convenience wrapper taking a [`SurfaceSize`].
    pub fn for_surface(image_width: f64, image_height: f64, surface: &SurfaceSize) -> Option<Self> {
        Self::compute(image_width, image_height, surface.css_width, surface.css_height)
    }
}
