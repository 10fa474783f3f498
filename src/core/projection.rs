use crate::core::domain::OfferDomain;
use crate::core::scale::LinearScale;
use crate::core::types::{OfferTerms, PixelPoint, Viewport};
use crate::error::{ChartError, ChartResult};

/// Bidirectional mapping between offer data space and surface pixel space
/// for one frame.
///
/// The projection is rebuilt from `(OfferDomain, Viewport)` whenever either
/// changes; it is cheap to construct and never cached across frames. The
/// rate axis is inverted: a larger rate maps to a smaller y, so better rates
/// plot upward. Mapping is pure linear with no clamping; callers clamp pixel
/// output themselves when they need an on-surface guarantee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterProjection {
    principal_scale: LinearScale,
    rate_scale: LinearScale,
    width_px: f64,
    height_px: f64,
}

impl ScatterProjection {
    /// Builds the projection for one frame.
    ///
    /// Fails on a degenerate viewport or a zero-span domain axis; callers
    /// skip rendering for that frame instead of drawing into nothing.
    pub fn new(domain: OfferDomain, viewport: Viewport) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let (principal_start, principal_end) = domain.principal_range();
        let (rate_start, rate_end) = domain.rate_range();

        Ok(Self {
            principal_scale: LinearScale::new(principal_start, principal_end)?,
            rate_scale: LinearScale::new(rate_start, rate_end)?,
            width_px: viewport.width_f64(),
            height_px: viewport.height_f64(),
        })
    }

    pub fn principal_to_pixel(&self, principal: f64) -> ChartResult<f64> {
        self.principal_scale.to_pixel(principal, self.width_px)
    }

    pub fn pixel_to_principal(&self, pixel_x: f64) -> ChartResult<f64> {
        self.principal_scale.from_pixel(pixel_x, self.width_px)
    }

    /// Larger rates map to smaller y values.
    pub fn rate_to_pixel(&self, rate: f64) -> ChartResult<f64> {
        Ok(self.height_px - self.rate_scale.to_pixel(rate, self.height_px)?)
    }

    pub fn pixel_to_rate(&self, pixel_y: f64) -> ChartResult<f64> {
        self.rate_scale
            .from_pixel(self.height_px - pixel_y, self.height_px)
    }

    /// Principal units covered by one horizontal pixel.
    #[must_use]
    pub fn principal_per_pixel(&self) -> f64 {
        let (start, end) = self.principal_scale.domain();
        (end - start) / self.width_px
    }

    /// Rate units covered by one vertical pixel.
    #[must_use]
    pub fn rate_per_pixel(&self) -> f64 {
        let (start, end) = self.rate_scale.domain();
        (end - start) / self.height_px
    }

    /// Projects offer terms onto the surface, skipping anything that would
    /// produce a non-finite coordinate.
    ///
    /// A `None` here means the input was numerically unusable; draw paths
    /// drop the mark for the frame rather than feeding NaN geometry
    /// downstream.
    #[must_use]
    pub fn project(&self, terms: OfferTerms) -> Option<PixelPoint> {
        let x = self.principal_to_pixel(terms.principal).ok()?;
        let y = self.rate_to_pixel(terms.rate).ok()?;
        let point = PixelPoint::new(x, y);
        point.is_finite().then_some(point)
    }

    /// Maps a surface position back to offer terms.
    ///
    /// The result is raw data space: it may lie outside the current domain
    /// and may be negative when the pixel is off-surface. Drag handling
    /// relies on this so a marker pushed past the view edge still reports
    /// its true candidate terms.
    pub fn unproject(&self, pixel: PixelPoint) -> ChartResult<OfferTerms> {
        Ok(OfferTerms {
            principal: self.pixel_to_principal(pixel.x)?,
            rate: self.pixel_to_rate(pixel.y)?,
        })
    }
}
