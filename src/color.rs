use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour ramp: numeric value → Color32
// ---------------------------------------------------------------------------

/// Maps a numeric column (LogS in practice) onto a cold-to-warm colour ramp.
///
/// Values at `min` render deep blue, values at `max` warm yellow; anything
/// non-finite gets the neutral missing colour.
#[derive(Debug, Clone)]
pub struct ColorScale {
    min: f64,
    max: f64,
    missing: Color32,
}

impl ColorScale {
    pub fn new(min: f64, max: f64) -> Self {
        ColorScale {
            min,
            max,
            missing: Color32::GRAY,
        }
    }

    /// Normalized position of `value` on the ramp, or `None` for NaN/inf.
    fn position(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        if self.max > self.min {
            Some(((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0))
        } else {
            // degenerate extent, e.g. a single-row dataset
            Some(0.5)
        }
    }

    fn color_at(&self, t: f64) -> Color32 {
        let t = t as f32;
        let hue = 260.0 - 230.0 * t;
        let hsl = Hsl::new(hue, 0.75, 0.30 + 0.35 * t);
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    /// Look up the colour for a value.
    pub fn color_for(&self, value: f64) -> Color32 {
        match self.position(value) {
            Some(t) => self.color_at(t),
            None => self.missing,
        }
    }

    /// Bucket index for grouping many points into a few uniformly coloured
    /// plot items; `None` for values with no position on the ramp.
    pub fn bin(&self, value: f64, bins: usize) -> Option<usize> {
        let t = self.position(value)?;
        Some(((t * bins as f64) as usize).min(bins.saturating_sub(1)))
    }

    /// Representative colour of a bucket (its midpoint on the ramp).
    pub fn bin_color(&self, bin: usize, bins: usize) -> Color32 {
        let t = (bin as f64 + 0.5) / bins.max(1) as f64;
        self.color_at(t.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_get_distinct_colors() {
        let scale = ColorScale::new(-10.0, 2.0);
        assert_ne!(scale.color_for(-10.0), scale.color_for(2.0));
    }

    #[test]
    fn non_finite_values_get_the_missing_color() {
        let scale = ColorScale::new(-10.0, 2.0);
        assert_eq!(scale.color_for(f64::NAN), Color32::GRAY);
        assert_eq!(scale.color_for(f64::INFINITY), Color32::GRAY);
    }

    #[test]
    fn degenerate_extent_does_not_panic() {
        let scale = ColorScale::new(1.0, 1.0);
        let _ = scale.color_for(1.0);
        assert_eq!(scale.bin(1.0, 24), Some(12));
    }

    #[test]
    fn bins_stay_in_range() {
        let scale = ColorScale::new(0.0, 1.0);
        assert_eq!(scale.bin(0.0, 24), Some(0));
        assert_eq!(scale.bin(1.0, 24), Some(23));
        assert_eq!(scale.bin(f64::NAN, 24), None);
    }
}
