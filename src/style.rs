//! Responsive style resolution.
//!
//! Font sizes, line height and field visibility are a pure function of the
//! label's physical area. Nothing here is mutated after resolution; the
//! renderer receives the profile by reference.

use crate::shipment::LabelDimensions;

/// Area below which the compact layout applies (mm²). Compact labels drop
/// the observation and the sender field to prioritize recipient and count.
pub const COMPACT_AREA_MM2: f32 = 3200.0;

/// Area below which the reduced layout applies (mm²).
pub const REDUCED_AREA_MM2: f32 = 6000.0;

/// Area above which the expanded layout applies (mm²). The boundary itself
/// belongs to the default profile.
pub const EXPANDED_AREA_MM2: f32 = 9000.0;

/// Width below which header and band texts get hard character budgets (mm).
pub const NARROW_WIDTH_MM: f32 = 60.0;

/// Derived per-request text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleProfile {
    /// Header band font size (pt)
    pub header_font_size: f32,
    /// Body field font size (pt)
    pub field_font_size: f32,
    /// Observation font size (pt)
    pub obs_font_size: f32,
    /// Row advance (mm)
    pub line_height: f32,
    /// Whether the observation row is rendered at all
    pub show_observation: bool,
    /// Whether the invoice-numbers row is rendered
    pub show_invoices: bool,
}

impl StyleProfile {
    /// Resolve the profile for the given label size.
    ///
    /// The partition is asymmetric on purpose: an area of exactly 9000 mm²
    /// resolves to the default profile, not the expanded one.
    ///
    /// # Examples
    ///
    /// ```
    /// use etiqueta::shipment::LabelDimensions;
    /// use etiqueta::style::StyleProfile;
    ///
    /// let dims = LabelDimensions::new(10.0, 5.0).unwrap();
    /// let profile = StyleProfile::resolve(&dims);
    /// assert_eq!(profile.header_font_size, 11.0);
    /// assert_eq!(profile.field_font_size, 8.0);
    /// ```
    pub fn resolve(dims: &LabelDimensions) -> Self {
        let area = dims.area_mm2();
        if area < COMPACT_AREA_MM2 {
            Self {
                header_font_size: 9.0,
                field_font_size: 7.0,
                obs_font_size: 6.0,
                line_height: 3.0,
                show_observation: false,
                show_invoices: true,
            }
        } else if area < REDUCED_AREA_MM2 {
            Self {
                header_font_size: 11.0,
                field_font_size: 8.0,
                obs_font_size: 7.0,
                line_height: 3.5,
                show_observation: true,
                show_invoices: true,
            }
        } else if area <= EXPANDED_AREA_MM2 {
            Self {
                header_font_size: 13.0,
                field_font_size: 9.0,
                obs_font_size: 8.0,
                line_height: 4.0,
                show_observation: true,
                show_invoices: true,
            }
        } else {
            Self {
                header_font_size: 15.0,
                field_font_size: 10.0,
                obs_font_size: 9.0,
                line_height: 4.5,
                show_observation: true,
                show_invoices: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_for(width_cm: f32, height_cm: f32) -> StyleProfile {
        StyleProfile::resolve(&LabelDimensions::new(width_cm, height_cm).unwrap())
    }

    #[test]
    fn test_compact_hides_observation() {
        // 80mm x 39mm = 3120 mm²
        let profile = profile_for(8.0, 3.9);
        assert!(!profile.show_observation);
        assert_eq!(profile.field_font_size, 7.0);
    }

    #[test]
    fn test_reduced_profile_values() {
        // 100mm x 50mm = 5000 mm²
        let profile = profile_for(10.0, 5.0);
        assert_eq!(profile.header_font_size, 11.0);
        assert_eq!(profile.field_font_size, 8.0);
        assert!(profile.show_observation);
    }

    #[test]
    fn test_boundary_3200_is_reduced() {
        // 80mm x 40mm = 3200 mm² exactly: low threshold is half-open.
        let profile = profile_for(8.0, 4.0);
        assert!(profile.show_observation);
        assert_eq!(profile.field_font_size, 8.0);
    }

    #[test]
    fn test_boundary_6000_is_default() {
        // 100mm x 60mm = 6000 mm² exactly.
        let profile = profile_for(10.0, 6.0);
        assert_eq!(profile.header_font_size, 13.0);
    }

    #[test]
    fn test_boundary_9000_is_default_not_expanded() {
        // 100mm x 90mm = 9000 mm²: the default profile owns this boundary.
        let profile = profile_for(10.0, 9.0);
        assert_eq!(profile.header_font_size, 13.0);
        assert_eq!(profile.field_font_size, 9.0);
    }

    #[test]
    fn test_expanded_above_9000() {
        let profile = profile_for(15.0, 10.0);
        assert_eq!(profile.header_font_size, 15.0);
        assert_eq!(profile.field_font_size, 10.0);
    }

    #[test]
    fn test_all_sizes_positive() {
        for (w, h) in [(3.0, 3.0), (8.0, 4.0), (10.0, 5.0), (10.0, 7.0), (20.0, 10.0)] {
            let p = profile_for(w, h);
            assert!(p.header_font_size > 0.0);
            assert!(p.field_font_size > 0.0);
            assert!(p.obs_font_size > 0.0);
            assert!(p.line_height > 0.0);
        }
    }
}
