//! Photo filters as numeric channel adjustments.
//!
//! Each filter id maps to a set of named channels at full strength; the effective channels are
//! linearly interpolated between the neutral values and full strength by `intensity / 100`. The
//! numeric struct is the contract (and what the fingerprint hashes); the CSS string is a
//! convenience for DOM hosts.

/// Channel values for one filter application. Neutral values render identically to no filter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterChannels {
    pub brightness: f64,
    pub contrast: f64,
    pub saturate: f64,
    pub grayscale: f64,
    pub sepia: f64,
    pub hue_rotate_deg: f64,
    pub blur_px: f64,
}

impl FilterChannels {
    pub const NEUTRAL: Self = Self {
        brightness: 1.0,
        contrast: 1.0,
        saturate: 1.0,
        grayscale: 0.0,
        sepia: 0.0,
        hue_rotate_deg: 0.0,
        blur_px: 0.0,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// CSS `filter` value, omitting neutral components. Neutral channels yield `"none"`.
    pub fn to_css(&self) -> String {
        let mut parts = Vec::new();
        if self.brightness != 1.0 {
            parts.push(format!("brightness({})", trim(self.brightness)));
        }
        if self.contrast != 1.0 {
            parts.push(format!("contrast({})", trim(self.contrast)));
        }
        if self.saturate != 1.0 {
            parts.push(format!("saturate({})", trim(self.saturate)));
        }
        if self.grayscale != 0.0 {
            parts.push(format!("grayscale({})", trim(self.grayscale)));
        }
        if self.sepia != 0.0 {
            parts.push(format!("sepia({})", trim(self.sepia)));
        }
        if self.hue_rotate_deg != 0.0 {
            parts.push(format!("hue-rotate({}deg)", trim(self.hue_rotate_deg)));
        }
        if self.blur_px != 0.0 {
            parts.push(format!("blur({}px)", trim(self.blur_px)));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" ")
        }
    }
}

impl Default for FilterChannels {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Full-strength channels for a filter id. Unknown ids are neutral, so a retired filter
/// degrades to "no effect" instead of breaking old documents.
pub fn filter_channels(id: &str) -> FilterChannels {
    let n = FilterChannels::NEUTRAL;
    match id {
        "bw" => FilterChannels {
            grayscale: 1.0,
            contrast: 1.1,
            ..n
        },
        "sepia" => FilterChannels {
            sepia: 0.8,
            brightness: 1.05,
            ..n
        },
        "warm" => FilterChannels {
            sepia: 0.3,
            saturate: 1.2,
            brightness: 1.05,
            ..n
        },
        "cool" => FilterChannels {
            saturate: 0.9,
            hue_rotate_deg: 18.0,
            brightness: 1.02,
            ..n
        },
        "vivid" => FilterChannels {
            saturate: 1.5,
            contrast: 1.15,
            ..n
        },
        "faded" => FilterChannels {
            saturate: 0.7,
            contrast: 0.9,
            brightness: 1.1,
            ..n
        },
        "vintage" => FilterChannels {
            sepia: 0.45,
            contrast: 0.92,
            brightness: 1.08,
            saturate: 0.85,
            ..n
        },
        "dreamy" => FilterChannels {
            brightness: 1.1,
            saturate: 0.8,
            blur_px: 1.2,
            ..n
        },
        _ => n,
    }
}

/// Effective channels at an intensity in `0..=100`. Intensity 0 is exactly neutral; values
/// outside the range are clamped.
pub fn channels_at(id: &str, intensity: f64) -> FilterChannels {
    let full = filter_channels(id);
    let t = (intensity.clamp(0.0, 100.0)) / 100.0;
    let n = FilterChannels::NEUTRAL;
    FilterChannels {
        brightness: lerp(n.brightness, full.brightness, t),
        contrast: lerp(n.contrast, full.contrast, t),
        saturate: lerp(n.saturate, full.saturate, t),
        grayscale: lerp(n.grayscale, full.grayscale, t),
        sepia: lerp(n.sepia, full.sepia, t),
        hue_rotate_deg: lerp(n.hue_rotate_deg, full.hue_rotate_deg, t),
        blur_px: lerp(n.blur_px, full.blur_px, t),
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn trim(v: f64) -> String {
    // Avoid "1.2000000000000002"-style noise in CSS output.
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sepia_at_half_intensity_is_0_4() {
        let c = channels_at("sepia", 50.0);
        assert_eq!(c.sepia, 0.4);
    }

    #[test]
    fn zero_intensity_is_exactly_neutral() {
        for id in ["bw", "sepia", "warm", "cool", "vivid", "faded", "vintage", "dreamy"] {
            assert!(channels_at(id, 0.0).is_neutral(), "{id} not neutral at 0");
        }
    }

    #[test]
    fn full_intensity_matches_registry() {
        assert_eq!(channels_at("vivid", 100.0), filter_channels("vivid"));
    }

    #[test]
    fn unknown_filter_is_neutral() {
        assert!(filter_channels("nope").is_neutral());
        assert!(channels_at("nope", 100.0).is_neutral());
    }

    #[test]
    fn intensity_is_clamped() {
        assert_eq!(channels_at("sepia", 150.0), channels_at("sepia", 100.0));
        assert_eq!(channels_at("sepia", -20.0), channels_at("sepia", 0.0));
    }

    #[test]
    fn neutral_css_is_none() {
        assert_eq!(FilterChannels::NEUTRAL.to_css(), "none");
    }

    #[test]
    fn css_lists_only_active_channels() {
        let css = channels_at("bw", 100.0).to_css();
        assert!(css.contains("grayscale(1)"));
        assert!(css.contains("contrast(1.1)"));
        assert!(!css.contains("sepia"));
    }
}
