//! Diverging color scale for price change: green for losses, white at zero,
//! red for gains.

const GREEN: (u8, u8, u8) = (0, 128, 0);
const WHITE: (u8, u8, u8) = (255, 255, 255);
const RED: (u8, u8, u8) = (255, 0, 0);

/// Round to 2 decimal digits. Change values are rounded before color
/// encoding so the legend stays stable and readable.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Continuous green-white-red scale with the midpoint pinned at zero.
///
/// The domain is the symmetric interval `[-max_abs, +max_abs]` around zero
/// rather than the observed data range, so a slightly negative change reads
/// visibly green and a slightly positive one visibly red even when the data
/// is skewed to one side.
#[derive(Debug, Clone, Copy)]
pub struct ChangeColorScale {
    max_abs: f64,
}

impl ChangeColorScale {
    /// Build the scale over a set of change values (rounded first). A set
    /// with no spread falls back to a unit domain so zero still maps to
    /// white.
    pub fn from_changes<I>(changes: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let max_abs = changes
            .into_iter()
            .map(|v| round2(v).abs())
            .fold(0.0, f64::max);

        Self {
            max_abs: if max_abs > 0.0 { max_abs } else { 1.0 },
        }
    }

    /// Hex color for one change value.
    pub fn color(&self, change_pct: f64) -> String {
        let t = (round2(change_pct) / self.max_abs).clamp(-1.0, 1.0);
        let (r, g, b) = if t >= 0.0 {
            lerp_rgb(WHITE, RED, t)
        } else {
            lerp_rgb(WHITE, GREEN, -t)
        };
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

fn lerp_rgb(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let channel = |a: u8, b: u8| -> u8 {
        (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
    };
    (channel(from.0, to.0), channel(from.1, to.1), channel(from.2, to.2))
}
