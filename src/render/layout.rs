//! Squarified treemap layout.
//!
//! Packs a list of weights into a bounding rectangle as near-square tiles.
//! Tiles are laid out strip by strip along the shorter free side; a strip
//! grows while adding the next item does not worsen its worst aspect ratio.

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Inset on all sides, clamped so width and height never go negative.
    pub fn shrink(&self, pad: f64) -> Rect {
        let w = (self.w - 2.0 * pad).max(0.0);
        let h = (self.h - 2.0 * pad).max(0.0);
        Rect::new(self.x + (self.w - w) / 2.0, self.y + (self.h - h) / 2.0, w, h)
    }
}

/// Lay out one tile per value inside `bounds`, areas proportional to the
/// values. Works for any input order; near-square tiles need descending
/// input. Non-positive values get zero-area tiles; if every value is
/// non-positive the space is split evenly instead.
pub fn squarify(values: &[f64], bounds: Rect) -> Vec<Rect> {
    if values.is_empty() {
        return Vec::new();
    }

    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    let areas: Vec<f64> = if total > 0.0 {
        values
            .iter()
            .map(|v| v.max(0.0) / total * bounds.area())
            .collect()
    } else {
        vec![bounds.area() / values.len() as f64; values.len()]
    };

    let mut rects = Vec::with_capacity(areas.len());
    let mut free = bounds;
    let mut i = 0;

    while i < areas.len() {
        let side = free.w.min(free.h).max(f64::MIN_POSITIVE);

        // Grow the strip while the worst aspect ratio keeps improving.
        let mut end = i + 1;
        let mut best = worst_aspect(&areas[i..end], side);
        while end < areas.len() {
            let candidate = worst_aspect(&areas[i..=end], side);
            if candidate <= best {
                best = candidate;
                end += 1;
            } else {
                break;
            }
        }

        let strip_area: f64 = areas[i..end].iter().sum();
        let thickness = strip_area / side;

        if free.w >= free.h {
            // Vertical strip against the left edge.
            let mut y = free.y;
            for &area in &areas[i..end] {
                let h = if thickness > 0.0 { area / thickness } else { 0.0 };
                rects.push(Rect::new(free.x, y, thickness, h));
                y += h;
            }
            free.x += thickness;
            free.w = (free.w - thickness).max(0.0);
        } else {
            // Horizontal strip against the top edge.
            let mut x = free.x;
            for &area in &areas[i..end] {
                let w = if thickness > 0.0 { area / thickness } else { 0.0 };
                rects.push(Rect::new(x, free.y, w, thickness));
                x += w;
            }
            free.y += thickness;
            free.h = (free.h - thickness).max(0.0);
        }

        i = end;
    }

    rects
}

/// Worst (largest) width:height ratio a strip of these areas would have when
/// laid along a free side of the given length.
fn worst_aspect(areas: &[f64], side: f64) -> f64 {
    let sum: f64 = areas.iter().sum();
    let thickness = (sum / side).max(f64::MIN_POSITIVE);

    areas
        .iter()
        .map(|&a| {
            let a = a.max(f64::MIN_POSITIVE);
            let cross = a / thickness;
            (thickness / cross).max(cross / thickness)
        })
        .fold(0.0, f64::max)
}
