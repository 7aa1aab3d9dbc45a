/// Fixed reference angle for winner resolution: 270 degrees is the bottom of
/// the circle, where the indicator triangle sits regardless of rotation.
pub const POINTER_DEG: f64 = 270.0;

/// Angular arc assigned to one item at a given rotation.
///
/// `start_deg > end_deg` encodes an arc that wraps across the 0/360 boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl Segment {
    pub fn contains(&self, angle: f64) -> bool {
        if self.start_deg < self.end_deg {
            angle >= self.start_deg && angle < self.end_deg
        } else {
            angle >= self.start_deg || angle < self.end_deg
        }
    }
}

/// The wheel itself: an ordered item list plus the cumulative rotation offset.
/// Rotation is unbounded and only taken mod 360 when geometry is computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WheelState {
    items: Vec<String>,
    current_deg: f64,
}

impl WheelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(items: Vec<String>, current_deg: f64) -> Self {
        Self { items, current_deg }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_deg(&self) -> f64 {
        self.current_deg
    }

    pub fn set_rotation(&mut self, deg: f64) {
        self.current_deg = deg;
    }

    pub fn advance(&mut self, delta_deg: f64) {
        self.current_deg += delta_deg;
    }

    pub fn push_item(&mut self, label: impl Into<String>) {
        self.items.push(label.into());
    }

    pub fn pop_item(&mut self) -> Option<String> {
        self.items.pop()
    }

    pub fn replace_items(&mut self, items: Vec<String>) {
        self.items = items;
    }

    /// Width of one arc in degrees, `None` for an empty wheel.
    pub fn step_deg(&self) -> Option<f64> {
        if self.items.is_empty() {
            None
        } else {
            Some(360.0 / self.items.len() as f64)
        }
    }

    /// Equal-width arcs for every item at the current rotation, in item order.
    /// An empty wheel has no segments.
    pub fn segments(&self) -> Vec<Segment> {
        let n = self.items.len();
        if n == 0 {
            return Vec::new();
        }
        let step = 360.0 / n as f64;
        let base = self.current_deg.rem_euclid(360.0);
        (0..n)
            .map(|i| Segment {
                index: i,
                start_deg: (base + i as f64 * step) % 360.0,
                end_deg: (base + (i + 1) as f64 * step) % 360.0,
            })
            .collect()
    }

    /// The item whose segment contains the pointer, or `None` for an empty
    /// wheel. A float boundary case can leave the pointer on no arc; the
    /// first item keeps the outcome deterministic when that happens.
    pub fn winner(&self) -> Option<&str> {
        if self.items.is_empty() {
            return None;
        }
        let index = self
            .segments()
            .into_iter()
            .find(|seg| seg.contains(POINTER_DEG))
            .map(|seg| seg.index)
            .unwrap_or(0);
        Some(&self.items[index])
    }

    /// Rotate the wheel so the midpoint of `label`'s segment sits exactly on
    /// the pointer. Returns false when the label is not on the wheel.
    pub fn align_to(&mut self, label: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item == label) else {
            return false;
        };
        let step = 360.0 / self.items.len() as f64;
        let midpoint = step * index as f64 + step / 2.0;
        self.current_deg = (POINTER_DEG - midpoint + 360.0) % 360.0;
        true
    }
}
