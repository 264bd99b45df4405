#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Rectangle occupied by a sprite at some earlier point in time.
///
/// Both halves stay `None` until the sprite records a footprint; an unset box
/// means there is nothing to erase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub location: Option<Position>,
    pub extent: Option<Extent>,
}

impl BoundingBox {
    pub const EMPTY: Self = Self {
        location: None,
        extent: None,
    };

    pub fn new(location: Position, extent: Extent) -> Self {
        Self {
            location: Some(location),
            extent: Some(extent),
        }
    }

    pub fn is_set(&self) -> bool {
        self.location.is_some() && self.extent.is_some()
    }

    pub fn rect(&self) -> Option<(Position, Extent)> {
        Some((self.location?, self.extent?))
    }
}
