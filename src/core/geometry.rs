//=========================================================================
// Geometry
//=========================================================================
//
// Surface-space primitives shared by entities, the overlap engine and
// pointer hit testing.
//
// Coordinates are surface pixels with a top-left origin. Boxes are
// closed: two boxes that only touch along an edge still overlap.
//
//=========================================================================

//=== Vec2 ================================================================

/// A 2D vector in surface pixels.
///
/// Used for positions, scene origins and knockback displacements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

//=== Aabb ================================================================

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A 1x1 box at a pointer position, used for click hit testing.
    #[inline]
    pub const fn point(x: f32, y: f32) -> Self {
        Self::new(x, y, 1.0, 1.0)
    }

    /// Returns `true` unless the boxes are fully separated on either axis.
    ///
    /// Separation is strict, so shared edges count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let separated = other.x > self.w + self.x
            || self.x > other.w + other.x
            || other.y > self.h + self.y
            || self.y > other.h + other.y;
        !separated
    }

    /// Returns `true` when the box leaves `[0, width] x [0, height]`.
    ///
    /// A box exactly flush with an edge is still in bounds.
    pub fn exceeds(&self, width: f32, height: f32) -> bool {
        self.x > width - self.w || self.x < 0.0 || self.y > height - self.h || self.y < 0.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
