use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Local 2D transform: position, rotation (degrees, clockwise in screen
/// space) and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform {
    /// Identity transform moved to `position`.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Affine matrix applying scale, then rotation, then translation.
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation.to_radians(), self.position)
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }
}

/// Axis-aligned rectangle in screen convention (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on the origin.
    pub fn centered(size: Vec2) -> Self {
        Self::new(-size.x / 2.0, -size.y / 2.0, size.x, size.y)
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Zero or negative extent on either axis.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Strict overlap test. Empty rectangles never intersect anything,
    /// and rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }

    /// Bounding box of this rectangle after applying `transform`.
    pub fn transformed(&self, transform: &Affine2) -> Rect {
        let corners = [
            Vec2::new(self.left, self.top),
            Vec2::new(self.right(), self.top),
            Vec2::new(self.left, self.bottom()),
            Vec2::new(self.right(), self.bottom()),
        ]
        .map(|c| transform.transform_point2(c));

        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.min(*c);
            max = max.max(*c);
        }
        Rect::from_min_size(min, max - min)
    }
}

/// Normalized copy of `v`, or `v` unchanged when it is (almost) zero.
pub fn unit_vector(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > f32::MIN_POSITIVE { v / len } else { v }
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec2::ZERO);
        assert_eq!(t.rotation, 0.0);
        assert_eq!(t.scale, Vec2::ONE);
        assert!(approx(t.to_affine().transform_point2(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn rotation_half_turn_flips_point() {
        let t = Transform {
            rotation: 180.0,
            ..Transform::at(Vec2::new(10.0, 10.0))
        };
        let p = t.to_affine().transform_point2(Vec2::new(0.0, 5.0));
        assert!(approx(p, Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn empty_rects_never_intersect() {
        let a = Rect::new(0.0, 0.0, 0.0, 10.0);
        let b = Rect::new(-5.0, -5.0, 20.0, 20.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
        let negative = Rect::new(0.0, 0.0, -4.0, 4.0);
        assert!(!negative.intersects(&b));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::ZERO));
        assert!(r.contains(Vec2::new(9.9, 9.9)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(5.0, -0.1)));
    }

    #[test]
    fn transformed_rect_is_bounding_box() {
        let local = Rect::centered(Vec2::new(4.0, 2.0));
        let t = Transform {
            rotation: 90.0,
            ..Transform::at(Vec2::new(100.0, 50.0))
        };
        let world = local.transformed(&t.to_affine());
        assert!((world.width - 2.0).abs() < 1e-3);
        assert!((world.height - 4.0).abs() < 1e-3);
        assert!(approx(world.center(), Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn unit_vector_of_zero_is_zero() {
        assert_eq!(unit_vector(Vec2::ZERO), Vec2::ZERO);
        assert!(approx(unit_vector(Vec2::new(3.0, 4.0)), Vec2::new(0.6, 0.8)));
    }
}
