use super::geometry::{Extent, Position};
use super::sprite::Sprite;

/// Strict point-in-rectangle test; a point on an edge is outside.
pub fn contains(location: Position, extent: Extent, x: f32, y: f32) -> bool {
    x > location.x
        && x < location.x + extent.width
        && y > location.y
        && y < location.y + extent.height
}

/// Corner-sampling hit test of `a` against `b`.
///
/// Samples a's top-left, top-right and bottom-right corners (the bottom-right
/// one twice). The bottom-left corner is never sampled, so an overlap touching
/// only that corner reports no hit. Gameplay tuning depends on this.
pub fn hit_boxes(
    a_location: Position,
    a_extent: Extent,
    b_location: Position,
    b_extent: Extent,
) -> bool {
    let left = a_location.x;
    let top = a_location.y;
    let right = a_location.x + a_extent.width;
    let bottom = a_location.y + a_extent.height;

    let samples = [(left, top), (right, top), (right, bottom), (right, bottom)];
    samples
        .iter()
        .any(|&(x, y)| contains(b_location, b_extent, x, y))
}

pub fn hit(a: &Sprite, b: &Sprite) -> bool {
    hit_boxes(a.position, a.extent, b.position, b.extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET_AT: Position = Position::new(0.0, 0.0);
    const TARGET_SIZE: Extent = Extent::new(20.0, 20.0);
    const SMALL: Extent = Extent::new(4.0, 4.0);

    #[test]
    fn small_box_inside_target_hits() {
        assert!(hit_boxes(
            Position::new(10.0, 10.0),
            SMALL,
            TARGET_AT,
            TARGET_SIZE
        ));
    }

    #[test]
    fn box_beyond_target_misses() {
        assert!(!hit_boxes(
            Position::new(25.0, 25.0),
            SMALL,
            TARGET_AT,
            TARGET_SIZE
        ));
    }

    #[test]
    fn overlap_through_bottom_left_corner_only_is_not_a_hit() {
        // Bottom-left corner (18, 2) lies inside the target; every sampled
        // corner sits to the right of it.
        let a_location = Position::new(18.0, -2.0);
        assert!(contains(TARGET_AT, TARGET_SIZE, 18.0, 2.0));
        assert!(!hit_boxes(a_location, SMALL, TARGET_AT, TARGET_SIZE));
    }

    #[test]
    fn edge_contact_does_not_count() {
        assert!(!contains(TARGET_AT, TARGET_SIZE, 0.0, 10.0));
        assert!(!contains(TARGET_AT, TARGET_SIZE, 10.0, 20.0));
        assert!(!hit_boxes(
            Position::new(20.0, 5.0),
            SMALL,
            TARGET_AT,
            TARGET_SIZE
        ));
    }

    #[test]
    fn top_right_corner_alone_is_enough() {
        assert!(hit_boxes(
            Position::new(-3.0, 5.0),
            SMALL,
            TARGET_AT,
            TARGET_SIZE
        ));
    }
}
