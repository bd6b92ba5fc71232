//=========================================================================
// Overlap Engine
//=========================================================================
//
// Per-frame pairwise and boundary intersection tests for visual entities.
//
// Architecture:
//   entities → candidates (visual + clip + bitmap) → ordered pair scan
//            → Vec<(i, j)> with j < i, in insertion order of i
//
// The pair order fixes the order in which the render pass invokes
// collision callbacks, so it must stay deterministic.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::entity::{Entity, EntityKind};
use crate::core::geometry::Aabb;
use crate::core::images::Bitmap;

//=== Box Computation =====================================================

/// Scaled `(width, height)` of a bitmap.
///
/// Width is derived from the scaled height term, `(bw * scale) * bh / bw`,
/// which is what the renderer draws. A zero-width bitmap yields width 0.
pub fn scaled_dims(bitmap: &Bitmap, scale: f32) -> (f32, f32) {
    let bw = bitmap.width() as f32;
    let bh = bitmap.height() as f32;
    let h = bh * scale;
    let w = if bitmap.width() == 0 {
        0.0
    } else {
        (bw * scale) * bh / bw
    };
    (w, h)
}

/// Bounding box of a visual entity, `None` for labels and for visuals
/// whose bitmap never resolved.
pub fn bounding_box(entity: &Entity) -> Option<Aabb> {
    match &entity.kind {
        EntityKind::Visual(visual) => {
            let bitmap = visual.bitmap.as_ref()?;
            let (w, h) = scaled_dims(bitmap, visual.scale);
            Some(Aabb::new(entity.position.x, entity.position.y, w, h))
        }
        EntityKind::Label(_) => None,
    }
}

//=== Pairwise Test =======================================================

/// Returns `true` if both entities have boxes and the boxes intersect.
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    match (bounding_box(a), bounding_box(b)) {
        (Some(box_a), Some(box_b)) => box_a.overlaps(&box_b),
        _ => false,
    }
}

fn collision_box(entity: &Entity) -> Option<Aabb> {
    match &entity.kind {
        EntityKind::Visual(visual) if visual.clip => bounding_box(entity),
        _ => None,
    }
}

/// Computes all colliding index pairs for one frame.
///
/// Only clipped visual entities are considered, and nothing collides in a
/// hidden scene. Each entity `i` is compared against every earlier
/// candidate `j < i`; matches are reported as `(i, j)`, so every unordered
/// pair appears at most once.
pub fn compute_pairs(entities: &[Entity], scene_hidden: bool) -> Vec<(usize, usize)> {
    if scene_hidden {
        return Vec::new();
    }

    let boxes: Vec<Option<Aabb>> = entities.iter().map(collision_box).collect();
    let mut pairs = Vec::new();

    for (i, box_i) in boxes.iter().enumerate() {
        let Some(box_i) = box_i else { continue };

        for (j, box_j) in boxes[..i].iter().enumerate() {
            let Some(box_j) = box_j else { continue };

            if box_i.overlaps(box_j) {
                pairs.push((i, j));
            }
        }
    }

    if !pairs.is_empty() {
        trace!(target: "overlap", "{} colliding pairs", pairs.len());
    }
    pairs
}

//=== Boundary Test =======================================================

/// Returns `true` when a visual entity's box leaves the surface.
///
/// Labels and visuals without a bitmap are never out of bounds.
pub fn out_of_bounds(entity: &Entity, surface_width: f32, surface_height: f32) -> bool {
    bounding_box(entity)
        .map(|b| b.exceeds(surface_width, surface_height))
        .unwrap_or(false)
}

//=== Hit Test ============================================================

/// Returns `true` when a 1x1 box at `(x, y)` overlaps the entity's box.
pub fn hit_test(entity: &Entity, x: f32, y: f32) -> bool {
    bounding_box(entity)
        .map(|b| Aabb::point(x, y).overlaps(&b))
        .unwrap_or(false)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{LabelOptions, VisualOptions};
    use proptest::prelude::*;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    fn square(x: f32, y: f32, size: u32) -> Entity {
        Entity::visual_with_bitmap(
            Some(Rc::new(Bitmap::blank(size, size))),
            VisualOptions::default().at(x, y),
        )
    }

    fn unclipped(x: f32, y: f32, size: u32) -> Entity {
        Entity::visual_with_bitmap(
            Some(Rc::new(Bitmap::blank(size, size))),
            VisualOptions::default().at(x, y).with_clip(false),
        )
    }

    //=====================================================================
    // Box Tests
    //=====================================================================

    #[test]
    fn width_uses_height_derived_formula() {
        let bitmap = Bitmap::blank(20, 10);
        // (20 * 3) * 10 / 20 = 30, not 60
        assert_eq!(scaled_dims(&bitmap, 3.0), (30.0, 30.0));
    }

    #[test]
    fn zero_width_bitmap_has_zero_width() {
        assert_eq!(scaled_dims(&Bitmap::blank(0, 5), 1.0), (0.0, 5.0));
    }

    #[test]
    fn labels_have_no_box() {
        let label = Entity::label("x", LabelOptions::default());
        assert!(bounding_box(&label).is_none());
        assert!(!out_of_bounds(&label, 0.0, 0.0));
    }

    //=====================================================================
    // Pair Tests
    //=====================================================================

    #[test]
    fn pairs_are_reported_latest_first() {
        let entities = vec![square(0.0, 0.0, 10), square(5.0, 5.0, 10), square(8.0, 8.0, 10)];
        assert_eq!(compute_pairs(&entities, false), vec![(1, 0), (2, 0), (2, 1)]);
    }

    #[test]
    fn unclipped_entities_are_skipped() {
        let entities = vec![square(0.0, 0.0, 10), unclipped(0.0, 0.0, 10)];
        assert!(compute_pairs(&entities, false).is_empty());
    }

    #[test]
    fn labels_are_skipped() {
        let entities = vec![
            square(0.0, 0.0, 10),
            Entity::label("x", LabelOptions::default().at(0.0, 0.0)),
            square(2.0, 2.0, 10),
        ];
        assert_eq!(compute_pairs(&entities, false), vec![(2, 0)]);
    }

    #[test]
    fn hidden_scene_reports_nothing() {
        let entities = vec![square(0.0, 0.0, 10), square(0.0, 0.0, 10)];
        assert!(compute_pairs(&entities, true).is_empty());
    }

    //=====================================================================
    // Boundary & Hit Tests
    //=====================================================================

    #[test]
    fn boundary_uses_scaled_box() {
        let inside = square(90.0, 90.0, 10);
        let outside = square(91.0, 90.0, 10);
        assert!(!out_of_bounds(&inside, 100.0, 100.0));
        assert!(out_of_bounds(&outside, 100.0, 100.0));
    }

    #[test]
    fn hit_test_uses_point_box() {
        let target = square(10.0, 10.0, 20);
        assert!(hit_test(&target, 12.0, 12.0));
        assert!(hit_test(&target, 30.0, 30.0));
        assert!(!hit_test(&target, 31.0, 12.0));
    }

    //=====================================================================
    // Properties
    //=====================================================================

    fn arb_square() -> impl Strategy<Value = (f32, f32, u32)> {
        (-50i32..150, -50i32..150, 1u32..40).prop_map(|(x, y, s)| (x as f32, y as f32, s))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_square(), b in arb_square()) {
            let ea = square(a.0, a.1, a.2);
            let eb = square(b.0, b.1, b.2);
            prop_assert_eq!(overlaps(&ea, &eb), overlaps(&eb, &ea));
        }

        #[test]
        fn pairs_match_overlap_exactly(squares in prop::collection::vec(arb_square(), 0..8)) {
            let entities: Vec<Entity> = squares.iter().map(|s| square(s.0, s.1, s.2)).collect();
            let pairs = compute_pairs(&entities, false);

            for i in 0..entities.len() {
                for j in 0..i {
                    let reported = pairs.contains(&(i, j));
                    prop_assert_eq!(reported, overlaps(&entities[i], &entities[j]));
                    prop_assert!(!pairs.contains(&(j, i)));
                }
            }
        }
    }
}
