use super::*;

#[test]
fn union_takes_outer_extent() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(5.0, 5.0, 20.0, 20.0);
    assert_eq!(a.union(&b), BoundingBox::new(0.0, 0.0, 20.0, 20.0));
}

#[test]
fn merge_boxes_of_one_is_identity() {
    let a = BoundingBox::new(26.0, 36.0, 45.0, 42.0);
    assert_eq!(merge_boxes([Some(a)]), Some(a));
}

#[test]
fn merge_boxes_missing_entry_yields_none() {
    let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    assert_eq!(merge_boxes([Some(a), None, Some(a)]), None);
}

#[test]
fn merge_boxes_empty_yields_none() {
    assert_eq!(merge_boxes(std::iter::empty()), None);
}

#[test]
fn merge_boxes_handles_negative_coordinates() {
    let west = BoundingBox::new(-120.0, 30.0, -100.0, 45.0);
    let east = BoundingBox::new(-80.0, 25.0, -70.0, 40.0);
    assert_eq!(merge_boxes([Some(east), Some(west)]), Some(BoundingBox::new(-120.0, 25.0, -70.0, 45.0)));
}

#[test]
fn corners_and_finalized() {
    let a = BoundingBox::new(0.0, 10.0, 20.0, 30.0);
    assert_eq!(a.corners(), [[0.0, 10.0], [20.0, 30.0]]);
    assert!(a.is_finalized());
    assert!(!BoundingBox::new(1.0, 0.0, 0.0, 1.0).is_finalized());
}
