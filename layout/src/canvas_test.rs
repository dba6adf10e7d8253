use uuid::Uuid;

use super::*;
use crate::catalog::DataSourceId;
use crate::component::ComponentKind;

fn make_component(n: u128) -> ReportComponent {
    ReportComponent::new(Uuid::from_u128(n), ComponentKind::Table, None, format!("C{n}"), DataSourceId::Devices)
}

fn ids(canvas: &Canvas) -> Vec<ComponentId> {
    canvas.components().iter().map(|c| c.id).collect()
}

fn canvas_of(len: u128) -> Canvas {
    Canvas::from_components((1..=len).map(make_component).collect())
}

// =============================================================
// insert
// =============================================================

#[test]
fn new_is_empty() {
    let canvas = Canvas::new();
    assert!(canvas.is_empty());
    assert_eq!(canvas.len(), 0);
}

#[test]
fn insert_at_every_index_shifts_tail_right() {
    for len in 0..=5_u128 {
        for dest in 0..=usize::try_from(len).unwrap() {
            let mut canvas = canvas_of(len);
            let before = ids(&canvas);
            let new = make_component(100);
            canvas.insert(dest, new.clone()).unwrap();

            assert_eq!(canvas.len(), before.len() + 1);
            assert_eq!(canvas.components()[dest].id, new.id);
            assert_eq!(&ids(&canvas)[..dest], &before[..dest]);
            assert_eq!(&ids(&canvas)[dest + 1..], &before[dest..]);
        }
    }
}

#[test]
fn insert_past_end_errors_and_leaves_canvas() {
    let mut canvas = canvas_of(2);
    let err = canvas.insert(3, make_component(9)).unwrap_err();
    assert_eq!(err, LayoutError::IndexOutOfRange { index: 3, len: 2 });
    assert_eq!(canvas, canvas_of(2));
}

#[test]
fn insert_duplicate_id_errors() {
    let mut canvas = canvas_of(2);
    let err = canvas.insert(0, make_component(1)).unwrap_err();
    assert_eq!(err, LayoutError::DuplicateId(Uuid::from_u128(1)));
    assert_eq!(canvas.len(), 2);
}

#[test]
fn from_components_drops_later_duplicates() {
    let mut dup = make_component(1);
    dup.title = "Second".into();
    let canvas = Canvas::from_components(vec![make_component(1), make_component(2), dup]);
    assert_eq!(canvas.len(), 2);
    assert_eq!(canvas.get(&Uuid::from_u128(1)).unwrap().title, "C1");
}

// =============================================================
// reorder
// =============================================================

#[test]
fn reorder_every_pair_is_a_single_relocation() {
    let len = 5;
    for source in 0..len {
        for dest in 0..len {
            let mut canvas = canvas_of(5);
            let before = ids(&canvas);
            canvas.reorder(source, dest).unwrap();
            let after = ids(&canvas);

            let mut expected = before.clone();
            let moved = expected.remove(source);
            expected.insert(dest, moved);
            assert_eq!(after, expected, "move {source} -> {dest}");

            let mut sorted_before = before.clone();
            let mut sorted_after = after.clone();
            sorted_before.sort();
            sorted_after.sort();
            assert_eq!(sorted_before, sorted_after);
        }
    }
}

#[test]
fn reorder_same_index_is_noop() {
    for index in 0..4 {
        let mut canvas = canvas_of(4);
        let before = canvas.clone();
        assert!(!canvas.reorder(index, index).unwrap());
        assert_eq!(canvas, before);
    }
}

#[test]
fn reorder_leaves_component_fields_untouched() {
    let mut canvas = canvas_of(3);
    let before = canvas.clone();
    canvas.reorder(0, 2).unwrap();
    for component in before.components() {
        assert_eq!(canvas.get(&component.id), Some(component));
    }
}

#[test]
fn reorder_out_of_range_errors() {
    let mut canvas = canvas_of(3);
    assert_eq!(canvas.reorder(3, 0).unwrap_err(), LayoutError::IndexOutOfRange { index: 3, len: 3 });
    assert_eq!(canvas.reorder(0, 3).unwrap_err(), LayoutError::IndexOutOfRange { index: 3, len: 3 });
    assert_eq!(canvas, canvas_of(3));
}

#[test]
fn reorder_on_empty_canvas_errors() {
    let mut canvas = Canvas::new();
    assert!(canvas.reorder(0, 0).is_err());
}

// =============================================================
// remove / lookup
// =============================================================

#[test]
fn remove_returns_component_and_closes_gap() {
    let mut canvas = canvas_of(3);
    let removed = canvas.remove(&Uuid::from_u128(2)).unwrap();
    assert_eq!(removed.title, "C2");
    assert_eq!(ids(&canvas), vec![Uuid::from_u128(1), Uuid::from_u128(3)]);
}

#[test]
fn remove_absent_id_leaves_identical_sequence() {
    let mut canvas = canvas_of(3);
    let before = canvas.clone();
    assert!(canvas.remove(&Uuid::from_u128(42)).is_none());
    assert_eq!(canvas, before);
}

#[test]
fn position_and_contains() {
    let canvas = canvas_of(3);
    assert_eq!(canvas.position(&Uuid::from_u128(3)), Some(2));
    assert!(canvas.contains(&Uuid::from_u128(1)));
    assert!(!canvas.contains(&Uuid::from_u128(7)));
}

#[test]
fn get_mut_edits_in_place() {
    let mut canvas = canvas_of(2);
    canvas.get_mut(&Uuid::from_u128(2)).unwrap().title = "Edited".into();
    assert_eq!(canvas.components()[1].title, "Edited");
}

#[test]
fn clear_empties_canvas() {
    let mut canvas = canvas_of(3);
    canvas.clear();
    assert!(canvas.is_empty());
}
