use std::{any::Any, rc::Rc};

use typed_bits::{
    dynamic::{CapabilityRegistry, DynSet},
    CapabilityError, Collectable, Error,
};

#[derive(Debug)]
struct Circle;
impl Collectable for Circle {}

#[derive(Debug)]
struct Square;
impl Collectable for Square {}

#[derive(Debug)]
struct Label;
impl Collectable for Label {}

// Never registered with the registry below.
struct Stray;
impl Collectable for Stray {}

fn registry() -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    registry
        .implements::<Circle>("Circle")
        .implements::<Square>("Square")
        .implements::<Circle>("Shape")
        .implements::<Square>("Shape")
        .implements::<Label>("Label");
    registry
}

fn item<T: Any>(value: T) -> Rc<dyn Any> {
    Rc::new(value)
}

#[test]
fn test_should_build_from_str_and_string() {
    let registry = registry();
    let set = DynSet::new(&registry, &"Shape").unwrap();
    assert_eq!(set.item_class(), "Shape");
    let set = DynSet::new(&registry, &String::from("Circle")).unwrap();
    assert_eq!(set.item_class(), "Circle");
    assert!(set.is_empty());
}

#[test]
fn test_should_reject_non_string_descriptor() {
    let registry = registry();
    let err = DynSet::new(&registry, &42u32).unwrap_err();
    assert_eq!(err, Error::InvalidCapability(CapabilityError::NotString));
}

#[test]
fn test_should_reject_unknown_capability() {
    let registry = registry();
    let err = DynSet::new(&registry, &"Triangle").unwrap_err();
    assert_eq!(
        err,
        Error::InvalidCapability(CapabilityError::NotCollectable("Triangle".to_owned()))
    );
}

#[test]
fn test_should_register_under_type_name() {
    let mut registry = CapabilityRegistry::new();
    registry.register::<Circle>();
    let name = std::any::type_name::<Circle>();
    let set = DynSet::new(&registry, &name).unwrap();
    assert_eq!(set.item_class(), name);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec![name]);
}

#[test]
fn test_should_register_under_short_name() {
    let mut registry = CapabilityRegistry::new();
    registry.register_as::<Circle>("Round");
    let mut round = DynSet::new(&registry, &"Round").unwrap();
    assert_eq!(round.item_class(), "Round");
    round.add(item(Circle)).unwrap();
    assert!(round.add(item(Square)).is_err());
    assert!(registry.resolve(std::any::type_name::<Circle>()).is_err());
}

#[test]
fn test_should_admit_every_member_of_capability() {
    let registry = registry();
    let mut shapes = DynSet::new(&registry, &"Shape").unwrap();
    let circle = item(Circle);
    shapes.add(circle.clone()).unwrap();
    shapes.add(item(Square)).unwrap();
    assert_eq!(shapes.len(), 2);
    assert!(shapes.contains(&circle).unwrap());
    assert!(shapes.iter().next().unwrap().is::<Circle>());
}

#[test]
fn test_should_reject_mismatched_items() {
    let registry = registry();
    let mut circles = DynSet::new(&registry, &"Circle").unwrap();
    let square = item(Square);
    let expected = Error::InvalidCollectable {
        expected: "Circle".to_owned(),
    };

    assert_eq!(circles.add(square.clone()).unwrap_err(), expected);
    assert_eq!(circles.contains(&square).unwrap_err(), expected);
    assert_eq!(circles.remove(&square).unwrap_err(), expected);
    assert_eq!(
        circles.insert_at("k", item(Stray)).unwrap_err(),
        expected
    );
    assert!(circles.is_empty());
}

#[test]
fn test_should_stop_add_all_at_first_mismatch() {
    let registry = registry();
    let mut circles = DynSet::new(&registry, &"Circle").unwrap();
    let first = item(Circle);
    let last = item(Circle);
    let batch = vec![first.clone(), item(Label), last.clone()];

    assert!(matches!(
        circles.add_all(&batch),
        Err(Error::InvalidCollectable { .. })
    ));
    assert_eq!(circles.len(), 1);
    assert!(circles.contains(&first).unwrap());
    assert!(!circles.contains(&last).unwrap());
}

#[test]
fn test_should_leave_set_untouched_when_intersecting_mismatched() {
    let registry = registry();
    let mut circles = DynSet::new(&registry, &"Circle").unwrap();
    let circle = item(Circle);
    circles.add(circle.clone()).unwrap();

    let mut labels = DynSet::new(&registry, &"Label").unwrap();
    labels.add(item(Label)).unwrap();

    assert!(circles.remove_all_except(&labels).is_err());
    assert_eq!(circles.len(), 1);
    assert!(circles.contains(&circle).unwrap());
}

#[test]
fn test_should_intersect_across_capabilities() {
    let registry = registry();
    let c1 = item(Circle);
    let c2 = item(Circle);
    let sq = item(Square);

    let mut shapes = DynSet::new(&registry, &"Shape").unwrap();
    shapes.add_all([&c1, &sq, &c2]).unwrap();
    let mut circles = DynSet::new(&registry, &"Circle").unwrap();
    circles.add_all([&c2, &c1]).unwrap();

    shapes.remove_all_except(&circles).unwrap();
    let kept = shapes.to_vec();
    assert_eq!(kept.len(), 2);
    assert!(Rc::ptr_eq(&kept[0], &c2));
    assert!(Rc::ptr_eq(&kept[1], &c1));
}

#[test]
fn test_should_not_follow_later_registrations() {
    let mut registry = registry();
    let mut labels = DynSet::new(&registry, &"Label").unwrap();
    registry.implements::<Stray>("Label");
    assert!(labels.add(item(Stray)).is_err());
}

#[test]
fn test_should_stop_remove_all_at_first_mismatch() {
    let registry = registry();
    let mut circles = DynSet::new(&registry, &"Circle").unwrap();
    let first = item(Circle);
    let last = item(Circle);
    circles.add_all([&first, &last]).unwrap();

    let err = circles.remove_all([&first, &item(Square), &last]);
    assert_eq!(
        err,
        Err(Error::InvalidCollectable {
            expected: "Circle".to_owned()
        })
    );
    assert_eq!(circles.len(), 1);
    assert!(!circles.contains(&first).unwrap());
    assert!(circles.contains(&last).unwrap());
}
