use sovran_set::{SetError, SetOptions, TypeTag, TypedSetGroup, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, PartialEq, Eq, Hash)]
struct EmptyValue;

fn seeded() -> TypedSetGroup {
    TypedSetGroup::from_values([
        Value::from(1),
        Value::from(2),
        Value::from("str"),
        Value::from(1.2),
        Value::any(EmptyValue),
    ])
}

#[test]
fn test_basic_operations() -> Result<(), SetError> {
    let group = TypedSetGroup::new();

    // Test empty state
    assert!(group.is_empty());
    assert_eq!(group.len(), 0);
    assert!(group.type_tags().is_empty());

    // Test insertion across types
    group.add([Value::from(1), Value::from("str"), Value::from(1.2)])?;
    group.add([Value::any(EmptyValue)])?;
    assert_eq!(group.len(), 4);

    // Test membership
    assert!(group.contains(&Value::from("str")));
    assert!(!group.contains(&Value::from("nope")));

    // Test removal
    group.remove(&[Value::from("str")]);
    assert!(!group.contains(&Value::from("str")));
    assert_eq!(group.len(), 3);

    Ok(())
}

#[test]
fn test_remove_then_contains_all() {
    let group = seeded();

    group.remove(&[Value::from(1), Value::any(EmptyValue)]);

    assert!(group.contains_all(&[Value::from(2), Value::from("str"), Value::from(1.2)]));
    assert!(!group.contains_all(&[Value::from(1), Value::any(EmptyValue)]));
    assert!(!group.contains_any(&[Value::from(1), Value::any(EmptyValue)]));
}

#[test]
fn test_routing() -> Result<(), SetError> {
    let group = TypedSetGroup::new();

    group.add([1u8])?;
    assert_eq!(group.type_tags(), vec![TypeTag::Int]);

    group.add([Value::Nil, Value::from(true), Value::from('c')])?;
    assert_eq!(group.type_tags(), vec![TypeTag::Int, TypeTag::Any]);

    group.add(["s"])?;
    group.add([0.5])?;
    assert_eq!(
        group.type_tags(),
        vec![TypeTag::Int, TypeTag::Float, TypeTag::String, TypeTag::Any]
    );

    // same number, different types
    group.add([Value::from(1), Value::from(1.0), Value::from("1")])?;
    assert_eq!(group.len(), 9);
    Ok(())
}

#[test]
fn test_algebra_across_partitions() {
    let a = seeded();
    let b = TypedSetGroup::from_values([
        Value::from(2),
        Value::from(3),
        Value::from("str2"),
        Value::any(EmptyValue),
    ]);

    assert_eq!(
        a.diff(&b),
        TypedSetGroup::from_values([Value::from(1), Value::from("str"), Value::from(1.2)])
    );
    assert_eq!(
        a.intersect(&b),
        TypedSetGroup::from_values([Value::from(2), Value::any(EmptyValue)])
    );
    assert_eq!(a.unite(&b).len(), 7);
    assert_eq!(a.symmetric_diff(&b), b.symmetric_diff(&a));
    assert_eq!(a.symmetric_diff(&b), a.diff(&b).unite(&b.diff(&a)));

    // operands are untouched
    assert_eq!(a, seeded());
    assert_eq!(b.len(), 4);
}

#[test]
fn test_concurrent_adds() {
    let group = Arc::new(TypedSetGroup::new());

    let mut handles = vec![];
    for i in 0..8 {
        let group_clone = Arc::clone(&group);
        handles.push(thread::spawn(move || {
            for j in 0..50i32 {
                let values = [
                    Value::from(j),
                    Value::from(format!("s{}", j)),
                    Value::from(f64::from(j) / 4.0),
                    Value::from(i % 2 == 0),
                ];
                group_clone.add(values).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // 50 ints, 50 strings, 50 floats, 2 bools
    assert_eq!(group.len(), 152);
    assert_eq!(group.type_tags().len(), 4);
}

#[test]
fn test_concurrent_strict_adds() {
    let group = Arc::new(TypedSetGroup::with_options(SetOptions::strict()));
    let duplicates = Arc::new(AtomicUsize::new(0));

    let mut handles = vec![];
    for _ in 0..4 {
        let group_clone = Arc::clone(&group);
        let duplicates_clone = Arc::clone(&duplicates);
        handles.push(thread::spawn(move || {
            if let Err(SetError::AlreadyExists(_)) = group_clone.add(["only"]) {
                duplicates_clone.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // exactly one thread got to insert it
    assert_eq!(group.len(), 1);
    assert_eq!(duplicates.load(Ordering::SeqCst), 3);
}

#[test]
fn test_range_indices_are_unique() {
    let group = TypedSetGroup::from_values((0..20i32).map(Value::from).chain(
        (0..20).map(|i| Value::from(format!("s{}", i))),
    ));
    let seen = Mutex::new(Vec::new());

    group.range(|index, value| {
        seen.lock().unwrap().push((index, value.clone()));
        true
    });

    let mut seen = seen.into_inner().unwrap();
    seen.sort_by_key(|(index, _)| *index);
    let indices: Vec<usize> = seen.iter().map(|(index, _)| *index).collect();
    assert_eq!(indices, (0..40).collect::<Vec<_>>());

    let values: Vec<Value> = seen.into_iter().map(|(_, value)| value).collect();
    assert!(group.contains_all(&values));
}

#[test]
fn test_range_stop_is_respected() {
    let group = TypedSetGroup::from_values((0..100i32).map(Value::from).chain(
        (0..100i32).map(|i| Value::from(f64::from(i) + 0.5)),
    ));
    let visited = AtomicUsize::new(0);

    group.range(|index, _| {
        if index >= 10 {
            return false;
        }
        visited.fetch_add(1, Ordering::SeqCst);
        true
    });

    assert_eq!(visited.load(Ordering::SeqCst), 10);
}

#[test]
fn test_display_and_debug() {
    let group = TypedSetGroup::from_values([7]);
    assert_eq!(group.to_string(), "TypedSetGroup[7]");
    assert!(format!("{:?}", group).contains("TypedSetGroup"));
}

#[test]
fn test_default_implementation() {
    let group = TypedSetGroup::default();
    assert!(group.is_empty());
    assert!(!group.options().is_strict());
}
