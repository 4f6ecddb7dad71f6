use sovran_set::{Set, SetError, SetOptions, SyncSet, ToUnsync, Value};
use std::sync::Arc;
use std::thread;

fn mixed() -> Vec<Value> {
    vec![
        Value::from(1),
        Value::from(2),
        Value::from("3"),
        Value::from(4.0),
        Value::from(5.1),
    ]
}

#[test]
fn test_basic_operations() -> Result<(), SetError> {
    let mut set = Set::new();

    // Add values of different types
    set.add(42)?;
    set.add("hello")?;
    set.add(2.5)?;
    set.add(())?;

    // Check membership
    assert!(set.contains(&Value::from(42)));
    assert!(set.contains(&Value::from("hello")));
    assert!(set.contains(&Value::Nil));
    assert!(!set.contains(&Value::from(42u64)));
    assert_eq!(set.len(), 4);

    // Re-adding is harmless by default
    set.add(42)?;
    assert_eq!(set.len(), 4);

    // Remove a value
    assert!(set.remove(&Value::from("hello")));
    assert!(!set.contains(&Value::from("hello")));
    assert!(!set.remove(&Value::from("hello")));

    Ok(())
}

#[test]
fn test_concurrent_adds_of_existing_values() {
    let set = Arc::new(SyncSet::from_values(mixed()));

    // Re-add every value from its own thread
    let mut handles = vec![];
    for value in mixed() {
        let set_clone = Arc::clone(&set);
        handles.push(thread::spawn(move || set_clone.add(value)));
    }

    // Wait for all threads to complete
    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }

    for value in mixed() {
        assert!(set.contains(&value));
    }
    assert_eq!(set.len(), 5);
}

#[test]
fn test_concurrent_extend() -> Result<(), SetError> {
    let set = Arc::new(SyncSet::new());

    let mut handles = vec![];
    for chunk in 0..10 {
        let set_clone = Arc::clone(&set);
        handles.push(thread::spawn(move || {
            let start = chunk * 10;
            set_clone.extend_values(start..start + 20)
        }));
    }

    for handle in handles {
        handle.join().unwrap()?;
    }

    // Chunks overlap, so 0..110 in total
    assert_eq!(set.len(), 110);
    Ok(())
}

#[test]
fn test_concurrent_mixed_workload() {
    let set = Arc::new(SyncSet::from_values(0..100));
    let other = Arc::new(SyncSet::from_values(50..150));

    let mut handles = vec![];
    for i in 0..8 {
        let set_clone = Arc::clone(&set);
        let other_clone = Arc::clone(&other);
        handles.push(thread::spawn(move || {
            for j in 0..100 {
                match (i + j) % 4 {
                    0 => {
                        set_clone.add(1000 + j).unwrap();
                    }
                    1 => {
                        set_clone.remove(&Value::from(1000 + j));
                    }
                    2 => {
                        let _ = set_clone.unite(&*other_clone);
                    }
                    _ => {
                        let _ = other_clone.diff(&*set_clone);
                    }
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // The original elements are never touched by the workers
    for i in 0..100 {
        assert!(set.contains(&Value::from(i)));
    }
    assert_eq!(other.len(), 100);
}

#[test]
fn test_diff_scenario() {
    let a = Set::from_values(mixed());
    let b = Set::from_values(vec![
        Value::from("3"),
        Value::from(4.0),
        Value::from(5.1),
        Value::from("6.6"),
    ]);

    assert_eq!(a.diff(&b), Set::from_values([1, 2]));

    // Same result through the synchronized wrapper
    let safe_a = a.clone().into_sync();
    let safe_b = b.into_sync();
    assert_eq!(safe_a.diff(&safe_b).into_unsync(), Set::from_values([1, 2]));
}

#[test]
fn test_inadmissible_elements() {
    let mut set = Set::new();
    let safe = SyncSet::new();

    // A list inserted directly is rejected, not flattened
    let result = set.add(vec![1, 2, 3]);
    assert!(matches!(result, Err(SetError::InadmissibleElement(_))));
    let result = safe.add([1, 2, 3]);
    assert!(matches!(result, Err(SetError::InadmissibleElement(_))));

    // Membership and removal just say no
    let list = Value::from(vec![1, 2, 3]);
    assert!(!set.contains(&list));
    assert!(!safe.contains(&list));
    assert!(!set.remove(&list));

    // But the same list works as an extension source
    assert!(set.extend_from_value(list).is_ok());
    assert_eq!(set, Set::from_values([1, 2, 3]));
    assert!(safe.is_empty());
}

#[test]
fn test_user_types() -> Result<(), SetError> {
    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Point {
        x: i32,
        y: i32,
    }

    let mut set = Set::new();
    set.add(Value::any(Point { x: 1, y: 2 }))?;
    set.add(Value::any(Point { x: 1, y: 2 }))?;
    set.add(Value::any(Point { x: 2, y: 1 }))?;
    set.add(Value::tuple([1, 2]))?;

    assert_eq!(set.len(), 3);
    assert!(set.contains(&Value::any(Point { x: 2, y: 1 })));
    assert!(!set.contains(&Value::tuple([2, 1])));

    let found = set
        .iter()
        .filter_map(|value| match value {
            Value::Any(any) => any.downcast_ref::<Point>(),
            _ => None,
        })
        .count();
    assert_eq!(found, 2);
    Ok(())
}

#[test]
fn test_strict_mode_is_per_set() -> Result<(), SetError> {
    let mut strict = Set::with_options(SetOptions::strict());
    let mut lenient = Set::new();

    strict.add(1)?;
    lenient.add(1)?;

    assert_eq!(
        strict.add(1),
        Err(SetError::AlreadyExists("1".to_string()))
    );
    assert!(lenient.add(1).is_ok());

    // Extension never reports duplicates
    strict.extend(&lenient)?;
    assert_eq!(strict.len(), 1);
    Ok(())
}

#[test]
fn test_generic_operand() {
    fn overlap<S: ToUnsync>(a: &Set, b: &S) -> usize {
        a.intersect(b).len()
    }

    let a = Set::from_values(0..10);
    assert_eq!(overlap(&a, &Set::from_values(5..15)), 5);
    assert_eq!(overlap(&a, &SyncSet::from_values(8..20)), 2);
}

#[test]
fn test_error_display() {
    let inadmissible = SetError::InadmissibleElement("list".to_string());
    let exists = SetError::AlreadyExists("42".to_string());
    let unsupported = SetError::UnsupportedSource("int".to_string());

    assert_eq!(
        format!("{}", inadmissible),
        "Inadmissible set element of unhashable kind: list"
    );
    assert_eq!(format!("{}", exists), "Element already exists: 42");
    assert_eq!(
        format!("{}", unsupported),
        "Cannot extend a set from kind int, only lists and sets are supported"
    );

    // Test Debug implementation
    assert!(format!("{:?}", inadmissible).contains("InadmissibleElement"));

    // Usable as a boxed error
    let boxed: Box<dyn std::error::Error> = Box::new(exists);
    assert_eq!(boxed.to_string(), "Element already exists: 42");
}

#[test]
fn test_default_implementation() {
    let set = Set::default();
    assert!(set.is_empty());

    let safe = SyncSet::default();
    assert!(safe.is_empty());
    assert_eq!(safe.to_string(), "Set[]");
}
