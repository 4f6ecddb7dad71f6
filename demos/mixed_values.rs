use sovran_set::{Set, SetError, SetOptions, SyncSet, TypedSetGroup, Value};
use std::sync::Arc;
use std::thread;

#[derive(Debug, PartialEq, Eq, Hash)]
struct Point {
    x: i32,
    y: i32,
}

fn main() -> Result<(), SetError> {
    // A plain set holding values of different kinds
    let mut set = Set::new();
    set.add(1)?;
    set.add("one")?;
    set.add(1.5)?;
    set.add(Value::any(Point { x: 1, y: 2 }))?;
    println!("Set: {}", set);

    // Lists are not elements, but they can seed a set
    match set.add(vec![1, 2, 3]) {
        Ok(_) => println!("List added?"),
        Err(e) => println!("Rejected: {}", e),
    }
    set.extend_from_value(Value::from(vec![2, 3]))?;
    println!("After extending from a list: {} elements", set.len());

    // Algebra between sets
    let other = Set::from_values([Value::from(2), Value::from("one"), Value::from("two")]);
    println!("Union: {}", set.unite(&other));
    println!("Intersection: {}", set.intersect(&other));
    println!("Difference: {}", set.diff(&other));
    println!("Symmetric difference: {}", set.symmetric_diff(&other));

    // Strict mode reports duplicates
    let mut strict = Set::with_options(SetOptions::strict());
    strict.add("unique")?;
    if let Err(e) = strict.add("unique") {
        println!("Strict set says: {}", e);
    }

    // A synchronized set shared between threads
    let shared = Arc::new(SyncSet::new());
    let mut handles = vec![];
    for i in 0..4 {
        let shared_clone = Arc::clone(&shared);
        handles.push(thread::spawn(move || -> Result<(), SetError> {
            for j in 0..5 {
                shared_clone.add(i * 5 + j)?;
            }
            Ok(())
        }));
    }
    for handle in handles {
        if let Ok(result) = handle.join() {
            result?;
        }
    }
    println!("Shared set has {} elements", shared.len());
    println!("Shared set is a superset of the first set's ints: {}", {
        let ints = Set::from_values([1, 2, 3]);
        shared.is_superset_of(&ints)
    });

    // A group that keeps one partition per kind
    let group = TypedSetGroup::from_values(set.elements());
    group.add(["three", "four"])?;
    println!("Group kinds: {:?}", group.type_tags());
    println!("Group: {}", group);

    group.range(|index, value| {
        println!("  visited #{}: {}", index, value);
        true
    });

    Ok(())
}
