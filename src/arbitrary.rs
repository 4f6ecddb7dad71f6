//! quickcheck generators for set elements and sets.
//!
//! Generated values are drawn from a small domain so that independently
//! generated sets overlap often enough to exercise intersections and
//! differences.

use crate::set::Set;
use crate::value::Value;
use quickcheck::{Arbitrary, Gen};

const DOMAIN: u8 = 16;

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Value {
        let n = u8::arbitrary(g) % DOMAIN;
        match u8::arbitrary(g) % 6 {
            0 => Value::Int(i64::from(n)),
            1 => Value::Uint(u64::from(n)),
            2 => Value::Float(f64::from(n) / 2.0),
            3 => Value::from(format!("s{}", n)),
            4 => Value::Bool(n % 2 == 0),
            _ => Value::Nil,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Value>> {
        match self {
            Value::Int(v) => Box::new(v.shrink().map(Value::Int)),
            Value::Uint(v) => Box::new(v.shrink().map(Value::Uint)),
            Value::Nil => quickcheck::empty_shrinker(),
            _ => quickcheck::single_shrinker(Value::Nil),
        }
    }
}

impl Arbitrary for Set {
    fn arbitrary(g: &mut Gen) -> Set {
        let values: Vec<Value> = Arbitrary::arbitrary(g);
        Set::from_values(values)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Set>> {
        Box::new(self.elements().shrink().map(Set::from_values))
    }
}
