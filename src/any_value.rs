use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A type-erased set element that preserves its type information
///
/// `AnyValue` lets user-defined types take part in a set next to the built-in
/// [`Value`](crate::Value) variants. The `Eq + Hash` bounds on [`AnyValue::new`]
/// are the admissibility check: a type that cannot be compared or hashed
/// cannot be wrapped in the first place.
///
/// Two `AnyValue`s are equal only when they hold the same concrete type and
/// the concrete values compare equal.
///
/// # Examples
///
/// ```
/// use sovran_set::AnyValue;
///
/// #[derive(Debug, PartialEq, Eq, Hash)]
/// struct Point { x: i32, y: i32 }
///
/// let a = AnyValue::new(Point { x: 1, y: 2 });
/// let b = AnyValue::new(Point { x: 1, y: 2 });
/// assert_eq!(a, b);
/// assert!(a.is_type::<Point>());
/// assert_eq!(a.downcast_ref::<Point>().map(|p| p.x), Some(1));
/// ```
#[derive(Clone)]
pub struct AnyValue {
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
    eq: fn(&dyn Any, &dyn Any) -> bool,
    hash: fn(&dyn Any, &mut dyn Hasher),
    debug: fn(&dyn Any, &mut fmt::Formatter<'_>) -> fmt::Result,
}

fn eq_erased<T: Eq + 'static>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn hash_erased<T: Hash + 'static>(value: &dyn Any, mut state: &mut dyn Hasher) {
    if let Some(value) = value.downcast_ref::<T>() {
        value.hash(&mut state);
    }
}

fn debug_erased<T: fmt::Debug + 'static>(
    value: &dyn Any,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => value.fmt(f),
        None => f.write_str("<?>"),
    }
}

impl AnyValue {
    /// Wrap a value of any comparable, hashable, thread-safe type
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Eq + Hash + fmt::Debug + Send + Sync,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
            eq: eq_erased::<T>,
            hash: hash_erased::<T>,
            debug: debug_erased::<T>,
        }
    }

    /// Check if the contained value is of type T
    pub fn is_type<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Get a reference to the contained value if it is of type T
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// The `TypeId` of the wrapped value
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The fully qualified name of the wrapped type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && (self.eq)(&*self.value, &*other.value)
    }
}

impl Eq for AnyValue {}

impl Hash for AnyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        (self.hash)(&*self.value, state);
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.debug)(&*self.value, f)
    }
}
