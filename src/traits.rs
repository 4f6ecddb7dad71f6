use crate::set::Set;
use std::borrow::Cow;

/// Access to a set through its unsynchronized view
///
/// Every set operation that takes a second set (`diff`, `unite`, `equal`,
/// `extend`, ...) accepts any `ToUnsync` and calls `to_unsync` on it before
/// doing any work. A plain [`Set`] lends itself out. A
/// [`SyncSet`](crate::SyncSet) copies its contents under its own lock and
/// releases that lock before returning, so an operation never holds two set
/// locks at the same time.
///
/// The view of a synchronized operand is a snapshot: changes made to the
/// operand after `to_unsync` returns are not seen.
pub trait ToUnsync {
    fn to_unsync(&self) -> Cow<'_, Set>;
}

impl ToUnsync for Set {
    fn to_unsync(&self) -> Cow<'_, Set> {
        Cow::Borrowed(self)
    }
}

impl<T: ToUnsync + ?Sized> ToUnsync for &T {
    fn to_unsync(&self) -> Cow<'_, Set> {
        (**self).to_unsync()
    }
}
