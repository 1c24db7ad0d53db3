use crate::list::cursor::{Cursor, CursorBackIter, CursorIter};
use crate::list::{element, next_of, prev_of, List, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// The element nodes `start..end` not yet yielded by an [`Iter`] or [`IterMut`].
struct Span<T> {
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    len: usize,
}

impl<T> Span<T> {
    fn of(list: &List<T>) -> Self {
        Span {
            start: list.front_node(),
            end: list.ghost_node(),
            len: list.len(),
        }
    }

    fn take_front(&mut self) -> Option<NonNull<Node<T>>> {
        if self.len == 0 {
            return None;
        }
        let node = self.start;
        // SAFETY: the span is not empty, so `start` is an element node.
        self.start = unsafe { next_of(node) };
        self.len -= 1;
        Some(node)
    }

    fn take_back(&mut self) -> Option<NonNull<Node<T>>> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the span is not empty, so `end.prev` is an element node.
        self.end = unsafe { prev_of(self.end) };
        self.len -= 1;
        Some(self.end)
    }
}

impl<T> Clone for Span<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<T> {}

/// A borrowing iterator over the elements of a `List`, front to back.
///
/// It is double-ended, knows its exact length and stops at the ghost node
/// from either side. The list stays borrowed while the iterator lives:
///
/// ```compile_fail
/// use ring_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            span: Span::of(list),
            _marker: PhantomData,
        }
    }
}

// Cloning an iterator copies its position only, so `T: Clone` is not needed.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            span: self.span,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rest: Vec<&T> = self.clone().collect();
        f.debug_tuple("Iter").field(&rest).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        // SAFETY: the node is an element node of the list borrowed for `'a`.
        self.span.take_front().map(|node| unsafe { element(node) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len, Some(self.span.len))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        // SAFETY: see `next`.
        self.span.take_back().map(|node| unsafe { element(node) })
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// Only the elements are writable, the links of the list are not. Every node
/// leaves the span once, so no element is ever handed out twice.
///
/// ```compile_fail
/// use ring_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            span: Span::of(list),
            _marker: PhantomData,
        }
    }

    /// A shared view of the elements not yielded yet.
    fn rest(&self) -> Iter<'_, T> {
        Iter {
            span: self.span,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rest: Vec<&T> = self.rest().collect();
        f.debug_tuple("IterMut").field(&rest).finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        // SAFETY: the node left the span, so this is the only reference to it.
        self.span
            .take_front()
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len, Some(self.span.len))
    }

    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        // SAFETY: see `next`.
        self.span
            .take_back()
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An iterator that moves the elements out of a `List`, from either end.
///
/// Elements still in it are dropped with it.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("list", &self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }

    fn last(mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        for item in iter {
            list.push_back(item);
        }
        list
    }
}

/// Build a list from an array, keeping the element order.
///
/// # Examples
///
/// ```
/// use ring_list::List;
///
/// let list = List::from(['a', 'b']);
/// assert_eq!(list.front(), Some(&'a'));
/// ```
impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        List::from_iter(array)
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(vec: Vec<T>) -> Self {
        List::from_iter(vec)
    }
}

impl<T> From<List<T>> for Vec<T> {
    fn from(list: List<T>) -> Self {
        list.into_vec()
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut tail = self.cursor_end_mut();
        for item in iter {
            tail.insert(item);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<'a, T: 'a> Iterator for CursorIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.current();
        self.cursor.move_next_cyclic();
        current
    }
}

impl<'a, T: 'a> Iterator for CursorBackIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.move_prev_cyclic();
        self.cursor.current()
    }
}

/// Convert the cursor to an iterator, which is cyclic and not fused.
impl<'a, T: 'a> IntoIterator for Cursor<'a, T> {
    type Item = &'a T;
    type IntoIter = CursorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        CursorIter { cursor: self }
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
