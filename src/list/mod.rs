use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ops::Range;
use std::ptr::NonNull;

use crate::error::ListError;
use crate::list::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

pub use algorithms::{Drain, DrainFilter};

/// The `List` is a doubly-linked list with owned nodes, implemented as a ring
/// anchored at a ghost (sentinel) node.
/// It allows inserting, removing and splicing elements at any given position in
/// constant time. In compromise, accessing or mutating elements at any position
/// take *O*(*n*) time.
///
/// The `List` contains:
/// - a pointer `ghost` that points to the ghost node, which is allocated with the
///   list and freed with it;
/// - a length field `len` indicating the number of elements in the ring.
///
/// Elements are never moved in memory once inserted: every algorithm of the list
/// (splice, merge, sort, unique, reverse) only rewrites links, so a reference
/// obtained before such an operation still points to the same element value.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
pub struct List<T> {
    ghost: NonNull<Node<T>>,
    /// the length of the list
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// Nodes fragment detached from a list, used in list splitting or
/// splicing.
///
/// When detached from a list, reading of `front.prev` and `back.next`
/// is invalid. A fragment must either be attached to a list again or be
/// turned into a list with [`List::from_detached`], otherwise its nodes leak.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// Read the `next` link of `node`.
///
/// It is unsafe because `node` must be a live node of some ring (the ghost
/// node included).
#[inline]
pub(crate) unsafe fn next_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).next
}

/// Read the `prev` link of `node`. See [`next_of`].
#[inline]
pub(crate) unsafe fn prev_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).prev
}

/// Borrow the element of `node`.
///
/// It is unsafe because `node` must be a live, non-ghost node, and the
/// returned lifetime must not outlive the node.
#[inline]
pub(crate) unsafe fn element<'a, T>(node: NonNull<Node<T>>) -> &'a T {
    &(*node.as_ptr()).element
}

/// Make `prev` and `next` adjacent.
///
/// Only the links are written, so the ghost node can be passed on both sides.
#[inline]
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the list).
        unsafe { next_of(self.ghost) }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the list).
        unsafe { prev_of(self.ghost) }
    }

    /// Detach a single node `node` from the list, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list.
    ///
    /// If the `node` does not belong to the list, this function call will make
    /// the list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        self.len -= 1;
        connect(prev_of(node), next_of(node));
        Box::from_raw(node.as_ptr())
    }

    /// Attach a single node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    ///
    /// If the `prev` and `next` does not belong to the list, or they are not
    /// adjacent nodes, this function call will make the list ill-formed.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Detach a range of nodes `front..=back` from the list, and return the detached
    /// nodes.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a valid range
    /// (i.e. `front` must **NOT** be at the right of `back`), whether it belongs
    /// to the list, or whether it really holds `len` nodes.
    ///
    /// If `front..=back` is not a valid range or it does not belong to the list,
    /// this function call will make the list ill-formed.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
        len: usize,
    ) -> DetachedNodes<T> {
        self.len -= len;
        connect(prev_of(front), next_of(back));
        DetachedNodes::new(front, back, len)
    }

    /// Attach a range of detached nodes to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    ///
    /// If the `prev` and `next` does not belong to the list, or they are not
    /// adjacent nodes, this function call will make the list ill-formed.
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
        self.len += detached.len;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, detached.front);
            assert_adjacent(detached.back, next);
        }
    }

    /// Detach all nodes from the list, and return the detached nodes, or return
    /// `None` if the list is empty.
    ///
    /// It is safe because `self.front_node()..=self.back_node()` is a valid range.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(self.detach_nodes(self.front_node(), self.back_node(), self.len)) }
    }

    /// Construct a list from detached nodes.
    ///
    /// It is safe because the detached nodes is guaranteed to be a valid range
    /// when construction.
    pub(crate) fn from_detached(detached: DetachedNodes<T>) -> Self {
        let mut list = List::new();
        unsafe {
            list.attach_nodes(list.ghost_node(), list.ghost_node(), detached);
        }
        list
    }

    /// Locate the node at `at`, the ghost node if `at == len`.
    fn node_at(&self, at: usize) -> NonNull<Node<T>> {
        self.cursor(at).current
    }

    /// Walk the whole ring in both directions and check it against `len`.
    #[cfg(test)]
    pub(crate) fn check_ring(&self) {
        let ghost = self.ghost_node();
        let mut node = ghost;
        let mut count = 0;
        loop {
            // SAFETY: every node reachable from the ghost node is live.
            let next = unsafe { next_of(node) };
            assert_eq!(unsafe { prev_of(next) }, node, "ring is not doubly consistent");
            node = next;
            if node == ghost {
                break;
            }
            count += 1;
            assert!(count <= self.len, "ring is longer than the recorded length");
        }
        assert_eq!(count, self.len, "ring is shorter than the recorded length");
    }
}

impl<T> List<T> {
    /// Create an empty `List`. Only its ghost node is allocated.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            ghost: new_ghost(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Create a `List` holding `n` clones of `elem`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list = List::from_elem('x', 3);
    /// assert_eq!(list.into_vec(), vec!['x', 'x', 'x']);
    /// ```
    pub fn from_elem(elem: T, n: usize) -> Self
    where
        T: Clone,
    {
        let mut list = List::new();
        list.cursor_end_mut().insert_n(n, elem);
        list
    }

    /// Whether the ring holds no element node, *O*(1).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Number of elements, *O*(1): the length is kept up to date by every
    /// edit, splices included.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let mut other = List::from([3, 4, 5]);
    /// list.append(&mut other);
    /// assert_eq!((list.len(), other.len()), (5, 0));
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Drop every element, front to back. The ghost node is kept, so the
    /// list can be reused.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// The first element, `None` for an empty list.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from(['b', 'c']);
    /// assert_eq!(list.front(), Some(&'b'));
    /// assert_eq!(list.back(), Some(&'c'));
    ///
    /// list.clear();
    /// assert_eq!((list.front(), list.back()), (None, None));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.cursor_start().current()
    }

    /// The first element, mutably.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// *list.front_mut().unwrap() += 10;
    /// *list.back_mut().unwrap() += 20;
    /// assert_eq!(list.to_vec(), vec![11, 22]);
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the front node of a non-empty list is an element node.
        Some(unsafe { &mut (*self.front_node().as_ptr()).element })
    }

    /// The last element, `None` for an empty list.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.cursor_end().previous()
    }

    /// The last element, mutably.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the back node of a non-empty list is an element node.
        Some(unsafe { &mut (*self.back_node().as_ptr()).element })
    }

    /// Like [`List::front`], but reports an empty list as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ListError};
    ///
    /// let list = List::from([7]);
    /// assert_eq!(list.try_front(), Ok(&7));
    ///
    /// let empty = List::<i32>::new();
    /// assert_eq!(empty.try_front(), Err(ListError::EmptyContainer { op: "front" }));
    /// ```
    pub fn try_front(&self) -> Result<&T, ListError> {
        self.front().ok_or(ListError::EmptyContainer { op: "front" })
    }

    /// Like [`List::back`], but reports an empty list as an error.
    pub fn try_back(&self) -> Result<&T, ListError> {
        self.back().ok_or(ListError::EmptyContainer { op: "back" })
    }

    /// Link a new node between the ghost node and the front, *O*(1).
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(2);
    /// list.push_front(1);
    /// list.push_back(3);
    /// assert_eq!(list.to_vec(), vec![1, 2, 3]);
    ///
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_back(), Some(3));
    /// assert_eq!(list.pop_back(), Some(2));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn push_front(&mut self, elt: T) {
        self.cursor_start_mut().insert(elt);
    }

    /// Unlink the front node and return its element, *O*(1).
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.cursor_start_mut().remove()
    }

    /// Like [`List::pop_front`], but reports an empty list as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ListError};
    ///
    /// let mut list = List::from([1]);
    /// assert_eq!(list.try_pop_front(), Ok(1));
    /// assert_eq!(
    ///     list.try_pop_front(),
    ///     Err(ListError::EmptyContainer { op: "pop_front" })
    /// );
    /// ```
    pub fn try_pop_front(&mut self) -> Result<T, ListError> {
        self.pop_front().ok_or(ListError::EmptyContainer { op: "pop_front" })
    }

    /// Link a new node between the back and the ghost node, *O*(1).
    pub fn push_back(&mut self, elt: T) {
        self.cursor_end_mut().insert(elt);
    }

    /// Unlink the back node and return its element, *O*(1).
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.cursor_end_mut().backspace()
    }

    /// Like [`List::pop_back`], but reports an empty list as an error.
    pub fn try_pop_back(&mut self) -> Result<T, ListError> {
        self.pop_back().ok_or(ListError::EmptyContainer { op: "pop_back" })
    }

    /// A read-only cursor at position `at`, where `at == len` is the ghost
    /// node. The seek starts from whichever end of the ring is closer.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.cursor(1).current(), Some(&2));
    /// assert_eq!(list.cursor(3).current(), None);
    /// assert_eq!(list.cursor_start().current(), Some(&1));
    /// assert_eq!(list.cursor_end().previous(), Some(&3));
    /// ```
    pub fn cursor(&self, at: usize) -> Cursor<'_, T> {
        assert!(at <= self.len, "Cannot create cursor at a nonexistent index");
        let mut cursor = self.cursor_start();
        cursor
            .seek_to(at)
            .expect("Cannot create cursor at a nonexistent index");
        cursor
    }

    /// A read-only cursor at the front, or at the ghost node when empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node(), 0)
    }

    /// A read-only cursor at the ghost node.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.ghost_node(), self.len)
    }

    /// An editing cursor at position `at`, where `at == len` is the ghost
    /// node.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// if let Some(x) = list.cursor_mut(1).current_mut() {
    ///     *x *= 5;
    /// }
    /// if let Some(x) = list.cursor_end_mut().previous_mut() {
    ///     *x = 0;
    /// }
    /// list.cursor_start_mut().insert(9);
    /// assert_eq!(list.to_vec(), vec![9, 1, 10, 0]);
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> CursorMut<'_, T> {
        assert!(at <= self.len, "Cannot create cursor at a nonexistent index");
        let mut cursor = self.cursor_start_mut();
        cursor
            .seek_to(at)
            .expect("Cannot create cursor at a nonexistent index");
        cursor
    }

    /// An editing cursor at the front, or at the ghost node when empty.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front, 0)
    }

    /// An editing cursor at the ghost node. Inserting through it appends.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let (ghost, len) = (self.ghost_node(), self.len);
        CursorMut::new(self, ghost, len)
    }

    /// Borrowing iterator, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Borrowing iterator over mutable elements, front to back.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(list.iter().rev().collect::<Vec<_>>(), vec![&12, &11, &10]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Relink every node of `other` after the back of `self` in *O*(1),
    /// leaving `other` empty. No element is moved or copied.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from(['b']);
    /// let mut tail = List::from(['c', 'd']);
    /// let mut head = List::from(['a']);
    ///
    /// list.append(&mut tail);
    /// list.prepend(&mut head);
    /// assert_eq!(list.into_vec(), vec!['a', 'b', 'c', 'd']);
    /// assert!(tail.is_empty() && head.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: the back node and the ghost node are adjacent.
            unsafe { self.attach_nodes(self.back_node(), self.ghost_node(), detached) }
        }
    }

    /// Relink every node of `other` before the front of `self` in *O*(1),
    /// leaving `other` empty.
    pub fn prepend(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: the ghost node and the front node are adjacent.
            unsafe { self.attach_nodes(self.ghost_node(), self.front_node(), detached) }
        }
    }

    /// Cut the list before position `at` and return the tail `at..len`.
    /// Finding `at` is *O*(*n*), the cut itself *O*(1).
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// assert_eq!(list.split_off(1).into_vec(), vec![2, 3]);
    /// assert!(list.split_off(1).is_empty());
    /// assert_eq!(list.into_vec(), vec![1]);
    /// ```
    pub fn split_off(&mut self, at: usize) -> List<T> {
        assert!(at <= self.len, "Cannot split off at a nonexistent index");
        if at == self.len {
            return List::new();
        }
        self.cursor_mut(at).split().unwrap_or_default()
    }

    /// Unlink the node at position `at` and return its element.
    ///
    /// # Panics
    ///
    /// Panics if `at >= len`.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([3, 2, 1]);
    /// assert_eq!(list.remove_at(1), 2);
    /// assert_eq!(list.remove_at(0), 3);
    /// assert_eq!(list.into_vec(), vec![1]);
    /// ```
    pub fn remove_at(&mut self, at: usize) -> T {
        assert!(at < self.len, "Cannot remove at an index outside of the list bounds");
        self.cursor_mut(at)
            .remove()
            .expect("Cannot remove at an index outside of the list bounds")
    }

    /// Removes the elements in the index range `range` and returns how many
    /// were removed.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `range.start > range.end` or `range.end > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..10);
    /// assert_eq!(list.erase(2..7), 5);
    /// assert_eq!(list.into_vec(), vec![0, 1, 7, 8, 9]);
    /// ```
    pub fn erase(&mut self, range: Range<usize>) -> usize {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "Cannot erase a range outside of the list bounds"
        );
        self.cursor_mut(range.start).remove_n(range.len())
    }

    /// Adds an element at the given index in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    ///
    /// list.insert(2, 4);
    /// list.insert(4, 5);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert(&mut self, at: usize, elm: T) {
        assert!(at <= self.len, "Cannot insert at an index outside of the list bounds");

        self.cursor_mut(at).insert(elm);
    }

    /// Adds `count` clones of `elem` at the given index in the list, and
    /// returns the number of inserted elements.
    ///
    /// If a clone panics, the elements inserted so far are removed again before
    /// the panic propagates.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 5]);
    /// assert_eq!(list.insert_n(1, 3, 0), 3);
    /// assert_eq!(list.into_vec(), vec![1, 0, 0, 0, 5]);
    /// ```
    pub fn insert_n(&mut self, at: usize, count: usize, elem: T) -> usize
    where
        T: Clone,
    {
        assert!(at <= self.len, "Cannot insert at an index outside of the list bounds");

        self.cursor_mut(at).insert_n(count, elem)
    }

    /// Adds the elements of `iter` at the given index in the list, in order,
    /// and returns the number of inserted elements.
    ///
    /// If the iterator panics, the elements inserted so far are removed again
    /// before the panic propagates.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 5]);
    /// assert_eq!(list.insert_iter(1, 2..5), 3);
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_iter<I>(&mut self, at: usize, iter: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        assert!(at <= self.len, "Cannot insert at an index outside of the list bounds");

        self.cursor_mut(at).insert_iter(iter)
    }

    /// Splices another list at the given index. `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time to locate `at`; the
    /// transfer itself is *O*(1).
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut other = List::from([4, 5, 6]);
    ///
    /// list.splice_at(2, &mut other);
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 4, 5, 6, 3]);
    /// ```
    pub fn splice_at(&mut self, at: usize, other: &mut Self) {
        assert!(at <= self.len, "Cannot splice at a nonexistent node");
        let mut cursor_mut = self.cursor_start_mut();
        cursor_mut
            .seek_forward(at)
            .expect("Cannot splice at a nonexistent node");
        cursor_mut.splice(other);
    }

    /// Moves the elements in the index range `range` of this list so that they
    /// are placed right before the element at `at` (or at the end if
    /// `at == len`). No element is copied or moved in memory.
    ///
    /// `at == range.start` and `at == range.end` leave the list unchanged, as
    /// does an empty range.
    ///
    /// # Errors
    ///
    /// - [`ListError::OutOfBounds`] if any index is greater than `len`;
    /// - [`ListError::InvalidRange`] if `range.start > range.end`;
    /// - [`ListError::OverlappingSplice`] if `at` lies strictly inside `range`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::{List, ListError};
    ///
    /// let mut list = List::from_iter(0..6);
    /// list.splice_within(0, 4..6).unwrap();
    /// assert_eq!(list.to_vec(), vec![4, 5, 0, 1, 2, 3]);
    ///
    /// list.splice_within(6, 0..1).unwrap();
    /// assert_eq!(list.to_vec(), vec![5, 0, 1, 2, 3, 4]);
    ///
    /// assert_eq!(
    ///     list.splice_within(2, 1..4),
    ///     Err(ListError::OverlappingSplice { at: 2, start: 1, end: 4 })
    /// );
    /// ```
    pub fn splice_within(&mut self, at: usize, range: Range<usize>) -> Result<(), ListError> {
        let len = self.len;
        if let Some(&index) = [at, range.start, range.end].iter().find(|&&i| i > len) {
            log::debug!("splice_within: index {} is out of bounds ({})", index, len);
            return Err(ListError::OutOfBounds { index, len });
        }
        if range.start > range.end {
            log::debug!("splice_within: decreasing range {:?}", range);
            return Err(ListError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.start < at && at < range.end {
            log::debug!("splice_within: {} lies inside {:?}", at, range);
            return Err(ListError::OverlappingSplice {
                at,
                start: range.start,
                end: range.end,
            });
        }
        if range.is_empty() || at == range.start || at == range.end {
            return Ok(());
        }
        let front = self.node_at(range.start);
        let back = self.node_at(range.end - 1);
        let pos = self.node_at(at);
        log::trace!("splice_within: moving {:?} before {}", range, at);
        // SAFETY: `front..=back` is a valid range of `range.len()` nodes, and `pos`
        // is outside of it, so it stays in the ring after detaching.
        unsafe {
            let detached = self.detach_nodes(front, back, range.len());
            self.attach_nodes(prev_of(pos), pos, detached);
        }
        Ok(())
    }

    /// Replaces the contents of the list with the elements of `iter`.
    ///
    /// Existing nodes are reused in order: their elements are replaced, the
    /// missing nodes are allocated and the surplus nodes are freed. If `iter`
    /// panics, the list keeps its previous contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// list.assign([7, 8]);
    /// assert_eq!(list.to_vec(), vec![7, 8]);
    ///
    /// list.assign(0..4);
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    /// ```
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.replace_elements(iter.into_iter().collect());
    }

    /// Swap the elements of `staged` into the nodes of `self`, front to back.
    /// Surplus nodes of `self` are freed with the replaced elements, missing
    /// ones are taken over from `staged`.
    fn replace_elements(&mut self, mut staged: List<T>) {
        let mut cursor = self.cursor_start_mut();
        let mut source = staged.cursor_start_mut();
        loop {
            match (cursor.current_mut(), source.current_mut()) {
                (Some(elem), Some(new)) => std::mem::swap(elem, new),
                _ => break,
            }
            cursor.move_next_cyclic();
            source.move_next_cyclic();
        }
        // At most one of them is left with nodes.
        cursor.split();
        cursor.splice_range(&mut source, usize::MAX);
    }

    /// Replaces the contents of the list with `count` clones of `elem`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// list.assign_elem(2, 9);
    /// assert_eq!(list.to_vec(), vec![9, 9]);
    /// ```
    pub fn assign_elem(&mut self, count: usize, elem: T)
    where
        T: Clone,
    {
        self.assign(std::iter::repeat(elem).take(count));
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element.
    ///
    /// The links are dangling until the node is attached to a list.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        NonNull::from(Box::leak(node))
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

impl<T> DetachedNodes<T> {
    /// If is unsafe because it must be guaranteed that `front..=back` is
    /// a valid range and its length must be equal to `len`.
    unsafe fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>, len: usize) -> Self {
        let _marker = PhantomData;
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self {
            front,
            back,
            len,
            _marker,
        }
    }
}

/// Allocate the ghost node of a list.
///
/// The ghost node has the same layout as element nodes, but its payload
/// slot is never initialized nor read.
fn new_ghost<T>() -> NonNull<Node<T>> {
    let ghost = Box::new(Node::<MaybeUninit<T>> {
        next: NonNull::dangling(),
        prev: NonNull::dangling(),
        element: MaybeUninit::uninit(),
    });
    let ghost: NonNull<Node<T>> = NonNull::from(Box::leak(ghost)).cast();
    // SAFETY: `ghost` is freshly allocated, linking it to itself makes an
    // empty ring.
    unsafe { connect(ghost, ghost) };
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(next_of(prev), next);
        assert_eq!(prev_of(next), prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost node was allocated by `new_ghost` as a
        // `Node<MaybeUninit<T>>`, and the list is empty now.
        unsafe { drop(Box::from_raw(self.ghost.cast::<Node<MaybeUninit<T>>>().as_ptr())) }
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ListError;
    use crate::list::List;
    use std::cell::RefCell;
    use std::fmt::Debug;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn list_drops_elements_front_to_back() {
        struct Noisy<'a>(u8, &'a RefCell<Vec<u8>>);
        impl Drop for Noisy<'_> {
            fn drop(&mut self) {
                self.1.borrow_mut().push(self.0);
            }
        }

        let log = RefCell::new(Vec::new());
        let mut list = List::new();
        for tag in [2, 3] {
            list.push_back(Noisy(tag, &log));
        }
        list.push_front(Noisy(1, &log));
        drop(list.pop_back());
        assert_eq!(*log.borrow(), [3]);
        drop(list);
        assert_eq!(*log.borrow(), [3, 1, 2]);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert_eq!((list.front(), list.back()), (None, None));
        assert_eq!((list.pop_front(), list.pop_back()), (None, None));
        list.check_ring();

        // Each step: push at one end, then the expected (front, back, len).
        let steps = [
            (true, 1, (1, 1, 1)),
            (false, 2, (2, 1, 2)),
            (true, 3, (2, 3, 3)),
        ];
        for (at_back, value, (front, back, len)) in steps {
            if at_back {
                list.push_back(value);
            } else {
                list.push_front(value);
            }
            assert_eq!((list.front(), list.back()), (Some(&front), Some(&back)));
            assert_eq!(list.len(), len);
        }
        if let Some(back) = list.back_mut() {
            *back = 30;
        }
        assert_eq!(list.pop_back(), Some(30));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
        assert_eq!(list.pop_front(), None);
        list.check_ring();
    }

    #[test]
    fn list_try_accessors() {
        let mut list = List::from([1, 2]);
        assert_eq!(list.try_front(), Ok(&1));
        assert_eq!(list.try_back(), Ok(&2));
        assert_eq!(list.try_pop_back(), Ok(2));
        assert_eq!(list.try_pop_front(), Ok(1));

        assert_eq!(list.try_front(), Err(ListError::EmptyContainer { op: "front" }));
        assert_eq!(list.try_back(), Err(ListError::EmptyContainer { op: "back" }));
        assert_eq!(list.try_pop_front(), Err(ListError::EmptyContainer { op: "pop_front" }));
        assert_eq!(list.try_pop_back(), Err(ListError::EmptyContainer { op: "pop_back" }));
        list.check_ring();
    }

    #[test]
    fn list_insert_and_remove() {
        fn list_eq<T, I>(list: &List<T>, expected: I)
        where
            T: Debug + Clone + Eq,
            I: IntoIterator<Item = T>,
        {
            list.check_ring();
            assert_eq!(Vec::from_iter(list.iter().cloned()), Vec::from_iter(expected));
        }

        let mut list = List::from_iter(0..10);
        list.insert(5, 10);
        list_eq(&list, (0..5).chain(Some(10)).chain(5..10));

        assert_eq!(list.remove_at(10), 9);
        assert_eq!(list.back(), Some(&8));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9));

        list.insert(0, 11);
        assert_eq!(list.front(), Some(&11));
        list_eq(&list, (11..=11).chain((0..5).chain(Some(10)).chain(5..9)));

        assert_eq!(list.remove_at(0), 11);
        assert_eq!(list.front(), Some(&0));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9));

        list.insert(10, 12);
        assert_eq!(list.back(), Some(&12));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9).chain(Some(12)));

        assert_eq!(list.insert_n(1, 2, 7), 2);
        list_eq(&list, [0, 7, 7, 1, 2, 3, 4, 10, 5, 6, 7, 8, 12]);

        assert_eq!(list.erase(0..3), 3);
        list_eq(&list, [1, 2, 3, 4, 10, 5, 6, 7, 8, 12]);

        assert_eq!(list.erase(4..4), 0);
        assert_eq!(list.erase(4..10), 6);
        list_eq(&list, [1, 2, 3, 4]);

        assert_eq!(list.insert_iter(4, [5, 6]), 2);
        list_eq(&list, 1..7);
    }

    #[test]
    #[should_panic(expected = "Cannot erase a range outside of the list bounds")]
    fn list_erase_out_of_bounds() {
        let mut list = List::from_iter(0..3);
        list.erase(1..4);
    }

    #[test]
    fn list_split_append_prepend() {
        // (head, tail): `head.append(tail)` and `tail.prepend(head)` both give
        // `head ++ tail`, and `split_off(head.len())` undoes it.
        let cases: [(&[i32], &[i32]); 6] = [
            (&[0, 1, 2], &[3, 4]),
            (&[0, 1, 2], &[]),
            (&[], &[3, 4]),
            (&[], &[]),
            (&[0], &[1]),
            (&[0, 1, 2, 3, 4], &[5]),
        ];
        for (head, tail) in cases {
            let whole: Vec<i32> = head.iter().chain(tail).copied().collect();

            let mut list = List::from_iter(head.iter().copied());
            let mut other = List::from_iter(tail.iter().copied());
            list.append(&mut other);
            assert!(other.is_empty());
            assert_eq!((list.to_vec(), list.len()), (whole.clone(), whole.len()));
            let back = list.split_off(head.len());
            assert_eq!((list.to_vec(), back.to_vec()), (head.to_vec(), tail.to_vec()));
            list.check_ring();
            back.check_ring();

            let mut list = List::from_iter(tail.iter().copied());
            let mut other = List::from_iter(head.iter().copied());
            list.prepend(&mut other);
            assert!(other.is_empty());
            assert_eq!((list.to_vec(), list.len()), (whole.clone(), whole.len()));
            list.check_ring();
        }
    }

    #[test]
    fn list_splice() {
        // (list, other, at, result)
        let cases: [(&[i32], &[i32], usize, &[i32]); 8] = [
            (&[0, 1, 2], &[7, 8], 3, &[0, 1, 2, 7, 8]),
            (&[0, 1, 2], &[7, 8], 1, &[0, 7, 8, 1, 2]),
            (&[0, 1, 2], &[7, 8], 0, &[7, 8, 0, 1, 2]),
            (&[0, 1, 2], &[7], 2, &[0, 1, 7, 2]),
            (&[0, 1, 2], &[], 1, &[0, 1, 2]),
            (&[0], &[7, 8], 1, &[0, 7, 8]),
            (&[], &[7, 8], 0, &[7, 8]),
            (&[], &[], 0, &[]),
        ];
        for (list, other, at, expected) in cases {
            let mut list = List::from_iter(list.iter().copied());
            let mut other = List::from_iter(other.iter().copied());
            list.splice_at(at, &mut other);
            assert!(other.is_empty());
            assert_eq!(list.to_vec(), expected);
            assert_eq!(list.len(), expected.len());
            list.check_ring();
            other.check_ring();
        }
    }

    #[test]
    fn list_splice_within() {
        fn test_splice_within(
            len: i32,
            at: usize,
            range: std::ops::Range<usize>,
            expected: &[i32],
        ) {
            let mut list = List::from_iter(0..len);
            let addresses: Vec<*const i32> = list.iter().map(|e| e as *const i32).collect();
            assert_eq!(list.splice_within(at, range), Ok(()));
            list.check_ring();
            assert_eq!(list.to_vec(), expected);
            // Nodes are relinked, never reallocated.
            for element in list.iter() {
                assert_eq!(addresses[*element as usize], element as *const i32);
            }
        }
        test_splice_within(5, 0, 2..3, &[2, 0, 1, 3, 4]);
        test_splice_within(5, 5, 0..2, &[2, 3, 4, 0, 1]);
        test_splice_within(5, 1, 3..5, &[0, 3, 4, 1, 2]);
        test_splice_within(5, 4, 0..3, &[3, 0, 1, 2, 4]);
        test_splice_within(5, 0, 0..5, &[0, 1, 2, 3, 4]);
        test_splice_within(5, 5, 0..5, &[0, 1, 2, 3, 4]);
        // moving a node to its own place is a no-op
        test_splice_within(5, 2, 2..3, &[0, 1, 2, 3, 4]);
        test_splice_within(5, 3, 2..3, &[0, 1, 2, 3, 4]);
        test_splice_within(5, 1, 3..3, &[0, 1, 2, 3, 4]);
        test_splice_within(1, 1, 0..1, &[0]);
        test_splice_within(0, 0, 0..0, &[]);
    }

    #[test]
    fn list_splice_within_errors() {
        let mut list = List::from_iter(0..4);
        assert_eq!(list.splice_within(5, 0..1), Err(ListError::OutOfBounds { index: 5, len: 4 }));
        assert_eq!(list.splice_within(0, 2..6), Err(ListError::OutOfBounds { index: 6, len: 4 }));
        assert_eq!(list.splice_within(0, 3..1), Err(ListError::InvalidRange { start: 3, end: 1 }));
        assert_eq!(
            list.splice_within(2, 1..3),
            Err(ListError::OverlappingSplice {
                at: 2,
                start: 1,
                end: 3
            })
        );
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
        list.check_ring();
    }

    #[test]
    fn list_len_tracks_every_edit() {
        let mut list = List::from_iter(0..5);
        let edits: [(fn(&mut List<i32>), usize); 9] = [
            (|l| l.push_back(5), 6),
            (|l| assert_eq!(l.remove_at(3), 3), 5),
            (|l| l.splice_at(1, &mut List::from([8, 9])), 7),
            (|l| assert_eq!(l.split_off(4).len(), 3), 4),
            (|l| l.prepend(&mut List::from([6])), 5),
            (|l| assert_eq!(l.splice_within(0, 3..5), Ok(())), 5),
            (|l| assert_eq!(l.erase(1..3), 2), 3),
            (|l| assert_eq!(l.insert_n(0, 4, 1), 4), 7),
            (|l| l.clear(), 0),
        ];
        for (edit, len) in edits {
            edit(&mut list);
            assert_eq!(list.len(), len);
            assert_eq!(list.iter().count(), len);
            assert_eq!(list.is_empty(), len == 0);
            list.check_ring();
        }
    }

    #[test]
    fn list_assign_reuses_nodes() {
        let mut list = List::from([1, 2, 3]);
        let front = list.front().unwrap() as *const i32;

        list.assign([4, 5]);
        assert_eq!(list.to_vec(), vec![4, 5]);
        assert_eq!(list.front().unwrap() as *const i32, front);
        list.check_ring();

        list.assign(6..10);
        assert_eq!(list.to_vec(), vec![6, 7, 8, 9]);
        assert_eq!(list.front().unwrap() as *const i32, front);
        list.check_ring();

        list.assign_elem(0, 1);
        assert!(list.is_empty());
        list.check_ring();
    }

    #[test]
    fn list_assign_keeps_contents_on_panic() {
        let mut list = List::from([1, 2, 3]);
        let front = list.front().unwrap() as *const i32;
        let result = catch_unwind(AssertUnwindSafe(|| {
            list.assign((10..).map(|x| if x == 14 { panic!("source failed") } else { x }));
        }));
        assert!(result.is_err());
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.front().unwrap() as *const i32, front);
        list.check_ring();

        let mut list = List::from([String::from("a")]);
        let shared = String::from("z");
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut clones = 0;
            list.assign(std::iter::repeat_with(|| {
                clones += 1;
                if clones == 3 {
                    panic!("clone failed");
                }
                shared.clone()
            }));
        }));
        assert!(result.is_err());
        assert_eq!(list.to_vec(), vec![String::from("a")]);
        list.check_ring();
    }

    #[test]
    fn list_from_elem() {
        let list = List::from_elem(String::from("ab"), 3);
        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|s| s == "ab"));
        assert!(List::from_elem(0u8, 0).is_empty());
    }

    #[test]
    fn list_move_and_swap() {
        let mut a = List::from([1, 2, 3]);
        let mut b = List::from([4]);
        let front = a.front().unwrap() as *const i32;

        std::mem::swap(&mut a, &mut b);
        assert_eq!(a.to_vec(), vec![4]);
        assert_eq!(b.front().unwrap() as *const i32, front);
        a.check_ring();
        b.check_ring();

        let moved = std::mem::take(&mut b);
        assert!(b.is_empty());
        b.check_ring();
        assert_eq!(moved.to_vec(), vec![1, 2, 3]);
        assert_eq!(moved.front().unwrap() as *const i32, front);
        moved.check_ring();
    }
}
