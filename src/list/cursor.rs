use crate::error::ListError;
use crate::list::{next_of, prev_of, List, Node};
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ptr::NonNull;

/// A read-only position in a `List`.
///
/// A list of length *n* has *n* + 1 positions: `0..n` are its elements and
/// `n` is the ghost node, where [`current`](Cursor::current) is `None`. The
/// cyclic moves step over the ghost node onto the other end, the plain moves
/// stop there.
///
/// ```
/// use ring_list::{List, ListError};
///
/// // Positions of ['A', 'B', 'C'] are 0, 1, 2 and the ghost node at 3.
/// let list = List::from(['A', 'B', 'C']);
///
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
/// assert_eq!(cursor.move_prev(), Err(ListError::GhostBoundary));
/// cursor.move_prev_cyclic();
/// assert_eq!((cursor.index(), cursor.current()), (3, None));
/// assert_eq!(cursor.previous(), Some(&'C'));
///
/// assert!(cursor.seek_to(1).is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
/// ```
pub struct Cursor<'a, T: 'a> {
    index: usize,
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a List<T>,
}

// A cursor is a position, cloning it never touches the elements.
impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            current: self.current,
            list: self.list,
        }
    }
}

/// Two cursors are equal when they sit on the same node of the same list.
///
/// ```
/// use ring_list::List;
///
/// let list = List::from([1, 2, 3]);
/// let copy = list.clone();
/// assert_eq!(list.cursor(1), list.cursor(1));
/// assert_ne!(list.cursor(1), list.cursor(2));
/// assert_ne!(list.cursor(1), copy.cursor(1));
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list_with(other) && self.current == other.current
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// Cursors of the same list are ordered by position, the ghost node last.
/// Cursors of different lists are not comparable.
///
/// ```
/// use ring_list::List;
///
/// let list = List::from([1, 2, 3]);
/// assert!(list.cursor_start() < list.cursor_end());
/// assert_eq!(list.cursor_start().partial_cmp(&List::new().cursor_start()), None);
/// ```
impl<'a, T: 'a> PartialOrd for Cursor<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_list_with(other) {
            return None;
        }
        Some(self.index.cmp(&other.index))
    }
}

/// A position in a `List` that can edit the list around it.
///
/// It moves like a [`Cursor`]. Elements borrowed through it live only as long
/// as that borrow of the cursor, so editing can never invalidate a reference
/// that is still in use. [`view`](CursorMut::view) lends out the whole list
/// the same way.
///
/// Edits made through the cursor keep it on the same node; if that node is
/// removed or moved away, the cursor goes on to the node that followed it.
/// The cursor holds the only borrow of its list while it lives:
///
/// ```compile_fail
/// use ring_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    index: usize,
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current == self.list.ghost_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.list.ghost_node()
            }
            pub(crate) fn next_node(&self) -> NonNull<Node<T>> {
                // SAFETY: every node of the ring, the ghost included, has a next.
                unsafe { next_of(self.current) }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: every node of the ring, the ghost included, has a prev.
                unsafe { prev_of(self.current) }
            }

            /// Walk `steps` nodes forward. The caller makes sure the walk does
            /// not pass the ghost node, or `index` goes wrong.
            unsafe fn seek_forward_fast(&mut self, steps: usize) {
                for _ in 0..steps {
                    self.current = next_of(self.current);
                }
                self.index += steps;
            }

            /// Walk `steps` nodes backward, see `seek_forward_fast`.
            unsafe fn seek_backward_fast(&mut self, steps: usize) {
                for _ in 0..steps {
                    self.current = prev_of(self.current);
                }
                self.index -= steps;
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Position of the cursor, `len()` on the ghost node.
            pub fn index(&self) -> usize {
                self.index
            }

            /// See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// See [`List::len`].
            pub fn len(&self) -> usize {
                self.list.len()
            }

            /// Step forward, from the back onto the ghost node and from the
            /// ghost node onto the front. No-op on an empty list.
            ///
            /// ```
            /// use ring_list::List;
            ///
            /// let list = List::from([1, 2]);
            /// let mut cursor = list.cursor(1);
            /// cursor.move_next_cyclic();
            /// assert_eq!(cursor.current(), None);
            /// cursor.move_next_cyclic();
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                self.index = if self.is_ghost_node() {
                    0
                } else {
                    self.index + 1
                };
                self.current = self.next_node();
            }

            /// Step backward, from the front onto the ghost node and from the
            /// ghost node onto the back. No-op on an empty list.
            pub fn move_prev_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                self.index = if self.is_front_node() {
                    self.len()
                } else {
                    self.index - 1
                };
                self.current = self.prev_node();
            }

            /// Step forward unless the cursor is on the ghost node.
            ///
            /// ```
            /// use ring_list::{List, ListError};
            ///
            /// let list = List::from([1]);
            /// let mut cursor = list.cursor_start();
            /// assert_eq!(cursor.move_next(), Ok(()));
            /// assert_eq!(cursor.move_next(), Err(ListError::GhostBoundary));
            /// assert_eq!(cursor.index(), 1);
            /// ```
            pub fn move_next(&mut self) -> Result<(), ListError> {
                if self.is_ghost_node() {
                    return Err(ListError::GhostBoundary);
                }
                self.move_next_cyclic();
                Ok(())
            }

            /// Step backward unless the cursor is on the front node (or on the
            /// ghost node of an empty list).
            pub fn move_prev(&mut self) -> Result<(), ListError> {
                if self.is_front_node() {
                    return Err(ListError::GhostBoundary);
                }
                self.move_prev_cyclic();
                Ok(())
            }

            /// Take up to `steps` forward steps, stopping at the ghost node.
            /// A short walk reports the number of steps it took.
            ///
            /// ```
            /// use ring_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            /// assert_eq!(cursor.seek_forward(2), Ok(()));
            /// assert_eq!(cursor.seek_forward(5), Err(1));
            /// assert_eq!(cursor.index(), 3);
            /// assert_eq!(cursor.seek_backward(9), Err(3));
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), usize> {
                let room = self.len() - self.index;
                // SAFETY: at most `room` steps keep the walk before the ghost node.
                unsafe { self.seek_forward_fast(steps.min(room)) };
                if steps > room {
                    return Err(room);
                }
                Ok(())
            }

            /// Take up to `steps` backward steps, stopping at the front node.
            /// A short walk reports the number of steps it took.
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), usize> {
                let room = self.index;
                // SAFETY: at most `index` steps keep the walk after the ghost node.
                unsafe { self.seek_backward_fast(steps.min(room)) };
                if steps > room {
                    return Err(room);
                }
                Ok(())
            }

            /// Jump to position `target`, walking from whichever of the front,
            /// the cursor and the ghost node is closest. When `target > len`
            /// the cursor stays put and the excess is returned.
            ///
            /// ```
            /// use ring_list::List;
            ///
            /// let list = List::from_iter(0..100);
            /// let mut cursor = list.cursor(40);
            /// assert!(cursor.seek_to(98).is_ok());
            /// assert_eq!(cursor.current(), Some(&98));
            /// assert_eq!(cursor.seek_to(103), Err(3));
            /// assert_eq!(cursor.index(), 98);
            /// ```
            pub fn seek_to(&mut self, target: usize) -> Result<(), usize> {
                let len = self.len();
                if target > len {
                    return Err(target - len);
                }
                let from_here = target.abs_diff(self.index);
                let (from_front, from_ghost) = (target, len - target);
                // SAFETY: each walk ends on `target`, which is at most `len`, so
                // none of them passes the ghost node.
                unsafe {
                    if from_here <= from_front.min(from_ghost) {
                        if target >= self.index {
                            self.seek_forward_fast(from_here);
                        } else {
                            self.seek_backward_fast(from_here);
                        }
                    } else if from_front <= from_ghost {
                        self.move_to_start();
                        self.seek_forward_fast(from_front);
                    } else {
                        self.move_to_end();
                        self.seek_backward_fast(from_ghost);
                    }
                }
                Ok(())
            }

            /// Jump to the front node (the ghost node of an empty list).
            #[inline]
            pub fn move_to_start(&mut self) {
                self.index = 0;
                self.current = self.list.front_node();
            }

            /// Jump to the ghost node.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.index = self.list.len();
                self.current = self.list.ghost_node();
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("index", &self.index)
                    .field("current", &self.current())
                    .field("list", &self.list)
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, current: NonNull<Node<T>>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    fn same_list_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list)
    }

    /// The element under the cursor, `None` on the ghost node.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list = List::from([1, 2]);
    /// let found: Vec<_> = (0..3).map(|i| list.cursor(i).current()).collect();
    /// assert_eq!(found, [Some(&1), Some(&2), None]);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: a non-ghost node holds an element, shared for `'a`.
        unsafe { Some(&(*self.current.as_ptr()).element) }
    }

    /// The element just before the cursor, `None` at the front. Walking a
    /// [`CursorBackIter`] reads elements this way.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list = List::from([1, 2]);
    /// let found: Vec<_> = (0..3).map(|i| list.cursor(i).previous()).collect();
    /// assert_eq!(found, [None, Some(&1), Some(&2)]);
    /// ```
    pub fn previous(&self) -> Option<&'a T> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: only the front node has the ghost node before it.
        Some(unsafe { &(*self.prev_node().as_ptr()).element })
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, current: NonNull<Node<T>>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    /// Link a new node holding `item` in front of `next`, which must belong
    /// to this cursor's list.
    unsafe fn insert_before(&mut self, next: NonNull<Node<T>>, item: T) -> NonNull<Node<T>> {
        let node = Node::new_detached(item);
        self.list.attach_node(prev_of(next), next, node);
        node
    }

    /// Last node of the `count` nodes starting at the cursor.
    ///
    /// `count` must be positive and must not pass the ghost node.
    fn range_back(&self, count: usize) -> NonNull<Node<T>> {
        debug_assert!(count > 0 && count <= self.list.len - self.index);
        let mut back = self.current;
        for _ in 1..count {
            // SAFETY: `back` stays inside `current..ghost` by the assertion above.
            back = unsafe { next_of(back) };
        }
        back
    }
}

// Access, the ring is left alone.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// See [`Cursor::current`]. The reference borrows the cursor.
    pub fn current(&self) -> Option<&T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: a non-ghost node holds an element.
        unsafe { Some(&(*self.current.as_ptr()).element) }
    }

    /// See [`Cursor::previous`]. The reference borrows the cursor.
    pub fn previous(&self) -> Option<&T> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: only the front node has the ghost node before it.
        Some(unsafe { &(*self.prev_node().as_ptr()).element })
    }

    /// Mutable access to the element under the cursor.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(0);
    /// if let Some(first) = cursor.current_mut() {
    ///     *first *= 5;
    /// }
    /// cursor.move_to_end();
    /// assert!(cursor.current_mut().is_none());
    /// assert_eq!(list.to_vec(), vec![5, 2, 3]);
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: a non-ghost node holds an element and the cursor is borrowed
        // mutably for as long as the reference lives.
        unsafe { Some(&mut (*self.current.as_ptr()).element) }
    }

    /// Mutable access to the element just before the cursor.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_end_mut();
    /// *cursor.previous_mut().unwrap() = 30;
    /// cursor.move_to_start();
    /// assert!(cursor.previous_mut().is_none());
    /// assert_eq!(list.to_vec(), vec![1, 2, 30]);
    /// ```
    pub fn previous_mut(&mut self) -> Option<&mut T> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: as in `previous`, and the cursor is borrowed mutably.
        Some(unsafe { &mut (*self.prev_node().as_ptr()).element })
    }

    /// A read-only copy of this position that borrows the cursor.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.current, self.index)
    }

    /// Give up the right to edit and keep the position.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.list, self.current, self.index)
    }

    /// Read the whole list without dropping the cursor.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// assert_eq!(cursor.view().back(), Some(&3));
    /// cursor.insert(4);
    /// assert_eq!(cursor.view().len(), 4);
    /// ```
    pub fn view(&self) -> &List<T> {
        self.list
    }
}

// Edits, the ring may be relinked.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// [`List::push_front`] through the cursor. The cursor stays on its node,
    /// one position further back.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let mut cursor = list.cursor_end_mut();
    /// cursor.push_front(0);
    /// assert_eq!((cursor.index(), cursor.previous()), (3, Some(&2)));
    /// assert_eq!(list.to_vec(), vec![0, 1, 2]);
    /// ```
    pub fn push_front(&mut self, item: T) {
        self.list.push_front(item);
        self.index += 1;
    }

    /// [`List::pop_front`] through the cursor. A cursor on the removed node
    /// goes on to the new front.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// assert_eq!(cursor.pop_front(), Some(1));
    /// assert_eq!((cursor.index(), cursor.current()), (0, Some(&2)));
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let is_front = self.is_front_node();
        let item = self.list.pop_front();
        if is_front {
            self.current = self.list.front_node();
        } else {
            self.index -= 1;
        }
        item
    }

    /// [`List::push_back`] through the cursor.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1]);
    /// let mut cursor = list.cursor_end_mut();
    /// cursor.push_back(2);
    /// assert_eq!((cursor.index(), cursor.current()), (2, None));
    /// assert_eq!(list.to_vec(), vec![1, 2]);
    /// ```
    pub fn push_back(&mut self, item: T) {
        // The ghost node is the only position behind the back node.
        if self.is_ghost_node() {
            self.index += 1;
        }
        self.list.push_back(item)
    }

    /// [`List::pop_back`] through the cursor. A cursor on the removed node
    /// goes on to the ghost node.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(2);
    /// assert_eq!(cursor.pop_back(), Some(3));
    /// assert_eq!((cursor.index(), cursor.current()), (2, None));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        if self.is_ghost_node() {
            self.index -= 1;
        } else if self.next_node() == self.list.ghost_node() {
            self.current = self.list.ghost_node();
        }
        self.list.pop_back()
    }

    /// Insert `item` before the cursor in *O*(1). The cursor keeps its node,
    /// so its index grows by one.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// let mut cursor = list.cursor_mut(1);
    /// cursor.insert(2);
    /// assert_eq!((cursor.index(), cursor.current()), (2, Some(&3)));
    /// cursor.move_to_end();
    /// cursor.insert(4);
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn insert(&mut self, item: T) {
        // SAFETY: `self.current` belongs to this list.
        unsafe { self.insert_before(self.current, item) };
        self.index += 1;
    }

    /// Insert everything `iter` yields before the cursor, in order, and
    /// return the count.
    ///
    /// A panic in the iterator removes what it had inserted so far, leaving
    /// the list as it was.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 5]);
    /// let mut cursor = list.cursor_mut(1);
    /// assert_eq!(cursor.insert_iter(2..5), 3);
    /// assert_eq!((cursor.index(), cursor.current()), (4, Some(&5)));
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_iter<I>(&mut self, iter: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut guard = InsertGuard {
            cursor: self,
            inserted: 0,
        };
        for item in iter {
            guard.cursor.insert(item);
            guard.inserted += 1;
        }
        guard.consume()
    }

    /// Insert `count` clones of `item` before the cursor, see
    /// [`insert_iter`](CursorMut::insert_iter).
    pub fn insert_n(&mut self, count: usize, item: T) -> usize
    where
        T: Clone,
    {
        self.insert_iter(std::iter::repeat(item).take(count))
    }

    /// Take out the element under the cursor in *O*(1). The cursor goes on
    /// to the next node and keeps its index. `None` on the ghost node.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..4);
    /// let mut cursor = list.cursor_mut(1);
    /// assert_eq!(cursor.remove(), Some(1));
    /// assert_eq!((cursor.index(), cursor.current()), (1, Some(&2)));
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    /// assert_eq!(list.to_vec(), vec![0, 2, 3]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        let current = mem::replace(&mut self.current, next);
        // SAFETY: `current` is a non-ghost node of this list.
        let node = unsafe { self.list.detach_node(current) };
        Some(Node::into_element(node))
    }

    /// Drop up to `count` elements from the cursor on, never past the ghost
    /// node, and return how many went. The cursor ends on the node after
    /// them with the same index.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..8);
    /// let mut cursor = list.cursor_mut(2);
    /// assert_eq!(cursor.remove_n(3), 3);
    /// assert_eq!(cursor.current(), Some(&5));
    /// assert_eq!(cursor.remove_n(100), 3);
    /// assert_eq!((cursor.index(), cursor.current()), (2, None));
    /// assert_eq!(list.to_vec(), vec![0, 1]);
    /// ```
    pub fn remove_n(&mut self, count: usize) -> usize {
        let count = count.min(self.list.len - self.index);
        if count == 0 {
            return 0;
        }
        let front = self.current;
        let back = self.range_back(count);
        // SAFETY: `back` is not the ghost node.
        self.current = unsafe { next_of(back) };
        // SAFETY: `front..=back` are `count` linked nodes of this list.
        let detached = unsafe { self.list.detach_nodes(front, back, count) };
        drop(List::from_detached(detached));
        count
    }

    /// Take out the element before the cursor in *O*(1), `None` at the
    /// front. The cursor keeps its node, one position nearer the front.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..4);
    /// let mut cursor = list.cursor_end_mut();
    /// assert_eq!(cursor.backspace(), Some(3));
    /// assert_eq!((cursor.index(), cursor.current()), (3, None));
    /// cursor.move_to_start();
    /// assert_eq!(cursor.backspace(), None);
    /// assert_eq!(list.to_vec(), vec![0, 1, 2]);
    /// ```
    pub fn backspace(&mut self) -> Option<T> {
        self.move_prev().ok().and_then(|_| self.remove())
    }

    /// Cut off the cursor's node and everything after it as a new list, in
    /// *O*(1). The cursor is left on the ghost node. `None` on the ghost node.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..6);
    /// let mut cursor = list.cursor_mut(4);
    /// let tail = cursor.split().unwrap();
    /// assert_eq!((cursor.index(), cursor.current()), (4, None));
    /// assert!(cursor.split().is_none());
    /// assert_eq!(tail.to_vec(), vec![4, 5]);
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    /// ```
    pub fn split(&mut self) -> Option<List<T>> {
        if self.is_ghost_node() {
            return None;
        }
        let len = self.list.len - self.index;
        let current = mem::replace(&mut self.current, self.list.ghost_node());
        // SAFETY: `current..=back` is the non-empty tail of this list.
        unsafe {
            let back = self.list.back_node();
            Some(List::from_detached(self.list.detach_nodes(current, back, len)))
        }
    }

    /// Cut off everything before the cursor as a new list, in *O*(1). The
    /// cursor becomes the front, index 0. `None` at the front.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..6);
    /// let mut cursor = list.cursor_mut(4);
    /// let head = cursor.split_before().unwrap();
    /// assert_eq!((cursor.index(), cursor.current()), (0, Some(&4)));
    /// assert_eq!(head.to_vec(), vec![0, 1, 2, 3]);
    /// assert_eq!(list.to_vec(), vec![4, 5]);
    /// ```
    pub fn split_before(&mut self) -> Option<List<T>> {
        if self.is_front_node() {
            return None;
        }
        let len = mem::replace(&mut self.index, 0);
        // SAFETY: `front..=prev` is the non-empty head of this list.
        unsafe {
            let (front, back) = (self.list.front_node(), self.prev_node());
            Some(List::from_detached(self.list.detach_nodes(front, back, len)))
        }
    }

    /// Move every node of `other` in front of the cursor, in *O*(1).
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([0, 1, 4]);
    /// let mut other = List::from([2, 3]);
    /// let mut cursor = list.cursor_mut(2);
    /// cursor.splice(&mut other);
    /// assert_eq!((cursor.index(), cursor.current()), (4, Some(&4)));
    /// assert!(other.is_empty());
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn splice(&mut self, other: &mut List<T>) {
        if let Some(detached) = other.detach_all_nodes() {
            self.index += detached.len;
            // SAFETY: the cursor's node and its prev are adjacent in this list.
            unsafe { self.list.attach_nodes(self.prev_node(), self.current, detached) };
        }
    }

    /// Move the node under `source` in front of this cursor. `source` goes on
    /// to its next node. `false` if `source` is on its ghost node.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// let mut other = List::from([0, 2]);
    /// let mut cursor = list.cursor_mut(1);
    /// let mut source = other.cursor_mut(1);
    /// assert!(cursor.splice_one(&mut source));
    /// assert!(!cursor.splice_one(&mut source));
    /// assert_eq!(list.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(other.to_vec(), vec![0]);
    /// ```
    pub fn splice_one(&mut self, source: &mut CursorMut<'_, T>) -> bool {
        self.splice_range(source, 1) == 1
    }

    /// Move up to `count` nodes from `source` on in front of this cursor,
    /// in order, and return how many moved. The run stops at the source's
    /// ghost node and `source` ends on the node after it.
    ///
    /// Elements stay where they are in memory. Finding the end of the run
    /// takes *O*(*k*) for *k* moved nodes.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([0, 1, 6]);
    /// let mut other = List::from([9, 2, 3, 4, 5]);
    /// let mut cursor = list.cursor_mut(2);
    /// let mut source = other.cursor_mut(1);
    /// assert_eq!(cursor.splice_range(&mut source, 10), 4);
    /// assert_eq!((cursor.index(), source.current()), (6, None));
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4, 5, 6]);
    /// assert_eq!(other.to_vec(), vec![9]);
    /// ```
    pub fn splice_range(&mut self, source: &mut CursorMut<'_, T>, count: usize) -> usize {
        let count = count.min(source.list.len - source.index);
        if count == 0 {
            return 0;
        }
        let front = source.current;
        let back = source.range_back(count);
        // SAFETY: `back` is not the ghost node.
        source.current = unsafe { next_of(back) };
        // SAFETY: `front..=back` are `count` linked nodes of the source list,
        // which is not this list since both are borrowed mutably.
        unsafe {
            let detached = source.list.detach_nodes(front, back, count);
            self.list.attach_nodes(self.prev_node(), self.current, detached);
        }
        self.index += count;
        log::trace!("splice_range: moved {} nodes across lists", count);
        count
    }
}

/// Rolls back a multi-node insertion that did not complete.
///
/// The `inserted` nodes right before the cursor are unlinked and dropped
/// when the guard is dropped without being consumed.
struct InsertGuard<'c, 'a, T> {
    cursor: &'c mut CursorMut<'a, T>,
    inserted: usize,
}

impl<T> InsertGuard<'_, '_, T> {
    /// Keep the inserted nodes and return their count.
    fn consume(self) -> usize {
        let inserted = self.inserted;
        mem::forget(self);
        inserted
    }
}

impl<T> Drop for InsertGuard<'_, '_, T> {
    fn drop(&mut self) {
        if self.inserted == 0 {
            return;
        }
        log::debug!("insertion interrupted, removing {} inserted nodes", self.inserted);
        let cursor = &mut *self.cursor;
        let back = cursor.prev_node();
        let mut front = back;
        for _ in 1..self.inserted {
            // SAFETY: the `inserted` nodes before the cursor are all live.
            front = unsafe { prev_of(front) };
        }
        cursor.index -= self.inserted;
        // SAFETY: `front..=back` are the `inserted` nodes attached by this guard.
        let detached = unsafe { cursor.list.detach_nodes(front, back, self.inserted) };
        drop(List::from_detached(detached));
    }
}

/// Elements from a cursor forward, lap after lap.
///
/// It yields `None` once per lap, as it steps over the ghost node, and keeps
/// going after that. [`Iter`](crate::Iter) is the one-pass iterator.
///
/// ```
/// use ring_list::List;
///
/// let list = List::from([1, 2]);
/// let mut iter = list.cursor_start().into_iter();
/// let lap: Vec<_> = (0..4).map(|_| iter.next()).collect();
/// assert_eq!(lap, [Some(&1), Some(&2), None, Some(&1)]);
/// assert_eq!(iter.into_cursor().current(), Some(&2));
/// ```
pub struct CursorIter<'a, T: 'a> {
    pub(crate) cursor: Cursor<'a, T>,
}

/// [`CursorIter`] going backward: it yields the element before the cursor.
///
/// ```
/// use ring_list::List;
///
/// let list = List::from([1, 2]);
/// let mut iter = list.cursor_end().into_iter().rev();
/// let lap: Vec<_> = (0..4).map(|_| iter.next()).collect();
/// assert_eq!(lap, [Some(&2), Some(&1), None, Some(&2)]);
/// assert_eq!(iter.into_cursor().previous(), Some(&1));
/// ```
pub struct CursorBackIter<'a, T: 'a> {
    pub(crate) cursor: Cursor<'a, T>,
}

impl<'a, T: 'a> CursorIter<'a, T> {
    pub fn into_cursor(self) -> Cursor<'a, T> {
        self.cursor
    }
    /// Turn around without moving.
    pub fn rev(self) -> CursorBackIter<'a, T> {
        CursorBackIter {
            cursor: self.cursor,
        }
    }
    /// What `next` would yield.
    pub fn peek(&self) -> Option<&'a T> {
        self.cursor.current()
    }
}

impl<'a, T: 'a> CursorBackIter<'a, T> {
    pub fn into_cursor(self) -> Cursor<'a, T> {
        self.cursor
    }
    pub fn rev(self) -> CursorIter<'a, T> {
        CursorIter {
            cursor: self.cursor,
        }
    }
    pub fn peek(&self) -> Option<&'a T> {
        self.cursor.previous()
    }
}

impl<'a, T: 'a> From<CursorIter<'a, T>> for Cursor<'a, T> {
    fn from(cursor_iter: CursorIter<'a, T>) -> Self {
        cursor_iter.into_cursor()
    }
}

impl<'a, T: 'a> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

unsafe impl<T: Sync> Send for CursorIter<'_, T> {}

unsafe impl<T: Sync> Sync for CursorIter<'_, T> {}

unsafe impl<T: Sync> Send for CursorBackIter<'_, T> {}

unsafe impl<T: Sync> Sync for CursorBackIter<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::error::ListError;
    use crate::list::List;
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    /// Clones fine until `budget` runs out, then panics.
    #[derive(Debug)]
    struct Fragile {
        value: i32,
        budget: Rc<Cell<usize>>,
        alive: Rc<Cell<usize>>,
    }

    impl Fragile {
        fn new(value: i32, budget: &Rc<Cell<usize>>, alive: &Rc<Cell<usize>>) -> Self {
            alive.set(alive.get() + 1);
            Self {
                value,
                budget: budget.clone(),
                alive: alive.clone(),
            }
        }
    }

    impl Clone for Fragile {
        fn clone(&self) -> Self {
            let budget = self.budget.get();
            if budget == 0 {
                panic!("clone budget exhausted");
            }
            self.budget.set(budget - 1);
            Fragile::new(self.value, &self.budget, &self.alive)
        }
    }

    impl Drop for Fragile {
        fn drop(&mut self) {
            self.alive.set(self.alive.get() - 1);
        }
    }

    #[test]
    fn cursor_clone_keeps_position() {
        struct Handle(u32);

        let list = List::from([Handle(7), Handle(8), Handle(9)]);
        let mut cursor = list.cursor(1);
        let copy = cursor.clone();
        assert!(cursor.move_next().is_ok());
        assert_eq!(copy.index(), 1);
        assert_eq!(copy.current().map(|h| h.0), Some(8));
        assert_eq!(cursor.current().map(|h| h.0), Some(9));
        assert!(copy < cursor);
    }

    #[test]
    fn cursor_move_and_seek() {
        let list = List::from_iter(0..5);
        let mut cursor = list.cursor_start();
        assert_eq!(cursor.move_prev(), Err(ListError::GhostBoundary));
        assert_eq!(cursor.seek_forward(3), Ok(()));
        assert_eq!((cursor.index(), cursor.current()), (3, Some(&3)));
        assert_eq!(cursor.seek_forward(4), Err(2));
        assert_eq!((cursor.index(), cursor.current()), (5, None));
        assert_eq!(cursor.move_next(), Err(ListError::GhostBoundary));

        for target in [4, 0, 2, 5, 1, 3, 3] {
            assert!(cursor.seek_to(target).is_ok());
            assert_eq!(cursor.index(), target);
            assert_eq!(cursor.current().copied(), (0..5).nth(target));
        }
        assert_eq!(cursor.seek_to(7), Err(2));
        assert_eq!(cursor.index(), 3);

        let empty = List::<i32>::new();
        let mut cursor = empty.cursor_start();
        assert_eq!(cursor.move_next(), Err(ListError::GhostBoundary));
        cursor.move_next_cyclic();
        cursor.move_prev_cyclic();
        assert_eq!((cursor.index(), cursor.current()), (0, None));
    }

    #[test]
    fn cursor_seek_to_from_every_position() {
        let list = List::from_iter(0..9);
        for from in 0..=9 {
            for to in 0..=9 {
                let mut cursor = list.cursor(from);
                assert_eq!(cursor.seek_to(to), Ok(()));
                assert_eq!(cursor, list.cursor(to));
                assert_eq!(cursor.current().copied(), (0..9).nth(to));
            }
        }
    }

    #[test]
    fn cursor_survives_edits_elsewhere() {
        let mut list = List::from_iter(0..6);
        let mut cursor = list.cursor_mut(3);
        let node = cursor.current;

        cursor.push_front(-1);
        cursor.push_back(6);
        assert_eq!(cursor.pop_front(), Some(-1));
        assert_eq!(cursor.pop_back(), Some(6));
        cursor.move_prev_cyclic();
        assert_eq!(cursor.remove(), Some(2));
        assert_eq!(cursor.current, node);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.current(), Some(&3));
        list.check_ring();
    }

    #[test]
    fn cursor_pop_at_the_edges() {
        let mut list = List::from_iter(0..3);
        let mut cursor = list.cursor_mut(2);
        assert_eq!(cursor.pop_back(), Some(2));
        assert_eq!((cursor.index(), cursor.current()), (2, None));
        cursor.move_to_start();
        assert_eq!(cursor.pop_front(), Some(0));
        assert_eq!((cursor.index(), cursor.current()), (0, Some(&1)));
        cursor.move_to_end();
        cursor.push_back(5);
        assert_eq!((cursor.index(), cursor.previous()), (2, Some(&5)));
        assert_eq!(cursor.pop_back(), Some(5));
        assert_eq!(cursor.pop_back(), Some(1));
        assert_eq!(cursor.pop_back(), None);
        assert_eq!((cursor.index(), cursor.current()), (0, None));
        list.check_ring();
    }

    #[test]
    fn cursor_insert_iter_keeps_order() {
        let mut list = List::from_iter([0, 9]);
        let mut cursor = list.cursor_mut(1);
        assert_eq!(cursor.insert_iter(1..4), 3);
        assert_eq!(cursor.insert_iter(None), 0);
        assert_eq!(cursor.insert_n(2, 7), 2);
        assert_eq!(cursor.insert_n(0, 8), 0);
        assert_eq!((cursor.index(), cursor.current()), (6, Some(&9)));
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 7, 7, 9]);
        list.check_ring();
    }

    #[test]
    fn cursor_insert_n_rolls_back_on_panic() {
        let budget = Rc::new(Cell::new(2));
        let alive = Rc::new(Cell::new(0));
        let mut list = List::new();
        list.push_back(Fragile::new(1, &budget, &alive));
        list.push_back(Fragile::new(2, &budget, &alive));
        let seed = Fragile::new(3, &budget, &alive);

        let result = catch_unwind(AssertUnwindSafe(|| {
            list.cursor_mut(1).insert_n(5, seed);
        }));
        assert!(result.is_err());
        list.check_ring();
        assert_eq!(list.iter().map(|f| f.value).collect::<Vec<_>>(), vec![1, 2]);
        // Neither the partial clones nor the seed survive.
        assert_eq!(alive.get(), 2);
    }

    #[test]
    fn cursor_insert_iter_rolls_back_on_panic() {
        let mut list = List::from_iter([1, 2]);
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut cursor = list.cursor_end_mut();
            cursor.insert_iter((10..).map(|x| if x < 13 { x } else { panic!("source failed") }));
        }));
        assert!(result.is_err());
        assert_eq!(list.to_vec(), vec![1, 2]);
        list.check_ring();
    }

    #[test]
    fn cursor_remove_n() {
        let mut list = List::from_iter(0..8);
        let mut cursor = list.cursor_mut(6);
        assert_eq!(cursor.remove_n(0), 0);
        assert_eq!(cursor.remove_n(5), 2);
        assert_eq!((cursor.index(), cursor.current()), (6, None));
        assert_eq!(cursor.remove_n(1), 0);
        cursor.move_to_start();
        assert_eq!(cursor.remove_n(2), 2);
        assert_eq!((cursor.index(), cursor.current()), (0, Some(&2)));
        assert_eq!(list.to_vec(), vec![2, 3, 4, 5]);
        list.check_ring();
    }

    #[test]
    fn cursor_splice_one_and_range() {
        let mut list = List::from_iter([10, 20]);
        let mut other = List::from_iter(0..5);
        let moved = other.front().unwrap() as *const i32;
        {
            let mut cursor = list.cursor_mut(1);
            let mut source = other.cursor_start_mut();
            assert!(cursor.splice_one(&mut source));
            assert_eq!((source.index(), source.current()), (0, Some(&1)));
            assert_eq!((cursor.index(), cursor.current()), (2, Some(&20)));

            assert_eq!(cursor.splice_range(&mut source, 0), 0);
            assert_eq!(cursor.splice_range(&mut source, 2), 2);
            assert_eq!((source.index(), source.current()), (0, Some(&3)));
            assert_eq!((cursor.index(), cursor.current()), (4, Some(&20)));

            source.move_to_end();
            assert!(!cursor.splice_one(&mut source));
        }
        assert_eq!(list.to_vec(), vec![10, 0, 1, 2, 20]);
        assert_eq!(other.to_vec(), vec![3, 4]);
        assert_eq!(list.len(), 5);
        assert_eq!(other.len(), 2);
        assert_eq!(list.cursor(1).current().unwrap() as *const i32, moved);
        list.check_ring();
        other.check_ring();

        // The whole source, into an empty destination.
        let mut empty = List::new();
        let count = empty
            .cursor_end_mut()
            .splice_range(&mut other.cursor_start_mut(), usize::MAX);
        assert_eq!(count, 2);
        assert_eq!(empty.to_vec(), vec![3, 4]);
        assert!(other.is_empty());
        empty.check_ring();
        other.check_ring();
    }

    #[test]
    fn cursor_splice_list() {
        let mut list = List::from_iter([1, 4]);
        let mut other = List::from_iter([2, 3]);
        let mut cursor = list.cursor_mut(1);
        cursor.splice(&mut other);
        cursor.splice(&mut List::new());
        assert_eq!((cursor.index(), cursor.current()), (3, Some(&4)));
        assert!(other.is_empty());
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
        list.check_ring();
        other.check_ring();
    }

    #[test]
    fn cursor_split() {
        let mut list = List::from_iter(0..4);
        let mut cursor = list.cursor_mut(2);
        let before = cursor.split_before().unwrap();
        assert!(cursor.split_before().is_none());
        let after = cursor.split().unwrap();
        assert!(cursor.split().is_none());
        assert_eq!(before.to_vec(), vec![0, 1]);
        assert_eq!(after.to_vec(), vec![2, 3]);
        assert!(list.is_empty());
        list.check_ring();
        before.check_ring();
        after.check_ring();
    }
}
