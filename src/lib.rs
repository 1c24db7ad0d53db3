//! A generic doubly-linked list whose nodes form a ring closed by a ghost
//! (sentinel) node.
//!
//! [`List`] owns every node it links. Inserting, removing and splicing at a
//! known position are *O*(1); reaching a position by index is *O*(*n*). Once an
//! element is in a list it stays at the same address: splice, merge, sort,
//! unique and reverse only rewrite `next`/`prev` links.
//!
//! ```
//! use ring_list::List;
//!
//! let mut list = List::from([3, 1, 2]);
//! list.push_back(0);
//! list.sort();
//! assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
//! ```
//!
//! # Ring layout
//!
//! ```text
//!   List { ghost, len = 3 }
//!            │
//!            ↓
//!   ┌──→ [ghost] ⇄ [a] ⇄ [b] ⇄ [c] ──┐
//!   └────────────────────────────────┘
//! ```
//!
//! The ghost node is allocated with the list, carries no element and is freed
//! with it. `ghost.next` is the front, `ghost.prev` the back; in an empty list
//! both point at the ghost itself. Positions are numbered `0..len` for the
//! elements and `len` for the ghost, so every list has `len + 1` positions.
//!
//! # Iterators and cursors
//!
//! [`Iter`], [`IterMut`] and [`IntoIter`] walk the elements once, from either
//! end, and stop at the ghost node.
//!
//! A [`Cursor`] (read-only) or [`CursorMut`] sits on one of the `len + 1`
//! positions. It can step across the ghost with `move_next_cyclic`, refuse to
//! with `move_next`, or jump with the `seek_*` family. A cursor borrows its
//! list, so it can never point into another list or at a freed node.
//!
//! ```
//! use ring_list::List;
//!
//! let list = List::from(['x', 'y']);
//! let mut cursor = list.cursor_end();
//! assert_eq!(cursor.current(), None);
//! assert!(cursor.move_next().is_err());
//! cursor.move_next_cyclic();
//! assert_eq!(cursor.current(), Some(&'x'));
//! ```
//!
//! # Editing through a cursor
//!
//! [`CursorMut`] edits the list around its position and keeps pointing at the
//! same node unless that node is removed:
//! - [`insert`], [`insert_n`] and [`insert_iter`] add elements before the
//!   cursor (a panicking source rolls the partial insertion back);
//! - [`remove`], [`remove_n`] and [`backspace`] take elements out;
//! - [`split`] and [`split_before`] cut the list in two;
//! - [`splice`], [`splice_one`] and [`splice_range`] move nodes in from
//!   another list.
//!
//! ```
//! use ring_list::List;
//!
//! let mut list = List::from([1, 5]);
//! let mut other = List::from([2, 3, 4, 9]);
//!
//! let mut cursor = list.cursor_mut(1);
//! cursor.insert_iter([10, 20]);
//! assert_eq!(cursor.remove_n(1), 1);
//! assert_eq!(cursor.backspace(), Some(20));
//! cursor.splice_range(&mut other.cursor_start_mut(), 3);
//! assert_eq!(list.to_vec(), vec![1, 10, 2, 3, 4]);
//! assert_eq!(other.to_vec(), vec![9]);
//! ```
//!
//! Inside a single list, [`List::splice_within`] moves an index range and
//! reports bad requests as a [`ListError`]:
//!
//! ```
//! use ring_list::{List, ListError};
//!
//! let mut list = List::from([1, 2, 3, 4, 5]);
//! list.splice_within(0, 3..5).unwrap();
//! assert_eq!(list.to_vec(), vec![4, 5, 1, 2, 3]);
//! assert_eq!(
//!     list.splice_within(1, 0..2),
//!     Err(ListError::OverlappingSplice { at: 1, start: 0, end: 2 })
//! );
//! ```
//!
//! # Algorithms
//!
//! [`List::sort`] is a stable bottom-up merge sort and [`List::merge`] a stable
//! merge of two sorted lists, both built on node splicing.
//! [`List::unique`], [`List::remove_if`] and [`List::reverse`] complete the set.
//!
//! ```
//! use ring_list::List;
//!
//! let mut a = List::from([3, 1, 2]);
//! a.sort();
//!
//! let mut b = List::from([2, 3, 4]);
//! a.merge(&mut b);
//! assert!(b.is_empty());
//! assert_eq!(a.to_vec(), vec![1, 2, 2, 3, 3, 4]);
//!
//! assert_eq!(a.unique(), 2);
//! a.reverse();
//! assert_eq!(a.into_vec(), vec![4, 3, 2, 1]);
//! ```
//!
//! # Logging
//!
//! Events go through the [`log`](https://docs.rs/log) facade: node transfers at
//! `trace` level, rolled back insertions and rejected splices at `debug` level.
//!
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`insert`]: crate::list::cursor::CursorMut::insert
//! [`insert_n`]: crate::list::cursor::CursorMut::insert_n
//! [`insert_iter`]: crate::list::cursor::CursorMut::insert_iter
//! [`remove`]: crate::list::cursor::CursorMut::remove
//! [`remove_n`]: crate::list::cursor::CursorMut::remove_n
//! [`backspace`]: crate::list::cursor::CursorMut::backspace
//! [`split`]: crate::list::cursor::CursorMut::split
//! [`split_before`]: crate::list::cursor::CursorMut::split_before
//! [`splice`]: crate::list::cursor::CursorMut::splice
//! [`splice_one`]: crate::list::cursor::CursorMut::splice_one
//! [`splice_range`]: crate::list::cursor::CursorMut::splice_range

pub mod error;
pub mod list;

#[doc(inline)]
pub use error::ListError;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;
