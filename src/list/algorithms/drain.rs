use crate::list::cursor::CursorMut;
use crate::list::iterator::IntoIter;
use crate::List;
use std::fmt;
use std::marker::PhantomData;

/// A draining iterator over the elements of a `List`.
///
/// This `struct` is created by [`List::drain`]. All the nodes are taken out of
/// the list when the iterator is created, so the list is empty from then on,
/// even if the iterator is leaked. Elements not yielded are dropped with it.
pub struct Drain<'a, T: 'a> {
    taken: IntoIter<T>,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> Drain<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        let taken = match list.detach_all_nodes() {
            Some(detached) => List::from_detached(detached),
            None => List::new(),
        };
        Self {
            taken: taken.into_iter(),
            _marker: PhantomData,
        }
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.taken.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.taken.size_hint()
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    fn next_back(&mut self) -> Option<T> {
        self.taken.next_back()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Drain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&self.taken).finish()
    }
}

/// An iterator removing the elements accepted by a predicate.
///
/// This `struct` is created by [`List::drain_filter`]. Rejected elements stay
/// in the list, in their relative order. Whatever the iterator has not reached
/// yet is still filtered when it is dropped.
pub struct DrainFilter<'a, T: 'a, F: 'a>
where
    F: FnMut(&mut T) -> bool,
{
    cursor: CursorMut<'a, T>,
    pred: F,
}

impl<'a, T, F> DrainFilter<'a, T, F>
where
    F: FnMut(&mut T) -> bool,
{
    pub(crate) fn new(list: &'a mut List<T>, pred: F) -> Self {
        Self {
            cursor: list.cursor_start_mut(),
            pred,
        }
    }
}

impl<T, F> Iterator for DrainFilter<'_, T, F>
where
    F: FnMut(&mut T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while let Some(elem) = self.cursor.current_mut() {
            if (self.pred)(elem) {
                return self.cursor.remove();
            }
            self.cursor.move_next_cyclic();
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cursor.len() - self.cursor.index()))
    }
}

impl<T, F> Drop for DrainFilter<'_, T, F>
where
    F: FnMut(&mut T) -> bool,
{
    fn drop(&mut self) {
        while self.next().is_some() {}
    }
}

impl<T: fmt::Debug, F> fmt::Debug for DrainFilter<'_, T, F>
where
    F: FnMut(&mut T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrainFilter")
            .field("list", self.cursor.view())
            .field("index", &self.cursor.index())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::List;

    #[test]
    fn drain_empties_the_list() {
        let mut list = List::from_iter(0..5);
        let mut drain = list.drain();
        assert_eq!(drain.len(), 5);
        assert_eq!(drain.next(), Some(0));
        assert_eq!(drain.next_back(), Some(4));
        drop(drain);
        assert!(list.is_empty());
        list.check_ring();
    }

    #[test]
    fn drain_empties_the_list_even_if_leaked() {
        let mut list = List::from([1, 2]);
        let mut drain = list.drain();
        assert_eq!(drain.next(), Some(1));
        std::mem::forget(drain);
        assert!(list.is_empty());
        list.check_ring();
        list.push_back(3);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn drain_filter_partial_then_drop() {
        let mut list = List::from_iter(0..10);
        let mut evens = list.drain_filter(|x| *x % 2 == 0);
        assert_eq!(evens.next(), Some(0));
        assert_eq!(evens.next(), Some(2));
        drop(evens);
        assert_eq!(list.to_vec(), vec![1, 3, 5, 7, 9]);
        list.check_ring();
    }

    #[test]
    fn drain_filter_can_mutate_survivors() {
        let mut list = List::from_iter(1..7);
        let removed: Vec<_> = list
            .drain_filter(|x| {
                *x *= 10;
                *x > 30
            })
            .collect();
        assert_eq!(removed, vec![40, 50, 60]);
        assert_eq!(list.to_vec(), vec![10, 20, 30]);
    }
}
