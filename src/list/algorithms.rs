use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::mem;

mod drain;
mod merge;
mod sort;

pub use drain::{Drain, DrainFilter};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Reuse the nodes of `self`, then extend or truncate the list.
    ///
    /// All the clones are made before `self` is touched, so a panicking
    /// `T::clone` leaves `self` unchanged.
    fn clone_from(&mut self, other: &Self) {
        self.replace_elements(other.clone());
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

// Conversions and queries.
impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Move the elements into a `Vec`, in order.
    pub fn into_vec(self) -> Vec<T> {
        let mut vec = Vec::with_capacity(self.len());
        vec.extend(self);
        vec
    }

    /// Clone the elements into a `Vec`, in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

// Removal.
impl<T> List<T> {
    /// Removes all elements equal to `value` and returns how many were removed.
    ///
    /// The remaining elements keep their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 1, 3, 1]);
    /// assert_eq!(list.remove(&1), 3);
    /// assert_eq!(list.to_vec(), vec![2, 3]);
    /// ```
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.remove_if(|elem| elem == value)
    }

    /// Removes all elements for which `pred` returns `true` and returns how
    /// many were removed. The predicate is called once per element, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..10);
    /// assert_eq!(list.remove_if(|x| x % 3 == 0), 4);
    /// assert_eq!(list.to_vec(), vec![1, 2, 4, 5, 7, 8]);
    /// ```
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.drain_filter(|elem| pred(&*elem)).count()
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..6);
    /// list.retain(|x| x % 2 == 0);
    /// assert_eq!(list.to_vec(), vec![0, 2, 4]);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_if(|elem| !keep(elem));
    }

    /// Removes all elements from the list, returning them through an
    /// iterator. The list is empty as soon as this is called.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// assert_eq!(list.drain().rev().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// assert!(list.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }

    /// Creates an iterator which uses a closure to determine if an element
    /// should be removed. The closure may mutate the elements it keeps.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut numbers = List::from([1, 2, 3, 4, 5, 6, 8, 9, 11, 13, 14, 15]);
    ///
    /// let evens = numbers.drain_filter(|x| *x % 2 == 0).collect::<Vec<_>>();
    /// let odds = numbers;
    ///
    /// assert_eq!(evens, vec![2, 4, 6, 8, 14]);
    /// assert_eq!(odds.into_vec(), vec![1, 3, 5, 9, 11, 13, 15]);
    /// ```
    pub fn drain_filter<F>(&mut self, filter: F) -> DrainFilter<'_, T, F>
    where
        F: FnMut(&mut T) -> bool,
    {
        DrainFilter::new(self, filter)
    }

    /// Removes consecutive repeated elements, and returns how many were
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 2, 3, 3, 3, 1]);
    /// assert_eq!(list.unique(), 3);
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 1]);
    /// ```
    pub fn unique(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.unique_by(|kept, candidate| kept == candidate)
    }

    /// Removes every element for which `same_bucket(kept, candidate)` returns
    /// `true`, where `kept` is the nearest retained element before
    /// `candidate`. Returns how many were removed.
    ///
    /// The first element is always retained.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// // Drop every element within 2 of the last one kept.
    /// let mut list = List::from([1, 2, 3, 4, 7, 8, 10]);
    /// assert_eq!(list.unique_by(|kept, candidate| candidate - kept <= 2), 3);
    /// assert_eq!(list.to_vec(), vec![1, 4, 7, 10]);
    /// ```
    pub fn unique_by<F>(&mut self, mut same_bucket: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.cursor_start_mut();
        if cursor.move_next().is_err() {
            return 0;
        }
        loop {
            let duplicate = match (cursor.previous(), cursor.current()) {
                (Some(kept), Some(candidate)) => same_bucket(kept, candidate),
                _ => break,
            };
            if duplicate {
                cursor.remove();
                removed += 1;
            } else {
                cursor.move_next_cyclic();
            }
        }
        removed
    }

    /// Removes consecutive elements that resolve to the same key, and returns
    /// how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([10, 11, 20, 21, 22, 30]);
    /// assert_eq!(list.unique_by_key(|x| x / 10), 3);
    /// assert_eq!(list.to_vec(), vec![10, 20, 30]);
    /// ```
    pub fn unique_by_key<K, F>(&mut self, mut key: F) -> usize
    where
        F: FnMut(&T) -> K,
        K: PartialEq,
    {
        self.unique_by(|kept, candidate| key(kept) == key(candidate))
    }
}

// Reordering.
impl<T> List<T> {
    /// Reverses the order of the elements.
    ///
    /// Only the links are swapped, every element stays at its address.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(list.to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        let mut node = ghost;
        loop {
            // SAFETY: `node` walks the whole ring, the ghost node included, and
            // only its links are accessed.
            unsafe {
                let raw = node.as_ptr();
                mem::swap(&mut (*raw).next, &mut (*raw).prev);
                // The old `next` is now `prev`.
                node = (*raw).prev;
            }
            if node == ghost {
                break;
            }
        }
    }

    /// Merges the sorted list `other` into this sorted list, leaving `other`
    /// empty.
    ///
    /// The merge is stable: when elements compare equal, those of `self` come
    /// first. No element is moved in memory.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut a = List::from([1, 3, 5]);
    /// let mut b = List::from([2, 4]);
    /// a.merge(&mut b);
    /// assert_eq!(a.to_vec(), vec![1, 2, 3, 4, 5]);
    /// assert!(b.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        merge::merge(self, other, |a, b| a.lt(b));
    }

    /// Merges the sorted list `other` into this list, both sorted by the
    /// comparator function. See [`List::merge`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut a = List::from([5, 3, 1]);
    /// let mut b = List::from([4, 2]);
    /// a.merge_by(&mut b, |x, y| y.cmp(x));
    /// assert_eq!(a.to_vec(), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn merge_by<F>(&mut self, other: &mut Self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge::merge(self, other, |a, b| compare(a, b) == Ordering::Less);
    }

    /// Merges the sorted list `other` into this list, both sorted by the key
    /// extraction function. See [`List::merge`].
    pub fn merge_by_key<K, F>(&mut self, other: &mut Self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        merge::merge(self, other, |a, b| f(a).lt(&f(b)));
    }

    /// Stable sort in *O*(*n* log *n*) comparisons and *O*(1) extra memory.
    ///
    /// Runs of 8 nodes are insertion sorted, then merged bottom-up in
    /// doubling widths. Only links change, every element keeps its address.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([5, 2, 4, 3, 1]);
    /// let third = list.iter().nth(2).map(|e| e as *const i32);
    /// list.sort();
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
    /// assert_eq!(list.iter().nth(3).map(|e| e as *const i32), third);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        sort::merge_sort(self, |a, b| a.lt(b));
    }

    /// [`sort`](List::sort) with a comparator. If `compare` is not a total
    /// order the resulting order is unspecified, but nothing is lost.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut floats = List::from([2.5f64, -1.0, 0.5]);
    /// floats.sort_by(|a, b| b.total_cmp(a));
    /// assert_eq!(floats.into_vec(), vec![2.5, 0.5, -1.0]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }

    /// [`sort`](List::sort) by a key. The key is computed on every
    /// comparison, it is not cached.
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from([-5i32, 4, 1, -3, 2]);
    /// list.sort_by_key(|k| k.abs());
    /// assert_eq!(list.into_vec(), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        sort::merge_sort(self, |a, b| f(a).lt(&f(b)));
    }
}
