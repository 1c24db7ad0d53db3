use super::merge::merge;
use crate::list::{connect, element, next_of, prev_of};
use crate::List;

/// Length of the runs sorted by insertion before any merging.
const RUN_LEN: usize = 8;

/// Stable bottom-up merge sort over the links of `list`.
///
/// Runs are cut off the front of `list` with [`splice_range`], combined with
/// [`merge`] and appended to `sorted`, whose nodes are handed back to `list`
/// at the end of every pass. No element is moved in memory.
///
/// [`splice_range`]: crate::list::cursor::CursorMut::splice_range
pub(crate) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if list.len() < 2 {
        return;
    }
    log::trace!("merge_sort: {} nodes", list.len());

    let mut sorted = List::new();
    let (mut left, mut right) = (List::new(), List::new());
    while !list.is_empty() {
        take_front(list, &mut left, RUN_LEN);
        insertion_sort(&mut left, &mut less);
        sorted.append(&mut left);
    }
    list.append(&mut sorted);

    let mut width = RUN_LEN;
    while width < list.len() {
        while !list.is_empty() {
            take_front(list, &mut left, width);
            take_front(list, &mut right, width);
            merge(&mut left, &mut right, &mut less);
            sorted.append(&mut left);
        }
        list.append(&mut sorted);
        width *= 2;
    }
}

/// Move the first `count` nodes of `src` (all of them if it is shorter) to
/// the back of `dst`.
fn take_front<T>(src: &mut List<T>, dst: &mut List<T>, count: usize) {
    dst.cursor_end_mut()
        .splice_range(&mut src.cursor_start_mut(), count);
}

/// Stable insertion sort of a short list. Each node is walked back past the
/// nodes that are strictly greater and relinked there.
fn insertion_sort<T, F>(list: &mut List<T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let ghost = list.ghost_node();
    // SAFETY: only element nodes of `list` are compared, `pos` walks back from
    // `node` and stops before the ghost node. Unlinking `node` and relinking
    // it before `pos` keeps the node count.
    unsafe {
        let mut node = next_of(list.front_node());
        while node != ghost {
            let next = next_of(node);
            let mut pos = node;
            while prev_of(pos) != ghost && less(element(node), element(prev_of(pos))) {
                pos = prev_of(pos);
            }
            if pos != node {
                connect(prev_of(node), next);
                connect(prev_of(pos), node);
                connect(node, pos);
            }
            node = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::List;

    #[test]
    fn sort_short_and_long_runs() {
        for len in [0, 1, 2, 7, 8, 9, 16, 17, 100] {
            let mut list = List::from_iter((0..len).rev());
            list.sort();
            list.check_ring();
            assert_eq!(list.to_vec(), Vec::from_iter(0..len));
        }
    }

    #[test]
    fn sort_is_stable() {
        // (key, position before sorting)
        let input: Vec<(u8, usize)> = (0..50).map(|i| ((i * 7 % 5) as u8, i)).collect();
        let mut list = List::from_iter(input.iter().copied());
        list.sort_by_key(|&(key, _)| key);
        list.check_ring();

        let mut expected = input;
        expected.sort_by_key(|&(key, _)| key);
        assert_eq!(list.to_vec(), expected);
    }

    #[test]
    fn sort_keeps_element_addresses() {
        let mut list = List::from_iter((0..40).map(|i| (i * 17) % 40));
        let mut addresses: Vec<(i32, *const i32)> =
            list.iter().map(|e| (*e, e as *const i32)).collect();
        list.sort();
        addresses.sort();
        let sorted: Vec<(i32, *const i32)> = list.iter().map(|e| (*e, e as *const i32)).collect();
        assert_eq!(sorted, addresses);
    }

    #[test]
    fn sort_random_against_vec() {
        let rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..50 {
            let len = rng.usize(0..200);
            let vec: Vec<u16> = (0..len).map(|_| rng.u16(0..32)).collect();
            let mut list = List::from(vec.clone());
            let mut expected = vec;
            list.sort_by(|a, b| b.cmp(a));
            expected.sort_by(|a, b| b.cmp(a));
            list.check_ring();
            assert_eq!(list.into_vec(), expected);
        }
    }
}
