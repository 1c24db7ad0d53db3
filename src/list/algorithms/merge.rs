use crate::list::{element, next_of, prev_of};
use crate::List;

/// Merge the sorted `src` into the sorted `dst`, leaving `src` empty.
///
/// Every maximal run of `src` nodes that sorts strictly before a node of
/// `dst` is detached and attached before that node in one step, so the
/// merge is stable: on ties the nodes of `dst` come first.
pub(crate) fn merge<T, F>(dst: &mut List<T>, src: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    log::trace!("merge: {} nodes into {}", src.len(), dst.len());
    let ghost = dst.ghost_node();
    let mut merged = dst.front_node();
    while !src.is_empty() {
        let front = src.front_node();
        // SAFETY: `front` is an element node of `src`, and `merged` walks the
        // element nodes of `dst` until it reaches the ghost node.
        unsafe {
            while merged != ghost && !less(element(front), element(merged)) {
                merged = next_of(merged);
            }
        }
        if merged == ghost {
            dst.append(src);
            break;
        }

        // `front` sorts before `merged`, find how far the run extends.
        let src_ghost = src.ghost_node();
        let (mut back, mut len) = (front, 1);
        // SAFETY: `back` only advances over element nodes of `src`, and the
        // range `front..=back` holds exactly `len` nodes. `merged` is a node of
        // `dst`, so it is adjacent to its previous node.
        unsafe {
            loop {
                let next = next_of(back);
                if next == src_ghost || !less(element(next), element(merged)) {
                    break;
                }
                back = next;
                len += 1;
            }
            let detached = src.detach_nodes(front, back, len);
            dst.attach_nodes(prev_of(merged), merged, detached);
        }
    }
}
