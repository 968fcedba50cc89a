use crate::{pathfind::Node, FxIndexMap};
use core::hash::Hash;

/// Follows parent links from `goal` back to the start and returns the nodes in start-to-goal order.
pub(crate) fn reverse_path<N, C>(visited: &FxIndexMap<N, Node<C>>, goal: usize) -> Vec<N>
where
    N: Eq + Hash + Copy,
{
    let mut path = itertools::unfold(goal, |i| {
        visited.get_index(*i).map(|(&node, entry)| {
            *i = entry.parent;
            node
        })
    })
    .collect::<Vec<N>>();

    path.reverse();
    path
}

#[test]
fn walks_parents_back_to_the_start() {
    let mut visited: FxIndexMap<char, Node<u32>> = FxIndexMap::default();
    visited.insert('a', Node { parent: usize::MAX, g: 0, h: 0 });
    visited.insert('b', Node { parent: 0, g: 1, h: 0 });
    visited.insert('x', Node { parent: 0, g: 1, h: 0 });
    visited.insert('c', Node { parent: 1, g: 2, h: 0 });

    assert_eq!(reverse_path(&visited, 3), vec!['a', 'b', 'c']);
    assert_eq!(reverse_path(&visited, 2), vec!['a', 'x']);
    assert_eq!(reverse_path(&visited, 0), vec!['a']);
}
