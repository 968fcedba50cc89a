// This implementation was originally based on [the `pathfinding` crate](https://crates.io/crates/pathfinding).
// It was modified to keep per-node heuristics, break ties deterministically and cap the search.

use indexmap::map::Entry::{Occupied, Vacant};
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use crate::{common::reverse_path, FxIndexMap};

/// A* from `start` until a node satisfying `success` is popped from the frontier.
///
/// Returns the path (both ends included) and its cost, or `None` if the frontier runs dry or
/// more than `max_expansions` nodes would have to be expanded.
///
/// Results are only guaranteed to be optimal when `heuristic` never overestimates.
pub fn find<N, C, IN>(
    start: N,
    mut successors: impl FnMut(&N) -> IN,
    mut heuristic: impl FnMut(&N) -> C,
    mut success: impl FnMut(&N) -> bool,
    max_expansions: Option<usize>,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Copy,
    C: Zero + Ord + Copy,
    IN: IntoIterator<Item = (N, C)>,
{
    let mut pending = BinaryHeap::new();
    let mut visited: FxIndexMap<N, Node<C>> = FxIndexMap::default();
    let mut sequence = 0;
    let mut expansions = 0;

    let h = heuristic(&start);
    visited.insert(start, Node { parent: usize::MAX, g: Zero::zero(), h });
    pending.push(Pending { estimated_cost: h, heuristic: h, cost: Zero::zero(), sequence, index: 0 });

    while let Some(Pending { cost, index, .. }) = pending.pop() {
        let (node, best) = match visited.get_index(index) {
            Some((&node, &best)) => (node, best),
            None => continue,
        };

        // A cheaper way here was found after this entry was pushed; the newer entry wins.
        if best.g < cost {
            continue;
        }

        if success(&node) {
            let path = reverse_path(&visited, index);
            log::debug!("path found: {} nodes, {} expansions, {} pending", path.len(), expansions, pending.len());
            return Some((path, cost));
        }

        if max_expansions.map_or(false, |limit| expansions >= limit) {
            log::debug!("giving up after {} expansions", expansions);
            return None;
        }
        expansions += 1;

        for (next, move_cost) in successors(&node) {
            add_pending(&mut visited, &mut pending, &mut heuristic, &mut sequence, index, cost + move_cost, next);
        }
    }

    log::debug!("no path: frontier exhausted after {} expansions", expansions);
    None
}

fn add_pending<N: Eq + Hash + Copy, C: Zero + Ord + Copy>(
    visited: &mut FxIndexMap<N, Node<C>>,
    pending: &mut BinaryHeap<Pending<C>>,
    mut heuristic: impl FnMut(&N) -> C,
    sequence: &mut usize,
    parent: usize,
    cost: C,
    node: N,
) {
    let (h, index) = match visited.entry(node) {
        Vacant(entry) => {
            let h = heuristic(entry.key());
            let index = entry.index();
            entry.insert(Node { parent, g: cost, h });
            (h, index)
        }
        Occupied(mut entry) if cost < entry.get().g => {
            let h = entry.get().h;
            entry.insert(Node { parent, g: cost, h });
            (h, entry.index())
        }

        // Equal or cheaper path already known.
        Occupied(_) => return,
    };

    *sequence += 1;
    pending.push(Pending { estimated_cost: cost + h, heuristic: h, cost, sequence: *sequence, index });
}

/// Bookkeeping for one discovered position, stored in the visited table for the duration of a
/// single search.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Node<C> {
    // Index of the parent in the visited table, `usize::MAX` for the start node
    pub(crate) parent: usize,
    pub(crate) g: C,
    pub(crate) h: C,
}

struct Pending<C> {
    estimated_cost: C,
    heuristic: C,
    cost: C,

    // Push order, so equally promising entries come out first-in first-out.
    sequence: usize,
    index: usize,
}

impl<C: PartialEq> Eq for Pending<C> {}
impl<C: PartialEq> PartialEq for Pending<C> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.heuristic == other.heuristic && self.sequence == other.sequence
    }
}

impl<C: Ord> PartialOrd for Pending<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// `BinaryHeap` is a max-heap, so every key is compared in reverse.
impl<C: Ord> Ord for Pending<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[cfg(test)]
type TestCost = ordered_float::OrderedFloat<f32>;

#[test]
fn finds_cheapest_weighted_path() {
    // 0 -> 1 -> 3 costs 2, 0 -> 2 -> 3 costs 5, 0 -> 3 costs 10
    let edges = |n: &u32| -> Vec<(u32, u32)> {
        match n {
            0 => vec![(1, 1), (2, 1), (3, 10)],
            1 => vec![(3, 1)],
            2 => vec![(3, 4)],
            _ => vec![],
        }
    };

    let result = find(0u32, edges, |_| 0, |&n| n == 3, None);
    assert_eq!(result, Some((vec![0, 1, 3], 2)));
}

#[test]
fn improves_already_discovered_nodes() {
    // 2 is first reached directly at cost 10, then through 1 at cost 2
    let edges = |n: &u32| -> Vec<(u32, TestCost)> {
        match n {
            0 => vec![(2, TestCost::from(10.0)), (1, TestCost::from(1.0))],
            1 => vec![(2, TestCost::from(1.0))],
            2 => vec![(3, TestCost::from(1.0))],
            _ => vec![],
        }
    };

    let (path, cost) = find(0u32, edges, |_| TestCost::from(0.0), |&n| n == 3, None).unwrap();
    assert_eq!(path, vec![0, 1, 2, 3]);
    assert_eq!(cost, TestCost::from(3.0));
}

#[test]
fn skips_entries_made_stale_by_a_cheaper_path() {
    // 2 is pushed at cost 5 and again at cost 2; the goal costs 12, so the cost-5 entry is
    // popped before it and must not expand 2 a second time
    let edges = |n: &u32| -> Vec<(u32, u32)> {
        match n {
            0 => vec![(2, 5), (1, 1)],
            1 => vec![(2, 1)],
            2 => vec![(3, 10)],
            _ => vec![],
        }
    };

    let mut expanded = Vec::new();
    let result = find(
        0u32,
        |n| {
            expanded.push(*n);
            edges(n)
        },
        |_| 0,
        |&n| n == 3,
        None,
    );

    assert_eq!(expanded, vec![0, 1, 2]);
    assert_eq!(result, Some((vec![0, 1, 2, 3], 12)));
}

#[test]
fn start_can_be_the_goal() {
    let result = find(7u32, |_| Vec::<(u32, u32)>::new(), |_| 0, |&n| n == 7, Some(0));
    assert_eq!(result, Some((vec![7], 0)));
}

#[test]
fn returns_none_when_unreachable() {
    let edges = |n: &u32| if *n < 5 { vec![(n + 1, 1u32)] } else { vec![] };
    assert_eq!(find(0u32, edges, |_| 0, |&n| n == 9, None), None);
}

#[test]
fn equal_cost_ties_go_to_the_earliest_push() {
    // Both 1 and 2 lead to 3 with the same cost and heuristic
    let edges = |n: &u32| -> Vec<(u32, u32)> {
        match n {
            0 => vec![(1, 1), (2, 1)],
            1 | 2 => vec![(3, 1)],
            _ => vec![],
        }
    };

    let (path, _) = find(0u32, edges, |_| 0, |&n| n == 3, None).unwrap();
    assert_eq!(path, vec![0, 1, 3]);
}

#[test]
fn lower_heuristic_breaks_f_ties() {
    // 1 has g=1,h=1 and 2 has g=2,h=0. Both have f=2, so 2 goes first and 3 is popped before 1.
    let edges = |n: &u32| -> Vec<(u32, u32)> {
        match n {
            0 => vec![(1, 1), (2, 2)],
            1 => vec![(3, 1)],
            2 => vec![(3, 0)],
            _ => vec![],
        }
    };
    let heuristic = |n: &u32| if *n == 1 { 1 } else { 0 };

    let mut expanded = Vec::new();
    let result = find(
        0u32,
        |n| {
            expanded.push(*n);
            edges(n)
        },
        heuristic,
        |&n| n == 3,
        None,
    );

    assert_eq!(expanded, vec![0, 2]);
    assert_eq!(result, Some((vec![0, 2, 3], 2)));
}

#[test]
fn expansion_cap_ends_the_search() {
    let edges = |n: &u32| vec![(n + 1, 1u32)];

    assert_eq!(find(0u32, edges, |_| 0, |&n| n == 10, Some(5)), None);
    assert_eq!(find(0u32, edges, |_| 0, |&n| n == 10, Some(10)).map(|(p, c)| (p.len(), c)), Some((11, 10)));
}
