//! Stochastic operators: tournament selection, order crossover, swap mutation.
//!
//! Every operator takes an explicit random source so runs stay reproducible
//! under a fixed [`RunSeed`](crate::RunSeed). All three preserve the
//! permutation invariant: given valid parents, their outputs are valid
//! permutations of the same gene set.

use rand::{Rng, seq::index};

use crate::{ga::population::Individual, problem::route::Route};

/// Selects a parent by tournament.
///
/// Draws `tournament_size` distinct indices uniformly without replacement
/// and returns the drawn individual with the best (shortest) fitness. Ties
/// resolve to the earliest-drawn index, so the outcome is fully determined
/// by the draw.
///
/// # Panics
///
/// Panics if `tournament_size` is zero or exceeds the number of
/// individuals. Both are caller configuration errors;
/// [`GaConfig::validate`](crate::GaConfig::validate) rules them out.
pub fn tournament_select<'a, R>(
    individuals: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0, "tournament must draw at least one");
    index::sample(rng, individuals.len(), tournament_size)
        .iter()
        .map(|i| &individuals[i])
        .min_by(|a, b| a.fitness().cmp(&b.fitness()))
        .expect("tournament draws at least one individual")
}

/// Order crossover (OX): recombines two parent routes into two children.
///
/// Two distinct cut points `start < end` are drawn uniformly over the index
/// range. Child 1 keeps `parent1[start..end]` in place and fills the
/// remaining slots left to right with `parent2`'s genes in `parent2`'s
/// order, skipping genes already present in the segment; child 2 is built
/// symmetrically. OX never drops or duplicates a gene, so valid parents
/// always produce valid children.
///
/// Routes with fewer than two genes have no cut points to draw and are
/// returned as clones.
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn order_crossover<R>(parent1: &Route, parent2: &Route, rng: &mut R) -> (Route, Route)
where
    R: Rng + ?Sized,
{
    assert_eq!(parent1.len(), parent2.len(), "parents must be same length");
    let size = parent1.len();
    if size < 2 {
        return (parent1.clone(), parent2.clone());
    }

    let mut cuts = index::sample(rng, size, 2).into_vec();
    cuts.sort_unstable();
    let (start, end) = (cuts[0], cuts[1]);

    (
        ox_child(parent1.genes(), parent2.genes(), start, end),
        ox_child(parent2.genes(), parent1.genes(), start, end),
    )
}

/// Builds one OX child: the segment `seg_parent[start..end]` stays in place,
/// the other slots are filled left to right with `fill_parent`'s genes in
/// order, skipping segment genes.
///
/// The fill pass visits every non-segment slot exactly once: the segment
/// holds `end - start` genes, so exactly `size - (end - start)` fill genes
/// survive the skip, one per empty slot.
fn ox_child(seg_parent: &[usize], fill_parent: &[usize], start: usize, end: usize) -> Route {
    let size = seg_parent.len();
    let segment = &seg_parent[start..end];

    let mut genes: Vec<Option<usize>> = vec![None; size];
    for (slot, &gene) in genes[start..end].iter_mut().zip(segment) {
        *slot = Some(gene);
    }

    let mut next_slot = 0;
    for &gene in fill_parent {
        if segment.contains(&gene) {
            continue;
        }
        while genes[next_slot].is_some() {
            next_slot += 1;
        }
        genes[next_slot] = Some(gene);
        next_slot += 1;
    }

    Route::from_genes(
        genes
            .into_iter()
            .map(|gene| gene.expect("OX fills every slot"))
            .collect(),
    )
}

/// Swap mutation, applied in place.
///
/// For each position `i`, independently with probability `rate`, exchanges
/// the gene at `i` with the gene at a uniformly random position (possibly
/// `i` itself, a no-op). Swapping never adds or removes a value, so the
/// gene multiset is preserved. At `rate` 0.0 the route is untouched.
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]`.
pub fn swap_mutate<R>(route: &mut Route, rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let len = route.len();
    for i in 0..len {
        if rng.random_bool(rate) {
            let j = rng.random_range(0..len);
            route.swap_genes(i, j);
        }
    }
}
