use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

/// A record derived field by field from the record `S`.
///
/// Implementations are generated by [`projections!`](crate::projections) for
/// every struct carrying `#[copy_target(source = S)]`. Nested records, and
/// records inside containers, are copied through the projection declared
/// between their own types, so every level of the result is a fresh value.
///
/// The batch variants take `Option` inputs and return `None` for `None`.
/// Collections are allocated at the input's length.
pub trait Projection<S>: Sized {
    /// Builds the projection of `source`.
    fn forward(source: &S) -> Self;

    /// Builds a source record from this projection. Fields populated only by
    /// one-way mappings (expressions, named methods) take their default.
    fn reverse(&self) -> S;

    /// [`forward`](Self::forward), then `customize` on the result.
    fn forward_with(source: &S, customize: impl FnOnce(&S, &mut Self)) -> Self {
        let mut target = Self::forward(source);
        customize(source, &mut target);
        target
    }

    fn forward_opt(source: Option<&S>) -> Option<Self> {
        source.map(Self::forward)
    }

    fn forward_list(sources: Option<&[S]>) -> Option<Vec<Self>> {
        Self::forward_list_with(sources, |_, _| {})
    }

    fn forward_list_with(
        sources: Option<&[S]>,
        mut customize: impl FnMut(&S, &mut Self),
    ) -> Option<Vec<Self>> {
        let sources = sources?;
        let mut targets = Vec::with_capacity(sources.len());

        for source in sources {
            targets.push(Self::forward_with(source, &mut customize));
        }

        Some(targets)
    }

    fn forward_set<H>(sources: Option<&HashSet<S, H>>) -> Option<HashSet<Self, H>>
    where
        Self: Eq + Hash,
        H: BuildHasher + Default,
    {
        let sources = sources?;
        let mut targets = HashSet::with_capacity_and_hasher(sources.len(), H::default());

        for source in sources {
            targets.insert(Self::forward(source));
        }

        Some(targets)
    }

    /// Keys are cloned; values are projected.
    fn forward_map<K, H>(sources: Option<&HashMap<K, S, H>>) -> Option<HashMap<K, Self, H>>
    where
        K: Clone + Eq + Hash,
        H: BuildHasher + Default,
    {
        let sources = sources?;
        let mut targets = HashMap::with_capacity_and_hasher(sources.len(), H::default());

        for (key, source) in sources {
            targets.insert(key.clone(), Self::forward(source));
        }

        Some(targets)
    }

    fn forward_array<const N: usize>(sources: Option<&[S; N]>) -> Option<[Self; N]> {
        sources.map(|sources| sources.each_ref().map(Self::forward))
    }

    /// [`reverse`](Self::reverse), then `customize` on the result.
    fn reverse_with(&self, customize: impl FnOnce(&Self, &mut S)) -> S {
        let mut source = self.reverse();
        customize(self, &mut source);
        source
    }

    fn reverse_opt(target: Option<&Self>) -> Option<S> {
        target.map(Self::reverse)
    }

    fn reverse_list(targets: Option<&[Self]>) -> Option<Vec<S>> {
        Self::reverse_list_with(targets, |_, _| {})
    }

    fn reverse_list_with(
        targets: Option<&[Self]>,
        mut customize: impl FnMut(&Self, &mut S),
    ) -> Option<Vec<S>> {
        let targets = targets?;
        let mut sources = Vec::with_capacity(targets.len());

        for target in targets {
            sources.push(target.reverse_with(&mut customize));
        }

        Some(sources)
    }

    fn reverse_set<H>(targets: Option<&HashSet<Self, H>>) -> Option<HashSet<S, H>>
    where
        S: Eq + Hash,
        H: BuildHasher + Default,
    {
        let targets = targets?;
        let mut sources = HashSet::with_capacity_and_hasher(targets.len(), H::default());

        for target in targets {
            sources.insert(target.reverse());
        }

        Some(sources)
    }

    fn reverse_map<K, H>(targets: Option<&HashMap<K, Self, H>>) -> Option<HashMap<K, S, H>>
    where
        K: Clone + Eq + Hash,
        H: BuildHasher + Default,
    {
        let targets = targets?;
        let mut sources = HashMap::with_capacity_and_hasher(targets.len(), H::default());

        for (key, target) in targets {
            sources.insert(key.clone(), target.reverse());
        }

        Some(sources)
    }

    fn reverse_array<const N: usize>(targets: Option<&[Self; N]>) -> Option<[S; N]> {
        targets.map(|targets| targets.each_ref().map(Self::reverse))
    }
}
