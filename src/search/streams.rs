//! Per-member random streams.
//!
//! Each population member gets its own `StdRng`, seeded from the master
//! generator in member order. Work mapped over the streams therefore
//! produces the same values whether it runs sequentially or on the rayon
//! pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws `n` independent generators from `rng`, in order.
pub(crate) fn member_rngs<R: Rng>(rng: &mut R, n: usize) -> Vec<StdRng> {
    (0..n).map(|_| StdRng::seed_from_u64(rng.random())).collect()
}

/// Applies `f(member, rng)` to every member stream; output follows member
/// order.
#[cfg(feature = "parallel")]
pub(crate) fn map_members<R, T, F>(rng: &mut R, n: usize, parallel: bool, f: F) -> Vec<T>
where
    R: Rng,
    T: Send,
    F: Fn(usize, &mut StdRng) -> T + Sync + Send,
{
    use rayon::prelude::*;

    let streams = member_rngs(rng, n);
    if parallel {
        streams
            .into_par_iter()
            .enumerate()
            .map(|(i, mut r)| f(i, &mut r))
            .collect()
    } else {
        streams
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| f(i, &mut r))
            .collect()
    }
}

/// Applies `f(member, rng)` to every member stream; output follows member
/// order.
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_members<R, T, F>(rng: &mut R, n: usize, _parallel: bool, f: F) -> Vec<T>
where
    R: Rng,
    T: Send,
    F: Fn(usize, &mut StdRng) -> T + Sync + Send,
{
    member_rngs(rng, n)
        .into_iter()
        .enumerate()
        .map(|(i, mut r)| f(i, &mut r))
        .collect()
}
