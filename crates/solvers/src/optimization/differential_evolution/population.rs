use rand::{Rng, seq::SliceRandom};

use crate::optimization::Point;

/// Stratified initial population in the unit hypercube.
///
/// Each dimension is split into `size` equal segments, one sample is drawn
/// uniformly inside each segment, and the samples are shuffled independently
/// per dimension.
pub(super) fn latin_hypercube<R: Rng>(size: usize, dims: usize, rng: &mut R) -> Vec<Vec<f64>> {
    #[allow(clippy::cast_precision_loss)]
    let segment = 1.0 / size as f64;
    let mut population = vec![vec![0.0; dims]; size];

    for j in 0..dims {
        #[allow(clippy::cast_precision_loss)]
        let mut column: Vec<f64> = (0..size)
            .map(|k| (k as f64 + rng.r#gen::<f64>()) * segment)
            .collect();
        column.shuffle(rng);
        for (member, value) in population.iter_mut().zip(column) {
            member[j] = value;
        }
    }

    population
}

/// Builds the `best1bin` trial vector for member `target`.
///
/// The mutant is `best + scale·(r0 − r1)` for two distinct random members
/// other than the target. Binomial crossover takes each mutant component
/// with probability `recombination`, and always at one random position.
/// Components that leave the unit hypercube are redrawn uniformly.
pub(super) fn best1bin<R: Rng>(
    population: &[Vec<f64>],
    target: usize,
    best: usize,
    scale: f64,
    recombination: f64,
    rng: &mut R,
) -> Vec<f64> {
    let (r0, r1) = distinct_pair(population.len(), target, rng);
    let dims = population[target].len();
    let fill = rng.gen_range(0..dims);

    let mut trial = population[target].clone();
    for j in 0..dims {
        let cross = rng.r#gen::<f64>() < recombination;
        if cross || j == fill {
            trial[j] = population[best][j] + scale * (population[r0][j] - population[r1][j]);
        }
    }

    for value in &mut trial {
        if !(0.0..=1.0).contains(value) {
            *value = rng.r#gen::<f64>();
        }
    }
    trial
}

/// Draws two distinct indices in `0..size`, both different from `exclude`.
fn distinct_pair<R: Rng>(size: usize, exclude: usize, rng: &mut R) -> (usize, usize) {
    let mut draw = |other: Option<usize>| loop {
        let k = rng.gen_range(0..size);
        if k != exclude && Some(k) != other {
            return k;
        }
    };
    let r0 = draw(None);
    let r1 = draw(Some(r0));
    (r0, r1)
}

/// Index of the best ranked member.
pub(super) fn best_index(points: &[Point]) -> usize {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.score().rank(&b.score()))
        .map_or(0, |(i, _)| i)
}

/// Mean and standard deviation of the population objectives.
pub(super) fn objective_stats(points: &[Point]) -> (f64, f64) {
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let mean = points.iter().map(|p| p.objective).sum::<f64>() / n;
    let var = points
        .iter()
        .map(|p| (p.objective - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, var.sqrt())
}
