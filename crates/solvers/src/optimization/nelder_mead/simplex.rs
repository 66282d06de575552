use crate::optimization::{Bounds, Point};

use super::Config;

/// Relative step used to build the initial simplex.
const NONZERO_STEP: f64 = 0.05;

/// Absolute step used for initial components that are exactly zero.
const ZERO_STEP: f64 = 0.00025;

/// Builds the `n + 1` starting vertices around `x0`.
///
/// Vertex `k` perturbs component `k - 1` of `x0`. Perturbations that leave
/// the bounds are reflected back across the limit they crossed, then every
/// vertex is clipped into the bounds.
pub(super) fn initial_vertices(x0: &[f64], bounds: &Bounds) -> Vec<Vec<f64>> {
    let mut vertices = Vec::with_capacity(x0.len() + 1);
    vertices.push(x0.to_vec());

    for k in 0..x0.len() {
        let mut y = x0.to_vec();
        y[k] = if y[k] == 0.0 {
            ZERO_STEP
        } else {
            (1.0 + NONZERO_STEP) * y[k]
        };

        let (lower, upper) = (bounds.lower()[k], bounds.upper()[k]);
        if y[k] > upper {
            y[k] = 2.0 * upper - y[k];
        } else if y[k] < lower {
            y[k] = 2.0 * lower - y[k];
        }
        bounds.clip(&mut y);
        vertices.push(y);
    }

    vertices
}

/// Returns `c + t·(c − w)`.
///
/// Reflection, expansion and both contractions are points on the line
/// through the centroid `c` and the worst vertex `w`.
pub(super) fn along(c: &[f64], w: &[f64], t: f64) -> Vec<f64> {
    c.iter().zip(w).map(|(ci, wi)| ci + t * (ci - wi)).collect()
}

/// The simplex, with vertices kept sorted from best to worst.
pub(super) struct Simplex {
    vertices: Vec<Point>,
}

impl Simplex {
    pub(super) fn new(vertices: Vec<Point>) -> Self {
        let mut simplex = Self { vertices };
        simplex.sort();
        simplex
    }

    pub(super) fn sort(&mut self) {
        self.vertices.sort_by(|a, b| a.score().rank(&b.score()));
    }

    pub(super) fn best(&self) -> &Point {
        &self.vertices[0]
    }

    pub(super) fn worst(&self) -> &Point {
        &self.vertices[self.vertices.len() - 1]
    }

    pub(super) fn second_worst(&self) -> &Point {
        &self.vertices[self.vertices.len() - 2]
    }

    pub(super) fn replace_worst(&mut self, point: Point) {
        let last = self.vertices.len() - 1;
        self.vertices[last] = point;
    }

    pub(super) fn replace(&mut self, index: usize, point: Point) {
        self.vertices[index] = point;
    }

    pub(super) fn len(&self) -> usize {
        self.vertices.len()
    }

    pub(super) fn vertex(&self, index: usize) -> &Point {
        &self.vertices[index]
    }

    /// Centroid of every vertex except the worst.
    pub(super) fn centroid(&self) -> Vec<f64> {
        let n = self.vertices.len() - 1;
        let mut c = vec![0.0; self.vertices[0].x.len()];
        for vertex in &self.vertices[..n] {
            for (ci, xi) in c.iter_mut().zip(&vertex.x) {
                *ci += xi;
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let scale = 1.0 / n as f64;
        c.iter_mut().for_each(|ci| *ci *= scale);
        c
    }

    pub(super) fn is_converged(&self, config: &Config) -> bool {
        let best = self.best();
        let spread = |a: f64, b: f64| {
            let d = (a - b).abs();
            if d.is_nan() { f64::INFINITY } else { d }
        };

        let x_spread = self.vertices[1..]
            .iter()
            .flat_map(|v| v.x.iter().zip(&best.x).map(|(a, b)| spread(*a, *b)))
            .fold(0.0, f64::max);
        let f_spread = self.vertices[1..]
            .iter()
            .map(|v| {
                spread(v.objective, best.objective).max(spread(v.violation, best.violation))
            })
            .fold(0.0, f64::max);

        x_spread <= config.x_abs_tol() && f_spread <= config.f_abs_tol()
    }
}
