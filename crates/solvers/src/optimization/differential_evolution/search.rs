use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use hyperfit_core::{MinimizationProblem, Model, Observer, Snapshot};

use crate::optimization::{
    Domain, DomainError, EvaluateResult, Point, Status, evaluate, nelder_mead,
};

use super::{
    Action, Config, Error, Event, Solution,
    population::{best1bin, best_index, latin_hypercube, objective_stats},
};

pub(super) fn search<M, P, Obs>(
    model: &M,
    problem: &P,
    domain: &Domain,
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model + Sync,
    M::Input: Send,
    M::Output: Send,
    P: MinimizationProblem<Input = M::Input, Output = M::Output> + Sync,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    if !domain.bounds().is_finite() {
        return Err(Error::InvalidBounds(DomainError::UnboundedSearch));
    }

    let dims = domain.dims();
    let size = config.population_size(dims);
    let mut rng = StdRng::seed_from_u64(config.seed());

    let mut run = Run {
        model,
        problem,
        domain,
        config,
        observer,
        evaluations: 0,
        best: None,
    };

    let mut population = latin_hypercube(size, dims, &mut rng);
    let Batch::Points(mut points) = run.evaluate_batch(&population)? else {
        return run.finish(Status::StoppedByObserver, 0);
    };
    if let Some(Action::StopEarly) = run.generation(0, &points) {
        return run.finish(Status::StoppedByObserver, 0);
    }

    let (low, high) = config.mutation();
    let mut status = Status::MaxIters;
    let mut generation = 0;

    while generation < config.max_iters() {
        generation += 1;

        let scale = if low < high {
            rng.gen_range(low..high)
        } else {
            low
        };
        let best = best_index(&points);
        let trials: Vec<Vec<f64>> = (0..size)
            .map(|target| {
                best1bin(
                    &population,
                    target,
                    best,
                    scale,
                    config.recombination(),
                    &mut rng,
                )
            })
            .collect();

        let Batch::Points(trial_points) = run.evaluate_batch(&trials)? else {
            return run.finish(Status::StoppedByObserver, generation);
        };

        for (i, (trial, point)) in trials.into_iter().zip(trial_points).enumerate() {
            if !points[i].score().is_better_than(&point.score()) {
                population[i] = trial;
                points[i] = point;
            }
        }

        if let Some(Action::StopEarly) = run.generation(generation, &points) {
            return run.finish(Status::StoppedByObserver, generation);
        }
        if is_converged(&points, config) {
            status = Status::Converged;
            break;
        }
    }

    if config.polish() {
        run.polish();
    }
    run.finish(status, generation)
}

/// Population objectives have collapsed relative to their mean.
///
/// Never true while any member violates a constraint.
fn is_converged(points: &[Point], config: &Config) -> bool {
    if !points.iter().all(Point::is_feasible) {
        return false;
    }
    let (mean, std) = objective_stats(points);
    std <= config.atol() + config.tol() * mean.abs()
}

enum Batch {
    Points(Vec<Point>),
    StopEarly,
}

enum Outcome {
    Point(Point),
    StopEarly,
}

struct Best<I, O> {
    point: Point,
    snapshot: Snapshot<I, O>,
}

/// Evaluation context shared by every generation of one search.
struct Run<'r, M: Model, P, Obs> {
    model: &'r M,
    problem: &'r P,
    domain: &'r Domain,
    config: &'r Config,
    observer: Obs,
    evaluations: usize,
    best: Option<Best<M::Input, M::Output>>,
}

impl<M, P, Obs> Run<'_, M, P, Obs>
where
    M: Model + Sync,
    M::Input: Send,
    M::Output: Send,
    P: MinimizationProblem<Input = M::Input, Output = M::Output> + Sync,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    /// Evaluates unit-cube members, then reports each result in order.
    fn evaluate_batch(&mut self, members: &[Vec<f64>]) -> Result<Batch, Error> {
        let bounds = self.domain.bounds();
        let xs: Vec<Vec<f64>> = members
            .iter()
            .map(|unit| {
                let mut x = bounds.scale(unit);
                bounds.clip(&mut x);
                x
            })
            .collect();

        let (model, problem, domain) = (self.model, self.problem, self.domain);
        let eval_one = |x: &Vec<f64>| -> (EvaluateResult<M, P>, f64) {
            (evaluate(model, problem, x), domain.violation(x))
        };
        let results: Vec<_> = if self.config.parallel() {
            xs.par_iter().map(eval_one).collect()
        } else {
            xs.iter().map(eval_one).collect()
        };
        self.evaluations += results.len();

        let mut points = Vec::with_capacity(results.len());
        for (x, (result, violation)) in xs.into_iter().zip(results) {
            match self.observe(x, result, violation)? {
                Outcome::Point(point) => points.push(point),
                Outcome::StopEarly => return Ok(Batch::StopEarly),
            }
        }
        Ok(Batch::Points(points))
    }

    fn observe(
        &mut self,
        x: Vec<f64>,
        result: EvaluateResult<M, P>,
        violation: f64,
    ) -> Result<Outcome, Error> {
        let best = self.best.as_ref().map(|b| &b.point);

        match result {
            Ok(eval) => {
                let point = Point::from_eval(&eval, violation);
                let event = Event::Evaluated {
                    point: &point,
                    input: &eval.snapshot.input,
                    output: &eval.snapshot.output,
                    best,
                };
                match self.observer.observe(&event) {
                    Some(Action::StopEarly) => {
                        self.offer(&point, eval.snapshot);
                        Ok(Outcome::StopEarly)
                    }
                    Some(Action::AssumeWorse) => Ok(Outcome::Point(Point::worst(x))),
                    None => {
                        self.offer(&point, eval.snapshot);
                        Ok(Outcome::Point(point))
                    }
                }
            }
            Err(e) => match Event::emit_failure(&x, best, &e, &mut self.observer) {
                Some(Action::StopEarly) => Ok(Outcome::StopEarly),
                Some(Action::AssumeWorse) => Ok(Outcome::Point(Point::worst(x))),
                None => Err(e.into()),
            },
        }
    }

    fn offer(&mut self, point: &Point, snapshot: Snapshot<M::Input, M::Output>) {
        let improves = self
            .best
            .as_ref()
            .is_none_or(|best| point.score().is_better_than(&best.point.score()));
        if improves {
            self.best = Some(Best {
                point: point.clone(),
                snapshot,
            });
        }
    }

    fn generation(&mut self, generation: usize, points: &[Point]) -> Option<Action> {
        let (mean, std) = objective_stats(points);
        let best = self.best.as_ref().map(|b| &b.point);

        if let Some(best) = best {
            tracing::debug!(
                generation,
                best_objective = best.objective,
                best_violation = best.violation,
                mean,
                std,
                "differential evolution generation",
            );
        }

        let event = Event::Generation {
            generation,
            best,
            mean,
            std,
        };
        match self.observer.observe(&event) {
            Some(Action::StopEarly) => Some(Action::StopEarly),
            _ => None,
        }
    }

    /// Refines the best member with a bounded Nelder–Mead search.
    ///
    /// Failed polish evaluations are ranked behind every other point, and the
    /// polished point is kept only if it improves on the best member.
    fn polish(&mut self) {
        let Some(best) = &self.best else {
            return;
        };
        let x0 = best.point.x.clone();
        let config = nelder_mead::Config::scaled(self.domain.dims());
        let observer = |event: &nelder_mead::Event<'_, M, P>| match event {
            nelder_mead::Event::Evaluated { .. } => None,
            _ => Some(nelder_mead::Action::AssumeWorse),
        };

        match nelder_mead::minimize(
            self.model,
            self.problem,
            &x0,
            self.domain,
            &config,
            observer,
        ) {
            Ok(solution) => {
                self.evaluations += solution.evaluations;
                let point = Point::new(solution.x, solution.objective, solution.violation);
                self.offer(&point, solution.snapshot);
            }
            Err(error) => tracing::debug!(%error, "polish failed, keeping best member"),
        }
    }

    fn finish(self, status: Status, iters: usize) -> Result<Solution<M::Input, M::Output>, Error> {
        let best = self.best.ok_or(Error::NoSuccessfulEvaluation)?;
        Ok(Solution {
            status,
            x: best.point.x,
            objective: best.point.objective,
            violation: best.point.violation,
            snapshot: best.snapshot,
            iters,
            evaluations: self.evaluations,
        })
    }
}
