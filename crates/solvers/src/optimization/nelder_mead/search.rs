use hyperfit_core::{MinimizationProblem, Model, Observer, Snapshot};

use crate::optimization::{Domain, Point, Score, Status, evaluate};

use super::{
    Action, Config, Error, Event, Solution,
    simplex::{Simplex, along, initial_vertices},
};

/// Reflection coefficient.
const RHO: f64 = 1.0;

/// Expansion coefficient.
const CHI: f64 = 2.0;

/// Contraction coefficient.
const PSI: f64 = 0.5;

/// Shrink coefficient.
const SIGMA: f64 = 0.5;

pub(super) fn search<M, P, Obs>(
    model: &M,
    problem: &P,
    x0: &[f64],
    domain: &Domain,
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    domain
        .check_point(x0)
        .map_err(Error::InvalidInitialGuess)?;

    let mut start = x0.to_vec();
    domain.clip(&mut start);

    let mut run = Run {
        model,
        problem,
        domain,
        observer,
        evaluations: 0,
        best: None,
    };

    let Some(mut simplex) = run.simplex(&start, None)? else {
        return run.finish(Status::StoppedByObserver, 0);
    };

    let mut anchor = None;
    let mut iters = 0;
    let status = loop {
        if simplex.is_converged(config) {
            let Some(best) = run.restart_point(anchor, config.f_abs_tol()) else {
                break Status::Converged;
            };
            if run.evaluations + domain.dims() > config.max_evals() {
                break Status::MaxIters;
            }

            tracing::debug!(
                x = ?best.x,
                objective = best.objective,
                violation = best.violation,
                "restarting simplex at a restricted point",
            );
            anchor = Some(best.score());
            let x = best.x.clone();
            match run.simplex(&x, Some(best))? {
                Some(rebuilt) => simplex = rebuilt,
                None => break Status::StoppedByObserver,
            }
            continue;
        }
        if iters >= config.max_iters() || run.evaluations >= config.max_evals() {
            break Status::MaxIters;
        }

        iters += 1;
        if let Flow::Stop = run.step(&mut simplex)? {
            break Status::StoppedByObserver;
        }
        simplex.sort();
    };

    run.finish(status, iters)
}

enum Outcome {
    Point(Point),
    StopEarly,
}

enum Flow {
    Continue,
    Stop,
}

struct Best<I, O> {
    point: Point,
    snapshot: Snapshot<I, O>,
}

/// Evaluation context shared by every step of one search.
struct Run<'r, M: Model, P, Obs> {
    model: &'r M,
    problem: &'r P,
    domain: &'r Domain,
    observer: Obs,
    evaluations: usize,
    best: Option<Best<M::Input, M::Output>>,
}

/// Unwraps an evaluation outcome, returning `Flow::Stop` on early stop.
macro_rules! point_or_stop {
    ($outcome:expr) => {
        match $outcome {
            Outcome::Point(point) => point,
            Outcome::StopEarly => return Ok(Flow::Stop),
        }
    };
}

impl<M, P, Obs> Run<'_, M, P, Obs>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    /// Clips `x` into bounds, evaluates it, and applies the observer action.
    fn eval(&mut self, mut x: Vec<f64>) -> Result<Outcome, Error> {
        self.domain.clip(&mut x);
        self.evaluations += 1;
        let violation = self.domain.violation(&x);
        let best = self.best.as_ref().map(|b| &b.point);

        match evaluate(self.model, self.problem, &x) {
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

    /// Evaluates the starting simplex around `x0`.
    ///
    /// A `known` point at `x0` is reused instead of evaluated again. Returns
    /// `None` if the observer stops the search.
    fn simplex(&mut self, x0: &[f64], known: Option<Point>) -> Result<Option<Simplex>, Error> {
        let mut trials = initial_vertices(x0, self.domain.bounds()).into_iter();
        let mut vertices = Vec::with_capacity(x0.len() + 1);
        if let Some(point) = known {
            trials.next();
            vertices.push(point);
        }

        for x in trials {
            match self.eval(x)? {
                Outcome::Point(point) => vertices.push(point),
                Outcome::StopEarly => return Ok(None),
            }
        }
        Ok(Some(Simplex::new(vertices)))
    }

    /// Returns the best point if the converged search should restart there.
    ///
    /// Clipping and feasibility-first ranking can collapse the simplex onto a
    /// bound or a constraint boundary short of the constrained minimum.
    /// Restarts continue while each one improves on the previous anchor by
    /// more than `tol`.
    fn restart_point(&self, anchor: Option<Score>, tol: f64) -> Option<Point> {
        let best = &self.best.as_ref()?.point;
        let restart = self.domain.restricts(&best.x)
            && anchor.is_none_or(|anchor| best.score().improves_on(&anchor, tol));
        restart.then(|| best.clone())
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

    /// Performs one reflect/expand/contract/shrink step.
    fn step(&mut self, simplex: &mut Simplex) -> Result<Flow, Error> {
        let centroid = simplex.centroid();
        let worst = simplex.worst().x.clone();

        let reflected = point_or_stop!(self.eval(along(&centroid, &worst, RHO))?);

        if reflected.score().is_better_than(&simplex.best().score()) {
            let expanded = point_or_stop!(self.eval(along(&centroid, &worst, RHO * CHI))?);
            if expanded.score().is_better_than(&reflected.score()) {
                simplex.replace_worst(expanded);
            } else {
                simplex.replace_worst(reflected);
            }
            return Ok(Flow::Continue);
        }

        if reflected
            .score()
            .is_better_than(&simplex.second_worst().score())
        {
            simplex.replace_worst(reflected);
            return Ok(Flow::Continue);
        }

        let outside = reflected.score().is_better_than(&simplex.worst().score());
        let t = if outside { PSI * RHO } else { -PSI };
        let contracted = point_or_stop!(self.eval(along(&centroid, &worst, t))?);

        let accept = if outside {
            !reflected.score().is_better_than(&contracted.score())
        } else {
            contracted.score().is_better_than(&simplex.worst().score())
        };
        if accept {
            simplex.replace_worst(contracted);
            return Ok(Flow::Continue);
        }

        self.shrink(simplex)
    }

    /// Moves every vertex halfway toward the best one.
    fn shrink(&mut self, simplex: &mut Simplex) -> Result<Flow, Error> {
        let anchor = simplex.best().x.clone();
        for j in 1..simplex.len() {
            let x = along(&anchor, &simplex.vertex(j).x, -SIGMA);
            let point = point_or_stop!(self.eval(x)?);
            simplex.replace(j, point);
        }
        Ok(Flow::Continue)
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
