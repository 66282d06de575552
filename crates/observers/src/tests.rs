use std::convert::Infallible;

use approx::assert_relative_eq;
use thiserror::Error;

use hyperfit_core::{MinimizationProblem, Model};
use hyperfit_solvers::optimization::{
    Bounds, Domain, Status, differential_evolution as de, nelder_mead as nm,
};

use crate::{Chain, RecoverFailures, StopBelow, TracingObserver};

#[derive(Debug, Error)]
#[error("x is below the valid range")]
struct BelowRange;

/// Fails for inputs below 0.1; bowl centred on x = 0.25 with minimum 1.
struct FailsBelow;

impl Model for FailsBelow {
    type Input = f64;
    type Output = f64;
    type Error = BelowRange;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        if *x < 0.1 {
            return Err(BelowRange);
        }
        Ok(1.0 + (x - 0.25).powi(2))
    }
}

struct Scalar;

impl MinimizationProblem for Scalar {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Self::Error> {
        Ok(*output)
    }
}

#[test]
fn recover_failures_lets_nelder_mead_finish() {
    let mut recover = RecoverFailures::new();

    let solution = nm::minimize(
        &FailsBelow,
        &Scalar,
        &[1.0],
        &Domain::unbounded(1),
        &nm::Config::default(),
        &mut recover,
    )
    .expect("should recover");

    assert!(recover.failures() > 0);
    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 0.25, epsilon = 1e-6);
}

#[test]
fn stop_below_ends_differential_evolution() {
    let domain = Domain::new(Bounds::new(vec![0.0], vec![1.0]).unwrap());
    let config = de::Config::new(200, 10, 1e-12).unwrap().with_seed(3);

    let solution = de::minimize(
        &FailsBelow,
        &Scalar,
        &domain,
        &config,
        Chain(StopBelow::new(1.01), RecoverFailures::new()),
    )
    .expect("should stop");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert!(solution.objective <= 1.01);
}

#[test]
fn tracing_observer_tracks_best_objective() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut progress = TracingObserver::new("nelder_mead").every(5);

        let solution = nm::minimize(
            &FailsBelow,
            &Scalar,
            &[1.0],
            &Domain::unbounded(1),
            &nm::Config::default(),
            Chain(RecoverFailures::new(), &mut progress),
        )
        .expect("should recover");

        assert_eq!(progress.events(), solution.evaluations);
        assert_relative_eq!(progress.best(), solution.objective);
    });
}

#[test]
fn per_generation_logging_lands_on_generation_events() {
    let domain = Domain::new(Bounds::new(vec![0.0], vec![1.0]).unwrap());
    let config = de::Config::new(20, 10, 1e-12)
        .unwrap()
        .with_seed(5)
        .with_polish(false);
    let population = config.population_size(domain.dims());

    let mut progress = TracingObserver::per_generation("differential_evolution", population);
    let mut seen = 0;
    let mut generations = Vec::new();
    let record = |event: &de::Event<'_, FailsBelow, Scalar>| -> Option<de::Action> {
        seen += 1;
        if let de::Event::Generation { .. } = event {
            generations.push(seen);
        }
        None
    };

    let solution = de::minimize(
        &FailsBelow,
        &Scalar,
        &domain,
        &config,
        Chain(Chain(RecoverFailures::new(), &mut progress), record),
    )
    .expect("should finish");

    assert_eq!(generations.len(), solution.iters + 1);
    assert!(generations.iter().all(|&index| index % (population + 1) == 0));
    assert_eq!(progress.events(), seen);
}
