use std::{convert::Infallible, f64::consts::PI};

use approx::assert_relative_eq;
use thiserror::Error;

use hyperfit_core::{MinimizationProblem, Model};

use crate::optimization::{Bounds, Domain, DomainError, LinearConstraint, Status};

use super::{Action, Config, Error, Event, minimize, minimize_unobserved};

/// Evaluates a closure of the solver variables.
struct Function<F>(F);

impl<F> Model for Function<F>
where
    F: Fn(&[f64]) -> f64,
{
    type Input = Vec<f64>;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &Vec<f64>) -> Result<f64, Self::Error> {
        Ok((self.0)(x.as_slice()))
    }
}

/// Uses the model output as the objective.
struct Direct;

impl MinimizationProblem for Direct {
    type Input = Vec<f64>;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
        Ok(x.to_vec())
    }

    fn objective(&self, _input: &Vec<f64>, output: &f64) -> Result<f64, Self::Error> {
        Ok(*output)
    }
}

fn rosenbrock(x: &[f64]) -> f64 {
    100.0 * (x[1] - x[0] * x[0]).powi(2) + (1.0 - x[0]).powi(2)
}

fn rastrigin(x: &[f64]) -> f64 {
    10.0 * 2.0 + x.iter().map(|v| v * v - 10.0 * (2.0 * PI * v).cos()).sum::<f64>()
}

fn square_domain(half_width: f64) -> Domain {
    Domain::new(Bounds::new(vec![-half_width; 2], vec![half_width; 2]).unwrap())
}

fn config() -> Config {
    Config::new(300, 15, 1e-8).unwrap().with_seed(1)
}

#[test]
fn minimizes_rosenbrock() {
    let solution =
        minimize_unobserved(&Function(rosenbrock), &Direct, &square_domain(5.0), &config())
            .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-4);
    assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-4);
    assert!(solution.evaluations > 30 * solution.iters);
}

#[test]
fn finds_global_minimum_of_rastrigin() {
    let solution =
        minimize_unobserved(&Function(rastrigin), &Direct, &square_domain(5.12), &config())
            .expect("should converge");

    assert_relative_eq!(solution.x[0], 0.0, epsilon = 1e-4);
    assert_relative_eq!(solution.x[1], 0.0, epsilon = 1e-4);
    assert!(solution.objective < 1e-6);
}

#[test]
fn converges_on_offset_bowl_without_polish() {
    let bowl = |x: &[f64]| 1.0 + (x[0] - 0.3).powi(2) + (x[1] + 0.2).powi(2);
    let config = Config::new(300, 10, 1e-6)
        .unwrap()
        .with_seed(4)
        .with_polish(false);

    let solution = minimize_unobserved(&Function(bowl), &Direct, &square_domain(1.0), &config)
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.iters < 300);
    assert_relative_eq!(solution.x[0], 0.3, epsilon = 1e-2);
    assert_relative_eq!(solution.x[1], -0.2, epsilon = 1e-2);
}

#[test]
fn same_seed_reproduces_search_in_parallel_and_serial() {
    let model = Function(rastrigin);
    let domain = square_domain(5.12);
    let config = Config::new(20, 10, 1e-8).unwrap().with_seed(9);

    let parallel = minimize_unobserved(&model, &Direct, &domain, &config.with_parallel(true))
        .expect("should run");
    let serial = minimize_unobserved(&model, &Direct, &domain, &config.with_parallel(false))
        .expect("should run");

    assert_eq!(parallel.x, serial.x);
    assert_eq!(parallel.evaluations, serial.evaluations);
}

#[test]
fn linear_constraint_is_respected() {
    let bowl = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] - 1.0).powi(2);
    let domain = square_domain(2.0).with_constraint(
        LinearConstraint::new(vec![vec![1.0, 1.0]], vec![f64::NEG_INFINITY], vec![1.0]).unwrap(),
    );

    let solution = minimize_unobserved(&Function(bowl), &Direct, &domain, &config())
        .expect("should converge");

    assert_relative_eq!(solution.violation, 0.0);
    assert_relative_eq!(solution.x[0], 0.5, epsilon = 1e-3);
    assert_relative_eq!(solution.x[1], 0.5, epsilon = 1e-3);
}

#[test]
fn rejects_unbounded_domain() {
    let result = minimize_unobserved(
        &Function(rosenbrock),
        &Direct,
        &Domain::unbounded(2),
        &config(),
    );

    assert!(matches!(
        result,
        Err(Error::InvalidBounds(DomainError::UnboundedSearch))
    ));
}

#[test]
fn observer_can_stop_after_a_generation() {
    let model: Function<fn(&[f64]) -> f64> = Function(rosenbrock);
    let mut generations = Vec::new();
    let observer = |event: &Event<'_, Function<fn(&[f64]) -> f64>, Direct>| match event {
        Event::Generation {
            generation, best, ..
        } => {
            assert!(best.is_some());
            generations.push(*generation);
            (*generation == 3).then_some(Action::StopEarly)
        }
        _ => None,
    };

    let solution = minimize(&model, &Direct, &square_domain(5.0), &config(), observer)
        .expect("should stop early");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 3);
    assert_eq!(generations, vec![0, 1, 2, 3]);
    assert_eq!(solution.evaluations, 4 * 30);
}

#[derive(Debug, Error)]
#[error("x is below the valid range")]
struct BelowRange;

/// Fails for inputs below 0.2; bowl centred on x = 0.5.
struct FailsBelow;

impl Model for FailsBelow {
    type Input = Vec<f64>;
    type Output = f64;
    type Error = BelowRange;

    fn call(&self, x: &Vec<f64>) -> Result<f64, Self::Error> {
        if x[0] < 0.2 {
            return Err(BelowRange);
        }
        Ok((x[0] - 0.5).powi(2))
    }
}

fn unit_interval() -> Domain {
    Domain::new(Bounds::new(vec![-1.0], vec![1.0]).unwrap())
}

#[test]
fn model_errors_propagate_without_observer() {
    let result = minimize_unobserved(&FailsBelow, &Direct, &unit_interval(), &config());

    assert!(matches!(result, Err(Error::Model(_))));
}

#[test]
fn assume_worse_recovers_from_model_errors() {
    let mut failures = 0;
    let observer = |event: &Event<'_, FailsBelow, Direct>| match event {
        Event::ModelFailed { .. } => {
            failures += 1;
            Some(Action::AssumeWorse)
        }
        _ => None,
    };
    let config = Config::new(100, 10, 1e-8).unwrap().with_seed(2);

    let solution = minimize(&FailsBelow, &Direct, &unit_interval(), &config, observer)
        .expect("should recover");

    assert!(failures > 0);
    assert_relative_eq!(solution.x[0], 0.5, epsilon = 1e-6);
}
