use thiserror::Error;

use hyperfit_core::{MinimizationProblem, Model, Snapshot};

/// The result of evaluating a minimization problem at a given `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O> {
    pub x: Vec<f64>,

    pub objective: f64,

    pub snapshot: Snapshot<I, O>,
}

/// Errors that can occur when evaluating a minimization problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// Failed to construct input or compute the objective.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Type alias for the result of [`evaluate`].
pub type EvaluateResult<M, P> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output>,
    EvalError<<M as Model>::Error, <P as MinimizationProblem>::Error>,
>;

/// Evaluates the model in the context of a minimization problem.
///
/// This function maps `x` to model input, calls the model, then computes
/// the objective from the input and output. A NaN objective is reported as
/// `+∞` so that it always ranks behind every finite evaluation.
///
/// # Errors
///
/// Returns an error if input mapping, model call, or objective computation fails.
pub fn evaluate<M, P>(model: &M, problem: &P, x: &[f64]) -> EvaluateResult<M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    let input = problem.input(x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let objective = problem
        .objective(&input, &output)
        .map_err(EvalError::Problem)?;

    Ok(Evaluation {
        x: x.to_vec(),
        objective: if objective.is_nan() {
            f64::INFINITY
        } else {
            objective
        },
        snapshot: Snapshot::new(input, output),
    })
}
