//! The requirement-constraint pass, the format-constraint pass, and the
//! AHB-expression orchestrator that runs both -- the core evaluation logic
//! of the engine, operating on an already-resolved AST (`ahb-resolve`).

pub mod builder;
pub mod error;
pub mod fc;
pub mod orchestrator;
pub mod rc;

pub use error::{EvalError, IllTyped, InvalidExpression, MissingInformation};
pub use fc::evaluate_format_constraints;
pub use orchestrator::{evaluate_ahb_expression, Providers};
pub use rc::{evaluate_condition_expression_rc, evaluate_requirement_constraints, EvaluatedComposition, RcNode};
