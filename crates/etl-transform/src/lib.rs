//! Field-level record transformations.
//!
//! A transform is a list of [`TransformRule`]s applied in place to a
//! [`etl_model::RecordSet`]. Each rule targets exactly one field and is a
//! pure function of that field's value: unit scaling, fixed-decimal
//! rounding, or string-to-number coercion where unparsable values become
//! the null marker instead of aborting the job.

mod error;
mod numeric;
mod rules;

pub use error::{Result, TransformError};
pub use numeric::{parse_numeric, round_to};
pub use rules::{RuleOp, TransformRule, apply_rules, rounding_precision};
