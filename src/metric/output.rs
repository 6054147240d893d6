use crate::{
    error::{EvaluationError, Result},
    util,
};

/// A raw output vector together with the class the arg-max rule picks for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationOutput<'a> {
    pub raw: &'a [f32],
    pub actual_class: usize,
}

impl<'a> ClassificationOutput<'a> {
    pub fn from_vector(raw: &'a [f32]) -> Result<Self> {
        let actual_class = arg_max_class(raw)?;
        Ok(Self { raw, actual_class })
    }
}

/// Index of the largest value in `vector`; the lowest index wins on ties.
pub fn arg_max_class(vector: &[f32]) -> Result<usize> {
    if vector.is_empty() {
        return Err(EvaluationError::ConfigError(
            "Cannot pick a class from an empty output vector".to_string(),
        ));
    }
    Ok(util::find_max_index(vector))
}
