mod definition;

pub use definition::{
    validate, AnswerOption, AssessmentDefinition, Question, MAX_AUTHORED_OPTIONS,
};

#[cfg(test)]
pub(crate) use definition::fixtures;
