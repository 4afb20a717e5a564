use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::error::LoadError;
use crate::models::{AssessmentDefinition, MAX_AUTHORED_OPTIONS};

const SAMPLE_DEFINITION: &str = include_str!("../../quizzes/python-data-structures.json");

/// Read, parse and validate an assessment definition.
pub fn load_definition_from_json<P: AsRef<Path>>(path: P) -> Result<AssessmentDefinition, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let definition = parse_definition(&json_content, &path.display().to_string())?;
    info!(
        "loaded {:?} from {} ({} questions)",
        definition.title,
        path.display(),
        definition.question_count()
    );
    Ok(definition)
}

/// The bundled "Python Data Structures" assessment.
pub fn sample_definition() -> Result<AssessmentDefinition, LoadError> {
    parse_definition(SAMPLE_DEFINITION, "<bundled sample>")
}

fn parse_definition(json: &str, origin: &str) -> Result<AssessmentDefinition, LoadError> {
    let definition: AssessmentDefinition =
        serde_json::from_str(json).map_err(|source| LoadError::Parse {
            path: origin.to_string(),
            source,
        })?;

    definition.validate()?;

    for (index, question) in definition.questions.iter().enumerate() {
        if question.options.len() > MAX_AUTHORED_OPTIONS {
            warn!(
                "{}: question {} has {} options, authoring tools allow {}",
                origin,
                index + 1,
                question.options.len(),
                MAX_AUTHORED_OPTIONS
            );
        }
    }

    Ok(definition)
}
