//! Persona file loading.
//!
//! Accepts a JSON array of persona objects or an object wrapping the array
//! under `personas`. `-` reads standard input.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::persona::PersonaRecord;

#[derive(Deserialize)]
#[serde(untagged)]
enum PersonaDocument {
    List(Vec<PersonaRecord>),
    Wrapped { personas: Vec<PersonaRecord> },
}

/// Decode persona records from JSON text.
pub fn parse_personas(text: &str, source_name: &str) -> Result<Vec<PersonaRecord>> {
    // Decode the raw value first so malformed JSON keeps its line/column.
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| Error::input_malformed(source_name, e))?;
    let document: PersonaDocument = serde_json::from_value(value).map_err(|e| Error::InputMalformed {
        source_name: source_name.to_string(),
        message: format!("expected an array of personas or {{\"personas\": [...]}} ({})", e),
        source: Some(e),
    })?;

    Ok(match document {
        PersonaDocument::List(personas) => personas,
        PersonaDocument::Wrapped { personas } => personas,
    })
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Error::IoRead {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
        return Ok(text);
    }

    std::fs::read_to_string(path).map_err(|e| Error::IoRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load and concatenate personas from every path, in order.
///
/// An empty total is not an error here; the monitor reports it as a
/// rejected population.
pub fn load_personas<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PersonaRecord>> {
    let mut personas = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let name = if path == Path::new("-") {
            "<stdin>".to_string()
        } else {
            path.display().to_string()
        };

        let text = read_source(path)?;
        let batch = parse_personas(&text, &name)?;
        debug!(source = %name, count = batch.len(), "Loaded personas");
        personas.extend(batch);
    }

    if personas.is_empty() {
        warn!(sources = paths.len(), "No persona records found in input");
    }

    Ok(personas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_array() {
        let personas = parse_personas(r#"[{"id": "a"}, {"id": 2}]"#, "test").unwrap();
        assert_eq!(personas.len(), 2);
        assert_eq!(personas[1].display_id(), "2");
    }

    #[test]
    fn test_parse_wrapped() {
        let personas = parse_personas(r#"{"personas": [{"id": "a"}], "meta": {}}"#, "test").unwrap();
        assert_eq!(personas.len(), 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_personas("[{", "broken.json").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InputMalformed);
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_parse_wrong_shape() {
        let err = parse_personas(r#"{"people": []}"#, "shape.json").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InputMalformed);
    }

    #[test]
    fn test_load_concatenates_in_order() {
        let first = temp_json(r#"[{"id": "a"}, {"id": "b"}]"#);
        let second = temp_json(r#"{"personas": [{"id": "c"}]}"#);

        let personas = load_personas(&[first.path(), second.path()]).unwrap();
        let ids: Vec<&str> = personas.iter().map(|p| p.display_id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_empty_documents() {
        let bare = temp_json("[]");
        let wrapped = temp_json(r#"{"personas": []}"#);

        let personas = load_personas(&[bare.path(), wrapped.path()]).unwrap();
        assert!(personas.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_personas(&["/nonexistent/personas.json"]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IoRead);
    }
}
