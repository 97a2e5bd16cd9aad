//! State of the parameter form demo.

use dragboard_core::params::ParameterSet;
use std::path::{Path, PathBuf};

/// Parameter fields bound to the form plus the read-only output text.
#[derive(Debug, Clone)]
pub struct ParamsForm {
    /// Editable fields, in file order.
    pub params: ParameterSet,
    /// Contents of the output area.
    pub output: String,
    /// File the fields were loaded from.
    pub source: PathBuf,
}

impl ParamsForm {
    /// Load the form from a parameter file.
    ///
    /// A file that cannot be read or parsed leaves the form empty and puts
    /// the error into the output area.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let source = path.as_ref().to_path_buf();
        match ParameterSet::load(&source) {
            Ok(params) => Self {
                params,
                output: String::new(),
                source,
            },
            Err(e) => {
                log::warn!("Could not load parameters: {e}");
                Self {
                    params: ParameterSet::new(),
                    output: format!("Could not load {}: {e}", source.display()),
                    source,
                }
            }
        }
    }

    /// Clear the output area and fill it with one line per field.
    pub fn print(&mut self) {
        self.output.clear();
        self.output.push_str(&self.params.render_text());
        log::debug!("Printed {} parameters", self.params.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn params_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_print_replaces_output() {
        let file = params_file(r#"{"Port": 8080, "Host": "localhost"}"#);
        let mut form = ParamsForm::load(file.path());
        assert!(form.output.is_empty());

        form.output = "stale".into();
        form.print();
        assert_eq!(form.output, "Port: 8080\nHost: localhost");

        // Printing twice does not append
        form.print();
        assert_eq!(form.output, "Port: 8080\nHost: localhost");
    }

    #[test]
    fn test_print_reflects_edits() {
        let file = params_file(r#"{"Port": 8080}"#);
        let mut form = ParamsForm::load(file.path());
        form.params.set("Port", "9090");
        form.print();
        assert_eq!(form.output, "Port: 9090");
    }

    #[test]
    fn test_missing_file_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let form = ParamsForm::load(&path);
        assert!(form.params.is_empty());
        assert!(form.output.starts_with("Could not load"));
        assert!(form.output.contains("absent.json"));
    }

    #[test]
    fn test_invalid_file_shows_error() {
        let file = params_file("[1, 2, 3]");
        let form = ParamsForm::load(file.path());
        assert!(form.params.is_empty());
        assert!(form.output.starts_with("Could not load"));
    }

    #[test]
    fn test_empty_form_prints_nothing() {
        let file = params_file("{}");
        let mut form = ParamsForm::load(file.path());
        form.print();
        assert!(form.output.is_empty());
    }
}
