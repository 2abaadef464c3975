use std::path::Path;

use crate::dict::{Dict, Dimension, Value};

use super::{Case, CaseError, FileClass};

/// Directory holding the initial conditions.
const INITIAL_TIME: &str = "0";

/// An initial condition file in the case's `0` directory, such as `0/p`.
///
/// ```
/// use firefish::case::InitialField;
/// use firefish::dict::Dimension;
///
/// let pressure = InitialField::scalar(Dimension::PRESSURE, 1.0)
///     .fixed_value("inlet", 1.0)
///     .zero_gradient("outlet");
/// assert!(pressure.to_dict().to_foam_string().contains("internalField   uniform 1;"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InitialField {
    class: FileClass,
    dimensions: Dimension,
    internal: Value,
    boundary: Dict,
}

impl InitialField {
    /// A scalar field, uniform at `value`.
    #[must_use]
    pub fn scalar(dimensions: Dimension, value: f64) -> Self {
        Self::new(FileClass::ScalarField3d, dimensions, value.into())
    }

    /// A vector field, uniform at `value`.
    #[must_use]
    pub fn vector(dimensions: Dimension, value: [f64; 3]) -> Self {
        Self::new(FileClass::VectorField3d, dimensions, Value::list(value))
    }

    fn new(class: FileClass, dimensions: Dimension, value: Value) -> Self {
        Self {
            class,
            dimensions,
            internal: Value::uniform(value),
            boundary: Dict::new(),
        }
    }

    /// Sets the condition on `patch` to an arbitrary dictionary.
    #[must_use]
    pub fn with_patch(mut self, patch: &str, condition: Dict) -> Self {
        self.boundary.insert(patch, condition);
        self
    }

    #[must_use]
    pub fn fixed_value(self, patch: &str, value: impl Into<Value>) -> Self {
        let condition = Dict::new()
            .with("type", "fixedValue")
            .with("value", Value::uniform(value));
        self.with_patch(patch, condition)
    }

    #[must_use]
    pub fn zero_gradient(self, patch: &str) -> Self {
        self.with_patch(patch, Dict::new().with("type", "zeroGradient"))
    }

    #[must_use]
    pub fn slip(self, patch: &str) -> Self {
        self.with_patch(patch, Dict::new().with("type", "slip"))
    }

    #[must_use]
    pub fn to_dict(&self) -> Dict {
        Dict::new()
            .with("dimensions", self.dimensions)
            .with("internalField", self.internal.clone())
            .with("boundaryField", self.boundary.clone())
    }

    /// Merges the field into `0/<name>`.
    ///
    /// # Errors
    ///
    /// Returns a [`CaseError`] if the file cannot be read or written.
    pub fn write(&self, case: &Case, name: &str) -> Result<(), CaseError> {
        case.update_data_file(Path::new(INITIAL_TIME).join(name), self.class, self.to_dict())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_field_text() {
        let text = InitialField::vector(Dimension::VELOCITY, [2.0, 0.0, 0.0])
            .fixed_value("inlet", [2.0, 0.0, 0.0])
            .slip("whole")
            .to_dict()
            .to_foam_string();

        assert_eq!(
            text,
            "dimensions      [0 1 -1 0 0 0 0];\n\
             internalField   uniform (2 0 0);\n\
             boundaryField\n\
             {\n\
             \x20   inlet\n\
             \x20   {\n\
             \x20       type            fixedValue;\n\
             \x20       value           uniform (2 0 0);\n\
             \x20   }\n\
             \x20   whole\n\
             \x20   {\n\
             \x20       type            slip;\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn write_uses_field_class_and_location() {
        let dir = tempfile::tempdir().unwrap();
        let case = Case::new(dir.path()).unwrap();
        InitialField::scalar(Dimension::TEMPERATURE, 1.0)
            .fixed_value("inlet", 1.0)
            .zero_gradient("outlet")
            .write(&case, "T")
            .unwrap();

        let text = std::fs::read_to_string(case.path("0/T")).unwrap();
        assert!(text.contains("class           volScalarField;"));
        assert!(text.contains("location        \"0\";"));

        let dict = case.read_data_file("0/T").unwrap().unwrap();
        assert_eq!(
            dict.get("dimensions"),
            Some(&Value::Dimension(Dimension::TEMPERATURE))
        );
        let outlet = dict
            .get_dict("boundaryField")
            .and_then(|b| b.get_dict("outlet"))
            .unwrap();
        assert_eq!(outlet.get("type").and_then(Value::as_str), Some("zeroGradient"));
    }
}
