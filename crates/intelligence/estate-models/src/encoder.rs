//! The pipeline's column encoder.
//!
//! Numeric columns pass through unchanged. Categorical columns are one-hot
//! encoded against the category list the pipeline was trained with; a value
//! outside that list is an error, never a silent all-zero row.

use std::collections::HashSet;

use estate_core::{FeatureFrame, FeatureValue};
use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl ColumnSpec {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
            categories: Vec::new(),
        }
    }

    pub fn categorical<I, S>(name: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: ColumnKind::Categorical,
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of model inputs this column expands to.
    pub fn width(&self) -> usize {
        match self.kind {
            ColumnKind::Numeric => 1,
            ColumnKind::Categorical => self.categories.len(),
        }
    }
}

/// Ordered column specs of a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureEncoder {
    columns: Vec<ColumnSpec>,
}

impl FeatureEncoder {
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self> {
        let encoder = Self { columns };
        encoder.check()?;
        Ok(encoder)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(ModelError::InvalidArtifact("pipeline declares no columns".into()));
        }
        let mut seen = HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.name.as_str()) {
                return Err(ModelError::InvalidArtifact(format!(
                    "column '{}' declared twice",
                    col.name
                )));
            }
            if col.kind == ColumnKind::Categorical && col.categories.is_empty() {
                return Err(ModelError::InvalidArtifact(format!(
                    "categorical column '{}' has no categories",
                    col.name
                )));
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Total length of an encoded row.
    pub fn width(&self) -> usize {
        self.columns.iter().map(ColumnSpec::width).sum()
    }

    /// Encode one frame. The frame must carry exactly the declared columns.
    pub fn encode(&self, frame: &FeatureFrame) -> Result<Vec<f32>> {
        for name in frame.names() {
            if !self.columns.iter().any(|c| c.name == name) {
                return Err(ModelError::SchemaMismatch(format!(
                    "unexpected column '{name}'"
                )));
            }
        }

        let mut row = Vec::with_capacity(self.width());
        for col in &self.columns {
            let value = frame.get(&col.name).ok_or_else(|| {
                ModelError::SchemaMismatch(format!("missing column '{}'", col.name))
            })?;

            match (col.kind, value) {
                (ColumnKind::Numeric, FeatureValue::Numeric(v)) => row.push(*v as f32),
                (ColumnKind::Categorical, FeatureValue::Categorical(v)) => {
                    let hot = col.categories.iter().position(|c| c == v).ok_or_else(|| {
                        ModelError::UnknownCategory {
                            column: col.name.clone(),
                            value: v.clone(),
                        }
                    })?;
                    row.extend((0..col.categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
                }
                (_, other) => {
                    return Err(ModelError::SchemaMismatch(format!(
                        "column '{}' expects {:?} input, got {}",
                        col.name,
                        col.kind,
                        other.kind()
                    )));
                }
            }
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(vec![
            ColumnSpec::numeric("Size_in_SqFt"),
            ColumnSpec::categorical("City", ["Chennai", "Mumbai", "Pune"]),
            ColumnSpec::numeric("Age_of_Property"),
        ])
        .unwrap()
    }

    fn frame(city: &str) -> FeatureFrame {
        FeatureFrame::new()
            .with_numeric("Size_in_SqFt", 1200.0)
            .with_categorical("City", city)
            .with_numeric("Age_of_Property", 5.0)
    }

    #[test]
    fn test_one_hot_layout() {
        let enc = encoder();
        assert_eq!(enc.width(), 5);
        assert_eq!(enc.encode(&frame("Mumbai")).unwrap(), vec![1200.0, 0.0, 1.0, 0.0, 5.0]);
    }

    #[test]
    fn test_frame_order_does_not_matter() {
        let reordered = FeatureFrame::new()
            .with_numeric("Age_of_Property", 5.0)
            .with_categorical("City", "Pune")
            .with_numeric("Size_in_SqFt", 1200.0);
        assert_eq!(encoder().encode(&reordered).unwrap(), vec![1200.0, 0.0, 0.0, 1.0, 5.0]);
    }

    #[test]
    fn test_unknown_category() {
        let err = encoder().encode(&frame("Atlantis")).unwrap_err();
        match err {
            ModelError::UnknownCategory { column, value } => {
                assert_eq!(column, "City");
                assert_eq!(value, "Atlantis");
            }
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_and_extra_columns() {
        let mut missing = frame("Mumbai");
        missing.remove("Age_of_Property");
        assert!(matches!(
            encoder().encode(&missing),
            Err(ModelError::SchemaMismatch(msg)) if msg.contains("missing column")
        ));

        let extra = frame("Mumbai").with_numeric("Nearby_Schools", 1.0);
        assert!(matches!(
            encoder().encode(&extra),
            Err(ModelError::SchemaMismatch(msg)) if msg.contains("unexpected column")
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let wrong = frame("Mumbai").with_categorical("Size_in_SqFt", "big");
        assert!(matches!(
            encoder().encode(&wrong),
            Err(ModelError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_invalid_specs_rejected() {
        assert!(FeatureEncoder::new(vec![]).is_err());
        assert!(FeatureEncoder::new(vec![ColumnSpec::categorical("City", Vec::<String>::new())]).is_err());
        assert!(FeatureEncoder::new(vec![
            ColumnSpec::numeric("a"),
            ColumnSpec::numeric("a"),
        ])
        .is_err());
    }

    #[test]
    fn test_spec_json_shape() {
        let json = r#"[{"name":"Size_in_SqFt","kind":"numeric"},{"name":"City","kind":"categorical","categories":["Mumbai"]}]"#;
        let enc: FeatureEncoder = serde_json::from_str(json).unwrap();
        assert_eq!(enc.columns().len(), 2);
        assert_eq!(enc.width(), 2);
    }
}
