//! Pipeline artifacts: an encoder plus a boosted-tree estimator, stored as
//! one JSON document per model.
//!
//! ```json
//! {
//!   "columns": [{"name": "Size_in_SqFt", "kind": "numeric"},
//!               {"name": "City", "kind": "categorical", "categories": ["Mumbai", "Pune"]}],
//!   "classes": [0, 1],
//!   "booster": {"format": "gbdt", "model": { ... }}
//! }
//! ```

use std::path::Path;

use estate_core::FeatureFrame;
use serde::{Deserialize, Serialize};

use crate::booster::{Booster, BoosterSpec};
use crate::encoder::FeatureEncoder;
use crate::{Classifier, ModelError, Regressor, Result};

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub columns: FeatureEncoder,
    /// Negative class first, positive class second.
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
    pub booster: BoosterSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressorArtifact {
    pub columns: FeatureEncoder,
    pub booster: BoosterSpec,
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Binary classification pipeline.
#[derive(Debug)]
pub struct GbdtClassifier {
    encoder: FeatureEncoder,
    classes: [i64; 2],
    booster: Booster,
}

impl GbdtClassifier {
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_artifact(read_artifact(path)?)
    }

    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self> {
        artifact.columns.check()?;
        let classes: [i64; 2] = artifact.classes.as_slice().try_into().map_err(|_| {
            ModelError::InvalidArtifact(format!(
                "classifier must declare exactly two classes, found {}",
                artifact.classes.len()
            ))
        })?;
        let width = artifact.columns.width();
        let booster = artifact.booster.build(width, "binary:logistic")?;
        Ok(Self {
            encoder: artifact.columns,
            classes,
            booster,
        })
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }
}

impl Classifier for GbdtClassifier {
    fn predict(&self, frame: &FeatureFrame) -> Result<i64> {
        let proba = self.predict_proba(frame)?;
        // Ties resolve to the negative class.
        let idx = if proba[1] > proba[0] { 1 } else { 0 };
        Ok(self.classes[idx])
    }

    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<f64>> {
        let row = self.encoder.encode(frame)?;
        let raw = self.booster.predict_row(row)?;
        if !raw.is_finite() {
            return Err(ModelError::Booster(format!("non-finite probability {raw}")));
        }
        let positive = raw.clamp(0.0, 1.0);
        Ok(vec![1.0 - positive, positive])
    }
}

/// Scalar regression pipeline.
#[derive(Debug)]
pub struct GbdtRegressor {
    encoder: FeatureEncoder,
    booster: Booster,
}

impl GbdtRegressor {
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_artifact(read_artifact(path)?)
    }

    pub fn from_artifact(artifact: RegressorArtifact) -> Result<Self> {
        artifact.columns.check()?;
        let width = artifact.columns.width();
        let booster = artifact.booster.build(width, "reg:linear")?;
        Ok(Self {
            encoder: artifact.columns,
            booster,
        })
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }
}

impl Regressor for GbdtRegressor {
    fn predict(&self, frame: &FeatureFrame) -> Result<f64> {
        let row = self.encoder.encode(frame)?;
        self.booster.predict_row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booster::BoosterFormat;
    use crate::encoder::ColumnSpec;
    use gbdt::config::Config;
    use gbdt::decision_tree::Data;
    use gbdt::gradient_boost::GBDT;

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(vec![
            ColumnSpec::numeric("Size_in_SqFt"),
            ColumnSpec::categorical("City", ["Mumbai", "Pune"]),
        ])
        .unwrap()
    }

    fn frame(size: f64, city: &str) -> FeatureFrame {
        FeatureFrame::new()
            .with_numeric("Size_in_SqFt", size)
            .with_categorical("City", city)
    }

    /// Tiny model over [size, is_mumbai, is_pune]; large Mumbai homes are label 1.
    fn train(loss: &str) -> GBDT {
        let mut cfg = Config::new();
        cfg.set_feature_size(3);
        cfg.set_max_depth(2);
        cfg.set_iterations(5);
        cfg.set_shrinkage(0.3);
        cfg.set_loss(loss);
        cfg.set_debug(false);
        cfg.set_min_leaf_size(1);
        cfg.set_training_optimization_level(2);

        let mut data: Vec<Data> = (0..20)
            .map(|i| {
                let size = 500.0 + i as f32 * 200.0;
                let mumbai = i % 2 == 0;
                let row = vec![size, if mumbai { 1.0 } else { 0.0 }, if mumbai { 0.0 } else { 1.0 }];
                let label = match loss {
                    "LogLikelyhood" => if mumbai && size > 2000.0 { 1.0 } else { -1.0 },
                    _ => size / 10.0,
                };
                Data::new_training_data(row, 1.0, label, None)
            })
            .collect();

        let mut model = GBDT::new(&cfg);
        model.fit(&mut data);
        model
    }

    fn classifier_artifact() -> ClassifierArtifact {
        ClassifierArtifact {
            columns: encoder(),
            classes: vec![0, 1],
            booster: BoosterSpec::from_gbdt(&train("LogLikelyhood")).unwrap(),
        }
    }

    #[test]
    fn test_classifier_probabilities() {
        let cls = GbdtClassifier::from_artifact(classifier_artifact()).unwrap();
        for (size, city) in [(600.0, "Pune"), (3800.0, "Mumbai"), (2000.0, "Mumbai")] {
            let f = frame(size, city);
            let proba = cls.predict_proba(&f).unwrap();
            assert_eq!(proba.len(), 2);
            assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
            assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);

            let label = cls.predict(&f).unwrap();
            let argmax = if proba[1] > proba[0] { 1 } else { 0 };
            assert_eq!(label, argmax);
        }
    }

    #[test]
    fn test_classifier_unknown_category() {
        let cls = GbdtClassifier::from_artifact(classifier_artifact()).unwrap();
        let err = cls.predict(&frame(1000.0, "Atlantis")).unwrap_err();
        assert!(matches!(err, ModelError::UnknownCategory { .. }));
    }

    #[test]
    fn test_classifier_needs_two_classes() {
        let mut artifact = classifier_artifact();
        artifact.classes = vec![0, 1, 2];
        let err = GbdtClassifier::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));
    }

    #[test]
    fn test_classifier_custom_class_labels() {
        let mut artifact = classifier_artifact();
        artifact.classes = vec![7, 9];
        let cls = GbdtClassifier::from_artifact(artifact).unwrap();
        let label = cls.predict(&frame(1000.0, "Pune")).unwrap();
        assert!(label == 7 || label == 9);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cls_path = dir.path().join("classification_pipeline.json");
        let reg_path = dir.path().join("regression_pipeline.json");

        std::fs::write(&cls_path, serde_json::to_string(&classifier_artifact()).unwrap()).unwrap();
        let reg = RegressorArtifact {
            columns: encoder(),
            booster: BoosterSpec::from_gbdt(&train("SquaredError")).unwrap(),
        };
        std::fs::write(&reg_path, serde_json::to_string(&reg).unwrap()).unwrap();

        let cls = GbdtClassifier::load(&cls_path).unwrap();
        let reg = GbdtRegressor::load(&reg_path).unwrap();
        assert_eq!(cls.encoder().width(), 3);

        let price = reg.predict(&frame(1200.0, "Mumbai")).unwrap();
        assert!(price.is_finite());
    }

    #[test]
    fn test_classes_default_when_absent() {
        let mut value = serde_json::to_value(classifier_artifact()).unwrap();
        value.as_object_mut().unwrap().remove("classes");
        let artifact: ClassifierArtifact = serde_json::from_value(value).unwrap();
        assert_eq!(artifact.classes, vec![0, 1]);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = GbdtClassifier::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ModelError::Io { .. }));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "{ not json").unwrap();
        let err = GbdtRegressor::load(&garbage).unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn test_row_width_guard() {
        let booster = Booster::from_trained(train("SquaredError"), 3);
        let err = booster.predict_row(vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(err, ModelError::SchemaMismatch(_)));
    }

    /// One split on input `split`: below 1000 predicts 10, otherwise 20.
    fn xgboost_dump(split: &str) -> RegressorArtifact {
        RegressorArtifact {
            columns: encoder(),
            booster: BoosterSpec {
                format: BoosterFormat::XgboostDump,
                objective: Some("reg:linear".into()),
                base_score: Some(0.0),
                model: serde_json::json!([{
                    "nodeid": 0, "depth": 0, "split": split, "split_condition": 1000.0,
                    "yes": 1, "no": 2, "missing": 1,
                    "children": [{"nodeid": 1, "leaf": 10.0}, {"nodeid": 2, "leaf": 20.0}]
                }]),
            },
        }
    }

    #[test]
    fn test_xgboost_dump_array() {
        let reg = GbdtRegressor::from_artifact(xgboost_dump("f0")).unwrap();
        assert_eq!(reg.predict(&frame(600.0, "Pune")).unwrap(), 10.0);
        assert_eq!(reg.predict(&frame(1500.0, "Mumbai")).unwrap(), 20.0);
    }

    #[test]
    fn test_split_past_encoder_width_fails_at_load() {
        // the encoder produces 3 inputs
        let err = GbdtRegressor::from_artifact(xgboost_dump("f5")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(msg) if msg.contains("splits on input 5")));
    }

    #[test]
    fn test_iteration_count_mismatch_fails_at_load() {
        let mut booster = BoosterSpec::from_gbdt(&train("SquaredError")).unwrap();
        booster.model["conf"]["iterations"] = serde_json::json!(7);
        let err = GbdtRegressor::from_artifact(RegressorArtifact {
            columns: encoder(),
            booster,
        })
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(msg) if msg.contains("7 iterations")));
    }

    #[test]
    fn test_broken_child_link_fails_at_load() {
        let mut booster = BoosterSpec::from_gbdt(&train("LogLikelyhood")).unwrap();
        booster.model["trees"][0]["tree"]["tree"][0]["left"] = serde_json::json!(999);
        let err = GbdtClassifier::from_artifact(ClassifierArtifact {
            columns: encoder(),
            classes: vec![0, 1],
            booster,
        })
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(msg) if msg.contains("child link")));
    }
}
