//! Gradient-boosted tree estimators backing the pipelines.
//!
//! The `gbdt` crate uses `f32` internally; the encoder already produces
//! `f32` rows so no conversion happens here.

use std::io::{BufReader, Cursor};

use gbdt::decision_tree::Data;
use gbdt::gradient_boost::GBDT;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoosterFormat {
    /// gbdt-rs native serialized model.
    Gbdt,
    /// XGBoost JSON dump: either the dump text (base score on the first
    /// line, tree array after it) or the parsed tree array alone.
    XgboostDump,
}

/// Serialized booster section of a pipeline artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoosterSpec {
    pub format: BoosterFormat,
    /// XGBoost objective, only read for `xgboost_dump`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    /// Base score of an `xgboost_dump` given as a parsed array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_score: Option<f32>,
    pub model: Value,
}

/// XGBoost's own default when the model does not record one.
const XGBOOST_BASE_SCORE: f32 = 0.5;

impl BoosterSpec {
    /// Wrap an in-memory gbdt model.
    pub fn from_gbdt(model: &GBDT) -> Result<Self> {
        Ok(Self {
            format: BoosterFormat::Gbdt,
            objective: None,
            base_score: None,
            model: serde_json::to_value(model)?,
        })
    }

    /// Input width recorded in a native model's config, when present.
    fn declared_width(&self) -> Option<usize> {
        match self.format {
            BoosterFormat::Gbdt => self
                .model
                .get("conf")
                .and_then(|c| c.get("feature_size"))
                .and_then(Value::as_u64)
                .map(|n| n as usize),
            BoosterFormat::XgboostDump => None,
        }
    }

    /// Deserialize into a booster expecting `width` inputs.
    pub fn build(self, width: usize, default_objective: &str) -> Result<Booster> {
        if let Some(declared) = self.declared_width() {
            if declared != width {
                return Err(ModelError::InvalidArtifact(format!(
                    "booster expects {declared} inputs but the encoder produces {width}"
                )));
            }
        }

        let model = match self.format {
            BoosterFormat::Gbdt => serde_json::from_value::<GBDT>(self.model)?,
            BoosterFormat::XgboostDump => {
                let text = match self.model {
                    Value::String(s) => s,
                    trees => format!(
                        "{}\n{}",
                        self.base_score.unwrap_or(XGBOOST_BASE_SCORE),
                        trees
                    ),
                };
                let objective = self.objective.as_deref().unwrap_or(default_objective);
                GBDT::from_xgboost_reader(BufReader::new(Cursor::new(text)), objective)
                    .map_err(|e| ModelError::Booster(format!("failed to read XGBoost dump: {e}")))?
            }
        };
        check_trees(&serde_json::to_value(&model)?, width)?;

        let booster = Booster { model, width };
        booster.predict_row(vec![0.0; width])?;
        Ok(booster)
    }
}

fn invalid(msg: String) -> ModelError {
    ModelError::InvalidArtifact(msg)
}

/// Walk the serialized forest and reject anything gbdt would panic on at
/// prediction time: an iteration count that disagrees with the tree count,
/// empty trees, splits on inputs past `width`, and child links that are
/// missing or point backwards.
fn check_trees(model: &Value, width: usize) -> Result<()> {
    let trees = model
        .get("trees")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("booster has no tree list".into()))?;
    let iterations = model
        .get("conf")
        .and_then(|c| c.get("iterations"))
        .and_then(Value::as_u64)
        .ok_or_else(|| invalid("booster config has no iteration count".into()))?;
    if iterations as usize != trees.len() {
        return Err(invalid(format!(
            "booster declares {iterations} iterations but holds {} trees",
            trees.len()
        )));
    }

    for (t, tree) in trees.iter().enumerate() {
        let nodes = tree
            .get("tree")
            .and_then(|bt| bt.get("tree"))
            .and_then(Value::as_array)
            .ok_or_else(|| invalid(format!("tree {t} has no node list")))?;
        if nodes.is_empty() {
            return Err(invalid(format!("tree {t} is empty")));
        }

        for (n, node) in nodes.iter().enumerate() {
            let value = node
                .get("value")
                .ok_or_else(|| invalid(format!("tree {t} node {n} has no value")))?;
            if value.get("is_leaf").and_then(Value::as_bool).unwrap_or(false) {
                continue;
            }
            let feature = value
                .get("feature_index")
                .and_then(Value::as_u64)
                .ok_or_else(|| invalid(format!("tree {t} node {n} has no split feature")))?;
            if feature as usize >= width {
                return Err(invalid(format!(
                    "tree {t} splits on input {feature} but the encoder produces {width}"
                )));
            }
            for side in ["left", "right"] {
                let child = node.get(side).and_then(Value::as_u64).unwrap_or(0) as usize;
                if child <= n || child >= nodes.len() {
                    return Err(invalid(format!(
                        "tree {t} node {n} has a broken {side} child link"
                    )));
                }
            }
        }
    }
    Ok(())
}

pub struct Booster {
    model: GBDT,
    width: usize,
}

impl Booster {
    pub fn from_trained(model: GBDT, width: usize) -> Self {
        Self { model, width }
    }

    /// Raw model output for one encoded row.
    pub fn predict_row(&self, row: Vec<f32>) -> Result<f64> {
        if row.len() != self.width {
            return Err(ModelError::SchemaMismatch(format!(
                "encoded row has {} values, booster expects {}",
                row.len(),
                self.width
            )));
        }
        let data = vec![Data::new_test_data(row, None)];
        self.model
            .predict(&data)
            .first()
            .map(|&p| p as f64)
            .ok_or_else(|| ModelError::Booster("booster returned no prediction".into()))
    }
}

impl std::fmt::Debug for Booster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Booster").field("width", &self.width).finish()
    }
}
