use estate_core::{InvestmentLabel, PredictionResult, PropertyRecord};
use estate_models::ModelRegistry;

use crate::form::{FormChoices, FormInput};
use crate::{Placeholders, PredictionError, Result};

/// Runs a validated record through both pipelines.
#[derive(Debug, Clone)]
pub struct Predictor {
    models: ModelRegistry,
    choices: FormChoices,
    placeholders: Placeholders,
}

impl Predictor {
    pub fn new(models: ModelRegistry, choices: FormChoices, placeholders: Placeholders) -> Self {
        Self {
            models,
            choices,
            placeholders,
        }
    }

    pub fn choices(&self) -> &FormChoices {
        &self.choices
    }

    pub fn placeholders(&self) -> Placeholders {
        self.placeholders
    }

    /// Validate a raw submission, then predict.
    pub fn predict(&self, input: &FormInput) -> Result<PredictionResult> {
        let record = self.choices.to_record(input, self.placeholders)?;
        self.predict_record(&record)
    }

    pub fn predict_record(&self, record: &PropertyRecord) -> Result<PredictionResult> {
        record.validate()?;
        let frame = record.to_frame();

        let classifier = self.models.classifier();
        let class = classifier.predict(&frame)?;
        let proba = classifier.predict_proba(&frame)?;
        let best = proba
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or(PredictionError::EmptyProbabilities)?;
        if !best.is_finite() || proba.iter().any(|p| !p.is_finite()) {
            return Err(PredictionError::NonFiniteOutput("class probability"));
        }

        let mut forecast_price = self.models.regressor().predict(&frame)?;
        if !forecast_price.is_finite() {
            return Err(PredictionError::NonFiniteOutput("price forecast"));
        }
        if forecast_price < 0.0 {
            tracing::warn!(
                forecast = forecast_price,
                city = %record.city,
                "negative price forecast floored at zero"
            );
            forecast_price = 0.0;
        }

        let result = PredictionResult {
            label: InvestmentLabel::from_class(class),
            confidence: (best * 100.0).clamp(0.0, 100.0),
            forecast_price,
        };
        tracing::debug!(
            city = %record.city,
            label = result.label.title(),
            confidence = result.confidence,
            forecast = result.forecast_price,
            "prediction complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use estate_core::schema::{self, CategoryColumn};
    use estate_core::{FeatureFrame, FeatureValue, RecordError};
    use estate_models::booster::BoosterSpec;
    use estate_models::{
        Classifier, ClassifierArtifact, ColumnSpec, FeatureEncoder, GbdtClassifier, GbdtRegressor,
        ModelError, Regressor, RegressorArtifact,
    };
    use gbdt::config::Config;
    use gbdt::decision_tree::Data;
    use gbdt::gradient_boost::GBDT;

    use super::*;
    use crate::fixtures::{dataset, mumbai_input};

    /// Positive probability grows with size; rejects cities it was not trained on.
    struct SizeClassifier {
        known_cities: Vec<&'static str>,
    }

    fn numeric(frame: &FeatureFrame, name: &str) -> f64 {
        match frame.get(name) {
            Some(FeatureValue::Numeric(v)) => *v,
            _ => panic!("missing numeric {name}"),
        }
    }

    impl Classifier for SizeClassifier {
        fn predict(&self, frame: &FeatureFrame) -> estate_models::Result<i64> {
            let p = self.predict_proba(frame)?;
            Ok(if p[1] > p[0] { 1 } else { 0 })
        }

        fn predict_proba(&self, frame: &FeatureFrame) -> estate_models::Result<Vec<f64>> {
            if let Some(FeatureValue::Categorical(city)) = frame.get(schema::CITY) {
                if !self.known_cities.iter().any(|known| *known == city.as_str()) {
                    return Err(ModelError::UnknownCategory {
                        column: schema::CITY.into(),
                        value: city.clone(),
                    });
                }
            }
            let p = (numeric(frame, schema::SIZE_IN_SQFT) / 10_000.0).clamp(0.0, 1.0);
            Ok(vec![1.0 - p, p])
        }
    }

    struct ScaledPrice(f64);

    impl Regressor for ScaledPrice {
        fn predict(&self, frame: &FeatureFrame) -> estate_models::Result<f64> {
            Ok(numeric(frame, schema::PRICE_IN_LAKHS) * self.0)
        }
    }

    struct Proba(Vec<f64>);

    impl Classifier for Proba {
        fn predict(&self, _: &FeatureFrame) -> estate_models::Result<i64> {
            Ok(1)
        }

        fn predict_proba(&self, _: &FeatureFrame) -> estate_models::Result<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    fn predictor_with(classifier: impl Classifier + 'static, regressor: impl Regressor + 'static) -> Predictor {
        let models = ModelRegistry::new(Arc::new(classifier), Arc::new(regressor));
        Predictor::new(models, FormChoices::from_dataset(&dataset()), Placeholders::default())
    }

    fn predictor() -> Predictor {
        predictor_with(
            SizeClassifier {
                known_cities: vec!["Chennai", "Mumbai", "Pune"],
            },
            ScaledPrice(1.5),
        )
    }

    #[test]
    fn test_mumbai_scenario() {
        let result = predictor().predict(&mumbai_input()).unwrap();
        // size 1200 → p(good) = 0.12
        assert_eq!(result.label, InvestmentLabel::NotGood);
        assert!((result.confidence - 88.0).abs() < 1e-9);
        assert!((result.forecast_price - 120.0).abs() < 1e-9);
        assert_eq!(result.confidence_display(), "88.00%");
        assert_eq!(result.forecast_display(), "₹ 120.00 Lakhs");
    }

    #[test]
    fn test_confidence_is_winning_probability() {
        let mut input = mumbai_input();
        input.size_sqft = "9000".into();
        let result = predictor().predict(&input).unwrap();
        assert_eq!(result.label, InvestmentLabel::Good);
        assert!((result.confidence - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_every_valid_combination_is_well_formed() {
        let p = predictor();
        let choices = p.choices().clone();
        for city in choices.options(CategoryColumn::City) {
            for ptype in choices.options(CategoryColumn::PropertyType) {
                for size in ["200", "5000", "10000"] {
                    let mut input = FormInput::default_for(&choices);
                    input.city = city.clone();
                    input.property_type = ptype.clone();
                    input.size_sqft = size.into();

                    let result = p.predict(&input).unwrap();
                    assert!(matches!(
                        result.label.title(),
                        "Good Investment" | "Not a Good Investment"
                    ));
                    assert!((0.0..=100.0).contains(&result.confidence));
                    assert!(result.forecast_price.is_finite() && result.forecast_price >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_unknown_city_rejected_before_models() {
        let mut input = mumbai_input();
        input.city = "Atlantis".into();
        let err = predictor().predict(&input).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Record(RecordError::UnknownChoice { field: "City", .. })
        ));
    }

    #[test]
    fn test_encoder_unknown_category_is_handled() {
        let p = predictor_with(
            SizeClassifier {
                known_cities: vec!["Chennai"],
            },
            ScaledPrice(1.0),
        );
        let err = p.predict(&mumbai_input()).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Model(ModelError::UnknownCategory { .. })
        ));
        assert!(err.to_string().contains("Mumbai"));

        // Still usable afterwards.
        let mut input = mumbai_input();
        input.city = "Chennai".into();
        assert!(p.predict(&input).is_ok());
    }

    #[test]
    fn test_empty_probabilities() {
        let p = predictor_with(Proba(vec![]), ScaledPrice(1.0));
        assert!(matches!(
            p.predict(&mumbai_input()),
            Err(PredictionError::EmptyProbabilities)
        ));
    }

    #[test]
    fn test_non_finite_outputs() {
        let p = predictor_with(Proba(vec![f64::NAN, 0.5]), ScaledPrice(1.0));
        assert!(matches!(
            p.predict(&mumbai_input()),
            Err(PredictionError::NonFiniteOutput(_))
        ));

        let p = predictor_with(Proba(vec![0.3, 0.7]), ScaledPrice(f64::INFINITY));
        assert!(matches!(
            p.predict(&mumbai_input()),
            Err(PredictionError::NonFiniteOutput("price forecast"))
        ));
    }

    #[test]
    fn test_negative_forecast_floored() {
        let p = predictor_with(Proba(vec![0.3, 0.7]), ScaledPrice(-2.0));
        let result = p.predict(&mumbai_input()).unwrap();
        assert_eq!(result.forecast_price, 0.0);
        assert_eq!(result.label, InvestmentLabel::Good);
        assert!((result.confidence - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_record_validates() {
        let p = predictor();
        let mut record = p
            .choices()
            .to_record(&mumbai_input(), p.placeholders())
            .unwrap();
        record.age_years = 80;
        assert!(matches!(
            p.predict_record(&record),
            Err(PredictionError::Record(RecordError::OutOfRange { .. }))
        ));
    }

    /// Every schema column; categories come from the form choices.
    fn full_encoder(choices: &FormChoices) -> FeatureEncoder {
        let columns = schema::FEATURE_COLUMNS
            .iter()
            .map(|name| match CategoryColumn::ALL.into_iter().find(|c| c.column() == *name) {
                Some(column) => ColumnSpec::categorical(*name, choices.options(column).to_vec()),
                None => ColumnSpec::numeric(*name),
            })
            .collect();
        FeatureEncoder::new(columns).unwrap()
    }

    /// Trained on encoded records: homes above 2500 sqft are good buys.
    fn train(encoder: &FeatureEncoder, choices: &FormChoices, loss: &str) -> GBDT {
        let mut cfg = Config::new();
        cfg.set_feature_size(encoder.width());
        cfg.set_max_depth(3);
        cfg.set_iterations(10);
        cfg.set_shrinkage(0.3);
        cfg.set_loss(loss);
        cfg.set_debug(false);
        cfg.set_min_leaf_size(1);
        cfg.set_training_optimization_level(2);

        let mut data = Vec::new();
        for city in choices.options(CategoryColumn::City) {
            for size in (0..10).map(|i| 500 + i * 500) {
                let mut input = mumbai_input();
                input.city = city.clone();
                input.size_sqft = size.to_string();
                let record = choices.to_record(&input, Placeholders::default()).unwrap();
                let row = encoder.encode(&record.to_frame()).unwrap();
                let label = match loss {
                    "LogLikelyhood" => if size > 2500 { 1.0 } else { -1.0 },
                    _ => record.price_lakhs as f32 * 1.5 + size as f32 / 100.0,
                };
                data.push(Data::new_training_data(row, 1.0, label, None));
            }
        }

        let mut model = GBDT::new(&cfg);
        model.fit(&mut data);
        model
    }

    #[test]
    fn test_real_pipelines_over_full_schema() {
        let choices = FormChoices::from_dataset(&dataset());
        let encoder = full_encoder(&choices);
        assert_eq!(encoder.columns().len(), schema::FEATURE_COLUMNS.len());

        let classifier = GbdtClassifier::from_artifact(ClassifierArtifact {
            columns: encoder.clone(),
            classes: vec![0, 1],
            booster: BoosterSpec::from_gbdt(&train(&encoder, &choices, "LogLikelyhood")).unwrap(),
        })
        .unwrap();
        let regressor = GbdtRegressor::from_artifact(RegressorArtifact {
            columns: encoder.clone(),
            booster: BoosterSpec::from_gbdt(&train(&encoder, &choices, "SquaredError")).unwrap(),
        })
        .unwrap();

        let frame = choices
            .to_record(&mumbai_input(), Placeholders::default())
            .unwrap()
            .to_frame();
        let proba = classifier.predict_proba(&frame).unwrap();
        let class = classifier.predict(&frame).unwrap();

        let p = predictor_with(classifier, regressor);
        let result = p.predict(&mumbai_input()).unwrap();
        assert_eq!(result.label, InvestmentLabel::from_class(class));
        assert_eq!(result.label, InvestmentLabel::NotGood);
        let best = proba.iter().copied().fold(f64::MIN, f64::max);
        assert!((result.confidence - best * 100.0).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&result.confidence));
        assert!(result.forecast_price.is_finite() && result.forecast_price >= 0.0);

        for city in choices.options(CategoryColumn::City) {
            for ptype in choices.options(CategoryColumn::PropertyType) {
                let mut input = FormInput::default_for(&choices);
                input.city = city.clone();
                input.property_type = ptype.clone();
                let result = p.predict(&input).unwrap();
                assert!((0.0..=100.0).contains(&result.confidence));
                assert!(result.forecast_price.is_finite() && result.forecast_price >= 0.0);
            }
        }
    }
}
