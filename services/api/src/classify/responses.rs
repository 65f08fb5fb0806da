use serde::Serialize;

use crate::classify::client::Prediction;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub body_type: String,
    pub body_type_confidence: i32,
    pub car_make: String,
    pub car_make_confidence: i32,
}

impl ClassificationResult {
    pub fn from_predictions(body_type: Prediction, make: Prediction) -> Self {
        Self {
            body_type: body_type.tag_name,
            body_type_confidence: confidence_pct(body_type.probability),
            car_make: make.tag_name,
            car_make_confidence: confidence_pct(make.probability),
        }
    }
}

/// Probability as an integer percentage, rounded to nearest.
fn confidence_pct(probability: f64) -> i32 {
    (probability * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(tag: &str, probability: f64) -> Prediction {
        Prediction {
            tag_name: tag.to_string(),
            probability,
        }
    }

    #[test]
    fn confidence_rounds_to_nearest_percent() {
        assert_eq!(confidence_pct(0.8732), 87);
        assert_eq!(confidence_pct(0.611), 61);
        assert_eq!(confidence_pct(0.005), 1);
        assert_eq!(confidence_pct(0.0), 0);
        assert_eq!(confidence_pct(1.0), 100);
    }

    #[test]
    fn from_predictions_merges_both_models() {
        let result = ClassificationResult::from_predictions(
            prediction("SUV", 0.8732),
            prediction("Toyota", 0.611),
        );

        assert_eq!(result.body_type, "SUV");
        assert_eq!(result.body_type_confidence, 87);
        assert_eq!(result.car_make, "Toyota");
        assert_eq!(result.car_make_confidence, 61);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let result = ClassificationResult::from_predictions(
            prediction("SUV", 0.8732),
            prediction("Toyota", 0.611),
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "bodyType": "SUV",
                "bodyTypeConfidence": 87,
                "carMake": "Toyota",
                "carMakeConfidence": 61
            })
        );
    }
}
