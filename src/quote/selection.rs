//! Submitted feature selections, validated against the model's catalog

use std::collections::BTreeMap;

use crate::store::catalog::Feature;

/// Validate a submitted feature-id -> option mapping against the model's
/// declared features. Every feature must be selected, only declared
/// features may appear, and each value must be one of that feature's
/// declared option labels. Returns the mapping keyed the way it is
/// persisted (feature id as string).
pub fn validate_selection(
    features: &[Feature],
    selected: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, SelectionError> {
    for key in selected.keys() {
        let known = features.iter().any(|f| f.id.to_string() == *key);
        if !known {
            return Err(SelectionError::UnknownFeature { id: key.clone() });
        }
    }

    let mut validated = BTreeMap::new();

    for feature in features {
        let key = feature.id.to_string();
        let value = selected
            .get(&key)
            .ok_or_else(|| SelectionError::MissingSelection {
                feature: feature.name.clone(),
            })?;

        if !feature.options.iter().any(|option| option == value) {
            return Err(SelectionError::UnknownOption {
                feature: feature.name.clone(),
                value: value.clone(),
            });
        }

        validated.insert(key, value.clone());
    }

    Ok(validated)
}

/// Selection validation errors
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("No selection for feature: {feature}")]
    MissingSelection { feature: String },

    #[error("Unknown feature id: {id}")]
    UnknownFeature { id: String },

    #[error("Option \"{value}\" is not declared for feature {feature}")]
    UnknownOption { feature: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(id: i64, name: &str, options: &[&str]) -> Feature {
        Feature {
            id,
            name: name.to_string(),
            model_id: 1,
            options: options.iter().map(|s| s.to_string()).collect(),
            created_at: chrono::Utc::now(),
        }
    }

    fn select(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn accepts_complete_valid_selection() {
        let features = vec![
            feature(1, "Ekran", &["İyi", "Orta"]),
            feature(2, "Batarya", &["Çok İyi", "Kötü"]),
        ];
        let validated =
            validate_selection(&features, &select(&[("1", "İyi"), ("2", "Kötü")])).unwrap();

        // One entry per feature of the model
        assert_eq!(validated.len(), features.len());
        assert_eq!(validated.get("1").map(String::as_str), Some("İyi"));
    }

    #[test]
    fn rejects_missing_feature() {
        let features = vec![feature(1, "Ekran", &["İyi"]), feature(2, "Kasa", &["Orta"])];
        let err = validate_selection(&features, &select(&[("1", "İyi")])).unwrap_err();
        assert!(matches!(err, SelectionError::MissingSelection { feature } if feature == "Kasa"));
    }

    #[test]
    fn rejects_undeclared_option() {
        let features = vec![feature(1, "Ekran", &["İyi", "Orta"])];
        let err = validate_selection(&features, &select(&[("1", "Mükemmel")])).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownOption { .. }));
    }

    #[test]
    fn rejects_unknown_feature_id() {
        let features = vec![feature(1, "Ekran", &["İyi"])];
        let err =
            validate_selection(&features, &select(&[("1", "İyi"), ("99", "İyi")])).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownFeature { id } if id == "99"));
    }

    #[test]
    fn model_without_features_accepts_empty_selection() {
        let validated = validate_selection(&[], &BTreeMap::new()).unwrap();
        assert!(validated.is_empty());
    }
}
