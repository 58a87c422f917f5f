//! WhatsApp handoff - summary message and deep link

use std::collections::BTreeMap;

use url::Url;

use crate::store::catalog::Feature;

/// Human-readable quote summary forwarded over the messaging channel.
/// Wording matches the storefront's Turkish copy.
pub fn build_summary(
    category_name: &str,
    brand_name: &str,
    model_name: &str,
    features: &[Feature],
    selected: &BTreeMap<String, String>,
) -> String {
    let mut message = String::from("Merhaba, aşağıdaki cihaz için teklif almak istiyorum:\n\n");
    message.push_str(&format!("Kategori: {}\n", category_name));
    message.push_str(&format!("Marka: {}\n", brand_name));
    message.push_str(&format!("Model: {}\n\n", model_name));

    if !selected.is_empty() {
        message.push_str("Özellikler:\n");
        for feature in features {
            if let Some(value) = selected.get(&feature.id.to_string()) {
                message.push_str(&format!("- {}: {}\n", feature.name, value));
            }
        }
    }

    message
}

/// Deep link carrying the encoded message as the `text` query parameter.
/// Delivery is entirely the messaging channel's responsibility.
pub fn handoff_url(whatsapp_number: &str, message: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("https://wa.me/{}", whatsapp_number))?;
    url.query_pairs_mut().append_pair("text", message);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(id: i64, name: &str) -> Feature {
        Feature {
            id,
            name: name.to_string(),
            model_id: 1,
            options: vec!["İyi".to_string(), "Orta".to_string()],
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn summary_lists_device_and_selected_features() {
        let features = vec![feature(1, "Ekran"), feature(2, "Batarya")];
        let selected: BTreeMap<String, String> = [
            ("1".to_string(), "İyi".to_string()),
            ("2".to_string(), "Orta".to_string()),
        ]
        .into();

        let message = build_summary("Telefon", "Marka A", "Model X", &features, &selected);

        assert!(message.contains("Kategori: Telefon\n"));
        assert!(message.contains("Marka: Marka A\n"));
        assert!(message.contains("Model: Model X\n"));
        assert!(message.contains("- Ekran: İyi\n"));
        assert!(message.contains("- Batarya: Orta\n"));
    }

    #[test]
    fn summary_without_selections_omits_feature_section() {
        let message = build_summary("Telefon", "Marka A", "Model X", &[], &BTreeMap::new());
        assert!(!message.contains("Özellikler"));
    }

    #[test]
    fn handoff_url_encodes_message() {
        let url = handoff_url("905551112233", "Merhaba, teklif almak istiyorum").unwrap();

        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/905551112233");
        // query_pairs round-trips the decoded text
        let text = url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(text, "Merhaba, teklif almak istiyorum");
        assert!(url.as_str().contains("text="));
    }
}
