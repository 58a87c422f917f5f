//! Quote amount calculation
//!
//! Fixed linear formula: a base amount scaled by a multiplier that each
//! selected condition label nudges up or down. The fold is
//! order-independent and unrecognized labels contribute nothing.

/// Base quote amount in TRY
pub const BASE_AMOUNT: f64 = 1000.0;

/// Multiplier delta for a selected option label
pub fn option_delta(label: &str) -> f64 {
    match label {
        "Çok İyi" => 0.2,
        "İyi" => 0.1,
        "Orta" => -0.1,
        "Kötü" => -0.2,
        _ => 0.0,
    }
}

/// Final quote amount for the given selected option labels:
/// round(BASE_AMOUNT * (1 + sum of deltas))
pub fn quote_amount<'a, I>(selected: I) -> i64
where
    I: IntoIterator<Item = &'a str>,
{
    let multiplier: f64 = 1.0 + selected.into_iter().map(option_delta).sum::<f64>();
    (BASE_AMOUNT * multiplier).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selections_yields_base_amount() {
        assert_eq!(quote_amount([]), 1000);
    }

    #[test]
    fn single_iyi_selection_yields_1100() {
        // Worked example: one feature, "İyi" selected
        assert_eq!(quote_amount(["İyi"]), 1100);
    }

    #[test]
    fn recognized_labels_map_to_fixed_deltas() {
        assert_eq!(quote_amount(["Çok İyi"]), 1200);
        assert_eq!(quote_amount(["Orta"]), 900);
        assert_eq!(quote_amount(["Kötü"]), 800);
    }

    #[test]
    fn unrecognized_labels_contribute_nothing() {
        assert_eq!(quote_amount(["Mavi", "64 GB"]), 1000);
        assert_eq!(quote_amount(["İyi", "Mavi"]), 1100);
    }

    #[test]
    fn fold_is_order_independent() {
        let forward = quote_amount(["Çok İyi", "Orta", "Kötü"]);
        let backward = quote_amount(["Kötü", "Orta", "Çok İyi"]);
        assert_eq!(forward, backward);
        assert_eq!(forward, 900);
    }

    #[test]
    fn deltas_accumulate_across_features() {
        // 1000 * (1 + 0.2 + 0.1) = 1300
        assert_eq!(quote_amount(["Çok İyi", "İyi"]), 1300);
    }
}
