//! Free-text key normalization.
//!
//! Budget and sales rows carry operator-entered labels (plan type,
//! manufacturer, brand, territory). Matching across them only works after
//! lower-casing, stripping French accents, and trimming whitespace.

/// Normalizes a nullable free-text label into a matching key.
///
/// Lower-cases, folds French accented characters to their ASCII base, and
/// trims surrounding whitespace. `None` and empty input yield an empty
/// string; there are no error conditions.
#[must_use]
pub fn normalize_key(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    raw.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

/// Folds a single accented character to its unaccented base.
///
/// Only covers the Latin-1/French repertoire actually seen in the data;
/// anything else passes through unchanged.
const fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' | 'á' | 'ã' => 'a',
        'ç' => 'c',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' | 'í' => 'i',
        'ô' | 'ö' | 'ó' | 'õ' => 'o',
        'ù' | 'û' | 'ü' | 'ú' => 'u',
        'ÿ' => 'y',
        'ñ' => 'n',
        _ => c,
    }
}

/// De-duplicates a list of free-text labels by normalized key.
///
/// The first spelling observed for each key is kept, in input order. Empty
/// keys are dropped. Used to build filter option lists.
#[must_use]
pub fn dedupe_labels<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    for label in labels {
        let key = normalize_key(label);
        if key.is_empty() {
            continue;
        }
        if seen.insert(key)
            && let Some(label) = label
        {
            out.push(label.trim().to_string());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize_key(Some("  Chiffre Affaires ")), "chiffre affaires");
    }

    #[test]
    fn test_strips_french_accents() {
        assert_eq!(normalize_key(Some("Quantité")), "quantite");
        assert_eq!(normalize_key(Some("Citroën")), "citroen");
        assert_eq!(normalize_key(Some("Marge opérée à côté")), "marge operee a cote");
    }

    #[test]
    fn test_none_and_empty_yield_empty() {
        assert_eq!(normalize_key(None), "");
        assert_eq!(normalize_key(Some("")), "");
        assert_eq!(normalize_key(Some("   ")), "");
    }

    #[test]
    fn test_unknown_characters_pass_through() {
        assert_eq!(normalize_key(Some("Škoda 4x4")), "škoda 4x4");
    }

    #[test]
    fn test_dedupe_keeps_first_spelling() {
        let labels = vec![
            Some("Quantité"),
            Some("QUANTITE"),
            Some(" quantite "),
            Some("Marge"),
            None,
            Some(""),
        ];

        assert_eq!(dedupe_labels(labels), vec!["Quantité", "Marge"]);
    }
}
