//! Supplier name canonicalization
//!
//! Source tables spell the same supplier several ways ("Acme Inc.",
//! "ACME", "acme inc"). The canonical form produced here is used only for
//! matching and grouping; the original spelling is always kept for display.

/// Corporate suffixes removed during normalization, matched as whole words
const CORPORATE_SUFFIXES: &[&str] = &["INC", "LLC", "CO", "COMPANY", "CORP", "CORPORATION"];

/// Characters stripped from the ends of names and tokens
const EDGE_PUNCTUATION: &[char] = &[',', '.', '-', ' '];

/// Canonicalize a supplier name for cross-table matching
///
/// Uppercases, collapses whitespace, drops corporate suffix words (whole-word
/// only, so "INCREDIBLE CO" keeps its first word), and strips leading and
/// trailing `,.- ` punctuation. A missing name normalizes to the empty
/// string. Idempotent: normalizing an already-normalized name is a no-op.
pub fn normalize_supplier(name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };

    let upper = name.to_uppercase();
    let kept: Vec<&str> = upper
        .split_whitespace()
        .filter(|token| {
            let core = token.trim_matches(EDGE_PUNCTUATION);
            !CORPORATE_SUFFIXES.contains(&core)
        })
        .collect();

    kept.join(" ").trim_matches(EDGE_PUNCTUATION).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_and_punctuation_removed() {
        assert_eq!(normalize_supplier(Some("Acme Inc.")), "ACME");
        assert_eq!(normalize_supplier(Some("Vega Corp")), "VEGA");
        assert_eq!(normalize_supplier(Some("Orion Manufacturing Company")), "ORION MANUFACTURING");
    }

    #[test]
    fn test_missing_name_is_empty() {
        assert_eq!(normalize_supplier(None), "");
        assert_eq!(normalize_supplier(Some("")), "");
        assert_eq!(normalize_supplier(Some("   ")), "");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(
            normalize_supplier(Some("  vega   precision\tllc ")),
            "VEGA PRECISION"
        );
    }

    #[test]
    fn test_suffix_matches_whole_words_only() {
        assert_eq!(normalize_supplier(Some("INCREDIBLE CO")), "INCREDIBLE");
        assert_eq!(normalize_supplier(Some("Costello Machining")), "COSTELLO MACHINING");
        assert_eq!(normalize_supplier(Some("Corporal Tooling")), "CORPORAL TOOLING");
    }

    #[test]
    fn test_trailing_punctuation_stripped() {
        assert_eq!(normalize_supplier(Some("Delta Fab Co.,")), "DELTA FAB");
        assert_eq!(normalize_supplier(Some("- Helix, LLC -")), "HELIX");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Acme Inc.",
            "INCREDIBLE CO",
            " vega   precision llc ",
            "Delta Fab Co.,",
            "",
            "Plain Name",
        ];
        for input in inputs {
            let once = normalize_supplier(Some(input));
            let twice = normalize_supplier(Some(&once));
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}
