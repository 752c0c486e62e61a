use mood_types::Emotion;

/// Maps the label vocabularies seen from hosted models onto [`Emotion`].
///
/// `LABEL_0/1/2` follow the negative/neutral/positive index order used by
/// the three-class sentiment models. Anything unrecognized is neutral.
pub fn normalize_label(raw: &str) -> Emotion {
    let label = raw.trim().to_lowercase();

    if let Some(index) = label.strip_prefix("label_") {
        return match index.parse::<u32>() {
            Ok(0) => Emotion::Negative,
            Ok(1) => Emotion::Neutral,
            Ok(2) => Emotion::Positive,
            _ => Emotion::Neutral,
        };
    }

    match label.as_str() {
        "positive" | "pos" => Emotion::Positive,
        "negative" | "neg" => Emotion::Negative,
        "neutral" | "neu" => Emotion::Neutral,
        _ => Emotion::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_labels() {
        assert_eq!(normalize_label("LABEL_0"), Emotion::Negative);
        assert_eq!(normalize_label("LABEL_1"), Emotion::Neutral);
        assert_eq!(normalize_label("LABEL_2"), Emotion::Positive);
        assert_eq!(normalize_label("label_2"), Emotion::Positive);
        assert_eq!(normalize_label("LABEL_7"), Emotion::Neutral);
        assert_eq!(normalize_label("LABEL_x"), Emotion::Neutral);
    }

    #[test]
    fn abbreviations_and_canonical_names() {
        assert_eq!(normalize_label("neg"), Emotion::Negative);
        assert_eq!(normalize_label("POS"), Emotion::Positive);
        assert_eq!(normalize_label("neu"), Emotion::Neutral);
        assert_eq!(normalize_label(" Positive "), Emotion::Positive);
        assert_eq!(normalize_label("negative"), Emotion::Negative);
    }

    #[test]
    fn unknown_is_neutral() {
        assert_eq!(normalize_label("joy"), Emotion::Neutral);
        assert_eq!(normalize_label(""), Emotion::Neutral);
    }
}
