// src/analysis/similarity.rs — Word-overlap similarity between utterances

/// Share of words two texts have in common, relative to the longer one.
///
/// Words are split on whitespace and compared case-insensitively. Each word
/// of `a` that also appears in `b` counts once per occurrence in `a`, so the
/// ratio is `|common| / max(|words(a)|, |words(b)|)`. Two empty texts score 0.
pub fn word_overlap(a: &str, b: &str) -> f32 {
    let words_a: Vec<String> = a.split_whitespace().map(|w| w.to_lowercase()).collect();
    let words_b: Vec<String> = b.split_whitespace().map(|w| w.to_lowercase()).collect();

    let longest = words_a.len().max(words_b.len());
    if longest == 0 {
        return 0.0;
    }

    let common = words_a.iter().filter(|w| words_b.contains(w)).count();
    common as f32 / longest as f32
}
