//! Pure numeric and string similarity primitives.

use crate::types::Dimensions;

use super::color::{color_distance, Rgb};

/// Edit distance between two strings, counted in chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two-row variant; inputs are bounded by the sanitizer but can still be long.
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Edit distance divided by the longer length (0.0 identical, 1.0 disjoint).
pub fn normalized_levenshtein(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Case-insensitive string similarity in `[0, 1]`.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    1.0 - normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// `|a - b| / max(a, b)`, or 0 when both sides are zero.
pub fn relative_delta(a: f64, b: f64) -> f64 {
    let max = a.abs().max(b.abs());
    if max == 0.0 {
        0.0
    } else {
        ((a - b).abs() / max).min(1.0)
    }
}

/// `1 - avg(relative width delta, relative height delta)`.
pub fn geometry_similarity(a: &Dimensions, b: &Dimensions) -> f64 {
    let dw = relative_delta(a.width as f64, b.width as f64);
    let dh = relative_delta(a.height as f64, b.height as f64);
    1.0 - (dw + dh) / 2.0
}

/// `1 - distance / 255`, floored at 0.
pub fn color_similarity(a: Rgb, b: Rgb) -> f64 {
    (1.0 - color_distance(a, b) / 255.0).max(0.0)
}

/// Proximity of the two boxes' centres relative to the larger diagonal.
pub fn position_similarity(a: &Dimensions, b: &Dimensions) -> f64 {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let distance = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt() as f64;
    let scale = a.diagonal().max(b.diagonal()) as f64;
    if scale <= 0.0 {
        return if distance == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - (distance / scale).min(1.0)
}
