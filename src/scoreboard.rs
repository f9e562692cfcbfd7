//! Text for the HUD. Nothing in the game loop uses these; the stored score
//! stays exact and only the labels are rounded.

/// Nearest multiple of ten, ties going to the even multiple
/// (25 → 20, 35 → 40). Scores too close to `u64::MAX` to round up stay put.
pub fn rounded_score(score: u64) -> u64 {
    let tens = score / 10;
    let rem = score % 10;
    let up = rem > 5 || (rem == 5 && tens % 2 == 1);
    if up {
        (tens * 10).checked_add(10).unwrap_or(score)
    } else {
        tens * 10
    }
}

/// Rounded score with comma thousands separators, e.g. `1,230`.
pub fn score_label(score: u64) -> String {
    let digits = rounded_score(score).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn level_label(level: u32) -> String {
    level.to_string()
}
