use std::cmp::Ordering;

/// Japanese-aware comparison for shop and dish listings.
///
/// Primary fold maps katakana onto hiragana so the two scripts interleave
/// by reading, which is how `ja-JP` collation orders menu names; ties fall
/// back to raw codepoints so the ordering stays total and deterministic.
pub fn compare_ja(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .map(fold_kana)
        .cmp(b.chars().map(fold_kana));

    match folded {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

fn fold_kana(c: char) -> char {
    match c {
        // Katakana ァ..ヶ sit exactly 0x60 above their hiragana partners.
        '\u{30A1}'..='\u{30F6}' => {
            char::from_u32(c as u32 - 0x60).unwrap_or(c)
        }
        _ => c,
    }
}
