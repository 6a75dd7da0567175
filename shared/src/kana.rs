//! Katakana width conversion (フリガナ正規化)
//!
//! The downstream member import tool stores furigana in half-width Katakana
//! (single byte per kana in Shift-JIS), so furigana is converted to
//! half-width before every save. Voiced (濁音) and semi-voiced (半濁音)
//! syllables expand to two output characters: the base kana plus a
//! combining mark (e.g. ガ → ｶﾞ).

/// Half-width equivalent for a full-width Katakana syllable.
///
/// Returns `None` for characters outside the substitution table;
/// those pass through [`to_half_width`] unchanged.
fn half_width(c: char) -> Option<&'static str> {
    match c {
        'ア' => Some("ｱ"), 'イ' => Some("ｲ"), 'ウ' => Some("ｳ"), 'エ' => Some("ｴ"), 'オ' => Some("ｵ"),
        'カ' => Some("ｶ"), 'キ' => Some("ｷ"), 'ク' => Some("ｸ"), 'ケ' => Some("ｹ"), 'コ' => Some("ｺ"),
        'サ' => Some("ｻ"), 'シ' => Some("ｼ"), 'ス' => Some("ｽ"), 'セ' => Some("ｾ"), 'ソ' => Some("ｿ"),
        'タ' => Some("ﾀ"), 'チ' => Some("ﾁ"), 'ツ' => Some("ﾂ"), 'テ' => Some("ﾃ"), 'ト' => Some("ﾄ"),
        'ナ' => Some("ﾅ"), 'ニ' => Some("ﾆ"), 'ヌ' => Some("ﾇ"), 'ネ' => Some("ﾈ"), 'ノ' => Some("ﾉ"),
        'ハ' => Some("ﾊ"), 'ヒ' => Some("ﾋ"), 'フ' => Some("ﾌ"), 'ヘ' => Some("ﾍ"), 'ホ' => Some("ﾎ"),
        'マ' => Some("ﾏ"), 'ミ' => Some("ﾐ"), 'ム' => Some("ﾑ"), 'メ' => Some("ﾒ"), 'モ' => Some("ﾓ"),
        'ヤ' => Some("ﾔ"), 'ユ' => Some("ﾕ"), 'ヨ' => Some("ﾖ"),
        'ラ' => Some("ﾗ"), 'リ' => Some("ﾘ"), 'ル' => Some("ﾙ"), 'レ' => Some("ﾚ"), 'ロ' => Some("ﾛ"),
        'ワ' => Some("ﾜ"), 'ヲ' => Some("ｦ"), 'ン' => Some("ﾝ"),
        'ガ' => Some("ｶﾞ"), 'ギ' => Some("ｷﾞ"), 'グ' => Some("ｸﾞ"), 'ゲ' => Some("ｹﾞ"), 'ゴ' => Some("ｺﾞ"),
        'ザ' => Some("ｻﾞ"), 'ジ' => Some("ｼﾞ"), 'ズ' => Some("ｽﾞ"), 'ゼ' => Some("ｾﾞ"), 'ゾ' => Some("ｿﾞ"),
        'ダ' => Some("ﾀﾞ"), 'ヂ' => Some("ﾁﾞ"), 'ヅ' => Some("ﾂﾞ"), 'デ' => Some("ﾃﾞ"), 'ド' => Some("ﾄﾞ"),
        'バ' => Some("ﾊﾞ"), 'ビ' => Some("ﾋﾞ"), 'ブ' => Some("ﾌﾞ"), 'ベ' => Some("ﾍﾞ"), 'ボ' => Some("ﾎﾞ"),
        'パ' => Some("ﾊﾟ"), 'ピ' => Some("ﾋﾟ"), 'プ' => Some("ﾌﾟ"), 'ペ' => Some("ﾍﾟ"), 'ポ' => Some("ﾎﾟ"),
        _ => None,
    }
}

/// Convert every full-width Katakana syllable in the table to its
/// half-width equivalent. Characters outside the table pass through
/// unchanged, so the conversion is idempotent.
pub fn to_half_width(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match half_width(c) {
            Some(h) => out.push_str(h),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_syllables() {
        assert_eq!(to_half_width("シモノトダイスケ"), "ｼﾓﾉﾄﾀﾞｲｽｹ");
        assert_eq!(to_half_width("アイウエオ"), "ｱｲｳｴｵ");
    }

    #[test]
    fn test_voiced_marks_expand() {
        // 濁音・半濁音は 2 文字に展開される
        assert_eq!(to_half_width("ガ"), "ｶﾞ");
        assert_eq!(to_half_width("パピプペポ"), "ﾊﾟﾋﾟﾌﾟﾍﾟﾎﾟ");
        assert_eq!(to_half_width("ガ").chars().count(), 2);
    }

    #[test]
    fn test_empty_and_passthrough() {
        assert_eq!(to_half_width(""), "");
        // Characters outside the table (ASCII, Hiragana, long vowel mark)
        assert_eq!(to_half_width("abc123"), "abc123");
        assert_eq!(to_half_width("あいう"), "あいう");
        assert_eq!(to_half_width("ー"), "ー");
    }

    #[test]
    fn test_idempotent() {
        let once = to_half_width("タナカ ヨウコ");
        let twice = to_half_width(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "ﾀﾅｶ ﾖｳｺ");
    }

    #[test]
    fn test_mixed_width_input() {
        // Already half-width parts stay untouched
        assert_eq!(to_half_width("ﾀﾅｶタロウ"), "ﾀﾅｶﾀﾛｳ");
    }
}
