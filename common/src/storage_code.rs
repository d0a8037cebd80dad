//! 庫位コード生成
//!
//! 形式: `ZK-` または `YG-` + 8文字。
//! 紛らわしい文字（0, o, O, l, L, i, I）は使わない。

use rand::Rng;
use regex::Regex;

/// 庫位コードのプレフィックス
pub const PREFIXES: [&str; 2] = ["ZK", "YG"];

/// 使用可能な文字
pub const ALPHABET: &[u8] = b"123456789abcdefghjkmnpqrstuvwxyzABCDEFGHJKMNPQRSTUVWXYZ";

/// プレフィックス後の文字数
pub const BODY_LENGTH: usize = 8;

/// ランダムな庫位コードを生成
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = if rng.gen_bool(0.5) { PREFIXES[0] } else { PREFIXES[1] };
    let body: String = (0..BODY_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{prefix}-{body}")
}

/// 形式チェック（表示上のヒント用。保存はブロックしない）
pub fn is_well_formed(code: &str) -> bool {
    lazy_static::lazy_static! {
        static ref CODE_RE: Regex =
            Regex::new(r"^(ZK|YG)-[1-9a-hjkmnp-zA-HJKMNP-Z]{8}$").unwrap();
    }
    CODE_RE.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_is_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let code = generate(&mut rng);
            assert!(is_well_formed(&code), "不正な形式: {}", code);
            assert_eq!(code.len(), 3 + BODY_LENGTH);
        }
    }

    #[test]
    fn test_generate_uses_both_prefixes() {
        let mut rng = StdRng::seed_from_u64(42);
        let codes: Vec<String> = (0..200).map(|_| generate(&mut rng)).collect();
        assert!(codes.iter().any(|c| c.starts_with("ZK-")));
        assert!(codes.iter().any(|c| c.starts_with("YG-")));
    }

    #[test]
    fn test_alphabet_excludes_ambiguous() {
        for ch in [b'0', b'o', b'O', b'l', b'L', b'i', b'I'] {
            assert!(!ALPHABET.contains(&ch), "{} が含まれている", ch as char);
        }
        assert_eq!(ALPHABET.len(), 55);
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("ZK-ab3dfg7h"));
        assert!(is_well_formed("YG-ABCDEFGH"));
        assert!(!is_well_formed("XX-ab3dfg7h"));
        assert!(!is_well_formed("ZK-ab3dfg7"));
        assert!(!is_well_formed("ZK-ab3dfg7hh"));
        assert!(!is_well_formed("ZK-ab0dfg7h"));
        assert!(!is_well_formed("zk-ab3dfg7h"));
        assert!(!is_well_formed(""));
    }
}
