use std::fmt;

/// Permutation applied to `img_key + sub_key`.
const MIXIN_KEY_ENC_TAB: [usize; 64] = [
    46, 47, 18, 2, 53, 8, 23, 32, 15, 50, 10, 31, 58, 3, 45, 35, 27, 43, 5, 49, 33, 9, 42, 19, 29,
    28, 14, 39, 12, 38, 41, 13, 37, 48, 7, 16, 24, 55, 40, 61, 26, 17, 0, 1, 60, 51, 30, 4, 22, 25,
    54, 21, 56, 59, 6, 63, 57, 62, 11, 36, 20, 34, 44, 52,
];

pub const MIXIN_KEY_LEN: usize = 32;

/// Key material appended to the canonical query before digesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixinKey(String);

impl MixinKey {
    /// Derive the mixin key from the two key fragments.
    ///
    /// Only the first 32 table entries are used. Entries that point past the
    /// end of the concatenated fragments are skipped, so short fragments
    /// produce a shorter key instead of an error.
    pub fn derive(img_key: &str, sub_key: &str) -> Self {
        let combined: Vec<char> = img_key.chars().chain(sub_key.chars()).collect();
        let key = MIXIN_KEY_ENC_TAB[..MIXIN_KEY_LEN]
            .iter()
            .filter_map(|&index| combined.get(index))
            .collect();
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MixinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-function form of [`MixinKey::derive`].
pub fn mix_key(img_key: &str, sub_key: &str) -> MixinKey {
    MixinKey::derive(img_key, sub_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pair() {
        let key = mix_key(
            "7cd084941338484aae1ad9425b84077c",
            "4932caff0ff746eab6f01bf08b70ac45",
        );
        assert_eq!(key.as_str(), "ea1db124af3c7062474693fa704f4ff8");
        assert_eq!(key.as_str().len(), MIXIN_KEY_LEN);
    }

    #[test]
    fn test_any_full_length_fragments_give_32_chars() {
        let img = "0123456789abcdef0123456789abcdef";
        let sub = "fedcba9876543210fedcba9876543210";
        assert_eq!(mix_key(img, sub).as_str().len(), 32);
        assert_eq!(mix_key(sub, img).as_str().len(), 32);
    }

    #[test]
    fn test_short_fragments_skip_out_of_range_entries() {
        // Among the first 32 table entries only 2, 3 and 5 are below 6.
        assert_eq!(mix_key("abc", "def").as_str(), "cdf");
    }

    #[test]
    fn test_empty_fragments() {
        assert_eq!(mix_key("", "").as_str(), "");
    }

    #[test]
    fn test_fragment_order_matters() {
        let a = "7cd084941338484aae1ad9425b84077c";
        let b = "4932caff0ff746eab6f01bf08b70ac45";
        assert_ne!(mix_key(a, b), mix_key(b, a));
    }
}
