//! WBI request signing.
//!
//! `w_rid = digest(canonical(params + wts) + mixin_key)`. Only query
//! parameters are covered; request bodies never take part in the signature.

use std::collections::{BTreeMap, btree_map};

use super::{
    canonical::{canonicalize, percent_encode},
    digest::digest,
    keys::SigningKeys,
    mixin::MixinKey,
    params::Params,
};

pub const WTS: &str = "wts";
pub const W_RID: &str = "w_rid";

/// Parameters ready for the wire: the caller's values stringified, plus
/// `wts` and (when signed) `w_rid`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedQuery {
    pairs: BTreeMap<String, String>,
}

impl SignedQuery {
    /// Stringify `params` without signing them.
    pub fn unsigned(params: &Params) -> Self {
        Self {
            pairs: params
                .present()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.pairs.iter()
    }

    /// Encoded `k=v&...` string, keys ascending.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.pairs
    }
}

impl<'a> IntoIterator for &'a SignedQuery {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Signs requests with one set of keys. The mixin key is derived once.
#[derive(Debug, Clone)]
pub struct Signer {
    keys: SigningKeys,
    mixin_key: MixinKey,
}

impl Signer {
    pub fn new(keys: SigningKeys) -> Self {
        let mixin_key = MixinKey::derive(&keys.img_key, &keys.sub_key);
        Self { keys, mixin_key }
    }

    pub fn keys(&self) -> &SigningKeys {
        &self.keys
    }

    pub fn mixin_key(&self) -> &MixinKey {
        &self.mixin_key
    }

    /// Sign `params` at `now_epoch_seconds`. Pure: same inputs, same output.
    pub fn sign(&self, params: &Params, now_epoch_seconds: i64) -> SignedQuery {
        let mut with_wts = params.clone();
        with_wts.insert(WTS, now_epoch_seconds);

        let canonical = canonicalize(&with_wts);
        let w_rid = digest(&format!("{canonical}{}", self.mixin_key));

        let mut query = SignedQuery::unsigned(&with_wts);
        query.pairs.insert(W_RID.to_string(), w_rid);
        query
    }
}

impl Default for Signer {
    fn default() -> Self {
        Self::new(SigningKeys::fallback())
    }
}

/// One-shot form of [`Signer::sign`].
pub fn sign(params: &Params, keys: &SigningKeys, now_epoch_seconds: i64) -> SignedQuery {
    Signer::new(keys.clone()).sign(params, now_epoch_seconds)
}
