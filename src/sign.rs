pub mod canonical;
pub mod clock;
pub mod digest;
pub mod keys;
pub mod mixin;
pub mod params;
pub mod signer;

pub use canonical::{canonicalize, percent_encode};
pub use clock::{Clock, FixedClock, SystemClock};
pub use digest::digest;
pub use keys::{SigningKeys, extract_key_from_url};
pub use mixin::{MixinKey, mix_key};
pub use params::{ParamValue, Params};
pub use signer::{SignedQuery, Signer, sign};
