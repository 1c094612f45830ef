//! Raw response JSON to DTOs.
//!
//! Every transformer takes the parsed response root and either returns a
//! fully populated DTO or a transformation error. None of them touch the
//! network.

pub mod detail;
pub mod feed;
pub mod json;
pub mod login;
pub mod stream;
pub mod user;

pub use detail::video_detail;
pub use feed::{home_recommendations, hot_ranking, related_videos, search_results};
pub use login::{qr_code_generate, qr_code_poll};
pub use stream::{audio_quality_name, estimate_resolution, format_and_codec, quality_name, video_stream};
pub use user::{platform_context, signing_keys};
