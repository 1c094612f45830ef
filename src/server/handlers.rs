pub mod login;
pub mod video;

pub use login::{handle_qr_generate, handle_qr_poll};
pub use video::{
    handle_context, handle_home, handle_ranking, handle_related, handle_search, handle_video_detail,
    handle_video_stream,
};
