pub mod context;
pub mod login;
pub mod stream;
pub mod video;

pub use context::{PlatformConfig, PlatformContext, UserInfo};
pub use login::{QrCodeGenerateResult, QrCodeInfo, QrCodeLoginStatus, QrCodePollResult};
pub use stream::{AudioStreamItem, Resolution, StreamItem, VideoStream};
pub use video::{AuthorInfo, VideoDetail, VideoInfo, VideoPart, VideoQuality};
