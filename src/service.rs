//! The platform service: one method per upstream operation.

use std::{fmt, str::FromStr};

use crate::{
    Error, Result,
    client::{ApiClient, Endpoint},
    config::ClientConfig,
    model::{
        PlatformContext, QrCodeGenerateResult, QrCodePollResult, VideoDetail, VideoInfo,
        VideoStream,
    },
    sign::{Params, SigningKeys},
    transform,
};

/// A video identifier: a `BV…` id or a numeric archive id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoRef {
    Bvid(String),
    Aid(u64),
}

impl VideoRef {
    /// Query pair for this id. `aid_key` names the numeric variant's parameter,
    /// which differs between endpoints.
    fn param(&self, params: Params, aid_key: &str) -> Params {
        match self {
            Self::Bvid(bvid) => params.with("bvid", bvid),
            Self::Aid(aid) => params.with(aid_key, *aid),
        }
    }
}

impl FromStr for VideoRef {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let id = raw.trim();
        let invalid = || Error::InvalidVideoId(raw.to_string());

        if let Some(rest) = strip_prefix_ignore_case(id, "bv") {
            if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(invalid());
            }
            return Ok(Self::Bvid(format!("BV{rest}")));
        }

        let digits = strip_prefix_ignore_case(id, "av").unwrap_or(id);
        digits.parse().map(Self::Aid).map_err(|_| invalid())
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}

impl fmt::Display for VideoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bvid(bvid) => f.write_str(bvid),
            Self::Aid(aid) => write!(f, "av{aid}"),
        }
    }
}

/// Platform operations over a single [`ApiClient`].
///
/// Every method is one GET followed by one transformer. Errors are returned
/// unchanged; nothing is retried.
pub struct BilibiliService {
    client: ApiClient,
}

impl BilibiliService {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_client(ApiClient::new(config)?))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn get_home_recommendations(&self, page_size: u32, page: u32) -> Result<Vec<VideoInfo>> {
        let params = Params::new()
            .with("fresh_type", 3)
            .with("ps", page_size)
            .with("fresh_idx", page)
            .with("feed_version", "V8")
            .with("homepage_ver", 1)
            .with("web_location", 1_345_469)
            .with("seo_info", 1);

        let root = self.client.get_json(&Endpoint::HOME_FEED, &params).await?;
        transform::home_recommendations(&root)
    }

    pub async fn get_video_detail(&self, video_id: &str) -> Result<VideoDetail> {
        let video: VideoRef = video_id.parse()?;
        let params = video.param(Params::new(), "aid");

        let root = self.client.get_json(&Endpoint::VIEW, &params).await?;
        transform::video_detail(&root)
    }

    pub async fn get_video_stream(&self, video_id: &str, quality_id: u32, cid: u64) -> Result<VideoStream> {
        let video: VideoRef = video_id.parse()?;
        let params = video
            .param(Params::new(), "avid")
            .with("cid", cid)
            .with("qn", quality_id)
            .with("fnval", 4048)
            .with("fnver", 0)
            .with("fourk", 0)
            .with("platform", "web")
            .with("otype", "json");

        let root = self.client.get_json(&Endpoint::PLAY_URL, &params).await?;
        let mut stream = transform::video_stream(&root)?;
        if stream.video_id.is_empty() {
            stream.video_id = video.to_string();
        }
        Ok(stream)
    }

    /// `category_id` 0 is all categories; `day` is the window in days.
    pub async fn get_hot_ranking(&self, category_id: u32, day: u32) -> Result<Vec<VideoInfo>> {
        let params = Params::new()
            .with("rid", category_id)
            .with("day", day)
            .with("platform", "web");

        let root = self.client.get_json(&Endpoint::RANKING, &params).await?;
        transform::hot_ranking(&root)
    }

    pub async fn search_videos(&self, keyword: &str, page: u32, page_size: u32) -> Result<Vec<VideoInfo>> {
        let params = Params::new()
            .with("keyword", keyword)
            .with("page", page)
            .with("order", "totalrank")
            .with("duration", 0)
            .with("tids_1", 0)
            .with("platform", "web");

        let root = self.client.get_json(&Endpoint::SEARCH, &params).await?;
        let mut videos = transform::search_results(&root)?;
        videos.truncate(page_size as usize);
        Ok(videos)
    }

    pub async fn get_related_videos(&self, video_id: &str, page_size: u32) -> Result<Vec<VideoInfo>> {
        let video: VideoRef = video_id.parse()?;
        let params = video.param(Params::new(), "aid");

        let root = self.client.get_json(&Endpoint::RELATED, &params).await?;
        let mut videos = transform::related_videos(&root)?;
        videos.truncate(page_size as usize);
        Ok(videos)
    }

    pub async fn get_platform_context(&self) -> Result<PlatformContext> {
        let root = self.client.get_json(&Endpoint::NAV, &Params::new()).await?;
        transform::platform_context(&root)
    }

    /// Whether the client's cookie jar holds a signed-in session.
    pub async fn is_logged_in(&self) -> Result<bool> {
        Ok(self.get_platform_context().await?.user_info.is_some())
    }

    /// Fetch session keys from the nav endpoint and start signing with them.
    pub async fn refresh_signing_keys(&self) -> Result<SigningKeys> {
        let root = self.client.get_json(&Endpoint::NAV, &Params::new()).await?;
        let keys = transform::signing_keys(&root)?;
        self.client.set_signing_keys(keys.clone());
        tracing::info!(img_key = %keys.img_key, sub_key = %keys.sub_key, "Signing keys refreshed");
        Ok(keys)
    }

    pub async fn generate_login_qr_code(&self) -> Result<QrCodeGenerateResult> {
        let root = self
            .client
            .get_json(&Endpoint::QR_GENERATE, &Params::new())
            .await?;
        transform::qr_code_generate(&root)
    }

    pub async fn poll_login_qr_code_status(&self, qr_code_key: &str) -> Result<QrCodePollResult> {
        let params = Params::new().with("qrcode_key", qr_code_key);
        let root = self.client.get_json(&Endpoint::QR_POLL, &params).await?;
        transform::qr_code_poll(&root)
    }
}
