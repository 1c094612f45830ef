use serde::Deserialize;

fn default_home_page_size() -> u32 {
    10
}

fn default_page() -> u32 {
    1
}

fn default_list_page_size() -> u32 {
    20
}

fn default_quality() -> u32 {
    80
}

fn default_day() -> u32 {
    3
}

/// Query parameters for /api/home.
#[derive(Debug, Deserialize)]
pub struct HomeParams {
    #[serde(default = "default_home_page_size")]
    pub page_size: u32,

    #[serde(default = "default_page")]
    pub page: u32,
}

/// Query parameters for /api/videos/{id}/stream.
#[derive(Debug, Deserialize)]
pub struct StreamParams {
    /// Requested quality code.
    #[serde(default = "default_quality")]
    pub quality: u32,

    /// Part to play; required by the upstream.
    pub cid: u64,
}

/// Query parameters for /api/videos/{id}/related.
#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    #[serde(default = "default_list_page_size")]
    pub page_size: u32,
}

/// Query parameters for /api/ranking.
#[derive(Debug, Deserialize)]
pub struct RankingParams {
    /// Category id, 0 for all.
    #[serde(default)]
    pub category: u32,

    /// Window in days.
    #[serde(default = "default_day")]
    pub day: u32,
}

/// Query parameters for /api/search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: String,

    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_list_page_size")]
    pub page_size: u32,
}
