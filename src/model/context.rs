use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub user_name: String,
    pub avatar_url: Option<String>,
    pub level: u32,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    pub platform_name: String,
    pub platform_logo: Option<String>,
    pub theme_color: Option<String>,
    pub supported_login_methods: Vec<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            platform_name: "Bilibili".to_string(),
            platform_logo: None,
            theme_color: Some("#FB7299".to_string()),
            supported_login_methods: vec!["qrcode".to_string()],
        }
    }
}

/// Who is signed in (if anyone) and static platform facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformContext {
    pub user_info: Option<UserInfo>,
    pub platform_config: PlatformConfig,
}
