use url::Url;

use crate::Result;

/// Which base host an endpoint lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Api,
    Passport,
}

/// A fixed upstream path and whether it needs a WBI signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub host: Host,
    pub path: &'static str,
    pub signed: bool,
}

impl Endpoint {
    const fn api(name: &'static str, path: &'static str, signed: bool) -> Self {
        Self {
            name,
            host: Host::Api,
            path,
            signed,
        }
    }

    const fn passport(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            host: Host::Passport,
            path,
            signed: false,
        }
    }

    pub const NAV: Self = Self::api("nav", "x/web-interface/nav", false);
    pub const PLAY_URL: Self = Self::api("playurl", "x/player/wbi/playurl", true);
    pub const VIEW: Self = Self::api("view", "x/web-interface/view", true);
    pub const RANKING: Self = Self::api("ranking", "x/web-interface/ranking/v2", true);
    pub const SEARCH: Self = Self::api("search", "x/web-interface/wbi/search/all/v2", true);
    pub const RELATED: Self = Self::api("related", "x/web-interface/archive/related", true);
    pub const HOME_FEED: Self = Self::api("home", "x/web-interface/wbi/index/top/feed/rcmd", true);
    pub const QR_GENERATE: Self =
        Self::passport("qrcode_generate", "x/passport-login/web/qrcode/generate");
    pub const QR_POLL: Self = Self::passport("qrcode_poll", "x/passport-login/web/qrcode/poll");

    /// Resolve against the base URL for this endpoint's host.
    pub fn url(&self, bases: &BaseUrls) -> Result<Url> {
        let base = match self.host {
            Host::Api => &bases.api,
            Host::Passport => &bases.passport,
        };
        Ok(base.join(self.path)?)
    }
}

/// Parsed base URLs for both hosts.
#[derive(Debug, Clone)]
pub struct BaseUrls {
    pub api: Url,
    pub passport: Url,
}

impl BaseUrls {
    pub fn parse(api: &str, passport: &str) -> Result<Self> {
        Ok(Self {
            api: parse_base(api)?,
            passport: parse_base(passport)?,
        })
    }
}

/// `Url::join` drops the last path segment unless it ends with `/`.
fn parse_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
