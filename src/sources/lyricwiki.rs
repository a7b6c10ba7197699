use anyhow::Result;
use roxmltree::{Document, Node};

use crate::config::Config;
use crate::core::extractor::ExtractRule;
use crate::error::LyricError;
use crate::models::{LookupResult, SongQuery};
use crate::sources::http::{HttpFetch, ReqwestFetcher};
use crate::sources::LyricSource;

/// LyricWiki 스타일 가사 소스.
///
/// 조회 API는 가사 일부와 전체 가사 페이지의 URL만 알려주므로,
/// 먼저 API로 URL을 얻은 뒤 해당 페이지에서 가사 영역을 긁어온다.
pub struct LyricWikiClient<F = ReqwestFetcher> {
    http: F,
    api_url: String,
    not_found_marker: String,
    follow_redirects: bool,
    rule: ExtractRule,
}

impl LyricWikiClient<ReqwestFetcher> {
    pub fn new(config: &Config) -> Result<Self> {
        let http = ReqwestFetcher::new(&config.lookup)?;
        Self::with_fetcher(http, config)
    }
}

impl<F: HttpFetch> LyricWikiClient<F> {
    pub fn with_fetcher(http: F, config: &Config) -> Result<Self> {
        Ok(Self {
            http,
            api_url: config.lookup.api_url.clone(),
            not_found_marker: config.lookup.not_found_marker.clone(),
            follow_redirects: config.lookup.follow_redirects,
            rule: ExtractRule::from_config(&config.extract)?,
        })
    }

    /// 조회 API를 호출해 가사 페이지 URL을 얻는다.
    /// 서비스의 "Not found"와 호출/파싱 실패를 구분한다.
    pub fn try_resolve(&self, query: &SongQuery) -> Result<LookupResult, LyricError> {
        let params = [
            ("artist", query.artist()),
            ("song", query.title()),
            ("fmt", "xml"),
        ];

        let body = self
            .http
            .get_text(&self.api_url, &params, true)
            .map_err(|e| LyricError::LookupFailed(e.to_string()))?;

        parse_lookup_response(&body, &self.not_found_marker)
    }

    /// 조회 API를 호출해 가사 페이지 URL을 얻는다. 실패는 모두 `NotFound`로 취급한다.
    pub fn resolve(&self, query: &SongQuery) -> LookupResult {
        self.try_resolve(query).unwrap_or_else(|e| {
            tracing::debug!("가사 URL 조회 실패 ({}): {}", query.summary(), e);
            LookupResult::NotFound
        })
    }

    /// 가사 페이지를 받아 가사 영역의 텍스트를 추출한다.
    /// 리다이렉트는 `lookup.follow_redirects`가 켜져 있을 때만 따라간다.
    pub fn try_extract(&self, url: &str) -> Result<String, LyricError> {
        let body = self
            .http
            .get_text(url, &[], self.follow_redirects)
            .map_err(LyricError::FetchFailed)?;

        self.rule.extract(&body).ok_or(LyricError::ExtractFailed)
    }

    pub fn extract(&self, url: &str) -> Option<String> {
        match self.try_extract(url) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("가사 추출 실패 ({}): {}", url, e);
                None
            }
        }
    }
}

impl<F: HttpFetch> LyricSource for LyricWikiClient<F> {
    fn name(&self) -> &str {
        "LyricWiki"
    }

    fn lookup(&self, query: &SongQuery) -> Result<String, LyricError> {
        match self.try_resolve(query)? {
            LookupResult::Found(url) => {
                tracing::debug!("가사 페이지: {}", url);
                self.try_extract(&url)
            }
            LookupResult::NotFound => Err(LyricError::NotFound),
        }
    }
}

/// `<LyricsResult><lyrics>…</lyrics><url>…</url></LyricsResult>` 응답을 해석한다.
/// `lyrics`가 표식과 정확히 일치하면 NotFound, 아니면 퍼센트 디코딩한 `url`을 반환한다.
fn parse_lookup_response(xml: &str, not_found_marker: &str) -> Result<LookupResult, LyricError> {
    let doc = Document::parse(xml)
        .map_err(|e| LyricError::LookupFailed(format!("malformed XML: {}", e)))?;

    let root = doc.root_element();
    if root.tag_name().name() != "LyricsResult" {
        return Err(LyricError::LookupFailed(format!(
            "unexpected root element <{}>",
            root.tag_name().name()
        )));
    }

    let lyrics = child_text(root, "lyrics")
        .ok_or_else(|| LyricError::LookupFailed("missing <lyrics> element".to_string()))?;
    if lyrics == not_found_marker {
        return Ok(LookupResult::NotFound);
    }

    let raw_url = child_text(root, "url")
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| LyricError::LookupFailed("missing <url> element".to_string()))?;

    let url = urlencoding::decode(raw_url)
        .map_err(|e| LyricError::LookupFailed(format!("undecodable url {}: {}", raw_url, e)))?
        .into_owned();

    reqwest::Url::parse(&url)
        .map_err(|e| LyricError::LookupFailed(format!("invalid url {}: {}", url, e)))?;

    Ok(LookupResult::Found(url))
}

/// 이름이 일치하는 첫 자식 요소의 텍스트. 요소는 있지만 비어있으면 "".
fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
        .map(|n| n.text().unwrap_or(""))
}
