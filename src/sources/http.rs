use anyhow::{Context, Result};
use reqwest::redirect::Policy;

use crate::config::LookupConfig;
use crate::error::HttpError;

/// 텍스트 본문을 가져오는 HTTP 클라이언트 추상화.
/// 테스트에서는 네트워크 없이 응답을 흉내내는 구현으로 교체한다.
pub trait HttpFetch {
    /// GET 요청을 보내고 본문을 텍스트로 디코딩해 반환한다.
    /// `follow_redirects`가 false면 3xx 응답도 `HttpError::Status`가 된다.
    /// 2xx가 아닌 최종 응답은 `HttpError::Status`.
    fn get_text(
        &self,
        url: &str,
        query: &[(&str, &str)],
        follow_redirects: bool,
    ) -> Result<String, HttpError>;
}

/// reqwest 블로킹 클라이언트 기반 구현.
/// 리다이렉트 정책은 클라이언트 단위라서 두 개를 만들어 둔다.
pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
    no_redirect: reqwest::blocking::Client,
}

impl ReqwestFetcher {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("HTTP 클라이언트 생성에 실패했습니다")?;

        let no_redirect = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::none())
            .build()
            .context("HTTP 클라이언트 생성에 실패했습니다")?;

        Ok(Self {
            client,
            no_redirect,
        })
    }
}

impl HttpFetch for ReqwestFetcher {
    fn get_text(
        &self,
        url: &str,
        query: &[(&str, &str)],
        follow_redirects: bool,
    ) -> Result<String, HttpError> {
        let client = if follow_redirects {
            &self.client
        } else {
            &self.no_redirect
        };

        let mut request = client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }

        // charset은 Content-Type을 따르고, 없으면 UTF-8로 디코딩된다.
        response
            .text()
            .map_err(|e| HttpError::Transport(e.to_string()))
    }
}
