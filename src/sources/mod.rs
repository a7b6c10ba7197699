pub mod http;
pub mod lyricwiki;

use crate::error::LyricError;
use crate::models::SongQuery;

/// 가사 소스 트레이트.
/// 아티스트/제목으로 가사 전문을 찾아오는 두 단계(조회 → 추출) 파이프라인을 추상화한다.
pub trait LyricSource {
    /// 로그에 표시할 소스 이름.
    fn name(&self) -> &str;

    /// 가사를 찾는다. 실패 종류를 구분해서 돌려준다.
    fn lookup(&self, query: &SongQuery) -> Result<String, LyricError>;

    /// 가사를 찾는다. 어떤 이유로든 실패하면 None.
    fn lookup_lyric(&self, artist: &str, title: &str) -> Option<String> {
        let query = SongQuery::new(artist, title)?;
        match self.lookup(&query) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("{} 가사 조회 실패 ({}): {}", self.name(), query.summary(), e);
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::error::HttpError;
    use crate::sources::http::HttpFetch;

    struct Call {
        url: String,
        query: Vec<(String, String)>,
        follow_redirects: bool,
    }

    /// URL별로 미리 정해둔 응답을 돌려주고, 호출 내역을 기록하는 가짜 클라이언트.
    #[derive(Default)]
    pub struct FakeHttp {
        responses: HashMap<String, Result<String, HttpError>>,
        calls: RefCell<Vec<Call>>,
    }

    impl FakeHttp {
        pub fn respond(mut self, url: &str, body: &str) -> Self {
            self.responses.insert(url.to_string(), Ok(body.to_string()));
            self
        }

        pub fn fail(mut self, url: &str, err: HttpError) -> Self {
            self.responses.insert(url.to_string(), Err(err));
            self
        }

        pub fn call_count(&self, url: &str) -> usize {
            self.calls.borrow().iter().filter(|c| c.url == url).count()
        }

        pub fn total_calls(&self) -> usize {
            self.calls.borrow().len()
        }

        pub fn last_query(&self, url: &str) -> Option<Vec<(String, String)>> {
            self.calls
                .borrow()
                .iter()
                .rev()
                .find(|c| c.url == url)
                .map(|c| c.query.clone())
        }

        pub fn follows_redirects(&self, url: &str) -> Option<bool> {
            self.calls
                .borrow()
                .iter()
                .rev()
                .find(|c| c.url == url)
                .map(|c| c.follow_redirects)
        }
    }

    impl HttpFetch for FakeHttp {
        fn get_text(
            &self,
            url: &str,
            query: &[(&str, &str)],
            follow_redirects: bool,
        ) -> Result<String, HttpError> {
            self.calls.borrow_mut().push(Call {
                url: url.to_string(),
                query: query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                follow_redirects,
            });
            self.responses
                .get(url)
                .cloned()
                .unwrap_or(Err(HttpError::Status(404)))
        }
    }
}
