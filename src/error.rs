use thiserror::Error;

/// HTTP 전송 계층에서 발생하는 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

/// 가사 조회 파이프라인의 실패 종류.
/// 공개 진입점(`resolve`, `extract`, `lookup_lyric`)에서는 모두 "없음"으로 합쳐진다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LyricError {
    /// 조회 서비스가 명시적으로 "Not found"를 응답함
    #[error("lookup service reported no match")]
    NotFound,

    #[error("lookup failed: {0}")]
    LookupFailed(String),

    #[error("page fetch failed: {0}")]
    FetchFailed(#[source] HttpError),

    #[error("no lyric text in page")]
    ExtractFailed,
}
