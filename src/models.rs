use std::path::PathBuf;

/// 가사 검색 키. 아티스트와 제목 모두 비어있지 않아야 한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    artist: String,
    title: String,
}

impl SongQuery {
    /// 앞뒤 공백을 제거하고, 어느 한쪽이라도 비어있으면 None을 반환한다.
    pub fn new(artist: &str, title: &str) -> Option<Self> {
        let artist = artist.trim();
        let title = title.trim();
        if artist.is_empty() || title.is_empty() {
            return None;
        }
        Some(Self {
            artist: artist.to_string(),
            title: title.to_string(),
        })
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

/// 조회 API의 응답 결과. "찾을 수 없음"은 에러가 아니라 정상적인 결과다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// 디코딩된 가사 페이지 URL
    Found(String),
    NotFound,
}

/// 파일에 붙어있는 ID3 태그의 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagState {
    Present,
    Missing,
    Unreadable,
}

#[derive(Debug, Clone)]
pub struct Mp3File {
    pub path: PathBuf,
    pub tag_state: TagState,
    pub query: Option<SongQuery>,
    pub has_lyrics: bool,
}

impl Mp3File {
    pub fn filename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("알 수 없음")
    }

    pub fn display_artist(&self) -> &str {
        self.query.as_ref().map(|q| q.artist()).unwrap_or("-")
    }

    pub fn display_title(&self) -> &str {
        self.query.as_ref().map(|q| q.title()).unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_trims_fields() {
        let query = SongQuery::new("  IU ", "Blueming\n").unwrap();
        assert_eq!(query.artist(), "IU");
        assert_eq!(query.title(), "Blueming");
        assert_eq!(query.summary(), "IU - Blueming");
    }

    #[test]
    fn test_query_requires_both_fields() {
        assert!(SongQuery::new("", "Blueming").is_none());
        assert!(SongQuery::new("IU", "   ").is_none());
    }
}
