use anyhow::{anyhow, Result};
use scraper::{Html, Selector};

use crate::config::ExtractConfig;

/// 가사 페이지에서 본문 텍스트를 뽑아내는 규칙.
///
/// 다른 사이트를 대상으로 하려면 선택자와 줄바꿈 태그만 바꾸면 된다.
#[derive(Debug, Clone)]
pub struct ExtractRule {
    container: Selector,
    break_markers: Vec<String>,
}

impl ExtractRule {
    /// 선택자 문자열을 파싱해 규칙을 만든다. 빈 줄바꿈 태그는 무시한다.
    pub fn new(container: &str, break_markers: &[String]) -> Result<Self> {
        let container = Selector::parse(container)
            .map_err(|e| anyhow!("잘못된 가사 컨테이너 선택자입니다 ({}): {}", container, e))?;
        let break_markers = break_markers
            .iter()
            .filter(|m| !m.is_empty())
            .cloned()
            .collect();
        Ok(Self {
            container,
            break_markers,
        })
    }

    pub fn from_config(config: &ExtractConfig) -> Result<Self> {
        Self::new(&config.container, &config.break_markers)
    }

    /// HTML 본문에서 가사를 추출한다.
    ///
    /// 줄바꿈 태그는 트리로 파싱하기 전에 `\n`으로 바꿔야 한다. 파싱 후에는
    /// `<br>`이 빈 요소가 되어 줄 구분이 사라진다. 컨테이너의 직계 텍스트 노드만
    /// 이어붙이므로 안쪽 요소(출처 링크 등)는 결과에 포함되지 않는다.
    /// 여러 텍스트 노드는 문서 순서대로 이어붙인다.
    ///
    /// 컨테이너가 없거나 직계 텍스트가 비어있으면 None. 공백뿐인 텍스트도
    /// 태그에 기록할 가치가 없으므로 같은 취급을 한다.
    pub fn extract(&self, body: &str) -> Option<String> {
        let mut text = body.to_string();
        for marker in &self.break_markers {
            text = text.replace(marker.as_str(), "\n");
        }

        let document = Html::parse_document(&text);
        let container = document.select(&self.container).next()?;

        let lyric: String = container
            .children()
            .filter_map(|node| node.value().as_text())
            .map(|t| &**t)
            .collect();

        if lyric.trim().is_empty() {
            return None;
        }
        Some(lyric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_rule() -> ExtractRule {
        ExtractRule::from_config(&ExtractConfig::default()).unwrap()
    }

    fn page(body: &str) -> String {
        format!("<html><head><title>Song</title></head><body>{}</body></html>", body)
    }

    #[test]
    fn test_break_tag_becomes_newline() {
        let html = page(r#"<div class="lyricbox">Line one<br />Line two</div>"#);
        assert_eq!(
            default_rule().extract(&html).as_deref(),
            Some("Line one\nLine two")
        );
    }

    #[test]
    fn test_break_tag_variants() {
        let html = page(r#"<div class="lyricbox">a<br/>b<br>c<br />d</div>"#);
        assert_eq!(default_rule().extract(&html).as_deref(), Some("a\nb\nc\nd"));
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let html = page(r#"<div class="lyricbox"><br />Verse<br /><br />Chorus<br /></div>"#);
        assert_eq!(
            default_rule().extract(&html).as_deref(),
            Some("\nVerse\n\nChorus\n")
        );
    }

    #[test]
    fn test_nested_elements_are_excluded() {
        let html = page(concat!(
            r#"<div class="lyricbox">"#,
            r#"<div class="rtMatcher"><a href="/ringtone">Send to your cell</a></div>"#,
            "First<br />Second",
            "<!-- PUT LYRICS HERE -->",
            r#"<div class="lyricsbreak"></div>"#,
            "</div>"
        ));
        assert_eq!(default_rule().extract(&html).as_deref(), Some("First\nSecond"));
    }

    #[test]
    fn test_text_around_nested_element_is_joined() {
        let html = page(concat!(
            r#"<div class="lyricbox">"#,
            "Verse<br />",
            r#"<span class="ad">advert</span>"#,
            "Chorus<br />",
            "<i>(spoken)</i>",
            "Outro",
            "</div>"
        ));
        assert_eq!(
            default_rule().extract(&html).as_deref(),
            Some("Verse\nChorus\nOutro")
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = page(r#"<div class="lyricbox">&#76;a &amp; la<br />R&ocirc;le</div>"#);
        assert_eq!(default_rule().extract(&html).as_deref(), Some("La & la\nRôle"));
    }

    #[test]
    fn test_first_container_wins() {
        let html = page(r#"<div class="lyricbox">first</div><div class="lyricbox">second</div>"#);
        assert_eq!(default_rule().extract(&html).as_deref(), Some("first"));
    }

    #[test]
    fn test_missing_container() {
        let html = page(r#"<div class="content">Line one<br />Line two</div>"#);
        assert_eq!(default_rule().extract(&html), None);
    }

    #[test]
    fn test_class_must_match_exactly() {
        let html = page(r#"<div class="lyricbox wide">Line one</div>"#);
        assert_eq!(default_rule().extract(&html), None);
    }

    #[test]
    fn test_empty_container_is_absent() {
        let html = page(r#"<div class="lyricbox"></div>"#);
        assert_eq!(default_rule().extract(&html), None);
    }

    #[test]
    fn test_container_with_only_child_elements_is_absent() {
        let html = page(r#"<div class="lyricbox"><a href="/x">credits</a></div>"#);
        assert_eq!(default_rule().extract(&html), None);
    }

    #[test]
    fn test_whitespace_only_container_is_absent() {
        let html = page("<div class=\"lyricbox\">  <br />  </div>");
        assert_eq!(default_rule().extract(&html), None);
    }

    #[test]
    fn test_malformed_html() {
        let html = r#"<div class="lyricbox">unclosed<br />still here<p>para"#;
        assert_eq!(
            default_rule().extract(html).as_deref(),
            Some("unclosed\nstill here")
        );
    }

    #[test]
    fn test_custom_rule() {
        let rule = ExtractRule::new("pre#lyrics", &["<br>".to_string(), String::new()]).unwrap();
        let html = page(r#"<pre id="lyrics">one<br>two</pre><div class="lyricbox">x</div>"#);
        assert_eq!(rule.extract(&html).as_deref(), Some("one\ntwo"));
    }

    #[test]
    fn test_invalid_selector() {
        assert!(ExtractRule::new("div[[", &[]).is_err());
    }
}
