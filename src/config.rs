use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// 조회 API와 HTTP 클라이언트 설정.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LookupConfig {
    pub api_url: String,
    /// API가 결과 없음을 알릴 때 `lyrics` 필드에 넣는 값 (대소문자 구분)
    pub not_found_marker: String,
    pub user_agent: String,
    /// 가사 페이지 요청에만 적용된다. 조회 API 요청은 항상 리다이렉트를 따라간다.
    pub follow_redirects: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_url: "http://lyrics.wikia.com/api.php".to_string(),
            not_found_marker: "Not found".to_string(),
            user_agent: format!("lyrtag/{}", env!("CARGO_PKG_VERSION")),
            follow_redirects: false,
        }
    }
}

/// 가사 페이지에서 본문을 뽑아내는 규칙.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractConfig {
    /// 가사 컨테이너를 찾는 CSS 선택자
    pub container: String,
    /// 파싱 전에 줄바꿈 문자로 치환할 태그들. 나열된 순서대로 치환한다.
    pub break_markers: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            container: r#"div[class="lyricbox"]"#.to_string(),
            break_markers: vec![
                "<br />".to_string(),
                "<br/>".to_string(),
                "<br>".to_string(),
            ],
        }
    }
}

/// 기록할 USLT 프레임의 키.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    pub description: String,
    pub language: String,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            description: "lyrics.wikia.com".to_string(),
            language: "eng".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lyrtag.log"),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("lyrtag")
        .join("config.toml")
}

/// 설정 파일을 읽는다. 파일이 없거나 읽을 수 없으면 기본값을 사용한다.
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("설정 파일을 해석할 수 없어 기본값을 사용합니다 ({}): {}", path.display(), e);
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}

pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)
        .with_context(|| format!("설정 파일을 쓸 수 없습니다: {}", path.display()))?;
    Ok(())
}
