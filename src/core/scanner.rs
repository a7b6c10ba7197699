use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::config::FrameConfig;
use crate::core::tagger;
use crate::models::{Mp3File, TagState};

/// 경로가 디렉토리면 재귀 탐색하고, 파일이면 그 파일 하나만 반환한다.
/// 결과는 경로 순으로 정렬된다.
pub fn mp3_paths(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        Ok(collect_mp3_paths(path))
    } else {
        if !path.exists() {
            anyhow::bail!("파일을 찾을 수 없습니다: {}", path.display());
        }
        if !is_mp3(path) {
            anyhow::bail!("MP3 파일이 아닙니다: {}", path.display());
        }
        Ok(vec![path.to_path_buf()])
    }
}

/// 디렉토리를 재귀 순회하며 MP3 파일 경로를 수집한다.
/// 디렉토리 심볼릭 링크는 따라가지 않고, 읽을 수 없는 항목은 건너뛴다.
fn collect_mp3_paths(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("{} 탐색 중 항목을 건너뜁니다: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir() && entry.path().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_mp3(path))
        .collect()
}

/// 확장자가 .mp3인지 확인한다 (대소문자 무시).
fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// 디렉토리를 스캔하여 각 파일의 태그/가사 상태를 반환한다.
pub fn scan_path(path: &Path, frame: &FrameConfig) -> Result<Vec<Mp3File>> {
    Ok(mp3_paths(path)?
        .into_iter()
        .map(|p| load_mp3_file(p, frame))
        .collect())
}

fn load_mp3_file(path: PathBuf, frame: &FrameConfig) -> Mp3File {
    match tagger::read_tag(&path) {
        Ok(Some(tag)) => Mp3File {
            query: tagger::song_query(&tag),
            has_lyrics: tagger::has_lyrics(&tag, frame),
            tag_state: TagState::Present,
            path,
        },
        Ok(None) => Mp3File {
            path,
            tag_state: TagState::Missing,
            query: None,
            has_lyrics: false,
        },
        Err(e) => {
            tracing::debug!("태그를 읽을 수 없습니다 ({}): {:#}", path.display(), e);
            Mp3File {
                path,
                tag_state: TagState::Unreadable,
                query: None,
                has_lyrics: false,
            }
        }
    }
}
