use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// 줄 단위 추가 전용 작업 로그.
pub trait LogSink {
    fn append(&mut self, message: &str) -> io::Result<()>;

    fn error(&mut self, message: &str) -> io::Result<()> {
        self.append(&format!("ERROR: {}", message))
    }
}

/// 파일 끝에 한 줄씩 덧붙이는 로그. 진입점에서 한 번 열어 끝까지 사용한다.
pub struct FileLog {
    file: File,
    path: PathBuf,
}

impl FileLog {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("로그 파일을 열 수 없습니다: {}", path.display()))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLog {
    fn append(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.file, "{}", message)
    }
}

/// 메모리에 쌓아두는 로그.
impl LogSink for Vec<String> {
    fn append(&mut self, message: &str) -> io::Result<()> {
        self.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyrtag.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        {
            let mut log = FileLog::open(&path).unwrap();
            log.append("lyrics written: a.mp3").unwrap();
            log.error("no id3tag: b.mp3").unwrap();
        }
        let mut log = FileLog::open(&path).unwrap();
        log.append("no lyric: c.mp3").unwrap();
        assert_eq!(log.path(), path.as_path());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "earlier run\nlyrics written: a.mp3\nERROR: no id3tag: b.mp3\nno lyric: c.mp3\n"
        );
    }

    #[test]
    fn test_memory_log() {
        let mut log: Vec<String> = Vec::new();
        log.error("boom").unwrap();
        assert_eq!(log, vec!["ERROR: boom".to_string()]);
    }
}
