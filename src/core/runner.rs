use std::path::Path;

use anyhow::Result;

use crate::config::FrameConfig;
use crate::core::logbook::LogSink;
use crate::core::{scanner, tagger};
use crate::sources::LyricSource;

/// 한 파일의 처리 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    /// dry-run에서 가사를 찾았지만 기록하지 않음
    Found,
    AlreadyTagged,
    NoLyric,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub found: usize,
    pub already_tagged: usize,
    pub no_lyric: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Written => self.written += 1,
            Outcome::Found => self.found += 1,
            Outcome::AlreadyTagged => self.already_tagged += 1,
            Outcome::NoLyric => self.no_lyric += 1,
            Outcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.written + self.found + self.already_tagged + self.no_lyric + self.failed
    }
}

pub struct Runner<'a, S: LyricSource + ?Sized, L: LogSink + ?Sized> {
    source: &'a S,
    log: &'a mut L,
    frame: &'a FrameConfig,
    dry_run: bool,
}

impl<'a, S: LyricSource + ?Sized, L: LogSink + ?Sized> Runner<'a, S, L> {
    pub fn new(source: &'a S, log: &'a mut L, frame: &'a FrameConfig) -> Self {
        Self {
            source,
            log,
            frame,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 경로 아래의 모든 MP3 파일에 가사를 넣는다.
    /// 파일 하나의 실패는 로그에 남기고 다음 파일로 넘어간다.
    pub fn run(&mut self, path: &Path) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for file in scanner::mp3_paths(path)? {
            let outcome = self.process_file(&file);
            summary.record(outcome);
        }
        Ok(summary)
    }

    pub fn process_file(&mut self, path: &Path) -> Outcome {
        let shown = path.display();

        let mut tag = match tagger::read_tag(path) {
            Ok(Some(tag)) => tag,
            Ok(None) => {
                self.error(&format!("no id3tag: {}", shown));
                return Outcome::Failed;
            }
            Err(e) => {
                self.error(&format!("unreadable id3tag: {} ({:#})", shown, e));
                return Outcome::Failed;
            }
        };

        if tagger::has_lyrics(&tag, self.frame) {
            self.note(&format!("existing USLT tag: {}", shown));
            return Outcome::AlreadyTagged;
        }

        let query = match tagger::song_query(&tag) {
            Some(query) => query,
            None => {
                self.error(&format!("missing artist/title: {}", shown));
                return Outcome::Failed;
            }
        };

        let lyric = match self.source.lookup(&query) {
            Ok(lyric) => lyric,
            Err(e) => {
                tracing::debug!("{} ({}): {}", query.summary(), self.source.name(), e);
                self.note(&format!("no lyric: {}", shown));
                return Outcome::NoLyric;
            }
        };

        if self.dry_run {
            self.note(&format!("lyrics found: {}", shown));
            return Outcome::Found;
        }

        match tagger::write_lyrics(path, &mut tag, self.frame, &lyric) {
            Ok(()) => {
                self.note(&format!("lyrics written: {}", shown));
                Outcome::Written
            }
            Err(e) => {
                self.error(&format!("write failed: {} ({:#})", shown, e));
                Outcome::Failed
            }
        }
    }

    fn note(&mut self, message: &str) {
        tracing::info!("{}", message);
        if let Err(e) = self.log.append(message) {
            tracing::warn!("로그 기록 실패: {}", e);
        }
    }

    fn error(&mut self, message: &str) {
        tracing::warn!("{}", message);
        if let Err(e) = self.log.error(message) {
            tracing::warn!("로그 기록 실패: {}", e);
        }
    }
}
