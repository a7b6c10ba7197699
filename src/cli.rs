use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use comfy_table::{Cell, Table};

use crate::config::{self, Config};
use crate::core::logbook::FileLog;
use crate::core::runner::Runner;
use crate::core::scanner;
use crate::models::{SongQuery, TagState};
use crate::sources::lyricwiki::LyricWikiClient;
use crate::sources::LyricSource;

#[derive(Parser)]
#[command(name = "lyrtag", version, about = "MP3 파일의 ID3 태그에 가사(USLT)를 찾아 넣는 도구")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 설정 파일 경로 (기본: ~/.config/lyrtag/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 진단 로그 상세도 (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 디렉토리를 탐색하며 가사가 없는 파일에 가사를 기록
    Tag {
        /// MP3 파일 또는 디렉토리
        path: PathBuf,
        /// 작업 로그 파일 (기본: 설정의 log.path)
        #[arg(long)]
        log: Option<PathBuf>,
        /// 가사를 찾기만 하고 파일은 수정하지 않음
        #[arg(long)]
        dry_run: bool,
    },
    /// 아티스트/제목으로 가사를 찾아 표준 출력에 표시
    Lookup {
        #[arg(long)]
        artist: String,
        #[arg(long)]
        title: String,
    },
    /// 디렉토리를 스캔하여 가사 현황 표시
    Scan {
        /// 스캔할 디렉토리
        directory: PathBuf,
    },
    /// 현재 설정 표시
    Config {
        /// 기본 설정 파일 생성
        #[arg(long)]
        init: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let cfg_path = cli.config.unwrap_or_else(config::default_config_path);
    let cfg = config::load_config(&cfg_path);

    match cli.command {
        Commands::Tag { path, log, dry_run } => cmd_tag(&cfg, &path, log, dry_run),
        Commands::Lookup { artist, title } => cmd_lookup(&cfg, &artist, &title),
        Commands::Scan { directory } => cmd_scan(&cfg, &directory),
        Commands::Config { init } => cmd_config(&cfg, &cfg_path, init),
    }
}

fn cmd_tag(cfg: &Config, path: &Path, log_path: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let log_path = log_path.unwrap_or_else(|| cfg.log.path.clone());
    let mut log = FileLog::open(&log_path)?;
    let client = LyricWikiClient::new(cfg)?;

    tracing::info!("{} 탐색 시작 (로그: {})", path.display(), log.path().display());

    let summary = Runner::new(&client, &mut log, &cfg.frame)
        .dry_run(dry_run)
        .run(path)?;

    if summary.total() == 0 {
        println!("{}에서 MP3 파일을 찾을 수 없습니다", path.display());
        return Ok(());
    }

    if dry_run {
        println!("가사 찾음: {}", summary.found);
    } else {
        println!("가사 기록: {}", summary.written);
    }
    println!(
        "이미 있음: {}, 가사 없음: {}, 오류: {} (총 {} 파일, 로그: {})",
        summary.already_tagged,
        summary.no_lyric,
        summary.failed,
        summary.total(),
        log_path.display()
    );

    Ok(())
}

fn cmd_lookup(cfg: &Config, artist: &str, title: &str) -> Result<()> {
    let query = SongQuery::new(artist, title).context("아티스트와 제목이 모두 필요합니다")?;
    let client = LyricWikiClient::new(cfg)?;

    match client.lookup(&query) {
        Ok(lyric) => {
            println!("{}", lyric);
            Ok(())
        }
        Err(e) => anyhow::bail!("가사를 찾을 수 없습니다: {} ({})", query.summary(), e),
    }
}

fn cmd_scan(cfg: &Config, directory: &Path) -> Result<()> {
    let files = scanner::scan_path(directory, &cfg.frame)?;

    if files.is_empty() {
        println!("{}에서 MP3 파일을 찾을 수 없습니다", directory.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["파일", "아티스트", "제목", "태그", "가사"]);

    for file in &files {
        let tag_status = match file.tag_state {
            TagState::Present => "있음",
            TagState::Missing => "없음",
            TagState::Unreadable => "오류",
        };
        let lyrics_status = if file.has_lyrics { "있음" } else { "없음" };

        table.add_row(vec![
            Cell::new(file.filename()),
            Cell::new(file.display_artist()),
            Cell::new(file.display_title()),
            Cell::new(tag_status),
            Cell::new(lyrics_status),
        ]);
    }

    println!("{table}");
    println!(
        "\n총 {} 파일 (가사 있음: {}, 가사 없음: {}, 검색 불가: {})",
        files.len(),
        files.iter().filter(|f| f.has_lyrics).count(),
        files.iter().filter(|f| !f.has_lyrics).count(),
        files
            .iter()
            .filter(|f| !f.has_lyrics && f.query.is_none())
            .count(),
    );

    Ok(())
}

fn cmd_config(cfg: &Config, cfg_path: &Path, init: bool) -> Result<()> {
    if init {
        if cfg_path.exists() {
            println!("설정 파일이 이미 있습니다: {}", cfg_path.display());
            return Ok(());
        }
        config::save_config(cfg_path, &Config::default())?;
        println!("기본 설정을 저장했습니다: {}", cfg_path.display());
        return Ok(());
    }

    println!("# {}", cfg_path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
