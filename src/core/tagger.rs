use std::path::Path;

use anyhow::{Context, Result};
use id3::frame::Lyrics;
use id3::{Tag, TagLike, Version};

use crate::config::FrameConfig;
use crate::models::SongQuery;

/// MP3 파일에서 ID3 태그를 읽는다. 태그가 없으면 None을 반환한다.
pub fn read_tag(path: &Path) -> Result<Option<Tag>> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(Some(tag)),
        Err(id3::Error {
            kind: id3::ErrorKind::NoTag,
            ..
        }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// 태그의 아티스트(TPE1)와 제목(TIT2)으로 검색 키를 만든다. 하나라도 없으면 None.
pub fn song_query(tag: &Tag) -> Option<SongQuery> {
    SongQuery::new(tag.artist()?, tag.title()?)
}

/// 설정된 설명/언어와 일치하는 USLT 프레임이 이미 있는지 확인한다.
pub fn has_lyrics(tag: &Tag, frame: &FrameConfig) -> bool {
    tag.lyrics()
        .any(|l| l.description == frame.description && l.lang == frame.language)
}

/// 가사를 USLT 프레임으로 추가하고 ID3v2.4로 저장한다.
/// 같은 설명/언어의 프레임이 있으면 교체된다.
pub fn write_lyrics(path: &Path, tag: &mut Tag, frame: &FrameConfig, text: &str) -> Result<()> {
    tag.add_frame(Lyrics {
        lang: frame.language.clone(),
        description: frame.description.clone(),
        text: text.to_string(),
    });

    tag.write_to_path(path, Version::Id3v24)
        .with_context(|| format!("태그를 저장할 수 없습니다: {}", path.display()))?;
    Ok(())
}
