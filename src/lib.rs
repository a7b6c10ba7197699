//! Finds song lyrics by artist/title and stores them in the MP3's ID3 USLT frame.
//!
//! The lookup is a two-step pipeline: the lookup API resolves artist/title to a
//! lyric page URL, then the page is fetched and the lyric region is scraped.
//! See [`sources::lyricwiki::LyricWikiClient`].

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod sources;
