pub mod extractor;
pub mod logbook;
pub mod runner;
pub mod scanner;
pub mod tagger;
