//! PoE Goblin: clipboard item text parsing and price lookup plumbing
//!
//! When a player copies an item in game, the client writes a plain-text dump of
//! it to the clipboard. This crate turns that dump into a typed [`ParsedItem`]
//! and provides the pieces a price overlay needs around it:
//!
//! 1. **Parsing** -- A pure, total pipeline from raw text to [`ParseOutcome`]:
//!    normalize lines, detect the locale, extract the header block (rarity,
//!    name, base type, class), collect the modifier lines
//! 2. **Name Resolution** -- An immutable name/id dictionary merged from the
//!    market catalog and a localized name mapping
//! 3. **Price History** -- A time-boxed cache keyed by `(item id, league)` in
//!    front of any [`history::HistorySource`]
//! 4. **Batch Parsing** -- Parallel parsing of saved dumps with a CSV report
//!
//! # Grammars
//!
//! English and Japanese exports differ in header labels and in where the item
//! name sits. Both are rows in a declarative table ([`grammar::GRAMMARS`]); the
//! locale detector selects a row and every later stage reads it.
//!
//! # Key Modules
//!
//! - [`parser`] -- Pipeline entry points (`parse_item`, `parse_clipboard`)
//! - [`normalize`] -- Line splitting and trimming
//! - [`language`] -- Script-based locale detection over the leading lines
//! - [`grammar`] -- Per-locale labels, positional rules and rarity vocabulary
//! - [`header`] -- Rarity, name, base type and class extraction
//! - [`mods`] -- Modifier section state machine and color markup stripping
//! - [`index`] -- Name/id dictionary lookup
//! - [`history`] -- Price history cache
//! - [`batch`] -- Parallel parsing of a directory of dumps
//! - [`stats`] -- Thread-safe atomic counters over parse outcomes
//! - [`models`] -- Core data types
//! - [`config`] -- Constants for parsing and lookups
//!
//! # Example Usage
//!
//! ```bash
//! # Parse the item text saved from the clipboard
//! poe-goblin parse -i item.txt
//!
//! # Parse and resolve against the item dictionary
//! poe-goblin lookup --catalog items.json --mapping japaneseNameMapping.json -i item.txt
//!
//! # Parse a folder of dumps and write a report
//! poe-goblin batch -d dumps/ --report report.csv
//! ```

pub mod batch;
pub mod config;
pub mod grammar;
pub mod header;
pub mod history;
pub mod index;
pub mod language;
pub mod models;
pub mod mods;
pub mod normalize;
pub mod parser;
pub mod stats;

pub use models::{Language, ParseFailure, ParseOutcome, ParsedItem, Rarity};
pub use parser::{parse_clipboard, parse_item};
