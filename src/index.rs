use crate::grammar::GRAMMARS;
use crate::models::{ItemRecord, Language};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

/// One entry of the market catalog export.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub item_id: u32,
    pub name: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub category_api_id: Option<String>,
    pub icon_url: Option<String>,
}

impl CatalogEntry {
    /// Uniques carry `name`, everything else only `text`.
    pub fn canonical_name(&self) -> Option<&str> {
        non_empty(&self.name).or_else(|| non_empty(&self.text))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    pub items: usize,
    pub mapped: usize,
    pub unmapped: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub record: &'a ItemRecord,
    pub matched_language: Language,
}

/// Immutable name/id dictionary. Build once, share by reference.
pub struct ItemIndex {
    records: Vec<ItemRecord>,
    names: FxHashMap<Language, FxHashMap<String, usize>>,
    ids: FxHashMap<u32, usize>,
    stats: IndexStats,
}

impl ItemIndex {
    /// Merges the catalog with a localized name mapping (canonical name to
    /// localized name). The first catalog entry per canonical name wins.
    pub fn build(
        catalog: Vec<CatalogEntry>,
        language: Language,
        translations: &FxHashMap<String, String>,
    ) -> Self {
        let mut records = Vec::with_capacity(catalog.len());
        let mut names: FxHashMap<Language, FxHashMap<String, usize>> = FxHashMap::default();
        let mut ids = FxHashMap::default();
        let mut stats = IndexStats {
            items: catalog.len(),
            ..IndexStats::default()
        };

        for entry in catalog {
            let Some(canonical) = entry.canonical_name() else {
                warn!(item_id = entry.item_id, "Catalog entry without name or text");
                stats.skipped += 1;
                continue;
            };
            let canonical = canonical.to_string();

            let english = names.entry(Language::English).or_default();
            if english.contains_key(&canonical) {
                debug!(name = %canonical, item_id = entry.item_id, "Duplicate canonical name");
                stats.duplicates += 1;
                continue;
            }

            let idx = records.len();
            english.insert(canonical.clone(), idx);
            ids.entry(entry.item_id).or_insert(idx);

            match translations.get(&canonical).map(|t| t.trim()) {
                Some(localized) if !localized.is_empty() => {
                    names
                        .entry(language)
                        .or_default()
                        .insert(localized.to_string(), idx);
                    stats.mapped += 1;
                }
                _ => stats.unmapped += 1,
            }

            records.push(ItemRecord {
                id: entry.item_id,
                canonical_name: canonical,
                item_type: entry.item_type.unwrap_or_default(),
                category: entry.category_api_id.unwrap_or_default(),
                icon_url: entry.icon_url.unwrap_or_default(),
            });
        }

        info!(
            items = stats.items,
            records = records.len(),
            mapped = stats.mapped,
            unmapped = stats.unmapped,
            duplicates = stats.duplicates,
            "Item index built"
        );

        Self {
            records,
            names,
            ids,
            stats,
        }
    }

    /// Loads the catalog and an optional Japanese name mapping from JSON files.
    pub fn load(catalog_path: &Path, mapping_path: Option<&Path>) -> Result<Self> {
        let file = File::open(catalog_path)
            .with_context(|| format!("Failed to open catalog: {}", catalog_path.display()))?;
        let catalog: Vec<CatalogEntry> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse catalog: {}", catalog_path.display()))?;
        info!(entries = catalog.len(), path = %catalog_path.display(), "Loaded catalog");

        let translations = match mapping_path {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open name mapping: {}", path.display()))?;
                let mapping: FxHashMap<String, String> =
                    serde_json::from_reader(BufReader::new(file)).with_context(|| {
                        format!("Failed to parse name mapping: {}", path.display())
                    })?;
                info!(entries = mapping.len(), path = %path.display(), "Loaded name mapping");
                mapping
            }
            None => FxHashMap::default(),
        };

        Ok(Self::build(catalog, Language::Japanese, &translations))
    }

    /// Looks the name up in `language` first, then in every other locale.
    pub fn resolve(&self, name: &str, language: Language) -> Option<Resolved<'_>> {
        let fallbacks = GRAMMARS
            .iter()
            .map(|g| g.language)
            .filter(|l| *l != language);

        for lang in std::iter::once(language).chain(fallbacks) {
            if let Some(&idx) = self.names.get(&lang).and_then(|m| m.get(name)) {
                return Some(Resolved {
                    record: &self.records[idx],
                    matched_language: lang,
                });
            }
        }
        debug!(name = name, language = %language, "Name not in index");
        None
    }

    pub fn by_id(&self, id: u32) -> Option<&ItemRecord> {
        self.ids.get(&id).map(|&idx| &self.records[idx])
    }

    /// Name registered for a record in the given locale, if any.
    pub fn name_in(&self, id: u32, language: Language) -> Option<&str> {
        let idx = *self.ids.get(&id)?;
        self.names
            .get(&language)?
            .iter()
            .find(|(_, &i)| i == idx)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }
}
