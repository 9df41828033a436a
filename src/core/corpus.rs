//! Corpus store: immutable in-memory Quran and Hadith reference
//! data.
//!
//! Both corpora are loaded once from JSON files before the server
//! starts accepting requests and are never mutated afterwards, so
//! concurrent reads need no synchronization. The store is shared
//! by `Arc` across all requests.
//!
//! A load failure is fatal: the service refuses to start rather
//! than serve a partial corpus.

use crate::core::config::CorpusConfig;
use crate::core::error::{Result, TawfiqError};
use crate::core::types::{HadithRecord, Surah};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// On-disk shape of `quran.json`
#[derive(Debug, Deserialize)]
struct QuranFile {
    surahs: Vec<Surah>,
}

/// On-disk shape of `hadith.json`
#[derive(Debug, Deserialize)]
struct HadithFile {
    records: Vec<HadithRecord>,
}

/// Read-only lookup over the Quran and Hadith reference data
#[derive(Debug)]
pub struct CorpusStore {
    /// Surahs sorted by number
    surahs: Vec<Surah>,

    /// Hadith records in canonical corpus order
    hadith: Vec<HadithRecord>,
}

impl CorpusStore {
    /// Build a store from already-parsed data, validating corpus
    /// invariants.
    ///
    /// Surahs are sorted by number; hadith order is preserved as
    /// given (corpus order is canonical).
    pub fn new(mut surahs: Vec<Surah>, hadith: Vec<HadithRecord>) -> Result<Self> {
        surahs.sort_by_key(|s| s.number);
        validate_surahs(&surahs)?;
        validate_hadith(&hadith)?;

        Ok(Self { surahs, hadith })
    }

    /// Load both corpora from the configured file paths.
    pub fn load(config: &CorpusConfig) -> Result<Self> {
        let quran: QuranFile = read_json(&config.quran_path)?;
        let hadith: HadithFile = read_json(&config.hadith_path)?;

        let mut surahs = quran.surahs;
        if let Some(base) = &config.audio_base_url {
            fill_audio_urls(&mut surahs, base);
        }

        let store = Self::new(surahs, hadith.records)?;
        tracing::info!(
            surahs = store.surahs.len(),
            hadith_records = store.hadith.len(),
            "Corpus loaded"
        );

        Ok(store)
    }

    /// Look up a surah by number. Returns `None` for numbers
    /// outside 1..=114 or surahs absent from the corpus.
    pub fn surah_by_number(&self, number: u32) -> Option<&Surah> {
        if !(1..=114).contains(&number) {
            return None;
        }

        self.surahs
            .binary_search_by_key(&(number as u16), |s| s.number)
            .ok()
            .map(|idx| &self.surahs[idx])
    }

    /// Case- and punctuation-insensitive lookup by canonical name
    /// or alias.
    ///
    /// The first exact match wins; otherwise the first surah whose
    /// name or an alias contains the normalized query as a
    /// substring. Blank queries never match.
    pub fn surah_by_name_or_alias(&self, text: &str) -> Option<&Surah> {
        let query = normalize(text);
        if query.is_empty() {
            return None;
        }

        // Exact match pass
        for surah in &self.surahs {
            if surah.names().any(|n| normalize(n) == query) {
                return Some(surah);
            }
        }

        // Substring pass
        self.surahs
            .iter()
            .find(|surah| surah.names().any(|n| normalize(n).contains(&query)))
    }

    /// Full ordered hadith sequence, read-only.
    pub fn all_hadith_records(&self) -> &[HadithRecord] {
        &self.hadith
    }

    /// Number of loaded surahs.
    pub fn surah_count(&self) -> usize {
        self.surahs.len()
    }

    /// All loaded surahs, sorted by number.
    pub fn all_surahs(&self) -> &[Surah] {
        &self.surahs
    }
}

impl Surah {
    /// Canonical name followed by aliases.
    fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Normalize text for name matching: lowercase, alphanumeric only.
///
/// Makes "Al-Fatihah", "al fatihah" and "AlFatihah" compare equal.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| TawfiqError::CorpusLoad(format!("Failed to read {}: {e}", path.display())))?;

    serde_json::from_str(&contents)
        .map_err(|e| TawfiqError::CorpusLoad(format!("Failed to parse {}: {e}", path.display())))
}

/// Fill in templated recitation URLs for verses without an
/// explicit audio reference: `{base}/SSSVVV.mp3`.
fn fill_audio_urls(surahs: &mut [Surah], base: &str) {
    let base = base.trim_end_matches('/');
    for surah in surahs {
        for verse in &mut surah.verses {
            if verse.audio.is_none() {
                verse.audio = Some(format!("{base}/{:03}{:03}.mp3", surah.number, verse.number));
            }
        }
    }
}

fn validate_surahs(surahs: &[Surah]) -> Result<()> {
    let mut seen = HashSet::new();

    for surah in surahs {
        if !(1..=114).contains(&surah.number) {
            return Err(TawfiqError::CorpusLoad(format!(
                "Surah number {} out of range 1..=114",
                surah.number
            )));
        }

        if !seen.insert(surah.number) {
            return Err(TawfiqError::CorpusLoad(format!(
                "Duplicate surah number {}",
                surah.number
            )));
        }

        if surah.name.trim().is_empty() {
            return Err(TawfiqError::CorpusLoad(format!(
                "Surah {} has an empty name",
                surah.number
            )));
        }

        // Ordinals must be contiguous from 1 with no gaps
        for (idx, verse) in surah.verses.iter().enumerate() {
            let expected = (idx + 1) as u16;
            if verse.number != expected {
                return Err(TawfiqError::CorpusLoad(format!(
                    "Surah {} verse ordinal {} out of order (expected {})",
                    surah.number, verse.number, expected
                )));
            }
        }
    }

    Ok(())
}

fn validate_hadith(records: &[HadithRecord]) -> Result<()> {
    let mut seen = HashSet::new();

    for record in records {
        if !seen.insert(record.number) {
            return Err(TawfiqError::CorpusLoad(format!(
                "Duplicate hadith sequence number {}",
                record.number
            )));
        }

        if record.title.trim().is_empty() && record.text.trim().is_empty() {
            return Err(TawfiqError::CorpusLoad(format!(
                "Hadith {} has neither title nor text",
                record.number
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Verse;

    fn verse(number: u16) -> Verse {
        Verse {
            number,
            arabic: format!("آية {number}"),
            translation: format!("verse {number}"),
            transliteration: None,
            audio: None,
        }
    }

    fn surah(number: u16, name: &str, aliases: &[&str], verse_count: u16) -> Surah {
        Surah {
            number,
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            verses: (1..=verse_count).map(verse).collect(),
        }
    }

    fn record(number: u32, title: &str, topic: Option<&str>) -> HadithRecord {
        HadithRecord {
            number,
            title: title.to_string(),
            text: "text".to_string(),
            topic: topic.map(String::from),
            narrator: None,
            book_name: None,
            book_number: None,
            volume_number: None,
        }
    }

    fn test_store() -> CorpusStore {
        CorpusStore::new(
            vec![
                surah(1, "Al-Fatihah", &["The Opening", "Fatiha"], 7),
                surah(112, "Al-Ikhlas", &["Sincerity", "Purity of Faith"], 4),
                surah(114, "An-Nas", &["Mankind"], 6),
            ],
            vec![
                record(1, "Revelation", Some("Revelation")),
                record(2, "Prayer in congregation", Some("Prayer")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Al-Fatihah"), "alfatihah");
        assert_eq!(normalize("al fatihah"), "alfatihah");
        assert_eq!(normalize("  AN-NAS!  "), "annas");
        assert_eq!(normalize("--- ..."), "");
    }

    #[test]
    fn test_surah_by_number() {
        let store = test_store();
        assert_eq!(store.surah_by_number(1).unwrap().name, "Al-Fatihah");
        assert_eq!(store.surah_by_number(114).unwrap().name, "An-Nas");
    }

    #[test]
    fn test_surah_by_number_out_of_range() {
        let store = test_store();
        assert!(store.surah_by_number(0).is_none());
        assert!(store.surah_by_number(115).is_none());
        assert!(store.surah_by_number(999).is_none());
    }

    #[test]
    fn test_surah_by_number_absent_from_corpus() {
        let store = test_store();
        assert!(store.surah_by_number(36).is_none());
    }

    #[test]
    fn test_name_lookup_exact_beats_substring() {
        // "An-Nas" is a substring of nothing else here, but an
        // exact alias match must win over any substring match.
        let store = test_store();
        let found = store.surah_by_name_or_alias("mankind").unwrap();
        assert_eq!(found.number, 114);
    }

    #[test]
    fn test_name_lookup_is_punctuation_insensitive() {
        let store = test_store();
        assert_eq!(store.surah_by_name_or_alias("al fatihah").unwrap().number, 1);
        assert_eq!(store.surah_by_name_or_alias("AL-FATIHAH").unwrap().number, 1);
    }

    #[test]
    fn test_name_lookup_substring() {
        let store = test_store();
        // "ikhlas" is a substring of the normalized "Al-Ikhlas"
        assert_eq!(store.surah_by_name_or_alias("ikhlas").unwrap().number, 112);
        // "opening" matches the alias "The Opening"
        assert_eq!(store.surah_by_name_or_alias("opening").unwrap().number, 1);
    }

    #[test]
    fn test_name_lookup_blank_and_unknown() {
        let store = test_store();
        assert!(store.surah_by_name_or_alias("").is_none());
        assert!(store.surah_by_name_or_alias("  --  ").is_none());
        assert!(store.surah_by_name_or_alias("NotARealSurah").is_none());
    }

    #[test]
    fn test_hadith_order_preserved() {
        let store = test_store();
        let numbers: Vec<u32> = store.all_hadith_records().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_validation_rejects_gapped_ordinals() {
        let mut s = surah(1, "Al-Fatihah", &[], 7);
        s.verses.remove(3); // leaves a gap at ordinal 4

        let result = CorpusStore::new(vec![s], vec![]);
        assert!(matches!(result, Err(TawfiqError::CorpusLoad(_))));
    }

    #[test]
    fn test_validation_rejects_duplicate_surah_numbers() {
        let result = CorpusStore::new(
            vec![surah(1, "Al-Fatihah", &[], 7), surah(1, "Duplicate", &[], 3)],
            vec![],
        );
        assert!(matches!(result, Err(TawfiqError::CorpusLoad(_))));
    }

    #[test]
    fn test_validation_rejects_out_of_range_surah() {
        let result = CorpusStore::new(vec![surah(0, "Invalid", &[], 1)], vec![]);
        assert!(matches!(result, Err(TawfiqError::CorpusLoad(_))));
    }

    #[test]
    fn test_validation_rejects_duplicate_hadith_numbers() {
        let result = CorpusStore::new(
            vec![],
            vec![record(7, "a", None), record(7, "b", None)],
        );
        assert!(matches!(result, Err(TawfiqError::CorpusLoad(_))));
    }

    #[test]
    fn test_audio_url_templating() {
        let mut surahs = vec![surah(1, "Al-Fatihah", &[], 2)];
        fill_audio_urls(&mut surahs, "https://example.com/recitations/");

        assert_eq!(
            surahs[0].verses[0].audio.as_deref(),
            Some("https://example.com/recitations/001001.mp3")
        );
        assert_eq!(
            surahs[0].verses[1].audio.as_deref(),
            Some("https://example.com/recitations/001002.mp3")
        );
    }

    #[test]
    fn test_audio_url_explicit_reference_kept() {
        let mut s = surah(1, "Al-Fatihah", &[], 1);
        s.verses[0].audio = Some("https://cdn.example.com/custom.mp3".to_string());

        let mut surahs = vec![s];
        fill_audio_urls(&mut surahs, "https://example.com");

        assert_eq!(
            surahs[0].verses[0].audio.as_deref(),
            Some("https://cdn.example.com/custom.mp3")
        );
    }

    #[test]
    fn test_load_missing_file_is_corpus_load_error() {
        let config = CorpusConfig {
            quran_path: "/nonexistent/quran.json".into(),
            hadith_path: "/nonexistent/hadith.json".into(),
            audio_base_url: None,
        };

        let result = CorpusStore::load(&config);
        assert!(matches!(result, Err(TawfiqError::CorpusLoad(_))));
    }
}
