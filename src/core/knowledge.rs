//! Built-in knowledge base: fixed answers to elementary questions
//! and social phrases.
//!
//! Consulted by `ask` before the completion gateway so greetings
//! and catechism-level questions never spend a provider round
//! trip. Matching is phrase-level substring containment over the
//! lowercased latest user turn; answers are fixed strings, so
//! identical questions always get identical replies.

/// A single keyword-matched entry
#[derive(Debug, Clone)]
struct KnowledgeEntry {
    /// Lowercase trigger phrases
    keywords: &'static [&'static str],

    /// Fixed answer
    answer: &'static str,
}

/// Keyword-matched store of canned answers
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            entries: BUILTIN_ENTRIES.to_vec(),
        }
    }
}

impl KnowledgeBase {
    /// Look up a fixed answer for the given user text.
    ///
    /// Returns the first entry with a trigger phrase contained in
    /// the lowercased input, or `None` when the question should go
    /// to the completion provider.
    pub fn lookup(&self, text: &str) -> Option<&'static str> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| entry.keywords.iter().any(|k| text.contains(k)))
            .map(|entry| entry.answer)
    }

    /// Number of entries, for health/startup logging.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const BUILTIN_ENTRIES: &[KnowledgeEntry] = &[
    // Social phrases
    KnowledgeEntry {
        keywords: &["assalamu alaikum", "as-salam alaykum", "salam alaikum"],
        answer: "Wa alaikum assalam wa rahmatullahi wa barakatuh! How can I help you today?",
    },
    KnowledgeEntry {
        keywords: &["jazakallah", "jazak allah", "thank you", "thanks"],
        answer: "Wa iyyakum! May Allah reward you too. Is there anything else I can help with?",
    },
    KnowledgeEntry {
        keywords: &["how are you"],
        answer: "I'm doing great, thank you! Just here to assist you!",
    },
    KnowledgeEntry {
        keywords: &["goodbye", "good bye", "see you", "take care"],
        answer: "Ma'a salama! May Allah keep you safe. Come back any time you have a question.",
    },
    // Catechism-level questions
    KnowledgeEntry {
        keywords: &["who is allah", "what is allah"],
        answer: "Allah is the one God in Islam, the Creator of the universe, \
                 who is unique and without partners.",
    },
    KnowledgeEntry {
        keywords: &["final prophet", "last prophet", "who is muhammad"],
        answer: "The final Prophet of Islam is Prophet Muhammad (Peace Be Upon Him).",
    },
    KnowledgeEntry {
        keywords: &["meaning of la ilaha illallah", "la ilaha illallah"],
        answer: "The meaning of 'La ilaha illallah' is 'There is no god but Allah'.",
    },
    KnowledgeEntry {
        keywords: &["meaning of islam", "what does islam mean", "islam means"],
        answer: "Islam means 'submission' or 'surrender' to the will of Allah.",
    },
    KnowledgeEntry {
        keywords: &["who are the angels", "angels in islam"],
        answer: "Angels in Islam are beings created by Allah from light, who perform \
                 various tasks including delivering messages to prophets.",
    },
    KnowledgeEntry {
        keywords: &["what is zakat"],
        answer: "Zakat is an obligatory form of charity in Islam, usually calculated \
                 as 2.5% of savings.",
    },
    KnowledgeEntry {
        keywords: &["name of the religion"],
        answer: "The name of the religion revealed to Prophet Muhammad \
                 (Peace Be Upon Him) is Islam.",
    },
];
