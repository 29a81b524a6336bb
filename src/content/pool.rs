use crate::config::Config;
use crate::content::PoolId;
use crate::content::catalog::{Catalog, CatalogEntry};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolEntry {
    pub title: Option<String>,
    pub text: String,
}

impl From<CatalogEntry> for PoolEntry {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            title: entry.title,
            text: entry.content,
        }
    }
}

/// Ordered practice texts for one pool. Built once, read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextPool {
    entries: Vec<PoolEntry>,
}

impl TextPool {
    pub fn new(entries: Vec<PoolEntry>) -> Self {
        Self { entries }
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: texts
                .into_iter()
                .map(|t| PoolEntry {
                    title: None,
                    text: t.into(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.text.as_str())
    }

    pub fn title_of(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.text == text)
            .and_then(|e| e.title.as_deref())
    }
}

#[derive(Clone, Debug, Default)]
pub struct PoolTable {
    chinese: TextPool,
    english: TextPool,
}

impl PoolTable {
    pub fn new(chinese: TextPool, english: TextPool) -> Self {
        Self { chinese, english }
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            chinese: TextPool::new(catalog.chinese.into_iter().map(PoolEntry::from).collect()),
            english: TextPool::new(catalog.english.into_iter().map(PoolEntry::from).collect()),
        }
    }

    /// Catalog pools, with any list set in the config replacing its pool wholesale.
    pub fn from_config(config: &Config, catalog: Catalog) -> Self {
        let mut table = Self::from_catalog(catalog);
        if let Some(ref texts) = config.chinese_texts {
            table.chinese = TextPool::from_texts(texts.iter().cloned());
        }
        if let Some(ref texts) = config.english_texts {
            table.english = TextPool::from_texts(texts.iter().cloned());
        }
        table
    }

    pub fn get(&self, id: PoolId) -> &TextPool {
        match id {
            PoolId::Chinese => &self.chinese,
            PoolId::English => &self.english,
        }
    }
}
