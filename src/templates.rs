use std::collections::HashMap;

use anyhow::{Context as _, Result};
use rand::seq::SliceRandom;
use serde::Deserialize;

/// One intent entry: a tag plus its candidate response templates.
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub tag: String,
    #[serde(default)]
    pub responses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IntentFile {
    intents: Vec<Template>,
}

/// Static tag -> responses mapping. Selection among multiple responses for
/// the same tag is uniform-random.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    by_tag: HashMap<String, Vec<String>>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the `{"intents": [{"tag": ..., "responses": [...]}]}` format.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: IntentFile =
            serde_json::from_str(raw).context("malformed intent template file")?;
        let mut store = Self::new();
        for intent in file.intents {
            store.insert(intent.tag, intent.responses);
        }
        Ok(store)
    }

    /// The template set shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(include_str!("../data/intents.json"))
    }

    pub fn insert(&mut self, tag: impl Into<String>, responses: Vec<String>) {
        self.by_tag.insert(tag.into(), responses);
    }

    pub fn responses(&self, tag: &str) -> Option<&[String]> {
        self.by_tag.get(tag).map(|r| r.as_slice())
    }

    /// Uniform-random pick among the tag's responses. `None` when the tag is
    /// unknown or has no responses; callers render that as an empty
    /// contribution, never as an error.
    pub fn pick(&self, tag: &str) -> Option<&str> {
        self.by_tag
            .get(tag)?
            .choose(&mut rand::thread_rng())
            .map(|s| s.as_str())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(|k| k.as_str())
    }
}
