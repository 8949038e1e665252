use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
    ops::Deref,
};

use anyhow::anyhow;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::StdResult;

/// The name of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(pub String);

impl Deref for RepositoryName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number of stars a repository has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StarsCounter(pub u64);

impl Deref for StarsCounter {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for StarsCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repository as returned by the search API.
///
/// The field set is whatever the API sends; the key order of the response is kept.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct RepositoryItem(Map<String, Value>);

impl RepositoryItem {
    /// Retrieves the repository name.
    pub fn name(&self) -> StdResult<RepositoryName> {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .map(|name| RepositoryName(name.to_string()))
            .ok_or_else(|| anyhow!("Repository item has no 'name' field"))
    }

    /// Retrieves the number of stars of the repository.
    pub fn stargazers_count(&self) -> StdResult<StarsCounter> {
        self.0
            .get("stargazers_count")
            .and_then(Value::as_u64)
            .map(StarsCounter)
            .ok_or_else(|| anyhow!("Repository item has no 'stargazers_count' field"))
    }

    /// Retrieves the URL of the language breakdown endpoint of the repository.
    pub fn languages_url(&self) -> StdResult<&str> {
        self.0
            .get("languages_url")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Repository item has no 'languages_url' field"))
    }

    /// Iterates over the field names, in response order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Iterates over the field values, in response order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }
}

impl Display for RepositoryItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.0.get("name").and_then(Value::as_str).unwrap_or("?");
        let stars = self.0.get("stargazers_count").and_then(Value::as_u64);
        match stars {
            Some(stars) => write!(f, "Repository: {name}, Stars: {stars}"),
            None => write!(f, "Repository: {name}"),
        }
    }
}

/// The languages of a repository, with their size in bytes.
///
/// Language names are lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSet(BTreeMap<String, u64>);

impl LanguageSet {
    /// Returns `true` if the set contains the given (lower-cased) language.
    pub fn contains(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }

    /// Returns `true` if every requested language is part of the set.
    pub fn contains_all(&self, requested: &RequestedLanguages) -> bool {
        requested.iter().all(|language| self.contains(language))
    }
}

impl From<HashMap<String, u64>> for LanguageSet {
    fn from(languages: HashMap<String, u64>) -> Self {
        let mut set = BTreeMap::new();
        for (language, bytes) in languages {
            *set.entry(language.to_lowercase()).or_insert(0) += bytes;
        }

        Self(set)
    }
}

impl<const N: usize> From<[(&str, u64); N]> for LanguageSet {
    fn from(languages: [(&str, u64); N]) -> Self {
        languages
            .into_iter()
            .map(|(language, bytes)| (language.to_string(), bytes))
            .collect::<HashMap<_, _>>()
            .into()
    }
}

impl Display for LanguageSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let languages = self.0.keys().cloned().collect::<Vec<_>>();
        write!(f, "[{}]", languages.join(", "))
    }
}

/// The languages a repository must contain to be retained.
///
/// Names are lower-cased at construction; an empty set retains everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedLanguages(Vec<String>);

impl RequestedLanguages {
    /// Creates a new `RequestedLanguages` from the given names.
    pub fn new<S: AsRef<str>>(languages: &[S]) -> Self {
        Self(
            languages
                .iter()
                .map(|language| language.as_ref().trim().to_lowercase())
                .filter(|language| !language.is_empty())
                .collect(),
        )
    }
}

impl Deref for RequestedLanguages {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RequestedLanguages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// The popularity of a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPopularity {
    /// The name of the repository.
    pub name: RepositoryName,

    /// The number of stars the repository has.
    pub stars: StarsCounter,
}

impl RepositoryPopularity {
    /// Creates a new `RepositoryPopularity` instance.
    pub fn new(name: &str, stars: u64) -> Self {
        Self {
            name: RepositoryName(name.to_string()),
            stars: StarsCounter(stars),
        }
    }

    /// Reads the popularity of a repository item.
    pub fn try_from_item(item: &RepositoryItem) -> StdResult<Self> {
        Ok(Self {
            name: item.name()?,
            stars: item.stargazers_count()?,
        })
    }
}

/// Repositories ranked by stars, most popular first.
///
/// Repositories with the same number of stars keep their relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopularityRanking(Vec<RepositoryPopularity>);

impl PopularityRanking {
    /// Ranks the given popularity entries.
    pub fn new(mut entries: Vec<RepositoryPopularity>) -> Self {
        entries.sort_by(|a, b| b.stars.cmp(&a.stars));

        Self(entries)
    }

    /// Ranks the given repository items.
    pub fn try_from_items(items: &[RepositoryItem]) -> StdResult<Self> {
        let entries = items
            .iter()
            .map(RepositoryPopularity::try_from_item)
            .collect::<StdResult<Vec<_>>>()?;

        Ok(Self::new(entries))
    }

    /// Retrieves the ranked entries.
    pub fn entries(&self) -> &[RepositoryPopularity] {
        &self.0
    }

    /// Retrieves the `total` most popular entries, or all of them if there are fewer.
    pub fn top(&self, total: usize) -> &[RepositoryPopularity] {
        &self.0[..total.min(self.0.len())]
    }
}

/// Splits ranked entries into parallel name and star sequences.
pub fn split_popularity(entries: &[RepositoryPopularity]) -> (Vec<String>, Vec<u64>) {
    entries
        .iter()
        .map(|entry| (entry.name.to_string(), *entry.stars))
        .unzip()
}

/// Computes the star values at which horizontal gridlines are drawn.
///
/// Starts at the lowest star count and advances by `step` while staying strictly below the
/// highest star count.
pub fn popularity_gridlines(entries: &[RepositoryPopularity], step: u64) -> Vec<u64> {
    let lowest = entries.iter().map(|entry| *entry.stars).min();
    let highest = entries.iter().map(|entry| *entry.stars).max();
    match (lowest, highest) {
        (Some(lowest), Some(highest)) if step > 0 => (lowest..highest)
            .step_by(step as usize)
            .collect(),
        _ => vec![],
    }
}
