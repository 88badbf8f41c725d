//! Include/exclude filter stages
//!
//! A stage reads a [`RecordStream`] of [`Matchable`] records and forwards
//! only the records whose designated field does (include) or does not
//! (exclude) match one pattern. Stages are chained one per pattern, so a
//! record survives an include chain iff it matches every pattern, and an
//! exclude chain iff it matches none. The chain order never changes which
//! records survive, only the order stages see them in.

use regex::Regex;

use crate::core::models::Matchable;
use crate::core::stream::RecordStream;
use crate::error::{Error, Result};

/// Whether a stage keeps matching or non-matching records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Keep records that match
    Include,
    /// Keep records that do not match
    Exclude,
}

impl FilterMode {
    /// Whether a record with the given match outcome passes
    #[must_use]
    pub const fn keeps(self, matched: bool) -> bool {
        match self {
            Self::Include => matched,
            Self::Exclude => !matched,
        }
    }
}

/// A list of compiled filter patterns
#[derive(Debug, Clone, Default)]
pub struct Patterns(Vec<Regex>);

impl Patterns {
    /// Compile every non-empty pattern, failing on the first invalid one
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        patterns
            .iter()
            .map(AsRef::as_ref)
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| Error::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Number of stages these patterns produce
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no stage would be built
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compiled expressions, in stage order
    pub fn iter(&self) -> impl Iterator<Item = &Regex> {
        self.0.iter()
    }
}

/// One filter stage on its own task
pub fn filter_stage<T>(input: RecordStream<T>, pattern: Regex, mode: FilterMode) -> RecordStream<T>
where
    T: Matchable + Send + 'static,
{
    let mut input = input;
    RecordStream::spawn(move |out| async move {
        while let Some(record) = input.next().await {
            let record = record?;
            if mode.keeps(record.matches(&pattern)) && !out.emit(record).await {
                break;
            }
        }
        Ok(())
    })
}

impl<T: Matchable + Send + 'static> RecordStream<T> {
    /// Chain one include stage per pattern
    #[must_use]
    pub fn apply_include_filters(self, patterns: &Patterns) -> Self {
        self.apply_filters(patterns, FilterMode::Include)
    }

    /// Chain one exclude stage per pattern
    #[must_use]
    pub fn apply_exclude_filters(self, patterns: &Patterns) -> Self {
        self.apply_filters(patterns, FilterMode::Exclude)
    }

    fn apply_filters(self, patterns: &Patterns, mode: FilterMode) -> Self {
        patterns
            .iter()
            .fold(self, |stream, pattern| filter_stage(stream, pattern.clone(), mode))
    }
}

/// Include and exclude patterns applied to one record kind
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    include: Patterns,
    exclude: Patterns,
}

impl FilterSet {
    /// Compile both pattern lists
    pub fn compile<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        Ok(Self {
            include: Patterns::compile(include)?,
            exclude: Patterns::compile(exclude)?,
        })
    }

    /// Include patterns
    #[must_use]
    pub const fn include(&self) -> &Patterns {
        &self.include
    }

    /// Exclude patterns
    #[must_use]
    pub const fn exclude(&self) -> &Patterns {
        &self.exclude
    }

    /// Keep records matching every include and no exclude pattern
    #[must_use]
    pub fn apply<T: Matchable + Send + 'static>(&self, stream: RecordStream<T>) -> RecordStream<T> {
        stream.apply_include_filters(&self.include).apply_exclude_filters(&self.exclude)
    }
}
