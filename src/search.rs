//! Tag and date searches across all albums of a user.
//!
//! Search clauses use `name=value`, split on the first `=`. Date bounds use
//! `MM/DD/YYYY` and denote local midnight of that day; an empty bound is
//! open. Both date bounds are exclusive.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::error::ValidationError;
use crate::model::{Album, PhotoLibrary, Tag, User, DATE_FORMAT};

/// How two tag clauses combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

/// A search that can be run against one album.
pub trait Search {
    fn run(&self, album: &Album, library: &PhotoLibrary) -> Album;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagQuery {
    Single(Tag),
    All(Tag, Tag),
    Any(Tag, Tag),
}

impl TagQuery {
    /// Build a query from up to two clauses. Empty clauses are absent; at
    /// least one must be present, and two need a combinator.
    pub fn parse(
        first: &str,
        second: &str,
        combinator: Option<Combinator>,
    ) -> Result<Self, ValidationError> {
        let clauses: Vec<&str> = [first, second].into_iter().filter(|c| !c.is_empty()).collect();
        match clauses.as_slice() {
            [] => Err(ValidationError::NoTagClauses),
            [only] => Ok(Self::Single(parse_clause(only)?)),
            [a, b, ..] => {
                let a = parse_clause(a)?;
                let b = parse_clause(b)?;
                match combinator {
                    Some(Combinator::And) => Ok(Self::All(a, b)),
                    Some(Combinator::Or) => Ok(Self::Any(a, b)),
                    None => Err(ValidationError::MissingCombinator),
                }
            }
        }
    }
}

impl Search for TagQuery {
    fn run(&self, album: &Album, library: &PhotoLibrary) -> Album {
        match self {
            Self::Single(tag) => album.search_by_tag(library, tag),
            Self::All(a, b) => album.search_conjunctive(library, a, b),
            Self::Any(a, b) => album.search_disjunctive(library, a, b),
        }
    }
}

/// Parse a `name=value` search clause. Either side may be empty.
pub fn parse_clause(text: &str) -> Result<Tag, ValidationError> {
    text.split_once('=')
        .map(|(name, value)| Tag::new(name, value))
        .ok_or_else(|| ValidationError::MalformedClause(text.to_string()))
}

/// An exclusive date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Parse optional `MM/DD/YYYY` bounds. Empty text leaves that side open.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = if start.is_empty() {
            DateTime::<Utc>::MIN_UTC
        } else {
            parse_date(start)?
        };
        let end = if end.is_empty() {
            DateTime::<Utc>::MAX_UTC
        } else {
            parse_date(end)?
        };
        Ok(Self { start, end })
    }
}

impl Search for DateRange {
    fn run(&self, album: &Album, library: &PhotoLibrary) -> Album {
        album.search_by_date_range(library, self.start, self.end)
    }
}

/// Local midnight at the start of the given `MM/DD/YYYY` day.
pub fn parse_date(text: &str) -> Result<DateTime<Utc>, ValidationError> {
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ValidationError::MalformedDate(text.to_string()))?;
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    Ok(midnight
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc()))
}

/// Run `search` over every album of `user` and gather the hits, in album
/// order without repeats, into a new album named for attachment to `user`.
pub fn collect_results(user: &User, search: &dyn Search) -> Album {
    let mut results = Album::new(next_results_name(user));
    for album in user.albums() {
        for path in search.run(album, user.library()).paths() {
            results.add_photo(path);
        }
    }
    results
}

/// `Album #N`, where N starts at the user's album count plus one and is
/// bumped past names already in use.
pub fn next_results_name(user: &User) -> String {
    let mut n = user.albums().len() + 1;
    loop {
        let name = format!("Album #{n}");
        if !user.has_album(&name) {
            return name;
        }
        n += 1;
    }
}
