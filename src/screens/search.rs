use super::{find_user, update_user, NavContext};
use crate::error::Result;
use crate::search::{collect_results, Combinator, DateRange, Search, TagQuery};
use crate::store::CatalogStore;

/// The album a search was saved into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub album: String,
    pub count: usize,
}

/// Searches over all albums of one user.
pub struct SearchScreen<'a> {
    store: &'a dyn CatalogStore,
    user: String,
}

impl<'a> SearchScreen<'a> {
    pub fn open(store: &'a dyn CatalogStore, user: &str) -> Result<Self> {
        find_user(&store.load()?, user)?;
        Ok(Self {
            store,
            user: user.to_string(),
        })
    }

    pub fn context(&self) -> NavContext {
        NavContext::new(Some(&self.user), None)
    }

    /// Photos modified strictly between `from` and `to` (`MM/DD/YYYY`, either
    /// may be empty).
    pub fn by_date(&self, from: &str, to: &str) -> Result<SearchOutcome> {
        let range = DateRange::parse(from, to)?;
        self.save_results(&range)
    }

    pub fn by_tags(
        &self,
        first: &str,
        second: &str,
        combinator: Option<Combinator>,
    ) -> Result<SearchOutcome> {
        let query = TagQuery::parse(first, second, combinator)?;
        self.save_results(&query)
    }

    /// Results are saved as a new album even when nothing matched.
    fn save_results(&self, search: &dyn Search) -> Result<SearchOutcome> {
        let outcome = update_user(self.store, &self.user, |user| {
            let results = collect_results(user, search);
            let outcome = SearchOutcome {
                album: results.name().to_string(),
                count: results.len(),
            };
            user.add_album(results);
            Ok(Some(outcome))
        })?
        .unwrap_or_default();

        tracing::info!(user = %self.user, album = %outcome.album, count = outcome.count, "Search saved");
        Ok(outcome)
    }
}
