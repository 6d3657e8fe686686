//! Paged Search Controller
//!
//! Pagination plus search state for one listing screen. All methods take
//! `&self`; state lives in a `RefCell` that is never borrowed across an
//! `.await`. Each request captures the current epoch and its response is
//! dropped if `reset`, `cancel` or a newer search bumped it meanwhile.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::listing::{ListingSpec, SearchField};
use crate::domain::filter::{matches_any_field, FieldPredicate, FilterSet};
use crate::domain::{ClientError, PageQuery, Record, FETCH_FAILED, SEARCH_FAILED};
use crate::repository::RecordSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Simple,
    Advanced,
}

/// What an operation did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// State changed; the count is records received (fetch) or visible (search)
    Applied(usize),
    /// Nothing to do: blank query, no more pages, already loading, cancelled
    Skipped,
    /// The response arrived after the request was superseded and was dropped
    Stale,
    Failed(ClientError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

/// Immutable view for rendering
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListSnapshot {
    /// Search results once a search ran, loaded pages otherwise
    pub records: Vec<Record>,
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub search_performed: bool,
    pub mode: SearchMode,
    pub error: Option<String>,
    pub simple_query: String,
    pub field_queries: BTreeMap<String, String>,
}

impl ListSnapshot {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Default)]
struct ListState {
    records: Vec<Record>,
    filtered: Vec<Record>,
    page: u32,
    has_more: bool,
    loading: bool,
    mode: SearchMode,
    simple_query: String,
    field_queries: BTreeMap<String, String>,
    search_performed: bool,
    /// Results came from one superset fetch; there is nothing to page
    superset: bool,
    active_params: Vec<(String, String)>,
    /// Field predicates applied to every result row
    narrowing: FilterSet,
    /// Free-text queries matched against the simple fields
    text_queries: Vec<String>,
    error: Option<String>,
    epoch: u64,
    cancelled: bool,
}

impl ListState {
    fn clear_search(&mut self) {
        self.simple_query.clear();
        self.field_queries.clear();
        self.search_performed = false;
        self.superset = false;
        self.filtered.clear();
        self.active_params.clear();
        self.narrowing = FilterSet::default();
        self.text_queries.clear();
        self.error = None;
    }

    /// Remote searches narrow the backend's answer; local ones the loaded rows
    fn is_remote_search(&self) -> bool {
        self.search_performed && !self.active_params.is_empty()
    }

    fn keeps(&self, record: &Record, simple_fields: &[&str]) -> bool {
        self.narrowing.matches(record)
            && self
                .text_queries
                .iter()
                .all(|q| matches_any_field(record, simple_fields, q))
    }

    fn refilter(&mut self, simple_fields: &[&str]) {
        let kept = self
            .records
            .iter()
            .filter(|r| self.keeps(r, simple_fields))
            .cloned()
            .collect();
        self.filtered = kept;
    }
}

pub struct PagedSearch<S: RecordSource> {
    source: S,
    spec: ListingSpec,
    state: RefCell<ListState>,
}

impl<S: RecordSource> PagedSearch<S> {
    pub fn new(source: S, spec: ListingSpec) -> Self {
        Self {
            source,
            spec,
            state: RefCell::new(ListState::default()),
        }
    }

    pub fn spec(&self) -> &ListingSpec {
        &self.spec
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let s = self.state.borrow();
        ListSnapshot {
            records: if s.search_performed { s.filtered.clone() } else { s.records.clone() },
            page: s.page,
            has_more: s.has_more,
            loading: s.loading,
            search_performed: s.search_performed,
            mode: s.mode,
            error: s.error.clone(),
            simple_query: s.simple_query.clone(),
            field_queries: s.field_queries.clone(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancelled
    }

    /// `GET <endpoint>?page=<n>&size=<page_size>` plus active search params.
    /// A fresh load (`append == false`) supersedes anything in flight.
    pub async fn fetch_page(&self, page: u32, append: bool) -> Outcome {
        let (epoch, query) = {
            let mut s = self.state.borrow_mut();
            if s.cancelled {
                return Outcome::Skipped;
            }
            if !append {
                s.epoch += 1;
            }
            s.loading = true;
            let query = PageQuery::page(self.spec.endpoint, page, self.spec.page_size)
                .with_params(s.active_params.clone());
            (s.epoch, query)
        };
        log::debug!("Fetching {}", query.path_and_query());

        let result = self.source.fetch(&query).await;

        let mut s = self.state.borrow_mut();
        if s.epoch != epoch {
            log::debug!("Dropping stale page {} of {}", page, self.spec.endpoint);
            return Outcome::Stale;
        }
        s.loading = false;
        match result {
            Ok(batch) => {
                let received = batch.len();
                s.has_more = received == self.spec.page_size as usize;
                s.page = page;
                s.error = None;
                if s.is_remote_search() {
                    let kept: Vec<Record> = batch.into_iter().filter(|r| s.narrowing.matches(r)).collect();
                    if append {
                        s.filtered.extend(kept);
                    } else {
                        s.filtered = kept;
                    }
                } else {
                    if append {
                        s.records.extend(batch);
                    } else {
                        s.records = batch;
                    }
                    if s.search_performed {
                        s.refilter(&self.spec.simple_fields);
                    }
                }
                Outcome::Applied(received)
            }
            Err(err) => {
                log::warn!("Fetching page {} of {} failed: {}", page, self.spec.endpoint, err);
                s.error = Some(FETCH_FAILED.to_string());
                Outcome::Failed(err)
            }
        }
    }

    /// Search by one query.
    ///
    /// `field` names an advanced field; `None` is the simple search. An
    /// initial search asks the backend when the field has a parameter and
    /// filters loaded rows otherwise. A follow-up search narrows the current
    /// results locally.
    pub async fn search(&self, query: &str, field: Option<&str>, is_initial: bool) -> Outcome {
        let query = query.trim();
        if query.is_empty() || self.is_cancelled() {
            return Outcome::Skipped;
        }
        let search_field = match field {
            Some(name) => match self.spec.field(name) {
                Some(f) => Some(f.clone()),
                None => {
                    log::warn!("{} has no search field {}", self.spec.endpoint, name);
                    return Outcome::Skipped;
                }
            },
            None => None,
        };

        let previous = {
            let mut s = self.state.borrow_mut();
            let previous = (s.field_queries.clone(), s.simple_query.clone());
            match &search_field {
                Some(f) => {
                    s.field_queries.insert(f.name.to_string(), query.to_string());
                }
                None => s.simple_query = query.to_string(),
            }
            previous
        };

        if !is_initial {
            return self.narrow(query, search_field.as_ref());
        }

        let param = match &search_field {
            Some(f) => f.param,
            None => self.spec.simple_param,
        };
        match param {
            Some(param) => {
                let narrowing = FilterSet::default();
                let outcome = self
                    .run_search(vec![(param.to_string(), query.to_string())], narrowing, Vec::new())
                    .await;
                self.restore_queries_on_failure(&outcome, previous);
                outcome
            }
            None => {
                let (narrowing, texts) = match &search_field {
                    Some(f) => (FilterSet::new(vec![FieldPredicate::new(f.name, query, f.kind)]), Vec::new()),
                    None => (FilterSet::default(), vec![query.to_string()]),
                };
                self.search_locally(narrowing, texts)
            }
        }
    }

    /// A search box was submitted. A blank simple query reloads; an
    /// advanced field hits the backend first and narrows afterwards.
    pub async fn submit(&self, field: Option<&str>, query: &str) -> Outcome {
        match field {
            None if query.trim().is_empty() => self.reset().await,
            None => self.search(query, None, true).await,
            Some(_) => {
                let is_initial = !self.state.borrow().search_performed;
                self.search(query, field, is_initial).await
            }
        }
    }

    /// Advanced search over several fields at once: one backend request
    /// keyed by the first field that has a parameter, then the AND of every
    /// active field applied locally.
    pub async fn combined_search(&self, queries: &[(&str, &str)]) -> Outcome {
        if self.is_cancelled() {
            return Outcome::Skipped;
        }
        let active: Vec<(&SearchField, &str)> = queries
            .iter()
            .filter(|(_, q)| !q.trim().is_empty())
            .filter_map(|(name, q)| match self.spec.field(name) {
                Some(f) => Some((f, q.trim())),
                None => {
                    log::warn!("{} has no search field {}", self.spec.endpoint, name);
                    None
                }
            })
            .collect();
        if active.is_empty() {
            return Outcome::Skipped;
        }

        let previous = {
            let mut s = self.state.borrow_mut();
            let previous = (s.field_queries.clone(), s.simple_query.clone());
            s.field_queries = active
                .iter()
                .map(|(f, q)| (f.name.to_string(), q.to_string()))
                .collect();
            previous
        };

        let narrowing = FilterSet::new(
            active
                .iter()
                .map(|(f, q)| FieldPredicate::new(f.name, q, f.kind))
                .collect(),
        );
        let keyed = active.iter().find_map(|(f, q)| f.param.map(|p| (p, *q)));
        match keyed {
            Some((param, query)) => {
                let outcome = self
                    .run_search(vec![(param.to_string(), query.to_string())], narrowing, Vec::new())
                    .await;
                self.restore_queries_on_failure(&outcome, previous);
                outcome
            }
            None => self.search_locally(narrowing, Vec::new()),
        }
    }

    /// Drop one advanced field's query. While a search is active the
    /// remaining fields run again as a fresh search; with none left the
    /// listing reloads.
    pub async fn clear_field(&self, name: &str) -> Outcome {
        let remaining: Vec<(String, String)> = {
            let mut s = self.state.borrow_mut();
            if s.cancelled || s.field_queries.remove(name).is_none() || !s.search_performed {
                return Outcome::Skipped;
            }
            s.field_queries
                .iter()
                .filter(|(_, q)| !q.trim().is_empty())
                .map(|(f, q)| (f.clone(), q.clone()))
                .collect()
        };
        if remaining.is_empty() {
            return self.reset().await;
        }
        let queries: Vec<(&str, &str)> = remaining.iter().map(|(f, q)| (f.as_str(), q.as_str())).collect();
        self.combined_search(&queries).await
    }

    /// Next page, unless there is none, one is loading or a superset search
    /// already returned everything
    pub async fn load_more(&self) -> Outcome {
        let next = {
            let s = self.state.borrow();
            if s.cancelled || !s.has_more || s.loading || s.superset {
                return Outcome::Skipped;
            }
            s.page + 1
        };
        self.fetch_page(next, true).await
    }

    /// Clear every query and reload page 1
    pub async fn reset(&self) -> Outcome {
        {
            let mut s = self.state.borrow_mut();
            if s.cancelled {
                return Outcome::Skipped;
            }
            s.clear_search();
        }
        self.fetch_page(1, false).await
    }

    /// Switch between simple and advanced search; starts over
    pub async fn set_mode(&self, mode: SearchMode) -> Outcome {
        self.state.borrow_mut().mode = mode;
        self.reset().await
    }

    /// Screen teardown. In-flight responses are dropped and every later
    /// operation is skipped.
    pub fn cancel(&self) {
        let mut s = self.state.borrow_mut();
        s.cancelled = true;
        s.epoch += 1;
        s.loading = false;
    }

    fn narrow(&self, query: &str, field: Option<&SearchField>) -> Outcome {
        let mut s = self.state.borrow_mut();
        if !s.search_performed {
            s.filtered = s.records.clone();
            s.search_performed = true;
        }
        match field {
            Some(f) => {
                let predicate = FieldPredicate::new(f.name, query, f.kind);
                s.filtered.retain(|r| predicate.matches(r));
                s.narrowing.push(predicate);
            }
            None => {
                let fields = &self.spec.simple_fields;
                s.filtered.retain(|r| matches_any_field(r, fields, query));
                s.text_queries.push(query.to_string());
            }
        }
        Outcome::Applied(s.filtered.len())
    }

    /// A failed request leaves the queries as they were before it
    fn restore_queries_on_failure(&self, outcome: &Outcome, previous: (BTreeMap<String, String>, String)) {
        if let Outcome::Failed(_) = outcome {
            let mut s = self.state.borrow_mut();
            s.field_queries = previous.0;
            s.simple_query = previous.1;
        }
    }

    fn search_locally(&self, narrowing: FilterSet, texts: Vec<String>) -> Outcome {
        let mut s = self.state.borrow_mut();
        s.active_params.clear();
        s.superset = false;
        s.search_performed = true;
        s.narrowing = narrowing;
        s.text_queries = texts;
        s.error = None;
        s.refilter(&self.spec.simple_fields);
        Outcome::Applied(s.filtered.len())
    }

    async fn run_search(
        &self,
        params: Vec<(String, String)>,
        narrowing: FilterSet,
        texts: Vec<String>,
    ) -> Outcome {
        let (epoch, query) = {
            let mut s = self.state.borrow_mut();
            s.epoch += 1;
            s.loading = true;
            let query = if self.spec.paginate_search {
                PageQuery::page(self.spec.endpoint, 1, self.spec.page_size)
            } else {
                PageQuery::superset(self.spec.endpoint, self.spec.search_size)
            };
            (s.epoch, query.with_params(params.clone()))
        };
        log::debug!("Searching {}", query.path_and_query());

        let result = self.source.fetch(&query).await;

        let mut s = self.state.borrow_mut();
        if s.epoch != epoch {
            log::debug!("Dropping stale search on {}", self.spec.endpoint);
            return Outcome::Stale;
        }
        s.loading = false;
        match result {
            Ok(batch) => {
                let received = batch.len();
                s.filtered = narrowing.apply(batch);
                s.narrowing = narrowing;
                s.text_queries = texts;
                s.active_params = params;
                s.search_performed = true;
                s.error = None;
                if self.spec.paginate_search {
                    s.page = 1;
                    s.has_more = received == self.spec.page_size as usize;
                    s.superset = false;
                } else {
                    s.has_more = false;
                    s.superset = true;
                }
                Outcome::Applied(s.filtered.len())
            }
            Err(err) => {
                log::warn!("Search on {} failed: {}", self.spec.endpoint, err);
                s.error = Some(SEARCH_FAILED.to_string());
                Outcome::Failed(err)
            }
        }
    }
}
