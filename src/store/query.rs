//! Generic collection query engine: filtering, sorting, and pagination over
//! flat JSON records.
//!
//! Every feature endpoint funnels its list queries through this module so the
//! semantics stay uniform across collections.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// How a filter clause compares a field against its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive equality (status/type/category-style fields).
    Exact,
    /// Case-insensitive substring containment.
    Substring,
}

/// One field-level filter condition.
#[derive(Debug, Clone)]
pub struct FilterClause {
    pub field: String,
    pub value: String,
    pub mode: MatchMode,
}

/// Free-text search over a declared set of fields. A record passes when ANY
/// of the fields contains the term.
#[derive(Debug, Clone)]
pub struct TextSearch {
    pub fields: Vec<String>,
    pub term: String,
}

/// Declarative filter: AND of clauses, plus an optional free-text search.
///
/// The match mode is a property of each clause, declared by the caller, never
/// inferred from the field name.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    clauses: Vec<FilterClause>,
    search: Option<TextSearch>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-match clause; empty or absent values are ignored.
    pub fn exact(mut self, field: &str, value: Option<&str>) -> Self {
        self.push(field, value, MatchMode::Exact);
        self
    }

    /// Add a substring-match clause; empty or absent values are ignored.
    pub fn contains(mut self, field: &str, value: Option<&str>) -> Self {
        self.push(field, value, MatchMode::Substring);
        self
    }

    /// Attach a free-text search over the given fields; empty terms are ignored.
    pub fn search(mut self, fields: &[&str], term: Option<&str>) -> Self {
        if let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) {
            self.search = Some(TextSearch {
                fields: fields.iter().map(|f| f.to_string()).collect(),
                term: term.to_string(),
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.search.is_none()
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn text_search(&self) -> Option<&TextSearch> {
        self.search.as_ref()
    }

    fn push(&mut self, field: &str, value: Option<&str>, mode: MatchMode) {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.clauses.push(FilterClause {
                field: field.to_string(),
                value: value.to_string(),
                mode,
            });
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some(s) if s.eq_ignore_ascii_case("desc") => Direction::Desc,
            _ => Direction::Asc,
        }
    }
}

///// Full list query: filter, optional sort, pagination.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub filter: FilterSpec,
    pub sort: Option<(String, Direction)>,
    pub page: u64,
    pub limit: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: FilterSpec::new(),
            sort: None,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// One page of results with pagination metadata.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<Value>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl Page {
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// Pagination metadata as it appears on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Keep only the records matching every clause of the spec.
pub fn filter_items(items: &[Value], spec: &FilterSpec) -> Vec<Value> {
    if spec.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| matches_spec(item, spec))
        .cloned()
        .collect()
}

fn matches_spec(item: &Value, spec: &FilterSpec) -> bool {
    for clause in spec.clauses() {
        let Some(field) = item.get(&clause.field) else {
            return false;
        };
        if !field_matches(field, &clause.value, clause.mode) {
            return false;
        }
    }

    if let Some(search) = spec.text_search() {
        let hit = search.fields.iter().any(|f| {
            item.get(f)
                .map(|v| field_matches(v, &search.term, MatchMode::Substring))
                .unwrap_or(false)
        });
        if !hit {
            return false;
        }
    }

    true
}

/// Compare a field value against a filter value. Arrays match when any
/// element matches; null and missing fields never match.
fn field_matches(field: &Value, wanted: &str, mode: MatchMode) -> bool {
    match field {
        Value::Null => false,
        Value::Array(elements) => elements.iter().any(|e| field_matches(e, wanted, mode)),
        other => {
            let text = value_text(other).to_lowercase();
            let wanted = wanted.to_lowercase();
            match mode {
                MatchMode::Exact => text == wanted,
                MatchMode::Substring => text.contains(&wanted),
            }
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Stable sort by the named field. Numbers compare numerically; everything
/// else (including ISO date strings) compares lexicographically. Records
/// missing the field sort last in ascending order.
pub fn sort_items(items: &mut [Value], field: &str, direction: Direction) {
    items.sort_by(|a, b| {
        let ord = compare_fields(a.get(field), b.get(field));
        match direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), Some(_)) => Ordering::Greater,
        (Some(_), None | Some(Value::Null)) => Ordering::Less,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => value_text(a).cmp(&value_text(b)),
        },
    }
}

/// Slice out one 1-indexed page. Out-of-range pages yield an empty slice.
pub fn paginate_items(items: Vec<Value>, page: u64, limit: u64) -> Page {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(limit);

    let start = (page - 1).saturating_mul(limit);
    let page_items = if start >= total {
        Vec::new()
    } else {
        let end = (start + limit).min(total) as usize;
        items[start as usize..end].to_vec()
    };

    Page {
        items: page_items,
        total,
        page,
        limit,
        total_pages,
    }
}

/// Apply a full list query: filter, then sort, then paginate.
pub fn run_query(items: &[Value], query: &ListQuery) -> Page {
    let mut matched = filter_items(items, &query.filter);
    if let Some((field, direction)) = &query.sort {
        sort_items(&mut matched, field, *direction);
    }
    paginate_items(matched, query.page, query.limit)
}
