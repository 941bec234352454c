use crate::errors::DomainError;
use crate::upstream::UpstreamSpec;
use std::collections::HashMap;
use std::sync::Arc;

/// A configured `suffix=upstream` pair.
///
/// The suffix is stored lowercase and without the trailing root dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub suffix: Arc<str>,
    pub upstream: UpstreamSpec,
}

impl RouteEntry {
    pub fn new(suffix: &str, upstream: UpstreamSpec) -> Self {
        Self {
            suffix: normalize_suffix(suffix).into(),
            upstream,
        }
    }

    /// True when `name` ends with `suffix + "."`, ignoring ASCII case.
    ///
    /// `name` may be given with or without its trailing root dot.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.strip_suffix('.').unwrap_or(name);
        if name.len() < self.suffix.len() {
            return false;
        }
        name.as_bytes()[name.len() - self.suffix.len()..]
            .eq_ignore_ascii_case(self.suffix.as_bytes())
    }
}

fn normalize_suffix(suffix: &str) -> String {
    let suffix = suffix.trim();
    suffix
        .strip_suffix('.')
        .unwrap_or(suffix)
        .to_ascii_lowercase()
}

/// Upstream selection table: suffix routes plus the default upstream.
///
/// Built once at startup and never mutated afterwards. Routes are kept in
/// descending suffix length so the most specific suffix always wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
    default_upstream: UpstreamSpec,
}

impl RouteTable {
    /// Parses `suffix1=upstream1,suffix2=upstream2,...`.
    ///
    /// A blank string yields no routes. Each entry is split on its first `=`;
    /// an entry without `=` or with an empty upstream is a [`DomainError::ConfigParse`].
    pub fn parse_entries(spec: &str) -> Result<Vec<RouteEntry>, DomainError> {
        if spec.trim().is_empty() {
            return Ok(Vec::new());
        }

        spec.split(',')
            .map(|raw| {
                let (suffix, upstream) = raw
                    .split_once('=')
                    .ok_or_else(|| DomainError::ConfigParse(raw.to_string()))?;
                if upstream.trim().is_empty() {
                    return Err(DomainError::ConfigParse(raw.to_string()));
                }
                Ok(RouteEntry::new(suffix, UpstreamSpec::parse(upstream)))
            })
            .collect()
    }

    /// Builds the table. A repeated suffix keeps the last upstream given for it.
    pub fn new(entries: Vec<RouteEntry>, default_upstream: UpstreamSpec) -> Self {
        let mut by_suffix: HashMap<Arc<str>, UpstreamSpec> = HashMap::with_capacity(entries.len());
        for entry in entries {
            by_suffix.insert(entry.suffix, entry.upstream);
        }

        let mut routes: Vec<RouteEntry> = by_suffix
            .into_iter()
            .map(|(suffix, upstream)| RouteEntry { suffix, upstream })
            .collect();
        routes.sort_by(|a, b| {
            b.suffix
                .len()
                .cmp(&a.suffix.len())
                .then_with(|| a.suffix.cmp(&b.suffix))
        });

        Self {
            routes,
            default_upstream,
        }
    }

    /// Parses `spec` and builds the table in one step.
    pub fn from_spec(spec: &str, default_upstream: &str) -> Result<Self, DomainError> {
        let entries = Self::parse_entries(spec)?;
        Ok(Self::new(entries, UpstreamSpec::parse(default_upstream)))
    }

    /// Most specific route whose suffix matches `name`, if any.
    pub fn find_route(&self, name: &str) -> Option<&RouteEntry> {
        self.routes.iter().find(|route| route.matches(name))
    }

    /// Upstream for `name`: the longest matching suffix, else the default.
    pub fn select(&self, name: &str) -> &UpstreamSpec {
        self.find_route(name)
            .map(|route| &route.upstream)
            .unwrap_or(&self.default_upstream)
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn default_upstream(&self) -> &UpstreamSpec {
        &self.default_upstream
    }

    /// Every upstream the table can select, default included.
    pub fn upstreams(&self) -> impl Iterator<Item = &UpstreamSpec> {
        self.routes
            .iter()
            .map(|route| &route.upstream)
            .chain(std::iter::once(&self.default_upstream))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
