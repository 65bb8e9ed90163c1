// file: src/search/query.rs
// description: raw request parameter normalization for search and autocomplete

use crate::config::{AutocompleteConfig, SearchConfig};
use crate::database::{InstitutionFilter, InstitutionSnapshot};
use crate::error::Result;
use crate::utils::Validator;
use serde::Deserialize;
use tracing::debug;

/// Request parameters exactly as received; numbers are still strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParams {
    pub q: Option<String>,
    /// Institution name filter
    pub kurum: Option<String>,
    /// Institution id filter, wins over `kurum`
    pub kurum_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl RawParams {
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Self::default()
        }
    }

    pub fn with_institution(mut self, name: impl Into<String>) -> Self {
        self.kurum = Some(name.into());
        self
    }

    pub fn with_institution_id(mut self, id: impl Into<String>) -> Self {
        self.kurum_id = Some(id.into());
        self
    }

    pub fn with_limit(mut self, limit: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    pub fn with_offset(mut self, offset: impl ToString) -> Self {
        self.offset = Some(offset.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub text: String,
    pub filter: InstitutionFilter,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct QueryNormalizer {
    min_chars: usize,
    max_limit: usize,
    default_limit: usize,
    paginated: bool,
}

impl QueryNormalizer {
    pub fn for_search(config: &SearchConfig) -> Self {
        Self {
            min_chars: config.min_query_chars,
            max_limit: config.max_limit,
            default_limit: config.default_limit,
            paginated: true,
        }
    }

    /// Autocomplete shares the search minimum query length and ignores offset.
    pub fn for_autocomplete(search: &SearchConfig, config: &AutocompleteConfig) -> Self {
        Self {
            min_chars: search.min_query_chars,
            max_limit: config.max_limit,
            default_limit: config.default_limit,
            paginated: false,
        }
    }

    pub fn normalize(
        &self,
        params: &RawParams,
        institutions: &InstitutionSnapshot,
    ) -> Result<NormalizedQuery> {
        let text = Validator::validate_query(params.q.as_deref(), self.min_chars)?;
        let limit =
            Validator::parse_limit(params.limit.as_deref(), self.max_limit, self.default_limit);
        let offset = if self.paginated {
            Validator::parse_offset(params.offset.as_deref())
        } else {
            0
        };

        let filter = resolve_filter(
            non_blank(params.kurum.as_deref()),
            non_blank(params.kurum_id.as_deref()),
            institutions,
        );

        Ok(NormalizedQuery {
            text,
            filter,
            limit,
            offset,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// An id is taken as given; a name resolves to the first cached institution
/// containing it. A name nothing matches makes the filter unsatisfiable.
pub fn resolve_filter(
    name: Option<&str>,
    id: Option<&str>,
    institutions: &InstitutionSnapshot,
) -> InstitutionFilter {
    if let Some(id) = id {
        return InstitutionFilter::Institution(id.to_string());
    }

    match name {
        None => InstitutionFilter::Any,
        Some(name) => match institutions.resolve_name(name) {
            Some(institution) => {
                debug!(filter = name, institution_id = %institution.id, "institution filter resolved");
                InstitutionFilter::Institution(institution.id.clone())
            }
            None => {
                debug!(filter = name, "institution filter matched nothing");
                InstitutionFilter::Unsatisfiable
            }
        },
    }
}
