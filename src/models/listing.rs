//! Paginated list envelope and list filters.

use serde::{Deserialize, Serialize};

use super::{ProjectStatus, WorkType};

/// Envelope returned by every list endpoint of the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: i64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Filters accepted by the project list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectFilters {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub type_of_work: Option<WorkType>,
    /// Comma-separated on the wire
    #[serde(default)]
    pub keywords: Option<String>,
}

impl ProjectFilters {
    /// Query-string pairs with empty values omitted.
    pub fn to_query(&self, page: Option<u32>) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(field) = self.field.as_deref().filter(|s| !s.is_empty()) {
            query.push(("field", field.to_string()));
        }
        // An unrecognised status is no filter at all
        if let Some(status) = self.status.filter(|s| *s != ProjectStatus::Unknown) {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(work_type) = self.type_of_work {
            query.push(("type_of_work", work_type.as_str().to_string()));
        }
        let keywords = self.keyword_list();
        if !keywords.is_empty() {
            query.push(("keywords", keywords.join(",")));
        }
        query
    }

    /// Keywords split on commas, trimmed, empties dropped.
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_only_carry_page() {
        let query = ProjectFilters::default().to_query(Some(1));
        assert_eq!(query, vec![("page", "1".to_string())]);
    }

    #[test]
    fn test_filters_encode_keywords_comma_joined() {
        let filters = ProjectFilters {
            search: Some("robot".to_string()),
            year: Some(2024),
            field: Some(String::new()),
            status: Some(ProjectStatus::Submitted),
            type_of_work: Some(WorkType::Soc),
            keywords: Some(" ai, ,robotics ".to_string()),
        };
        let query = filters.to_query(None);
        assert_eq!(
            query,
            vec![
                ("search", "robot".to_string()),
                ("year", "2024".to_string()),
                ("status", "submitted".to_string()),
                ("type_of_work", "SOČ".to_string()),
                ("keywords", "ai,robotics".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_status_is_not_sent() {
        let filters = ProjectFilters {
            status: Some(ProjectStatus::Unknown),
            ..ProjectFilters::default()
        };
        assert!(filters.to_query(None).is_empty());
    }
}
