use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Page-based pagination query parameters (`?page=2&limit=20`).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit_or(10)
    }

    /// Clamped limit with a caller-chosen default page size.
    pub fn limit_or(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub limit: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        Self {
            total,
            total_pages: (total as f64 / limit as f64).ceil() as i64,
            current_page: page,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn params_clone_for_embedding_in_filter_structs() {
        let params = PaginationParams {
            page: Some(2),
            limit: Some(25),
        };
        let copy = params.clone();
        assert_eq!(copy.page(), params.page());
        assert_eq!(copy.limit(), params.limit());
    }

    #[test]
    fn offset_follows_page() {
        let params = PaginationParams {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn limit_is_clamped() {
        let params = PaginationParams {
            page: None,
            limit: Some(500),
        };
        assert_eq!(params.limit(), 100);

        let params = PaginationParams {
            page: Some(-2),
            limit: Some(0),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn limit_or_uses_caller_default_only_when_unset() {
        let params = PaginationParams::default();
        assert_eq!(params.limit_or(20), 20);

        let params = PaginationParams {
            page: None,
            limit: Some(5),
        };
        assert_eq!(params.limit_or(20), 5);
    }

    #[test]
    fn meta_total_pages_rounds_up() {
        let meta = PaginationMeta::new(25, 1, 10);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::new(0, 1, 10);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn params_deserialize_from_query_strings() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"page":"2","limit":"50"}"#).unwrap();
        assert_eq!(params.page(), 2);
        assert_eq!(params.limit(), 50);

        let params: PaginationParams = serde_json::from_str(r#"{"page":"","limit":""}"#).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }
}
