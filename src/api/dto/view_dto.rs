use serde::Deserialize;
use validator::Validate;

use crate::domain::filter::time_window::TimeFilter;
use crate::errors::AppError;

/// Query of `POST /views/{ns}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MountViewQuery {
    pub time_filter: Option<String>,
    #[validate(range(min = 1))]
    pub page_size: Option<u64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TimeFilterRequest {
    #[validate(length(min = 1))]
    pub time_filter: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PageRequest {
    pub page_index: u64,
    #[validate(range(min = 1))]
    pub page_size: Option<u64>,
}

/// Query of the one-shot `GET /namespaces/{ns}/data`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DataPageQuery {
    pub time_filter: Option<String>,
    #[serde(default)]
    pub page: u64,
    #[validate(range(min = 1))]
    pub page_size: Option<u64>,
}

/// Absent means `none`; anything outside the enumeration is a 400.
pub fn parse_time_filter(raw: Option<&str>) -> Result<Option<TimeFilter>, AppError> {
    raw.map(str::parse::<TimeFilter>).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_filter_is_none_and_unknown_is_rejected() {
        assert_eq!(parse_time_filter(None).unwrap(), None);
        assert_eq!(parse_time_filter(Some("7days")).unwrap(), Some(TimeFilter::SevenDays));
        assert!(matches!(parse_time_filter(Some("2weeks")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn zero_page_size_fails_validation() {
        let req = PageRequest {
            page_index: 0,
            page_size: Some(0),
        };
        assert!(req.validate().is_err());
    }
}
