use crate::error::HandlerError;
use accounting_repo::expense_repo::{Filter, PageOptions};
use actix_web::web::Query;
use chrono::NaiveDate;

/// The expense list query parameters, turned into the repo's predicate set.
pub struct ExpenseQuery {
    pub filter: Filter,
    pub page_options: PageOptions,
}

impl ExpenseQuery {
    pub fn from_query_string(query_string: &str) -> Result<ExpenseQuery, HandlerError> {
        let pairs = Query::<Vec<(String, String)>>::from_query(query_string)
            .map_err(|_| HandlerError::Validation)?
            .into_inner();

        let mut user_id_raw = None;
        let mut category_params: Vec<String> = Vec::new();
        let mut from_raw = None;
        let mut to_raw = None;
        let mut limit_raw = None;
        let mut offset_raw = None;

        for (key, value) in pairs {
            match key.as_str() {
                "userId" => user_id_raw = Some(value),
                "categories" => category_params.push(value),
                "from" => from_raw = Some(value),
                "to" => to_raw = Some(value),
                "limit" => limit_raw = Some(value),
                "offset" => offset_raw = Some(value),
                _ => {}
            }
        }

        let user_id = match user_id_raw.as_deref() {
            None | Some("") => None,
            Some(raw) => {
                let user_id = raw
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| HandlerError::Validation)?;
                Some(user_id)
            }
        };

        // A repeated parameter is taken as-is; a single value is treated as
        // comma separated.
        let categories = if category_params.len() == 1 {
            category_params
                .remove(0)
                .split(',')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(str::to_owned)
                .collect()
        } else {
            category_params
        };

        let filter = Filter {
            user_id,
            categories,
            from: parse_date(from_raw)?,
            to: parse_date(to_raw)?,
        };
        let page_options = PageOptions {
            limit: parse_count(limit_raw),
            offset: parse_count(offset_raw),
        };
        Ok(ExpenseQuery {
            filter,
            page_options,
        })
    }
}

fn parse_date(raw: Option<String>) -> Result<Option<NaiveDate>, HandlerError> {
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| HandlerError::ValidationMessage("Invalid date in from/to".to_owned())),
    }
}

/// Unparseable limit/offset values are ignored rather than rejected.
fn parse_count(raw: Option<String>) -> Option<i64> {
    raw.and_then(|raw| raw.trim().parse().ok())
}
