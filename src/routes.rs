use std::collections::HashMap;

use crate::api::employee;
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, error::InternalError, web};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde_json::json;

/// Single-employee resource, relative to `/employees`.
pub const EMPLOYEE_PATH: &str = "/{employee_id}";

const DATE_PARAMETERS: [&str; 3] = ["yearAfter", "year_after", "year"];

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer limiter allowing `requests_per_min` with an equal burst.
pub fn rate_limit(requests_per_min: u32) -> Result<RateLimit> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("RATE_API_PER_MIN must be greater than zero"))
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, rate_limit: &RateLimit) {
    cfg.service(
        web::scope(api_prefix)
            .wrap(Governor::new(rate_limit))
            .configure(employee_routes),
    );
}

pub fn employee_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default().error_handler(|err, req| {
            let parameter = invalid_date_parameter(req.query_string()).unwrap_or("query");
            let message = format!(
                "Invalid format for parameter: {parameter}. Expected format is yyyy-MM-dd. Please provide a valid value."
            );
            InternalError::from_response(err, HttpResponse::BadRequest().json(json!({ "message": message })))
                .into()
        }),
    )
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({
                "message": "Invalid request format. Please check your input and try again."
            })),
        )
        .into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({
                "message": "Invalid format for parameter: employee_id. Please provide a valid value."
            })),
        )
        .into()
    }))
    .service(
        web::scope("/employees")
            // /employees
            .service(
                web::resource("")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // /employees/export, registered before /{id}
            .service(
                web::resource("/export").route(web::get().to(employee::export_employees)),
            )
            // /employees/{employee_id}
            .service(
                web::resource(EMPLOYEE_PATH)
                    .route(web::get().to(employee::get_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    );
}

/// First date parameter in `query` that does not parse as `yyyy-MM-dd`.
fn invalid_date_parameter(query: &str) -> Option<&'static str> {
    let params = web::Query::<HashMap<String, String>>::from_query(query).ok()?;
    DATE_PARAMETERS.into_iter().find(|name| {
        params
            .get(*name)
            .is_some_and(|value| value.parse::<NaiveDate>().is_err())
    })
}
