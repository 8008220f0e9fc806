use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, HealthResponse, SchemeListResponse, SchemeQuery, SchemeSearchRequest,
    SchemeSearchResponse,
};
use crate::routes::AppState;
use crate::services::CatalogError;

/// Configure catalog and search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/schemes", web::get().to(list_schemes))
        .route("/schemes/search", web::post().to(search_schemes))
        .route("/schemes/{scheme_id}", web::get().to(get_scheme));
}

/// Service description
async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to Sarkari Saathi API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/chat": "POST - Chat with the assistant",
            "/schemes": "GET - List active schemes",
            "/schemes/search": "POST - Search schemes by profile",
            "/schemes/{scheme_id}": "GET - Scheme details",
            "/health": "GET - Health check",
        }
    }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let schemes_loaded = state.catalog.len();
    let status = if schemes_loaded > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        assistant_configured: state.assistant.is_configured(),
        schemes_loaded,
    })
}

/// List active schemes
///
/// GET /api/v1/schemes?category=Agriculture&language=hi
async fn list_schemes(
    state: web::Data<AppState>,
    query: web::Query<SchemeQuery>,
) -> impl Responder {
    let language = query.language.as_deref().unwrap_or("en");

    let schemes: Vec<_> = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => state
            .catalog
            .by_category(category)
            .map(|s| s.localized(language))
            .collect(),
        None => state.catalog.active().map(|s| s.localized(language)).collect(),
    };

    HttpResponse::Ok().json(SchemeListResponse {
        count: schemes.len(),
        schemes,
    })
}

/// Scheme details
///
/// GET /api/v1/schemes/{scheme_id}?language=hi
async fn get_scheme(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SchemeQuery>,
) -> impl Responder {
    let scheme_id = path.into_inner();
    let language = query.language.as_deref().unwrap_or("en");

    match state.catalog.get(&scheme_id) {
        Ok(scheme) => HttpResponse::Ok().json(scheme.localized(language)),
        Err(e @ CatalogError::NotFound(_)) => {
            tracing::info!("Unknown scheme requested: {}", scheme_id);
            HttpResponse::NotFound().json(ErrorResponse {
                error: "Scheme not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            })
        }
        Err(e) => {
            tracing::error!("Failed to look up scheme {}: {}", scheme_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to look up scheme".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Search schemes for a structured profile
///
/// POST /api/v1/schemes/search
///
/// Request body:
/// ```json
/// {
///   "category": "Agriculture",
///   "user_profile": {"age": 35, "occupation": "farmer"},
///   "limit": 10
/// }
/// ```
async fn search_schemes(
    state: web::Data<AppState>,
    req: web::Json<SchemeSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = req.limit as usize;
    if limit > state.matching.max_limit {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: format!("limit must be at most {}", state.matching.max_limit),
            status_code: 400,
        });
    }

    let profile = req.user_profile.clone().unwrap_or_default();

    let mut matched = state.matcher.match_profile(&profile, req.category.as_deref());
    let count = matched.len();
    matched.truncate(limit);

    tracing::info!(
        "Search returned {} of {} matches (category: {:?})",
        matched.len(),
        count,
        req.category
    );

    HttpResponse::Ok().json(SchemeSearchResponse {
        matched_schemes: matched,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tests::{create_state, StubAssistant};
    use crate::models::{MatchResult, SchemeRecord};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_reports_catalog() {
        let state = create_state(StubAssistant::configured("hi"));
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
        assert_eq!(body.schemes_loaded, 3);
        assert!(body.assistant_configured);
    }

    #[actix_web::test]
    async fn test_list_filters_category_and_localizes() {
        let state = create_state(StubAssistant::unconfigured());
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/schemes?category=agriculture&language=hi")
            .to_request();
        let body: SchemeListResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.count, 1);
        assert_eq!(body.schemes[0].name, "पीएम-किसान");
    }

    #[actix_web::test]
    async fn test_get_unknown_scheme_is_404() {
        let state = create_state(StubAssistant::unconfigured());
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/schemes/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let req = test::TestRequest::get().uri("/schemes/pm-kisan").to_request();
        let body: SchemeRecord = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.id, "pm-kisan");
    }

    #[actix_web::test]
    async fn test_search_truncates_after_sort() {
        let state = create_state(StubAssistant::unconfigured());
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/schemes/search")
            .set_json(serde_json::json!({
                "user_profile": {"occupation": "farmer", "is_farmer": true},
                "limit": 1
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["count"], 3);
        let matched: Vec<MatchResult> = serde_json::from_value(body["matched_schemes"].clone()).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].scheme.id, "pm-kisan");
        assert_eq!(matched[0].match_score, 60);
    }

    #[actix_web::test]
    async fn test_search_rejects_zero_limit() {
        let state = create_state(StubAssistant::unconfigured());
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/schemes/search")
            .set_json(serde_json::json!({ "limit": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_search_limit_bounded_by_settings() {
        let state = create_state(StubAssistant::unconfigured());
        let max_limit = state.matching.max_limit;
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/schemes/search")
            .set_json(serde_json::json!({ "limit": max_limit + 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, format!("limit must be at most {}", max_limit));

        let req = test::TestRequest::post()
            .uri("/schemes/search")
            .set_json(serde_json::json!({ "limit": max_limit }))
            .to_request();
        let body: SchemeSearchResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.count, 3);
        assert_eq!(body.matched_schemes.len(), 3);
    }
}
