use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{ChatMessage, ChatRequest, ChatResponse, ErrorResponse};
use crate::routes::AppState;
use crate::services::prompt::{context_message, system_prompt};

/// Configure chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat", web::post().to(chat));
}

/// Chat endpoint
///
/// POST /api/v1/chat
///
/// Request body:
/// ```json
/// {
///   "message": "I am a farmer, 45 years old",
///   "language": "en",
///   "user_profile": {"location": "rural"},
///   "conversation_history": [{"role": "user", "content": "..."}]
/// }
/// ```
async fn chat(
    state: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if !state.assistant.is_configured() {
        tracing::error!("Chat request received but the assistant API key is not configured");
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Assistant not configured".to_string(),
            message: "Set ANTHROPIC_API_KEY to enable chat".to_string(),
            status_code: 500,
        });
    }

    let profile = req.user_profile.clone().unwrap_or_default();
    let samples = state.catalog.sample(state.matching.context_schemes);

    let mut messages = req.conversation_history.clone();
    messages.push(ChatMessage::user(context_message(
        &req.message,
        req.user_profile.as_ref(),
        &samples,
    )));

    let response = match state
        .assistant
        .complete(system_prompt(&req.language), &messages)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Assistant call failed: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Error processing chat".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let mut matched_schemes = state.matcher.match_from_conversation(&req.message, &profile);
    matched_schemes.truncate(state.matching.chat_limit);

    let extracted_profile = state.matcher.extract_profile_hints(&req.message, &profile);

    tracing::info!(
        "Chat reply with {} matched schemes (profile updated: {})",
        matched_schemes.len(),
        extracted_profile.is_some()
    );

    HttpResponse::Ok().json(ChatResponse {
        response,
        matched_schemes,
        extracted_profile,
    })
}
