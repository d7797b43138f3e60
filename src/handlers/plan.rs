use crate::models::{GeneratePlanRequest, PlanResponse, SamplingParams};
use crate::prompts;
use crate::startup::AppState;
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

// Plans are long-form text, so this endpoint gets a higher token budget.
const SAMPLING: SamplingParams = SamplingParams {
    temperature: 0.7,
    max_tokens: 2000,
    top_p: Some(0.9),
};

/// `POST /api/generate-plan`
///
/// Generates a personalized action plan from a book title and the user's
/// context. The model's formatted text is returned as-is; no parsing and no
/// fallback on malformed output.
pub async fn generate_plan(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanResponse>> {
    let request: GeneratePlanRequest = super::decode_body(&body)?;
    let (book_title, user_context) = match (
        request.book_title.filter(|t| !t.is_empty()),
        request.user_context.filter(|c| !c.is_empty()),
    ) {
        (Some(title), Some(context)) => (title, context),
        _ => {
            return Err(Error::Validation(
                "bookTitle и userContext обязательны".to_string(),
            ))
        }
    };

    let chat = state.chat_service()?;

    let prompt = prompts::render(
        prompts::GENERATE_PLAN,
        &[("book_title", &book_title), ("user_context", &user_context)],
    );
    let plan = chat.complete(&prompt, &SAMPLING).await?;

    Ok(Json(PlanResponse { plan }))
}
