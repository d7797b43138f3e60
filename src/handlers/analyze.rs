use crate::models::{AnalyzeBookRequest, BookInfo, SamplingParams};
use crate::prompts;
use crate::startup::AppState;
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

const SAMPLING: SamplingParams = SamplingParams {
    temperature: 0.7,
    max_tokens: 1000,
    top_p: None,
};

/// `POST /api/analyze-book`
///
/// Analyzes a book title into a description, popular reader queries, and
/// examples of people who applied the book. Model output that fails to parse
/// is replaced with a hardcoded fallback instead of failing the request.
pub async fn analyze_book(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BookInfo>> {
    let request: AnalyzeBookRequest = super::decode_body(&body)?;
    let book_title = request
        .book_title
        .filter(|title| !title.is_empty())
        .ok_or_else(|| Error::Validation("bookTitle обязателен".to_string()))?;

    let chat = state.chat_service()?;

    let prompt = prompts::render(prompts::ANALYZE_BOOK, &[("book_title", &book_title)]);
    let raw = chat.complete(&prompt, &SAMPLING).await?;

    let info = parse_book_info(&raw).unwrap_or_else(|e| {
        tracing::error!(
            "Failed to parse model output as book analysis: {}\nRaw content: {}",
            e,
            raw
        );
        BookInfo::fallback()
    });

    Ok(Json(info))
}

fn parse_book_info(raw: &str) -> serde_json::Result<BookInfo> {
    serde_json::from_str(&strip_code_fences(raw))
}

/// Remove the ```json fences the model sometimes wraps around its output.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_code_fences_with_json_fence() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fences_with_bare_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fences_leaves_plain_text() {
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_book_info_fenced() {
        let raw = r#"```json
{
  "description": "Эта книга про привычки",
  "popularQueries": ["Хочу бросить курить", "Стать продуктивнее", "Рано вставать", "Меньше прокрастинировать"],
  "examples": [
    {"name": "Джеймс Клир", "quote": "Маленькие привычки дают большие результаты"},
    {"name": "Известный спортсмен", "quote": "Система важнее цели"}
  ]
}
```"#;
        let info = parse_book_info(raw).unwrap();
        assert_eq!(info.description, "Эта книга про привычки");
        assert_eq!(info.popular_queries.len(), 4);
        assert_eq!(info.examples.len(), 2);
    }

    #[test]
    fn test_parse_book_info_rejects_prose() {
        assert!(parse_book_info("Вот анализ книги: она про привычки.").is_err());
    }
}
