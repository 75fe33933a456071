use axum::{extract::State, Json};

use crate::{category::Category, error::ApiResult, state::AppState, storage::Storage};

/// list_exams
/// Interface: GET /api/exams
pub(crate) async fn list_exams<S: Storage>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<Vec<String>>> {
    list_files(&state, Category::Exams)
}

/// list_answer_keys
/// Interface: GET /api/answer-keys
pub(crate) async fn list_answer_keys<S: Storage>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<Vec<String>>> {
    list_files(&state, Category::AnswerKeys)
}

fn list_files<S: Storage>(state: &AppState<S>, category: Category) -> ApiResult<Json<Vec<String>>> {
    let names = state.storage().read_dir(category)?;
    tracing::debug!("[list_files] category: {category}, {} files", names.len());
    Ok(Json(names))
}

#[cfg(test)]
mod test {
    use axum::{
        http::{header::CONTENT_TYPE, Method, StatusCode},
        routing::get,
        Router,
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt; // for `call`, `oneshot`, and `ready`

    use super::{list_answer_keys, list_exams};
    use crate::{
        category::Category,
        storage::LocalStorage,
        test_helpers::{body_string, request_uri_for_test, TestDirs},
    };

    fn list_router(dirs: &TestDirs) -> Router {
        Router::new()
            .route("/api/exams", get(list_exams::<LocalStorage>))
            .route("/api/answer-keys", get(list_answer_keys::<LocalStorage>))
            .with_state(dirs.state())
    }

    #[tokio::test]
    async fn test_get_list_exams() {
        let dirs = TestDirs::new();
        dirs.write(Category::Exams, "Midterm.PDF", b"b");
        dirs.write(Category::Exams, "Final.pdf", b"a");

        let request = request_uri_for_test("/api/exams", Method::GET);
        let resp = list_router(&dirs).oneshot(request).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        let names: Vec<String> = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(names, vec!["Final.pdf", "Midterm.PDF"]);
    }

    #[tokio::test]
    async fn test_get_list_answer_keys() {
        let dirs = TestDirs::new();
        dirs.write(Category::AnswerKeys, "b (Answer Key).pdf", b"b");
        dirs.write(Category::AnswerKeys, "A (Answer Key).pdf", b"a");
        dirs.write(Category::Exams, "Final.pdf", b"a");

        let request = request_uri_for_test("/api/answer-keys", Method::GET);
        let resp = list_router(&dirs).oneshot(request).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let names: Vec<String> = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(names, vec!["A (Answer Key).pdf", "b (Answer Key).pdf"]);
    }

    #[tokio::test]
    async fn test_missing_directory_lists_empty() {
        let dirs = TestDirs::new();
        std::fs::remove_dir(dirs.dir(Category::AnswerKeys)).unwrap();

        let request = request_uri_for_test("/api/answer-keys", Method::GET);
        let resp = list_router(&dirs).oneshot(request).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "[]");
    }
}
