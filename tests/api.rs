use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;
use trivia_api::{app, AppState, MemoryStore, Question};

const FIXTURE: &[(i64, &str, &str, i32, i64)] = &[
    (2, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 4, 5),
    (4, "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 4, 5),
    (5, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 2, 4),
    (6, "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 3, 5),
    (9, "What boxer's original name is Cassius Clay?", "Muhammad Ali", 1, 4),
    (10, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 3, 6),
    (11, "Which country won the first ever soccer World Cup in 1930?", "Uruguay", 4, 6),
    (12, "Who invented Peanut Butter?", "George Washington Carver", 2, 4),
    (13, "What is the largest lake in Africa?", "Lake Victoria", 2, 3),
    (14, "In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    (15, "The Taj Mahal is located in which Indian city?", "Agra", 2, 3),
    (16, "Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 1, 2),
    (17, "La Giaconda is better known as what?", "Mona Lisa", 3, 2),
    (18, "How many paintings did Van Gogh sell in his lifetime?", "One", 4, 2),
    (19, "Which American artist was a pioneer of Abstract Expressionism?", "Jackson Pollock", 2, 2),
    (20, "What is the heaviest organ in the human body?", "The Liver", 4, 1),
    (21, "Who discovered penicillin?", "Alexander Fleming", 3, 1),
    (22, "Hematology is a branch of medicine involving the study of what?", "Blood", 4, 1),
    (23, "Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
];

fn seeded_store() -> MemoryStore {
    let store = ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        .iter()
        .enumerate()
        .fold(MemoryStore::new(), |s, (i, kind)| s.with_category(i as i64 + 1, kind));
    FIXTURE.iter().fold(store, |s, &(id, question, answer, difficulty, category)| {
        s.with_question(Question {
            id,
            question: question.into(),
            answer: answer.into(),
            difficulty,
            category,
        })
    })
}

fn router(store: Arc<MemoryStore>) -> Router {
    app(AppState::new(store, Some(17)), 64 * 1024)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn ids(body: &Value) -> Vec<i64> {
    body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn categories_are_an_id_to_label_map() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["categories"]["1"], "Science");
    assert_eq!(body["categories"]["6"], "Sports");
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn no_categories_is_404() {
    let app = router(Arc::new(MemoryStore::new()));
    let (status, body) = send(&app, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": 404, "message": "Not Found"}));
}

#[tokio::test]
async fn questions_are_paginated_newest_first() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 19);
    assert_eq!(ids(&body), vec![23, 22, 21, 20, 19, 18, 17, 16, 15, 14]);
    assert_eq!(body["categories"]["4"], "History");
    let first = &body["questions"][0];
    assert_eq!(first["answer"], "Scarab");
    assert_eq!(first["difficulty"], 4);
    assert_eq!(first["category"], 4);

    let (status, body) = send(&app, "GET", "/questions?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![13, 12, 11, 10, 9, 6, 5, 4, 2]);
    assert_eq!(body["total_questions"], 19);
}

#[tokio::test]
async fn page_beyond_range_is_404() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "GET", "/questions?page=100", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn non_numeric_page_is_first_page() {
    let app = router(Arc::new(seeded_store()));
    let (_, first) = send(&app, "GET", "/questions", None).await;
    let (status, garbage) = send(&app, "GET", "/questions?page=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&first), ids(&garbage));
}

#[tokio::test]
async fn empty_bank_listing_is_404() {
    let app = router(Arc::new(MemoryStore::new().with_category(1, "Science")));
    let (status, _) = send(&app, "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_round_trip() {
    let store = Arc::new(seeded_store());
    let app = router(store.clone());
    let (status, body) = send(&app, "DELETE", "/questions/9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "deleted": 9}));

    let (_, listing) = send(&app, "GET", "/questions?page=2", None).await;
    assert_eq!(listing["total_questions"], 18);
    assert!(!ids(&listing).contains(&9));

    let (status, body) = send(&app, "DELETE", "/questions/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn delete_non_integer_id_is_404() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "DELETE", "/questions/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
}

#[tokio::test]
async fn delete_storage_failure_is_422() {
    let store = Arc::new(seeded_store());
    let app = router(store.clone());
    store.set_failing(true);
    let (status, body) = send(&app, "DELETE", "/questions/2", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"success": false, "error": 422, "message": "Unprocessable Entity"}));
}

#[tokio::test]
async fn search_ignores_case() {
    let app = router(Arc::new(seeded_store()));
    for term in ["boxer", "Boxer", "BOXER"] {
        let (status, body) = send(&app, "POST", "/questions", Some(json!({"searchTerm": term}))).await;
        assert_eq!(status, StatusCode::OK, "{}", term);
        assert_eq!(ids(&body), vec![9]);
        assert_eq!(body["total_questions"], 1);
        assert!(body.get("categories").is_none());
    }
}

#[tokio::test]
async fn search_matches_substrings() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "POST", "/questions", Some(json!({"searchTerm": "title"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![5, 6]);
}

#[tokio::test]
async fn search_without_matches_is_404() {
    let app = router(Arc::new(seeded_store()));
    let (status, _) = send(&app, "POST", "/questions", Some(json!({"searchTerm": "zzzz"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_page_out_of_range_is_empty_success() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "POST", "/questions?page=4", Some(json!({"searchTerm": "what"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(ids(&body).is_empty());
    assert!(body["total_questions"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn create_round_trip() {
    let app = router(Arc::new(seeded_store()));
    let new = json!({
        "question": "What is the capital of Australia?",
        "answer": "Canberra",
        "difficulty": 2,
        "category": "3"
    });
    let (status, body) = send(&app, "POST", "/questions", Some(new)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["created"], 24);
    assert_eq!(body["question_created"], "What is the capital of Australia?");
    assert_eq!(body["total_questions"], 20);
    let all = ids(&body);
    assert_eq!(all.len(), 20);
    assert_eq!(all.first(), Some(&2));
    assert_eq!(all.last(), Some(&24));

    let (_, listing) = send(&app, "GET", "/questions", None).await;
    assert_eq!(listing["total_questions"], 20);
    assert_eq!(ids(&listing)[0], 24);
    assert_eq!(listing["questions"][0]["category"], 3);
}

#[tokio::test]
async fn create_with_missing_field_is_422() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(
        &app,
        "POST",
        "/questions",
        Some(json!({"question": "Q?", "answer": "A", "difficulty": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Unprocessable Entity");

    let (status, _) = send(
        &app,
        "POST",
        "/questions",
        Some(json!({"searchTerm": "", "question": null, "answer": "A", "difficulty": 1, "category": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_storage_failure_is_422() {
    let store = Arc::new(seeded_store());
    let app = router(store.clone());
    store.set_failing(true);
    let (status, _) = send(
        &app,
        "POST",
        "/questions",
        Some(json!({"question": "Q?", "answer": "A", "difficulty": 1, "category": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn category_questions_carry_current_category() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "GET", "/categories/4/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["current_category"], "History");
    assert_eq!(body["total_questions"], 4);
    assert_eq!(ids(&body), vec![5, 9, 12, 23]);
}

#[tokio::test]
async fn category_page_out_of_range_is_empty_success() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "GET", "/categories/4/questions?page=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body).is_empty());
    assert_eq!(body["total_questions"], 4);
}

#[tokio::test]
async fn missing_category_is_400_while_missing_question_is_404() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "GET", "/categories/999/questions", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": 400, "message": "Bad Request"}));

    let (status, _) = send(&app, "DELETE", "/questions/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quiz_excludes_previous_questions() {
    let app = router(Arc::new(seeded_store()));
    for _ in 0..20 {
        let (status, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({"previous_questions": [2, 6], "quiz_category": {"type": "Entertainment", "id": 5}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let id = body["question"]["id"].as_i64().unwrap();
        assert!(id != 2 && id != 6);
        assert_eq!(body["question"]["category"], 5);
    }
}

#[tokio::test]
async fn quiz_all_categories_draws_from_everything_unseen() {
    let app = router(Arc::new(seeded_store()));
    let all: HashSet<i64> = FIXTURE.iter().map(|q| q.0).collect();
    let mut seen: Vec<i64> = Vec::new();
    for _ in 0..FIXTURE.len() {
        let (status, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({"previous_questions": seen, "quiz_category": {"type": "click", "id": 0}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["question"]["id"].as_i64().unwrap();
        assert!(all.contains(&id));
        assert!(!seen.contains(&id));
        seen.push(id);
    }
    let (status, body) = send(
        &app,
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": seen, "quiz_category": {"id": 0}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false}));
}

#[tokio::test]
async fn quiz_exhausted_category_is_unsuccessful_200() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(
        &app,
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": [5, 9, 12, 23], "quiz_category": {"id": "4"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body.get("question").is_none());
}

#[tokio::test]
async fn quiz_missing_fields_is_422() {
    let app = router(Arc::new(seeded_store()));
    for payload in [
        json!({"quiz_category": {"id": 1}}),
        json!({"previous_questions": []}),
        json!({"previous_questions": [], "quiz_category": {"type": "Science"}}),
    ] {
        let (status, body) = send(&app, "POST", "/quizzes", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], 422);
    }
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = router(Arc::new(seeded_store()));
    let request = Request::builder()
        .method("POST")
        .uri("/quizzes")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/questions", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Bad Request");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "GET", "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = router(Arc::new(seeded_store()));
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/questions")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "DELETE")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    for m in ["GET", "POST", "DELETE"] {
        assert!(methods.contains(m), "{}", methods);
    }
    let allowed = headers["access-control-allow-headers"].to_str().unwrap().to_lowercase();
    assert!(allowed.contains("content-type") && allowed.contains("authorization"));
}

#[tokio::test]
async fn readiness_reflects_store() {
    let store = Arc::new(seeded_store());
    let app = router(store.clone());
    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
    store.set_failing(true);
    let (status, _) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

fn unprocessable() -> Value {
    json!({"success": false, "error": 422, "message": "Unprocessable Entity"})
}

#[tokio::test]
async fn listing_pages_below_one_are_404() {
    let app = router(Arc::new(seeded_store()));
    for uri in ["/questions?page=0", "/questions?page=-1"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["message"], "Not Found");
    }
}

#[tokio::test]
async fn category_pages_below_one_are_empty_success() {
    let app = router(Arc::new(seeded_store()));
    for uri in ["/categories/4/questions?page=0", "/categories/4/questions?page=-1"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(ids(&body).is_empty());
        assert_eq!(body["total_questions"], 4);
        assert_eq!(body["current_category"], "History");
    }
}

#[tokio::test]
async fn search_pages_below_one_are_empty_success() {
    let app = router(Arc::new(seeded_store()));
    for uri in ["/questions?page=0", "/questions?page=-1"] {
        let (status, body) = send(&app, "POST", uri, Some(json!({"searchTerm": "soccer"}))).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(ids(&body).is_empty());
        assert_eq!(body["total_questions"], 2);
    }
}

#[tokio::test]
async fn read_storage_failures_are_422() {
    let store = Arc::new(seeded_store());
    let app = router(store.clone());
    store.set_failing(true);
    for uri in ["/questions", "/categories"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(body, unprocessable());
    }
}

#[tokio::test]
async fn search_storage_failure_is_422() {
    let store = Arc::new(seeded_store());
    let app = router(store.clone());
    store.set_failing(true);
    let (status, body) = send(&app, "POST", "/questions", Some(json!({"searchTerm": "boxer"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, unprocessable());
}

#[tokio::test]
async fn quiz_storage_failure_is_422() {
    let store = Arc::new(seeded_store());
    let app = router(store.clone());
    store.set_failing(true);
    for category in [0, 4] {
        let (status, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({"previous_questions": [], "quiz_category": {"id": category}})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, unprocessable());
    }
}

#[tokio::test]
async fn oversized_body_is_json_400() {
    let small = app(AppState::new(Arc::new(seeded_store()), Some(17)), 64);
    let long = "x".repeat(256);
    let (status, body) = send(
        &small,
        "POST",
        "/questions",
        Some(json!({"question": long, "answer": "A", "difficulty": 1, "category": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": 400, "message": "Bad Request"}));
}

#[tokio::test]
async fn non_string_search_term_takes_the_create_branch() {
    let app = router(Arc::new(seeded_store()));
    let (status, body) = send(&app, "POST", "/questions", Some(json!({"searchTerm": 5}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, unprocessable());
}
