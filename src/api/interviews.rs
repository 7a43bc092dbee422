use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::error_response;
use crate::models::{Feedback, Interview, InterviewOverview, User};
use crate::services::{interview_service, SessionContext};
use crate::state::AppState;

/// Home view data; anonymous callers get an empty `userInterviews`.
#[utoipa::path(
    get,
    path = "/api/v1/interviews/home",
    tag = "Interviews",
    responses(
        (status = 200, description = "Own and suggested interviews", body = InterviewOverview)
    )
)]
pub async fn home(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let ctx = SessionContext::from_request(&req);
    let user = state.sessions.current_user(&ctx).await;
    let user_id = user.as_ref().map(|u| u.id.as_str());

    match interview_service::overview(state.interviews.as_ref(), user_id).await {
        Ok(overview) => HttpResponse::Ok().json(overview),
        Err(e) => {
            log::error!("❌ Failed to load interviews: {}", e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/interviews/{id}",
    tag = "Interviews",
    params(
        ("id" = String, Path, description = "Interview id")
    ),
    responses(
        (status = 200, description = "The interview", body = Interview),
        (status = 404, description = "Interview not found")
    )
)]
pub async fn get_interview(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let interview_id = path.into_inner();

    match interview_service::interview_by_id(state.interviews.as_ref(), &interview_id).await {
        Ok(Some(interview)) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "interview": interview
        })),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "Interview not found"
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch interview {}: {}", interview_id, e);
            error_response(&e)
        }
    }
}

/// Feedback for one interview, restricted to the signed-in user's own.
#[utoipa::path(
    get,
    path = "/api/v1/interviews/{id}/feedback",
    tag = "Interviews",
    params(
        ("id" = String, Path, description = "Interview id")
    ),
    responses(
        (status = 200, description = "The caller's feedback for this interview", body = Feedback),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Feedback not found")
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_feedback(
    state: web::Data<AppState>,
    user: web::ReqData<User>,
    path: web::Path<String>,
) -> HttpResponse {
    let interview_id = path.into_inner();

    match interview_service::feedback_by_interview(state.interviews.as_ref(), &interview_id, &user.id).await {
        Ok(Some(feedback)) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "feedback": feedback
        })),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "Feedback not found"
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch feedback for {}: {}", interview_id, e);
            error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use std::sync::Arc;

    use crate::api::{configure, test_support::app_state};
    use crate::database::memory::MemoryStore;
    use crate::services::interview_service::tests::interview;

    #[actix_web::test]
    async fn test_anonymous_home_and_lookup() {
        let memory = Arc::new(MemoryStore::new());
        memory.add_interview(interview("a", "u1", "2024-05-01T00:00:00.000Z", true));
        memory.add_interview(interview("b", "u2", "2024-05-02T00:00:00.000Z", false));
        let app = test::init_service(App::new().app_data(app_state(memory)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/v1/interviews/home").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["userInterviews"], serde_json::json!([]));
        assert_eq!(body["latestInterviews"][0]["id"], "a");
        assert_eq!(body["latestInterviews"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get().uri("/api/v1/interviews/b").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["interview"]["type"], "Technical");

        let req = test::TestRequest::get().uri("/api/v1/interviews/missing").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::get().uri("/api/v1/interviews/a/feedback").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn test_store_outage_is_503() {
        let memory = Arc::new(MemoryStore::new());
        memory.set_unavailable(true);
        let app = test::init_service(App::new().app_data(app_state(memory)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/v1/interviews/home").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 503);
    }
}
