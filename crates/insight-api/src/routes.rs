use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::{auth, authors, blogs, categories, comments, countries};

/// All `/api` routes. Reads and auth are public; likes, commenting and
/// session routes need a bearer token.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/blogs", get(blogs::list_blogs))
        .route("/api/blogs/featured", get(blogs::featured_blog))
        .route("/api/blogs/slug/{slug}", get(blogs::get_blog_by_slug))
        .route("/api/blogs/{id}", get(blogs::get_blog))
        .route("/api/blogs/{id}/related", get(blogs::related_blogs))
        .route("/api/blogs/{id}/comments", get(comments::list_comments))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories/{slug}", get(categories::get_category))
        .route("/api/authors", get(authors::list_authors))
        .route("/api/authors/{id}", get(authors::get_author))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/countries", get(countries::list_countries))
        .route("/api/countries/code/{code}", get(countries::country_by_code))
        .route("/api/countries/{name}", get(countries::country_by_name));

    let protected_routes = Router::new()
        .route(
            "/api/blogs/{id}/like",
            post(blogs::like_blog).delete(blogs::unlike_blog),
        )
        .route("/api/blogs/{id}/comments", post(comments::create_comment))
        .route(
            "/api/comments/{id}/like",
            post(comments::like_comment).delete(comments::unlike_comment),
        )
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::current_user))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use insight_store::{Store, seed::seed};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::countries::CountryClient;
    use crate::state::AppStateInner;

    fn test_app() -> (Router, Arc<Store>) {
        let store = Arc::new(Store::new());
        seed(&store).unwrap();

        let state = Arc::new(AppStateInner {
            store: store.clone(),
            users: store.clone(),
            jwt_secret: "test-secret".into(),
            countries: CountryClient::new("http://127.0.0.1:9").unwrap(),
        });
        (router(state), store)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn register(app: &Router, username: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": username, "password": "wanderlust42" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn lists_enriched_blogs() {
        let (app, _) = test_app();

        let (status, body) = send(&app, Method::GET, "/api/blogs", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let blogs = body.as_array().unwrap();
        assert_eq!(blogs.len(), 4);
        assert_eq!(blogs[0]["categoryId"], 1);
        assert_eq!(blogs[0]["category"]["slug"], "travel");
        assert_eq!(blogs[0]["author"]["name"], "Naomi Chen");

        let (_, body) = send(&app, Method::GET, "/api/blogs?category=food", None, None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["slug"], "street-food-revolution-india");

        let (status, _) = send(&app, Method::GET, "/api/blogs?category=sports", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn featured_blog() {
        let (app, _) = test_app();
        let (status, body) = send(&app, Method::GET, "/api/blogs/featured", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slug"], "exploring-hidden-gems-tokyo");
        assert_eq!(body["isFeatured"], 1);
    }

    #[tokio::test]
    async fn viewing_a_blog_counts_views() {
        let (app, store) = test_app();

        let (status, body) = send(&app, Method::GET, "/api/blogs/2", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["viewCount"], 0);

        let (_, body) = send(&app, Method::GET, "/api/blogs/slug/norway-stunning-fjords", None, None).await;
        assert_eq!(body["viewCount"], 1);

        assert_eq!(store.get_blog(2).unwrap().unwrap().blog.view_count, 2);
    }

    #[tokio::test]
    async fn bad_and_missing_ids() {
        let (app, _) = test_app();

        let (status, body) = send(&app, Method::GET, "/api/blogs/abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid blog ID");

        let (status, body) = send(&app, Method::GET, "/api/blogs/99", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Blog not found");

        let (status, _) = send(&app, Method::GET, "/api/blogs/99/comments", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn related_blogs_share_a_category() {
        let (app, _) = test_app();
        let (status, body) = send(&app, Method::GET, "/api/blogs/1/related?limit=5", None, None).await;
        assert_eq!(status, StatusCode::OK);
        // Blog 1 is the only seeded travel post.
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn threaded_comments() {
        let (app, _) = test_app();
        let (status, body) = send(&app, Method::GET, "/api/blogs/1/comments", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let roots = body.as_array().unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0]["id"], 1);
        assert_eq!(roots[0]["replies"][0]["parentId"], 1);
        assert!(roots[1]["replies"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mutations_require_a_token() {
        let (app, store) = test_app();

        let (status, _) = send(&app, Method::POST, "/api/blogs/1/like", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::POST, "/api/comments/1/like", Some("not-a-jwt"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let comment = json!({ "name": "Eve", "content": "hi" });
        let (status, _) = send(&app, Method::POST, "/api/blogs/1/comments", None, Some(comment)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/api/auth/user", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        assert_eq!(store.get_blog(1).unwrap().unwrap().blog.like_count, 0);
    }

    #[tokio::test]
    async fn likes_floor_at_zero() {
        let (app, _) = test_app();
        let token = register(&app, "naomi").await;

        let (status, body) = send(&app, Method::POST, "/api/blogs/3/like", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likeCount"], 1);

        let (_, body) = send(&app, Method::DELETE, "/api/blogs/3/like", Some(&token), None).await;
        assert_eq!(body["likeCount"], 0);
        let (_, body) = send(&app, Method::DELETE, "/api/blogs/3/like", Some(&token), None).await;
        assert_eq!(body["likeCount"], 0);

        let (_, body) = send(&app, Method::POST, "/api/comments/3/like", Some(&token), None).await;
        assert_eq!(body["likeCount"], 16);

        let (status, _) = send(&app, Method::POST, "/api/comments/42/like", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn posting_comments_and_replies() {
        let (app, store) = test_app();
        let token = register(&app, "erik").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/blogs/2/comments",
            Some(&token),
            Some(json!({ "name": "Erik", "content": "The ferry ride is worth it." })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["blogId"], 2);
        assert_eq!(body["likeCount"], 0);
        let root_id = body["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/blogs/2/comments",
            Some(&token),
            Some(json!({ "name": "Ana", "content": "Agreed!", "parentId": root_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(store.get_blog(2).unwrap().unwrap().blog.comment_count, 2);

        let (_, body) = send(&app, Method::GET, "/api/blogs/2/comments", None, None).await;
        assert_eq!(body[0]["replies"][0]["name"], "Ana");

        // Parent belongs to blog 1.
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/blogs/2/comments",
            Some(&token),
            Some(json!({ "name": "Ana", "content": "Wrong thread", "parentId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/blogs/2/comments",
            Some(&token),
            Some(json!({ "name": "Ana", "content": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/blogs/77/comments",
            Some(&token),
            Some(json!({ "name": "Ana", "content": "Hello?" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert_eq!(store.get_blog(2).unwrap().unwrap().blog.comment_count, 2);
    }

    #[tokio::test]
    async fn malformed_input_is_a_json_bad_request() {
        let (app, store) = test_app();
        let token = register(&app, "ana").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/blogs/2/comments",
            Some(&token),
            Some(json!({ "content": "no name given" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
        assert_eq!(store.get_blog(2).unwrap().unwrap().blog.comment_count, 0);

        let (status, body) = send(&app, Method::GET, "/api/blogs/1/related?limit=abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid query string"));

        let (status, body) = send(&app, Method::GET, "/api/categories/food?include_blogs=maybe", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "ana" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn register_login_and_current_user() {
        let (app, _) = test_app();
        let token = register(&app, "priya").await;

        let (status, body) = send(&app, Method::GET, "/api/auth/user", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "username": "priya" }));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "priya", "password": "wanderlust42" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "priya");
        assert!(body["user"].get("password").is_none());

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "priya", "password": "wrong-password" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn registration_validation() {
        let (app, _) = test_app();
        register(&app, "carlos").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "carlos", "password": "another-password" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "sam", "password": "short" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn categories_and_authors() {
        let (app, _) = test_app();

        let (_, body) = send(&app, Method::GET, "/api/categories", None, None).await;
        assert_eq!(body.as_array().unwrap().len(), 5);

        let (_, body) = send(&app, Method::GET, "/api/categories/nature", None, None).await;
        assert_eq!(body["name"], "Nature");
        assert!(body.get("blogs").is_none());

        let (_, body) = send(&app, Method::GET, "/api/categories/nature?include_blogs=true", None, None).await;
        assert_eq!(body["blogs"][0]["slug"], "norway-stunning-fjords");

        let (status, _) = send(&app, Method::GET, "/api/categories/sports", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, Method::GET, "/api/authors", None, None).await;
        assert_eq!(body.as_array().unwrap().len(), 4);

        let (_, body) = send(&app, Method::GET, "/api/authors/4", None, None).await;
        assert_eq!(body["role"], "Cultural Anthropologist");
    }
}
