//! ---
//! agri_section: "07-testing-qa"
//! agri_subsection: "integration-tests"
//! agri_type: "source"
//! agri_scope: "test"
//! agri_description: "End-to-end session, guard, and market flows."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use std::sync::Arc;

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;

use agrismart_app::views::MarketView;
use agrismart_app::{evaluate, GuardOutcome, ADMIN_HOME, DASHBOARD_HOME, LOGIN_ROUTE};
use agrismart_client::{ApiClient, LoginRequest, OfferDraft};
use agrismart_common::ApiConfig;
use agrismart_roles::{Role, RoleResolver};
use agrismart_session::{ClientStorage, SessionStore, StoredUser};

async fn mock_login(Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            axum::Json(json!({
                "token": "tok-e2e",
                "email": body["email"],
                "role": "AGRICULTEUR",
                "firstName": "Moussa",
                "lastName": "Diop"
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "message": "Identifiants invalides" })),
        )
    }
}

async fn mock_offers_list() -> impl IntoResponse {
    axum::Json(json!([]))
}

async fn mock_offers_create(Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        axum::Json(json!({
            "id": "o-new",
            "product": body["product"],
            "quantity": body["quantity"],
            "unit": body["unit"],
            "price": body["price"],
            "quality": body["quality"],
            "availability": body["availability"],
            "status": "pending"
        })),
    )
}

async fn mock_prices() -> impl IntoResponse {
    axum::Json(json!([
        {"product": "Arachide", "price": 1.1, "unit": "kg"}
    ]))
}

async fn spawn_backend() -> String {
    let api = Router::new()
        .route("/auth/login", post(mock_login))
        .route("/market/offers", get(mock_offers_list).post(mock_offers_create))
        .route("/market/prices", get(mock_prices));
    let app = Router::new().nest("/api", api);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn session_over(dir: &std::path::Path) -> SessionStore {
    let storage = Arc::new(ClientStorage::open(dir).unwrap());
    let resolver = RoleResolver::new(storage.clone());
    SessionStore::new(storage, resolver)
}

#[tokio::test]
async fn login_to_market_flow() {
    let base = spawn_backend().await;
    let client = Arc::new(ApiClient::new(&ApiConfig {
        base_url: base.parse().unwrap(),
    }));
    let dir = tempfile::tempdir().unwrap();
    let session = session_over(dir.path());

    // Unauthenticated navigation lands on the login page.
    assert_eq!(
        evaluate(&session, DASHBOARD_HOME),
        GuardOutcome::Redirect(LOGIN_ROUTE)
    );

    // Sign in; the legacy AGRICULTEUR role maps onto producteur.
    let auth = client
        .login(&LoginRequest {
            email: "moussa@agrismart.example".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    client.set_token(Some(auth.token.clone()));
    session.store_session(
        &auth.token,
        &StoredUser {
            email: auth.email.clone(),
            first_name: auth.first_name.clone(),
            last_name: auth.last_name.clone(),
            role: auth.role.clone(),
            profile_picture_url: auth.profile_picture_url.clone(),
            requires_password_change: auth.requires_password_change,
        },
    );
    assert_eq!(session.resolver().current(), Role::Producteur);

    // A producteur reaches the market but not the administration area.
    assert_eq!(evaluate(&session, "/app/market"), GuardOutcome::Allow);
    assert_eq!(
        evaluate(&session, ADMIN_HOME),
        GuardOutcome::Redirect(DASHBOARD_HOME)
    );

    // Market flow: joined load, then a permitted offer creation.
    let market = MarketView::new(client.clone(), session.resolver().clone());
    market.load().await;
    let state = market.state();
    assert!(state.error.is_none());
    assert_eq!(state.prices.len(), 1);

    market
        .create_offer(OfferDraft {
            product: "Arachide".into(),
            quantity: 200.0,
            unit: "kg".into(),
            price: 1.2,
            quality: "A".into(),
            availability: "Immédiate".into(),
            owner_email: Some(auth.email.clone()),
        })
        .await;
    let state = market.state();
    assert_eq!(state.offers.len(), 1);
    assert_eq!(state.offers[0].id.as_deref(), Some("o-new"));

    // Logout clears persistence and drops back to the read-only role.
    session.logout();
    assert!(!session.is_authenticated());
    assert_eq!(session.resolver().current(), Role::Viewer);
    assert_eq!(
        evaluate(&session, "/app/market"),
        GuardOutcome::Redirect(LOGIN_ROUTE)
    );
}

#[tokio::test]
async fn persisted_session_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let session = session_over(dir.path());
        session.store_session(
            "tok-persist",
            &StoredUser {
                email: "awa@agrismart.example".into(),
                first_name: "Awa".into(),
                last_name: "Ndiaye".into(),
                role: "COOPERATIVE".into(),
                profile_picture_url: None,
                requires_password_change: None,
            },
        );
    }

    // Fresh process over the same state directory.
    let session = session_over(dir.path());
    session.restore_session();
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("tok-persist"));
    assert_eq!(session.resolver().current(), Role::Cooperative);
    assert_eq!(evaluate(&session, ADMIN_HOME), GuardOutcome::Redirect(DASHBOARD_HOME));
    assert_eq!(evaluate(&session, "/app/planning"), GuardOutcome::Allow);
}
