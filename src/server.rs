//! HTTP server for the user registration pages.

use crate::config::ServerConfig;
use crate::error::Result;
use crate::form::RegistrationForm;
use crate::storage::{create_store, UserStore};
use crate::views;
use axum::{
    extract::{Path, Query, Request, State},
    http::{Method, StatusCode},
    middleware::map_request,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get},
    Form, Router, ServiceExt,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::Layer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Query parameter carrying the method a form POST stands in for.
const METHOD_OVERRIDE_PARAM: &str = "_method";

type SharedStore = Arc<dyn UserStore>;

#[derive(Clone)]
struct AppState {
    store: SharedStore,
}

#[derive(Deserialize)]
struct MethodOverride {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// The registration web server.
///
/// Serves the listing, the registration form and the delete action on a
/// background task. [`WebServer::wait`] blocks until that task ends.
pub struct WebServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl WebServer {
    /// Binds the listener and starts serving.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cadastro_web::{ServerConfig, WebServer};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let server = WebServer::new(ServerConfig::empty().with_port(0)).await?;
    /// println!("listening on {}", server.url());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let store = create_store(config.seed);
        let app = map_request(override_method).layer(router(store));

        let listener = TcpListener::bind(config.bind_addr()).await?;
        let addr = listener.local_addr()?;

        info!("Registration server listening on http://{}", addr);

        let handle = tokio::spawn(async move {
            let service = ServiceExt::<Request>::into_make_service(app);
            if let Err(e) = axum::serve(listener, service).await {
                warn!("Server stopped: {}", e);
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the socket address the server is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the base URL of the server, e.g. `http://127.0.0.1:3009`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Returns the port number the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Waits for the server task to finish.
    pub async fn wait(self) -> Result<()> {
        self.handle.await?;
        Ok(())
    }
}

/// Builds the routes over `store`. Method override is applied outside of
/// this router so that rewritten requests are routed by their new method.
fn router(store: SharedStore) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/usuarios", get(list_users).post(register_user))
        .route("/usuarios/{id}", delete(delete_user))
        .route("/cadastro", get(registration_form))
        .route("/completed", get(completed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Lets HTML forms reach non-POST routes: `POST /x?_method=DELETE` is
/// routed as `DELETE /x`.
async fn override_method(mut request: Request) -> Request {
    if request.method() != Method::POST {
        return request;
    }

    let Ok(Query(params)) = Query::<MethodOverride>::try_from_uri(request.uri()) else {
        return request;
    };
    let Some(method) = params.method else {
        return request;
    };

    match Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes()) {
        Ok(method) => {
            debug!(
                "Overriding POST {} as {} via {}",
                request.uri().path(),
                method,
                METHOD_OVERRIDE_PARAM
            );
            *request.method_mut() = method;
        }
        Err(_) => warn!("Ignoring invalid {} value: {}", METHOD_OVERRIDE_PARAM, method),
    }

    request
}

fn store_failure(e: crate::error::Error) -> Response {
    warn!("Store operation failed: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

async fn list_users(State(state): State<AppState>) -> Response {
    debug!("Listing users");

    match state.store.list().await {
        Ok(users) => Html(views::users_page(&users)).into_response(),
        Err(e) => store_failure(e),
    }
}

async fn registration_form() -> Html<String> {
    Html(views::registration_page(None, &RegistrationForm::default()))
}

async fn register_user(
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> Response {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(e) => {
            warn!("Rejected registration ({}): {}", e.field(), e);
            let message = e.to_string();
            return Html(views::registration_page(Some(&message), &form)).into_response();
        }
    };

    match state.store.append(draft).await {
        Ok(user) => {
            info!("Registered user {}: {}", user.id, user.email);
            Redirect::to("/usuarios").into_response()
        }
        Err(e) => store_failure(e),
    }
}

/// Reads the id from the numeric prefix of a path segment: `" 3"`, `"3.7"`
/// and `"3abc"` all name user 3. Negative or overflowing values name no user.
fn parse_id_prefix(raw: &str) -> Option<u32> {
    let rest = raw.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() || negative {
        return None;
    }
    digits.parse().ok()
}

/// Ids without a numeric prefix match no user and leave the list untouched.
async fn delete_user(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let Some(id) = parse_id_prefix(&raw_id) else {
        debug!("Ignoring delete for non-numeric id: {}", raw_id);
        return Redirect::to("/usuarios").into_response();
    };

    match state.store.remove_by_id(id).await {
        Ok(Some(user)) => {
            info!("Deleted user {} ({})", id, user.email);
            Redirect::to("/usuarios").into_response()
        }
        Ok(None) => {
            debug!("No user with id {}", id);
            Redirect::to("/usuarios").into_response()
        }
        Err(e) => store_failure(e),
    }
}

async fn completed() -> Html<String> {
    Html(views::completed_page())
}
