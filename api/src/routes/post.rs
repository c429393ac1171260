use crate::{
    AppState,
    dto::PostForm,
    errors::AppError,
    models::PostUpdate,
    views::{EditTemplate, ListTemplate, NewTemplate, PostView, ShowTemplate, render_template},
};
use axum::{
    extract::State,
    http::{Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use tracing::info;

pub const LIST_ROUTE: &str = "/";
pub const NEW_ROUTE: &str = "/posts/new/";
pub const CREATE_ROUTE: &str = "/posts/create/";
pub const SHOW_ROUTE: &str = "/posts/show/";
pub const EDIT_ROUTE: &str = "/posts/edit/";
pub const UPDATE_ROUTE: &str = "/posts/update/";
pub const DELETE_ROUTE: &str = "/posts/delete/";

type PostFormInput = Result<PostForm, AppError>;

fn require_post(method: &Method, route: &'static str) -> Result<(), AppError> {
    if method == Method::POST {
        Ok(())
    } else {
        Err(AppError::MethodNotAllowed { route })
    }
}

fn redirect(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn show_location(id: i64) -> String {
    format!("{SHOW_ROUTE}?id={id}")
}

/// GET /, and any path without its own route
pub async fn list_posts(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let posts = state.posts.list().await?;

    render_template(ListTemplate {
        posts: posts.iter().map(PostView::from).collect(),
    })
}

/// GET /posts/new/
pub async fn new_post() -> Result<Html<String>, AppError> {
    render_template(NewTemplate)
}

/// POST /posts/create/
/// Form: title, body
pub async fn create_post(
    State(state): State<AppState>,
    method: Method,
    form: PostFormInput,
) -> Result<Response, AppError> {
    require_post(&method, CREATE_ROUTE)?;
    let form = form?;

    let id = state.posts.create(&form.title, &form.body).await?;

    info!("Post created: {}", id);

    Ok(redirect(show_location(id)))
}

/// GET /posts/show/?id=<id>
pub async fn show_post(
    State(state): State<AppState>,
    form: PostFormInput,
) -> Result<Html<String>, AppError> {
    let form = form?;
    let id = form.parse_id()?;

    let post = state.posts.find(id).await?;

    render_template(ShowTemplate {
        post: PostView::from(&post),
    })
}

/// GET /posts/edit/?id=<id>
pub async fn edit_post(
    State(state): State<AppState>,
    form: PostFormInput,
) -> Result<Html<String>, AppError> {
    let form = form?;
    let id = form.parse_id()?;

    let post = state.posts.find(id).await?;

    render_template(EditTemplate {
        post: PostView::from(&post),
    })
}

/// POST /posts/update/
/// Form: id, title, body
pub async fn update_post(
    State(state): State<AppState>,
    method: Method,
    form: PostFormInput,
) -> Result<Response, AppError> {
    require_post(&method, UPDATE_ROUTE)?;
    let form = form?;
    let id = form.parse_id()?;

    let outcome = state
        .posts
        .update(&PostUpdate {
            id,
            title: form.title,
            body: form.body,
        })
        .await?;

    info!("Post updated: {} ({:?})", id, outcome);

    Ok(redirect(show_location(id)))
}

/// POST /posts/delete/
/// Form: id
pub async fn delete_post(
    State(state): State<AppState>,
    method: Method,
    form: PostFormInput,
) -> Result<Response, AppError> {
    require_post(&method, DELETE_ROUTE)?;
    let form = form?;
    let id = form.parse_id()?;

    state.posts.delete(id).await?;

    info!("Post deleted: {}", id);

    Ok(redirect(LIST_ROUTE.to_string()))
}
