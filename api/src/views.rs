//! HTML pages for the post routes.

use askama::Template;
use axum::response::Html;

use crate::errors::AppError;
use crate::models::Post;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A post with its timestamps already formatted for display.
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            body: post.body.clone(),
            created_at: post.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: post.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "posts/list.html")]
pub struct ListTemplate {
    pub posts: Vec<PostView>,
}

#[derive(Template)]
#[template(path = "posts/new.html")]
pub struct NewTemplate;

#[derive(Template)]
#[template(path = "posts/show.html")]
pub struct ShowTemplate {
    pub post: PostView,
}

#[derive(Template)]
#[template(path = "posts/edit.html")]
pub struct EditTemplate {
    pub post: PostView,
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}
