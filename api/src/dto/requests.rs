use axum::{
    Form,
    extract::{FromRequest, Multipart, Query, Request},
    http::{Method, header},
};
use serde::Deserialize;

use crate::errors::AppError;

/// Fields submitted by the post forms, or passed in the query string.
///
/// Body values win over query values. Absent fields come through as empty
/// text; `id` is parsed by the handler that needs it.
#[derive(Debug, Default)]
pub struct PostForm {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl PostForm {
    pub fn parse_id(&self) -> Result<i64, std::num::ParseIntError> {
        self.id.parse()
    }
}

#[derive(Debug, Default, Deserialize)]
struct PostFields {
    id: Option<String>,
    title: Option<String>,
    body: Option<String>,
}

impl PostFields {
    fn or(self, fallback: PostFields) -> PostFields {
        PostFields {
            id: self.id.or(fallback.id),
            title: self.title.or(fallback.title),
            body: self.body.or(fallback.body),
        }
    }

    fn set_once(&mut self, name: &str, value: String) {
        let slot = match name {
            "id" => &mut self.id,
            "title" => &mut self.title,
            "body" => &mut self.body,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

impl From<PostFields> for PostForm {
    fn from(fields: PostFields) -> Self {
        Self {
            id: fields.id.unwrap_or_default(),
            title: fields.title.unwrap_or_default(),
            body: fields.body.unwrap_or_default(),
        }
    }
}

fn has_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

async fn read_multipart(mut multipart: Multipart) -> Result<PostFields, AppError> {
    let mut fields = PostFields::default();

    while let Some(field) = multipart.next_field().await? {
        // file parts are not form values
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field.text().await?;
        fields.set_once(&name, value);
    }

    Ok(fields)
}

impl<S> FromRequest<S> for PostForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PostFields>::try_from_uri(req.uri())?;

        if !has_body(req.method()) {
            return Ok(query.into());
        }

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = if content_type.starts_with("multipart/form-data") {
            read_multipart(Multipart::from_request(req, state).await?).await?
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<PostFields>::from_request(req, state).await?;
            fields
        } else {
            PostFields::default()
        };

        Ok(body.or(query).into())
    }
}
