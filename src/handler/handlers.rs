use actix_web::{
    HttpResponse, Responder, ResponseError,
    web::{self, Redirect},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    models::UrlRecord,
    repository::UrlRepository,
    schemas::{Url, UrlBase, UrlInfo},
};
use crate::handler::config::Config;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Parameter error: {0}")]
    ParamError(String),
    #[error("Database error: {0}")]
    DBError(#[from] anyhow::Error),
    #[error("URL not found")]
    NotFound,
}

impl ResponseError for HandlerError {
    fn error_response(&self) -> HttpResponse {
        match self {
            HandlerError::ParamError(msg) => HttpResponse::BadRequest().body(msg.clone()),
            HandlerError::DBError(e) => {
                tracing::error!("Internal Server Error: {:?}", e);
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
            HandlerError::NotFound => HttpResponse::NotFound().body("URL not found"),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

#[derive(Clone)]
pub struct Handler<T: UrlRepository> {
    url_repo: T,
    config: Config,
}

impl<T: UrlRepository> Handler<T> {
    pub fn new(url_repo: T, config: Config) -> Self {
        Handler { url_repo, config }
    }

    fn url_info(&self, record: &UrlRecord) -> UrlInfo {
        let base = self.config.base_url.trim_end_matches('/');
        UrlInfo::new(
            Url::from_record(record),
            format!("{}/{}", base, record.key),
            format!("{}/admin/{}", base, record.secret_key),
        )
    }

    pub async fn root(&self) -> impl Responder + use<T> {
        HttpResponse::Ok().body("Welcome to the URL shortener API :)")
    }

    pub async fn livez(&self) -> impl Responder + use<T> {
        HttpResponse::Ok().body("Ok")
    }

    pub async fn readyz(&self) -> impl Responder + use<T> {
        HttpResponse::Ok().body("Ok")
    }

    pub async fn create_url(
        &self,
        info: web::Json<UrlBase>,
    ) -> Result<impl Responder + use<T>, HandlerError> {
        let target = info.target_url.trim();
        if target.is_empty() {
            return Err(HandlerError::ParamError(
                "The 'target_url' parameter is required.".to_string(),
            ));
        }
        url::Url::parse(target)
            .map_err(|_| HandlerError::ParamError("Your provided URL is not valid".to_string()))?;

        let record = self.url_repo.create(target).await?;
        tracing::info!(
            event = "short_url_created",
            key = record.key.as_str(),
            target_url = record.target_url.as_str()
        );

        Ok(web::Json(self.url_info(&record)))
    }

    pub async fn forward_to_target_url(
        &self,
        path: web::Path<String>,
    ) -> Result<impl Responder + use<T>, HandlerError> {
        let key = path.into_inner();

        let Some(record) = self.url_repo.find_active_by_key(&key).await? else {
            tracing::info!(event = "short_url_access", key = key.as_str(), status_code = 404);
            return Err(HandlerError::NotFound);
        };

        self.url_repo.register_click(&record.key).await?;
        tracing::info!(
            event = "short_url_access",
            key = record.key.as_str(),
            status_code = 307
        );

        Ok(Redirect::to(record.target_url).temporary())
    }

    pub async fn get_url_info(
        &self,
        path: web::Path<String>,
    ) -> Result<impl Responder + use<T>, HandlerError> {
        let secret_key = path.into_inner();

        let Some(record) = self.url_repo.find_active_by_secret_key(&secret_key).await? else {
            return Err(HandlerError::NotFound);
        };

        Ok(web::Json(self.url_info(&record)))
    }

    pub async fn delete_url(
        &self,
        path: web::Path<String>,
    ) -> Result<impl Responder + use<T>, HandlerError> {
        let secret_key = path.into_inner();

        let Some(record) = self.url_repo.deactivate_by_secret_key(&secret_key).await? else {
            return Err(HandlerError::NotFound);
        };
        tracing::info!(event = "short_url_deactivated", key = record.key.as_str());

        Ok(web::Json(Detail {
            detail: format!(
                "Successfully deleted shortened URL for '{}'",
                record.target_url
            ),
        }))
    }
}
