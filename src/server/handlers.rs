//! HTTP request handlers.

use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, error, web};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::predictor::Predictor;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SCRIPT_JS: &str = include_str!("../../static/script.js");

/// Body of `POST /predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Text to classify. A missing field reads as empty.
    #[serde(default)]
    pub comment: String,
}

/// Successful `POST /predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// The submitted text, as received.
    pub comment: String,
    /// Predicted label.
    pub sentiment: String,
    /// Percentage per label; empty when the model has no probabilities.
    pub probabilities: BTreeMap<String, f64>,
}

/// Error body shared by every failing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

impl ErrorResponse {
    fn new<S: Into<String>>(message: S) -> Self {
        ErrorResponse {
            error: message.into(),
        }
    }
}

/// `GET /`
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// `GET /static/script.js`
pub async fn script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(SCRIPT_JS)
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// `POST /predict`
pub async fn predict(
    predictor: web::Data<Predictor>,
    body: web::Json<PredictRequest>,
) -> HttpResponse {
    let comment = body.into_inner().comment;
    debug!("Prediction request ({} bytes)", comment.len());

    match predictor.predict(&comment) {
        Ok(result) => HttpResponse::Ok().json(PredictResponse {
            comment,
            sentiment: result.label,
            probabilities: result.distribution.unwrap_or_default(),
        }),
        Err(e @ PredictError::EmptyInput) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
        Err(e @ PredictError::Failure(_)) => {
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// JSON extractor settings: malformed bodies get a 400 in the shared error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        warn!("Rejected request body: {err}");
        let response = HttpResponse::BadRequest()
            .json(ErrorResponse::new(format!("Invalid request body: {err}")));
        error::InternalError::from_response(err, response).into()
    })
}
