use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use riskx_core::{ErrorCategory, InferencePipeline};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct PredictResponse {
    prediction: u8,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    probability: Option<f64>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(pipeline: Arc<InferencePipeline>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(pipeline.clone()))
                .configure(routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Route table, shared by the server and by handler tests mounting the
/// same app.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/health", web::get().to(health))
        .route("/predict", web::post().to(predict));
}

async fn home() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "API is running",
        "status": "success"
    })))
}

async fn health(pipeline: web::Data<Arc<InferencePipeline>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "model_loaded": pipeline.model_available()
    })))
}

async fn predict(
    pipeline: web::Data<Arc<InferencePipeline>>,
    body: web::Json<serde_json::Value>,
) -> ActixResult<HttpResponse> {
    match pipeline.handle(&body) {
        Ok(result) => Ok(HttpResponse::Ok().json(PredictResponse {
            prediction: result.label,
            status: "success",
            probability: result.probability,
        })),
        Err(e) => {
            let payload = serde_json::json!({
                "error": e.to_string(),
                "status": "error"
            });
            Ok(match e.category() {
                ErrorCategory::Client => HttpResponse::BadRequest().json(payload),
                ErrorCategory::Server => HttpResponse::ServiceUnavailable().json(payload),
            })
        }
    }
}
