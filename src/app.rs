use crate::{modules, types::Context};
use axum::{
    extract::Request,
    http::{header, Method},
    Router, ServiceExt,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors, normalize_path::NormalizePath, trace};

pub struct App {
    ctx: Arc<Context>,
    service: NormalizePath<Router>,
}

impl App {
    pub fn new(ctx: Arc<Context>) -> Self {
        let service = Self::router(ctx.clone());

        Self { ctx, service }
    }

    /// `/hotels/` and `/hotels` reach the same handler.
    pub fn router(ctx: Arc<Context>) -> NormalizePath<Router> {
        let router = Router::new()
            .merge(modules::get_router())
            .with_state(ctx)
            .layer(trace::TraceLayer::new_for_http())
            .layer(
                cors::CorsLayer::new()
                    .allow_methods([Method::OPTIONS, Method::GET])
                    .allow_headers([header::CONTENT_TYPE])
                    .allow_origin(cors::Any),
            );

        NormalizePath::trim_trailing_slash(router)
    }

    pub async fn serve(self) {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = TcpListener::bind(&address).await.unwrap_or_else(|err| {
            tracing::error!("{}", err);
            panic!("Failed to bind to {}", address)
        });

        tracing::info!(
            "App is running on {} ({})",
            self.ctx.app.url,
            self.ctx.app.environment.as_str()
        );

        let service = ServiceExt::<Request>::into_make_service(self.service);

        if let Err(err) = axum::serve(listener, service).await {
            tracing::error!("Server stopped unexpectedly: {}", err);
        }
    }
}
