//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, StartupError};

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use delegation_backend::ApiDoc;
use delegation_backend::inbound::http::ask::ask;
use delegation_backend::inbound::http::docs_access::DocsAccess;
use delegation_backend::inbound::http::health::{HealthState, health, live, ready};
use delegation_backend::inbound::http::state::HttpState;
use delegation_backend::inbound::http::user_score::user_score;
use delegation_backend::middleware::{DocsGuard, Trace};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    docs_access: DocsAccess,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        docs_access,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(DocsGuard::new(docs_access))
        .wrap(Trace)
        // Browser clients call from any origin.
        .wrap(Cors::permissive())
        .service(ask)
        .service(user_score)
        .service(health)
        .service(ready)
        .service(live)
        .service(SwaggerUi::new("/docs/{_:.*}").url("/openapi.json", ApiDoc::openapi()))
}

/// Construct the HTTP server and mark it ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        db_pool,
        model,
        model_settings,
        docs_access,
    } = config;
    let http_state = build_http_state(&db_pool, model, model_settings);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            docs_access: docs_access.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    drain_on_interrupt(&server, health_state);
    Ok(server)
}

/// Fail the health probes and stop gracefully once Ctrl-C is received.
fn drain_on_interrupt(server: &Server, health_state: web::Data<HealthState>) {
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for interrupt; probes will not drain");
            return;
        }
        info!("interrupt received; draining");
        health_state.mark_unhealthy();
        handle.stop(true).await;
    });
}
