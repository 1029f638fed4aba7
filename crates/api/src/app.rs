use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, require_user_auth, trace_id};
use crate::routes::{
    admin, assets, assignments, bases, dashboard, equipment_types, expenditures, health,
    purchases, transfers, users,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
}

/// Builds the router. Fails only if the configured token keys cannot be parsed.
pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let jwt = Arc::new(config.jwt.build()?);
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Every /api/v1 route needs a bearer token; role checks happen per handler.
    let protected_routes = Router::new()
        // Movements
        .route(
            "/api/v1/purchases",
            post(purchases::record_purchase).get(purchases::list_purchases),
        )
        .route(
            "/api/v1/transfers",
            post(transfers::record_transfer).get(transfers::list_transfers),
        )
        .route(
            "/api/v1/assignments",
            post(assignments::assign_asset).get(assignments::list_assignments),
        )
        .route(
            "/api/v1/expenditures",
            post(expenditures::record_expenditure).get(expenditures::list_expenditures),
        )
        // Dashboard
        .route("/api/v1/dashboard/metrics", get(dashboard::get_metrics))
        .route(
            "/api/v1/dashboard/net-movement-details",
            get(dashboard::get_net_movement_details),
        )
        // Reference data
        .route(
            "/api/v1/bases",
            get(bases::list_bases).post(bases::create_base),
        )
        .route(
            "/api/v1/bases/:base_id",
            get(bases::get_base)
                .put(bases::update_base)
                .delete(bases::delete_base),
        )
        .route(
            "/api/v1/equipment-types",
            get(equipment_types::list_equipment_types)
                .post(equipment_types::create_equipment_type),
        )
        .route(
            "/api/v1/equipment-types/:equipment_type_id",
            get(equipment_types::get_equipment_type)
                .put(equipment_types::update_equipment_type)
                .delete(equipment_types::delete_equipment_type),
        )
        .route(
            "/api/v1/assets",
            get(assets::list_assets).post(assets::create_asset),
        )
        .route(
            "/api/v1/assets/:asset_id",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route(
            "/api/v1/assets/:asset_id/details",
            get(assets::get_asset_details),
        )
        .route("/api/v1/users", get(users::list_users))
        .route("/api/v1/users/:user_id", get(users::get_user))
        // Maintenance
        .route(
            "/api/v1/admin/ledger/rollover",
            post(admin::roll_over_ledger),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state))
}
