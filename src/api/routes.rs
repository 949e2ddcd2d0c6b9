use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

#[cfg(not(test))]
use {
    crate::Error,
    axum::extract::ConnectInfo,
    std::net::{IpAddr, SocketAddr},
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
};

use crate::api::handlers::{self, AppState};
use crate::config::Settings;
use crate::Result;

/// Burst allowance of twice the per-second rate, saturating at `u32::MAX`
fn burst_size(rate: u64) -> u32 {
    u32::try_from(rate.saturating_mul(2)).unwrap_or(u32::MAX)
}

/// Create the router with all endpoints
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Result<Router> {
    #[cfg_attr(test, allow(unused_mut))]
    let mut search_routes = Router::new()
        .route("/search", get(handlers::search_recipes))
        .route("/search/:page", get(handlers::search_recipes_page))
        .with_state(state.clone());

    // Rate limiting keys on the peer IP and falls back to 127.0.0.1 when the
    // connection info is unavailable. Behind a reverse proxy, switch to a
    // header-based extractor.
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> std::result::Result<Self::Key, tower_governor::GovernorError> {
                if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
                    return Ok(addr.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        // One request replenished every 1000/rate ms, bursts of twice the rate
        let replenish_ms = (1000 / settings.server.api_rate_limit).max(1);
        let governor_conf = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_millisecond(replenish_ms)
            .burst_size(burst_size(settings.server.api_rate_limit))
            .finish()
            .ok_or_else(|| Error::Config("Invalid API rate limit".to_string()))?;

        search_routes = search_routes.layer(GovernorLayer {
            config: Arc::new(governor_conf),
        });
    }

    let health_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .with_state(state);

    let router = Router::new()
        .merge(search_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(
            settings.pagination.max_request_body_size,
        ))
        .layer(
            // Read-only public API
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
