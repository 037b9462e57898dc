//! Route multiplexing for registered handlers

pub mod error;
pub mod handlers;

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    routing::{MethodFilter, MethodRouter},
    Router,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{Result, ServerError};
use crate::handler::RequestHandler;

/// Body returned for unmatched routes
pub const NOT_FOUND_BODY: &str = "not found";

/// Name every route placeholder is registered under
pub const PATH_PARAM: &str = "{param}";

/// Fallback for any unregistered path
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Handlers registered under one canonical template
struct Route {
    methods: HashSet<Method>,
    method_router: MethodRouter,
}

/// Build the router for a set of handlers
///
/// Every `(path, method)` pair must be unique. Placeholders are renamed to
/// [`PATH_PARAM`] before registration, so templates differing only in
/// placeholder name are the same path and collide like identical paths.
/// Handlers read the placeholder by position (`Path<String>`). A known
/// path hit with an unregistered method falls through to [`not_found`],
/// including `HEAD` on a path that only has a `GET` handler.
pub fn create_router(handlers: &[Arc<dyn RequestHandler>]) -> Result<Router> {
    let mut routes: BTreeMap<String, Route> = BTreeMap::new();

    for handler in handlers {
        let path = handler.path();
        let method = handler.method();

        validate_path(&path)?;

        let key = canonical_template(&path);
        let mut route = routes.remove(&key).unwrap_or_else(|| Route {
            methods: HashSet::new(),
            method_router: MethodRouter::new().fallback(not_found),
        });

        if route.methods.contains(&method) {
            return Err(ServerError::DuplicateRoute { path, method });
        }

        let filter = MethodFilter::try_from(method.clone())
            .map_err(|_| ServerError::UnsupportedMethod(method.clone()))?;

        let handler = Arc::clone(handler);
        let endpoint = move |request: Request| {
            let handler = Arc::clone(&handler);
            async move { handler.handle(request).await }
        };

        route.method_router = route.method_router.on(filter, endpoint);
        route.methods.insert(method.clone());
        routes.insert(key, route);

        info!(path = %path, method = %method, "Registered request handler");
    }

    let router = routes.into_iter().fold(Router::new(), |router, (template, route)| {
        let Route {
            methods,
            mut method_router,
        } = route;
        // axum answers HEAD with the GET handler unless HEAD is set
        if methods.contains(&Method::GET) && !methods.contains(&Method::HEAD) {
            method_router = method_router.on(MethodFilter::HEAD, not_found);
        }
        router.route(&template, method_router)
    });

    Ok(router.fallback(not_found).layer(TraceLayer::new_for_http()))
}

/// Template with every placeholder renamed to [`PATH_PARAM`]
fn canonical_template(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with('{') {
                PATH_PARAM
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Reject templates the router would panic on
fn validate_path(path: &str) -> Result<()> {
    let invalid = |reason: &str| ServerError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }

    let mut placeholders = 0;
    for segment in path.split('/') {
        if segment.starts_with(':') || segment.starts_with('*') {
            return Err(invalid("use '{name}' placeholders"));
        }
        if segment.contains('{') || segment.contains('}') {
            let is_placeholder = segment.len() > 2
                && segment.starts_with('{')
                && segment.ends_with('}')
                && !segment[1..segment.len() - 1].contains(['{', '}', '*']);
            if !is_placeholder {
                return Err(invalid("placeholder must be a whole segment"));
            }
            placeholders += 1;
        }
    }

    if placeholders > 1 {
        return Err(invalid("at most one placeholder is allowed"));
    }

    Ok(())
}
