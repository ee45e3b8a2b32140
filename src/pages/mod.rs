//! Application pages

pub mod chat;
pub mod login;

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use crate::route::{guard, Navigation};
use crate::state::AppState;

/// Re-run the route guard whenever the location or the session changes
pub(crate) fn use_route_guard() {
    let state = expect_context::<AppState>();
    let location = use_location();
    let navigate = use_navigate();
    let token = state.token;

    Effect::new(move |_| {
        let path = location.pathname.get();
        if let Navigation::Redirect(to) = guard(&path, token.get().is_some()) {
            tracing::debug!("Redirecting {} to {}", path, to);
            navigate(
                to,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}
