use std::sync::{Arc, RwLock};

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::{
    NavigatorState,
    actions::{self, ControllerTask},
    error::NavigationError,
    models::{NavigationContext, NavigationOutcome, PageDescriptor, PageId},
    routes::{PathPattern, PreAction, RouteTable, Target, app_routes},
};

/// Path that must never be the first page shown.
const ADD_PATH: &str = "/add";

/// Step
///
/// Result of one stage of a navigation hop.
enum Step<T> {
    Continue(T),
    Redirect(String),
}

/// Navigator
///
/// Translates navigation events into pre-actions and panel visibility
/// transitions, gated by the authentication state. Cloning is cheap and every
/// clone drives the same document.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<Inner>,
}

struct Inner {
    routes: RouteTable,
    state: NavigatorState,
    // Canonical path of the latest hop, as the location bar would show it.
    location: RwLock<String>,
}

impl Navigator {
    /// new
    ///
    /// Registers the application routes. No navigation happens until `start`.
    pub fn new(state: NavigatorState) -> Result<Self, NavigationError> {
        Ok(Self::with_routes(state, app_routes()?))
    }

    /// Same as `new` with a caller-supplied table.
    pub fn with_routes(state: NavigatorState, routes: RouteTable) -> Self {
        tracing::debug!(routes = routes.len(), "navigator routes registered");
        Self {
            inner: Arc::new(Inner {
                routes,
                state,
                location: RwLock::new("/".to_string()),
            }),
        }
    }

    /// start
    ///
    /// Dispatches the initial navigation. An initial `/add` is rewritten to
    /// `/` before any route runs.
    pub async fn start(&self, initial_path: &str) -> Result<NavigationOutcome, NavigationError> {
        let ctx = NavigationContext::new(initial_path);
        let path = if PathPattern::new(ADD_PATH).matches(&ctx.path).is_some() {
            tracing::info!("initial load at /add rewritten to /");
            "/".to_string()
        } else {
            ctx.canonical_path
        };
        self.navigate(&path).await
    }

    /// navigate
    ///
    /// Runs the route matching `path`, following redirects, and returns once
    /// the final visibility transition has been applied. For restricted
    /// panels that includes waiting for the auth signal.
    pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome, NavigationError> {
        let max_redirects = self.inner.state.config.max_redirects;
        let mut target = path.to_string();
        let mut redirected_from = Vec::new();

        loop {
            let ctx = NavigationContext::new(&target);
            let span = tracing::info_span!(
                "navigation",
                nav_id = %ctx.id,
                path = %ctx.canonical_path,
                route = tracing::field::Empty,
            );

            let canonical_path = ctx.canonical_path.clone();
            let step = self.navigate_once(ctx).instrument(span).await?;
            match step {
                Step::Continue(page) => {
                    return Ok(NavigationOutcome {
                        path: canonical_path,
                        page,
                        redirected_from,
                    });
                }
                Step::Redirect(next) => {
                    redirected_from.push(std::mem::replace(&mut target, next));
                    if redirected_from.len() > max_redirects {
                        return Err(NavigationError::RedirectLoop {
                            path: path.to_string(),
                            hops: max_redirects,
                        });
                    }
                    tracing::debug!(to = %target, "redirecting");
                }
            }
        }
    }

    /// dispatch
    ///
    /// Event-loop entry point: navigates on its own task so a navigation
    /// waiting for the auth signal does not hold up the ones after it.
    pub fn dispatch(&self, path: &str) -> JoinHandle<Result<NavigationOutcome, NavigationError>> {
        let navigator = self.clone();
        let path = path.to_string();
        tokio::spawn(async move { navigator.navigate(&path).await })
    }

    /// reload_page
    ///
    /// Navigates again to the current location's path.
    pub async fn reload_page(&self) -> Result<NavigationOutcome, NavigationError> {
        let location = self.current_path();
        let ctx = NavigationContext::new(&location);
        self.navigate(&ctx.path).await
    }

    /// Canonical path of the most recent navigation hop.
    pub fn current_path(&self) -> String {
        self.inner
            .location
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_location(&self, canonical_path: &str) {
        *self
            .inner
            .location
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = canonical_path.to_string();
    }

    /// One hop: match, pre-action, transition.
    async fn navigate_once(
        &self,
        mut ctx: NavigationContext,
    ) -> Result<Step<PageId>, NavigationError> {
        self.set_location(&ctx.canonical_path);

        let (route, params) = self
            .inner
            .routes
            .resolve(&ctx.path)
            .ok_or_else(|| NavigationError::Unrouted(ctx.path.clone()))?;
        ctx.params = params;
        tracing::Span::current().record("route", tracing::field::display(&route.pattern));
        tracing::debug!(params = ?ctx.params, "route matched");

        match route.pre_action {
            Some(PreAction::SplashGate) => {
                if let Step::Redirect(next) = self.splash_gate() {
                    return Ok(Step::Redirect(next));
                }
            }
            Some(PreAction::Controller(action)) => {
                let task = ControllerTask::bind(action, route, &ctx)?;
                actions::spawn_task(self.inner.state.loader.clone(), task, &ctx);
            }
            None => {}
        }

        match &route.target {
            Target::Redirect(next) => Ok(Step::Redirect(next.clone())),
            Target::Page(page) => Ok(self.display_page(*page, &ctx).await),
        }
    }

    /// display_splash_if_signed_out
    ///
    /// Reveals the splash sign-in affordance for visitors; signed-in users are
    /// sent to their home feed, in which case the outcome of that navigation
    /// is returned.
    pub async fn display_splash_if_signed_out(
        &self,
    ) -> Result<Option<NavigationOutcome>, NavigationError> {
        match self.splash_gate() {
            Step::Continue(()) => Ok(None),
            Step::Redirect(next) => self.navigate(&next).await.map(Some),
        }
    }

    fn splash_gate(&self) -> Step<()> {
        if self.inner.state.auth.current_user_present() {
            Step::Redirect("/home".to_string())
        } else {
            self.inner.state.dom.show_splash_login();
            Step::Continue(())
        }
    }

    /// display_page
    ///
    /// Shows `page` and hides every other panel. Restricted panels first wait
    /// for the auth signal (the only suspension point) and redirect signed-out
    /// users to `/`; the splash panel fades out instead of vanishing when a
    /// restricted panel replaces it.
    async fn display_page(&self, page: PageDescriptor, ctx: &NavigationContext) -> Step<PageId> {
        let state = &self.inner.state;

        if page.only_authed {
            state.auth.wait_for_auth().await;
            if !state.auth.current_user_present() {
                tracing::info!(page = %page.page_id, "signed out, restricted panel refused");
                return Step::Redirect("/".to_string());
            }
        }

        let dom = &state.dom;
        dom.clear_active_links();
        dom.mark_link_active(ctx.link_href());

        for panel in PageId::ALL {
            if panel == page.page_id {
                dom.show_panel(panel);
            } else if panel == PageId::Splash && page.only_authed {
                dom.fade_out_panel(panel, state.config.splash_fade);
            } else {
                dom.hide_panel(panel);
            }
        }

        dom.close_drawer();
        dom.scroll_to_top();

        tracing::info!(page = %page.page_id, "page displayed");
        Step::Continue(page.page_id)
    }
}
