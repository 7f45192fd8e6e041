//! Route table
//!
//! Maps URL paths to a pre-action (optional) and a visibility target. Routes
//! are tried in registration order and the first matching pattern wins, so
//! literal and parameterized paths go before the catch-all.

pub mod pattern;

pub use pattern::PathPattern;

use crate::{
    error::RouteError,
    models::{PageDescriptor, PageId, RouteParams},
};

/// ControllerAction
///
/// Asynchronous data loads a route can start. Parameterized actions read the
/// value of the route's single path parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerAction {
    ShowHomeFeed,
    ShowGeneralFeed,
    ClearFeed,
    LoadPost,
    LoadUser,
    SearchHashtag,
}

impl ControllerAction {
    /// The path parameter the action consumes, if any.
    pub fn param_name(&self) -> Option<&'static str> {
        match self {
            ControllerAction::LoadPost => Some("postId"),
            ControllerAction::LoadUser => Some("userId"),
            ControllerAction::SearchHashtag => Some("hashtag"),
            ControllerAction::ShowHomeFeed
            | ControllerAction::ShowGeneralFeed
            | ControllerAction::ClearFeed => None,
        }
    }
}

/// PreAction
///
/// Runs before the visibility transition of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreAction {
    /// Synchronous: show the sign-in affordance when signed out, otherwise
    /// redirect to `/home` and abandon the current navigation.
    SplashGate,
    /// Spawned and never awaited.
    Controller(ControllerAction),
}

/// Target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Page(PageDescriptor),
    Redirect(String),
}

/// Route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub pattern: PathPattern,
    pub pre_action: Option<PreAction>,
    pub target: Target,
}

/// RouteTable
///
/// Ordered list of routes with unique patterns.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route.
    ///
    /// # Errors
    /// `RouteError::DuplicatePattern` if a registered pattern already matches
    /// the same paths (literals compared case-insensitively, trailing slash
    /// ignored, parameter names irrelevant).
    pub fn route(
        mut self,
        pattern: &str,
        pre_action: Option<PreAction>,
        target: Target,
    ) -> Result<Self, RouteError> {
        let parsed = PathPattern::new(pattern);
        // A pattern matching the same paths as an earlier one could never win.
        if self.routes.iter().any(|r| r.pattern.overlaps(&parsed)) {
            return Err(RouteError::DuplicatePattern(pattern.to_string()));
        }
        self.routes.push(Route {
            pattern: parsed,
            pre_action,
            target,
        });
        Ok(self)
    }

    /// Route showing `page` after an optional pre-action.
    pub fn page(
        self,
        pattern: &str,
        pre_action: Option<PreAction>,
        page: PageDescriptor,
    ) -> Result<Self, RouteError> {
        self.route(pattern, pre_action, Target::Page(page))
    }

    /// First route whose pattern matches `path`, with its extracted parameters.
    pub fn resolve(&self, path: &str) -> Option<(&Route, RouteParams)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// app_routes
///
/// The application's navigation surface, in match order.
pub fn app_routes() -> Result<RouteTable, RouteError> {
    use ControllerAction::*;

    let load = |action| Some(PreAction::Controller(action));

    RouteTable::new()
        // Splash for visitors, home feed for signed-in users.
        .page("/", Some(PreAction::SplashGate), PageDescriptor::public(PageId::Splash))?
        .page("/home", load(ShowHomeFeed), PageDescriptor::authed(PageId::Feed))?
        .page("/recent", load(ShowGeneralFeed), PageDescriptor::public(PageId::Feed))?
        .page("/post/:postId", load(LoadPost), PageDescriptor::public(PageId::Post))?
        .page("/user/:userId", load(LoadUser), PageDescriptor::public(PageId::UserInfo))?
        .page("/search/:hashtag", load(SearchHashtag), PageDescriptor::public(PageId::Search))?
        .page("/about", load(ClearFeed), PageDescriptor::public(PageId::About))?
        .page("/terms", load(ClearFeed), PageDescriptor::public(PageId::Terms))?
        // Uploading needs a user; nothing to preload.
        .page("/add", None, PageDescriptor::authed(PageId::Add))?
        .route("*", None, Target::Redirect("/".to_string()))
}
