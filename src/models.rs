use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Panels ---

/// PageId
///
/// The closed set of full-screen panels. Exactly one of them is visible after a
/// completed navigation (the splash panel may linger while it fades out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    Splash,
    Feed,
    Post,
    UserInfo,
    Search,
    About,
    Terms,
    Add,
}

impl PageId {
    /// Every panel, in document order.
    pub const ALL: [PageId; 8] = [
        PageId::Splash,
        PageId::Feed,
        PageId::Post,
        PageId::UserInfo,
        PageId::Search,
        PageId::About,
        PageId::Terms,
        PageId::Add,
    ];

    /// The stable id used by the markup (`page-<id>` elements).
    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Splash => "splash",
            PageId::Feed => "feed",
            PageId::Post => "post",
            PageId::UserInfo => "user-info",
            PageId::Search => "search",
            PageId::About => "about",
            PageId::Terms => "terms",
            PageId::Add => "add",
        }
    }

    /// Element id of the panel in the document.
    pub fn element_id(&self) -> String {
        format!("page-{}", self.as_str())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PageDescriptor
///
/// Target of a route's visibility transition. `only_authed` panels are never
/// shown to a signed-out user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub page_id: PageId,
    pub only_authed: bool,
}

impl PageDescriptor {
    pub const fn public(page_id: PageId) -> Self {
        Self {
            page_id,
            only_authed: false,
        }
    }

    pub const fn authed(page_id: PageId) -> Self {
        Self {
            page_id,
            only_authed: true,
        }
    }
}

// --- Navigation ---

/// Named path parameters extracted by the matched pattern.
pub type RouteParams = BTreeMap<String, String>;

/// NavigationContext
///
/// Created for one navigation hop and dropped once the hop completes.
/// `id` correlates every log line emitted for the hop, including the ones
/// from the spawned pre-action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    pub id: Uuid,
    /// Path without query string or fragment; this is what patterns match.
    pub path: String,
    /// Path plus query string, as the location bar shows it.
    pub canonical_path: String,
    pub querystring: String,
    pub params: RouteParams,
}

impl NavigationContext {
    /// Splits `raw` into path and query, dropping any fragment. An empty path
    /// becomes `/` and a missing leading slash is added.
    pub fn new(raw: &str) -> Self {
        let without_fragment = raw.split('#').next().unwrap_or_default();
        let (path, querystring) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_fragment, ""),
        };

        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let canonical_path = if querystring.is_empty() {
            path.clone()
        } else {
            format!("{path}?{querystring}")
        };

        Self {
            id: Uuid::new_v4(),
            path,
            canonical_path,
            querystring: querystring.to_string(),
            params: RouteParams::new(),
        }
    }

    /// The first (and for every registered route, only) path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The `href` whose navigation link gets the active marker.
    pub fn link_href(&self) -> &str {
        active_link_href(&self.canonical_path)
    }
}

/// An empty canonical path highlights the root link.
pub fn active_link_href(canonical_path: &str) -> &str {
    if canonical_path.is_empty() {
        "/"
    } else {
        canonical_path
    }
}

/// NavigationOutcome
///
/// What a completed `Navigator::navigate` call ended up displaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// Canonical path of the final hop.
    pub path: String,
    pub page: PageId,
    /// Every path that was redirected away from, in order.
    pub redirected_from: Vec<String>,
}

impl NavigationOutcome {
    pub fn was_redirected(&self) -> bool {
        !self.redirected_from.is_empty()
    }
}
