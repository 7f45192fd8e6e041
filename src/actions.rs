use std::fmt;

use tracing::Instrument;

use crate::{
    controllers::LoaderState,
    error::{ActionError, NavigationError},
    models::NavigationContext,
    routes::{ControllerAction, Route},
};

/// ControllerTask
///
/// A `ControllerAction` bound to the parameter it needs. This is the single
/// typed argument a pre-action receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerTask {
    ShowHomeFeed,
    ShowGeneralFeed,
    ClearFeed,
    LoadPost { post_id: String },
    LoadUser { user_id: String },
    SearchHashtag { hashtag: String },
}

impl ControllerTask {
    /// Binds `action` to the parameters of the matched route.
    ///
    /// # Errors
    /// `NavigationError::MissingParam` when the route's pattern does not
    /// provide the parameter the action consumes.
    pub fn bind(
        action: ControllerAction,
        route: &Route,
        ctx: &NavigationContext,
    ) -> Result<Self, NavigationError> {
        let param = |name: &'static str| {
            ctx.param(name)
                .map(str::to_string)
                .ok_or_else(|| NavigationError::MissingParam {
                    pattern: route.pattern.to_string(),
                    param: name,
                })
        };

        Ok(match action {
            ControllerAction::ShowHomeFeed => ControllerTask::ShowHomeFeed,
            ControllerAction::ShowGeneralFeed => ControllerTask::ShowGeneralFeed,
            ControllerAction::ClearFeed => ControllerTask::ClearFeed,
            ControllerAction::LoadPost => ControllerTask::LoadPost {
                post_id: param("postId")?,
            },
            ControllerAction::LoadUser => ControllerTask::LoadUser {
                user_id: param("userId")?,
            },
            ControllerAction::SearchHashtag => ControllerTask::SearchHashtag {
                hashtag: param("hashtag")?,
            },
        })
    }

    /// Loads the controllers and performs the task.
    pub async fn run(&self, loader: &LoaderState) -> Result<(), ActionError> {
        let controllers = loader.load().await?;
        match self {
            ControllerTask::ShowHomeFeed => controllers.feed.show_home_feed().await,
            ControllerTask::ShowGeneralFeed => controllers.feed.show_general_feed().await,
            ControllerTask::ClearFeed => controllers.feed.clear().await,
            ControllerTask::LoadPost { post_id } => controllers.post.load_post(post_id).await,
            ControllerTask::LoadUser { user_id } => controllers.user_page.load_user(user_id).await,
            ControllerTask::SearchHashtag { hashtag } => {
                controllers.search_page.load_hashtag(hashtag).await
            }
        }
    }
}

impl fmt::Display for ControllerTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerTask::ShowHomeFeed => f.write_str("show_home_feed"),
            ControllerTask::ShowGeneralFeed => f.write_str("show_general_feed"),
            ControllerTask::ClearFeed => f.write_str("clear_feed"),
            ControllerTask::LoadPost { post_id } => write!(f, "load_post({post_id})"),
            ControllerTask::LoadUser { user_id } => write!(f, "load_user({user_id})"),
            ControllerTask::SearchHashtag { hashtag } => write!(f, "load_hashtag({hashtag})"),
        }
    }
}

/// spawn_task
///
/// Starts `task` on the runtime and returns without waiting. A failure is
/// logged under the navigation id and dropped: nothing retries it and the
/// visibility transition never learns about it.
pub fn spawn_task(loader: LoaderState, task: ControllerTask, ctx: &NavigationContext) {
    let span = tracing::debug_span!("pre_action", nav_id = %ctx.id, task = %task);
    tokio::spawn(
        async move {
            match task.run(&loader).await {
                Ok(()) => tracing::debug!("pre-action finished"),
                Err(e) => tracing::warn!(error = %e, "pre-action failed, result dropped"),
            }
        }
        .instrument(span),
    );
}
