use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{actions::ControllerTask, error::ActionError};

// 1. Page controller contracts
//
// Each page of the application owns a controller that fetches and renders its
// data. The navigator only ever calls the single loading method a route needs.

#[async_trait]
pub trait FeedController: Send + Sync {
    /// Posts from the people the signed-in user follows.
    async fn show_home_feed(&self) -> Result<(), ActionError>;
    /// Latest posts from everyone.
    async fn show_general_feed(&self) -> Result<(), ActionError>;
    /// Drops whatever the feed currently renders.
    async fn clear(&self) -> Result<(), ActionError>;
}

#[async_trait]
pub trait PostController: Send + Sync {
    async fn load_post(&self, post_id: &str) -> Result<(), ActionError>;
}

#[async_trait]
pub trait UserPageController: Send + Sync {
    async fn load_user(&self, user_id: &str) -> Result<(), ActionError>;
}

#[async_trait]
pub trait SearchPageController: Send + Sync {
    async fn load_hashtag(&self, hashtag: &str) -> Result<(), ActionError>;
}

/// PageControllers
///
/// Named controller handles resolved by a `ControllerLoader`.
#[derive(Clone)]
pub struct PageControllers {
    pub feed: Arc<dyn FeedController>,
    pub post: Arc<dyn PostController>,
    pub user_page: Arc<dyn UserPageController>,
    pub search_page: Arc<dyn SearchPageController>,
}

/// ControllerLoader
///
/// Lazily provides the page controllers. Called once per pre-action; an
/// implementation is free to cache.
#[async_trait]
pub trait ControllerLoader: Send + Sync {
    async fn load(&self) -> Result<PageControllers, ActionError>;
}

/// Shared handle stored in `NavigatorState`.
pub type LoaderState = Arc<dyn ControllerLoader>;

// 2. Logging implementation (headless harness)

/// LoggingLoader
///
/// Controllers that only trace what they were asked to do. Backs the
/// `pix-navigator` harness, which has no backend to fetch from.
#[derive(Clone, Default)]
pub struct LoggingLoader;

struct LoggingControllers;

#[async_trait]
impl ControllerLoader for LoggingLoader {
    async fn load(&self) -> Result<PageControllers, ActionError> {
        let controllers = Arc::new(LoggingControllers);
        Ok(PageControllers {
            feed: controllers.clone(),
            post: controllers.clone(),
            user_page: controllers.clone(),
            search_page: controllers,
        })
    }
}

#[async_trait]
impl FeedController for LoggingControllers {
    async fn show_home_feed(&self) -> Result<(), ActionError> {
        tracing::info!("feed: showing home feed");
        Ok(())
    }

    async fn show_general_feed(&self) -> Result<(), ActionError> {
        tracing::info!("feed: showing general feed");
        Ok(())
    }

    async fn clear(&self) -> Result<(), ActionError> {
        tracing::info!("feed: cleared");
        Ok(())
    }
}

#[async_trait]
impl PostController for LoggingControllers {
    async fn load_post(&self, post_id: &str) -> Result<(), ActionError> {
        tracing::info!(post_id, "post: loading");
        Ok(())
    }
}

#[async_trait]
impl UserPageController for LoggingControllers {
    async fn load_user(&self, user_id: &str) -> Result<(), ActionError> {
        tracing::info!(user_id, "user page: loading");
        Ok(())
    }
}

#[async_trait]
impl SearchPageController for LoggingControllers {
    async fn load_hashtag(&self, hashtag: &str) -> Result<(), ActionError> {
        tracing::info!(hashtag, "search: loading hashtag");
        Ok(())
    }
}

// 3. Recording implementation (tests)

/// RecordingLoader
///
/// Test double that reports every controller invocation, as the
/// `ControllerTask` it corresponds to, on the channel returned by `new`.
#[derive(Clone)]
pub struct RecordingLoader {
    calls: mpsc::UnboundedSender<ControllerTask>,
    /// When true, `load` fails and no controller is ever reached.
    pub fail_load: bool,
    /// When true, controllers record the call and then fail.
    pub fail_controllers: bool,
}

impl RecordingLoader {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ControllerTask>) {
        let (calls, rx) = mpsc::unbounded_channel();
        let loader = Self {
            calls,
            fail_load: false,
            fail_controllers: false,
        };
        (loader, rx)
    }

    pub fn new_failing() -> (Self, mpsc::UnboundedReceiver<ControllerTask>) {
        let (mut loader, rx) = Self::new();
        loader.fail_load = true;
        (loader, rx)
    }
}

struct RecordingControllers {
    calls: mpsc::UnboundedSender<ControllerTask>,
    fail: bool,
}

impl RecordingControllers {
    fn record(&self, task: ControllerTask) -> Result<(), ActionError> {
        // A test that dropped its receiver is not interested in calls.
        let _ = self.calls.send(task.clone());
        if self.fail {
            return Err(ActionError::Controller(format!("simulated failure in {task}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ControllerLoader for RecordingLoader {
    async fn load(&self) -> Result<PageControllers, ActionError> {
        if self.fail_load {
            return Err(ActionError::Load("simulated loader failure".to_string()));
        }
        let controllers = Arc::new(RecordingControllers {
            calls: self.calls.clone(),
            fail: self.fail_controllers,
        });
        Ok(PageControllers {
            feed: controllers.clone(),
            post: controllers.clone(),
            user_page: controllers.clone(),
            search_page: controllers,
        })
    }
}

#[async_trait]
impl FeedController for RecordingControllers {
    async fn show_home_feed(&self) -> Result<(), ActionError> {
        self.record(ControllerTask::ShowHomeFeed)
    }

    async fn show_general_feed(&self) -> Result<(), ActionError> {
        self.record(ControllerTask::ShowGeneralFeed)
    }

    async fn clear(&self) -> Result<(), ActionError> {
        self.record(ControllerTask::ClearFeed)
    }
}

#[async_trait]
impl PostController for RecordingControllers {
    async fn load_post(&self, post_id: &str) -> Result<(), ActionError> {
        self.record(ControllerTask::LoadPost {
            post_id: post_id.to_string(),
        })
    }
}

#[async_trait]
impl UserPageController for RecordingControllers {
    async fn load_user(&self, user_id: &str) -> Result<(), ActionError> {
        self.record(ControllerTask::LoadUser {
            user_id: user_id.to_string(),
        })
    }
}

#[async_trait]
impl SearchPageController for RecordingControllers {
    async fn load_hashtag(&self, hashtag: &str) -> Result<(), ActionError> {
        self.record(ControllerTask::SearchHashtag {
            hashtag: hashtag.to_string(),
        })
    }
}
