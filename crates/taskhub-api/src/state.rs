use std::sync::Arc;

use taskhub_db::TaskRepository;

#[derive(Clone)]
pub struct ApiState {
    pub repo: Arc<dyn TaskRepository>,
}
