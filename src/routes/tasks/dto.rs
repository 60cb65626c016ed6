use serde::{Deserialize, Serialize};

use super::model::Task;

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub complete: bool,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub complete: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(rename = "search-area")]
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub incomplete_count: usize,
    pub search: String,
}
