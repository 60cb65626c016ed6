use super::model::Task;

/// Narrow a set of tasks to those whose title starts with `search`.
///
/// The match is case-sensitive, anchored at the first character, and treats
/// the term as a literal (no wildcard syntax). An empty term means "no
/// filter". Input order is preserved.
pub fn apply_search(tasks: Vec<Task>, search: &str) -> Vec<Task> {
    if search.is_empty() {
        return tasks;
    }

    tasks
        .into_iter()
        .filter(|task| task.title.starts_with(search))
        .collect()
}

/// Number of not-yet-complete tasks within the set handed in. Callers pass
/// the already-filtered set, so the count reflects what the user sees, not
/// their whole task universe.
pub fn incomplete_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| !task.complete).count()
}
