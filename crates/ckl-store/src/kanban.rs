//! Grouping of tasks into kanban columns.

use ckl_config::LimitsConfig;
use ckl_core::entities::Task;
use ckl_core::enums::TaskStatus;

use crate::store::ChecklistStore;

/// Tasks of one checklist split by status, each column in insertion order.
#[derive(Debug, Default)]
pub struct KanbanBoard<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> KanbanBoard<'a> {
    #[must_use]
    pub fn build(store: &'a ChecklistStore) -> Self {
        Self::from_tasks(store.tasks())
    }

    #[must_use]
    pub fn from_tasks(tasks: &'a [Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Todo => board.todo.push(task),
                TaskStatus::InProgress => board.in_progress.push(task),
                TaskStatus::Done => board.done.push(task),
            }
        }
        board
    }

    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    #[must_use]
    pub const fn limit(status: TaskStatus, limits: &LimitsConfig) -> usize {
        match status {
            TaskStatus::Todo => limits.todo,
            TaskStatus::InProgress => limits.progress,
            TaskStatus::Done => limits.done,
        }
    }

    /// One message per column holding more tasks than its limit.
    #[must_use]
    pub fn limit_warnings(&self, limits: &LimitsConfig) -> Vec<String> {
        TaskStatus::ALL
            .iter()
            .filter_map(|&status| {
                let count = self.column(status).len();
                let limit = Self::limit(status, limits);
                (count > limit).then(|| {
                    format!(
                        "{} column has {count} tasks, exceeding limit of {limit}",
                        status.label()
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use ckl_core::enums::Priority;
    use pretty_assertions::assert_eq;

    use super::*;

    fn tasks() -> Vec<Task> {
        let now = Utc::now();
        let mut tasks: Vec<Task> = (1..=5)
            .map(|id| Task::new(id, &format!("task {id}"), Priority::Medium, now).unwrap())
            .collect();
        tasks[1].promote(now).unwrap();
        tasks[2].complete(now);
        tasks[4].promote(now).unwrap();
        tasks
    }

    #[test]
    fn groups_by_status_in_insertion_order() {
        let tasks = tasks();
        let board = KanbanBoard::from_tasks(&tasks);
        let ids = |col: &[&Task]| col.iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids(board.column(TaskStatus::Todo)), vec![1, 4]);
        assert_eq!(ids(board.column(TaskStatus::InProgress)), vec![2, 5]);
        assert_eq!(ids(board.column(TaskStatus::Done)), vec![3]);
    }

    #[test]
    fn warns_only_for_columns_over_limit() {
        let tasks = tasks();
        let board = KanbanBoard::from_tasks(&tasks);
        let limits = LimitsConfig {
            progress: 1,
            ..LimitsConfig::default()
        };
        assert_eq!(
            board.limit_warnings(&limits),
            vec![String::from(
                "In Progress column has 2 tasks, exceeding limit of 1"
            )]
        );
        assert!(board.limit_warnings(&LimitsConfig::default()).is_empty());
    }
}
