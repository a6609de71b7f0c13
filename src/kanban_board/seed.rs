use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SeedError;
use crate::icon::Icon;
use crate::task::Task;

const BUILTIN_SEED: &str = include_str!("../../seed/default_board.json");

/// Initial board contents, injected into [`super::BoardStore::from_seed`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSeed {
    pub categories: Vec<CategorySeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySeed {
    pub name: String,
    #[serde(default)]
    pub icon: Icon,
    #[serde(default)]
    pub columns: Vec<ColumnSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSeed {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl BoardSeed {
    #[cfg(test)]
    pub fn builder() -> SeedBuilder {
        SeedBuilder::default()
    }

    pub fn from_json(data: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let data = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// The six boards the application ships with.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json(BUILTIN_SEED)
    }
}

/// Fluent construction of seeds, mostly for fixtures.
///
/// ```ignore
/// let seed = BoardSeed::builder()
///     .category("Product Roadmap", |c| {
///         c.column("backlog", [Task::new(1, "Task 1", "")])
///             .column("todo", [])
///     })
///     .build();
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct SeedBuilder {
    seed: BoardSeed,
}

#[cfg(test)]
impl SeedBuilder {
    pub fn category(
        mut self,
        name: impl Into<String>,
        columns: impl FnOnce(CategoryBuilder) -> CategoryBuilder,
    ) -> Self {
        let builder = columns(CategoryBuilder {
            category: CategorySeed {
                name: name.into(),
                icon: Icon::default(),
                columns: Vec::new(),
            },
        });
        self.seed.categories.push(builder.category);
        self
    }

    pub fn build(self) -> BoardSeed {
        self.seed
    }
}

#[cfg(test)]
#[derive(Debug)]
pub struct CategoryBuilder {
    category: CategorySeed,
}

#[cfg(test)]
impl CategoryBuilder {
    pub fn column(mut self, key: impl Into<String>, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.category.columns.push(ColumnSeed {
            key: key.into(),
            title: None,
            tasks: tasks.into_iter().collect(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;

    use super::*;
    use crate::kanban_board::BoardStore;

    #[test]
    fn builtin_seed_loads_into_a_valid_store() {
        let store = BoardStore::from_seed(BoardSeed::builtin().unwrap()).unwrap();
        let names: Vec<_> = store.category_names().collect();
        assert_eq!(
            names,
            vec![
                "Product Roadmap",
                "Marketing Campaigns",
                "Engineering Sprints",
                "Content Calendar",
                "Design Sprint",
                "Startup Launch",
            ]
        );
        let roadmap = store.category("Product Roadmap").unwrap();
        let keys: Vec<_> = roadmap.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["backlog", "todo", "inProgress", "done"]);
        assert_eq!(roadmap.task_count(), 9);
        assert_eq!(store.category("Content Calendar").unwrap().icon, Icon::LayoutTemplate);
        store.check_invariants().unwrap();
    }

    #[test]
    fn seed_reads_from_a_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories":[{{"name":"Ops","columns":[{{"key":"todo","title":"Queue","tasks":[{{"id":5,"title":"Rotate keys"}}]}}]}}]}}"#
        )
        .unwrap();

        let store = BoardStore::from_seed(BoardSeed::from_path(file.path()).unwrap()).unwrap();
        let col = store.category("Ops").unwrap().column("todo").unwrap();
        assert_eq!(col.title, "Queue");
        assert_eq!(col.tasks[0].status, "todo");
    }

    #[test]
    fn missing_seed_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BoardSeed::from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            BoardSeed::from_json("{\"categories\": [").unwrap_err(),
            SeedError::Json(_)
        ));
    }

    fn one_task(id: u32) -> Task {
        Task::new(id, format!("Task {id}"), "")
    }

    #[rstest]
    #[case::empty(BoardSeed::default(), "Empty")]
    #[case::duplicate_category(
        BoardSeed::builder()
            .category("A", |c| c.column("todo", []))
            .category("A", |c| c.column("todo", []))
            .build(),
        "DuplicateCategory"
    )]
    #[case::duplicate_column(
        BoardSeed::builder()
            .category("A", |c| c.column("todo", []).column("todo", []))
            .build(),
        "DuplicateColumn"
    )]
    #[case::duplicate_task_across_categories(
        BoardSeed::builder()
            .category("A", |c| c.column("todo", [one_task(1)]))
            .category("B", |c| c.column("done", [one_task(1)]))
            .build(),
        "DuplicateTask"
    )]
    #[case::status_mismatch(
        BoardSeed::builder()
            .category("A", |c| c.column("todo", [Task { status: "done".into(), ..one_task(1) }]))
            .build(),
        "StatusMismatch"
    )]
    fn invalid_seeds_are_rejected(#[case] seed: BoardSeed, #[case] expected: &str) {
        let err = BoardStore::from_seed(seed).unwrap_err();
        assert!(
            format!("{err:?}").starts_with(expected),
            "expected {expected}, got {err:?}"
        );
    }
}
