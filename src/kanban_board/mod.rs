pub mod mover;
pub mod seed;
pub mod selector;

use std::collections::HashSet;

use tracing::debug;

use crate::error::{BoardError, SeedError};
use crate::icon::Icon;
use crate::task::Task;

pub use mover::MoveOutcome;
pub use seed::BoardSeed;
pub use selector::CategorySelector;

/// An ordered stage of a board. `key` doubles as the `status` of every task in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub title: String,
    pub icon: Icon,
    pub tasks: Vec<Task>,
}

/// One named board with its own set of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub icon: Icon,
    pub columns: Vec<Column>,
}

/// Position of a card: `(category, column, index)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardSlot {
    pub category: String,
    pub column: String,
    pub index: usize,
}

impl CardSlot {
    pub fn new(category: impl Into<String>, column: impl Into<String>, index: usize) -> Self {
        Self {
            category: category.into(),
            column: column.into(),
            index,
        }
    }
}

/// Display title for well known column keys.
pub fn default_column_title(key: &str) -> String {
    match key {
        "backlog" => "Backlog".to_string(),
        "todo" => "To Do".to_string(),
        "inProgress" => "In Progress".to_string(),
        "done" => "Done".to_string(),
        other => other.to_string(),
    }
}

impl Category {
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

/// Every category, column and task of the running session.
///
/// Built once from a [`BoardSeed`]; the only write path is
/// [`BoardStore::move_card`].
#[derive(Debug, Clone)]
pub struct BoardStore {
    categories: Vec<Category>,
    revision: u64,
}

impl BoardStore {
    /// Validate a seed and build the store from it.
    ///
    /// Tasks without a status take the key of their column. Tasks whose
    /// status names another column are rejected.
    pub fn from_seed(seed: BoardSeed) -> Result<Self, SeedError> {
        if seed.categories.is_empty() {
            return Err(SeedError::Empty);
        }

        let mut names = HashSet::new();
        let mut categories = Vec::with_capacity(seed.categories.len());
        for cat in seed.categories {
            if !names.insert(cat.name.clone()) {
                return Err(SeedError::DuplicateCategory(cat.name));
            }

            let mut keys = HashSet::new();
            let mut columns = Vec::with_capacity(cat.columns.len());
            for col in cat.columns {
                if !keys.insert(col.key.clone()) {
                    return Err(SeedError::DuplicateColumn {
                        category: cat.name,
                        column: col.key,
                    });
                }
                let mut tasks = col.tasks;
                for task in &mut tasks {
                    if task.status.is_empty() {
                        task.status = col.key.clone();
                    } else if task.status != col.key {
                        return Err(SeedError::StatusMismatch {
                            id: task.id,
                            status: task.status.clone(),
                            column: col.key,
                        });
                    }
                }
                columns.push(Column {
                    title: col.title.unwrap_or_else(|| default_column_title(&col.key)),
                    icon: Icon::for_column(&col.key),
                    key: col.key,
                    tasks,
                });
            }

            categories.push(Category {
                name: cat.name,
                icon: cat.icon,
                columns,
            });
        }

        let store = Self {
            categories,
            revision: 0,
        };
        store.check_invariants()?;
        debug!(
            categories = store.categories.len(),
            tasks = store.task_count(),
            "board store seeded"
        );
        Ok(store)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// The first category in insertion order.
    pub fn first_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    /// Ordered tasks of one column.
    pub fn column(&self, category: &str, column: &str) -> Result<&[Task], BoardError> {
        let cat = self
            .category(category)
            .ok_or_else(|| BoardError::UnknownCategory(category.to_string()))?;
        cat.column(column)
            .map(|c| c.tasks.as_slice())
            .ok_or_else(|| BoardError::UnknownColumn {
                category: category.to_string(),
                column: column.to_string(),
            })
    }

    pub fn task(&self, id: u32) -> Option<&Task> {
        self.categories
            .iter()
            .flat_map(|cat| cat.columns.iter())
            .flat_map(|col| col.tasks.iter())
            .find(|t| t.id == id)
    }

    /// Where a task currently sits.
    pub fn locate(&self, id: u32) -> Option<CardSlot> {
        for cat in &self.categories {
            for col in &cat.columns {
                if let Some(index) = col.tasks.iter().position(|t| t.id == id) {
                    return Some(CardSlot::new(&cat.name, &col.key, index));
                }
            }
        }
        None
    }

    pub fn task_count(&self) -> usize {
        self.categories.iter().map(Category::task_count).sum()
    }

    /// Bumped once for every move that changed the board.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Every task's status matches its column and every id is unique.
    pub fn check_invariants(&self) -> Result<(), SeedError> {
        let mut seen = HashSet::new();
        for cat in &self.categories {
            for col in &cat.columns {
                for task in &col.tasks {
                    if task.status != col.key {
                        return Err(SeedError::StatusMismatch {
                            id: task.id,
                            status: task.status.clone(),
                            column: col.key.clone(),
                        });
                    }
                    if !seen.insert(task.id) {
                        return Err(SeedError::DuplicateTask(task.id));
                    }
                }
            }
        }
        Ok(())
    }

    fn category_position(&self, name: &str) -> Result<usize, BoardError> {
        self.categories
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| BoardError::UnknownCategory(name.to_string()))
    }

    fn column_position(&self, cat_idx: usize, column: &str) -> Result<usize, BoardError> {
        let cat = &self.categories[cat_idx];
        cat.column_index(column)
            .ok_or_else(|| BoardError::UnknownColumn {
                category: cat.name.clone(),
                column: column.to_string(),
            })
    }
}
