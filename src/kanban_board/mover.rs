use tracing::{debug, warn};

use super::{BoardStore, CardSlot};
use crate::error::BoardError;

/// Where a moved card came from and where it landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub task_id: u32,
    pub from: CardSlot,
    pub to: CardSlot,
    /// False when the card ended up exactly where it started.
    pub changed: bool,
}

impl BoardStore {
    /// Relocate the task at `drag_index` of the source column to
    /// `hover_index` of the destination column, rewriting its status.
    ///
    /// When source and destination are the same list the card is removed
    /// first and `hover_index` addresses the shortened list. A `hover_index`
    /// past the end appends. Every lookup is checked before anything is
    /// touched, so a failed call leaves the store as it was.
    pub fn move_card(
        &mut self,
        drag_index: usize,
        hover_index: usize,
        source_category: &str,
        source_column: &str,
        dest_category: &str,
        dest_column: &str,
    ) -> Result<MoveOutcome, BoardError> {
        let src_cat = self.category_position(source_category)?;
        let src_col = self.column_position(src_cat, source_column)?;
        let dst_cat = self.category_position(dest_category)?;
        let dst_col = self.column_position(dst_cat, dest_column)?;

        let len = self.categories[src_cat].columns[src_col].tasks.len();
        if drag_index >= len {
            warn!(
                category = source_category,
                column = source_column,
                drag_index,
                len,
                "refusing move from out of range index"
            );
            return Err(BoardError::IndexOutOfRange {
                category: source_category.to_string(),
                column: source_column.to_string(),
                index: drag_index,
                len,
            });
        }

        let same_list = src_cat == dst_cat && src_col == dst_col;

        let mut task = self.categories[src_cat].columns[src_col]
            .tasks
            .remove(drag_index);
        task.status = dest_column.to_string();
        let task_id = task.id;

        let dest = &mut self.categories[dst_cat].columns[dst_col].tasks;
        let landed = hover_index.min(dest.len());
        dest.insert(landed, task);

        let changed = !(same_list && landed == drag_index);
        if changed {
            self.revision += 1;
        }

        let outcome = MoveOutcome {
            task_id,
            from: CardSlot::new(source_category, source_column, drag_index),
            to: CardSlot::new(dest_category, dest_column, landed),
            changed,
        };
        debug!(
            task_id,
            from = ?outcome.from,
            to = ?outcome.to,
            changed,
            revision = self.revision,
            "card moved"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::kanban_board::tests::roadmap;
    use crate::kanban_board::BoardSeed;
    use crate::task::Task;

    const PR: &str = "Product Roadmap";

    fn ids(store: &BoardStore, category: &str, column: &str) -> Vec<u32> {
        store
            .column(category, column)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect()
    }

    fn three_in_backlog() -> BoardStore {
        let seed = BoardSeed::builder()
            .category("X", |c| {
                c.column(
                    "backlog",
                    [
                        Task::new(1, "T1", ""),
                        Task::new(2, "T2", ""),
                        Task::new(3, "T3", ""),
                    ],
                )
                .column("done", [])
            })
            .build();
        BoardStore::from_seed(seed).unwrap()
    }

    #[test]
    fn move_to_front_of_another_column() {
        let mut store = roadmap();
        let outcome = store.move_card(0, 0, PR, "backlog", PR, "todo").unwrap();

        assert_eq!(ids(&store, PR, "backlog"), vec![2]);
        assert_eq!(ids(&store, PR, "todo"), vec![1, 3]);
        assert_eq!(store.column(PR, "todo").unwrap()[0].status, "todo");
        assert_eq!(outcome.to, CardSlot::new(PR, "todo", 0));
        assert!(outcome.changed);
        store.check_invariants().unwrap();
    }

    #[test]
    fn hover_index_addresses_the_destination_list() {
        let mut store = roadmap();
        store.move_card(0, 1, PR, "backlog", PR, "todo").unwrap();

        assert_eq!(ids(&store, PR, "backlog"), vec![2]);
        assert_eq!(ids(&store, PR, "todo"), vec![3, 1]);
        assert_eq!(store.task(1).unwrap().status, "todo");
    }

    #[test]
    fn reorder_within_one_column() {
        let mut store = three_in_backlog();
        store.move_card(0, 1, "X", "backlog", "X", "backlog").unwrap();
        assert_eq!(ids(&store, "X", "backlog"), vec![2, 1, 3]);
        store.check_invariants().unwrap();
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    fn same_slot_move_is_a_noop(#[case] index: usize) {
        let mut store = three_in_backlog();
        let before = store.column("X", "backlog").unwrap().to_vec();

        let outcome = store
            .move_card(index, index, "X", "backlog", "X", "backlog")
            .unwrap();
        let again = store
            .move_card(index, index, "X", "backlog", "X", "backlog")
            .unwrap();

        assert!(!outcome.changed);
        assert!(!again.changed);
        assert_eq!(store.column("X", "backlog").unwrap(), before.as_slice());
        assert_eq!(store.revision(), 0);
    }

    #[rstest]
    #[case::onto_empty_column(0, 5, "inProgress", 0)]
    #[case::past_last_card(1, 99, "todo", 1)]
    fn hover_past_the_end_appends(
        #[case] drag: usize,
        #[case] hover: usize,
        #[case] dest: &str,
        #[case] landed: usize,
    ) {
        let mut store = roadmap();
        let outcome = store.move_card(drag, hover, PR, "backlog", PR, dest).unwrap();
        assert_eq!(outcome.to.index, landed);
        assert_eq!(ids(&store, PR, dest).last().copied(), Some(outcome.task_id));
    }

    #[test]
    fn reorder_past_the_end_of_the_same_column_appends() {
        let mut store = three_in_backlog();
        store.move_card(0, 10, "X", "backlog", "X", "backlog").unwrap();
        assert_eq!(ids(&store, "X", "backlog"), vec![2, 3, 1]);
    }

    #[test]
    fn round_trip_restores_order_and_status() {
        let mut store = roadmap();
        let original = store.column(PR, "backlog").unwrap().to_vec();

        let there = store.move_card(1, 0, PR, "backlog", PR, "todo").unwrap();
        assert_eq!(store.task(2).unwrap().status, "todo");
        store
            .move_card(there.to.index, 1, PR, "todo", PR, "backlog")
            .unwrap();

        assert_eq!(store.column(PR, "backlog").unwrap(), original.as_slice());
        assert_eq!(ids(&store, PR, "todo"), vec![3]);
    }

    #[test]
    fn moves_across_categories() {
        let mut store = roadmap();
        let outcome = store
            .move_card(0, 0, PR, "todo", "Design Sprint", "done")
            .unwrap();

        assert!(ids(&store, PR, "todo").is_empty());
        assert_eq!(ids(&store, "Design Sprint", "done"), vec![3]);
        assert_eq!(store.task(3).unwrap().status, "done");
        assert_eq!(store.locate(3), Some(outcome.to));
        assert_eq!(store.revision(), 1);
        store.check_invariants().unwrap();
    }

    #[test]
    fn out_of_range_drag_fails_and_leaves_store_untouched() {
        let mut store = roadmap();
        let before = store.clone();

        let err = store.move_card(2, 0, PR, "backlog", PR, "todo").unwrap_err();
        assert_eq!(
            err,
            BoardError::IndexOutOfRange {
                category: PR.into(),
                column: "backlog".into(),
                index: 2,
                len: 2,
            }
        );
        assert_eq!(store.categories(), before.categories());
        assert_eq!(store.revision(), 0);
    }

    #[rstest]
    #[case::source_category("Nope", "backlog", PR, "todo")]
    #[case::source_column(PR, "review", PR, "todo")]
    #[case::dest_category(PR, "backlog", "Nope", "todo")]
    #[case::dest_column(PR, "backlog", PR, "review")]
    fn unknown_names_fail_without_mutation(
        #[case] src_cat: &str,
        #[case] src_col: &str,
        #[case] dst_cat: &str,
        #[case] dst_col: &str,
    ) {
        let mut store = roadmap();
        let before = store.clone();
        assert!(store.move_card(0, 0, src_cat, src_col, dst_cat, dst_col).is_err());
        assert_eq!(store.categories(), before.categories());
    }

    #[test]
    fn invariants_hold_over_a_long_move_sequence() {
        let mut store = BoardStore::from_seed(BoardSeed::builtin().unwrap()).unwrap();
        let total = store.task_count();
        let slots: Vec<(String, String)> = store
            .categories()
            .iter()
            .flat_map(|cat| {
                cat.columns
                    .iter()
                    .map(move |col| (cat.name.clone(), col.key.clone()))
            })
            .collect();

        // Small LCG so the sequence is deterministic without pulling in a RNG.
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = |bound: usize| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) as usize) % bound.max(1)
        };

        for _ in 0..500 {
            let (src_cat, src_col) = &slots[next(slots.len())];
            let (dst_cat, dst_col) = &slots[next(slots.len())];
            let len = store.column(src_cat, src_col).unwrap().len();
            if len == 0 {
                continue;
            }
            let drag = next(len);
            let hover = next(len + 2);
            store
                .move_card(drag, hover, src_cat, src_col, dst_cat, dst_col)
                .unwrap();
            store.check_invariants().unwrap();
        }
        assert_eq!(store.task_count(), total);
    }
}
