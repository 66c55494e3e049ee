// Property tests: the density invariant holds after any sequence of
// create / move / reorder / relocate / delete operations, including ones
// rejected by admission control.

mod common;

use common::{add_column, order, positions, seed_board};
use kanflow_core::errors::ExErrorKind;
use kanflow_core::ordering::OrderedTable;
use kanflow_core::rules::check_density;
use kanflow_engine::commands::task::{
    task_create, task_delete, task_move, task_reorder, task_update, TaskCreate, TaskUpdate,
};
use proptest::prelude::*;
use rusqlite::Connection;

#[derive(Debug, Clone)]
enum Op {
    Create { column: usize },
    Move { task: usize, column: usize, position: u32 },
    Reorder { column: usize, rotate: usize, reverse: bool },
    Relocate { task: usize, column: usize },
    Delete { task: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..3usize).prop_map(|column| Op::Create { column }),
        4 => (0..16usize, 0..3usize, 0..8u32)
            .prop_map(|(task, column, position)| Op::Move { task, column, position }),
        1 => (0..3usize, 0..8usize, any::<bool>())
            .prop_map(|(column, rotate, reverse)| Op::Reorder { column, rotate, reverse }),
        1 => (0..16usize, 0..3usize).prop_map(|(task, column)| Op::Relocate { task, column }),
        1 => (0..16usize).prop_map(|task| Op::Delete { task }),
    ]
}

fn all_tasks(conn: &Connection, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .flat_map(|c| order(conn, OrderedTable::Tasks, c))
        .collect()
}

fn apply(conn: &mut Connection, columns: &[String], op: &Op) {
    let tasks = all_tasks(conn, columns);
    let pick = |i: usize| tasks.get(i % tasks.len().max(1)).cloned();

    let result = match op {
        Op::Create { column } => task_create(
            TaskCreate {
                column_id: columns[*column].clone(),
                title: "Generated".to_string(),
                ..Default::default()
            },
            conn,
        )
        .map(|_| ()),
        Op::Move {
            task,
            column,
            position,
        } => match pick(*task) {
            Some(id) => task_move(&id, &columns[*column], *position, conn).map(|_| ()),
            None => Ok(()),
        },
        Op::Reorder {
            column,
            rotate,
            reverse,
        } => {
            let mut ids = order(conn, OrderedTable::Tasks, &columns[*column]);
            if !ids.is_empty() {
                let k = rotate % ids.len();
                ids.rotate_left(k);
            }
            if *reverse {
                ids.reverse();
            }
            task_reorder(&columns[*column], &ids, conn).map(|_| ())
        }
        Op::Relocate { task, column } => match pick(*task) {
            Some(id) => task_update(
                &id,
                TaskUpdate {
                    column_id: Some(columns[*column].clone()),
                    ..Default::default()
                },
                conn,
            )
            .map(|_| ()),
            None => Ok(()),
        },
        Op::Delete { task } => match pick(*task) {
            Some(id) => task_delete(&id, conn),
            None => Ok(()),
        },
    };

    if let Err(e) = result {
        assert_eq!(e.kind(), ExErrorKind::AdmissionDenied, "unexpected error {e}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_density_holds_after_any_sequence(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut conn = kanflow_store::db::open_in_memory().unwrap();
        kanflow_store::migrations::apply_migrations(&mut conn).unwrap();
        let board = seed_board(&mut conn);
        let columns: Vec<String> = vec![
            add_column(&mut conn, &board.board.id, "Open", None).id,
            add_column(&mut conn, &board.board.id, "Limited", Some(3)).id,
            add_column(&mut conn, &board.board.id, "Also open", None).id,
        ];

        for op in &ops {
            let before = all_tasks(&conn, &columns).len();
            apply(&mut conn, &columns, op);
            let after = all_tasks(&conn, &columns).len();

            for column in &columns {
                let pos = positions(&conn, OrderedTable::Tasks, column);
                prop_assert!(
                    check_density(column, pos.iter().copied()).is_ok(),
                    "after {:?}: {:?}", op, pos
                );
            }
            prop_assert!(positions(&conn, OrderedTable::Tasks, &columns[1]).len() <= 3);

            match op {
                Op::Create { .. } => prop_assert!(after == before || after == before + 1),
                Op::Delete { .. } => prop_assert!(after + 1 == before || before == 0),
                _ => prop_assert_eq!(after, before),
            }
        }
    }
}
