//! End-to-end gesture flows through two synchronized collections.
//!
//! Two collections share one reconciler, each behind its own
//! [`ConfigSynchronizer`], and every event arrives through `dispatch` the way
//! an engine would deliver it.

use std::cell::RefCell;
use std::rc::Rc;

use dragsort_core::{
    CollectionId, DragEvent, EventName, ItemId, Reconciler, SortableSet, StubEngine, VecBinding,
};
use dragsort_runtime::{ConfigSynchronizer, Control, SortOptions};

const ITEM: ItemId = ItemId(11);

struct Board {
    set: SortableSet<&'static str>,
    todo: ConfigSynchronizer<&'static str>,
    done: ConfigSynchronizer<&'static str>,
    todo_id: CollectionId,
    done_id: CollectionId,
}

fn board(
    todo_items: &[&'static str],
    done_items: &[&'static str],
    done_local: SortOptions<&'static str>,
) -> Board {
    let mut set = SortableSet::new();
    let (todo_engine, _) = StubEngine::new();
    let (done_engine, _) = StubEngine::new();
    let todo_id = set.register(
        Box::new(VecBinding::new(todo_items.to_vec())),
        Box::new(todo_engine),
    );
    let done_id = set.register(
        Box::new(VecBinding::new(done_items.to_vec())),
        Box::new(done_engine),
    );

    let reconciler = Rc::new(RefCell::new(Reconciler::new()));
    let todo = ConfigSynchronizer::new(
        todo_id,
        reconciler.clone(),
        SortOptions::new(),
        SortOptions::new(),
        &mut set,
    )
    .unwrap();
    let done = ConfigSynchronizer::new(
        done_id,
        reconciler,
        SortOptions::new(),
        done_local,
        &mut set,
    )
    .unwrap();

    Board {
        set,
        todo,
        done,
        todo_id,
        done_id,
    }
}

fn items(set: &SortableSet<&'static str>, id: CollectionId) -> Vec<&'static str> {
    set.model(id).unwrap().items().to_vec()
}

#[test]
fn cross_list_move_through_dispatch() {
    let mut b = board(&["write", "review", "ship"], &["plan"], SortOptions::new());

    // The engine fires start/remove on the source, receive/update/stop on the
    // destination.
    b.todo
        .dispatch(EventName::Start, &DragEvent::new(ITEM, b.todo_id, 1), &mut b.set)
        .unwrap();
    b.todo
        .dispatch(EventName::Remove, &DragEvent::new(ITEM, b.todo_id, 1), &mut b.set)
        .unwrap();
    b.done
        .dispatch(EventName::Receive, &DragEvent::new(ITEM, b.done_id, 1), &mut b.set)
        .unwrap();
    b.done
        .dispatch(EventName::Update, &DragEvent::new(ITEM, b.done_id, 1), &mut b.set)
        .unwrap();
    b.done
        .dispatch(EventName::Stop, &DragEvent::new(ITEM, b.done_id, 1), &mut b.set)
        .unwrap();

    assert_eq!(items(&b.set, b.todo_id), vec!["write", "ship"]);
    assert_eq!(items(&b.set, b.done_id), vec!["plan", "review"]);
}

#[test]
fn disabled_destination_rolls_back_through_dispatch() {
    let mut b = board(&["write", "review"], &["plan"], SortOptions::new());
    b.done.set_enabled(false, &mut b.set).unwrap();

    b.todo
        .dispatch(EventName::Start, &DragEvent::new(ITEM, b.todo_id, 0), &mut b.set)
        .unwrap();
    b.todo
        .dispatch(EventName::Remove, &DragEvent::new(ITEM, b.todo_id, 0), &mut b.set)
        .unwrap();
    b.done
        .dispatch(EventName::Receive, &DragEvent::new(ITEM, b.done_id, 0), &mut b.set)
        .unwrap();
    b.done
        .dispatch(EventName::Stop, &DragEvent::new(ITEM, b.done_id, 0), &mut b.set)
        .unwrap();

    assert_eq!(items(&b.set, b.todo_id), vec!["write", "review"]);
    assert_eq!(items(&b.set, b.done_id), vec!["plan"]);
}

#[test]
fn user_stop_handler_observes_post_move_state() {
    let observed = Rc::new(RefCell::new(Vec::new()));
    let probe = {
        let observed = observed.clone();
        Box::new(
            move |event: &DragEvent, set: &mut SortableSet<&'static str>| {
                observed
                    .borrow_mut()
                    .push(set.model(event.collection)?.items().to_vec());
                Ok(Control::Continue)
            },
        )
    };
    let mut b = board(
        &["write", "review"],
        &["plan"],
        SortOptions::new().with_handler("stop", probe),
    );

    b.todo
        .dispatch(EventName::Start, &DragEvent::new(ITEM, b.todo_id, 1), &mut b.set)
        .unwrap();
    b.todo
        .dispatch(EventName::Remove, &DragEvent::new(ITEM, b.todo_id, 1), &mut b.set)
        .unwrap();
    b.done
        .dispatch(EventName::Receive, &DragEvent::new(ITEM, b.done_id, 0), &mut b.set)
        .unwrap();
    b.done
        .dispatch(EventName::Stop, &DragEvent::new(ITEM, b.done_id, 0), &mut b.set)
        .unwrap();

    // The handler ran after resolution: the destination already held the item.
    assert_eq!(*observed.borrow(), vec![vec!["review", "plan"]]);
}

#[test]
fn in_place_resort_through_dispatch() {
    let mut b = board(&["a", "b", "c", "d"], &[], SortOptions::new());

    b.todo
        .dispatch(EventName::Start, &DragEvent::new(ITEM, b.todo_id, 3), &mut b.set)
        .unwrap();
    b.todo
        .dispatch(EventName::Update, &DragEvent::new(ITEM, b.todo_id, 0), &mut b.set)
        .unwrap();
    b.todo
        .dispatch(EventName::Stop, &DragEvent::new(ITEM, b.todo_id, 0), &mut b.set)
        .unwrap();

    assert_eq!(items(&b.set, b.todo_id), vec!["d", "a", "b", "c"]);
}
