mod common;

use common::{fail, fetch_of, init_logging, page, started, succeed, user};
use pretty_assertions::assert_eq;
use roster_core::{
    update, Effect, FeedPresentation, FeedState, FetchFailure, Msg, Phase, PAGE_SIZE,
};

#[test]
fn mount_requests_first_page() {
    init_logging();
    let (mut state, effects) = update(FeedState::new(), Msg::Mounted);

    assert_eq!(state.phase(), Phase::InitialLoading);
    assert!(state.consume_dirty());
    let (ticket, page_number) = fetch_of(&effects);
    assert_eq!(page_number, 1);
    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            ticket,
            page: 1,
            per_page: PAGE_SIZE,
        }]
    );
    assert_eq!(state.view().presentation, FeedPresentation::Loading);
}

#[test]
fn second_mount_is_ignored() {
    init_logging();
    let (state, _) = update(FeedState::new(), Msg::Mounted);
    let before = state.clone();
    let (state, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let state = started(page(1, 2, 1, 10));
    let before = state.clone();
    let (state, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn failed_start_leaves_items_empty() {
    init_logging();
    let (state, effects) = update(FeedState::new(), Msg::Mounted);
    let state = fail(state, &effects);

    assert_eq!(state.phase(), Phase::Error);
    assert!(state.items().is_empty());
    assert_eq!(state.current_page(), 0);
    assert_eq!(state.last_failure(), Some(FetchFailure::Transport));
    assert_eq!(state.view().presentation, FeedPresentation::Failed);

    // Retry goes through refresh, not a second mount.
    let (_, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
}

#[test]
fn load_more_ignored_while_fetching() {
    init_logging();
    let (state, _) = update(FeedState::new(), Msg::Mounted);
    let before = state.clone();
    let (state, effects) = update(state, Msg::LoadMoreRequested);
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let state = started(page(1, 3, 1, 10));
    let (state, _) = update(state, Msg::LoadMoreRequested);
    assert_eq!(state.phase(), Phase::LoadingMore);
    let before = state.clone();
    let (state, effects) = update(state, Msg::LoadMoreRequested);
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let (state, _) = update(state, Msg::RefreshRequested);
    assert_eq!(state.phase(), Phase::Refreshing);
    let before = state.clone();
    let (state, effects) = update(state, Msg::LoadMoreRequested);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn load_more_requires_rows() {
    init_logging();
    let state = started(page(1, 3, 1, 0));
    assert!(state.can_load_more());
    assert_eq!(state.view().presentation, FeedPresentation::Empty);

    let (_, effects) = update(state, Msg::LoadMoreRequested);
    assert!(effects.is_empty());
}

#[test]
fn failed_load_more_retries_same_page() {
    init_logging();
    let state = started(page(1, 3, 1, 10));

    let (state, effects) = update(state, Msg::LoadMoreRequested);
    assert_eq!(fetch_of(&effects).1, 2);
    let state = fail(state, &effects);
    assert_eq!(state.phase(), Phase::Error);
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.items().len(), 10);
    assert_eq!(
        state.view().presentation,
        FeedPresentation::List {
            refreshing: false,
            loading_more: false,
            reached_end: false,
        }
    );

    let (state, effects) = update(
        state,
        Msg::ScrollPositionChanged {
            last_visible_index: 9,
            total_rendered_count: 10,
        },
    );
    assert_eq!(fetch_of(&effects).1, 2);
    let state = succeed(state, &effects, page(2, 3, 11, 10));
    assert_eq!(state.current_page(), 2);
    assert_eq!(state.items().len(), 20);
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.last_failure(), None);
}

#[test]
fn failed_refresh_preserves_items() {
    init_logging();
    let state = started(page(1, 2, 1, 10));
    let before = state.items().to_vec();

    let (state, effects) = update(state, Msg::RefreshRequested);
    assert_eq!(state.phase(), Phase::Refreshing);
    assert_eq!(state.items(), before.as_slice());
    assert_eq!(
        state.view().presentation,
        FeedPresentation::List {
            refreshing: true,
            loading_more: false,
            reached_end: false,
        }
    );

    let state = fail(state, &effects);
    assert_eq!(state.phase(), Phase::Error);
    assert_eq!(state.items(), before.as_slice());
    assert_eq!(state.current_page(), 1);
}

#[test]
fn refresh_replaces_items_even_when_empty() {
    init_logging();
    let state = started(page(1, 3, 1, 10));
    let (state, effects) = update(state, Msg::LoadMoreRequested);
    let state = succeed(state, &effects, page(2, 3, 11, 10));
    assert_eq!(state.current_page(), 2);

    let (state, effects) = update(state, Msg::RefreshRequested);
    let state = succeed(state, &effects, page(1, 1, 100, 0));
    assert!(state.items().is_empty());
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.total_pages(), 1);
    assert!(!state.can_load_more());
    assert_eq!(state.view().presentation, FeedPresentation::Empty);
}

#[test]
fn refresh_ignored_while_loading_first_page_or_refreshing() {
    init_logging();
    let (state, _) = update(FeedState::new(), Msg::Mounted);
    let (state, effects) = update(state, Msg::RefreshRequested);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::InitialLoading);

    let state = started(page(1, 2, 1, 10));
    let (state, _) = update(state, Msg::RefreshRequested);
    let (state, effects) = update(state, Msg::RefreshRequested);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Refreshing);
}

#[test]
fn refresh_during_load_more_supersedes_it() {
    init_logging();
    let state = started(page(1, 3, 1, 10));
    let (state, load_effects) = update(state, Msg::LoadMoreRequested);
    let (stale, _) = fetch_of(&load_effects);

    let (state, effects) = update(state, Msg::RefreshRequested);
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::CancelFetch { ticket: stale });
    let (fresh, page_number) = fetch_of(&effects);
    assert_eq!(page_number, 1);
    assert_eq!(state.in_flight(), Some(fresh));

    // The late load-more result must not be merged.
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            ticket: stale,
            page: page(2, 3, 11, 10),
        },
    );
    assert_eq!(state.phase(), Phase::Refreshing);
    assert_eq!(state.items().len(), 10);

    let state = succeed(state, &effects, page(1, 3, 1, 10));
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.items().len(), 10);
}

#[test]
fn results_for_another_feed_are_ignored() {
    init_logging();
    let (old_state, old_effects) = update(FeedState::with_feed_id(1), Msg::Mounted);
    let (old_ticket, _) = fetch_of(&old_effects);
    drop(old_state);

    let (state, _) = update(FeedState::with_feed_id(2), Msg::Mounted);
    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            ticket: old_ticket,
            page: page(1, 1, 1, 3),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn result_without_fetch_in_flight_is_ignored() {
    init_logging();
    let state = started(page(1, 2, 1, 10));
    let (ticket, _) = {
        let (_, effects) = update(FeedState::new(), Msg::Mounted);
        fetch_of(&effects)
    };
    let before = state.clone();
    let (state, _) = update(
        state,
        Msg::PageFailed {
            ticket,
            failure: FetchFailure::Decode,
        },
    );
    assert_eq!(state, before);
}

#[test]
fn duplicate_users_across_pages_are_kept() {
    init_logging();
    let state = started(page(1, 2, 1, 3));
    let (state, effects) = update(state, Msg::LoadMoreRequested);
    let state = succeed(state, &effects, page(2, 2, 3, 2));

    let ids: Vec<_> = state.items().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 3, 4]);
}

#[test]
fn selection_returns_display_name() {
    init_logging();
    let state = started(page(1, 1, 7, 2));
    let view = state.view();
    assert_eq!(view.select(1), Some(user(8).display_name()));
    assert_eq!(view.select(1).as_deref(), Some("First8 Last8"));
    assert_eq!(view.select(2), None);
}
