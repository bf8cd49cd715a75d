//! Debounced dispatch and ticket cancellation.

use crate::common::{blog_posts, open_loaded, result_ids, schedule_ticket, type_and_settle};
use postsearch::{Effect, Event, SessionState, Ticket};

#[test]
fn test_query_schedules_with_configured_delay() {
    let mut s = open_loaded(blog_posts());
    let effects = s.handle(Event::QueryChanged("docker".into()));
    assert!(matches!(
        effects.first(),
        Some(Effect::ScheduleSearch { delay_ms: 150, .. })
    ));
    assert!(effects.contains(&Effect::ScrollToTop));
    assert_eq!(s.state(), SessionState::Searching);
    assert!(s.results().is_empty(), "nothing runs before the timer");
}

#[test]
fn test_only_last_keystroke_searches() {
    let mut s = open_loaded(blog_posts());
    let tickets: Vec<Ticket> = ["d", "do", "doc", "dock", "docker"]
        .iter()
        .filter_map(|q| schedule_ticket(&s.handle(Event::QueryChanged(q.to_string()))))
        .collect();
    assert_eq!(tickets.len(), 5);

    for stale in &tickets[..4] {
        s.handle(Event::DebounceFired { ticket: *stale });
        assert_eq!(s.state(), SessionState::Searching);
    }
    s.handle(Event::DebounceFired { ticket: tickets[4] });
    assert_eq!(s.state(), SessionState::ResultsShown);
    assert_eq!(result_ids(&s)[0], "docker-compose-guide");
}

#[test]
fn test_whitespace_query_never_dispatches() {
    let mut s = open_loaded(blog_posts());
    type_and_settle(&mut s, "docker");
    assert_eq!(s.result_count(), 2);

    let effects = s.handle(Event::QueryChanged("   ".into()));
    assert!(schedule_ticket(&effects).is_none());
    assert_eq!(s.result_count(), 0);
    assert_eq!(s.state(), SessionState::IdleWithIndex);
}

#[test]
fn test_clearing_query_cancels_pending_search() {
    let mut s = open_loaded(blog_posts());
    let pending = schedule_ticket(&s.handle(Event::QueryChanged("docker".into()))).unwrap();
    s.handle(Event::QueryChanged(String::new()));
    s.handle(Event::DebounceFired { ticket: pending });
    assert!(s.results().is_empty());
    assert_eq!(s.state(), SessionState::IdleWithIndex);
}

#[test]
fn test_close_cancels_pending_search() {
    let mut s = open_loaded(blog_posts());
    let pending = schedule_ticket(&s.handle(Event::QueryChanged("docker".into()))).unwrap();
    s.handle(Event::Close);
    s.handle(Event::Open);
    s.handle(Event::DebounceFired { ticket: pending });
    assert!(s.results().is_empty());
    assert_eq!(s.query(), "");
}

#[test]
fn test_search_records_history() {
    let mut s = open_loaded(blog_posts());
    type_and_settle(&mut s, "Docker");
    type_and_settle(&mut s, "rust");
    assert_eq!(s.recent_searches(), vec!["rust", "docker"]);
}

#[test]
fn test_stale_keystrokes_leave_no_history() {
    let mut s = open_loaded(blog_posts());
    s.handle(Event::QueryChanged("dock".into()));
    type_and_settle(&mut s, "docker");
    assert_eq!(s.recent_searches(), vec!["docker"]);
}

#[test]
fn test_select_history_searches_term() {
    let mut s = open_loaded(blog_posts());
    let effects = s.handle(Event::SelectHistory("kubernetes".into()));
    assert_eq!(s.query(), "kubernetes");
    let ticket = schedule_ticket(&effects).unwrap();
    s.handle(Event::DebounceFired { ticket });
    assert_eq!(result_ids(&s), vec!["kubernetes-intro"]);
}

#[test]
fn test_query_ignored_while_closed() {
    let mut s = open_loaded(blog_posts());
    s.handle(Event::Close);
    assert!(s.handle(Event::QueryChanged("docker".into())).is_empty());
    assert_eq!(s.query(), "");
}

#[test]
fn test_announcement_tracks_search() {
    let mut s = open_loaded(blog_posts());
    s.handle(Event::QueryChanged("docker".into()));
    assert_eq!(s.view().status, "Searching...");

    type_and_settle(&mut s, "docker");
    assert_eq!(s.view().status, "2 results found Selected: Docker Compose Guide");

    type_and_settle(&mut s, "haskell");
    assert_eq!(s.view().status, "No results found");
}
