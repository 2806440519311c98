//! End-to-end runs of the retro skin against mock terminal streams.

mod common;

use common::{Fixture, PROFILE};
use crossterm::event::{KeyCode, KeyModifiers};
use folio::cmd_args::Launch;
use folio::io::{MockEventStream, MockRenderStream};
use folio::retro::View;
use folio::{App, AppExit};

async fn run_retro(fixture: &Fixture, view: View, events: MockEventStream) -> MockRenderStream {
    let render = MockRenderStream::new();
    let mut app = App::with_io_streams(
        Launch::Retro { view },
        fixture.services(),
        fixture.output(),
        events,
        render.clone(),
    )
    .unwrap();
    assert_eq!(app.run().await.unwrap(), AppExit::Quit);
    render
}

fn quit(events: &mut MockEventStream) {
    events.press_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
}

/// `open 1` on the about view opens the first listed link
#[tokio::test]
async fn open_one_should_open_the_first_link() {
    let fixture = Fixture::new(PROFILE);
    let mut events = MockEventStream::empty();
    events.submit("open 1");
    quit(&mut events);

    let render = run_retro(&fixture, View::About, events).await;

    assert_eq!(fixture.opener.opened(), vec!["https://github.com/ada"]);
    assert!(render.transcript().contains("Opened [1]"));
}

/// `open 99` opens nothing and says so
#[tokio::test]
async fn open_out_of_range_should_flash_bad_link() {
    let fixture = Fixture::new(PROFILE);
    let mut events = MockEventStream::empty();
    events.submit("open 99");
    quit(&mut events);

    let render = run_retro(&fixture, View::About, events).await;

    assert!(fixture.opener.opened().is_empty());
    assert!(render.transcript().contains("Bad link number."));
}

/// Relative links resolve against the profile document's directory
#[tokio::test]
async fn cv_link_should_resolve_next_to_the_profile() {
    let fixture = Fixture::new(PROFILE);
    let mut events = MockEventStream::empty();
    events.submit("cv");
    quit(&mut events);

    let render = run_retro(&fixture, View::About, events).await;

    let opened = fixture.opener.opened();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].ends_with("data/../resume/CV.pdf"));
    assert!(render.transcript().contains("Opened CV."));
}

/// `clear` wipes the output but stays on the same view
#[tokio::test]
async fn clear_should_keep_the_view() {
    let fixture = Fixture::new(PROFILE);
    let mut events = MockEventStream::empty();
    events.submit("resume").submit("clear");
    quit(&mut events);

    let render = run_retro(&fixture, View::About, events).await;

    let screen = render.screen_text();
    assert!(screen.contains("VIEW: RESUME"));
    assert!(screen.contains("CLEARED"));
    assert!(!screen.contains("SUMMARY"));
}

/// Unknown input gets the help hint
#[tokio::test]
async fn unknown_command_should_point_at_help() {
    let fixture = Fixture::new(PROFILE);
    let mut events = MockEventStream::empty();
    events.submit("dance");
    quit(&mut events);

    let render = run_retro(&fixture, View::About, events).await;

    assert!(render.transcript().contains("Unknown command. Type HELP."));
}

/// The projects view shows the fetched repositories once they arrive
#[tokio::test]
async fn projects_should_render_fetched_repositories() {
    let fixture = Fixture::new(PROFILE);
    let mut events = MockEventStream::empty();
    events.submit("projects");
    // Room for the spawned fetch to report back before quitting
    for _ in 0..50 {
        events.push_event(crossterm::event::Event::FocusGained);
    }
    quit(&mut events);

    let render = run_retro(&fixture, View::About, events).await;

    let transcript = render.transcript();
    assert!(transcript.contains("VIEW: PROJECTS"));
    assert!(transcript.contains("engine"));
    assert_eq!(fixture.api.calls(), 1);
}
