//! Skin selection at start-up: `--ui`, the chooser and the saved preference.

mod common;

use common::{Fixture, PROFILE};
use crossterm::event::{KeyCode, KeyModifiers};
use folio::cmd_args::{CommandLineArgs, Launch};
use folio::io::{MockEventStream, MockRenderStream};
use folio::storage::{keys, KeyValueStore};
use folio::{App, AppExit};

async fn run(fixture: &Fixture, launch: Launch, events: MockEventStream) -> (AppExit, MockRenderStream) {
    let render = MockRenderStream::new();
    let mut app = App::with_io_streams(
        launch,
        fixture.services(),
        fixture.output(),
        events,
        render.clone(),
    )
    .unwrap();
    let exit = app.run().await.unwrap();
    (exit, render)
}

/// `--ui retro` goes straight to the retro skin
#[tokio::test]
async fn ui_retro_should_skip_the_chooser() {
    let fixture = Fixture::new(PROFILE);
    let args = CommandLineArgs::parse_from(["folio", "--ui", "retro"]);
    let mut events = MockEventStream::empty();
    events.press_with(KeyCode::Char('c'), KeyModifiers::CONTROL);

    let (exit, render) = run(&fixture, args.launch().clone(), events).await;

    assert_eq!(exit, AppExit::Quit);
    let transcript = render.transcript();
    assert!(transcript.contains("VIEW: ABOUT"));
    assert!(!transcript.contains("Choose your interface"));
    assert!(!transcript.contains("Remember my choice"));
}

/// `--ui modern` publishes the page without drawing anything
#[tokio::test]
async fn ui_modern_should_publish_directly() {
    let fixture = Fixture::new(PROFILE);
    let args = CommandLineArgs::parse_from(["folio", "--ui", "MODERN"]);

    let (exit, render) = run(&fixture, args.launch().clone(), MockEventStream::empty()).await;

    assert_eq!(exit, AppExit::Published(fixture.output().canonicalize().unwrap()));
    assert!(render.commands().is_empty());
    let html = std::fs::read_to_string(fixture.output()).unwrap();
    assert!(html.contains("Ada Lovelace — Modern"));
    assert!(html.contains("engine"));
}

/// A remembered choice is saved and offered on the next start
#[tokio::test]
async fn remembered_choice_should_be_offered_next_time() {
    let fixture = Fixture::new(PROFILE);

    // Focus the remember toggle, check it, then pick retro and quit from it
    let mut first = MockEventStream::empty();
    first.press(KeyCode::Tab).press(KeyCode::Tab).press(KeyCode::Tab);
    first.press(KeyCode::Char(' '));
    first.press(KeyCode::Char('r'));
    first.press_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
    run(&fixture, Launch::Chooser { ui: None }, first).await;

    assert_eq!(fixture.store.get(keys::UI_CHOICE).as_deref(), Some("retro"));

    let mut second = MockEventStream::empty();
    second.press(KeyCode::Enter);
    second.press_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
    let (_, render) = run(&fixture, Launch::Chooser { ui: None }, second).await;

    let transcript = render.transcript();
    assert!(transcript.contains("Saved choice: Retro"));
    assert!(transcript.contains("VIEW: ABOUT"));
}
