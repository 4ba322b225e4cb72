//! Unit tests for CLI module
//!
//! Tests the command registry, formatting and actions against in-memory
//! players.

#![allow(clippy::unwrap_used)]

use std::{collections::HashMap, sync::Arc};

use zbus::zvariant::Value;

use crate::{
    cli::{
        CliError, CliService, CommandOutput, CommandRegistry,
        formatting::{format_candidates, format_track},
    },
    services::mpris::{
        Candidate, Interface, MprisError, PropertyValue, Session, Transport,
        testing::{MockTransport, Op, full_player},
    },
};

async fn session_for(transport: &Arc<MockTransport>) -> Session {
    full_player(transport, "vlc", "VLC media player");
    let session = Session::bind(Arc::clone(transport) as Arc<dyn Transport>, "vlc")
        .await
        .unwrap();
    transport.clear_ops();
    session
}

async fn run(session: &Session, action: &str, args: &[&str]) -> Result<CommandOutput, CliError> {
    let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
    CliService::new()
        .execute_command(session, action, &args)
        .await
}

fn calls(transport: &MockTransport) -> Vec<(Interface, String)> {
    transport
        .ops()
        .into_iter()
        .filter_map(|op| match op {
            Op::Call(interface, member, _) => Some((interface, member)),
            _ => None,
        })
        .collect()
}

#[test]
fn empty_registry_has_no_commands() {
    let registry = CommandRegistry::new();
    assert!(registry.list_commands().is_empty());
}

#[test]
fn every_action_is_registered() {
    let service = CliService::new();
    let names: Vec<String> = service
        .registry()
        .list_commands()
        .into_iter()
        .map(|m| m.name)
        .collect();

    for expected in [
        "play",
        "pause",
        "play_pause",
        "stop",
        "next",
        "previous",
        "is_playing",
        "get_current_track",
        "seek",
        "position",
        "open",
        "volume",
        "loop",
        "shuffle",
        "rate",
        "raise",
        "quit",
        "info",
        "tracks",
        "goto",
        "playlists",
        "activate_playlist",
        "watch",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
}

#[test]
fn listing_is_grouped_by_category() {
    let commands = CliService::new().registry().list_commands();
    let categories: Vec<&str> = commands.iter().map(|m| m.category.as_str()).collect();

    let mut sorted = categories.clone();
    sorted.sort_unstable();
    assert_eq!(categories, sorted);
}

#[test]
fn lookup_ignores_case() {
    let service = CliService::new();
    assert!(service.registry().resolve("PLAY", &[]).is_ok());
    assert!(service.registry().resolve("Get_Current_Track", &[]).is_ok());
}

#[test]
fn unknown_action_is_rejected_before_binding() {
    let service = CliService::new();
    let err = service.registry().resolve("dance", &[]).err().unwrap();

    assert!(matches!(err, CliError::CommandNotFound(ref name) if name == "dance"));
    assert!(err.to_string().starts_with("unknown command"));
}

#[test]
fn argument_count_is_checked() {
    let registry = CliService::new();
    let registry = registry.registry();

    assert!(matches!(
        registry.resolve("seek", &[]),
        Err(CliError::InvalidArguments(_))
    ));
    assert!(matches!(
        registry.resolve("play", &["now".to_string()]),
        Err(CliError::InvalidArguments(_))
    ));
    assert!(registry.resolve("volume", &[]).is_ok());
    assert!(registry.resolve("volume", &["0.3".to_string()]).is_ok());
}

#[test]
fn usage_lists_actions_with_descriptions() {
    let usage = CliService::new().usage("mpris-remote");

    assert!(usage.contains("where action is:"));
    assert!(usage.contains("play_pause"));
    assert!(usage.contains("Toggle between play and pause"));
    assert!(usage.contains("<offset>"));
    assert!(usage.contains("[level]"));
}

#[test]
fn usage_shows_argument_types_and_examples() {
    let usage = CliService::new().usage("mpris-remote");

    assert!(usage.contains("offset (number):"));
    assert!(usage.contains("Seconds to move, negative to go back"));
    assert!(usage.contains("e.g. \x1b[2mmpris-remote seek -10"));
    assert!(usage.contains("(on|off|toggle)"));
}

#[test]
fn track_line_marks_missing_fields_unknown() {
    assert_eq!(
        format_track(Some("Song"), Some("Album"), &["A".to_string(), "B".to_string()]),
        "\"Song\" on \"Album\" by A, B"
    );
    assert_eq!(
        format_track(None, None, &[]),
        "\"Unknown\" on \"Unknown\" by Unknown"
    );
}

#[test]
fn candidates_listing() {
    assert_eq!(format_candidates(&[]), "no player is available");

    let listing = format_candidates(&[Candidate {
        id: "vlc".to_string(),
        identity: "VLC media player".to_string(),
    }]);
    assert_eq!(listing, "Available player(s):\n- vlc : VLC media player");
}

#[tokio::test]
async fn play_starts_a_paused_player() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    let output = run(&session, "play", &[]).await.unwrap();

    assert_eq!(output, CommandOutput::Notice("Play".to_string()));
    assert_eq!(calls(&transport), vec![(Interface::Player, "Play".to_string())]);
}

#[tokio::test]
async fn play_leaves_a_playing_player_alone() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;
    transport.set(
        session.destination(),
        Interface::Player,
        "PlaybackStatus",
        Value::from("Playing"),
    );

    let output = run(&session, "play", &[]).await.unwrap();

    assert_eq!(output, CommandOutput::Notice("Play".to_string()));
    assert!(calls(&transport).is_empty());
}

#[tokio::test]
async fn pause_only_pauses_when_playing() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    run(&session, "pause", &[]).await.unwrap();
    assert!(calls(&transport).is_empty());

    transport.set(
        session.destination(),
        Interface::Player,
        "PlaybackStatus",
        Value::from("Playing"),
    );
    run(&session, "pause", &[]).await.unwrap();
    assert_eq!(calls(&transport), vec![(Interface::Player, "Pause".to_string())]);
}

#[tokio::test]
async fn play_pause_reports_resulting_status() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    let output = run(&session, "play_pause", &[]).await.unwrap();

    assert_eq!(output, CommandOutput::Notice("Paused".to_string()));
    assert_eq!(
        calls(&transport),
        vec![(Interface::Player, "PlayPause".to_string())]
    );
}

#[tokio::test]
async fn next_and_previous_notify() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    assert_eq!(
        run(&session, "next", &[]).await.unwrap(),
        CommandOutput::Notice("Next song".to_string())
    );
    assert_eq!(
        run(&session, "previous", &[]).await.unwrap(),
        CommandOutput::Notice("Previous song".to_string())
    );
}

#[tokio::test]
async fn is_playing_answers_with_status() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    assert_eq!(
        run(&session, "is_playing", &[]).await.unwrap(),
        CommandOutput::Status(false)
    );

    transport.set(
        session.destination(),
        Interface::Player,
        "PlaybackStatus",
        Value::from("Playing"),
    );
    assert_eq!(
        run(&session, "is_playing", &[]).await.unwrap(),
        CommandOutput::Status(true)
    );
}

#[tokio::test]
async fn current_track_comes_from_the_cache() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    let output = run(&session, "get_current_track", &[]).await.unwrap();

    assert_eq!(
        output,
        CommandOutput::Report("\"Song A\" on \"Album A\" by Artist A".to_string())
    );
    assert!(transport.ops().is_empty());
}

#[tokio::test]
async fn idle_player_reports_unknown_track() {
    let transport = MockTransport::new();
    let destination = full_player(&transport, "vlc", "VLC media player");
    transport.set(
        &destination,
        Interface::Player,
        "Metadata",
        Value::from(HashMap::<String, Value<'static>>::new()),
    );
    let session = Session::bind(Arc::clone(&transport) as Arc<dyn Transport>, "vlc")
        .await
        .unwrap();

    assert_eq!(
        run(&session, "get_current_track", &[]).await.unwrap(),
        CommandOutput::Report("\"Unknown\" on \"Unknown\" by Unknown".to_string())
    );
}

#[tokio::test]
async fn position_sets_absolute_offset_on_current_track() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    run(&session, "position", &["1:00"]).await.unwrap();

    assert!(transport.ops().contains(&Op::Call(
        Interface::Player,
        "SetPosition".to_string(),
        vec![
            PropertyValue::ObjectPath("/org/mpris/MediaPlayer2/Track/1".to_string()),
            PropertyValue::Int(60_000_000),
        ],
    )));
}

#[tokio::test]
async fn position_past_track_end_is_rejected() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    let err = run(&session, "position", &["10:00"]).await.err().unwrap();

    assert!(matches!(err, CliError::InvalidArgument { ref arg, .. } if arg == "position"));
    assert!(calls(&transport).is_empty());
}

#[tokio::test]
async fn position_without_argument_reports_progress() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    assert_eq!(
        run(&session, "position", &[]).await.unwrap(),
        CommandOutput::Report("0:42 / 3:35".to_string())
    );
}

#[tokio::test]
async fn volume_writes_fraction() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    let output = run(&session, "volume", &["75%"]).await.unwrap();

    assert_eq!(output, CommandOutput::Notice("Volume 75%".to_string()));
    assert!(transport.ops().contains(&Op::Set(
        Interface::Player,
        "Volume".to_string(),
        PropertyValue::Double(0.75),
    )));
}

#[tokio::test]
async fn shuffle_toggles_by_default() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    let output = run(&session, "shuffle", &[]).await.unwrap();

    assert_eq!(output, CommandOutput::Notice("Shuffle on".to_string()));
    assert_eq!(
        transport.property(session.destination(), Interface::Player, "Shuffle"),
        Some(PropertyValue::Bool(true))
    );
}

#[tokio::test]
async fn loop_accepts_any_case() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    run(&session, "loop", &["PLAYLIST"]).await.unwrap();

    assert_eq!(
        transport.property(session.destination(), Interface::Player, "LoopStatus"),
        Some(PropertyValue::Str("Playlist".to_string()))
    );
    assert!(run(&session, "loop", &["forever"]).await.is_err());
}

#[tokio::test]
async fn raise_is_skipped_when_unsupported() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    let output = run(&session, "raise", &[]).await.unwrap();

    assert!(matches!(output, CommandOutput::Report(_)));
    assert!(calls(&transport).is_empty());
}

#[tokio::test]
async fn goto_needs_a_track_list() {
    let transport = MockTransport::new();
    full_player(&transport, "vlc", "VLC media player");
    transport.set(
        "org.mpris.MediaPlayer2.vlc",
        Interface::Root,
        "HasTrackList",
        Value::from(false),
    );
    let session = Session::bind(Arc::clone(&transport) as Arc<dyn Transport>, "vlc")
        .await
        .unwrap();
    transport.clear_ops();

    let err = run(&session, "goto", &["/org/mpris/MediaPlayer2/Track/2"])
        .await
        .err()
        .unwrap();

    assert!(matches!(
        err,
        CliError::Player(MprisError::CapabilityUnavailable {
            interface: Interface::TrackList
        })
    ));
    assert!(calls(&transport).is_empty());
}

#[tokio::test]
async fn goto_passes_track_as_object_path() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    let output = run(&session, "goto", &["/org/mpris/MediaPlayer2/Track/2"])
        .await
        .unwrap();

    assert!(matches!(output, CommandOutput::Notice(_)));
    assert!(transport.ops().contains(&Op::Call(
        Interface::TrackList,
        "GoTo".to_string(),
        vec![PropertyValue::ObjectPath(
            "/org/mpris/MediaPlayer2/Track/2".to_string()
        )],
    )));
}

#[tokio::test]
async fn activate_playlist_calls_playlists_interface() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;

    run(&session, "activate_playlist", &["/org/mpris/MediaPlayer2/Playlist/1"])
        .await
        .unwrap();

    assert_eq!(
        calls(&transport),
        vec![(Interface::Playlists, "ActivatePlaylist".to_string())]
    );
}

#[tokio::test]
async fn watch_ends_when_connection_drops() {
    let transport = MockTransport::new();
    let session = session_for(&transport).await;
    transport.disconnect();

    let err = run(&session, "watch", &[]).await.err().unwrap();

    assert!(matches!(err, CliError::Player(MprisError::Disconnected)));
}
