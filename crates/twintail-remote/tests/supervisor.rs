//! Integration tests for the link supervisor lifecycle.

mod common;

use common::{FakeGauge, FakeLink};
use embassy_futures::block_on;
use embassy_time::{Duration, Instant};
use twintail_bluefruit::{
    Button,
    packet::{encode_button, encode_color},
};
use twintail_composer::{
    AnimationMode, Brightness, ControlsSnapshot, SharedControls,
    color::{RED, TEAL},
};
use twintail_remote::{BatterySampler, LinkState, LinkSupervisor, buttons::ANIMATIONS};

fn controls() -> SharedControls {
    SharedControls::new(ControlsSnapshot::initial(AnimationMode::Revolve, RED))
}

fn step<G: twintail_remote::FuelGauge>(supervisor: &mut LinkSupervisor<'_, FakeLink, G>) -> LinkState {
    block_on(supervisor.step())
}

fn connect<G: twintail_remote::FuelGauge>(supervisor: &mut LinkSupervisor<'_, FakeLink, G>) {
    supervisor.link_mut().connected = true;
    assert_eq!(step(supervisor), LinkState::Connected);
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

#[test]
fn advertises_once_until_connected() {
    let controls = controls();
    let mut supervisor = LinkSupervisor::new(FakeLink::default(), &controls, &ANIMATIONS);

    assert_eq!(step(&mut supervisor), LinkState::Advertising);
    assert_eq!(step(&mut supervisor), LinkState::Advertising);
    assert_eq!(supervisor.link().advertise_calls, 1);

    connect(&mut supervisor);
}

#[test]
fn failed_advertise_waits_before_retrying() {
    let controls = controls();
    let link = FakeLink {
        fail_advertise: true,
        ..FakeLink::default()
    };
    let mut supervisor = LinkSupervisor::new(link, &controls, &ANIMATIONS);

    for _ in 0..5 {
        assert_eq!(step(&mut supervisor), LinkState::Advertising);
    }
    assert_eq!(supervisor.link().advertise_calls, 1);
}

#[test]
fn failed_advertise_is_retried_after_delay() {
    let controls = controls();
    let link = FakeLink {
        fail_advertise: true,
        ..FakeLink::default()
    };
    let mut supervisor = LinkSupervisor::new(link, &controls, &ANIMATIONS)
        .with_advertise_retry(Duration::from_millis(20));

    step(&mut supervisor);
    step(&mut supervisor);
    assert_eq!(supervisor.link().advertise_calls, 1);

    supervisor.link_mut().fail_advertise = false;
    std::thread::sleep(std::time::Duration::from_millis(30));
    step(&mut supervisor);
    assert_eq!(supervisor.link().advertise_calls, 2);

    // Advertising succeeded, no further calls
    std::thread::sleep(std::time::Duration::from_millis(30));
    step(&mut supervisor);
    assert_eq!(supervisor.link().advertise_calls, 2);
}

#[test]
fn connection_during_backoff_is_accepted() {
    let controls = controls();
    let link = FakeLink {
        fail_advertise: true,
        ..FakeLink::default()
    };
    let mut supervisor = LinkSupervisor::new(link, &controls, &ANIMATIONS);

    step(&mut supervisor);
    connect(&mut supervisor);
    assert_eq!(supervisor.link().advertise_calls, 1);
}

#[test]
fn one_command_per_step() {
    let controls = controls();
    let mut supervisor = LinkSupervisor::new(FakeLink::default(), &controls, &ANIMATIONS);
    connect(&mut supervisor);

    supervisor.link_mut().push(&encode_button(Button::Four, true));
    supervisor.link_mut().push(&encode_button(Button::Four, false));
    supervisor.link_mut().push(&encode_button(Button::Right, true));

    step(&mut supervisor);
    assert_eq!(controls.mode(), AnimationMode::Rainbow);
    assert_eq!(controls.speed().get(), 1);

    // Release has no effect
    step(&mut supervisor);
    assert_eq!(controls.speed().get(), 1);

    step(&mut supervisor);
    assert_eq!(controls.speed().get(), 2);
    assert_eq!(supervisor.state(), LinkState::Connected);
}

#[test]
fn idle_connection_keeps_polling() {
    let controls = controls();
    let mut supervisor = LinkSupervisor::new(FakeLink::default(), &controls, &ANIMATIONS);
    connect(&mut supervisor);

    for _ in 0..10 {
        assert_eq!(step(&mut supervisor), LinkState::Connected);
    }
    assert_eq!(controls.snapshot(), ControlsSnapshot::initial(AnimationMode::Revolve, RED));
}

#[test]
fn reconnection_keeps_controls() {
    let controls = controls();
    let mut supervisor = LinkSupervisor::new(FakeLink::default(), &controls, &ANIMATIONS);
    connect(&mut supervisor);

    supervisor.link_mut().push(&encode_button(Button::Down, true));
    supervisor.link_mut().push(&encode_button(Button::Down, true));
    supervisor.link_mut().push(&encode_color(TEAL));
    for _ in 0..3 {
        step(&mut supervisor);
    }
    assert_eq!(controls.brightness(), Brightness::from_percent(40));
    assert_eq!(controls.color(), TEAL);

    supervisor.link_mut().connected = false;
    assert_eq!(step(&mut supervisor), LinkState::Advertising);
    step(&mut supervisor);
    assert_eq!(supervisor.link().advertise_calls, 2);

    connect(&mut supervisor);
    let snapshot = controls.snapshot();
    assert_eq!(snapshot.brightness, Brightness::from_percent(40));
    assert_eq!(snapshot.color, TEAL);
    assert_eq!(snapshot.mode, AnimationMode::Revolve);
    assert_eq!(snapshot.speed.get(), 1);
}

#[test]
fn disconnect_mid_packet_drops_partial_packet() {
    let controls = controls();
    let mut supervisor = LinkSupervisor::new(FakeLink::default(), &controls, &ANIMATIONS);
    connect(&mut supervisor);

    let packet = encode_button(Button::One, true);
    supervisor.link_mut().push(&packet[..3]);

    // Read is interrupted by the disconnect
    assert_eq!(step(&mut supervisor), LinkState::Connected);
    assert_eq!(step(&mut supervisor), LinkState::Advertising);

    connect(&mut supervisor);
    supervisor.link_mut().push(&packet[3..]);
    step(&mut supervisor);
    assert_eq!(controls.mode(), AnimationMode::Revolve);
}

#[test]
fn unknown_packet_leaves_state_and_next_packet_applies() {
    let controls = controls();
    let mut supervisor = LinkSupervisor::new(FakeLink::default(), &controls, &ANIMATIONS);
    connect(&mut supervisor);

    supervisor.link_mut().push(b"!Xjunk");
    supervisor.link_mut().push(&encode_button(Button::Three, true));

    step(&mut supervisor);
    assert_eq!(controls.snapshot(), ControlsSnapshot::initial(AnimationMode::Revolve, RED));

    step(&mut supervisor);
    assert_eq!(controls.mode(), AnimationMode::Wipe);
}

// -----------------------------------------------------------------------------
// Telemetry
// -----------------------------------------------------------------------------

#[test]
fn publishes_only_while_connected_with_telemetry() {
    let controls = controls();
    let sampler = BatterySampler::new(FakeGauge::new(Ok(57)), Instant::from_secs(0));
    let mut supervisor =
        LinkSupervisor::new(FakeLink::default(), &controls, &ANIMATIONS).with_telemetry(sampler);

    step(&mut supervisor);
    assert!(supervisor.link().published.is_empty());

    connect(&mut supervisor);
    step(&mut supervisor);
    let published = &supervisor.link().published;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].speed, 1);
    assert!(published[0].battery_percent.is_some());
}

#[test]
fn no_telemetry_publishes_nothing() {
    let controls = controls();
    let mut supervisor = LinkSupervisor::new(FakeLink::default(), &controls, &ANIMATIONS);
    connect(&mut supervisor);
    step(&mut supervisor);
    assert!(supervisor.link().published.is_empty());
}
