use std::time::Duration;

use diymon_rs::prelude::*;

use crate::fixture::Card;

fn secs(v: f32) -> Duration {
	Duration::from_secs_f32(v)
}

#[test_log::test]
fn test_idle_and_actions_share_the_buffer() {
	let card = Card::new();
	card.frames("0", "ANIM_IDLE_", 4, 0);
	card.frames("0", "ANIM_EAT_", 3, 0x20);
	card.frames("0", "ANIM_ATK_", 2, 0x40);
	let mut engine = card.engine();

	assert!(engine.is_enabled());
	assert!(engine.idle_start_subject());
	engine.advance(secs(3.0));

	assert!(engine.action_play(ActionKind::Eat));
	assert!(!engine.action_play(ActionKind::Attack));
	engine.advance(secs(1.5));
	assert_eq!(engine.owner(), Owner::Idle);

	assert!(engine.action_play(ActionKind::Attack));
	engine.advance(secs(1.0));
	assert!(!engine.is_action_in_progress());

	// no gym frames on the card: finishes at once, idle repaints
	assert!(engine.action_play(ActionKind::Exercise));
	assert!(!engine.is_action_in_progress());

	assert_eq!(
		engine.renderer().drawn(),
		[0, 1, 2, 0x20, 0x21, 0x22, 2, 0x40, 0x41, 2, 2]
	);
	assert_eq!(engine.pixels().map(|p| p[0]), Some(2));

	let stats = *engine.stats();
	assert_eq!(stats.actions_played, 3);
	assert_eq!(stats.actions_rejected, 1);
	assert_eq!(stats.actions_completed, 2);
	assert_eq!(stats.actions_empty, 1);
	assert_eq!(stats.idle_resumes, 3);
	assert_eq!(stats.load_failures, 0);
}

#[test_log::test]
fn test_truncated_idle_frame_is_skipped() {
	let card = Card::new();
	card.frames("0", "ANIM_IDLE_", 3, 0x10);
	card.corrupt("0", "ANIM_IDLE_", 1, &[0x19, 0x14]);
	let mut engine = card.engine();

	engine.idle_start_subject();
	engine.advance(secs(4.5));

	assert_eq!(engine.renderer().drawn(), [0x10, 0x12, 0x10]);
	assert_eq!(engine.stats().load_failures, 1);
	assert_eq!(engine.idle().state(), IdleState::Running);
}

#[test_log::test]
fn test_evolution_walks_subject_directories() {
	let card = Card::new();
	card.frames("0", "ANIM_IDLE_", 1, 0x00);
	card.frames("1", "ANIM_IDLE_", 1, 0x10);
	card.frames("1.1", "ANIM_IDLE_", 1, 0x20);
	card.frames("1.1.1", "ANIM_IDLE_", 1, 0x30);
	let mut engine = card.engine();
	engine.idle_start_subject();

	let mut code = engine.subject().code().clone();
	while let Some(next) = code.next() {
		assert!(engine.set_subject(next.clone()), "no idle frames for {next}");
		code = next;
	}

	assert_eq!(engine.subject().directory(), "S:/diymon/111");
	assert_eq!(engine.renderer().drawn(), [0x00, 0x10, 0x20, 0x30]);
	assert!(engine.renderer().is_visible());
}

#[test_log::test]
fn test_missing_card_keeps_character_hidden() {
	let card = Card::new();
	let mut engine = card.engine();

	assert!(!engine.idle_start_subject());
	for kind in ActionKind::ALL {
		assert!(engine.action_play(kind));
	}
	assert_eq!(engine.owner(), Owner::None);
	assert!(!engine.renderer().is_visible());
	assert_eq!(engine.stats().actions_empty, 3);
}

#[test_log::test]
fn test_oversized_buffer_disables_playback() {
	let card = Card::new();
	card.frames("0", "ANIM_IDLE_", 2, 0);
	let config = EngineConfig {
		max_buffer_bytes: Some(16),
		..card.config()
	};
	let mut engine = AnimationEngine::new(config, card.storage(), RecordingRenderer::new());

	assert!(!engine.is_enabled());
	assert!(!engine.idle_start_subject());
	assert!(!engine.action_play(ActionKind::Eat));
	assert_eq!(engine.owner(), Owner::None);
	assert_eq!(*engine.stats(), PlaybackStats::default());
}

#[test_log::test]
fn test_stats_serialize() {
	let card = Card::new();
	card.frames("0", "ANIM_IDLE_", 2, 0);
	let mut engine = card.engine();
	engine.idle_start_subject();
	engine.advance(secs(1.5));

	let json = serde_json::to_value(engine.stats()).unwrap();
	assert_eq!(json["frames_loaded"], 2);
	assert_eq!(json["idle_ticks"], 1);
}
