//! Animation asset CLI Utility
//!
//! A command-line tool for checking character animation assets and replaying
//! playback against them.
//!
//! # Features
//!
//! - **scan**: Count idle and action frames of every subject under an asset root
//! - **inspect**: Parse and print the header of one frame file
//! - **simulate**: Run the animation engine over an SD card image for a virtual
//!   duration, optionally triggering actions, and print the ownership timeline
//!
//! # Usage
//!
//! ```bash
//! # Frame counts for every subject on a card
//! cargo run --example anim_utils scan /media/sdcard/diymon
//!
//! # Header of a single frame
//! cargo run --example anim_utils inspect /media/sdcard/diymon/0/ANIM_IDLE_1.bin
//!
//! # Ten virtual seconds of subject 1.1, eating at 2 s and attacking at 5 s
//! cargo run --example anim_utils simulate /media/sdcard -e 1.1 -a eat@2000 -a attack@5000
//! ```

use std::{
	fs,
	io::Read,
	path::PathBuf,
	time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use diymon_rs::prelude::*;
use log::{info, warn};
use serde::Serialize;
use walkdir::WalkDir;

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let config = EngineConfig::load(cli.config.as_deref())
		.with_context(|| "Cannot load engine configuration")?;

	match cli.command {
		Command::Scan(args) => run_scan(&config, args),
		Command::Inspect(args) => run_inspect(&config, args),
		Command::Simulate(args) => run_simulate(config, args),
	}
}

#[derive(Parser)]
#[command(name = "anim_utils")]
#[command(author = "diymon-rs project")]
#[command(version)]
#[command(about = "Check animation assets and simulate playback", long_about = None)]
struct Cli {
	/// TOML file with engine settings (DIYMON_* variables override it)
	#[arg(short, long, global = true, value_name = "FILE", env = "DIYMON_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Count frames per subject and animation under an asset root
	Scan(ScanArgs),
	/// Parse and print the header of a frame file
	Inspect(InspectArgs),
	/// Replay idle and action playback over a card image
	Simulate(SimulateArgs),
}

#[derive(Args)]
struct ScanArgs {
	/// Host directory holding one sub-directory per subject
	#[arg(value_name = "ROOT")]
	root: PathBuf,

	/// Print the report as JSON
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Args)]
struct InspectArgs {
	/// Path to a single frame file
	#[arg(value_name = "FILE")]
	file: PathBuf,
}

#[derive(Args)]
struct SimulateArgs {
	/// Host directory mounted as drive S:
	#[arg(value_name = "CARD")]
	card: PathBuf,

	/// Evolution code of the subject to play (defaults to the configured one)
	#[arg(short, long, value_name = "CODE")]
	evolution: Option<EvolutionCode>,

	/// Virtual time to simulate, in milliseconds
	#[arg(short, long, value_name = "MS", default_value_t = 10_000)]
	duration: u64,

	/// Clock step between observations, in milliseconds
	#[arg(long, value_name = "MS", default_value_t = 100)]
	step: u64,

	/// Action to trigger, as KIND@MS (e.g. eat@2000); may be repeated
	#[arg(short, long = "action", value_name = "KIND@MS", value_parser = parse_trigger)]
	actions: Vec<Trigger>,

	/// Print the timeline and statistics as JSON
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Debug, Clone, Copy)]
struct Trigger {
	at_ms: u64,
	kind: ActionKind,
}

fn parse_trigger(value: &str) -> Result<Trigger, String> {
	let (kind, at) = value.split_once('@').ok_or_else(|| format!("expected KIND@MS, got \"{value}\""))?;
	Ok(Trigger {
		kind: kind.parse().map_err(|e| format!("{e}"))?,
		at_ms: at.parse().map_err(|e| format!("invalid time \"{at}\": {e}"))?,
	})
}

// ---------------------------------------------------------------------------
// scan
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SubjectReport {
	directory: String,
	animations: Vec<AnimationReport>,
	/// Frame files whose size does not match the configured display
	mismatched: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AnimationReport {
	name: String,
	prefix: String,
	frames: usize,
}

fn run_scan(config: &EngineConfig, args: ScanArgs) -> Result<()> {
	if !args.root.is_dir() {
		bail!("{} is not a directory", args.root.display());
	}

	let store = FrameStore::from_config(FsStorage::new(), config);
	let expected_len = (config.header_size + config.descriptor().size()) as u64;

	let mut subjects = Vec::new();
	for entry in WalkDir::new(&args.root).min_depth(1).max_depth(1).sort_by_file_name() {
		let entry = entry?;
		if !entry.file_type().is_dir() {
			continue;
		}
		let dir = entry.path().to_string_lossy().into_owned();

		let mut animations = vec![AnimationReport {
			name: "idle".to_string(),
			prefix: config.idle_prefix.clone(),
			frames: store.count_frames(&dir, &config.idle_prefix),
		}];
		for kind in ActionKind::ALL {
			let prefix = config.prefixes.get(kind);
			animations.push(AnimationReport {
				name: kind.to_string(),
				prefix: prefix.to_string(),
				frames: store.count_frames(&dir, prefix),
			});
		}

		let mut mismatched = Vec::new();
		for file in WalkDir::new(entry.path()).min_depth(1).max_depth(1).sort_by_file_name() {
			let file = file?;
			let name = file.file_name().to_string_lossy();
			let is_frame = animations
				.iter()
				.any(|a| is_frame_file_name(&name, &a.prefix, &config.extension));
			if is_frame && file.metadata()?.len() != expected_len {
				mismatched.push(name.into_owned());
			}
		}

		subjects.push(SubjectReport {
			directory: dir,
			animations,
			mismatched,
		});
	}

	if args.json {
		println!("{}", serde_json::to_string_pretty(&subjects)?);
		return Ok(());
	}

	if subjects.is_empty() {
		println!("No subject directories under {}", args.root.display());
		return Ok(());
	}
	for subject in &subjects {
		println!("{}", subject.directory);
		for anim in &subject.animations {
			let mark = if anim.frames == 0 {
				"✗"
			} else {
				"✓"
			};
			println!("  {mark} {:<9} {:<12} {:>4} frame(s)", anim.name, anim.prefix, anim.frames);
		}
		for name in &subject.mismatched {
			println!("  ! {name}: expected {expected_len} bytes for {}", config.descriptor());
		}
	}
	Ok(())
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

fn run_inspect(config: &EngineConfig, args: InspectArgs) -> Result<()> {
	let file = fs::File::open(&args.file)
		.with_context(|| format!("Cannot open {}", args.file.display()))?;
	let file_len = file.metadata()?.len();

	let mut raw = Vec::with_capacity(FrameHeader::SIZE);
	file.take(FrameHeader::SIZE as u64).read_to_end(&mut raw)?;
	let header = FrameHeader::from_bytes(&raw)
		.with_context(|| format!("Invalid frame header in {}", args.file.display()))?;

	let payload_len = file_len.saturating_sub(FrameHeader::SIZE as u64);
	println!("File: {} (size: {file_len} bytes)", args.file.display());
	println!("{header}");
	println!("  Color format: {}", header.color_format());
	println!("  Flags:        {:#06x}", header.flags());
	println!("  Dimensions:   {}x{}", header.width(), header.height());
	println!("  Stride:       {} bytes", header.stride());
	println!("  Payload:      {payload_len} bytes (header announces {})", header.payload_size());

	let expected = config.descriptor();
	if (header.width(), header.height()) != (expected.width(), expected.height()) {
		warn!("Frame is {}x{}, the display is {expected}", header.width(), header.height());
	}
	if payload_len < expected.size() as u64 {
		warn!("Payload is {} bytes short of a full buffer", expected.size() as u64 - payload_len);
	}
	Ok(())
}

// ---------------------------------------------------------------------------
// simulate
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event {
	Owner {
		owner: Owner,
	},
	Action {
		kind: ActionKind,
		accepted: bool,
	},
	Drawn {
		marker: u8,
	},
	Shown,
	Hidden,
}

#[derive(Debug, Serialize)]
struct TimelineEntry {
	at_ms: u64,
	#[serde(flatten)]
	event: Event,
}

#[derive(Debug, Serialize)]
struct SimulationReport<'a> {
	directory: String,
	timeline: Vec<TimelineEntry>,
	stats: &'a PlaybackStats,
}

fn run_simulate(mut config: EngineConfig, args: SimulateArgs) -> Result<()> {
	if !args.card.is_dir() {
		bail!("{} is not a directory", args.card.display());
	}
	if args.step == 0 {
		bail!("step must be greater than zero");
	}
	if let Some(code) = args.evolution {
		config.evolution = code;
	}

	let storage = FsStorage::new().with_drive('S', &args.card);
	let mut engine = AnimationEngine::new(config, storage, RecordingRenderer::new());
	if !engine.is_enabled() {
		bail!("Frame buffer could not be allocated, see the log");
	}

	let directory = engine.subject().directory();
	info!("Simulating {} ms of {directory}", args.duration);

	let mut triggers = args.actions;
	triggers.sort_by_key(|t| t.at_ms);
	let mut triggers = triggers.into_iter().peekable();

	let mut timeline = Vec::new();
	let mut last_owner = engine.owner();
	engine.idle_start_subject();

	loop {
		let now = engine.now().as_millis() as u64;
		while let Some(trigger) = triggers.next_if(|t| t.at_ms <= now) {
			let accepted = engine.action_play(trigger.kind);
			timeline.push(TimelineEntry {
				at_ms: now,
				event: Event::Action {
					kind: trigger.kind,
					accepted,
				},
			});
			record(&mut engine, &mut timeline, &mut last_owner, now);
		}
		record(&mut engine, &mut timeline, &mut last_owner, now);

		if now >= args.duration {
			break;
		}
		engine.advance(Duration::from_millis(args.step.min(args.duration - now)));
	}

	let report = SimulationReport {
		directory,
		timeline,
		stats: engine.stats(),
	};
	if args.json {
		println!("{}", serde_json::to_string_pretty(&report)?);
	} else {
		print_report(&report);
	}
	Ok(())
}

/// Moves the renderer log and any owner change onto the timeline.
fn record(
	engine: &mut AnimationEngine<FsStorage, RecordingRenderer>,
	timeline: &mut Vec<TimelineEntry>,
	last_owner: &mut Owner,
	at_ms: u64,
) {
	for event in engine.renderer_mut().take_events() {
		let event = match event {
			RenderEvent::Attached(_) => continue,
			RenderEvent::Drawn {
				marker,
			} => Event::Drawn {
				marker,
			},
			RenderEvent::Shown => Event::Shown,
			RenderEvent::Hidden => Event::Hidden,
		};
		timeline.push(TimelineEntry {
			at_ms,
			event,
		});
	}

	let owner = engine.owner();
	if owner != *last_owner {
		*last_owner = owner;
		timeline.push(TimelineEntry {
			at_ms,
			event: Event::Owner {
				owner,
			},
		});
	}
}

fn print_report(report: &SimulationReport<'_>) {
	println!("Subject: {}", report.directory);
	for entry in &report.timeline {
		let what = match &entry.event {
			Event::Owner {
				owner,
			} => format!("owner -> {owner}"),
			Event::Action {
				kind,
				accepted: true,
			} => format!("play {kind}"),
			Event::Action {
				kind,
				accepted: false,
			} => format!("play {kind} (rejected)"),
			Event::Drawn {
				marker,
			} => format!("frame {marker:#04x}"),
			Event::Shown => "show".to_string(),
			Event::Hidden => "hide".to_string(),
		};
		println!("  {:>7} ms  {what}", entry.at_ms);
	}

	let s = report.stats;
	println!(
		"Frames loaded: {} | load failures: {} | idle ticks: {} | idle resumes: {}",
		s.frames_loaded, s.load_failures, s.idle_ticks, s.idle_resumes
	);
	println!(
		"Actions played: {} | completed: {} | empty: {} | aborted: {} | rejected: {}",
		s.actions_played, s.actions_completed, s.actions_empty, s.actions_aborted, s.actions_rejected
	);
}
