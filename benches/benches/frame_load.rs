//! Benchmark suite for frame discovery and loading
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use diymon_anim::FrameStore;
use diymon_benches::{SUBJECT_DIR, generate_card};
use diymon_types::{
	action::IDLE_PREFIX,
	frame::{BufferDescriptor, DEFAULT_EXTENSION, HEADER_SIZE},
};

/// Directory scans with a growing number of entries
fn bench_count_frames(c: &mut Criterion) {
	let mut group = c.benchmark_group("count_frames");

	for (frames, noise) in [(8, 0), (32, 32), (128, 256)] {
		let store = FrameStore::new(generate_card(1, 1, frames, noise), HEADER_SIZE, DEFAULT_EXTENSION);
		group.throughput(Throughput::Elements((frames + noise) as u64));
		group.bench_with_input(
			BenchmarkId::from_parameter(format!("{frames}+{noise}")),
			&store,
			|b, store| {
				b.iter(|| black_box(store.count_frames(black_box(SUBJECT_DIR), IDLE_PREFIX)));
			},
		);
	}

	group.finish();
}

/// Full-screen frame reads at the device resolution and a larger panel
fn bench_load_frame(c: &mut Criterion) {
	let mut group = c.benchmark_group("load_frame");

	for (width, height) in [(170u16, 320u16), (240, 240), (320, 480)] {
		let desc = BufferDescriptor::new(width, height);
		let store = FrameStore::new(generate_card(width, height, 4, 0), HEADER_SIZE, DEFAULT_EXTENSION);
		let mut dst = vec![0u8; desc.size()];

		group.throughput(Throughput::Bytes(desc.size() as u64));
		group.bench_function(BenchmarkId::from_parameter(format!("{width}x{height}")), |b| {
			let mut index = 0;
			b.iter(|| {
				index = (index + 1) % 4;
				let result = store.read_frame_into(&mut dst, SUBJECT_DIR, IDLE_PREFIX, index);
				black_box(result.is_ok())
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_count_frames, bench_load_frame);
criterion_main!(benches);
