#![allow(clippy::unwrap_used)]
//! Benchmarks for configuration serialization and deserialization

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use launchdeck::config::{AppConfig, ConfigManager, GameRecord, ManagedAppRecord, Platform};
use std::hint::black_box;
use std::path::PathBuf;

fn create_large_config() -> AppConfig {
    let mut config = AppConfig::default();

    // 100 games and 20 companion apps simulate a heavy configuration.
    for i in 0..20 {
        config
            .managed_apps
            .insert(
                format!("app{i}"),
                ManagedAppRecord {
                    display_name: format!("Companion app {i}"),
                    exe_path: PathBuf::from(format!("C:\\Tools\\app{i}\\app.exe")),
                    process_name: format!("app{i}"),
                    ..ManagedAppRecord::default()
                },
            )
            .unwrap();
    }
    for i in 0..100 {
        config
            .games
            .insert(
                format!("game{i}"),
                GameRecord {
                    display_name: format!("Test game {i}"),
                    platform: Platform::Steam,
                    exe_path: PathBuf::from(format!("C:\\Games\\Game{i}\\game.exe")),
                    process_names: vec![format!("game{i}")],
                    managed_apps: vec![format!("app{}", i % 20)],
                    ..GameRecord::default()
                },
            )
            .unwrap();
    }

    config
}

fn bench_config_serialization(c: &mut Criterion) {
    let config = create_large_config();

    c.bench_function("config_serialize_pretty", |b| {
        b.iter(|| {
            let json = ConfigManager::to_json_pretty(black_box(&config)).unwrap();
            black_box(json);
        });
    });
}

fn bench_config_deserialization(c: &mut Criterion) {
    let config = create_large_config();
    let json = ConfigManager::to_json_pretty(&config).unwrap();

    c.bench_function("config_deserialize", |b| {
        b.iter(|| {
            let deserialized = ConfigManager::parse(black_box(&json)).unwrap();
            black_box(deserialized);
        });
    });
}

fn bench_config_round_trip(c: &mut Criterion) {
    let config = create_large_config();

    c.bench_function("config_round_trip", |b| {
        b.iter(|| {
            let json = ConfigManager::to_json_pretty(black_box(&config)).unwrap();
            let deserialized = ConfigManager::parse(&json).unwrap();
            black_box(deserialized);
        });
    });
}

criterion_group!(
    benches,
    bench_config_serialization,
    bench_config_deserialization,
    bench_config_round_trip
);
criterion_main!(benches);
