//! HandBrakeCLI engine tests against a fake engine script.
//!
//! The script is run through `/bin/sh` using `launcher_args`, the same way a
//! flatpak-installed HandBrakeCLI is started.
#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use discrip_core::{
    fetch_inventory, ConversionJob, Engine, EngineConfig, EngineError, Extractor,
    HandbrakeEngine, OutputNaming, TrackDescriptor, TrackFailure,
};

/// Fake HandBrakeCLI:
/// - `-t 0` prints a two-title scan report on stderr
/// - title 2 fails with status 3
/// - title 3 exits 0 without writing anything
/// - any other title writes its `-o` file
const FAKE_HANDBRAKE: &str = r#"
title=""
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    --version) echo "HandBrake 1.6.1"; exit 0 ;;
    -t) title="$2"; shift ;;
    -o) out="$2"; shift ;;
  esac
  shift
done

if [ "$title" = "0" ]; then
  echo "[10:00:00] scan: DVD has 2 title(s)" >&2
  echo "+ title 1:" >&2
  echo "  + duration: 01:02:00" >&2
  echo "+ title 2:" >&2
  echo "  + duration: 00:26:00" >&2
  exit 0
fi

if [ "$title" = "2" ]; then
  echo "Encode failed for title 2" >&2
  exit 3
fi

if [ "$title" = "3" ]; then
  exit 0
fi

printf 'fake video' > "$out"
echo "Encode done!"
"#;

const FAILING_SCAN: &str = r#"
echo "libdvdread: Can't open /nope for reading" >&2
exit 2
"#;

struct FakeEngine {
    _dir: TempDir,
    engine: HandbrakeEngine,
}

fn fake_engine(script: &str) -> FakeEngine {
    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("HandBrakeCLI.sh");
    std::fs::write(&script_path, script).unwrap();

    let config = EngineConfig::with_path("/bin/sh")
        .with_launcher_args(vec![script_path.to_string_lossy().into_owned()]);

    FakeEngine {
        _dir: dir,
        engine: HandbrakeEngine::new(config),
    }
}

#[tokio::test]
async fn test_validate_fake_engine() {
    let fake = fake_engine(FAKE_HANDBRAKE);
    fake.engine.validate().await.unwrap();
}

#[tokio::test]
async fn test_scan_captures_stderr_report() {
    let fake = fake_engine(FAKE_HANDBRAKE);

    let inventory = fetch_inventory(&fake.engine, Path::new("/media/DISC"))
        .await
        .unwrap();

    assert_eq!(
        inventory.tracks,
        vec![
            TrackDescriptor::new("1").with_runtime(62),
            TrackDescriptor::new("2").with_runtime(26),
        ]
    );
}

#[tokio::test]
async fn test_scan_failure_keeps_stderr() {
    let fake = fake_engine(FAILING_SCAN);

    let err = fake.engine.scan(Path::new("/nope")).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "engine exited with status 2: libdvdread: Can't open /nope for reading"
    );

    match err {
        EngineError::Exited { code, stderr } => {
            assert_eq!(code, Some(2));
            assert!(stderr.unwrap().contains("Can't open /nope"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_convert_writes_output() {
    let fake = fake_engine(FAKE_HANDBRAKE);
    let out = TempDir::new().unwrap();
    let output_path = out.path().join("title_1.mp4");

    let job = ConversionJob::new(
        TrackDescriptor::new("1"),
        "/media/DISC",
        &output_path,
        "High Profile",
    );
    fake.engine.convert(&job).await.unwrap();

    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "fake video");
}

#[tokio::test]
async fn test_convert_reports_exit_status() {
    let fake = fake_engine(FAKE_HANDBRAKE);
    let out = TempDir::new().unwrap();

    let job = ConversionJob::new(
        TrackDescriptor::new("2"),
        "/media/DISC",
        out.path().join("title_2.mp4"),
        "High Profile",
    );
    let err = fake.engine.convert(&job).await.unwrap_err();

    assert!(matches!(err, EngineError::Exited { code: Some(3), .. }));
}

#[tokio::test]
async fn test_batch_against_fake_engine() {
    let fake = fake_engine(FAKE_HANDBRAKE);
    let out = TempDir::new().unwrap();
    let source = PathBuf::from("/media/DISC");

    let extractor = Extractor::new(
        Arc::new(fake.engine),
        OutputNaming::new(out.path(), "mp4"),
        "High Profile",
    );
    let tracks: Vec<TrackDescriptor> = ["1", "2", "3"]
        .into_iter()
        .map(TrackDescriptor::new)
        .collect();

    let err = extractor.extract(&source, &tracks).await.unwrap_err();

    let mut failed = err.failed_track_ids();
    failed.sort();
    assert_eq!(failed, vec!["2", "3"]);

    for failure in err.failures() {
        match failure {
            TrackFailure::Engine { track_id, source } => {
                assert_eq!(track_id, "2");
                assert!(matches!(source, EngineError::Exited { code: Some(3), .. }));
            }
            TrackFailure::OutputMissing { track_id, output_path } => {
                assert_eq!(track_id, "3");
                assert_eq!(output_path, &out.path().join("High Profile_DISC_3.mp4"));
            }
            other => panic!("unexpected failure: {other}"),
        }
    }

    assert!(out.path().join("High Profile_DISC_1.mp4").exists());

    // Title 1 is now on disk, so a rerun skips it without invoking the engine.
    let report = extractor.extract(&source, &tracks[..1]).await.unwrap();
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.converted(), 0);
}
