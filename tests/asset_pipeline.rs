//! End-to-end checks: resize a source set, then run both validation modes
//! over the result.

use std::fs;
use std::path::{Path, PathBuf};

use image::{GenericImageView, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

use witch_assets::cli::validate::{self, ValidateArgs};
use witch_assets::cli::verify::{self, VerifyArgs};
use witch_assets::cli::{Format, ProjectArgs};
use witch_assets::output::Printer;
use witch_assets::{
    resize_all, validate_all, verify_roles, Config, Finding, Manifest, TierTable, WitchError,
};

const TEST_WITCH: &str = r#"{
    "witchImages": {
        "TestWitch": [
            {"filename": "TW01", "group": 1, "easy_path": "99sized", "medium_path": "124sized", "hard_path": "166sized"}
        ]
    }
}"#;

/// A scratch game directory with tier folders and a manifest.
struct Game {
    dir: TempDir,
}

impl Game {
    fn new(manifest: &str) -> Self {
        let dir = tempdir().unwrap();
        for tier in TierTable::default().iter() {
            fs::create_dir_all(tier.dir(&dir.path().join("assets"))).unwrap();
        }
        fs::create_dir_all(dir.path().join("json")).unwrap();
        fs::write(dir.path().join("json/witchesImages.json"), manifest).unwrap();
        Self { dir }
    }

    fn assets(&self) -> PathBuf {
        self.dir.path().join("assets")
    }

    fn manifest_path(&self) -> PathBuf {
        self.dir.path().join("json/witchesImages.json")
    }

    fn manifest(&self) -> Manifest {
        Manifest::load(&self.manifest_path()).unwrap()
    }

    fn source(&self, name: &str, w: u32, h: u32) {
        RgbaImage::from_pixel(w, h, Rgba([80, 0, 120, 255]))
            .save(self.assets().join(name))
            .unwrap();
    }

    fn tile(&self, folder: &str, name: &str, w: u32, h: u32) {
        RgbaImage::from_pixel(w, h, Rgba([80, 0, 120, 255]))
            .save(self.assets().join(folder).join(name))
            .unwrap();
    }

    fn resize(&self) -> witch_assets::ResizeReport {
        resize_all(
            &self.assets(),
            "png",
            &self.assets(),
            &TierTable::default(),
            &Printer::quiet(),
        )
        .unwrap()
    }

    fn project_args(&self) -> ProjectArgs {
        ProjectArgs {
            config: None,
            assets: Some(self.assets()),
            manifest: Some(self.manifest_path()),
        }
    }
}

fn exempt() -> Vec<String> {
    Config::default().exempt_files()
}

fn dimensions(path: &Path) -> (u32, u32) {
    image::open(path).unwrap().dimensions()
}

#[test]
fn resized_tiles_are_square_regardless_of_source_aspect() {
    let game = Game::new(TEST_WITCH);
    game.source("TW01.png", 320, 180);

    let report = game.resize();
    assert_eq!(report.attempted, 1);
    assert_eq!(report.converted, 1);

    assert_eq!(dimensions(&game.assets().join("99sized/TW01_99.png")), (99, 99));
    assert_eq!(dimensions(&game.assets().join("124sized/TW01_124.png")), (124, 124));
    assert_eq!(dimensions(&game.assets().join("166sized/TW01_166.png")), (166, 166));
}

#[test]
fn resizing_twice_overwrites_without_accumulating() {
    let game = Game::new(TEST_WITCH);
    game.source("TW01.png", 50, 70);

    game.resize();
    let second = game.resize();
    assert_eq!(second.converted, 1);

    for tier in TierTable::default().iter() {
        let entries: Vec<_> = fs::read_dir(tier.dir(&game.assets())).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            dimensions(&tier.path(&game.assets(), "TW01")),
            (tier.size, tier.size)
        );
    }
}

#[test]
fn resized_set_passes_both_validators() {
    let game = Game::new(TEST_WITCH);
    game.source("TW01.png", 200, 200);
    game.resize();

    let manifest = game.manifest();
    let tiers = TierTable::default();

    let verified = verify_roles(&manifest, &game.assets(), &tiers, &Printer::quiet());
    assert_eq!(verified.entries, 1);
    assert_eq!(verified.files_checked, 3);
    assert_eq!(verified.correct, 3);
    assert!(verified.findings.is_empty());

    let full = validate_all(&manifest, &game.assets(), &tiers, &exempt(), &Printer::quiet());
    assert_eq!(full.coverage.expected, 3);
    assert_eq!(full.coverage.found, 3);
    assert_eq!(full.coverage.missing_count(), 0);
    // The source image sits in the assets root, not a tier folder
    assert_eq!(full.orphans.orphan_count(), 0);
}

#[test]
fn deleting_a_tile_yields_one_missing_finding() {
    let game = Game::new(TEST_WITCH);
    game.source("TW01.png", 200, 200);
    game.resize();

    let manifest = game.manifest();
    let tiers = TierTable::default();
    let before = verify_roles(&manifest, &game.assets(), &tiers, &Printer::quiet());

    let removed = game.assets().join("124sized/TW01_124.png");
    fs::remove_file(&removed).unwrap();
    let after = verify_roles(&manifest, &game.assets(), &tiers, &Printer::quiet());

    assert_eq!(after.missing_count(), 1);
    assert_eq!(after.correct, before.correct - 1);
    match after.findings.missing().next().unwrap() {
        Finding::Missing {
            character, path, tier, ..
        } => {
            assert_eq!(character, "TestWitch");
            assert_eq!(path, &removed);
            assert_eq!(tier, "124sized");
        }
        other => panic!("unexpected finding: {other:?}"),
    };
}

#[test]
fn wrong_dimensions_yield_one_wrong_size_finding() {
    let game = Game::new(TEST_WITCH);
    game.tile("99sized", "TW01_99.png", 99, 99);
    game.tile("124sized", "TW01_124.png", 124, 124);
    game.tile("166sized", "TW01_166.png", 124, 124);

    let report = verify_roles(
        &game.manifest(),
        &game.assets(),
        &TierTable::default(),
        &Printer::quiet(),
    );

    assert_eq!(report.wrong_size_count(), 1);
    assert_eq!(report.missing_count(), 0);
    let finding = report.findings.wrong_size().next().unwrap();
    assert_eq!(
        finding.to_string(),
        format!(
            "TestWitch: {} is 124x124, expected 166x166",
            game.assets().join("166sized/TW01_166.png").display()
        )
    );
}

#[test]
fn orphan_appears_and_disappears() {
    let game = Game::new(TEST_WITCH);
    game.source("TW01.png", 100, 100);
    game.resize();
    game.tile("124sized", "_bombTile_124.png", 124, 124);
    game.tile("124sized", "Morgana01_124.png", 124, 124);

    let manifest = game.manifest();
    let tiers = TierTable::default();

    let report = validate_all(&manifest, &game.assets(), &tiers, &exempt(), &Printer::quiet());
    let orphans: Vec<String> = report
        .orphans
        .findings_in("124sized")
        .iter()
        .map(|f| f.to_string())
        .collect();
    assert_eq!(orphans, vec!["124sized/Morgana01_124.png is not listed"]);
    assert_eq!(report.orphans.orphan_count(), 1);

    fs::remove_file(game.assets().join("124sized/Morgana01_124.png")).unwrap();
    let report = validate_all(&manifest, &game.assets(), &tiers, &exempt(), &Printer::quiet());
    assert_eq!(report.orphans.orphan_count(), 0);
}

#[test]
fn missing_tier_folder_is_skipped_for_orphans() {
    let game = Game::new(TEST_WITCH);
    fs::remove_dir(game.assets().join("166sized")).unwrap();

    let report = validate_all(
        &game.manifest(),
        &game.assets(),
        &TierTable::default(),
        &exempt(),
        &Printer::quiet(),
    );

    let scanned: Vec<(&str, bool)> = report
        .orphans
        .folders
        .iter()
        .map(|f| (f.tier.as_str(), f.scanned))
        .collect();
    assert_eq!(
        scanned,
        vec![("99sized", true), ("124sized", true), ("166sized", false)]
    );
    assert_eq!(report.coverage.missing_count(), 3);
}

#[test]
fn verify_command_passes_on_complete_set() {
    let game = Game::new(TEST_WITCH);
    game.source("TW01.png", 64, 64);
    game.resize();

    let args = VerifyArgs {
        project: game.project_args(),
        format: Format::Text,
    };
    verify::run(args, &Printer::quiet()).unwrap();
}

#[test]
fn verify_command_fails_on_missing_tile() {
    let game = Game::new(TEST_WITCH);
    game.tile("99sized", "TW01_99.png", 99, 99);

    let args = VerifyArgs {
        project: game.project_args(),
        format: Format::Text,
    };
    let err = verify::run(args, &Printer::quiet()).unwrap_err();
    assert!(matches!(err, WitchError::Validation { .. }));
    assert!(err.to_string().contains("2 missing"));
}

#[test]
fn validate_command_fails_on_missing_manifest() {
    let game = Game::new(TEST_WITCH);
    fs::remove_file(game.manifest_path()).unwrap();

    let args = ValidateArgs {
        project: game.project_args(),
        format: Format::Text,
    };
    let err = validate::run(args, &Printer::quiet()).unwrap_err();
    match err {
        WitchError::Manifest { message, .. } => assert_eq!(message, "Could not find manifest"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_manifest_aborts_before_scanning() {
    let game = Game::new("{ \"witchImages\": [");

    let args = VerifyArgs {
        project: game.project_args(),
        format: Format::Text,
    };
    let err = verify::run(args, &Printer::quiet()).unwrap_err();
    match err {
        WitchError::Manifest { message, path, .. } => {
            assert!(message.starts_with("Invalid JSON format"));
            assert_eq!(path, game.manifest_path());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn config_file_moves_the_layout() {
    let game = Game::new(TEST_WITCH);
    let config_path = game.dir.path().join("witch-assets.yaml");
    fs::write(
        &config_path,
        "assets: tiles\ntiers:\n  - folder: tiny\n    size: 16\n",
    )
    .unwrap();
    fs::create_dir_all(game.dir.path().join("tiles/tiny")).unwrap();
    RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]))
        .save(game.dir.path().join("tiles/tiny/TW01_16.png"))
        .unwrap();

    let args = ValidateArgs {
        project: ProjectArgs {
            config: Some(config_path),
            assets: None,
            manifest: None,
        },
        format: Format::Text,
    };
    validate::run(args, &Printer::quiet()).unwrap();
}

const MIXED_ROLES: &str = r#"{
    "witchImages": {
        "TestWitch": [
            {"filename": "TW01", "group": 1, "easy_path": "99sized", "medium_path": "166sized", "hard_path": "200sized"}
        ]
    }
}"#;

#[test]
fn verify_json_report_itemizes_every_finding() {
    let game = Game::new(MIXED_ROLES);
    game.tile("166sized", "TW01_166.png", 150, 150);

    let report = verify_roles(
        &game.manifest(),
        &game.assets(),
        &TierTable::default(),
        &Printer::quiet(),
    );

    insta::assert_json_snapshot!(report, { ".findings[].path" => "[path]" }, @r###"
    {
      "entries": 1,
      "files_checked": 2,
      "correct": 0,
      "findings": [
        {
          "kind": "missing",
          "character": "TestWitch",
          "filename": "TW01",
          "group": 1,
          "path": "[path]",
          "tier": "99sized"
        },
        {
          "kind": "wrong-size",
          "character": "TestWitch",
          "path": "[path]",
          "tier": "166sized",
          "expected": {
            "width": 166,
            "height": 166
          },
          "actual": {
            "width": 150,
            "height": 150
          }
        },
        {
          "kind": "unknown-role",
          "character": "TestWitch",
          "filename": "TW01",
          "role": "hard",
          "token": "200sized"
        }
      ]
    }
    "###);
}

#[test]
fn validate_json_report_itemizes_missing_and_orphans() {
    let game = Game::new(TEST_WITCH);
    game.tile("99sized", "TW01_99.png", 99, 99);
    game.tile("166sized", "TW01_166.png", 166, 166);
    game.tile("166sized", "stray_166.png", 166, 166);

    let report = validate_all(
        &game.manifest(),
        &game.assets(),
        &TierTable::default(),
        &exempt(),
        &Printer::quiet(),
    );

    insta::assert_json_snapshot!(report, { ".coverage.findings[].path" => "[path]" }, @r###"
    {
      "coverage": {
        "entries": 1,
        "expected": 3,
        "found": 2,
        "complete_entries": 0,
        "findings": [
          {
            "kind": "missing",
            "character": "TestWitch",
            "filename": "TW01",
            "group": 1,
            "path": "[path]",
            "tier": "124sized"
          }
        ]
      },
      "orphans": {
        "folders": [
          {
            "tier": "99sized",
            "scanned": true,
            "orphans": []
          },
          {
            "tier": "124sized",
            "scanned": true,
            "orphans": []
          },
          {
            "tier": "166sized",
            "scanned": true,
            "orphans": [
              "stray_166.png"
            ]
          }
        ]
      }
    }
    "###);
}

#[test]
fn json_format_keeps_the_failing_verdict() {
    let game = Game::new(MIXED_ROLES);
    game.tile("166sized", "TW01_166.png", 150, 150);

    let args = VerifyArgs {
        project: game.project_args(),
        format: Format::Json,
    };
    let err = verify::run(args, &Printer::quiet()).unwrap_err();
    assert!(matches!(err, WitchError::Validation { .. }));
    assert!(err.to_string().contains("1 missing and 1 wrong size"));

    let args = ValidateArgs {
        project: game.project_args(),
        format: Format::Json,
    };
    let err = validate::run(args, &Printer::quiet()).unwrap_err();
    assert!(err.to_string().contains("found 2 of 3 expected"));
}
