use super::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

struct NoTags;

impl TagReader for NoTags {
    fn read(&self, path: &Path) -> Result<EmbeddedMetadata, TagError> {
        Err(TagError {
            path: path.display().to_string(),
            message: "no tags".to_string(),
        })
    }
}

struct FixedTags(EmbeddedMetadata);

impl TagReader for FixedTags {
    fn read(&self, _path: &Path) -> Result<EmbeddedMetadata, TagError> {
        Ok(self.0.clone())
    }
}

#[test]
fn kick_is_checked_before_bass() {
    assert_eq!(detect_category("kick_808.wav"), Category::Kick);
    assert_eq!(detect_category("808_sub.wav"), Category::Bass);
}

#[test]
fn category_keywords_are_case_insensitive_and_ordered() {
    assert_eq!(detect_category("Big_CLAP_02.wav"), Category::Snare);
    assert_eq!(detect_category("open_hat.wav"), Category::HiHat);
    assert_eq!(detect_category("Bass_Loop.wav"), Category::Bass);
    assert_eq!(detect_category("drum_loop.wav"), Category::Loop);
    assert_eq!(detect_category("VOX_chop.wav"), Category::Vocal);
    assert_eq!(detect_category("white_noise_riser.wav"), Category::Fx);
    assert_eq!(detect_category("perc_shaker.wav"), Category::Percussion);
}

#[test]
fn loop_name_yields_bpm_and_key() {
    let inferred = infer_from_name("Loop_128bpm_Cmin.wav");
    assert_eq!(inferred.category, Category::Loop);
    assert_eq!(inferred.bpm, Some(128));
    assert_eq!(inferred.key.as_deref(), Some("CMIN"));
}

#[test]
fn unmatched_name_defaults_to_other_without_bpm_or_key() {
    let inferred = infer_from_name("random_sound.wav");
    assert_eq!(inferred.category, Category::Other);
    assert_eq!(inferred.bpm, None);
    assert_eq!(inferred.key, None);
}

#[test]
fn bpm_allows_one_space_and_any_case() {
    assert_eq!(detect_bpm("pad 90 BPM.wav"), Some(90));
    assert_eq!(detect_bpm("break_174Bpm.wav"), Some(174));
    assert_eq!(detect_bpm("take_5bpm.wav"), None);
    assert_eq!(detect_bpm("no_tempo.wav"), None);
}

#[test]
fn key_accepts_sharps_flats_and_spaces() {
    assert_eq!(detect_key("lead_F#maj.wav").as_deref(), Some("F#MAJ"));
    assert_eq!(detect_key("pad_Eb min.wav").as_deref(), Some("EB MIN"));
    assert_eq!(detect_key("keys_Am.wav").as_deref(), Some("AM"));
}

#[test]
fn classify_file_uses_stat_and_filename_when_tags_fail() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Loop_128bpm_Cmin.wav");
    fs::write(&path, b"0123456789").unwrap();

    let sample = classify_file(&path, "Drums", &NoTags).unwrap();
    assert_eq!(sample.path, path);
    assert_eq!(sample.name, "Loop_128bpm_Cmin.wav");
    assert_eq!(sample.size, 10);
    assert_eq!(sample.library, "Drums");
    assert_eq!(sample.category, Category::Loop);
    assert_eq!(sample.bpm, Some(128));
    assert_eq!(sample.key.as_deref(), Some("CMIN"));
    assert_eq!(sample.duration, 0.0);

    let modified = fs::metadata(&path).unwrap().modified().unwrap();
    let expected = chrono::DateTime::<chrono::Utc>::from(modified);
    assert_eq!(sample.date, chrono::SubsecRound::trunc_subsecs(expected, 3));
    assert_eq!(sample.date.timestamp_subsec_nanos() % 1_000_000, 0);
}

#[test]
fn embedded_tags_win_over_filename() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Loop_128bpm_Cmin.wav");
    fs::write(&path, b"x").unwrap();

    let tags = FixedTags(EmbeddedMetadata {
        bpm: Some(123.6),
        key: Some("f#m".to_string()),
        duration: Some(7.5),
    });
    let sample = classify_file(&path, "Drums", &tags).unwrap();
    assert_eq!(sample.bpm, Some(124));
    assert_eq!(sample.key.as_deref(), Some("F#M"));
    assert_eq!(sample.duration, 7.5);
    assert_eq!(sample.category, Category::Loop);
}

#[test]
fn partial_tags_fall_back_per_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bass_95bpm_Gmaj.wav");
    fs::write(&path, b"x").unwrap();

    let tags = FixedTags(EmbeddedMetadata {
        bpm: None,
        key: Some("Dmin".to_string()),
        duration: Some(2.0),
    });
    let sample = classify_file(&path, "Bass", &tags).unwrap();
    assert_eq!(sample.bpm, Some(95));
    assert_eq!(sample.key.as_deref(), Some("DMIN"));
}

#[test]
fn embedded_tempo_rounding_to_zero_falls_back_to_filename() {
    let dir = tempdir().unwrap();
    let tagged = dir.path().join("pad_drone.wav");
    let named = dir.path().join("pad_90bpm.wav");
    fs::write(&tagged, b"x").unwrap();
    fs::write(&named, b"x").unwrap();

    let tags = FixedTags(EmbeddedMetadata {
        bpm: Some(0.4),
        ..EmbeddedMetadata::default()
    });
    assert_eq!(classify_file(&tagged, "Pads", &tags).unwrap().bpm, None);
    assert_eq!(classify_file(&named, "Pads", &tags).unwrap().bpm, Some(90));
}

#[test]
fn classify_file_fails_for_missing_path() {
    let dir = tempdir().unwrap();
    let err = classify_file(&dir.path().join("gone.wav"), "X", &NoTags).unwrap_err();
    assert!(matches!(err, ClassifyError::Stat { .. }));
}

#[test]
fn classify_is_deterministic_for_unchanged_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snare_tight.wav");
    fs::write(&path, b"x").unwrap();

    let a = classify_file(&path, "Kit", &NoTags).unwrap();
    let b = classify_file(&path, "Kit", &NoTags).unwrap();
    assert_eq!(a, b);
}

#[test]
fn category_round_trips_through_its_label() {
    for category in Category::ALL {
        assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
    }
    assert!("Cowbell".parse::<Category>().is_err());
}
