//! Tests for filename classification and archive path construction.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use file_validation::{
    classify, AncillaryFilePath, FileFamily, FileNameError, ImapFilePath, ScienceFilePath,
    SpiceFilePath,
};
use imap_common::{DataLevel, Instrument, VALID_ANCILLARY_FILE_EXTENSIONS};
use test_utils::{ancillary, assert_violations, invalid, science, spice};

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_classify_each_family() {
    for name in [science::MAG_L1A_NORM_V000, science::SWE_L0_RAW, science::HI_L1C_45SENSOR_REPOINT] {
        assert_eq!(classify(name).unwrap().family(), FileFamily::Science, "{name}");
    }
    for name in [ancillary::MAG_CAL_V001, ancillary::MAG_CAL_RANGE_V002, ancillary::HIT_CAL] {
        assert_eq!(classify(name).unwrap().family(), FileFamily::Ancillary, "{name}");
    }
    for name in [spice::ATTITUDE_CK, spice::EPHEMERIS_SPK, spice::LEAPSECONDS, spice::SPIN_TABLE] {
        assert_eq!(classify(name).unwrap().family(), FileFamily::Spice, "{name}");
    }
}

#[test]
fn test_classify_failure_names_the_file() {
    for name in [invalid::BAD_DATE, invalid::BAD_INSTRUMENT_AND_LEVEL, invalid::GARBAGE] {
        let err = classify(name).unwrap_err();
        assert!(matches!(err, FileNameError::Unclassified { .. }), "{name}");
        assert_eq!(err.filename(), name);
        assert!(err.to_string().contains(name));
    }
}

#[test]
fn test_classify_failure_keeps_semantic_reasons() {
    let err = classify(invalid::BAD_INSTRUMENT_AND_LEVEL).unwrap_err();
    let FileNameError::Unclassified { attempts, .. } = err else {
        panic!("expected Unclassified");
    };
    assert_violations!(attempts[1], ["Invalid instrument foo", "Invalid data level l9"]);
}

#[test]
fn test_from_str_matches_classify() {
    let parsed: ImapFilePath = science::GLOWS_L1A_HIST.parse().unwrap();
    assert_eq!(parsed, classify(science::GLOWS_L1A_HIST).unwrap());
}

// ============================================================================
// Field validation
// ============================================================================

#[test]
fn test_calendar_validity() {
    assert!(ScienceFilePath::new("imap_mag_l1a_norm-magi_20240312_v000.cdf").is_ok());

    let err = ScienceFilePath::new(invalid::BAD_DATE).unwrap_err();
    assert_violations!(err, ["Invalid start date 20240230"]);
}

#[test]
fn test_mission_is_fixed() {
    // The pattern itself pins the mission, so other missions never reach validation
    let err = ScienceFilePath::new("mars_mag_l1a_norm-magi_20240312_v000.cdf").unwrap_err();
    assert!(matches!(err, FileNameError::Syntax { .. }));
}

#[test]
fn test_version_shape() {
    assert!(matches!(
        ScienceFilePath::new("imap_mag_l1a_norm-magi_20240312_v12.cdf"),
        Err(FileNameError::Syntax { .. })
    ));
    assert!(matches!(
        ScienceFilePath::new("imap_mag_l1a_norm-magi_20240312_1v23.cdf"),
        Err(FileNameError::Syntax { .. })
    ));
}

#[test]
fn test_ancillary_validator_narrower_than_pattern() {
    assert_eq!(VALID_ANCILLARY_FILE_EXTENSIONS, &["cdf"]);
    let err = AncillaryFilePath::new("imap_mag_l1b-cal_20250101_v001.csv").unwrap_err();
    assert_violations!(err, ["Invalid extension csv"]);
}

// ============================================================================
// Generation round trip
// ============================================================================

#[test]
fn test_science_generate_then_classify_is_identity() {
    let cases: &[(&str, &str, &str, &str, &str, Option<u32>)] = &[
        ("mag", "l1a", "norm-magi", "20240312", "v000", None),
        ("swe", "l0", "raw", "20240101", "v002", None),
        ("hi", "l1c", "45sensor-pset", "20250415", "v001", Some(12)),
        ("codice", "l3d", "lo-sw-species", "20261231", "v999", Some(0)),
    ];

    for &(instrument, level, descriptor, start, version, repointing) in cases {
        let generated = ScienceFilePath::generate_from_inputs(
            instrument, level, descriptor, start, version, repointing,
        )
        .unwrap();

        let ImapFilePath::Science(parsed) = classify(generated.filename()).unwrap() else {
            panic!("{} did not classify as science", generated.filename());
        };
        assert_eq!(parsed.mission(), "imap");
        assert_eq!(parsed.instrument().as_str(), instrument);
        assert_eq!(parsed.data_level().as_str(), level);
        assert_eq!(parsed.descriptor(), descriptor);
        assert_eq!(imap_common::format_date(&parsed.start_date()), start);
        assert_eq!(parsed.repointing(), repointing);
        assert_eq!(parsed.version().to_string(), version);
        assert_eq!(parsed.extension(), if level == "l0" { "pkts" } else { "cdf" });
    }
}

#[test]
fn test_ancillary_generate_then_classify_is_identity() {
    let generated = AncillaryFilePath::generate_from_inputs(
        "hit",
        "l1b-cal",
        "20240312",
        Some("20240401"),
        "v004",
        "cdf",
    )
    .unwrap();

    let ImapFilePath::Ancillary(parsed) = classify(generated.filename()).unwrap() else {
        panic!("did not classify as ancillary");
    };
    assert_eq!(parsed, generated);
    assert_eq!(parsed.instrument(), Instrument::Hit);
    assert_eq!(parsed.end_date(), NaiveDate::from_ymd_opt(2024, 4, 1));
}

// ============================================================================
// Path construction
// ============================================================================

#[test]
fn test_science_path_partitions_by_month() {
    let path = classify(science::MAG_L1A_NORM_V000).unwrap();
    assert_eq!(path.data_level(), Some(DataLevel::L1a));
    assert_eq!(
        path.construct_path(Some(Path::new("/archive"))),
        PathBuf::from("/archive/imap/mag/l1a/2024/03").join(science::MAG_L1A_NORM_V000)
    );
}

#[test]
fn test_path_construction_is_deterministic() {
    let root = Path::new("/archive");
    let first = classify(ancillary::HIT_CAL).unwrap().construct_path(Some(root));
    let second = classify(ancillary::HIT_CAL).unwrap().construct_path(Some(root));
    assert_eq!(first, second);
    assert_eq!(
        first,
        PathBuf::from("/archive/imap/ancillary/hit").join(ancillary::HIT_CAL)
    );
}

#[test]
fn test_spice_paths_use_kernel_subdirectory() {
    let expected = [
        (spice::ATTITUDE_CK, "spice/ck"),
        (spice::EPHEMERIS_SPK, "spice/spk"),
        (spice::LEAPSECONDS, "spice/lsk"),
        (spice::SPIN_TABLE, "spice/spin"),
        ("imap_001.tm", "spice/mk"),
        ("imap_science_0001.tf", "spice/fk"),
        ("imap_sclk_0000.tsc", "spice/sclk"),
    ];
    for (name, dir) in expected {
        let kernel = SpiceFilePath::new(name).unwrap();
        assert_eq!(kernel.construct_path(None), PathBuf::from(dir).join(name), "{name}");
    }
}

#[test]
fn test_relative_paths_without_root() {
    let path = classify(science::SWE_L0_RAW).unwrap();
    assert_eq!(
        path.construct_path(None),
        PathBuf::from("imap/swe/l0/2024/01").join(science::SWE_L0_RAW)
    );
}
