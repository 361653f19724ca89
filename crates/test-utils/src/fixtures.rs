//! Common test fixtures for imap-data-access tests.
//!
//! Filenames here mirror what a processing pipeline actually passes around:
//! magnetometer science products, calibration ancillaries and navigation kernels.

/// Valid science filenames.
pub mod science {
    /// MAG L1A normal-mode, first version
    pub const MAG_L1A_NORM_V000: &str = "imap_mag_l1a_norm-magi_20240312_v000.cdf";

    /// MAG L1A normal-mode, reprocessed
    pub const MAG_L1A_NORM_V001: &str = "imap_mag_l1a_norm-magi_20240312_v001.cdf";

    /// MAG L1A burst-mode on two days
    pub const MAG_L1A_BURST_0312: &str = "imap_mag_l1a_burst-magi_20240312_v000.cdf";
    pub const MAG_L1A_BURST_0310: &str = "imap_mag_l1a_burst-magi_20240310_v000.cdf";

    /// Raw packet file
    pub const SWE_L0_RAW: &str = "imap_swe_l0_raw_20240101_v002.pkts";

    /// HIT L1B science
    pub const HIT_L1B_SCI: &str = "imap_hit_l1b_sci_20240312_v000.cdf";

    /// GLOWS L1A histogram
    pub const GLOWS_L1A_HIST: &str = "imap_glows_l1a_hist_20250202_v001.cdf";

    /// Pointing-set products with a repointing field
    pub const HI_L1C_45SENSOR_REPOINT: &str =
        "imap_hi_l1c_45sensor-pset_20250415-repoint00012_v001.cdf";

    /// Ultra pointing sets from both sensor heads
    pub const ULTRA_L1C_45SENSOR_0312: &str = "imap_ultra_l1c_45sensor-pset_20240312_v000.cdf";
    pub const ULTRA_L1C_45SENSOR_0313: &str = "imap_ultra_l1c_45sensor-pset_20240313_v000.cdf";
    pub const ULTRA_L1C_90SENSOR_0312: &str = "imap_ultra_l1c_90sensor-pset_20240312_v000.cdf";

    /// Hi pointing sets from both sensor heads
    pub const HI_L1C_45SENSOR_0312: &str = "imap_hi_l1c_45sensor-pset_20240312_v000.cdf";
    pub const HI_L1C_90SENSOR_0312: &str = "imap_hi_l1c_90sensor-pset_20240312_v000.cdf";
}

/// Valid ancillary filenames.
pub mod ancillary {
    /// Open-ended MAG calibration
    pub const MAG_CAL_V001: &str = "imap_mag_l1b-cal_20250101_v001.cdf";

    /// MAG calibration with an end date
    pub const MAG_CAL_RANGE_V002: &str = "imap_mag_l1b-cal_20250103-20250104_v002.cdf";

    /// Same descriptor family, different product
    pub const MAG_L1A_CAL_V003: &str = "imap_mag_l1a-cal_20250105_v003.cdf";

    /// HIT calibration
    pub const HIT_CAL: &str = "imap_hit_l1b-cal_20240312_v000.cdf";
}

/// Valid SPICE kernel filenames.
pub mod spice {
    /// Attitude history (ck)
    pub const ATTITUDE_CK: &str = "imap_1000_100_1000_100_01.ap.bc";

    /// Second attitude kernel (ck)
    pub const ATTITUDE_CK_2: &str = "imap_1000_101_1000_101_01.ap.bc";

    /// Planetary ephemeris (spk)
    pub const EPHEMERIS_SPK: &str = "de440.bsp";

    /// Leapseconds (lsk)
    pub const LEAPSECONDS: &str = "naif0012.tls";

    /// Spin table (two-part suffix)
    pub const SPIN_TABLE: &str = "imap_2025_122_2025_160_01.spin.csv";
}

/// Names that follow none of the conventions.
pub mod invalid {
    /// Science-shaped with an impossible date
    pub const BAD_DATE: &str = "imap_mag_l1a_norm-magi_20240230_v000.cdf";

    /// Unknown instrument and data level
    pub const BAD_INSTRUMENT_AND_LEVEL: &str = "imap_foo_l9_burst_20240312_v000.cdf";

    /// Not any known shape
    pub const GARBAGE: &str = "notes_20240312.txt";
}
