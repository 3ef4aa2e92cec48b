use crate::subsystem::FrequencyBand;

/// Defaults for one frequency band. Distances in metres, times in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyDefaults {
    // CWPBL
    pub blank: f32,
    // CWPBS
    pub bin_size: f32,
    // CWPBN
    pub bin_count: u16,
    // CWPP
    pub ping_count: u16,
    // CWPTBP
    pub time_between_pings: f32,
    // CWPBB lag length
    pub broadband_lag: f32,
    // CWPAP lag
    pub ambiguity_lag: f32,
    // CWPAP blank
    pub ambiguity_blank: f32,
    // CWPAP bin size
    pub ambiguity_bin_size: f32,
    // CWPAP time between pings
    pub ambiguity_time_between_pings: f32,
    // CBTBB long range depth
    pub bt_long_range_depth: f32,
    // CBTT SNR switch depth
    pub bt_snr_switch_depth: f32,
    // CBTT gain switch depth
    pub bt_gain_switch_depth: f32,
    // CBTBL
    pub bt_blank: f32,
    // CBTMX
    pub bt_max_depth: f32,
    // CWTBL
    pub wt_blank: f32,
    // CWTBS
    pub wt_bin_size: f32,
}

const KHZ_38: FrequencyDefaults = FrequencyDefaults {
    blank: 16.00,
    bin_size: 16.00,
    bin_count: 100,
    ping_count: 1,
    time_between_pings: 4.00,
    broadband_lag: 1.536,
    ambiguity_lag: 1.536,
    ambiguity_blank: 16.00,
    ambiguity_bin_size: 16.00,
    ambiguity_time_between_pings: 0.01,
    bt_long_range_depth: 1000.00,
    bt_snr_switch_depth: 800.00,
    bt_gain_switch_depth: 200.00,
    bt_blank: 8.00,
    bt_max_depth: 2000.00,
    wt_blank: 16.00,
    wt_bin_size: 32.00,
};

const KHZ_75: FrequencyDefaults = FrequencyDefaults {
    blank: 8.00,
    bin_size: 8.00,
    bin_count: 100,
    ping_count: 1,
    time_between_pings: 2.00,
    broadband_lag: 0.768,
    ambiguity_lag: 0.768,
    ambiguity_blank: 8.00,
    ambiguity_bin_size: 8.00,
    ambiguity_time_between_pings: 0.01,
    bt_long_range_depth: 450.00,
    bt_snr_switch_depth: 400.00,
    bt_gain_switch_depth: 100.00,
    bt_blank: 4.00,
    bt_max_depth: 1000.00,
    wt_blank: 8.00,
    wt_bin_size: 16.00,
};

const KHZ_150: FrequencyDefaults = FrequencyDefaults {
    blank: 4.00,
    bin_size: 4.00,
    bin_count: 60,
    ping_count: 1,
    time_between_pings: 1.00,
    broadband_lag: 0.384,
    ambiguity_lag: 0.384,
    ambiguity_blank: 4.00,
    ambiguity_bin_size: 4.00,
    ambiguity_time_between_pings: 0.01,
    bt_long_range_depth: 250.00,
    bt_snr_switch_depth: 200.00,
    bt_gain_switch_depth: 50.00,
    bt_blank: 2.00,
    bt_max_depth: 500.00,
    wt_blank: 4.00,
    wt_bin_size: 8.00,
};

const KHZ_300: FrequencyDefaults = FrequencyDefaults {
    blank: 2.00,
    bin_size: 2.00,
    bin_count: 50,
    ping_count: 1,
    time_between_pings: 0.50,
    broadband_lag: 0.192,
    ambiguity_lag: 0.192,
    ambiguity_blank: 2.00,
    ambiguity_bin_size: 2.00,
    ambiguity_time_between_pings: 0.01,
    bt_long_range_depth: 125.00,
    bt_snr_switch_depth: 100.00,
    bt_gain_switch_depth: 25.00,
    bt_blank: 1.00,
    bt_max_depth: 250.00,
    wt_blank: 2.00,
    wt_bin_size: 4.00,
};

const KHZ_600: FrequencyDefaults = FrequencyDefaults {
    blank: 1.00,
    bin_size: 1.00,
    bin_count: 40,
    ping_count: 1,
    time_between_pings: 0.25,
    broadband_lag: 0.096,
    ambiguity_lag: 0.096,
    ambiguity_blank: 1.00,
    ambiguity_bin_size: 1.00,
    ambiguity_time_between_pings: 0.01,
    bt_long_range_depth: 60.00,
    bt_snr_switch_depth: 50.00,
    bt_gain_switch_depth: 12.00,
    bt_blank: 0.50,
    bt_max_depth: 120.00,
    wt_blank: 1.00,
    wt_bin_size: 2.00,
};

const KHZ_1200: FrequencyDefaults = FrequencyDefaults {
    blank: 0.50,
    bin_size: 0.50,
    bin_count: 30,
    ping_count: 1,
    time_between_pings: 0.10,
    broadband_lag: 0.048,
    ambiguity_lag: 0.048,
    ambiguity_blank: 0.50,
    ambiguity_bin_size: 0.50,
    ambiguity_time_between_pings: 0.01,
    bt_long_range_depth: 30.00,
    bt_snr_switch_depth: 25.00,
    bt_gain_switch_depth: 6.00,
    bt_blank: 0.25,
    bt_max_depth: 60.00,
    wt_blank: 0.50,
    wt_bin_size: 1.00,
};

impl FrequencyDefaults {
    pub fn for_band(band: FrequencyBand) -> &'static FrequencyDefaults {
        match band {
            FrequencyBand::Khz38 => &KHZ_38,
            FrequencyBand::Khz75 => &KHZ_75,
            FrequencyBand::Khz150 => &KHZ_150,
            FrequencyBand::Khz300 => &KHZ_300,
            FrequencyBand::Khz600 => &KHZ_600,
            FrequencyBand::Khz1200 => &KHZ_1200,
        }
    }
}
