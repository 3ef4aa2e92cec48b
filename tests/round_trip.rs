use adcp_config::*;

fn installed() -> Vec<Subsystem> {
    Subsystem::list_from_codes("23").unwrap()
}

/// Three configurations, two on the 1200 kHz subsystem, with non-default
/// values on each.
fn sample() -> AdcpConfiguration {
    let ss = installed();
    let mut config = AdcpConfiguration::from_subsystems(&[ss[0], ss[1], ss[0]]);
    config.device.apply(DeviceCommand::Cho, "-12.25").unwrap();
    config.device.apply(DeviceCommand::Cwss, "1490.00").unwrap();
    config.device.apply(DeviceCommand::Cei, "00:00:05.50").unwrap();

    let first = config.get_mut(0).unwrap();
    first.set_validated(Command::Cwpbs, 0, "0.20").unwrap();
    first.set_validated(Command::Cwpbn, 0, "120").unwrap();
    first.set_validated(Command::Cwpbb, 1, "0.040").unwrap();
    first.set_validated(Command::Cbtmx, 0, "45.00").unwrap();

    let second = config.get_mut(1).unwrap();
    second.wp_averaging_interval = TimeValue::new(0, 1, 0, 0);
    second.set_bottom_track_mode(BottomTrackMode::AutoSwitch);
    second.wt_enabled.try_set(true);
    second.set_validated(Command::Cwtbs, 0, "3.50").unwrap();

    let third = config.get_mut(2).unwrap();
    third.bt_enabled.try_set(false);
    third.set_validated(Command::Cwpbl, 0, "1.75").unwrap();
    config
}

#[test]
fn every_profile_survives_decode() {
    let original = sample();
    for profile in Profile::ALL {
        let lines = serialize_configuration(&original, profile).unwrap();
        let (decoded, report) = decode_with_report(&lines.join("\n"), &installed());
        assert!(report.is_clean(), "{profile}: {report:?}");
        assert_eq!(decoded.cepo().unwrap(), "232");
        assert_eq!(serialize_configuration(&decoded, profile).unwrap(), lines, "{profile}");
    }
}

#[test]
fn full_profile_recovers_values() {
    let lines = serialize_configuration(&sample(), Profile::Full).unwrap();
    let decoded = decode(&lines.join("\r\n"), &installed());

    assert_eq!(decoded.device.heading_offset.get(), -12.25);
    assert_eq!(decoded.device.speed_of_sound.get(), 1490.0);
    assert_eq!(decoded.device.ensemble_interval, TimeValue::new(0, 0, 5, 50));

    let first = decoded.get(0).unwrap();
    assert_eq!(first.wp_bin_size.get(), 0.2);
    assert_eq!(first.wp_bin_count.get(), 120);
    assert_eq!(first.wp_lag_length.get(), 0.04);
    assert_eq!(first.bt_max_depth.get(), 45.0);

    let second = decoded.get(1).unwrap();
    assert!(second.is_averaging_interval_enabled());
    assert_eq!(second.wp_averaging_interval, TimeValue::new(0, 1, 0, 0));
    assert_eq!(second.bottom_track_mode(), Some(BottomTrackMode::AutoSwitch));
    assert!(second.wt_enabled.get());
    assert_eq!(second.wt_bin_size.get(), 3.5);

    let third = decoded.get(2).unwrap();
    assert_eq!(third.config().config_number(), 1);
    assert!(!third.bt_enabled.get());
    assert_eq!(third.wp_blank.get(), 1.75);
}

#[test]
fn values_finer_than_print_precision_survive() {
    let mut original = AdcpConfiguration::from_subsystems(&installed());
    let first = original.get_mut(0).unwrap();
    assert!(first.wp_bin_size.try_set(0.125));
    assert!(first.wp_correlation_threshold.try_set(0.255));
    assert!(first.wp_time_between_pings.try_set(0.005));
    assert!(first.wp_lag_length.try_set(0.0425));
    assert!(original.device.heading_offset.try_set(-12.345));

    let lines = serialize_configuration(&original, Profile::Full).unwrap();
    assert!(lines.contains(&"CWPBS[0] 0.125".to_string()));
    let (decoded, report) = decode_with_report(&lines.join("\n"), &installed());
    assert!(report.is_clean(), "{report:?}");

    let first = decoded.get(0).unwrap();
    assert_eq!(first.wp_bin_size.get(), 0.125);
    assert_eq!(first.wp_correlation_threshold.get(), 0.255);
    assert_eq!(first.wp_time_between_pings.get(), 0.005);
    assert_eq!(first.wp_lag_length.get(), 0.0425);
    assert_eq!(decoded.device.heading_offset.get(), -12.345);
    assert_eq!(decoded, original);
}

#[test]
fn ping_count_and_averaging_interval_never_both_written() {
    let lines = serialize_configuration(&sample(), Profile::Full).unwrap();
    for index in 0..3 {
        let cwpp = format!("CWPP[{index}] ");
        let cwpai = format!("CWPAI[{index}] ");
        let both = lines.iter().filter(|l| l.starts_with(&cwpp) || l.starts_with(&cwpai)).count();
        assert_eq!(both, 1, "index {index}");
    }
}

#[test]
fn instrument_style_dump() {
    let dump = "\
> CSHOW\r\n\
CEPO 23\r\n\
CEI 00:00:01.00\r\n\
CWPON[0] 1 [1] 1\r\n\
CWPBB[0] 1,0.042 [1] 1,0.084\r\n\
CWPBL[0] 0.40 [1] 0.80\r\n\
CWPBS[0] 0.50 [1] 1.00\r\n\
CWPBN[0] 30 [1] 40\r\n\
CWPP[0] 5 [1] 9\r\n\
CBTON[0] 1 [1] 0\r\n\
CBTMX[0] 75.00 [1] 150.00\r\n\
Mode Profile\r\n";
    let (config, report) = decode_bytes(dump.as_bytes(), &installed());
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(config.len(), 2);

    let first = config.get(0).unwrap();
    assert_eq!(first.wp_lag_length.get(), 0.042);
    assert_eq!(first.wp_blank.get(), 0.4);
    assert_eq!(first.wp_ping_count.get(), 5);
    assert_eq!(first.bt_max_depth.get(), 75.0);

    let second = config.get(1).unwrap();
    assert_eq!(second.wp_bin_count.get(), 40);
    assert!(!second.bt_enabled.get());
    assert_eq!(second.bt_max_depth.get(), 150.0);
}
