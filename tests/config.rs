use hdrfixed::{Config, CreationError, Histogram, Layout};

#[test]
fn default_is_one_microsecond_to_one_hour() {
    assert_eq!(Config::new(1, 3_600_000_000, 3), Config::default());
    assert!(Config::default().layout().is_ok());
}

#[test]
fn deserialize_fills_missing_fields_from_default() {
    let config: Config = serde_json::from_str(r#"{ "significant_figures": 2 }"#).unwrap();

    assert_eq!(1, config.lowest_trackable_value);
    assert_eq!(3_600_000_000, config.highest_trackable_value);
    assert_eq!(2, config.significant_figures);
}

#[test]
fn deserialize_empty_object_is_default() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(Config::default(), config);
}

#[test]
fn deserialize_rejects_unknown_fields() {
    let result = serde_json::from_str::<Config>(r#"{ "sigfig": 2 }"#);
    assert!(result.is_err());
}

#[test]
fn serialize_then_deserialize() {
    let config = Config::new(1000, 10_000_000, 4);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(config, serde_json::from_str::<Config>(&json).unwrap());
}

#[test]
fn invalid_config_fails_on_layout() {
    assert_eq!(Err(CreationError::LowIsZero), Config::new(0, 10, 3).layout());
    assert_eq!(
        Err(CreationError::HighLessThanTwiceLow),
        Config::new(10, 15, 3).layout()
    );
    assert_eq!(
        Err(CreationError::SigFigOutOfRange),
        Config::new(1, 1000, 6).layout()
    );
    assert!(Histogram::<u64>::from_config(&Config::new(0, 10, 3)).is_err());
}

#[test]
fn histogram_reports_its_config() {
    let config = Config::new(1000, 10_000_000, 3);
    let h = Histogram::<u64>::from_config(&config).unwrap();

    assert_eq!(config, h.config());
    assert_eq!(&config.layout().unwrap(), h.layout());
}

#[test]
fn layout_display() {
    let layout = Layout::new(1, 30_000_000, 2).unwrap();
    let text = layout.to_string();

    assert!(text.contains("sub_bucket_count: 256\n"), "{}", text);
    assert!(text.contains("bucket_count: 18\n"), "{}", text);
    assert!(text.ends_with("counts_len: 2432"), "{}", text);
    assert_eq!(11, text.lines().count());
}

#[test]
fn layout_serialize() {
    let layout = Layout::new(1, 30_000_000, 2).unwrap();
    let value = serde_json::to_value(&layout).unwrap();

    assert_eq!(1, value["lowest_trackable_value"]);
    assert_eq!(30_000_000, value["highest_trackable_value"]);
    assert_eq!(256, value["sub_bucket_count"]);
    assert_eq!(128, value["sub_bucket_half_count"]);
    assert_eq!(7, value["sub_bucket_half_count_magnitude"]);
    assert_eq!(255, value["sub_bucket_mask"]);
    assert_eq!(56, value["leading_zero_count_base"]);
    assert_eq!(18, value["bucket_count"]);
    assert_eq!(2432, value["counts_len"]);
}

#[test]
fn layout_accessors() {
    let layout = Layout::new(1000, 10_000_000, 3).unwrap();

    assert_eq!(9, layout.unit_magnitude());
    assert_eq!(2048, layout.sub_bucket_count());
    assert_eq!(1024, layout.sub_bucket_half_count());
    assert_eq!(10, layout.sub_bucket_half_count_magnitude());
    assert_eq!(2047 << 9, layout.sub_bucket_mask());
    assert_eq!(44, layout.leading_zero_count_base());
    assert_eq!(5, layout.bucket_count());
    assert_eq!(6 * 1024, layout.counts_len());
}
