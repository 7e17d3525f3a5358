// Unit tests for business rules

#[cfg(test)]
mod tests {
    use crate::domain::errors::*;
    use crate::domain::model::*;
    use crate::domain::rules::*;

    #[test]
    fn test_range_rules() {
        let start = TimeSpec::from_seconds(2.0);
        assert!(RangeRules::validate(&start, &TimeSpec::from_seconds(3.0)).is_ok());
        assert!(RangeRules::validate(&start, &TimeSpec::from_seconds(1.0)).is_err());
        assert!(RangeRules::validate(
            &TimeSpec::from_seconds(-1.0),
            &TimeSpec::from_seconds(1.0)
        )
        .is_err());
    }

    #[test]
    fn test_bitrate_rules() {
        assert!(VariantRules::validate_bitrate("1400k").is_ok());
        assert!(VariantRules::validate_bitrate("5M").is_ok());
        assert!(VariantRules::validate_bitrate("800000").is_ok());
        assert!(VariantRules::validate_bitrate("k").is_err());
        assert!(VariantRules::validate_bitrate("1.5M").is_err());
        assert!(VariantRules::validate_bitrate("0k").is_err());
        assert!(VariantRules::validate_bitrate("").is_err());
    }

    #[test]
    fn test_variant_scale_bounds() {
        assert!(VariantOption::new(1.0, "5M", "4M").is_ok());
        assert!(VariantOption::new(0.0, "5M", "4M").is_err());
        assert!(VariantOption::new(1.01, "5M", "4M").is_err());
        assert!(VariantOption::new(f64::NAN, "5M", "4M").is_err());
    }

    #[test]
    fn test_source_url_validation() {
        assert!(SourceRules::validate_url("https://cdn.example.com/live/index.m3u8").is_ok());
        assert!(SourceRules::validate_url("rtmp://media.example.com/app/key").is_ok());
        assert!(SourceRules::validate_url("file:///tmp/video.mp4").is_ok());

        let err = SourceRules::validate_url("ftp://example.com/v.mp4").unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl(_)));
        assert!(SourceRules::validate_url("not a url").is_err());
    }

    #[test]
    fn test_remote_source_detection() {
        assert!(SourceRules::is_remote("http://example.com/a.mp4"));
        assert!(!SourceRules::is_remote("/home/user/a.mp4"));
        assert!(!SourceRules::is_remote("C:\\videos\\a.mp4"));
        assert!(!SourceRules::is_remote("file:///tmp/a.mp4"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_url_path() {
        assert_eq!(
            SourceRules::file_url_path("file:///tmp/my%20clip.mp4").unwrap(),
            Some(std::path::PathBuf::from("/tmp/my clip.mp4"))
        );
        assert_eq!(SourceRules::file_url_path("/tmp/a.mp4").unwrap(), None);
        assert_eq!(SourceRules::file_url_path("https://example.com/a.mp4").unwrap(), None);

        let err = SourceRules::file_url_path("file://example.com/a.mp4").unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl(_)));
    }

    #[test]
    fn test_sanitize_stem() {
        assert_eq!(NamingRules::sanitize_stem("my clip").unwrap(), "my clip");
        assert_eq!(NamingRules::sanitize_stem("a/b:c?").unwrap(), "a_b_c_");
        assert_eq!(NamingRules::sanitize_stem("..hidden..").unwrap(), "hidden");
        assert!(NamingRules::sanitize_stem("  ").is_err());
    }

    #[test]
    fn test_even_scale_filter() {
        assert_eq!(
            FilterRules::even_scale(0.5),
            "scale=trunc(iw*0.5/2)*2:trunc(ih*0.5/2)*2"
        );
        assert_eq!(
            FilterRules::even_scale(1.0),
            "scale=trunc(iw*1/2)*2:trunc(ih*1/2)*2"
        );
    }
}
