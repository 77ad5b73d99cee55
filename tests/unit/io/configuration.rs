//! Tests for refinement defaults and output naming constants

#[cfg(test)]
mod tests {
    use quadart::io::configuration::{
        ANIMATION_EXTENSION, ANIMATION_SUFFIX, DEFAULT_FRAME_DELAY_MS, DEFAULT_SAMPLE_PERIOD,
        DEFAULT_STEPS, FINAL_EXTENSION, FINAL_FRAME_HOLD, FINAL_SUFFIX, JPEG_QUALITY,
        MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH, SUPPORTED_EXTENSIONS,
    };

    // Tests refinement defaults produce a valid animated configuration
    // Verified by setting the default period to zero
    #[test]
    fn test_refinement_defaults() {
        assert_eq!(DEFAULT_STEPS, 100);
        assert_eq!(DEFAULT_SAMPLE_PERIOD, 20);
        assert!(DEFAULT_SAMPLE_PERIOD <= DEFAULT_STEPS);
    }

    // Tests output suffixes and extensions are distinct
    // Verified by giving both outputs the same suffix
    #[test]
    fn test_output_naming() {
        assert_eq!(FINAL_SUFFIX, "_final");
        assert_eq!(ANIMATION_SUFFIX, "_animated");
        assert_ne!(FINAL_SUFFIX, ANIMATION_SUFFIX);
        assert_eq!(FINAL_EXTENSION, "jpg");
        assert_eq!(ANIMATION_EXTENSION, "gif");
    }

    // Tests encoder settings stay within encoder limits
    // Verified by raising the JPEG quality above 100
    #[test]
    fn test_encoder_settings() {
        assert!((1..=100).contains(&JPEG_QUALITY));
        assert!(DEFAULT_FRAME_DELAY_MS > 0);
        assert!(FINAL_FRAME_HOLD > 1);
    }

    // Tests supported extensions are lowercase and include both outputs
    // Verified by adding an uppercase extension
    #[test]
    fn test_supported_extensions() {
        for ext in SUPPORTED_EXTENSIONS {
            assert_eq!(ext, ext.to_lowercase());
        }
        assert!(SUPPORTED_EXTENSIONS.contains(&FINAL_EXTENSION));
        assert!(SUPPORTED_EXTENSIONS.contains(&ANIMATION_EXTENSION));
        assert!(SUPPORTED_EXTENSIONS.contains(&"png"));
    }

    // Tests progress display settings
    // Verified by changing display constants
    #[test]
    fn test_progress_settings() {
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert_eq!(PROGRESS_BAR_WIDTH, 30);
    }
}
