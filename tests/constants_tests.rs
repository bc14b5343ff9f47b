// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use photobooth::constants::{
    BRIGHTNESS_RANGE, BackgroundStyle, BorderStyle, CONTRAST_RANGE, GRAYSCALE_RANGE,
    HUE_ROTATE_RANGE, INVERT_RANGE, SEPIA_RANGE, SESSION_SHOTS,
};

#[test]
fn test_session_size() {
    // Three shots per session, matching the booth layout
    assert_eq!(SESSION_SHOTS, 3);
}

#[test]
fn test_adjustment_ranges_contain_their_neutral() {
    for range in [
        SEPIA_RANGE,
        GRAYSCALE_RANGE,
        HUE_ROTATE_RANGE,
        INVERT_RANGE,
        BRIGHTNESS_RANGE,
        CONTRAST_RANGE,
    ] {
        assert!(range.min <= range.neutral && range.neutral <= range.max);
        // Clamping the neutral value must be a no-op
        assert_eq!(range.clamp(range.neutral), range.neutral);
    }
}

#[test]
fn test_background_display_names() {
    // Test that all presets have non-empty display names
    for background in BackgroundStyle::ALL {
        assert!(
            !background.display_name().is_empty(),
            "Preset {:?} has empty display name",
            background
        );
    }
}

#[test]
fn test_border_display_names() {
    for border in BorderStyle::ALL {
        assert!(
            !border.display_name().is_empty(),
            "Preset {:?} has empty display name",
            border
        );
    }
}

#[test]
fn test_default_cosmetics_match_the_booth() {
    // Sunset gradient behind a sky border is the booth default
    assert_eq!(BackgroundStyle::default(), BackgroundStyle::Sunset);
    assert_eq!(BorderStyle::default(), BorderStyle::Sky);
}
