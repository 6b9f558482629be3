/// Camera aspect ratio for a viewport, or `None` while it has no area
/// (a minimized window reports zero height).
pub fn aspect_ratio(width: f32, height: f32) -> Option<f32> {
    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Some(width / height)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(1920.0, 1080.0), Some(1920.0 / 1080.0));
        assert_eq!(aspect_ratio(800.0, 800.0), Some(1.0));
    }

    #[test]
    fn test_aspect_ratio_degenerate_viewport() {
        assert_eq!(aspect_ratio(1280.0, 0.0), None);
        assert_eq!(aspect_ratio(0.0, 720.0), None);
        assert_eq!(aspect_ratio(f32::NAN, 720.0), None);
    }
}
