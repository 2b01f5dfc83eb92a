// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

/// Color type for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Red color.
    pub const RED: Color = Color(255, 0, 0);
    /// Green color.
    pub const GREEN: Color = Color(0, 255, 0);
    /// Gray color.
    pub const GRAY: Color = Color(128, 128, 128);

    /// Joints flagged by a fired rule.
    pub const FLAGGED: Color = Self::RED;
    /// Joints with no problem.
    pub const OK: Color = Self::GREEN;
    /// Skeleton connector lines.
    pub const CONNECTOR: Color = Self::GRAY;

    /// Components as an `[r, g, b]` array.
    pub const fn to_array(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    /// Color for a joint given whether it was flagged.
    pub const fn for_joint(flagged: bool) -> Self {
        if flagged {
            Self::FLAGGED
        } else {
            Self::OK
        }
    }
}
