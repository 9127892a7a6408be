//! Colors for levels, certificate statuses and branding
//!
//! Both lookups are total: anything outside the known set gets
//! [`NEUTRAL_GRAY`], so a corrupt record can never fail a render here.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to the 0-1 range PDF color operators expect
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

pub const BRAND: Rgb = Rgb(30, 55, 90);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BODY_TEXT: Rgb = Rgb(80, 80, 80);
pub const ROW_TEXT: Rgb = Rgb(60, 60, 60);
pub const TRACK: Rgb = Rgb(230, 230, 230);
pub const NEUTRAL_GRAY: Rgb = Rgb(100, 100, 100);

const LEVEL_1: Rgb = Rgb(220, 80, 80);
const LEVEL_2: Rgb = Rgb(230, 140, 50);
const LEVEL_3: Rgb = Rgb(220, 190, 40);
const LEVEL_4: Rgb = Rgb(60, 120, 200);
const LEVEL_5: Rgb = Rgb(50, 160, 100);

/// Green used for "valid" and for certificate highlights
pub const ACCENT: Rgb = LEVEL_5;

pub fn color_for_level(level: i64) -> Rgb {
    match level {
        1 => LEVEL_1,
        2 => LEVEL_2,
        3 => LEVEL_3,
        4 => LEVEL_4,
        5 => LEVEL_5,
        _ => NEUTRAL_GRAY,
    }
}

pub fn color_for_status(status: &str) -> Rgb {
    match status {
        "valid" => Rgb(50, 160, 100),
        "expired" => Rgb(220, 80, 80),
        "pending" => Rgb(220, 190, 40),
        "not_applicable" => Rgb(150, 150, 150),
        _ => NEUTRAL_GRAY,
    }
}
