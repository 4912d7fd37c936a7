use glam::Vec3;

/// Converts one sRGB-encoded channel to linear.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Unpacks `0xRRGGBB` into sRGB channels in `[0, 1]`, without conversion.
#[must_use]
pub fn hex_to_srgb(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Unpacks `0xRRGGBB` and converts it to linear RGB.
#[must_use]
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let srgb = hex_to_srgb(hex);
    Vec3::new(
        srgb_to_linear(srgb.x),
        srgb_to_linear(srgb.y),
        srgb_to_linear(srgb.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        assert_eq!(hex_to_srgb(0xff0000), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(hex_to_linear(0xffffff), Vec3::ONE);
    }

    #[test]
    fn mid_grey_darkens_when_linearized() {
        let lin = hex_to_linear(0x333333);
        assert!(lin.x < 0.2 && lin.x > 0.03);
    }
}
