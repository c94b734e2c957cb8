// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `0xRRGGBB` color helpers.

/// Splits `0xRRGGBB` into normalized `[r, g, b]` channels.
#[must_use]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        channel(hex >> 16),
        channel(hex >> 8),
        channel(hex),
    ]
}

/// Returns `[r*a, g*a, b*a, a]` for `0xRRGGBB` and `alpha`.
#[must_use]
pub fn premultiplied(hex: u32, alpha: f64) -> [f32; 4] {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "vertex colors are single precision"
    )]
    let a = alpha as f32;
    let [r, g, b] = hex_to_rgb(hex);
    [r * a, g * a, b * a, a]
}

/// Multiplies two `0xRRGGBB` colors channel by channel.
#[must_use]
pub fn multiply(a: u32, b: u32) -> u32 {
    let mul = |shift: u32| (((a >> shift) & 0xFF) * ((b >> shift) & 0xFF) / 255) << shift;
    mul(16) | mul(8) | mul(0)
}

fn channel(bits: u32) -> f32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "masked to one byte"
    )]
    let byte = (bits & 0xFF) as u8;
    f32::from(byte) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_channels() {
        assert_eq!(hex_to_rgb(0xFF_0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb(0x00_FF00), [0.0, 1.0, 0.0]);
        assert_eq!(hex_to_rgb(0x00_00FF), [0.0, 0.0, 1.0]);
        let [r, g, b] = hex_to_rgb(0x80_4020);
        assert!((r - 128.0 / 255.0).abs() < 1e-6);
        assert!((g - 64.0 / 255.0).abs() < 1e-6);
        assert!((b - 32.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn multiply_is_per_channel() {
        assert_eq!(multiply(0xFF_FFFF, 0x12_3456), 0x12_3456);
        assert_eq!(multiply(0xFF_0000, 0x00_FF00), 0);
        assert_eq!(multiply(0x80_8080, 0x80_8080), 0x40_4040);
    }

    #[test]
    fn premultiplies_by_alpha() {
        assert_eq!(premultiplied(0xFF_FFFF, 0.5), [0.5, 0.5, 0.5, 0.5]);
        assert_eq!(premultiplied(0xFF_0000, 0.0), [0.0, 0.0, 0.0, 0.0]);
    }
}
