use wgpu::TextureFormat;

/// sRGB transfer curve, encoded channel to linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Colors are authored as sRGB hex. An `*Srgb` target encodes on write,
/// so they must be linearized first; other targets take them as-is.
pub fn for_target(color: [f32; 4], format: TextureFormat) -> [f32; 4] {
    if !format.is_srgb() {
        return color;
    }
    [
        srgb_to_linear(color[0]),
        srgb_to_linear(color[1]),
        srgb_to_linear(color[2]),
        color[3],
    ]
}
