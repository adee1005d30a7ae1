/// Red, yellow, blue, green. Click target `i` is always `PALETTE[i]`.
pub const PALETTE: [u32; 4] = [0xFF0000, 0xFFFF00, 0x0000FF, 0x00FF00];

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub fn rgb_to_rgba(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        1.0,
    ]
}

pub fn palette_color(index: usize) -> [f32; 4] {
    rgb_to_rgba(PALETTE[index % PALETTE.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_order_is_fixed() {
        assert_eq!(palette_color(0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(palette_color(1), [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(palette_color(2), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(palette_color(3), [0.0, 1.0, 0.0, 1.0]);
    }
}
