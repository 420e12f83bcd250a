use anyhow::anyhow;
use image::{ImageBuffer, Rgba};

const ICON_SIZE: u32 = 32;

/// Tray icon: a hollow accent frame around a smaller filled window, echoing
/// the drag outline.
pub fn generate_icon() -> anyhow::Result<tray_icon::Icon> {
    let mut img = ImageBuffer::from_pixel(ICON_SIZE, ICON_SIZE, Rgba([0, 0, 0, 0]));

    let accent = Rgba([0, 120, 212, 255]);
    let body = Rgba([240, 240, 240, 255]);
    let title = Rgba([0, 90, 160, 255]);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let on_frame = x < 3 || y < 3 || x >= ICON_SIZE - 3 || y >= ICON_SIZE - 3;
        if on_frame {
            *pixel = accent;
        } else if (8..24).contains(&x) && (8..24).contains(&y) {
            *pixel = if y < 12 { title } else { body };
        }
    }

    tray_icon::Icon::from_rgba(img.into_raw(), ICON_SIZE, ICON_SIZE)
        .map_err(|err| anyhow!("building tray icon: {err}"))
}
