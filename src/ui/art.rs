//! Startup banner drawn with half-block characters.
//!
//! Each terminal cell shows two vertically stacked pixels: the foreground
//! colour paints the upper half (`▀`), the background colour the lower half.
//! Rendering needs the `art` feature; the result is cached as text next to
//! the data files and reused on later runs.

use std::fs;
use std::path::Path;

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::models::DisplayConfig;

/// Nearest xterm-256 colour index for an RGB triple.
pub fn rgb_to_ansi(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return ((f64::from(r) - 8.0) / 247.0 * 24.0).round() as u8 + 232;
    }
    let level = |c: u8| (f64::from(c) / 255.0 * 5.0).round() as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

fn cache_name(width: u32) -> String {
    format!("ascii_art_halfblock_w{width}.txt")
}

/// Banner text, from cache or freshly rendered.
///
/// `Ok(None)` when the capability is missing or the image does not exist.
pub fn load_banner(dir: &Path, display: &DisplayConfig, caps: &Capabilities) -> Result<Option<String>> {
    if !caps.art {
        return Ok(None);
    }
    let image_path = dir.join(&display.art_image);
    if !image_path.exists() {
        log::debug!("No banner image at {}", image_path.display());
        return Ok(None);
    }

    let cache_path = dir.join(cache_name(display.art_width));
    match fs::read_to_string(&cache_path) {
        Ok(cached) => return Ok(Some(cached)),
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            log::warn!("Ignoring unreadable banner cache {}: {}", cache_path.display(), e);
        }
        Err(_) => {}
    }

    log::info!("Rendering banner (w={}) for the first time", display.art_width);
    let art = render(&image_path, display.art_width)?;
    if let Err(e) = fs::write(&cache_path, &art) {
        log::warn!("Could not cache banner at {}: {}", cache_path.display(), e);
    }
    Ok(Some(art))
}

#[cfg(feature = "art")]
fn render(path: &Path, width: u32) -> Result<String> {
    use image::GenericImageView;
    use image::imageops::FilterType;

    use crate::error::AppError;

    let img = image::open(path).map_err(AppError::image)?;
    let (w, h) = img.dimensions();
    if w == 0 || width == 0 {
        return Err(AppError::image("image has no width"));
    }

    let mut height = (f64::from(h) / f64::from(w) * f64::from(width) * 0.9) as u32;
    height -= height % 2;
    if height == 0 {
        return Err(AppError::image("image too flat to render"));
    }

    let rgb = img
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgb8();

    let lines: Vec<String> = (0..height)
        .step_by(2)
        .map(|y| {
            let mut line = String::new();
            for x in 0..width {
                let [r1, g1, b1] = rgb.get_pixel(x, y).0;
                let [r2, g2, b2] = rgb.get_pixel(x, y + 1).0;
                line.push_str(&format!(
                    "\x1b[38;5;{}m\x1b[48;5;{}m▀",
                    rgb_to_ansi(r1, g1, b1),
                    rgb_to_ansi(r2, g2, b2)
                ));
            }
            line.push_str("\x1b[0m");
            line
        })
        .collect();

    Ok(lines.join("\n"))
}

#[cfg(not(feature = "art"))]
fn render(_path: &Path, _width: u32) -> Result<String> {
    Err(crate::error::AppError::image(
        "built without the `art` feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rgb_to_ansi_grays() {
        assert_eq!(rgb_to_ansi(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi(255, 255, 255), 231);
        assert_eq!(rgb_to_ansi(128, 128, 128), 244);
    }

    #[test]
    fn test_rgb_to_ansi_colors() {
        assert_eq!(rgb_to_ansi(255, 0, 0), 196);
        assert_eq!(rgb_to_ansi(0, 255, 0), 46);
        assert_eq!(rgb_to_ansi(0, 0, 255), 21);
    }

    #[test]
    fn test_no_banner_without_capability() {
        let tmp = TempDir::new().unwrap();
        let caps = Capabilities {
            chart: true,
            art: false,
        };
        let banner = load_banner(tmp.path(), &DisplayConfig::default(), &caps).unwrap();
        assert!(banner.is_none());
    }

    #[test]
    fn test_no_banner_without_image() {
        let tmp = TempDir::new().unwrap();
        let caps = Capabilities {
            chart: true,
            art: true,
        };
        let banner = load_banner(tmp.path(), &DisplayConfig::default(), &caps).unwrap();
        assert!(banner.is_none());
    }

    #[test]
    fn test_cached_banner_is_reused() {
        let tmp = TempDir::new().unwrap();
        let display = DisplayConfig::default();
        fs::write(tmp.path().join(&display.art_image), b"not decoded when cached").unwrap();
        fs::write(tmp.path().join(cache_name(display.art_width)), "cached art").unwrap();
        let caps = Capabilities {
            chart: true,
            art: true,
        };

        let banner = load_banner(tmp.path(), &display, &caps).unwrap();
        assert_eq!(banner.as_deref(), Some("cached art"));
    }
}
